//! Application identity types: credentials and the redacted secret wrapper.

// self
use crate::_prelude::*;

/// Redacted application secret keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSecret(String);
impl AppSecret {
	const MASK_SUFFIX_LEN: usize = 5;

	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}

	/// Returns a masked form safe for diagnostics: `***` plus the last five characters.
	pub fn masked(&self) -> String {
		let chars = self.0.chars().collect::<Vec<_>>();
		let keep = chars.len().min(Self::MASK_SUFFIX_LEN);
		let suffix = chars[chars.len() - keep..].iter().collect::<String>();

		format!("***{suffix}")
	}
}
impl AsRef<str> for AppSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AppSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AppSecret").field(&"<redacted>").finish()
	}
}
impl Display for AppSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Immutable application identity: the app id plus its secret.
///
/// Supplied once at construction and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
	app_id: String,
	secret: AppSecret,
}
impl Credentials {
	/// Creates a new identity pair.
	pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Self {
		Self { app_id: app_id.into(), secret: AppSecret::new(secret) }
	}

	/// Application identifier sent with every authenticated request.
	pub fn app_id(&self) -> &str {
		&self.app_id
	}

	/// Application secret used when requesting access tokens.
	pub fn secret(&self) -> &AppSecret {
		&self.secret
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = AppSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "AppSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn masked_form_keeps_only_the_suffix() {
		assert_eq!(AppSecret::new("0123456789abcdef").masked(), "***bcdef");
		assert_eq!(AppSecret::new("ab").masked(), "***ab");
		assert_eq!(AppSecret::new("").masked(), "***");
	}

	#[test]
	fn credentials_debug_never_prints_the_secret() {
		let credentials = Credentials::new("app-1", "super-secret");
		let rendered = format!("{credentials:?}");

		assert!(rendered.contains("app-1"));
		assert!(!rendered.contains("super-secret"));
	}
}
