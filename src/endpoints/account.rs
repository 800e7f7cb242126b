//! Personal account management: creation, lookup, updates, and silent-sign
//! authorization.

// self
use crate::{
	_prelude::*,
	endpoints::to_body,
	pipeline::{ApiRequest, RequestPipeline},
};

/// Client for `/v1/accounts` and `/v1/signAuth` operations.
#[derive(Clone, Debug)]
pub struct AccountClient {
	pipeline: Arc<RequestPipeline>,
}
impl AccountClient {
	pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
		Self { pipeline }
	}

	/// Creates a personal account keyed by the caller's own user identifier.
	pub async fn create_person(&self, person: CreatePersonRequest) -> Result<CreatedAccount> {
		let request = ApiRequest::post("/v1/accounts/createByThirdPartyUserId", to_body(&person)?);

		self.pipeline.execute_as(&request).await
	}

	/// Fetches a personal account by its service-assigned identifier.
	pub async fn person_by_account_id(&self, account_id: &str) -> Result<Option<Value>> {
		let request = ApiRequest::get(format!("/v1/accounts/{account_id}"));

		self.pipeline.execute(&request).await
	}

	/// Fetches a personal account by the caller's own user identifier.
	pub async fn person_by_third_party_id(&self, third_party_user_id: &str) -> Result<Option<Value>> {
		let request = ApiRequest::get("/v1/accounts/getByThirdId")
			.with_query("thirdPartyUserId", third_party_user_id);

		self.pipeline.execute(&request).await
	}

	/// Updates mutable personal account fields; omitted fields stay unchanged.
	pub async fn update_person(
		&self,
		account_id: &str,
		update: UpdatePersonRequest,
	) -> Result<Option<Value>> {
		let request = ApiRequest::put(format!("/v1/accounts/{account_id}"), to_body(&update)?);

		self.pipeline.execute(&request).await
	}

	/// Grants silent-sign authorization, optionally until `deadline`
	/// (formatted `yyyy-MM-dd HH:mm:ss`; `None` means open-ended).
	pub async fn grant_sign_auth(&self, account_id: &str, deadline: Option<&str>) -> Result<()> {
		let body = to_body(&SignAuthRequest { deadline })?;
		let request = ApiRequest::post(format!("/v1/signAuth/{account_id}"), body);

		self.pipeline.execute(&request).await.map(|_| ())
	}

	/// Revokes a previously granted silent-sign authorization.
	pub async fn revoke_sign_auth(&self, account_id: &str) -> Result<()> {
		let request = ApiRequest::delete(format!("/v1/signAuth/{account_id}"));

		self.pipeline.execute(&request).await.map(|_| ())
	}
}

/// Parameters for [`AccountClient::create_person`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
	/// Caller-side unique user identifier.
	pub third_party_user_id: String,
	/// Legal name.
	pub name: String,
	/// Certificate type, e.g. `CRED_PSN_CH_IDCARD`.
	pub id_type: String,
	/// Certificate number.
	pub id_number: String,
	/// Contact mobile number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mobile: Option<String>,
	/// Contact email address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
}
impl CreatePersonRequest {
	/// Creates a request from the required identity fields.
	pub fn new(
		third_party_user_id: impl Into<String>,
		name: impl Into<String>,
		id_type: impl Into<String>,
		id_number: impl Into<String>,
	) -> Self {
		Self {
			third_party_user_id: third_party_user_id.into(),
			name: name.into(),
			id_type: id_type.into(),
			id_number: id_number.into(),
			mobile: None,
			email: None,
		}
	}

	/// Attaches a contact mobile number.
	pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
		self.mobile = Some(mobile.into());

		self
	}

	/// Attaches a contact email address.
	pub fn with_email(mut self, email: impl Into<String>) -> Self {
		self.email = Some(email.into());

		self
	}
}

/// Mutable personal account fields for [`AccountClient::update_person`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
	/// Contact mobile number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mobile: Option<String>,
	/// Contact email address.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Legal name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Certificate type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_type: Option<String>,
	/// Certificate number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_number: Option<String>,
}

/// Account creation result.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedAccount {
	/// Service-assigned account identifier.
	pub account_id: String,
}

#[derive(Serialize)]
struct SignAuthRequest<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	deadline: Option<&'a str>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn create_person_serializes_to_the_service_field_names() {
		let person = CreatePersonRequest::new("u-1", "Alice", "CRED_PSN_CH_IDCARD", "110101...")
			.with_mobile("13800000000");
		let body = serde_json::to_value(&person).expect("Request fixture should serialize.");

		assert_eq!(body["thirdPartyUserId"], "u-1");
		assert_eq!(body["idType"], "CRED_PSN_CH_IDCARD");
		assert_eq!(body["mobile"], "13800000000");
		assert!(body.get("email").is_none(), "Absent optionals must be omitted, not null.");
	}

	#[test]
	fn update_person_omits_unchanged_fields() {
		let update = UpdatePersonRequest { email: Some("a@b.c".into()), ..Default::default() };
		let body = serde_json::to_value(&update).expect("Update fixture should serialize.");

		assert_eq!(body.as_object().map(|fields| fields.len()), Some(1));
		assert_eq!(body["email"], "a@b.c");
	}
}
