//! Sign flow construction: flow creation, document attachment, signature
//! field placement, start, and signer URL retrieval.

// self
use crate::{
	_prelude::*,
	endpoints::to_body,
	http::Method,
	pipeline::{ApiRequest, RequestPipeline},
};

/// Client for `/v1/signflows` operations.
#[derive(Clone, Debug)]
pub struct SignFlowClient {
	pipeline: Arc<RequestPipeline>,
}
impl SignFlowClient {
	pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
		Self { pipeline }
	}

	/// Creates a sign flow.
	pub async fn create(&self, flow: CreateSignFlowRequest) -> Result<CreatedFlow> {
		let request = ApiRequest::post("/v1/signflows", to_body(&flow)?);

		self.pipeline.execute_as(&request).await
	}

	/// Creates a complete flow (documents, signers, fields) in one call.
	///
	/// The one-step payload mirrors the service's own schema and evolves with
	/// it, so it is passed through as raw JSON.
	pub async fn create_one_step(&self, payload: Value) -> Result<Value> {
		let request = ApiRequest::post("/api/v2/signflows/createFlowOneStep", payload);

		self.pipeline.execute_as(&request).await
	}

	/// Attaches documents to a flow.
	pub async fn add_documents(&self, flow_id: &str, docs: &[Document]) -> Result<Option<Value>> {
		let body = to_body(&DocumentsBody { docs })?;
		let request = ApiRequest::post(format!("/v1/signflows/{flow_id}/documents"), body);

		self.pipeline.execute(&request).await
	}

	/// Adds a platform-side (caller) stamping field to a flow document.
	pub async fn add_platform_sign_field(
		&self,
		flow_id: &str,
		field: PlatformSignField,
	) -> Result<Option<Value>> {
		let body = to_body(&SignFieldsBody { signfields: &[field] })?;
		let request =
			ApiRequest::post(format!("/v1/signflows/{flow_id}/signfields/platformSign"), body);

		self.pipeline.execute(&request).await
	}

	/// Adds an automatic stamping field executed on behalf of an authorized
	/// signer account.
	pub async fn add_auto_sign_field(
		&self,
		flow_id: &str,
		field: AutoSignField,
	) -> Result<Option<Value>> {
		let body = to_body(&SignFieldsBody { signfields: &[field] })?;
		let request = ApiRequest::post(format!("/v1/signflows/{flow_id}/signfields/autoSign"), body);

		self.pipeline.execute(&request).await
	}

	/// Adds a hand-signed field completed interactively by the signer.
	pub async fn add_hand_sign_field(
		&self,
		flow_id: &str,
		field: HandSignField,
	) -> Result<Option<Value>> {
		let body = to_body(&SignFieldsBody { signfields: &[field] })?;
		let request = ApiRequest::post(format!("/v1/signflows/{flow_id}/signfields/handSign"), body);

		self.pipeline.execute(&request).await
	}

	/// Starts the flow; no further documents or fields can be added.
	pub async fn start(&self, flow_id: &str) -> Result<()> {
		let request = ApiRequest::new(Method::Put, format!("/v1/signflows/{flow_id}/start"));

		self.pipeline.execute(&request).await.map(|_| ())
	}

	/// Fetches the URL a signer visits to execute the flow.
	pub async fn execute_url(
		&self,
		flow_id: &str,
		account_id: &str,
		options: ExecuteUrlOptions,
	) -> Result<ExecuteUrl> {
		let request = ApiRequest::get(format!("/v1/signflows/{flow_id}/executeUrl"))
			.with_query("accountId", account_id)
			.with_query_opt("organizeId", options.organize_id)
			.with_query("urlType", options.url_type)
			.with_query_opt("appScheme", options.app_scheme);

		self.pipeline.execute_as(&request).await
	}
}

/// Parameters for [`SignFlowClient::create`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSignFlowRequest {
	/// Whether the flow archives automatically once every field is signed.
	pub auto_archive: bool,
	/// Business scene label shown to signers.
	pub business_scene: String,
	/// Developer-facing flow configuration.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub config_info: Option<FlowConfigInfo>,
}
impl CreateSignFlowRequest {
	/// Creates a flow request with auto-archive enabled.
	pub fn new(business_scene: impl Into<String>) -> Self {
		Self { auto_archive: true, business_scene: business_scene.into(), config_info: None }
	}

	/// Overrides the auto-archive behavior.
	pub fn with_auto_archive(mut self, auto_archive: bool) -> Self {
		self.auto_archive = auto_archive;

		self
	}

	/// Registers a callback URL notified on flow status changes.
	pub fn with_notice_developer_url(mut self, url: impl Into<String>) -> Self {
		self.config_info = Some(FlowConfigInfo { notice_developer_url: Some(url.into()) });

		self
	}
}

/// Developer-facing flow configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConfigInfo {
	/// Callback URL notified on flow status changes.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub notice_developer_url: Option<String>,
}

/// One document attached via [`SignFlowClient::add_documents`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
	/// Identifier of an uploaded or template-created file.
	pub file_id: String,
	/// Encryption flag; `0` for plain documents.
	pub encryption: i32,
	/// Display name override.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_name: Option<String>,
	/// Password protecting an encrypted document.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub file_password: Option<String>,
}
impl Document {
	/// Creates a plain document reference.
	pub fn new(file_id: impl Into<String>) -> Self {
		Self { file_id: file_id.into(), encryption: 0, file_name: None, file_password: None }
	}

	/// Overrides the display name.
	pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
		self.file_name = Some(file_name.into());

		self
	}

	/// Marks the document as encrypted with the provided password.
	pub fn with_password(mut self, file_password: impl Into<String>) -> Self {
		self.encryption = 1;
		self.file_password = Some(file_password.into());

		self
	}
}

/// Position of a seal or signature on a document.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignaturePosition {
	/// Page selector, e.g. `"1"` or `"1-3"`.
	pub pos_page: String,
	/// Horizontal coordinate.
	pub pos_x: f64,
	/// Vertical coordinate.
	pub pos_y: f64,
}
impl SignaturePosition {
	/// Creates a position on the provided page(s).
	pub fn new(pos_page: impl Into<String>, pos_x: f64, pos_y: f64) -> Self {
		Self { pos_page: pos_page.into(), pos_x, pos_y }
	}
}

/// Platform-side stamping field placed by [`SignFlowClient::add_platform_sign_field`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSignField {
	/// Target document.
	pub file_id: String,
	/// Seal applied by the platform.
	pub seal_id: String,
	/// Field position.
	pub pos_bean: SignaturePosition,
	/// Sign-date stamp mode; `0` omits the date stamp.
	pub sign_date_bean_type: i32,
	/// Sign-date stamp placement, when stamped.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sign_date_bean: Option<Value>,
	/// Signature rendering type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sign_type: Option<i32>,
}
impl PlatformSignField {
	/// Creates a field stamping `seal_id` onto `file_id` at `pos`.
	pub fn new(file_id: impl Into<String>, seal_id: impl Into<String>, pos: SignaturePosition) -> Self {
		Self {
			file_id: file_id.into(),
			seal_id: seal_id.into(),
			pos_bean: pos,
			sign_date_bean_type: 0,
			sign_date_bean: None,
			sign_type: None,
		}
	}

	/// Stamps the sign date with the provided mode and placement.
	pub fn with_sign_date(mut self, bean_type: i32, bean: Value) -> Self {
		self.sign_date_bean_type = bean_type;
		self.sign_date_bean = Some(bean);

		self
	}

	/// Overrides the signature rendering type.
	pub fn with_sign_type(mut self, sign_type: i32) -> Self {
		self.sign_type = Some(sign_type);

		self
	}
}

/// Automatic stamping field placed by [`SignFlowClient::add_auto_sign_field`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoSignField {
	/// Target document.
	pub file_id: String,
	/// Signer account that authorized silent signing.
	pub authorized_account_id: String,
	/// Seal applied on the signer's behalf.
	pub seal_id: String,
	/// Field position.
	pub pos_bean: SignaturePosition,
	/// Sign-date stamp mode; `0` omits the date stamp.
	pub sign_date_bean_type: i32,
	/// Sign-date stamp placement, when stamped.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sign_date_bean: Option<Value>,
	/// Signature rendering type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sign_type: Option<i32>,
}
impl AutoSignField {
	/// Creates a field signing `file_id` on behalf of `authorized_account_id`.
	pub fn new(
		file_id: impl Into<String>,
		authorized_account_id: impl Into<String>,
		seal_id: impl Into<String>,
		pos: SignaturePosition,
	) -> Self {
		Self {
			file_id: file_id.into(),
			authorized_account_id: authorized_account_id.into(),
			seal_id: seal_id.into(),
			pos_bean: pos,
			sign_date_bean_type: 0,
			sign_date_bean: None,
			sign_type: None,
		}
	}
}

/// Hand-signed field placed by [`SignFlowClient::add_hand_sign_field`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandSignField {
	/// Target document.
	pub file_id: String,
	/// Signer completing the field interactively.
	pub signer_account_id: String,
	/// Field position.
	pub pos_bean: SignaturePosition,
	/// Sign-date stamp mode; `0` omits the date stamp.
	pub sign_date_bean_type: i32,
	/// Sign-date stamp placement, when stamped.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub sign_date_bean: Option<Value>,
}
impl HandSignField {
	/// Creates a field signed interactively by `signer_account_id`.
	pub fn new(
		file_id: impl Into<String>,
		signer_account_id: impl Into<String>,
		pos: SignaturePosition,
	) -> Self {
		Self {
			file_id: file_id.into(),
			signer_account_id: signer_account_id.into(),
			pos_bean: pos,
			sign_date_bean_type: 0,
			sign_date_bean: None,
		}
	}
}

/// Options for [`SignFlowClient::execute_url`].
#[derive(Clone, Debug, Default)]
pub struct ExecuteUrlOptions {
	/// Organization context when the signer acts for an organization.
	pub organize_id: Option<String>,
	/// URL flavor; `0` for the long form.
	pub url_type: i32,
	/// App scheme for in-app redirection.
	pub app_scheme: Option<String>,
}

/// Flow creation result.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFlow {
	/// Service-assigned flow identifier.
	pub flow_id: String,
}

/// Signer URL returned by [`SignFlowClient::execute_url`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteUrl {
	/// Long-form signing URL.
	pub url: String,
	/// Short-form signing URL, when issued.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub short_url: Option<String>,
}

#[derive(Serialize)]
struct DocumentsBody<'a> {
	docs: &'a [Document],
}

#[derive(Serialize)]
struct SignFieldsBody<'a, T> {
	signfields: &'a [T],
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn create_flow_nests_the_notice_url_under_config_info() {
		let flow = CreateSignFlowRequest::new("Purchase contract")
			.with_notice_developer_url("https://example.com/cb");
		let body = serde_json::to_value(&flow).expect("Flow fixture should serialize.");

		assert_eq!(body["autoArchive"], true);
		assert_eq!(body["businessScene"], "Purchase contract");
		assert_eq!(body["configInfo"]["noticeDeveloperUrl"], "https://example.com/cb");
	}

	#[test]
	fn sign_fields_nest_positions_under_pos_bean() {
		let field = PlatformSignField::new("file-1", "seal-1", SignaturePosition::new("1", 100.0, 200.0))
			.with_sign_type(1);
		let body = serde_json::to_value(&field).expect("Field fixture should serialize.");

		assert_eq!(body["posBean"]["posPage"], "1");
		assert_eq!(body["posBean"]["posX"], 100.0);
		assert_eq!(body["posBean"]["posY"], 200.0);
		assert_eq!(body["signType"], 1);
		assert!(body.get("signDateBean").is_none());
	}

	#[test]
	fn documents_wrap_into_the_docs_array() {
		let docs = [Document::new("file-1").with_file_name("contract.pdf")];
		let body = serde_json::to_value(DocumentsBody { docs: &docs })
			.expect("Documents fixture should serialize.");

		assert_eq!(body["docs"][0]["fileId"], "file-1");
		assert_eq!(body["docs"][0]["encryption"], 0);
		assert_eq!(body["docs"][0]["fileName"], "contract.pdf");
	}

	#[test]
	fn password_protected_documents_flip_the_encryption_flag() {
		let document = Document::new("file-1").with_password("hunter2");

		assert_eq!(document.encryption, 1);
		assert_eq!(document.file_password.as_deref(), Some("hunter2"));
	}
}
