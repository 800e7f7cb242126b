//! Template-backed file creation.

// self
use crate::{
	_prelude::*,
	endpoints::to_body,
	pipeline::{ApiRequest, RequestPipeline},
};

/// Client for `/v1/files` operations.
#[derive(Clone, Debug)]
pub struct FileClient {
	pipeline: Arc<RequestPipeline>,
}
impl FileClient {
	pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
		Self { pipeline }
	}

	/// Fills a template's form fields and creates a signable file from it.
	pub async fn create_by_template(
		&self,
		file: CreateFileByTemplateRequest,
	) -> Result<CreatedFile> {
		let request = ApiRequest::post("/v1/files/createByTemplate", to_body(&file)?);

		self.pipeline.execute_as(&request).await
	}
}

/// Parameters for [`FileClient::create_by_template`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFileByTemplateRequest {
	/// File name shown to signers.
	pub name: String,
	/// Source template identifier.
	pub template_id: String,
	/// Form field identifier to value mapping filled into the template.
	pub simple_form_fields: BTreeMap<String, String>,
}
impl CreateFileByTemplateRequest {
	/// Creates a request for the provided template and display name.
	pub fn new(template_id: impl Into<String>, name: impl Into<String>) -> Self {
		Self { name: name.into(), template_id: template_id.into(), simple_form_fields: BTreeMap::new() }
	}

	/// Fills one form field.
	pub fn with_form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.simple_form_fields.insert(key.into(), value.into());

		self
	}
}

/// File creation result.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFile {
	/// Service-assigned file identifier.
	pub file_id: String,
	/// File name echoed by the service, when present.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub file_name: Option<String>,
}
