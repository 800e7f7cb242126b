//! Organization account management and seal queries.

// self
use crate::{
	_prelude::*,
	endpoints::to_body,
	pipeline::{ApiRequest, RequestPipeline},
};

/// Client for `/v1/organizations` operations.
#[derive(Clone, Debug)]
pub struct OrganizationClient {
	pipeline: Arc<RequestPipeline>,
}
impl OrganizationClient {
	pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
		Self { pipeline }
	}

	/// Creates an organization account keyed by the caller's own identifier
	/// (typically the unified social credit code).
	pub async fn create_organization(
		&self,
		organization: CreateOrganizationRequest,
	) -> Result<CreatedOrganization> {
		let request =
			ApiRequest::post("/v1/organizations/createByThirdPartyUserId", to_body(&organization)?);

		self.pipeline.execute_as(&request).await
	}

	/// Fetches an organization by its service-assigned identifier.
	pub async fn organization_by_org_id(&self, org_id: &str) -> Result<Option<Value>> {
		let request = ApiRequest::get(format!("/v1/organizations/{org_id}"));

		self.pipeline.execute(&request).await
	}

	/// Fetches an organization by the caller's own identifier.
	pub async fn organization_by_third_party_id(
		&self,
		third_party_user_id: &str,
	) -> Result<Option<Value>> {
		let request = ApiRequest::get("/v1/organizations/getByThirdId")
			.with_query("thirdPartyUserId", third_party_user_id);

		self.pipeline.execute(&request).await
	}

	/// Updates mutable organization fields; omitted fields stay unchanged.
	pub async fn update_organization(
		&self,
		org_id: &str,
		update: UpdateOrganizationRequest,
	) -> Result<Option<Value>> {
		let request = ApiRequest::put(format!("/v1/organizations/{org_id}"), to_body(&update)?);

		self.pipeline.execute(&request).await
	}

	/// Lists seals granted to the organization, paged by `offset` + `size`.
	/// `download_flag` controls whether image download links are included.
	pub async fn granted_seals(
		&self,
		org_id: &str,
		download_flag: bool,
		offset: u32,
		size: u32,
	) -> Result<Option<Value>> {
		let request = ApiRequest::get(format!("/v1/organizations/{org_id}/granted/seals"))
			.with_query("downloadFlag", download_flag)
			.with_query("offset", offset)
			.with_query("size", size);

		self.pipeline.execute(&request).await
	}
}

/// Parameters for [`OrganizationClient::create_organization`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
	/// Caller-side unique organization identifier.
	pub third_party_user_id: String,
	/// Account id of the person creating the organization.
	pub creator: String,
	/// Registered organization name.
	pub name: String,
	/// Certificate type, e.g. `CRED_ORG_USCC`.
	pub id_type: String,
	/// Certificate number.
	pub id_number: String,
	/// Legal representative's certificate number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub org_legal_id_number: Option<String>,
	/// Legal representative's name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub org_legal_name: Option<String>,
}
impl CreateOrganizationRequest {
	/// Creates a request from the required registration fields.
	pub fn new(
		third_party_user_id: impl Into<String>,
		creator: impl Into<String>,
		name: impl Into<String>,
		id_type: impl Into<String>,
		id_number: impl Into<String>,
	) -> Self {
		Self {
			third_party_user_id: third_party_user_id.into(),
			creator: creator.into(),
			name: name.into(),
			id_type: id_type.into(),
			id_number: id_number.into(),
			org_legal_id_number: None,
			org_legal_name: None,
		}
	}

	/// Attaches the legal representative's identity.
	pub fn with_legal_representative(
		mut self,
		name: impl Into<String>,
		id_number: impl Into<String>,
	) -> Self {
		self.org_legal_name = Some(name.into());
		self.org_legal_id_number = Some(id_number.into());

		self
	}
}

/// Mutable organization fields for [`OrganizationClient::update_organization`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationRequest {
	/// Registered organization name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Certificate type.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_type: Option<String>,
	/// Certificate number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub id_number: Option<String>,
	/// Legal representative's certificate number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub org_legal_id_number: Option<String>,
	/// Legal representative's name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub org_legal_name: Option<String>,
}

/// Organization creation result.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrganization {
	/// Service-assigned organization identifier.
	pub org_id: String,
}
