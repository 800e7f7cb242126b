//! Flow template queries.

// self
use crate::{
	_prelude::*,
	pipeline::{ApiRequest, RequestPipeline},
};

/// Client for `/v3/flow-templates` queries.
#[derive(Clone, Debug)]
pub struct TemplateClient {
	pipeline: Arc<RequestPipeline>,
}
impl TemplateClient {
	pub(crate) fn new(pipeline: Arc<RequestPipeline>) -> Self {
		Self { pipeline }
	}

	/// Lists flow template basic info, paged with 1-based `page_num`.
	pub async fn flow_templates(&self, page_num: u32, page_size: u32) -> Result<Option<Value>> {
		let request = ApiRequest::get("/v3/flow-templates/basic-info")
			.with_query("pageNum", page_num)
			.with_query("pageSize", page_size);

		self.pipeline.execute(&request).await
	}
}
