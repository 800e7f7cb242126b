//! Typed endpoint clients layered over the request pipeline.
//!
//! Each client is a thin wrapper: it maps method parameters to the service's
//! JSON field names, delegates to
//! [`RequestPipeline::execute`](crate::pipeline::RequestPipeline::execute),
//! and deserializes well-known creation payloads into typed results.
//! Open-ended query payloads come back as raw [`Value`]s since their shape is
//! owned by the service.

pub mod account;
pub mod file;
pub mod organization;
pub mod signflow;
pub mod template;

pub use account::AccountClient;
pub use file::FileClient;
pub use organization::OrganizationClient;
pub use signflow::SignFlowClient;
pub use template::TemplateClient;

// self
use crate::{_prelude::*, error::ConfigError};

pub(crate) fn to_body<T>(value: &T) -> Result<Value>
where
	T: Serialize,
{
	serde_json::to_value(value).map_err(|source| ConfigError::SerializeBody { source }.into())
}
