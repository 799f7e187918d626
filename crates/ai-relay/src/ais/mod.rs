//! The `ais` module is the interface with the remote assistant platform (OpenAI Assistants v2).
//!
//! Each remote resource kind (file, assistant, vector store) is resolved with the same
//! reuse-or-create rule (see `pick`), and threads/runs are driven from `thread`.
//! All remote calls go through the `AisApi` trait, so the flow can run against an in-memory mock.

// region:    --- Modules

mod api;
pub mod asst;
mod event;
pub mod file;
pub mod msg;
mod oa;
pub mod pick;
pub mod thread;
mod types;
pub mod vector_store;

#[cfg(test)]
pub(crate) mod mock;

pub use api::AisApi;
pub use event::AisEvent;
pub use oa::{OaApi, OaClient};
pub use thread::PollConfig;
pub use types::*;

use crate::event::EventBus;
use crate::{Error, Result};

// endregion: --- Modules

// region:    --- Client

pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Wraps the remote api and provides additional functionalities
/// such as an event bus.
#[derive(Debug)]
pub struct AisClient {
	api: Box<dyn AisApi>,
	event_bus: EventBus,
}

impl AisClient {
	pub fn with_api(api: impl AisApi + 'static, event_bus: EventBus) -> Self {
		Self {
			api: Box::new(api),
			event_bus,
		}
	}

	pub fn api(&self) -> &dyn AisApi {
		self.api.as_ref()
	}

	pub fn event_bus(&self) -> &EventBus {
		&self.event_bus
	}
}

pub fn new_ais_client(api_key: &str, event_bus: EventBus) -> Result<AisClient> {
	if api_key.trim().is_empty() {
		return Err(Error::MissingEnv(ENV_OPENAI_API_KEY));
	}

	Ok(AisClient::with_api(OaApi::new(api_key), event_bus))
}

// endregion: --- Client

// region:    --- Tests


// endregion: --- Tests
