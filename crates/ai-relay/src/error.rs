use crate::ais::{RunId, RunStatus};
use crate::event;
use async_openai::error::OpenAIError;
use derive_more::From;
use std::io;
use tokio::sync::broadcast;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
	// -- config
	MissingEnv(&'static str),
	InvalidEnv {
		name: &'static str,
		value: String,
	},

	// -- relay
	EmptyUserMessage,

	// -- ais
	KnowledgeFileNotFound {
		file_name: String,
		folder: String,
	},
	KnowledgeFileHasNoName(String),
	NoAsstMessageInThread,
	NoTextInAsstMessage,
	RunFailed {
		status: RunStatus,
		reason: Option<String>,
	},
	RunTimeout {
		run_id: RunId,
		waited_secs: u64,
	},

	// -- Event
	#[from]
	BoadcastSend(broadcast::error::SendError<event::Event>),

	// -- Std
	#[from]
	IO(io::Error),

	// -- Externals
	#[from]
	SimpleFs(simple_fs::Error),
	#[from]
	OpenAI(OpenAIError),
}

impl Error {
	/// True when the remote platform answered that the object does not exist.
	///
	/// Transport, rate limit or auth failures are not "not found".
	pub fn is_not_found(&self) -> bool {
		match self {
			Error::OpenAI(OpenAIError::ApiError(api_err)) => {
				api_err.code.as_deref() == Some("not_found")
					|| (api_err.message.starts_with("No ") && api_err.message.contains(" found with id"))
			}
			_ => false,
		}
	}
}

// region:    --- Error Boilerplate
impl core::fmt::Display for Error {
	fn fmt(
		&self,
		fmt: &mut core::fmt::Formatter,
	) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for Error {}
// endregion: --- Error Boilerplate

// region:    --- Tests


// endregion: --- Tests
