use derive_more::{Deref, Display, From};
use serde::{Deserialize, Serialize};

// region:    --- Ids

#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Deref, Display)]
pub struct AsstId(String);

impl From<&AsstId> for AsstId {
	fn from(val: &AsstId) -> Self {
		val.clone()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Deref, Display)]
pub struct FileId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Deref, Display)]
pub struct VectorStoreId(String);

#[derive(
	Debug, Clone, PartialEq, Eq, Hash, From, Deref, Display, Serialize, Deserialize,
)]
pub struct ThreadId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Deref, Display)]
pub struct RunId(String);

// endregion: --- Ids

// region:    --- Remote Objects

/// A listed remote resource, reduced to what the reuse-or-create selection needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteObj {
	pub id: String,
	pub name: Option<String>,
	/// Unix seconds.
	pub created_at: i64,
}

impl RemoteObj {
	pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: i64) -> Self {
		Self {
			id: id.into(),
			name: Some(name.into()),
			created_at,
		}
	}
}

/// Kind of remote resource handled by the reuse-or-create logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ResKind {
	#[display("File")]
	File,
	#[display("Assistant")]
	Asst,
	#[display("Vector store")]
	VectorStore,
}

#[derive(Debug, Clone)]
pub struct ResRef {
	pub kind: ResKind,
	pub name: String,
	pub id: String,
}

impl ResRef {
	pub fn new(kind: ResKind, name: impl Into<String>, id: impl Into<String>) -> Self {
		Self {
			kind,
			name: name.into(),
			id: id.into(),
		}
	}
}

// endregion: --- Remote Objects

// region:    --- Asst

/// What is sent when an assistant gets created or synced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AsstSpec {
	pub name: String,
	pub model: String,
	pub instructions: Option<String>,
	pub temperature: Option<f32>,
}

// endregion: --- Asst

// region:    --- Run

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RunStatus {
	#[display("queued")]
	Queued,
	#[display("in_progress")]
	InProgress,
	#[display("requires_action")]
	RequiresAction,
	#[display("cancelling")]
	Cancelling,
	#[display("cancelled")]
	Cancelled,
	#[display("failed")]
	Failed,
	#[display("completed")]
	Completed,
	#[display("incomplete")]
	Incomplete,
	#[display("expired")]
	Expired,
}

impl RunStatus {
	/// True while the remote run may still move to another status by itself.
	pub fn is_pending(&self) -> bool {
		matches!(self, Self::Queued | Self::InProgress | Self::Cancelling)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunUsage {
	pub prompt_tokens: u32,
	pub completion_tokens: u32,
	pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunInfo {
	pub id: RunId,
	pub status: RunStatus,
	pub last_error: Option<String>,
	pub usage: Option<RunUsage>,
}

// endregion: --- Run

// region:    --- Msg

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MsgRole {
	#[display("user")]
	User,
	#[display("assistant")]
	Asst,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MsgInfo {
	pub id: String,
	pub role: MsgRole,
	/// None when the first content part is not text (e.g., image).
	pub text: Option<String>,
	pub created_at: i64,
}

// endregion: --- Msg
