//! Ais Event

use crate::ais::{AsstId, FileId, ResRef, RunId, RunStatus, RunUsage, ThreadId, VectorStoreId};

#[derive(Debug, Clone)]
pub enum AisEvent {
	// -- Reuse-or-create Events
	Loaded(ResRef),
	/// Several remote resources share the name, the latest one was selected.
	LoadedLatest {
		res_ref: ResRef,
		created_at: i64,
		count: usize,
	},
	Created(ResRef),
	Deleted(ResRef),

	// -- Asst Events
	AsstSynced(ResRef),
	VectorStoreAttached {
		asst_id: AsstId,
		vector_store_id: VectorStoreId,
	},

	// -- File Events
	FileUploading {
		file_name: String,
	},
	VectorStoreFileAdded {
		vector_store_id: VectorStoreId,
		file_id: FileId,
	},

	// -- Thread Events
	ThreadCreated(ThreadId),
	MsgAdded(ThreadId),
	RunStarted {
		thread_id: ThreadId,
		run_id: RunId,
	},
	RunPolled {
		run_id: RunId,
		status: RunStatus,
	},
	RunCompleted {
		run_id: RunId,
		usage: Option<RunUsage>,
	},
}
