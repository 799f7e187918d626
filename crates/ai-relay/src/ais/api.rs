//! The `AisApi` trait is the seam between the reuse-or-create/run logic and
//! the remote assistant platform. `OaApi` (see `oa.rs`) is the production implementation.

use crate::ais::{
	AsstId, AsstSpec, FileId, MsgInfo, RemoteObj, RunId, RunInfo, ThreadId, VectorStoreId,
};
use crate::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait AisApi: Send + Sync + std::fmt::Debug {
	// -- Files
	/// Lists the account files uploaded with the `assistants` purpose.
	async fn list_files(&self) -> Result<Vec<RemoteObj>>;
	async fn upload_file(&self, file: &Path) -> Result<RemoteObj>;
	async fn delete_file(&self, file_id: &FileId) -> Result<()>;

	// -- Assistants
	async fn list_assts(&self) -> Result<Vec<RemoteObj>>;
	async fn create_asst(&self, spec: &AsstSpec) -> Result<RemoteObj>;
	async fn update_asst(&self, asst_id: &AsstId, spec: &AsstSpec) -> Result<()>;
	async fn set_asst_vector_stores(
		&self,
		asst_id: &AsstId,
		vector_store_ids: &[VectorStoreId],
	) -> Result<()>;
	async fn delete_asst(&self, asst_id: &AsstId) -> Result<()>;

	// -- Vector Stores
	async fn list_vector_stores(&self) -> Result<Vec<RemoteObj>>;
	async fn create_vector_store(
		&self,
		name: &str,
		file_ids: &[FileId],
	) -> Result<RemoteObj>;
	async fn list_vector_store_files(
		&self,
		vector_store_id: &VectorStoreId,
	) -> Result<Vec<FileId>>;
	async fn add_vector_store_file(
		&self,
		vector_store_id: &VectorStoreId,
		file_id: &FileId,
	) -> Result<()>;

	// -- Threads
	async fn create_thread(&self) -> Result<ThreadId>;
	async fn get_thread(&self, thread_id: &ThreadId) -> Result<()>;
	async fn add_user_msg(
		&self,
		thread_id: &ThreadId,
		text: &str,
		attachment: Option<&FileId>,
	) -> Result<()>;
	/// Newest first, at most `limit`.
	async fn list_msgs(&self, thread_id: &ThreadId, limit: u32) -> Result<Vec<MsgInfo>>;

	// -- Runs
	async fn create_run(&self, thread_id: &ThreadId, asst_id: &AsstId) -> Result<RunInfo>;
	async fn get_run(&self, thread_id: &ThreadId, run_id: &RunId) -> Result<RunInfo>;
}
