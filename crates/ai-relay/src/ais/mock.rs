//! In-memory `AisApi` used by the tests.

use crate::ais::{
	AisApi, AsstId, AsstSpec, FileId, MsgInfo, MsgRole, RemoteObj, RunId, RunInfo, RunStatus,
	RunUsage, ThreadId, VectorStoreId,
};
use crate::Result;
use async_openai::error::{ApiError, OpenAIError};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MockState {
	pub files: Vec<RemoteObj>,
	pub assts: Vec<RemoteObj>,
	pub asst_specs: HashMap<String, AsstSpec>,
	pub asst_vector_stores: HashMap<String, Vec<VectorStoreId>>,
	pub vector_stores: Vec<RemoteObj>,
	pub vector_store_files: HashMap<String, Vec<FileId>>,
	pub threads: HashSet<String>,
	/// Oldest first, per thread id.
	pub msgs: HashMap<String, Vec<MsgInfo>>,
	/// Statuses returned by successive `get_run` calls, `completed` once drained.
	pub run_script: VecDeque<RunStatus>,
	pub run_error: Option<String>,
	/// Assistant reply appended to the thread when a run completes.
	pub reply: String,
	/// When set, `get_thread` fails like a dropped connection.
	pub get_thread_transient_error: bool,
	/// Delay of `get_thread`, to observe overlapping lookups.
	pub get_thread_delay: Option<Duration>,
	pub get_thread_in_flight: usize,
	pub get_thread_max_in_flight: usize,
	/// One line per mutating call, e.g. `add_user_msg thread-3 attach=file-1`.
	pub calls: Vec<String>,
	completed_runs: HashSet<String>,
	run_threads: HashMap<String, String>,
	seq: i64,
}

impl MockState {
	fn next(&mut self, prefix: &str) -> (String, i64) {
		self.seq += 1;
		(format!("{prefix}-{}", self.seq), 1_700_000_000 + self.seq)
	}

	pub fn calls_starting_with(&self, prefix: &str) -> Vec<&String> {
		self.calls.iter().filter(|c| c.starts_with(prefix)).collect()
	}
}

#[derive(Debug, Clone, Default)]
pub struct MockAis {
	state: Arc<Mutex<MockState>>,
}

impl MockAis {
	pub fn state(&self) -> MutexGuard<'_, MockState> {
		self.state.lock().unwrap()
	}

	pub fn with_reply(reply: &str) -> Self {
		let mock = Self::default();
		mock.state().reply = reply.to_string();
		mock
	}
}

/// Same shape as the platform's answer for an unknown id.
fn not_found(kind: &str, id: &str) -> crate::Error {
	OpenAIError::ApiError(ApiError {
		message: format!("No {kind} found with id '{id}'."),
		r#type: Some("invalid_request_error".to_string()),
		param: None,
		code: None,
	})
	.into()
}

#[async_trait]
impl AisApi for MockAis {
	async fn list_files(&self) -> Result<Vec<RemoteObj>> {
		Ok(self.state().files.clone())
	}

	async fn upload_file(&self, file: &Path) -> Result<RemoteObj> {
		let mut st = self.state();
		let name = file
			.file_name()
			.and_then(|n| n.to_str())
			.unwrap_or_default()
			.to_string();
		let (id, created_at) = st.next("file");
		let obj = RemoteObj::new(&id, &name, created_at);
		st.files.push(obj.clone());
		st.calls.push(format!("upload_file {name}"));
		Ok(obj)
	}

	async fn delete_file(&self, file_id: &FileId) -> Result<()> {
		let mut st = self.state();
		st.files.retain(|f| f.id != **file_id);
		st.calls.push(format!("delete_file {file_id}"));
		Ok(())
	}

	async fn list_assts(&self) -> Result<Vec<RemoteObj>> {
		Ok(self.state().assts.clone())
	}

	async fn create_asst(&self, spec: &AsstSpec) -> Result<RemoteObj> {
		let mut st = self.state();
		let (id, created_at) = st.next("asst");
		let obj = RemoteObj::new(&id, &spec.name, created_at);
		st.assts.push(obj.clone());
		st.asst_specs.insert(id.clone(), spec.clone());
		st.calls.push(format!("create_asst {}", spec.name));
		Ok(obj)
	}

	async fn update_asst(&self, asst_id: &AsstId, spec: &AsstSpec) -> Result<()> {
		let mut st = self.state();
		st.asst_specs.insert(asst_id.to_string(), spec.clone());
		st.calls.push(format!("update_asst {asst_id}"));
		Ok(())
	}

	async fn set_asst_vector_stores(
		&self,
		asst_id: &AsstId,
		vector_store_ids: &[VectorStoreId],
	) -> Result<()> {
		let mut st = self.state();
		st.asst_vector_stores
			.insert(asst_id.to_string(), vector_store_ids.to_vec());
		st.calls.push(format!("set_asst_vector_stores {asst_id}"));
		Ok(())
	}

	async fn delete_asst(&self, asst_id: &AsstId) -> Result<()> {
		let mut st = self.state();
		st.assts.retain(|a| a.id != **asst_id);
		st.calls.push(format!("delete_asst {asst_id}"));
		Ok(())
	}

	async fn list_vector_stores(&self) -> Result<Vec<RemoteObj>> {
		Ok(self.state().vector_stores.clone())
	}

	async fn create_vector_store(
		&self,
		name: &str,
		file_ids: &[FileId],
	) -> Result<RemoteObj> {
		let mut st = self.state();
		let (id, created_at) = st.next("vs");
		let obj = RemoteObj::new(&id, name, created_at);
		st.vector_stores.push(obj.clone());
		st.vector_store_files.insert(id.clone(), file_ids.to_vec());
		st.calls.push(format!("create_vector_store {name}"));
		Ok(obj)
	}

	async fn list_vector_store_files(
		&self,
		vector_store_id: &VectorStoreId,
	) -> Result<Vec<FileId>> {
		let st = self.state();
		Ok(st
			.vector_store_files
			.get(vector_store_id.as_str())
			.cloned()
			.unwrap_or_default())
	}

	async fn add_vector_store_file(
		&self,
		vector_store_id: &VectorStoreId,
		file_id: &FileId,
	) -> Result<()> {
		let mut st = self.state();
		st.vector_store_files
			.entry(vector_store_id.to_string())
			.or_default()
			.push(file_id.clone());
		st.calls
			.push(format!("add_vector_store_file {vector_store_id} {file_id}"));
		Ok(())
	}

	async fn create_thread(&self) -> Result<ThreadId> {
		let mut st = self.state();
		let (id, _) = st.next("thread");
		st.threads.insert(id.clone());
		st.calls.push(format!("create_thread {id}"));
		Ok(id.into())
	}

	async fn get_thread(&self, thread_id: &ThreadId) -> Result<()> {
		let delay = {
			let mut st = self.state();
			st.get_thread_in_flight += 1;
			st.get_thread_max_in_flight = st.get_thread_max_in_flight.max(st.get_thread_in_flight);
			st.get_thread_delay
		};
		if let Some(delay) = delay {
			tokio::time::sleep(delay).await;
		}

		let mut st = self.state();
		st.get_thread_in_flight -= 1;
		if st.get_thread_transient_error {
			return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset").into());
		}
		if st.threads.contains(thread_id.as_str()) {
			Ok(())
		} else {
			Err(not_found("thread", thread_id))
		}
	}

	async fn add_user_msg(
		&self,
		thread_id: &ThreadId,
		text: &str,
		attachment: Option<&FileId>,
	) -> Result<()> {
		let mut st = self.state();
		if !st.threads.contains(thread_id.as_str()) {
			return Err(not_found("thread", thread_id));
		}
		let (id, created_at) = st.next("msg");
		st.msgs.entry(thread_id.to_string()).or_default().push(MsgInfo {
			id,
			role: MsgRole::User,
			text: Some(text.to_string()),
			created_at,
		});
		let attach = attachment.map(|f| f.to_string()).unwrap_or_else(|| "none".into());
		st.calls
			.push(format!("add_user_msg {thread_id} attach={attach}"));
		Ok(())
	}

	async fn list_msgs(&self, thread_id: &ThreadId, limit: u32) -> Result<Vec<MsgInfo>> {
		let st = self.state();
		let msgs = st.msgs.get(thread_id.as_str()).cloned().unwrap_or_default();
		Ok(msgs.into_iter().rev().take(limit as usize).collect())
	}

	async fn create_run(&self, thread_id: &ThreadId, asst_id: &AsstId) -> Result<RunInfo> {
		let mut st = self.state();
		let (id, _) = st.next("run");
		st.run_threads.insert(id.clone(), thread_id.to_string());
		st.calls.push(format!("create_run {thread_id} {asst_id}"));
		Ok(RunInfo {
			id: id.into(),
			status: RunStatus::Queued,
			last_error: None,
			usage: None,
		})
	}

	async fn get_run(&self, _thread_id: &ThreadId, run_id: &RunId) -> Result<RunInfo> {
		let mut st = self.state();
		let status = st.run_script.pop_front().unwrap_or(RunStatus::Completed);

		let mut usage = None;
		if status == RunStatus::Completed && st.completed_runs.insert(run_id.to_string()) {
			let thread_id = st.run_threads.get(run_id.as_str()).cloned().unwrap_or_default();
			let reply = st.reply.clone();
			let (id, created_at) = st.next("msg");
			st.msgs.entry(thread_id).or_default().push(MsgInfo {
				id,
				role: MsgRole::Asst,
				text: Some(reply),
				created_at,
			});
			usage = Some(RunUsage {
				prompt_tokens: 10,
				completion_tokens: 5,
				total_tokens: 15,
			});
		}

		let last_error = match status {
			RunStatus::Failed => st.run_error.clone(),
			_ => None,
		};

		Ok(RunInfo {
			id: run_id.clone(),
			status,
			last_error,
			usage,
		})
	}
}
