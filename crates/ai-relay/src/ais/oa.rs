//! `AisApi` implementation over the async-openai client (Assistants v2).

use crate::ais::msg::{msg_info, user_msg};
use crate::ais::{
	AisApi, AsstId, AsstSpec, FileId, MsgInfo, RemoteObj, RunId, RunInfo, RunStatus,
	RunUsage, ThreadId, VectorStoreId,
};
use crate::Result;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
	AssistantToolFileSearchResources, AssistantToolResources, AssistantTools,
	AssistantToolsFileSearch, CreateAssistantRequest, CreateFileRequest, CreateRunRequest,
	CreateThreadRequest, CreateVectorStoreFileRequest, CreateVectorStoreRequest, FilePurpose,
	ModifyAssistantRequest, RunObject, RunStatus as OaRunStatus,
};
use async_openai::Client;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

// region:    --- Constants

const DEFAULT_QUERY: &[(&str, &str)] = &[("limit", "100")];
const FILES_QUERY: &[(&str, &str)] = &[("purpose", "assistants")];

// endregion: --- Constants

pub type OaClient = Client<OpenAIConfig>;

#[derive(Debug, Clone)]
pub struct OaApi {
	oa_client: OaClient,
}

impl OaApi {
	pub fn new(api_key: &str) -> Self {
		let config = OpenAIConfig::new().with_api_key(api_key);
		Self {
			oa_client: Client::with_config(config),
		}
	}

	pub fn oa_client(&self) -> &OaClient {
		&self.oa_client
	}
}

#[async_trait]
impl AisApi for OaApi {
	// region:    --- Files

	async fn list_files(&self) -> Result<Vec<RemoteObj>> {
		let files = self.oa_client.files().list(FILES_QUERY).await?.data;

		Ok(files
			.into_iter()
			.map(|f| RemoteObj {
				id: f.id,
				name: Some(f.filename),
				created_at: i64::from(f.created_at),
			})
			.collect())
	}

	async fn upload_file(&self, file: &Path) -> Result<RemoteObj> {
		let oa_file = self
			.oa_client
			.files()
			.create(CreateFileRequest {
				file: file.into(),
				purpose: FilePurpose::Assistants,
			})
			.await?;

		Ok(RemoteObj {
			id: oa_file.id,
			name: Some(oa_file.filename),
			created_at: i64::from(oa_file.created_at),
		})
	}

	async fn delete_file(&self, file_id: &FileId) -> Result<()> {
		self.oa_client.files().delete(file_id).await?;
		Ok(())
	}

	// endregion: --- Files

	// region:    --- Assistants

	async fn list_assts(&self) -> Result<Vec<RemoteObj>> {
		let assts = self.oa_client.assistants().list(DEFAULT_QUERY).await?.data;

		Ok(assts
			.into_iter()
			.map(|a| RemoteObj {
				id: a.id,
				name: a.name,
				created_at: i64::from(a.created_at),
			})
			.collect())
	}

	async fn create_asst(&self, spec: &AsstSpec) -> Result<RemoteObj> {
		let asst_obj = self
			.oa_client
			.assistants()
			.create(CreateAssistantRequest {
				model: spec.model.clone(),
				name: Some(spec.name.clone()),
				instructions: spec.instructions.clone(),
				temperature: spec.temperature,
				tools: Some(file_search_tools()),
				..Default::default()
			})
			.await?;

		Ok(RemoteObj {
			id: asst_obj.id,
			name: asst_obj.name,
			created_at: i64::from(asst_obj.created_at),
		})
	}

	async fn update_asst(&self, asst_id: &AsstId, spec: &AsstSpec) -> Result<()> {
		let modif = modify_asst_request(spec);
		self.oa_client.assistants().update(asst_id, modif).await?;

		Ok(())
	}

	async fn set_asst_vector_stores(
		&self,
		asst_id: &AsstId,
		vector_store_ids: &[VectorStoreId],
	) -> Result<()> {
		let file_search = AssistantToolFileSearchResources {
			vector_store_ids: vector_store_ids.iter().map(|id| id.to_string()).collect(),
		};
		let modif = ModifyAssistantRequest {
			tools: Some(file_search_tools()),
			tool_resources: Some(AssistantToolResources {
				code_interpreter: None,
				file_search: Some(file_search),
			}),
			..Default::default()
		};
		self.oa_client.assistants().update(asst_id, modif).await?;

		Ok(())
	}

	async fn delete_asst(&self, asst_id: &AsstId) -> Result<()> {
		self.oa_client.assistants().delete(asst_id).await?;
		Ok(())
	}

	// endregion: --- Assistants

	// region:    --- Vector Stores

	async fn list_vector_stores(&self) -> Result<Vec<RemoteObj>> {
		let stores = self.oa_client.vector_stores().list(DEFAULT_QUERY).await?.data;

		Ok(stores
			.into_iter()
			.map(|vs| RemoteObj {
				id: vs.id,
				name: vs.name,
				created_at: i64::from(vs.created_at),
			})
			.collect())
	}

	async fn create_vector_store(
		&self,
		name: &str,
		file_ids: &[FileId],
	) -> Result<RemoteObj> {
		let vs = self
			.oa_client
			.vector_stores()
			.create(CreateVectorStoreRequest {
				name: Some(name.to_string()),
				file_ids: Some(file_ids.iter().map(|id| id.to_string()).collect()),
				..Default::default()
			})
			.await?;

		Ok(RemoteObj {
			id: vs.id,
			name: vs.name,
			created_at: i64::from(vs.created_at),
		})
	}

	async fn list_vector_store_files(
		&self,
		vector_store_id: &VectorStoreId,
	) -> Result<Vec<FileId>> {
		let files = self
			.oa_client
			.vector_stores()
			.files(vector_store_id)
			.list(DEFAULT_QUERY)
			.await?
			.data;

		Ok(files.into_iter().map(|f| f.id.into()).collect())
	}

	async fn add_vector_store_file(
		&self,
		vector_store_id: &VectorStoreId,
		file_id: &FileId,
	) -> Result<()> {
		self.oa_client
			.vector_stores()
			.files(vector_store_id)
			.create(CreateVectorStoreFileRequest {
				file_id: file_id.to_string(),
				..Default::default()
			})
			.await?;

		Ok(())
	}

	// endregion: --- Vector Stores

	// region:    --- Threads

	async fn create_thread(&self) -> Result<ThreadId> {
		let res = self
			.oa_client
			.threads()
			.create(CreateThreadRequest {
				..Default::default()
			})
			.await?;

		Ok(res.id.into())
	}

	async fn get_thread(&self, thread_id: &ThreadId) -> Result<()> {
		self.oa_client.threads().retrieve(thread_id).await?;
		Ok(())
	}

	async fn add_user_msg(
		&self,
		thread_id: &ThreadId,
		text: &str,
		attachment: Option<&FileId>,
	) -> Result<()> {
		let msg = user_msg(text, attachment);
		let _message_obj = self
			.oa_client
			.threads()
			.messages(thread_id)
			.create(msg)
			.await?;

		Ok(())
	}

	async fn list_msgs(&self, thread_id: &ThreadId, limit: u32) -> Result<Vec<MsgInfo>> {
		let limit = limit.to_string();
		let query = [("limit", limit.as_str()), ("order", "desc")];
		let messages = self
			.oa_client
			.threads()
			.messages(thread_id)
			.list(&query)
			.await?
			.data;

		Ok(messages.into_iter().map(msg_info).collect())
	}

	// endregion: --- Threads

	// region:    --- Runs

	async fn create_run(&self, thread_id: &ThreadId, asst_id: &AsstId) -> Result<RunInfo> {
		let run_request = CreateRunRequest {
			assistant_id: asst_id.to_string(),
			..Default::default()
		};
		let run = self
			.oa_client
			.threads()
			.runs(thread_id)
			.create(run_request)
			.await?;

		Ok(run_info(run))
	}

	async fn get_run(&self, thread_id: &ThreadId, run_id: &RunId) -> Result<RunInfo> {
		let run = self
			.oa_client
			.threads()
			.runs(thread_id)
			.retrieve(run_id)
			.await?;
		debug!(run_id = %run.id, status = ?run.status, "run retrieved");

		Ok(run_info(run))
	}

	// endregion: --- Runs
}

// region:    --- Support

fn file_search_tools() -> Vec<AssistantTools> {
	vec![AssistantTools::FileSearch(AssistantToolsFileSearch::default())]
}

/// Config sync of an existing assistant. Tools are sent too, since a reused
/// assistant may have been created without `file_search`.
fn modify_asst_request(spec: &AsstSpec) -> ModifyAssistantRequest {
	ModifyAssistantRequest {
		model: Some(spec.model.clone()),
		instructions: spec.instructions.clone(),
		temperature: spec.temperature,
		tools: Some(file_search_tools()),
		..Default::default()
	}
}

fn run_info(run: RunObject) -> RunInfo {
	RunInfo {
		id: run.id.into(),
		status: run_status(run.status),
		last_error: run.last_error.map(|err| err.message),
		usage: run.usage.map(|u| RunUsage {
			prompt_tokens: u.prompt_tokens,
			completion_tokens: u.completion_tokens,
			total_tokens: u.total_tokens,
		}),
	}
}

#[allow(unreachable_patterns)]
fn run_status(status: OaRunStatus) -> RunStatus {
	match status {
		OaRunStatus::Queued => RunStatus::Queued,
		OaRunStatus::InProgress => RunStatus::InProgress,
		OaRunStatus::RequiresAction => RunStatus::RequiresAction,
		OaRunStatus::Cancelling => RunStatus::Cancelling,
		OaRunStatus::Cancelled => RunStatus::Cancelled,
		OaRunStatus::Failed => RunStatus::Failed,
		OaRunStatus::Completed => RunStatus::Completed,
		OaRunStatus::Expired => RunStatus::Expired,
		// Covers `incomplete` and statuses added by later API versions.
		_ => RunStatus::Incomplete,
	}
}

// endregion: --- Support

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn config_sync_sends_file_search_tool() {
		let spec = AsstSpec {
			name: "Schedule Assistant".to_string(),
			model: "gpt-4o-mini".to_string(),
			instructions: Some("Answer from the schedule.".to_string()),
			temperature: Some(0.2),
		};

		let modif = modify_asst_request(&spec);

		assert_eq!(modif.model.as_deref(), Some("gpt-4o-mini"));
		assert_eq!(modif.temperature, Some(0.2));
		let tools = modif.tools.unwrap();
		assert_eq!(tools.len(), 1);
		assert!(matches!(tools[0], AssistantTools::FileSearch(_)));
	}

	#[test]
	fn run_status_mapping() {
		assert_eq!(run_status(OaRunStatus::InProgress), RunStatus::InProgress);
		assert_eq!(run_status(OaRunStatus::Expired), RunStatus::Expired);
		assert_eq!(run_status(OaRunStatus::RequiresAction), RunStatus::RequiresAction);
	}
}

// endregion: --- Tests
