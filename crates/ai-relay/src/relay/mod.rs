//! The `relay` module sequences the remote calls for one assistant and its conversations.
//!
//! At init, the knowledge file, the assistant and (optionally) the vector store are resolved
//! with reuse-or-create. Then each chat message goes: thread message, run, poll, last reply.
//!
//! A `Relay` is shared by the front ends (`Arc<Relay>` in the bot), so conversation lookups
//! are guarded and messages of the same thread are handled one at a time.

// region:    --- Modules

mod config;
mod conv;
mod event;

pub use config::{Config, Instructions};
pub use conv::Conv;
pub use event::RelayEvent;

use crate::ais::{
	asst, file, new_ais_client, thread, vector_store, AisClient, AsstId, AsstSpec, FileId,
	MsgInfo, ThreadId, VectorStoreId,
};
use crate::event::{Event, EventBus};
use crate::relay::conv::ConvStore;
use crate::{Error, Result};
use simple_fs::read_to_string;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast::Receiver;
use tokio::sync::Mutex;
use tracing::{info, warn};

// endregion: --- Modules

#[derive(Debug)]
pub struct Relay {
	config: Config,
	ais_client: AisClient,
	asst_id: AsstId,
	file_id: FileId,
	vector_store_id: Option<VectorStoreId>,
	event_bus: EventBus,
	convs: Mutex<ConvStore>,
	thread_locks: std::sync::Mutex<HashMap<ThreadId, Arc<Mutex<()>>>>,
}

/// Constructor functions
impl Relay {
	pub async fn init(
		config: Config,
		recreate_asst: bool,
		event_bus: Option<EventBus>,
	) -> Result<Self> {
		let event_bus = event_bus.unwrap_or_else(EventBus::new);
		let ais_client = new_ais_client(&config.openai_api_key, event_bus.clone())?;

		Self::init_with_client(config, ais_client, recreate_asst).await
	}

	/// Same as `init` with a prebuilt client (e.g., another `AisApi` implementation).
	pub async fn init_with_client(
		config: Config,
		ais_client: AisClient,
		recreate_asst: bool,
	) -> Result<Self> {
		let ais = &ais_client;

		// -- Get or Upload the knowledge file
		let (file_id, _) = file::load_or_upload(ais, &config.knowledge_file(), false).await?;

		// -- Get or Create the assistant
		let spec = asst_spec(&config)?;
		let (asst_id, _) = asst::load_or_create(ais, &spec, recreate_asst).await?;

		// -- Get or Create the vector store, and attach it
		let vector_store_id = match config.vector_store_name.as_deref() {
			Some(vs_name) => {
				let (vs_id, _) = vector_store::load_or_create(ais, vs_name, &file_id).await?;
				asst::attach_vector_store(ais, &asst_id, &vs_id).await?;
				Some(vs_id)
			}
			None => None,
		};

		let convs = ConvStore::load(&config.data_dir)?;

		info!(
			asst_id = %asst_id,
			file_id = %file_id,
			vector_store_id = ?vector_store_id.as_ref().map(|id| id.to_string()),
			"relay ready"
		);

		Ok(Relay {
			event_bus: ais_client.event_bus().clone(),
			config,
			ais_client,
			asst_id,
			file_id,
			vector_store_id,
			convs: Mutex::new(convs),
			thread_locks: Default::default(),
		})
	}
}

/// Public functions
impl Relay {
	pub fn name(&self) -> &str {
		&self.config.assistant_name
	}

	pub fn asst_id(&self) -> &AsstId {
		&self.asst_id
	}

	pub fn vector_store_id(&self) -> Option<&VectorStoreId> {
		self.vector_store_id.as_ref()
	}

	pub fn subscribe(&self) -> Result<Receiver<Event>> {
		self.event_bus.subscribe()
	}

	/// Pushes the configured model, temperature and instructions to the assistant.
	///
	/// Returns false when no instructions are configured (nothing sent).
	pub async fn upload_instructions(&self) -> Result<bool> {
		if self.config.instructions.is_none() {
			return Ok(false);
		}

		let spec = asst_spec(&self.config)?;
		asst::sync_config(&self.ais_client, &self.asst_id, &spec).await?;
		self.event_bus.send(RelayEvent::InstUploaded)?;

		Ok(true)
	}

	/// Re-resolves the knowledge file (`force` re-uploads it), and keeps the vector store in sync.
	///
	/// Returns true if the file was uploaded.
	pub async fn upload_file(&mut self, force: bool) -> Result<bool> {
		let (file_id, uploaded) =
			file::load_or_upload(&self.ais_client, &self.config.knowledge_file(), force)
				.await?;

		if let Some(vs_id) = self.vector_store_id.as_ref() {
			vector_store::ensure_file(&self.ais_client, vs_id, &file_id).await?;
		}
		self.file_id = file_id;

		Ok(uploaded)
	}

	/// Returns the conversation stored for `key`, or a new one.
	/// - `recreate` is `true`, a new thread always replaces the stored one.
	/// - a stored thread the platform reports as not found is replaced as well.
	///
	/// Any other remote failure is returned and the stored thread is kept.
	pub async fn load_or_create_conv(&self, key: &str, recreate: bool) -> Result<Conv> {
		let ais = &self.ais_client;

		// -- The store lock is never held across remote calls.
		let stored = self.convs.lock().await.get(key).cloned();

		let mut replaced = false;
		if let (false, Some(thread_id)) = (recreate, stored.as_ref()) {
			match thread::get_thread(ais, thread_id).await {
				Ok(()) => {
					self.event_bus.send(RelayEvent::ConvLoaded {
						key: key.to_string(),
					})?;
					return Ok(Conv::new(key, thread_id.clone()));
				}
				Err(err) if err.is_not_found() => {
					warn!(key, thread_id = %thread_id, error = %err, "stored thread not found, creating a new one");
					replaced = true;
				}
				Err(err) => return Err(err),
			}
		}

		let thread_id = thread::create_thread(ais).await?;
		self.convs.lock().await.set(key, thread_id.clone())?;
		if let Some(old_thread_id) = stored {
			self.forget_thread_lock(&old_thread_id);
		}

		let key_s = key.to_string();
		let evt = if replaced {
			RelayEvent::ConvReplaced { key: key_s }
		} else {
			RelayEvent::ConvCreated { key: key_s }
		};
		self.event_bus.send(evt)?;

		Ok(Conv::new(key, thread_id))
	}

	/// Sends `msg` on the conversation thread, runs the assistant, and returns its reply.
	pub async fn chat(&self, conv: &Conv, msg: &str) -> Result<String> {
		if msg.trim().is_empty() {
			return Err(Error::EmptyUserMessage);
		}

		let ais = &self.ais_client;
		let thread_id = conv.thread_id();

		// -- One message at a time per thread
		let lock = self.thread_lock(thread_id);
		let _guard = lock.lock().await;

		// -- Without a vector store, the file goes with each message
		let attachment = match self.vector_store_id {
			Some(_) => None,
			None => Some(&self.file_id),
		};
		thread::add_user_msg(ais, thread_id, msg, attachment).await?;

		// -- Run and wait
		let run = thread::create_run(ais, thread_id, &self.asst_id).await?;
		thread::await_run(ais, thread_id, &run.id, self.config.poll).await?;

		thread::last_asst_text(ais, thread_id).await
	}

	/// The conversation messages, oldest first.
	pub async fn history(&self, conv: &Conv) -> Result<Vec<MsgInfo>> {
		thread::list_msgs(&self.ais_client, conv.thread_id()).await
	}
}

/// Private functions
impl Relay {
	fn thread_locks(&self) -> std::sync::MutexGuard<'_, HashMap<ThreadId, Arc<Mutex<()>>>> {
		self.thread_locks
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
	}

	/// Lock of one thread. Locks nobody holds anymore are dropped on the way.
	fn thread_lock(&self, thread_id: &ThreadId) -> Arc<Mutex<()>> {
		let mut locks = self.thread_locks();
		locks.retain(|_, lock| Arc::strong_count(lock) > 1);
		locks.entry(thread_id.clone()).or_default().clone()
	}

	fn forget_thread_lock(&self, thread_id: &ThreadId) {
		self.thread_locks().remove(thread_id);
	}
}

fn asst_spec(config: &Config) -> Result<AsstSpec> {
	let instructions = match config.instructions.as_ref() {
		Some(Instructions::Text(text)) => Some(text.clone()),
		Some(Instructions::File(file)) => Some(read_to_string(file)?),
		None => None,
	};

	Ok(AsstSpec {
		name: config.assistant_name.clone(),
		model: config.model.clone(),
		instructions,
		temperature: config.temperature,
	})
}

// region:    --- Tests


// endregion: --- Tests
