use crate::ais::ThreadId;
use crate::Result;
use serde::{Deserialize, Serialize};
use simple_fs::{ensure_dir, load_json, save_json};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CONVS_JSON: &str = "convs.json";

/// A conversation: a local key (console session, chat id) bound to a remote thread.
#[derive(Debug, Clone, PartialEq)]
pub struct Conv {
	key: String,
	thread_id: ThreadId,
}

impl Conv {
	pub(super) fn new(key: impl Into<String>, thread_id: ThreadId) -> Self {
		Self {
			key: key.into(),
			thread_id,
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn thread_id(&self) -> &ThreadId {
		&self.thread_id
	}
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConvMap {
	#[serde(default)]
	convs: BTreeMap<String, ThreadId>,
}

/// The `convs.json` file of the data dir, key -> thread id.
#[derive(Debug)]
pub(super) struct ConvStore {
	file: PathBuf,
	map: ConvMap,
}

impl ConvStore {
	pub fn load(data_dir: &Path) -> Result<Self> {
		ensure_dir(data_dir)?;
		let file = data_dir.join(CONVS_JSON);

		let map = if file.exists() {
			load_json::<ConvMap>(&file)?
		} else {
			ConvMap::default()
		};

		Ok(Self { file, map })
	}

	pub fn get(&self, key: &str) -> Option<&ThreadId> {
		self.map.convs.get(key)
	}

	pub fn set(&mut self, key: &str, thread_id: ThreadId) -> Result<()> {
		self.map.convs.insert(key.to_string(), thread_id);
		save_json(&self.file, &self.map)?;
		Ok(())
	}
}

// region:    --- Tests


// endregion: --- Tests
