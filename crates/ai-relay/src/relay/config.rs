use crate::ais::{PollConfig, ENV_OPENAI_API_KEY};
use crate::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// region:    --- Env Names

pub const ENV_ASSISTANT_NAME: &str = "ASSISTANT_NAME";
pub const ENV_MODEL: &str = "MODEL";
pub const ENV_TEMPERATURE: &str = "TEMPERATURE";
pub const ENV_INSTRUCTIONS: &str = "INSTRUCTIONS";
pub const ENV_INSTRUCTIONS_FILE: &str = "INSTRUCTIONS_FILE";
pub const ENV_FOLDER_NAME: &str = "FOLDER_NAME";
pub const ENV_FILE_NAME: &str = "FILE_NAME";
pub const ENV_VECTOR_STORE_NAME: &str = "VECTOR_STORE_NAME";
pub const ENV_DATA_DIR: &str = "DATA_DIR";
pub const ENV_RUN_POLL_INTERVAL_MS: &str = "RUN_POLL_INTERVAL_MS";
pub const ENV_RUN_TIMEOUT_SECS: &str = "RUN_TIMEOUT_SECS";

// endregion: --- Env Names

// region:    --- Defaults

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_FOLDER_NAME: &str = "files";
const DEFAULT_DATA_DIR: &str = ".relay";
const DEFAULT_RUN_POLL_INTERVAL_MS: u64 = 2000;
const DEFAULT_RUN_TIMEOUT_SECS: u64 = 300;

// endregion: --- Defaults

#[derive(Debug, Clone, PartialEq)]
pub enum Instructions {
	Text(String),
	/// Read on each upload, so edits are picked up by a refresh.
	File(PathBuf),
}

#[derive(Clone)]
pub struct Config {
	pub openai_api_key: String,
	pub assistant_name: String,
	pub model: String,
	pub temperature: Option<f32>,
	pub instructions: Option<Instructions>,
	pub folder_name: PathBuf,
	pub file_name: String,
	pub vector_store_name: Option<String>,
	pub data_dir: PathBuf,
	pub poll: PollConfig,
}

impl std::fmt::Debug for Config {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Config")
			.field("openai_api_key", &"[REDACTED]")
			.field("assistant_name", &self.assistant_name)
			.field("model", &self.model)
			.field("temperature", &self.temperature)
			.field("instructions", &self.instructions)
			.field("folder_name", &self.folder_name)
			.field("file_name", &self.file_name)
			.field("vector_store_name", &self.vector_store_name)
			.field("data_dir", &self.data_dir)
			.field("poll", &self.poll)
			.finish()
	}
}

/// Constructors
impl Config {
	/// Reads the process environment (load `.env` beforehand if needed).
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds the config from a name -> value lookup. Blank values count as unset.
	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let get = |name: &str| {
			lookup(name)
				.map(|v| v.trim().to_string())
				.filter(|v| !v.is_empty())
		};
		let required = |name: &'static str| get(name).ok_or(Error::MissingEnv(name));

		let temperature: Option<f32> = parse_opt(ENV_TEMPERATURE, get(ENV_TEMPERATURE))?;
		if let Some(t) = temperature {
			if !(0.0..=2.0).contains(&t) {
				return Err(Error::InvalidEnv {
					name: ENV_TEMPERATURE,
					value: t.to_string(),
				});
			}
		}

		let instructions = match (get(ENV_INSTRUCTIONS), get(ENV_INSTRUCTIONS_FILE)) {
			(Some(text), _) => Some(Instructions::Text(text)),
			(None, Some(file)) => Some(Instructions::File(file.into())),
			(None, None) => None,
		};

		let interval_ms = parse_opt(ENV_RUN_POLL_INTERVAL_MS, get(ENV_RUN_POLL_INTERVAL_MS))?
			.unwrap_or(DEFAULT_RUN_POLL_INTERVAL_MS);
		let timeout_secs = parse_opt(ENV_RUN_TIMEOUT_SECS, get(ENV_RUN_TIMEOUT_SECS))?
			.unwrap_or(DEFAULT_RUN_TIMEOUT_SECS);
		if interval_ms == 0 {
			return Err(Error::InvalidEnv {
				name: ENV_RUN_POLL_INTERVAL_MS,
				value: "0".to_string(),
			});
		}

		Ok(Self {
			openai_api_key: required(ENV_OPENAI_API_KEY)?,
			assistant_name: required(ENV_ASSISTANT_NAME)?,
			model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
			temperature,
			instructions,
			folder_name: get(ENV_FOLDER_NAME)
				.unwrap_or_else(|| DEFAULT_FOLDER_NAME.to_string())
				.into(),
			file_name: required(ENV_FILE_NAME)?,
			vector_store_name: get(ENV_VECTOR_STORE_NAME),
			data_dir: get(ENV_DATA_DIR)
				.unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
				.into(),
			poll: PollConfig {
				interval: Duration::from_millis(interval_ms),
				timeout: Duration::from_secs(timeout_secs),
			},
		})
	}
}

/// Getters
impl Config {
	pub fn knowledge_file(&self) -> PathBuf {
		self.folder_name.join(&self.file_name)
	}
}

fn parse_opt<T: FromStr>(name: &'static str, value: Option<String>) -> Result<Option<T>> {
	value
		.map(|v| v.parse::<T>().map_err(|_| Error::InvalidEnv { name, value: v }))
		.transpose()
}

// region:    --- Tests


// endregion: --- Tests
