use crate::ais::{
	AisClient, AisEvent, AsstId, FileId, MsgInfo, MsgRole, RunId, RunInfo, RunStatus,
	ThreadId,
};
use crate::{Error, Result};
use std::time::Duration;
use tokio::time::{sleep, Instant};

// region:    --- Constants

const HISTORY_LIMIT: u32 = 100;
const LAST_MSGS_LIMIT: u32 = 20;

// endregion: --- Constants

// region:    --- Types

/// Fixed-interval run polling.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
	pub interval: Duration,
	pub timeout: Duration,
}

// endregion: --- Types

// region:    --- Thread

pub async fn create_thread(ais: &AisClient) -> Result<ThreadId> {
	let thread_id = ais.api().create_thread().await?;
	ais.event_bus()
		.send(AisEvent::ThreadCreated(thread_id.clone()))?;

	Ok(thread_id)
}

/// Ok if the thread still exists remotely.
pub async fn get_thread(ais: &AisClient, thread_id: &ThreadId) -> Result<()> {
	ais.api().get_thread(thread_id).await
}

pub async fn add_user_msg(
	ais: &AisClient,
	thread_id: &ThreadId,
	text: &str,
	attachment: Option<&FileId>,
) -> Result<()> {
	if text.trim().is_empty() {
		return Err(Error::EmptyUserMessage);
	}

	ais.api().add_user_msg(thread_id, text, attachment).await?;
	ais.event_bus().send(AisEvent::MsgAdded(thread_id.clone()))?;

	Ok(())
}

/// Thread messages, oldest first.
pub async fn list_msgs(ais: &AisClient, thread_id: &ThreadId) -> Result<Vec<MsgInfo>> {
	let mut msgs = ais.api().list_msgs(thread_id, HISTORY_LIMIT).await?;
	msgs.reverse();

	Ok(msgs)
}

/// Text of the newest assistant message of the thread.
pub async fn last_asst_text(ais: &AisClient, thread_id: &ThreadId) -> Result<String> {
	let msgs = ais.api().list_msgs(thread_id, LAST_MSGS_LIMIT).await?;

	let msg = msgs
		.into_iter()
		.find(|m| m.role == MsgRole::Asst)
		.ok_or(Error::NoAsstMessageInThread)?;

	msg.text.ok_or(Error::NoTextInAsstMessage)
}

// endregion: --- Thread

// region:    --- Run

pub async fn create_run(
	ais: &AisClient,
	thread_id: &ThreadId,
	asst_id: &AsstId,
) -> Result<RunInfo> {
	let run = ais.api().create_run(thread_id, asst_id).await?;
	ais.event_bus().send(AisEvent::RunStarted {
		thread_id: thread_id.clone(),
		run_id: run.id.clone(),
	})?;

	Ok(run)
}

/// Polls the run every `poll.interval` until it leaves the pending statuses.
/// - `completed` returns the final `RunInfo` (with token usage when reported).
/// - any other terminal status is a `Error::RunFailed`.
/// - still pending after `poll.timeout` is a `Error::RunTimeout`.
pub async fn await_run(
	ais: &AisClient,
	thread_id: &ThreadId,
	run_id: &RunId,
	poll: PollConfig,
) -> Result<RunInfo> {
	let start = Instant::now();

	loop {
		sleep(poll.interval).await;

		let run = ais.api().get_run(thread_id, run_id).await?;
		ais.event_bus().send(AisEvent::RunPolled {
			run_id: run_id.clone(),
			status: run.status,
		})?;

		if run.status.is_pending() {
			let waited = start.elapsed();
			if waited >= poll.timeout {
				return Err(Error::RunTimeout {
					run_id: run_id.clone(),
					waited_secs: waited.as_secs(),
				});
			}
			continue;
		}

		return match run.status {
			RunStatus::Completed => {
				ais.event_bus().send(AisEvent::RunCompleted {
					run_id: run_id.clone(),
					usage: run.usage,
				})?;
				Ok(run)
			}
			status => Err(Error::RunFailed {
				status,
				reason: run.last_error,
			}),
		};
	}
}

// endregion: --- Run

// region:    --- Tests


// endregion: --- Tests
