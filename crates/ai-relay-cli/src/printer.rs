//! Renders the library events on the terminal.

use crate::utils::cli::{
	ico_check, ico_deleted_ok, ico_uploading, ico_wait, ico_warn, txt_dim, txt_name,
};
use crate::Result;
use ai_relay::ais::RunStatus;
use ai_relay::event::{AisEvent, Event, EventBus, RelayEvent};
use ai_relay::fmt_unix_ts;
use console::Term;

pub async fn event_printer(event_bus: &EventBus) -> Result<()> {
	let mut rx = event_bus.subscribe()?;

	tokio::spawn(async move {
		let term = Term::stdout();

		loop {
			let evt = rx.recv().await;
			let _ = term.flush();

			match evt {
				Ok(evt) => {
					if let Some(line) = event_line(&evt) {
						let _ = term.write_line(&line);
					}
				}
				// Lagged receivers just skip the missed lines.
				Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => continue,
				// if here, the event_bus has been dropped, ok to break, nothing to print.
				Err(_) => break,
			}

			let _ = term.flush();
		}
	});

	Ok(())
}

/// One terminal line per event, None for the events not worth a line.
pub fn event_line(evt: &Event) -> Option<String> {
	let line = match evt {
		Event::Ais(ais_evt) => match ais_evt {
			AisEvent::Loaded(res_ref) => format!(
				"{} {} {} found: {}",
				ico_check(),
				res_ref.kind,
				txt_name(&res_ref.name),
				res_ref.id
			),
			AisEvent::LoadedLatest {
				res_ref,
				created_at,
				count,
			} => format!(
				"{} {count} × {} named {}, selected the latest ({}): {}",
				ico_warn(),
				res_ref.kind,
				txt_name(&res_ref.name),
				fmt_unix_ts(*created_at),
				res_ref.id
			),
			AisEvent::Created(res_ref) => format!(
				"{} {} {} created: {}",
				ico_check(),
				res_ref.kind,
				txt_name(&res_ref.name),
				res_ref.id
			),
			AisEvent::Deleted(res_ref) => format!(
				"{} {} {} deleted: {}",
				ico_deleted_ok(),
				res_ref.kind,
				txt_name(&res_ref.name),
				res_ref.id
			),
			AisEvent::AsstSynced(res_ref) => format!(
				"{} Assistant {} config synced",
				ico_check(),
				txt_name(&res_ref.name)
			),
			AisEvent::VectorStoreAttached {
				asst_id,
				vector_store_id,
			} => format!(
				"{} Vector store {vector_store_id} attached to assistant {asst_id}",
				ico_check()
			),
			AisEvent::FileUploading { file_name } => {
				format!("{} Uploading {}", ico_uploading(), txt_name(file_name))
			}
			AisEvent::VectorStoreFileAdded {
				vector_store_id,
				file_id,
			} => format!(
				"{} File {file_id} added to vector store {vector_store_id}",
				ico_check()
			),
			AisEvent::ThreadCreated(thread_id) => {
				format!("{} Thread created: {thread_id}", ico_check())
			}
			AisEvent::MsgAdded(_) => return None,
			AisEvent::RunStarted { run_id, .. } => {
				format!("{} Run started: {run_id}", ico_check())
			}
			AisEvent::RunPolled { status, .. } => match status {
				RunStatus::Completed => return None,
				RunStatus::Queued | RunStatus::InProgress => format!(
					"{} {}",
					ico_wait(),
					txt_dim(format!("{status}..."))
				),
				other => format!("{} Run status: {other}", ico_warn()),
			},
			AisEvent::RunCompleted { usage, .. } => match usage {
				Some(usage) => format!(
					"{} Completed {}",
					ico_check(),
					txt_dim(format!(
						"(tokens: input {}, output {}, total {})",
						usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
					))
				),
				None => format!("{} Completed", ico_check()),
			},
		},

		Event::Relay(relay_evt) => match relay_evt {
			RelayEvent::InstUploaded => format!("{} Instructions uploaded", ico_check()),
			RelayEvent::ConvCreated { key } => {
				format!("{} Conversation {key} created", ico_check())
			}
			RelayEvent::ConvLoaded { key } => {
				format!("{} Conversation {key} loaded", ico_check())
			}
			RelayEvent::ConvReplaced { key } => format!(
				"{} Conversation {key} thread was gone, new thread created",
				ico_warn()
			),
		},
	};

	Some(line)
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use ai_relay::ais::{ResKind, ResRef};

	fn plain(evt: impl Into<Event>) -> Option<String> {
		event_line(&evt.into()).map(|l| console::strip_ansi_codes(&l).to_string())
	}

	#[test]
	fn collision_line_names_count_and_date() {
		let line = plain(AisEvent::LoadedLatest {
			res_ref: ResRef::new(ResKind::Asst, "Schedule Assistant", "asst-9"),
			created_at: 1_706_715_000,
			count: 3,
		})
		.unwrap();

		assert_eq!(
			line,
			"⚠ 3 × Assistant named Schedule Assistant, selected the latest (31 Jan 2024, 15:30): asst-9"
		);
	}

	#[test]
	fn quiet_events_have_no_line() {
		assert_eq!(plain(AisEvent::MsgAdded("thread-1".to_string().into())), None);
		assert_eq!(
			plain(AisEvent::RunPolled {
				run_id: "run-1".to_string().into(),
				status: RunStatus::Completed
			}),
			None
		);
	}

	#[test]
	fn relay_events_have_lines() {
		let line = plain(RelayEvent::ConvCreated {
			key: "console".to_string(),
		})
		.unwrap();
		assert_eq!(line, "✔ Conversation console created");
	}
}

// endregion: --- Tests
