//! Interactive console front end (prompt loop).

use crate::utils::cli::{ico_err, ico_res, ico_user, prompt_user, txt_dim, txt_res};
use crate::Result;
use ai_relay::ais::MsgRole;
use ai_relay::{Conv, Relay};
use std::time::Duration;
use textwrap::wrap;
use tokio::time::sleep;
use tracing::error;

const CONV_KEY: &str = "console";
const WRAP_WIDTH: usize = 80;

// region:    --- Types

/// Input Command from the user
#[derive(Debug, PartialEq)]
enum Cmd {
	Quit,
	Chat(String),
	History,
	RefreshConv,
	RefreshInst,
	RefreshFiles,
}

impl Cmd {
	fn from_input(input: impl Into<String>) -> Self {
		let input = input.into();

		match input.trim() {
			"/q" => Self::Quit,
			"/h" => Self::History,
			"/rc" => Self::RefreshConv,
			"/ri" => Self::RefreshInst,
			"/rf" => Self::RefreshFiles,
			_ => Self::Chat(input),
		}
	}
}

// endregion: --- Types

pub async fn run(mut relay: Relay) -> Result<()> {
	let mut conv = relay.load_or_create_conv(CONV_KEY, false).await?;

	println!(
		"{}",
		txt_dim(format!(
			"Chatting with {}. /q quit, /h history, /rc new conversation, /ri re-upload instructions, /rf re-upload file",
			relay.name()
		))
	);

	loop {
		// Lets the event printer flush its lines before the prompt.
		sleep(Duration::from_millis(50)).await;

		let input = prompt_user(relay.name())?;
		let cmd = Cmd::from_input(input);

		if cmd == Cmd::Quit {
			break;
		}

		// -- A failed command is reported, the loop keeps going.
		if let Err(err) = exec(&mut relay, &mut conv, cmd).await {
			error!(error = %err, "console command failed");
			println!("{} {}", ico_err(), err);
		}
	}

	Ok(())
}

async fn exec(relay: &mut Relay, conv: &mut Conv, cmd: Cmd) -> Result<()> {
	match cmd {
		Cmd::Quit => (),

		Cmd::Chat(msg) => {
			let res = relay.chat(conv, &msg).await?;
			let res = wrap(&res, WRAP_WIDTH).join("\n");
			println!("{} {}", ico_res(), txt_res(res));
		}

		Cmd::History => {
			for msg in relay.history(conv).await? {
				let text = msg.text.unwrap_or_else(|| "[non-text content]".to_string());
				let text = wrap(&text, WRAP_WIDTH).join("\n");
				match msg.role {
					MsgRole::User => println!("{} {}", ico_user(), text),
					MsgRole::Asst => println!("{} {}", ico_res(), txt_res(text)),
				}
			}
		}

		Cmd::RefreshConv => {
			*conv = relay.load_or_create_conv(CONV_KEY, true).await?;
		}

		Cmd::RefreshInst => {
			relay.upload_instructions().await?;
			*conv = relay.load_or_create_conv(CONV_KEY, true).await?;
		}

		Cmd::RefreshFiles => {
			relay.upload_file(true).await?;
			*conv = relay.load_or_create_conv(CONV_KEY, true).await?;
		}
	}

	Ok(())
}

// region:    --- Tests


// endregion: --- Tests
