//! Telegram front end: one conversation (thread) per chat.

use crate::Result;
use ai_relay::Relay;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::ChatAction;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

/// Telegram rejects longer message texts.
const MAX_MSG_CHARS: usize = 4096;
const ERROR_REPLY: &str = "Sorry, something went wrong while answering. Please try again.";
const NON_TEXT_REPLY: &str = "Only text messages are supported.";
const EMPTY_REPLY: &str = "(the assistant returned an empty answer)";
/// Telegram shows a chat action for about 5 seconds.
const TYPING_EVERY: Duration = Duration::from_secs(4);

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
enum BotCmd {
	#[command(description = "show this text.")]
	Help,
	#[command(description = "show this text.")]
	Start,
	#[command(description = "start a new conversation.")]
	New,
}

pub async fn run(relay: Relay, token: String) -> Result<()> {
	let relay = Arc::new(relay);
	let bot = Bot::new(token);

	info!(asst = relay.name(), "telegram bot started");

	let handler = Update::filter_message()
		.branch(dptree::entry().filter_command::<BotCmd>().endpoint(on_command))
		.branch(dptree::endpoint(on_message));

	Dispatcher::builder(bot, handler)
		.dependencies(dptree::deps![relay])
		.enable_ctrlc_handler()
		.build()
		.dispatch()
		.await;

	info!("telegram bot stopped");

	Ok(())
}

pub fn conv_key(chat_id: ChatId) -> String {
	format!("tg-{}", chat_id.0)
}

async fn on_command(
	bot: Bot,
	msg: Message,
	cmd: BotCmd,
	relay: Arc<Relay>,
) -> ResponseResult<()> {
	let text = match cmd {
		BotCmd::Help | BotCmd::Start => BotCmd::descriptions().to_string(),
		BotCmd::New => match relay.load_or_create_conv(&conv_key(msg.chat.id), true).await {
			Ok(_) => "New conversation started.".to_string(),
			Err(err) => {
				error!(chat_id = msg.chat.id.0, error = %err, "new conversation failed");
				ERROR_REPLY.to_string()
			}
		},
	};
	bot.send_message(msg.chat.id, text).await?;

	Ok(())
}

async fn on_message(bot: Bot, msg: Message, relay: Arc<Relay>) -> ResponseResult<()> {
	let chat_id = msg.chat.id;

	let Some(text) = msg.text() else {
		bot.send_message(chat_id, NON_TEXT_REPLY).await?;
		return Ok(());
	};

	let typing_bot = bot.clone();
	let typing = move || {
		let bot = typing_bot.clone();
		async move {
			if let Err(err) = bot.send_chat_action(chat_id, ChatAction::Typing).await {
				warn!(chat_id = chat_id.0, error = %err, "typing action failed");
			}
		}
	};
	let res = while_pending(answer(&relay, chat_id, text), TYPING_EVERY, typing).await;

	// -- Errors end this message flow only, the bot keeps serving.
	let reply = match res {
		Ok(reply) if reply.trim().is_empty() => EMPTY_REPLY.to_string(),
		Ok(reply) => reply,
		Err(err) => {
			error!(chat_id = chat_id.0, error = %err, "message handling failed");
			ERROR_REPLY.to_string()
		}
	};

	for part in split_reply(&reply, MAX_MSG_CHARS) {
		bot.send_message(chat_id, part).await?;
	}

	Ok(())
}

async fn answer(relay: &Relay, chat_id: ChatId, text: &str) -> ai_relay::Result<String> {
	let conv = relay.load_or_create_conv(&conv_key(chat_id), false).await?;
	relay.chat(&conv, text).await
}

/// Awaits `work`, running `action` right away and then every `period` until it is done.
async fn while_pending<T, A, Fut>(work: impl Future<Output = T>, period: Duration, mut action: A) -> T
where
	A: FnMut() -> Fut,
	Fut: Future<Output = ()>,
{
	let mut ticker = tokio::time::interval(period);
	tokio::pin!(work);

	loop {
		tokio::select! {
			out = &mut work => return out,
			_ = ticker.tick() => action().await,
		}
	}
}

/// Splits `text` into parts of at most `max_chars` chars, on line breaks when possible.
fn split_reply(text: &str, max_chars: usize) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut current_len = 0;

	for line in text.split_inclusive('\n') {
		let line_len = line.chars().count();

		if current_len + line_len > max_chars && !current.is_empty() {
			parts.push(std::mem::take(&mut current));
			current_len = 0;
		}

		if line_len > max_chars {
			// a single overlong line is cut on char boundaries
			let chars: Vec<char> = line.chars().collect();
			for chunk in chars.chunks(max_chars) {
				let chunk: String = chunk.iter().collect();
				if chunk.chars().count() == max_chars {
					parts.push(chunk);
				} else {
					current_len = chunk.chars().count();
					current = chunk;
				}
			}
		} else {
			current.push_str(line);
			current_len += line_len;
		}
	}

	if !current.is_empty() {
		parts.push(current);
	}

	parts
}

// region:    --- Tests


// endregion: --- Tests
