// region:    --- Modules

mod error;
mod printer;
mod repl;
mod telegram;
mod utils;

pub use self::error::{Error, Result};
use ai_relay::event::EventBus;
use ai_relay::{Config, Relay};
use clap::{Parser, Subcommand};
use printer::event_printer;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

// endregion: --- Modules

#[tokio::main]
async fn main() {
	// .env first, so clap `env` args and the relay config see its values.
	let _ = dotenvy::dotenv();

	let cli = Cli::parse();
	init_tracing(cli.command());

	println!();
	let _ = io::stdout().flush();

	match start(cli).await {
		Ok(_) => println!("\nBye!\n"),
		Err(e) => println!("\nError: {}\n", e),
	}
}

// region:    --- Cli

#[derive(Debug, Parser)]
#[command(
	name = "relay",
	version,
	about = "Relays chat messages to an OpenAI assistant grounded on a knowledge file."
)]
struct Cli {
	/// Delete and recreate the assistant at start-up.
	#[arg(long, global = true)]
	recreate_asst: bool,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
enum Command {
	/// Interactive console chat (default).
	Console,
	/// Telegram bot, one conversation per chat.
	Telegram {
		/// Bot token from @BotFather.
		#[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
		token: String,
	},
}

impl Cli {
	fn command(&self) -> Command {
		self.command.clone().unwrap_or(Command::Console)
	}
}

// endregion: --- Cli

fn init_tracing(command: Command) {
	// The console front end prints progress itself, so only warnings by default there.
	let default_filter = match command {
		Command::Console => "warn",
		Command::Telegram { .. } => "info",
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}

async fn start(cli: Cli) -> Result<()> {
	let event_bus = EventBus::new();

	let _ = event_printer(&event_bus).await;

	let config = Config::from_env()?;
	let relay = Relay::init(config, cli.recreate_asst, Some(event_bus)).await?;

	match cli.command() {
		Command::Console => repl::run(relay).await,
		Command::Telegram { token } => telegram::run(relay, token).await,
	}
}

// region:    --- Tests


// endregion: --- Tests
