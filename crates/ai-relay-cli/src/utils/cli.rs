use crate::Result;
use console::{style, Style, StyledObject, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Input;

// region:    --- Prompts

/// Reads one chat line for the assistant `asst_name`.
pub fn prompt_user(asst_name: &str) -> Result<String> {
	let theme = ColorfulTheme {
		prompt_style: Style::new().for_stderr().color256(250),
		prompt_prefix: style("›".to_string()).color256(45).for_stderr(),
		..ColorfulTheme::default()
	};

	Term::stderr().write_line("")?;
	let res = Input::<String>::with_theme(&theme)
		.with_prompt(prompt_text(asst_name))
		.interact_text()?;

	Ok(res)
}

fn prompt_text(asst_name: &str) -> String {
	format!("Ask {asst_name}")
}

// endregion: --- Prompts

// region:    --- Icons

pub fn ico_res() -> StyledObject<&'static str> {
	style("➤").color256(45)
}

pub fn ico_user() -> StyledObject<&'static str> {
	style("›").color256(250)
}

pub fn ico_check() -> StyledObject<&'static str> {
	style("✔").green()
}

pub fn ico_warn() -> StyledObject<&'static str> {
	style("⚠").yellow()
}

pub fn ico_wait() -> StyledObject<&'static str> {
	style("⌛").color256(245)
}

pub fn ico_uploading() -> StyledObject<&'static str> {
	style("↥").yellow()
}

pub fn ico_deleted_ok() -> StyledObject<&'static str> {
	style("⌫").green()
}

pub fn ico_err() -> StyledObject<&'static str> {
	style("✗").red()
}

// endregion: --- Icons

// region:    --- Text Output

pub fn txt_res(text: String) -> StyledObject<String> {
	style(text).bright()
}

pub fn txt_dim(text: String) -> StyledObject<String> {
	style(text).color256(245).italic()
}

pub fn txt_name(text: &str) -> StyledObject<&str> {
	style(text).green().bold()
}

// endregion: --- Text Output

// region:    --- Tests


// endregion: --- Tests
