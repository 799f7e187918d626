use chrono::DateTime;

/// Formats remote `created_at` unix seconds like "31 Jan 2024, 15:30" (UTC).
pub fn fmt_unix_ts(secs: i64) -> String {
	match DateTime::from_timestamp(secs, 0) {
		Some(dt) => dt.format("%-d %b %Y, %H:%M").to_string(),
		None => secs.to_string(),
	}
}

// region:    --- Tests


// endregion: --- Tests
