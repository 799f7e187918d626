// region:    --- Modules

pub mod ais;
mod error;
pub mod event;
mod relay;
mod utils;

pub use self::error::{Error, Result};

pub use crate::relay::*;
pub use crate::utils::time::fmt_unix_ts;

// endregion: --- Modules
