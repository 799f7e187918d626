pub use crate::ais::AisEvent;
pub use crate::relay::RelayEvent;

use crate::Result;
use derive_more::From;
use std::sync::Arc;
use tokio::sync::broadcast::{self, Receiver, Sender};

#[derive(Debug, Clone, From)]
pub enum Event {
	Ais(AisEvent),
	Relay(RelayEvent),
}

/// EventBus lets the library components publish their progress
/// so that front ends (console, bot) can subscribe and render it.
///
/// Notes:
/// - Clone-efficient, so it's okay to be cloned and owned.
/// - Backed by a Tokio broadcast channel, which stays hidden behind the API.
/// - `_rx` is kept in an Arc so the channel never closes while the bus is alive,
///   which means `send` does not fail when no front end is subscribed.
#[derive(Debug, Clone)]
pub struct EventBus {
	tx: Sender<Event>,
	_rx: Arc<Receiver<Event>>,
}

impl EventBus {
	#[allow(clippy::new_without_default)]
	pub fn new() -> EventBus {
		let (tx, rx) = broadcast::channel::<Event>(64);
		EventBus {
			tx,
			_rx: Arc::new(rx),
		}
	}

	pub(crate) fn send(&self, evt: impl Into<Event>) -> Result<()> {
		let evt = evt.into();
		self.tx.send(evt)?;
		Ok(())
	}

	pub fn subscribe(&self) -> Result<Receiver<Event>> {
		Ok(self.tx.subscribe())
	}
}

// region:    --- Tests


// endregion: --- Tests
