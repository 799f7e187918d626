//! Relay Event

#[derive(Debug, Clone)]
pub enum RelayEvent {
	InstUploaded,
	ConvCreated { key: String },
	ConvLoaded { key: String },
	/// The stored thread is gone remotely, a new one replaced it.
	ConvReplaced { key: String },
}
