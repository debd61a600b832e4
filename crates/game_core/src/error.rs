use game_objects::PlayerId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuickStackError {
    /// The host routine does not raise the signal the integration hangs off.
    /// Recovered by running without quick-stack support.
    #[error("no `{signal}` signal in host routine `{routine}`, quick-stacking to storage is unsupported")]
    IntegrationNotFound { routine: String, signal: String },

    #[error("unknown participant {0}")]
    UnknownParticipant(PlayerId),

    #[error("slot {slot} out of range for {player}")]
    SlotOutOfRange { player: PlayerId, slot: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
