use sb_core::ConfigError;
use sb_state::{SinkError, StateError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to initialise simulation resources: {0}")]
    ResourceInit(String),

    #[error("event log error: {0}")]
    Sink(#[from] SinkError),

    #[error("shared state error: {0}")]
    State(#[from] StateError),

    #[error("stop assignment length {got} does not match skier count {expected}")]
    SkierCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error("simulation aborted")]
    Aborted,

    #[error("{0} actor panicked")]
    ActorPanicked(&'static str),
}

impl SimError {
    /// `Aborted` is the echo of some other failure (or of an interrupt), so it
    /// loses to any concrete error when several actors fail.
    pub(crate) fn is_echo(&self) -> bool {
        matches!(self, SimError::Aborted)
    }
}

pub type SimResult<T> = Result<T, SimError>;
