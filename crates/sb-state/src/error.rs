use sb_core::SkierId;
use thiserror::Error;

use crate::SkierState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("skier {0} does not exist")]
    UnknownSkier(SkierId),

    #[error("skier {skier} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        skier: SkierId,
        from:  SkierState,
        to:    SkierState,
    },

    #[error("bus is full ({capacity} seats), cannot board skier {skier}")]
    BusFull {
        skier:    SkierId,
        capacity: u32,
    },

    #[error("no seat is occupied, cannot unload skier {skier}")]
    EmptyBus { skier: SkierId },
}

pub type StateResult<T> = Result<T, StateError>;

/// Errors raised by an [`EventSink`][crate::EventSink] backend.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("event sink already finished")]
    Finished,
}

pub type SinkResult<T> = Result<T, SinkError>;
