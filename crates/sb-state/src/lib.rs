//! `sb-state` — the Shared State Store and the Gate that guards it.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`skier`]  | `SkierState` lifecycle, `SkierRecord`                        |
//! | [`store`]  | `Store` — skier records, bus occupancy, action counter       |
//! | [`gate`]   | `SharedState` handle and `GateGuard` scope                   |
//! | [`sink`]   | `EventSink` trait, `NoopSink`                                |
//! | [`error`]  | `StateError`, `SinkError`                                    |
//!
//! # Design notes
//!
//! The store is reachable only through [`SharedState::acquire`], which locks
//! the single Gate and returns a [`GateGuard`].  Every read, every state
//! transition, and every log write happens through the guard, so an actor
//! cannot touch shared data or the sink without holding the Gate.  Dropping
//! the guard releases the Gate.
//!
//! Because the action counter is bumped and the event written in the same
//! guard scope, the Event Log is totally ordered by `ActionSeq` and that order
//! matches Gate-acquisition order.

pub mod error;
pub mod gate;
pub mod sink;
pub mod skier;
pub mod store;

#[cfg(test)]
mod tests;

pub use error::{SinkError, SinkResult, StateError, StateResult};
pub use gate::{GateGuard, SharedState};
pub use sink::{EventSink, NoopSink};
pub use skier::{SkierRecord, SkierState};
pub use store::Store;
