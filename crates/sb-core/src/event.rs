//! Structured event records.
//!
//! Actors never build log text.  They describe what happened with an
//! [`EventKind`]; the Gate stamps it with the next [`ActionSeq`] and the
//! occupancy it observed, and hands the finished [`Event`] to a sink.
//! Rendering to text lives in `sb-output`.

use std::fmt;

use crate::{SkierId, StopId};

/// Global rank of a logged event.  The first event of a run is `ActionSeq(1)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSeq(pub u64);

impl ActionSeq {
    pub const FIRST: ActionSeq = ActionSeq(1);

    #[inline]
    pub fn next(self) -> ActionSeq {
        ActionSeq(self.0 + 1)
    }
}

impl fmt::Display for ActionSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Who an event is about.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subject {
    Skier(SkierId),
    Bus,
}

/// What happened.
///
/// Skier events: `Started`, `ArrivedAt`, `Boarding`, `GoingToSki`.
/// Bus events: `Started`, `ArrivedAt`, `Leaving`, `ArrivedFinal`,
/// `LeavingFinal`, `Finish`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventKind {
    Started,
    ArrivedAt(StopId),
    Boarding,
    GoingToSki,
    ArrivedFinal,
    Leaving(StopId),
    LeavingFinal,
    Finish,
}

/// One entry of the Event Log.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    pub seq:            ActionSeq,
    pub subject:        Subject,
    pub kind:           EventKind,
    /// Seats taken on the bus right after this event took effect.
    pub occupied_seats: u32,
}
