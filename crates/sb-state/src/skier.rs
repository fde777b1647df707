//! Skier lifecycle.

use sb_core::{SkierId, StopId};

/// Lifecycle of one skier.  Transitions only ever move one step forward:
///
/// ```text
/// AtBreakfast ──(own actor)──▶ Waiting ──(bus)──▶ OnRide ──(bus, final stop)──▶ Finished
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum SkierState {
    #[default]
    AtBreakfast,
    Waiting,
    OnRide,
    Finished,
}

impl SkierState {
    /// The only state this one may advance to, or `None` if terminal.
    pub fn successor(self) -> Option<SkierState> {
        match self {
            SkierState::AtBreakfast => Some(SkierState::Waiting),
            SkierState::Waiting     => Some(SkierState::OnRide),
            SkierState::OnRide      => Some(SkierState::Finished),
            SkierState::Finished    => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == SkierState::Finished
    }
}

/// One skier as held in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkierRecord {
    pub id:            SkierId,
    /// Fixed at creation.
    pub assigned_stop: StopId,
    pub state:         SkierState,
}

impl SkierRecord {
    pub fn new(id: SkierId, assigned_stop: StopId) -> Self {
        Self { id, assigned_stop, state: SkierState::AtBreakfast }
    }

    /// Whether the bus standing at `stop` may pick this skier up.
    #[inline]
    pub fn is_waiting_at(&self, stop: StopId) -> bool {
        self.state == SkierState::Waiting && self.assigned_stop == stop
    }
}
