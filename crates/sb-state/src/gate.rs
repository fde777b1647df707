//! `SharedState`, the handle every actor receives, and `GateGuard`, the
//! scope in which shared state may be observed or changed.

use std::sync::{Mutex, MutexGuard, PoisonError};

use sb_core::{ActionSeq, Event, EventKind, SkierId, StopId, Subject};
use tracing::warn;

use crate::{EventSink, SinkResult, SkierRecord, StateResult, Store};

struct Guarded<S> {
    store: Store,
    sink:  S,
}

/// Shared simulation state behind the single Gate.
///
/// Actors borrow a `&SharedState<S>` (it is `Sync` whenever `S: Send`) and
/// call [`acquire`][Self::acquire] for each logical unit of work.  There is no
/// other path to the store or to the sink.
pub struct SharedState<S: EventSink> {
    gate: Mutex<Guarded<S>>,
}

impl<S: EventSink> SharedState<S> {
    pub fn new(store: Store, sink: S) -> Self {
        Self { gate: Mutex::new(Guarded { store, sink }) }
    }

    /// Block until this caller is the sole holder of the Gate.
    ///
    /// Waiters are not served in FIFO order.  A Gate poisoned by a panicking
    /// actor is taken over: every guard method leaves the store consistent
    /// before it returns, so the data is still usable.
    pub fn acquire(&self) -> GateGuard<'_, S> {
        let inner = self.gate.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("gate poisoned by a panicked actor; continuing with recovered state");
            poisoned.into_inner()
        });
        GateGuard { inner }
    }

    /// Tear down the Gate and return the store and the sink.
    pub fn into_parts(self) -> (Store, S) {
        let inner = self.gate.into_inner().unwrap_or_else(PoisonError::into_inner);
        (inner.store, inner.sink)
    }
}

/// Exclusive access to the store and the sink.  Dropping it releases the Gate.
pub struct GateGuard<'a, S: EventSink> {
    inner: MutexGuard<'a, Guarded<S>>,
}

impl<S: EventSink> GateGuard<'_, S> {
    /// Read-only view of everything behind the Gate.
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    pub fn skier(&self, id: SkierId) -> StateResult<&SkierRecord> {
        self.inner.store.skier(id)
    }

    /// Stamp `kind` with the next action rank and the current occupancy,
    /// write it to the sink, and return the rank used.
    ///
    /// The counter advances only after the sink accepted the event, so a
    /// failed write leaves no gap in the sequence.
    pub fn log(&mut self, subject: Subject, kind: EventKind) -> SinkResult<ActionSeq> {
        let Guarded { store, sink } = &mut *self.inner;
        let event = Event {
            seq:            store.next_seq(),
            subject,
            kind,
            occupied_seats: store.occupied_seats(),
        };
        sink.record(&event)?;
        Ok(store.take_seq())
    }

    /// `AtBreakfast → Waiting`; returns the skier's assigned stop.
    pub fn mark_waiting(&mut self, id: SkierId) -> StateResult<StopId> {
        self.inner.store.mark_waiting(id)
    }

    /// `Waiting → OnRide`, taking one seat.  Fails with
    /// [`StateError::BusFull`][crate::StateError::BusFull] instead of
    /// overbooking.
    pub fn board(&mut self, id: SkierId) -> StateResult<()> {
        self.inner.store.board(id)
    }

    /// `OnRide → Finished`, freeing one seat.
    pub fn unload(&mut self, id: SkierId) -> StateResult<()> {
        self.inner.store.unload(id)
    }

    pub fn set_current_stop(&mut self, stop: StopId) {
        self.inner.store.set_current_stop(stop);
    }

    pub fn reset_occupancy(&mut self) {
        self.inner.store.reset_occupancy();
    }
}
