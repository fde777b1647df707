//! `Store` — the single writable owner of skier records and bus state.
//!
//! Reads are public so that anyone holding a [`GateGuard`][crate::GateGuard]
//! (or owning the store after teardown) can inspect it.  Mutations are
//! crate-private and reached only through the guard.

use sb_core::{ActionSeq, SkierId, StopId};

use crate::{SkierRecord, SkierState, StateError, StateResult};

pub struct Store {
    skiers:         Vec<SkierRecord>,
    current_stop:   StopId,
    occupied_seats: u32,
    bus_capacity:   u32,
    next_seq:       ActionSeq,
    finished:       usize,
}

impl Store {
    /// Create one `AtBreakfast` record per entry of `assigned_stops`
    /// (entry `i` belongs to `SkierId::from_index(i)`).
    pub fn new(assigned_stops: &[StopId], bus_capacity: u32) -> Self {
        let skiers = assigned_stops
            .iter()
            .enumerate()
            .map(|(i, &stop)| SkierRecord::new(SkierId::from_index(i), stop))
            .collect();
        Self {
            skiers,
            current_stop:   StopId::FINAL,
            occupied_seats: 0,
            bus_capacity,
            next_seq:       ActionSeq::FIRST,
            finished:       0,
        }
    }

    // ── Reads ─────────────────────────────────────────────────────────────

    pub fn skier(&self, id: SkierId) -> StateResult<&SkierRecord> {
        Ok(&self.skiers[self.slot(id)?])
    }

    /// All records in ascending id order.
    pub fn skiers(&self) -> &[SkierRecord] {
        &self.skiers
    }

    pub fn skier_count(&self) -> usize {
        self.skiers.len()
    }

    pub fn current_stop(&self) -> StopId {
        self.current_stop
    }

    pub fn occupied_seats(&self) -> u32 {
        self.occupied_seats
    }

    pub fn bus_capacity(&self) -> u32 {
        self.bus_capacity
    }

    #[inline]
    pub fn has_free_seat(&self) -> bool {
        self.occupied_seats < self.bus_capacity
    }

    /// The rank the next logged event will receive.
    pub fn next_seq(&self) -> ActionSeq {
        self.next_seq
    }

    /// Number of events logged so far.
    pub fn actions_logged(&self) -> u64 {
        self.next_seq.0 - ActionSeq::FIRST.0
    }

    pub fn all_finished(&self) -> bool {
        self.finished == self.skiers.len()
    }

    /// Consume the store after teardown, keeping the final skier records.
    pub fn into_skiers(self) -> Vec<SkierRecord> {
        self.skiers
    }

    pub fn count_in(&self, state: SkierState) -> usize {
        self.skiers.iter().filter(|s| s.state == state).count()
    }

    fn slot(&self, id: SkierId) -> StateResult<usize> {
        match id.0 as usize {
            n if n >= 1 && n <= self.skiers.len() => Ok(n - 1),
            _ => Err(StateError::UnknownSkier(id)),
        }
    }

    // ── Mutations (via GateGuard) ─────────────────────────────────────────

    /// Move `id` exactly one step forward to `to`.
    fn advance(&mut self, id: SkierId, to: SkierState) -> StateResult<()> {
        let slot = self.slot(id)?;
        let record = &mut self.skiers[slot];
        if record.state.successor() != Some(to) {
            return Err(StateError::InvalidTransition { skier: id, from: record.state, to });
        }
        record.state = to;
        Ok(())
    }

    /// `AtBreakfast → Waiting`.  Returns the skier's assigned stop.
    pub(crate) fn mark_waiting(&mut self, id: SkierId) -> StateResult<StopId> {
        self.advance(id, SkierState::Waiting)?;
        Ok(self.skiers[self.slot(id)?].assigned_stop)
    }

    /// `Waiting → OnRide` and take a seat.  Refuses when the bus is full.
    pub(crate) fn board(&mut self, id: SkierId) -> StateResult<()> {
        if !self.has_free_seat() {
            return Err(StateError::BusFull { skier: id, capacity: self.bus_capacity });
        }
        self.advance(id, SkierState::OnRide)?;
        self.occupied_seats += 1;
        Ok(())
    }

    /// `OnRide → Finished` and free the seat.  Refuses when no seat is taken.
    pub(crate) fn unload(&mut self, id: SkierId) -> StateResult<()> {
        let Some(occupied) = self.occupied_seats.checked_sub(1) else {
            return Err(StateError::EmptyBus { skier: id });
        };
        self.advance(id, SkierState::Finished)?;
        self.occupied_seats = occupied;
        self.finished += 1;
        Ok(())
    }

    pub(crate) fn set_current_stop(&mut self, stop: StopId) {
        self.current_stop = stop;
    }

    pub(crate) fn reset_occupancy(&mut self) {
        self.occupied_seats = 0;
    }

    /// Hand out the current action rank and advance the counter.
    pub(crate) fn take_seq(&mut self) -> ActionSeq {
        let seq = self.next_seq;
        self.next_seq = seq.next();
        seq
    }
}
