//! Deterministic per-actor and launcher-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each actor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (actor_index * MIXING_CONSTANT)
//!
//! The bus is actor 0 and skier `L n` is actor `n`, so every actor's delay
//! sequence depends only on the run seed and its own identity, never on how
//! the OS schedules the threads.  RNG state is local to the owning thread;
//! no synchronisation is needed and the Gate is never held while drawing.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{SkierId, StopId};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seed-mixing offset for the stop-assignment stream, kept clear of any
/// actor index.
const ASSIGNMENT_STREAM: u64 = u64::MAX;

// ── ActorRng ──────────────────────────────────────────────────────────────────

/// Per-actor deterministic RNG used for modelled delays.
pub struct ActorRng(SmallRng);

impl ActorRng {
    /// RNG for the bus actor.
    pub fn for_bus(global_seed: u64) -> Self {
        Self::mixed(global_seed, 0)
    }

    /// RNG for one skier actor.
    pub fn for_skier(global_seed: u64, skier: SkierId) -> Self {
        Self::mixed(global_seed, skier.0 as u64)
    }

    fn mixed(global_seed: u64, actor: u64) -> Self {
        let seed = global_seed ^ actor.wrapping_mul(MIXING_CONSTANT);
        ActorRng(SmallRng::seed_from_u64(seed))
    }

    /// A delay drawn uniformly from `[0, max]` at microsecond resolution.
    #[inline]
    pub fn delay_up_to(&mut self, max: Duration) -> Duration {
        let max_us = max.as_micros() as u64;
        if max_us == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.0.gen_range(0..=max_us))
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Launcher-level RNG for decisions made once before any actor starts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed ^ ASSIGNMENT_STREAM.wrapping_mul(MIXING_CONSTANT)))
    }

    /// A stop chosen uniformly from `[0, num_stops - 1]`.
    #[inline]
    pub fn pick_stop(&mut self, num_stops: u32) -> StopId {
        StopId(self.0.gen_range(0..num_stops))
    }

    /// Assign a stop to each of `num_skiers` skiers, indexed by
    /// `SkierId::index()`.
    pub fn assign_stops(&mut self, num_skiers: u32, num_stops: u32) -> Vec<StopId> {
        (0..num_skiers).map(|_| self.pick_stop(num_stops)).collect()
    }
}
