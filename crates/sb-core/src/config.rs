//! Simulation configuration and its bounds.
//!
//! # Design
//!
//! Callers (the CLI, tests) fill a [`RawConfig`] with signed integers exactly
//! as supplied and hand it to [`SimConfig::new`], which is the only way to
//! obtain a `SimConfig`.  A value of that type is therefore always in range
//! and actors never re-check it.
//!
//! All delays are in microseconds.

use std::ops::RangeInclusive;
use std::time::Duration;

use crate::{ConfigError, ConfigResult, StopId};

// ── Bounds ────────────────────────────────────────────────────────────────────

pub const SKIERS:        RangeInclusive<i64> = 1..=20_000;
pub const STOPS:         RangeInclusive<i64> = 1..=10;
pub const CAPACITY:      RangeInclusive<i64> = 10..=100;
pub const SKIER_WAIT_US: RangeInclusive<i64> = 0..=10_000;
pub const BUS_TRAVEL_US: RangeInclusive<i64> = 0..=1_000;

// ── RawConfig ─────────────────────────────────────────────────────────────────

/// Unvalidated parameters as they arrive from the command line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawConfig {
    pub num_skiers:        i64,
    pub num_stops:         i64,
    pub bus_capacity:      i64,
    pub max_skier_wait_us: i64,
    pub max_bus_travel_us: i64,
    pub seed:              u64,
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Validated, immutable simulation parameters.
///
/// Shared by reference with every actor; needs no synchronisation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    pub num_skiers:        u32,
    pub num_stops:         u32,
    pub bus_capacity:      u32,
    /// Upper bound of a skier's breakfast delay.
    pub max_skier_wait_us: u64,
    /// Upper bound of one bus hop between stops.
    pub max_bus_travel_us: u64,
    /// Master RNG seed.  The same seed always yields the same stop
    /// assignment and the same per-actor delay sequences.
    pub seed:              u64,
}

impl SimConfig {
    /// Validate `raw` against the parameter bounds.
    ///
    /// Parameters are checked in command-line order and the first violation
    /// is reported.
    pub fn new(raw: RawConfig) -> ConfigResult<SimConfig> {
        Ok(SimConfig {
            num_skiers:        check("number of skiers", raw.num_skiers, SKIERS)? as u32,
            num_stops:         check("number of stops", raw.num_stops, STOPS)? as u32,
            bus_capacity:      check("bus capacity", raw.bus_capacity, CAPACITY)? as u32,
            max_skier_wait_us: check("max skier wait time", raw.max_skier_wait_us, SKIER_WAIT_US)? as u64,
            max_bus_travel_us: check("max bus travel time", raw.max_bus_travel_us, BUS_TRAVEL_US)? as u64,
            seed:              raw.seed,
        })
    }

    /// Upper bound for one skier's breakfast delay.
    #[inline]
    pub fn max_skier_wait(&self) -> Duration {
        Duration::from_micros(self.max_skier_wait_us)
    }

    /// Upper bound for one bus hop.
    #[inline]
    pub fn max_bus_travel(&self) -> Duration {
        Duration::from_micros(self.max_bus_travel_us)
    }

    /// Iterate stops in the order the bus visits them during one round.
    pub fn stops(&self) -> impl Iterator<Item = StopId> {
        (0..self.num_stops).map(StopId)
    }
}

fn check(name: &'static str, got: i64, range: RangeInclusive<i64>) -> ConfigResult<i64> {
    if range.contains(&got) {
        Ok(got)
    } else {
        Err(ConfigError::OutOfRange {
            name,
            min: *range.start(),
            max: *range.end(),
            got,
        })
    }
}
