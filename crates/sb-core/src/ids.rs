//! Strongly typed identifier wrappers.
//!
//! `SkierId` is 1-based (the first skier is `L 1` in the event log) while
//! `StopId` is a 0-based index into the stop sequence.  `SkierId::index()`
//! maps an id to its `Vec` slot so callers never do the off-by-one arithmetic
//! themselves.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl From<$name> for $inner {
            #[inline(always)]
            fn from(id: $name) -> $inner {
                id.0
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a skier, `1..=num_skiers`.
    pub struct SkierId(u32);
}

typed_id! {
    /// Position of a stop in the round-robin order, `0..num_stops`.
    /// Stop 0 doubles as the final stop.
    pub struct StopId(u32);
}

impl SkierId {
    /// Skier ids start at 1; slot `i` in the store holds `SkierId(i + 1)`.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize - 1
    }

    /// Inverse of [`index`][Self::index].
    #[inline(always)]
    pub fn from_index(i: usize) -> SkierId {
        SkierId(i as u32 + 1)
    }
}

impl StopId {
    /// The distinguished stop where the bus unloads.
    pub const FINAL: StopId = StopId(0);

    /// The stop after `self` in a loop of `num_stops` stops.
    #[inline]
    pub fn next(self, num_stops: u32) -> StopId {
        StopId((self.0 + 1) % num_stops)
    }

    /// Human-facing stop number (1-based), as printed in the event log.
    #[inline]
    pub fn number(self) -> u32 {
        self.0 + 1
    }
}

impl fmt::Display for SkierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L {}", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
