//! Cooperative cancellation shared by the launcher, the actors, and any
//! external interrupt handler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{SimError, SimResult};

/// A cloneable, one-way "stop now" flag.
///
/// Actors poll it at their suspension points (before and after each modelled
/// delay).  Raising it never interrupts a Gate scope that is already running,
/// so aborting is not transactional but never leaves the store half-updated.
#[derive(Clone, Debug, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `Err(SimError::Aborted)` once the flag is raised.
    #[inline]
    pub fn check(&self) -> SimResult<()> {
        if self.is_raised() { Err(SimError::Aborted) } else { Ok(()) }
    }
}

/// Raises the flag if the owning thread unwinds, so a panicking actor stops
/// the rest of the simulation instead of leaving the bus looping forever.
pub(crate) struct RaiseOnPanic<'a>(pub(crate) &'a AbortFlag);

impl Drop for RaiseOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.raise();
        }
    }
}
