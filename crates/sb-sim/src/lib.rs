//! `sb-sim` — the concurrency core of the skibus simulation.
//!
//! # Actors
//!
//! ```text
//! skier L n:  log started → sleep [0, max_skier_wait] → Waiting + log arrived → exit
//!
//! bus:        log started
//!             loop:
//!               ① sleep [0, max_bus_travel]; log arrived to S
//!               ② board every Waiting skier assigned to S, lowest id first,
//!                  while a seat is free (one Gate scope)
//!               ③ log leaving S; S ← (S + 1) mod num_stops
//!               ④ if S wrapped to 0: sleep; log arrived to final;
//!                  unload everyone, check all Finished (one Gate scope);
//!                  log leaving final
//!             until every skier is Finished; log finish
//! ```
//!
//! Each actor runs on its own OS thread (see [`Launcher`]).  All shared data
//! is reached through a borrowed [`sb_state::SharedState`]; the only blocking
//! points are Gate acquisition and the modelled delays.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sb_core::{RawConfig, SimConfig};
//! use sb_sim::Launcher;
//! use sb_state::NoopSink;
//!
//! let config = SimConfig::new(raw)?;
//! let outcome = Launcher::new(config, NoopSink).run()?;
//! assert!(outcome.skiers.iter().all(|s| s.state.is_terminal()));
//! ```

pub mod abort;
pub mod bus;
pub mod error;
pub mod launcher;
pub mod skier;


pub use abort::AbortFlag;
pub use bus::run_bus;
pub use error::{SimError, SimResult};
pub use launcher::{Launcher, SimOutcome};
pub use skier::run_skier;
