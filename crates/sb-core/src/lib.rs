//! `sb-core` — foundational types for the skibus simulation.
//!
//! Every other `sb-*` crate depends on this one.  It has no `sb-*`
//! dependencies and only two external ones (`rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`ids`]      | `SkierId`, `StopId`                                       |
//! | [`config`]   | `RawConfig`, `SimConfig`, parameter bounds                |
//! | [`rng`]      | `ActorRng` (per-actor), `SimRng` (launcher)               |
//! | [`event`]    | `Event`, `Subject`, `EventKind`, `ActionSeq`              |
//! | [`error`]    | `ConfigError`, `ConfigResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to config and event types.  |

pub mod config;
pub mod error;
pub mod event;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RawConfig, SimConfig};
pub use error::{ConfigError, ConfigResult};
pub use event::{ActionSeq, Event, EventKind, Subject};
pub use ids::{SkierId, StopId};
pub use rng::{ActorRng, SimRng};
