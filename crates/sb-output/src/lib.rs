//! `sb-output` — everything downstream of the Gate.
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`format`] | `format_event` (pure `Event` → text), `parse_line` (inverse)    |
//! | [`text`]   | `TextSink` — one flushed line per event, optional stdout mirror |
//! | [`csv`]    | `CsvSink` — `seq,subject,skier,verb,stop,occupied_seats` rows   |
//! | [`memory`] | `MemorySink` — keeps events in a `Vec`                          |
//! | [`tee`]    | `Tee` — fan one event stream out to two sinks                   |
//! | [`audit`]  | sequence, lifecycle, and occupancy replay checks                |
//!
//! # Usage
//!
//! ```rust,ignore
//! use sb_output::{TextSink, audit};
//!
//! let sink = TextSink::create(Path::new("proj2.out"))?.mirrored();
//! let outcome = Launcher::new(config, sink).run()?;
//!
//! let lines = audit::parse_log(&std::fs::read_to_string("proj2.out")?)?;
//! audit::check_sequence(&lines)?;
//! ```

pub mod audit;
pub mod csv;
pub mod format;
pub mod memory;
pub mod tee;
pub mod text;

#[cfg(test)]
mod tests;

pub use audit::{AuditError, AuditResult, LogLine, OccupancyTrace};
pub use csv::CsvSink;
pub use format::{format_event, parse_line};
pub use memory::MemorySink;
pub use tee::Tee;
pub use text::TextSink;
