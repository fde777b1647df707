//! Pure rendering between structured events and log lines.
//!
//! ```text
//! <seq>: <subject>: <verb>[ <detail>]
//! 1: BUS: started
//! 2: L 3: started
//! 7: L 3: arrived to 2
//! 9: BUS: arrived to 2
//! 10: L 3: boarding
//! 15: BUS: arrived to final
//! 16: L 3: going to ski
//! ```

use std::fmt;

use sb_core::{ActionSeq, Event, EventKind, SkierId, StopId, Subject};

use crate::{AuditError, AuditResult, LogLine};

/// Adapter giving `EventKind` its log-line spelling.
pub(crate) struct Verb(pub EventKind);

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            EventKind::Started         => f.write_str("started"),
            EventKind::ArrivedAt(stop) => write!(f, "arrived to {stop}"),
            EventKind::Boarding        => f.write_str("boarding"),
            EventKind::GoingToSki      => f.write_str("going to ski"),
            EventKind::ArrivedFinal    => f.write_str("arrived to final"),
            EventKind::Leaving(stop)   => write!(f, "leaving {stop}"),
            EventKind::LeavingFinal    => f.write_str("leaving final"),
            EventKind::Finish          => f.write_str("finish"),
        }
    }
}

pub(crate) struct Who(pub Subject);

impl fmt::Display for Who {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Subject::Skier(id) => write!(f, "{id}"),
            Subject::Bus       => f.write_str("BUS"),
        }
    }
}

/// Render one event without the trailing newline.
pub fn format_event(event: &Event) -> String {
    format!("{}: {}: {}", event.seq, Who(event.subject), Verb(event.kind))
}

/// Parse one rendered line (trailing newline optional) back into its parts.
///
/// Occupancy is not part of the text format and is not recovered.
pub fn parse_line(line: &str) -> AuditResult<LogLine> {
    let malformed = |reason: &'static str| AuditError::Malformed { line: line.to_owned(), reason };

    let mut parts = line.trim_end_matches(['\n', '\r']).splitn(3, ": ");
    let (Some(seq), Some(subject), Some(verb)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed("expected `<seq>: <subject>: <verb>`"));
    };

    let seq = seq.parse::<u64>().map_err(|_| malformed("sequence is not a number"))?;

    let subject = match subject {
        "BUS" => Subject::Bus,
        other => {
            let n = other
                .strip_prefix("L ")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|&n| n >= 1)
                .ok_or_else(|| malformed("subject must be `BUS` or `L <id>`"))?;
            Subject::Skier(SkierId(n))
        }
    };

    let stop = |n: &str| {
        n.parse::<u32>()
            .ok()
            .filter(|&n| n >= 1)
            .map(|n| StopId(n - 1))
            .ok_or_else(|| malformed("stop must be a positive number"))
    };

    let kind = match verb {
        "started"          => EventKind::Started,
        "boarding"         => EventKind::Boarding,
        "going to ski"     => EventKind::GoingToSki,
        "arrived to final" => EventKind::ArrivedFinal,
        "leaving final"    => EventKind::LeavingFinal,
        "finish"           => EventKind::Finish,
        other => {
            if let Some(n) = other.strip_prefix("arrived to ") {
                EventKind::ArrivedAt(stop(n)?)
            } else if let Some(n) = other.strip_prefix("leaving ") {
                EventKind::Leaving(stop(n)?)
            } else {
                return Err(malformed("unknown verb"));
            }
        }
    };

    Ok(LogLine { seq: ActionSeq(seq), subject, kind })
}
