//! Event-log audits.
//!
//! These checks work on [`LogLine`]s, which can come from a live
//! [`MemorySink`][crate::MemorySink] or from a text log parsed with
//! [`parse_log`].  They re-derive what the simulation must have guaranteed:
//!
//! - `ActionSeq` values run 1, 2, 3, … with no gap or duplicate.
//! - Each skier goes `started → arrived → boarding → going to ski`, in that
//!   order, each at most once; the bus starts first and finishes last.
//! - Replaying boardings and unloads never exceeds the bus capacity, every
//!   boarding happens at the stop the bus is standing at and the skier is
//!   waiting at, and (for live events) the replayed occupancy equals what the
//!   Gate recorded.

use std::collections::HashMap;

use sb_core::{ActionSeq, Event, EventKind, SkierId, StopId, Subject};
use thiserror::Error;

use crate::parse_line;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuditError {
    #[error("malformed log line {line:?}: {reason}")]
    Malformed { line: String, reason: &'static str },

    #[error("expected action {expected}, found {got}")]
    SequenceGap { expected: ActionSeq, got: ActionSeq },

    #[error("action {seq}: {subject:?} logged {kind:?} out of lifecycle order")]
    OutOfOrder { seq: ActionSeq, subject: Subject, kind: EventKind },

    #[error("skier {0} is outside 1..=num_skiers")]
    UnknownSkier(SkierId),

    #[error("action {seq}: {occupied} seats taken exceeds capacity {capacity}")]
    CapacityExceeded { seq: ActionSeq, occupied: u32, capacity: u32 },

    #[error("action {seq}: skier {skier} boarded away from its stop")]
    WrongStop { seq: ActionSeq, skier: SkierId },

    #[error("action {seq}: recorded occupancy {recorded}, replay gives {replayed}")]
    OccupancyMismatch { seq: ActionSeq, recorded: u32, replayed: u32 },

    #[error("skier {skier} stopped at {last:?}, expected to finish")]
    Unfinished { skier: SkierId, last: Option<EventKind> },
}

pub type AuditResult<T> = Result<T, AuditError>;

/// The parts of an event that survive rendering to text.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct LogLine {
    pub seq:     ActionSeq,
    pub subject: Subject,
    pub kind:    EventKind,
}

impl From<&Event> for LogLine {
    fn from(e: &Event) -> Self {
        LogLine { seq: e.seq, subject: e.subject, kind: e.kind }
    }
}

/// Parse every non-empty line of a text log.
pub fn parse_log(text: &str) -> AuditResult<Vec<LogLine>> {
    text.lines().filter(|l| !l.is_empty()).map(parse_line).collect()
}

/// `ActionSeq` must be exactly 1, 2, 3, … in log order.
pub fn check_sequence(lines: &[LogLine]) -> AuditResult<()> {
    let mut expected = ActionSeq::FIRST;
    for line in lines {
        if line.seq != expected {
            return Err(AuditError::SequenceGap { expected, got: line.seq });
        }
        expected = expected.next();
    }
    Ok(())
}

/// Position of a skier event in the lifecycle, or `None` for bus-only kinds.
fn skier_step(kind: EventKind) -> Option<u8> {
    match kind {
        EventKind::Started      => Some(0),
        EventKind::ArrivedAt(_) => Some(1),
        EventKind::Boarding     => Some(2),
        EventKind::GoingToSki   => Some(3),
        _ => None,
    }
}

/// Every skier's events must follow the lifecycle in order with no repeats
/// (a truncated lifecycle is fine).  The bus must log `started` before any
/// other bus event and nothing after `finish`.
pub fn check_lifecycles(lines: &[LogLine], num_skiers: u32) -> AuditResult<()> {
    let mut last_step: Vec<Option<u8>> = vec![None; num_skiers as usize];
    let mut bus_started = false;
    let mut bus_finished = false;

    for line in lines {
        let out_of_order = || AuditError::OutOfOrder {
            seq:     line.seq,
            subject: line.subject,
            kind:    line.kind,
        };
        match line.subject {
            Subject::Skier(id) => {
                if id.0 == 0 || id.0 > num_skiers {
                    return Err(AuditError::UnknownSkier(id));
                }
                let step = skier_step(line.kind).ok_or_else(out_of_order)?;
                let slot = &mut last_step[id.index()];
                let expected = slot.map_or(0, |s| s + 1);
                if step != expected {
                    return Err(out_of_order());
                }
                *slot = Some(step);
            }
            Subject::Bus => {
                let is_start = line.kind == EventKind::Started;
                if bus_finished || is_start == bus_started || line.kind == EventKind::Boarding
                    || line.kind == EventKind::GoingToSki
                {
                    return Err(out_of_order());
                }
                bus_started = true;
                bus_finished = line.kind == EventKind::Finish;
            }
        }
    }
    Ok(())
}

/// Every skier reached `going to ski`.
pub fn check_all_finished(lines: &[LogLine], num_skiers: u32) -> AuditResult<()> {
    let mut last: Vec<Option<EventKind>> = vec![None; num_skiers as usize];
    for line in lines {
        if let Subject::Skier(id) = line.subject {
            if id.0 == 0 || id.0 > num_skiers {
                return Err(AuditError::UnknownSkier(id));
            }
            last[id.index()] = Some(line.kind);
        }
    }
    for (i, kind) in last.into_iter().enumerate() {
        if kind != Some(EventKind::GoingToSki) {
            return Err(AuditError::Unfinished { skier: SkierId::from_index(i), last: kind });
        }
    }
    Ok(())
}

/// Occupancy reconstructed from a log.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyTrace {
    /// Seats taken right after each line, parallel to the input.
    pub after_each:        Vec<u32>,
    /// Skiers boarded during each round (a round ends at `arrived to final`).
    pub boarded_per_round: Vec<u32>,
    pub peak:              u32,
    pub total_boarded:     u32,
    pub total_unloaded:    u32,
}

/// Replay boardings (+1) and unloads (−1) to rebuild bus occupancy.
///
/// Fails if occupancy ever exceeds `capacity` or a skier boards anywhere but
/// the stop it arrived at while the bus is standing there.
pub fn replay_occupancy(lines: &[LogLine], capacity: u32) -> AuditResult<OccupancyTrace> {
    let mut trace = OccupancyTrace::default();
    let mut occupied: u32 = 0;
    let mut round_boarded: u32 = 0;
    let mut bus_at: Option<StopId> = None;
    let mut waiting_at: HashMap<SkierId, StopId> = HashMap::new();

    for line in lines {
        match (line.subject, line.kind) {
            (Subject::Skier(id), EventKind::ArrivedAt(stop)) => {
                waiting_at.insert(id, stop);
            }
            (Subject::Skier(id), EventKind::Boarding) => {
                let stop = waiting_at.remove(&id);
                if bus_at.is_none() || stop != bus_at {
                    return Err(AuditError::WrongStop { seq: line.seq, skier: id });
                }
                occupied += 1;
                round_boarded += 1;
                trace.total_boarded += 1;
                if occupied > capacity {
                    return Err(AuditError::CapacityExceeded { seq: line.seq, occupied, capacity });
                }
                trace.peak = trace.peak.max(occupied);
            }
            (Subject::Skier(_), EventKind::GoingToSki) => {
                occupied = occupied.saturating_sub(1);
                trace.total_unloaded += 1;
            }
            (Subject::Bus, EventKind::ArrivedAt(stop)) => bus_at = Some(stop),
            (Subject::Bus, EventKind::Leaving(_)) => bus_at = None,
            (Subject::Bus, EventKind::ArrivedFinal) => {
                trace.boarded_per_round.push(round_boarded);
                round_boarded = 0;
            }
            _ => {}
        }
        trace.after_each.push(occupied);
    }
    Ok(trace)
}

/// Replay live events and require the replayed occupancy to match the
/// occupancy the Gate stamped on every event.
pub fn check_recorded_occupancy(events: &[Event], capacity: u32) -> AuditResult<OccupancyTrace> {
    let lines: Vec<LogLine> = events.iter().map(LogLine::from).collect();
    let trace = replay_occupancy(&lines, capacity)?;
    for (event, &replayed) in events.iter().zip(&trace.after_each) {
        if event.occupied_seats != replayed {
            return Err(AuditError::OccupancyMismatch {
                seq:      event.seq,
                recorded: event.occupied_seats,
                replayed,
            });
        }
    }
    Ok(trace)
}
