//! Unit tests for sb-output.

#[cfg(test)]
mod helpers {
    use sb_core::{ActionSeq, Event, EventKind, SkierId, StopId, Subject};

    pub fn ev(seq: u64, subject: Subject, kind: EventKind, occupied_seats: u32) -> Event {
        Event { seq: ActionSeq(seq), subject, kind, occupied_seats }
    }

    pub fn skier(n: u32) -> Subject {
        Subject::Skier(SkierId(n))
    }

    /// A complete, well-formed one-skier, one-stop run.
    pub fn single_run() -> Vec<Event> {
        use EventKind::*;
        vec![
            ev(1, Subject::Bus, Started, 0),
            ev(2, skier(1), Started, 0),
            ev(3, skier(1), ArrivedAt(StopId(0)), 0),
            ev(4, Subject::Bus, ArrivedAt(StopId(0)), 0),
            ev(5, skier(1), Boarding, 1),
            ev(6, Subject::Bus, Leaving(StopId(0)), 1),
            ev(7, Subject::Bus, ArrivedFinal, 1),
            ev(8, skier(1), GoingToSki, 0),
            ev(9, Subject::Bus, LeavingFinal, 0),
            ev(10, Subject::Bus, Finish, 0),
        ]
    }
}

#[cfg(test)]
mod format_tests {
    use sb_core::{EventKind, StopId, Subject};

    use super::helpers::{ev, skier, single_run};
    use crate::{format_event, parse_line, LogLine};

    #[test]
    fn renders_every_verb() {
        let rendered: Vec<String> = single_run().iter().map(format_event).collect();
        assert_eq!(
            rendered,
            [
                "1: BUS: started",
                "2: L 1: started",
                "3: L 1: arrived to 1",
                "4: BUS: arrived to 1",
                "5: L 1: boarding",
                "6: BUS: leaving 1",
                "7: BUS: arrived to final",
                "8: L 1: going to ski",
                "9: BUS: leaving final",
                "10: BUS: finish",
            ]
        );
    }

    #[test]
    fn stop_numbers_are_one_based() {
        let e = ev(12, Subject::Bus, EventKind::Leaving(StopId(9)), 3);
        assert_eq!(format_event(&e), "12: BUS: leaving 10");
    }

    #[test]
    fn parse_inverts_format() {
        for e in single_run() {
            let parsed = parse_line(&format!("{}\n", format_event(&e))).unwrap();
            assert_eq!(parsed, LogLine::from(&e));
        }
        let parsed = parse_line("40: L 17: arrived to 3").unwrap();
        assert_eq!(parsed.subject, skier(17));
        assert_eq!(parsed.kind, EventKind::ArrivedAt(StopId(2)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_line("").is_err());
        assert!(parse_line("x: BUS: started").is_err());
        assert!(parse_line("1: TRAIN: started").is_err());
        assert!(parse_line("1: L 0: started").is_err());
        assert!(parse_line("1: BUS: arrived to 0").is_err());
        assert!(parse_line("1: BUS: flying").is_err());
    }
}

#[cfg(test)]
mod sink_tests {
    use std::fs;

    use sb_core::EventKind;
    use sb_state::{EventSink, SinkError};
    use tempfile::TempDir;

    use super::helpers::single_run;
    use crate::{CsvSink, MemorySink, Tee, TextSink};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn text_sink_writes_lines() {
        let mut sink = TextSink::new(Vec::new());
        for e in &single_run()[..3] {
            sink.record(e).unwrap();
        }
        sink.finish().unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text, "1: BUS: started\n2: L 1: started\n3: L 1: arrived to 1\n");
    }

    #[test]
    fn text_sink_file_is_readable_mid_run() {
        let dir = tmp();
        let path = dir.path().join("proj2.out");
        let mut sink = TextSink::create(&path).unwrap();
        sink.record(&single_run()[0]).unwrap();
        // Flushed per line: visible before finish.
        assert_eq!(fs::read_to_string(&path).unwrap(), "1: BUS: started\n");
        sink.finish().unwrap();
        sink.finish().unwrap();
    }

    #[test]
    fn finished_sink_refuses_events() {
        let mut sink = TextSink::new(Vec::new());
        sink.finish().unwrap();
        assert!(matches!(sink.record(&single_run()[0]), Err(SinkError::Finished)));
    }

    #[test]
    fn csv_sink_rows() {
        let dir = tmp();
        let path = dir.path().join("events.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        for e in single_run() {
            sink.record(&e).unwrap();
        }
        sink.finish().unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, ["seq", "subject", "skier", "verb", "stop", "occupied_seats"]);

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 10);
        assert_eq!(&rows[2][1], "skier");
        assert_eq!(&rows[2][2], "1");
        assert_eq!(&rows[2][3], "arrived to 1");
        assert_eq!(&rows[2][4], "1");
        assert_eq!(&rows[4][5], "1"); // occupancy after boarding
        assert_eq!(&rows[0][2], ""); // bus row has no skier
    }

    #[test]
    fn tee_feeds_both() {
        let mut tee = Tee::new(MemorySink::new(), TextSink::new(Vec::new()));
        for e in single_run() {
            tee.record(&e).unwrap();
        }
        tee.finish().unwrap();
        let (mem, text) = tee.into_parts();
        assert_eq!(mem.events().len(), 10);
        assert_eq!(mem.events()[9].kind, EventKind::Finish);
        let text = String::from_utf8(text.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 10);
    }
}

#[cfg(test)]
mod audit_tests {
    use sb_core::{ActionSeq, EventKind, SkierId, StopId, Subject};

    use super::helpers::{ev, skier, single_run};
    use crate::audit::{self, AuditError};
    use crate::{format_event, LogLine};

    fn lines(events: &[sb_core::Event]) -> Vec<LogLine> {
        events.iter().map(LogLine::from).collect()
    }

    #[test]
    fn well_formed_run_passes() {
        let events = single_run();
        let l = lines(&events);
        audit::check_sequence(&l).unwrap();
        audit::check_lifecycles(&l, 1).unwrap();
        audit::check_all_finished(&l, 1).unwrap();
        let trace = audit::check_recorded_occupancy(&events, 10).unwrap();
        assert_eq!(trace.total_boarded, 1);
        assert_eq!(trace.total_unloaded, 1);
        assert_eq!(trace.boarded_per_round, [1]);
        assert_eq!(trace.peak, 1);
    }

    #[test]
    fn text_log_round_trip() {
        let text: String = single_run().iter().map(|e| format_event(e) + "\n").collect();
        let parsed = audit::parse_log(&text).unwrap();
        assert_eq!(parsed, lines(&single_run()));
    }

    #[test]
    fn gap_detected() {
        let mut events = single_run();
        events.remove(4);
        assert_eq!(
            audit::check_sequence(&lines(&events)).unwrap_err(),
            AuditError::SequenceGap { expected: ActionSeq(5), got: ActionSeq(6) }
        );
    }

    #[test]
    fn sequence_must_start_at_one() {
        let events = &single_run()[1..];
        assert!(audit::check_sequence(&lines(events)).is_err());
    }

    #[test]
    fn skipped_waiting_detected() {
        let mut events = single_run();
        events.remove(2); // drop the skier's arrival
        assert!(matches!(
            audit::check_lifecycles(&lines(&events), 1),
            Err(AuditError::OutOfOrder { kind: EventKind::Boarding, .. })
        ));
    }

    #[test]
    fn repeated_boarding_detected() {
        let mut events = single_run();
        events.insert(5, ev(0, skier(1), EventKind::Boarding, 2));
        assert!(audit::check_lifecycles(&lines(&events), 1).is_err());
    }

    #[test]
    fn truncated_lifecycle_is_allowed_but_unfinished() {
        let events = &single_run()[..4];
        audit::check_lifecycles(&lines(events), 1).unwrap();
        assert_eq!(
            audit::check_all_finished(&lines(events), 1).unwrap_err(),
            AuditError::Unfinished {
                skier: SkierId(1),
                last:  Some(EventKind::ArrivedAt(StopId(0))),
            }
        );
    }

    #[test]
    fn bus_must_start_first_and_finish_last() {
        let mut events = single_run();
        events.push(ev(11, Subject::Bus, EventKind::ArrivedFinal, 0));
        assert!(audit::check_lifecycles(&lines(&events), 1).is_err());
    }

    #[test]
    fn over_capacity_detected() {
        use EventKind::*;
        let mut events = vec![ev(1, Subject::Bus, ArrivedAt(StopId(0)), 0)];
        let mut seq = 2;
        for n in 1..=11 {
            events.push(ev(seq, skier(n), ArrivedAt(StopId(0)), 0));
            seq += 1;
        }
        for n in 1..=11 {
            events.push(ev(seq, skier(n), Boarding, n));
            seq += 1;
        }
        assert!(matches!(
            audit::replay_occupancy(&lines(&events), 10),
            Err(AuditError::CapacityExceeded { occupied: 11, capacity: 10, .. })
        ));
    }

    #[test]
    fn boarding_at_wrong_stop_detected() {
        use EventKind::*;
        let events = vec![
            ev(1, skier(1), ArrivedAt(StopId(1)), 0),
            ev(2, Subject::Bus, ArrivedAt(StopId(0)), 0),
            ev(3, skier(1), Boarding, 1),
        ];
        assert!(matches!(
            audit::replay_occupancy(&lines(&events), 10),
            Err(AuditError::WrongStop { .. })
        ));
    }

    #[test]
    fn recorded_occupancy_mismatch_detected() {
        let mut events = single_run();
        events[5].occupied_seats = 0; // bus leaving with one aboard
        assert_eq!(
            audit::check_recorded_occupancy(&events, 10).unwrap_err(),
            AuditError::OccupancyMismatch { seq: ActionSeq(6), recorded: 0, replayed: 1 }
        );
    }
}
