//! Unit tests for the store, the skier lifecycle, and the Gate.

#[cfg(test)]
mod helpers {
    use sb_core::{Event, StopId};

    use crate::{EventSink, SharedState, SinkError, SinkResult, Store};

    /// Collects events; optionally fails every write.
    #[derive(Default)]
    pub struct VecSink {
        pub events: Vec<Event>,
        pub broken: bool,
    }

    impl EventSink for VecSink {
        fn record(&mut self, event: &Event) -> SinkResult<()> {
            if self.broken {
                return Err(SinkError::Io(std::io::Error::other("disk full")));
            }
            self.events.push(*event);
            Ok(())
        }
    }

    pub fn shared(stops: &[u32], capacity: u32) -> SharedState<VecSink> {
        let stops: Vec<StopId> = stops.iter().copied().map(StopId).collect();
        SharedState::new(Store::new(&stops, capacity), VecSink::default())
    }
}

#[cfg(test)]
mod lifecycle {
    use crate::SkierState;

    #[test]
    fn successors_are_strictly_forward() {
        assert_eq!(SkierState::AtBreakfast.successor(), Some(SkierState::Waiting));
        assert_eq!(SkierState::Waiting.successor(), Some(SkierState::OnRide));
        assert_eq!(SkierState::OnRide.successor(), Some(SkierState::Finished));
        assert_eq!(SkierState::Finished.successor(), None);
        assert!(SkierState::Finished.is_terminal());
    }

    #[test]
    fn order_matches_lifecycle() {
        assert!(SkierState::AtBreakfast < SkierState::Waiting);
        assert!(SkierState::OnRide < SkierState::Finished);
    }
}

#[cfg(test)]
mod store {
    use sb_core::{SkierId, StopId};

    use super::helpers::shared;
    use crate::{SkierState, StateError};

    #[test]
    fn records_created_at_breakfast() {
        let state = shared(&[0, 2, 1], 10);
        let gate = state.acquire();
        let store = gate.store();
        assert_eq!(store.skier_count(), 3);
        assert_eq!(store.skier(SkierId(2)).unwrap().assigned_stop, StopId(2));
        assert_eq!(store.count_in(SkierState::AtBreakfast), 3);
        assert_eq!(store.occupied_seats(), 0);
        assert_eq!(store.next_seq().0, 1);
    }

    #[test]
    fn unknown_skier_rejected() {
        let state = shared(&[0], 10);
        let mut gate = state.acquire();
        assert_eq!(gate.skier(SkierId(0)).unwrap_err(), StateError::UnknownSkier(SkierId(0)));
        assert_eq!(gate.mark_waiting(SkierId(2)).unwrap_err(), StateError::UnknownSkier(SkierId(2)));
    }

    #[test]
    fn cannot_skip_waiting() {
        let state = shared(&[0], 10);
        let mut gate = state.acquire();
        let err = gate.board(SkierId(1)).unwrap_err();
        assert_eq!(
            err,
            StateError::InvalidTransition {
                skier: SkierId(1),
                from:  SkierState::AtBreakfast,
                to:    SkierState::OnRide,
            }
        );
        assert_eq!(gate.store().occupied_seats(), 0);
    }

    #[test]
    fn cannot_go_backwards_or_repeat() {
        let state = shared(&[0], 10);
        let mut gate = state.acquire();
        gate.mark_waiting(SkierId(1)).unwrap();
        assert!(gate.mark_waiting(SkierId(1)).is_err());
        gate.board(SkierId(1)).unwrap();
        gate.unload(SkierId(1)).unwrap();
        assert!(gate.unload(SkierId(1)).is_err());
        assert!(gate.store().all_finished());
    }

    #[test]
    fn board_refuses_when_full() {
        let stops = vec![0; 11];
        let state = shared(&stops, 10);
        let mut gate = state.acquire();
        for i in 1..=11 {
            gate.mark_waiting(SkierId(i)).unwrap();
        }
        for i in 1..=10 {
            gate.board(SkierId(i)).unwrap();
        }
        assert!(!gate.store().has_free_seat());
        assert_eq!(
            gate.board(SkierId(11)).unwrap_err(),
            StateError::BusFull { skier: SkierId(11), capacity: 10 }
        );
        // Refused skier is untouched.
        assert_eq!(gate.skier(SkierId(11)).unwrap().state, SkierState::Waiting);
        assert_eq!(gate.store().occupied_seats(), 10);
    }

    #[test]
    fn unload_frees_seats() {
        let state = shared(&[0, 0], 10);
        let mut gate = state.acquire();
        for i in 1..=2 {
            gate.mark_waiting(SkierId(i)).unwrap();
            gate.board(SkierId(i)).unwrap();
        }
        gate.unload(SkierId(1)).unwrap();
        assert_eq!(gate.store().occupied_seats(), 1);
        assert!(!gate.store().all_finished());
        gate.unload(SkierId(2)).unwrap();
        gate.reset_occupancy();
        assert_eq!(gate.store().occupied_seats(), 0);
        assert!(gate.store().all_finished());
    }

    #[test]
    fn unload_refuses_when_no_seat_taken() {
        let state = shared(&[0], 10);
        let mut gate = state.acquire();
        gate.mark_waiting(SkierId(1)).unwrap();
        gate.board(SkierId(1)).unwrap();
        gate.reset_occupancy();
        assert_eq!(
            gate.unload(SkierId(1)).unwrap_err(),
            StateError::EmptyBus { skier: SkierId(1) }
        );
        // Refused skier stays aboard.
        assert_eq!(gate.skier(SkierId(1)).unwrap().state, SkierState::OnRide);
        assert_eq!(gate.store().occupied_seats(), 0);
        assert!(!gate.store().all_finished());
    }

    #[test]
    fn waiting_at_matches_stop_and_state() {
        let state = shared(&[1], 10);
        let mut gate = state.acquire();
        assert!(!gate.skier(SkierId(1)).unwrap().is_waiting_at(StopId(1)));
        gate.mark_waiting(SkierId(1)).unwrap();
        assert!(gate.skier(SkierId(1)).unwrap().is_waiting_at(StopId(1)));
        assert!(!gate.skier(SkierId(1)).unwrap().is_waiting_at(StopId(0)));
    }
}

#[cfg(test)]
mod gate {
    use std::sync::Arc;
    use std::thread;

    use sb_core::{ActionSeq, EventKind, SkierId, StopId, Subject};

    use super::helpers::shared;

    #[test]
    fn log_stamps_sequence_and_occupancy() {
        let state = shared(&[0], 10);
        {
            let mut gate = state.acquire();
            gate.log(Subject::Bus, EventKind::Started).unwrap();
            gate.mark_waiting(SkierId(1)).unwrap();
            gate.board(SkierId(1)).unwrap();
            let seq = gate.log(Subject::Skier(SkierId(1)), EventKind::Boarding).unwrap();
            assert_eq!(seq, ActionSeq(2));
        }
        let (store, sink) = state.into_parts();
        assert_eq!(store.actions_logged(), 2);
        assert_eq!(sink.events[0].seq, ActionSeq(1));
        assert_eq!(sink.events[0].occupied_seats, 0);
        assert_eq!(sink.events[1].occupied_seats, 1);
    }

    #[test]
    fn failed_write_leaves_no_gap() {
        let state = shared(&[0], 10);
        let mut gate = state.acquire();
        gate.log(Subject::Bus, EventKind::Started).unwrap();
        drop(gate);

        let (store, mut sink) = state.into_parts();
        sink.broken = true;
        let state = crate::SharedState::new(store, sink);
        let mut gate = state.acquire();
        assert!(gate.log(Subject::Bus, EventKind::Finish).is_err());
        assert_eq!(gate.store().next_seq(), ActionSeq(2));
    }

    #[test]
    fn concurrent_logging_is_contiguous() {
        let state = Arc::new(shared(&[0; 8], 10));
        let handles: Vec<_> = (1..=8u32)
            .map(|i| {
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    for _ in 0..50 {
                        let mut gate = state.acquire();
                        gate.log(Subject::Skier(SkierId(i)), EventKind::ArrivedAt(StopId(0)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let state = Arc::try_unwrap(state).ok().unwrap();
        let (_, sink) = state.into_parts();
        let seqs: Vec<u64> = sink.events.iter().map(|e| e.seq.0).collect();
        assert_eq!(seqs, (1..=400).collect::<Vec<_>>());
    }
}
