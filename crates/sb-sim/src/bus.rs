//! The bus actor: round-robin stop loop, boarding, unloading, termination.

use std::thread;

use sb_core::{ActorRng, EventKind, SimConfig, SkierId, StopId, Subject};
use sb_state::{EventSink, SharedState, SkierState};
use tracing::debug;

use crate::{AbortFlag, SimResult};

/// Run the bus until every skier has been carried to the final stop.
///
/// Returns `Err(SimError::Aborted)` if `abort` is raised first.
pub fn run_bus<S: EventSink>(
    state:  &SharedState<S>,
    config: &SimConfig,
    abort:  &AbortFlag,
) -> SimResult<()> {
    let mut rng = ActorRng::for_bus(config.seed);

    {
        let mut gate = state.acquire();
        gate.set_current_stop(StopId::FINAL);
        gate.reset_occupancy();
        gate.log(Subject::Bus, EventKind::Started)?;
    }

    let mut stop = StopId::FINAL;
    let mut round: u64 = 0;
    let mut all_finished = false;

    while !all_finished {
        travel(&mut rng, config, abort)?;
        state.acquire().log(Subject::Bus, EventKind::ArrivedAt(stop))?;

        let boarded = board_at(state, stop)?;
        if boarded > 0 {
            debug!(round, stop = stop.number(), boarded, "boarded");
        }

        {
            let mut gate = state.acquire();
            gate.log(Subject::Bus, EventKind::Leaving(stop))?;
            stop = stop.next(config.num_stops);
            gate.set_current_stop(stop);
        }

        if stop == StopId::FINAL {
            travel(&mut rng, config, abort)?;
            all_finished = unload_at_final(state)?;
            round += 1;
            debug!(round, all_finished, "round complete");
        }
    }

    state.acquire().log(Subject::Bus, EventKind::Finish)?;
    Ok(())
}

/// Sleep for one modelled hop, checking for an abort on both sides.
fn travel(rng: &mut ActorRng, config: &SimConfig, abort: &AbortFlag) -> SimResult<()> {
    abort.check()?;
    thread::sleep(rng.delay_up_to(config.max_bus_travel()));
    abort.check()
}

/// Board waiting skiers assigned to `stop`, lowest id first, while seats last.
///
/// The whole scan is one Gate scope: eligibility check, `OnRide`, seat count,
/// and the log line for each skier happen without releasing in between.
pub(crate) fn board_at<S: EventSink>(state: &SharedState<S>, stop: StopId) -> SimResult<u32> {
    let mut gate = state.acquire();
    let mut boarded = 0;

    for i in 0..gate.store().skier_count() {
        if !gate.store().has_free_seat() {
            break;
        }
        let id = SkierId::from_index(i);
        if gate.skier(id)?.is_waiting_at(stop) {
            gate.board(id)?;
            gate.log(Subject::Skier(id), EventKind::Boarding)?;
            boarded += 1;
        }
    }
    Ok(boarded)
}

/// Final-stop phase.  Returns `true` once every skier is `Finished`.
pub(crate) fn unload_at_final<S: EventSink>(state: &SharedState<S>) -> SimResult<bool> {
    state.acquire().log(Subject::Bus, EventKind::ArrivedFinal)?;

    let all_finished = {
        let mut gate = state.acquire();
        for i in 0..gate.store().skier_count() {
            let id = SkierId::from_index(i);
            if gate.skier(id)?.state == SkierState::OnRide {
                gate.unload(id)?;
                gate.log(Subject::Skier(id), EventKind::GoingToSki)?;
            }
        }
        gate.reset_occupancy();
        gate.store().all_finished()
    };

    state.acquire().log(Subject::Bus, EventKind::LeavingFinal)?;
    Ok(all_finished)
}
