//! The skier actor.

use std::thread;

use sb_core::{ActorRng, EventKind, SimConfig, SkierId, Subject};
use sb_state::{EventSink, SharedState};
use tracing::trace;

use crate::{AbortFlag, SimResult};

/// Drive skier `id` from `AtBreakfast` to `Waiting`, then return.
///
/// After the arrival is logged the skier is a passive record; only the bus
/// moves it further.
pub fn run_skier<S: EventSink>(
    id:     SkierId,
    state:  &SharedState<S>,
    config: &SimConfig,
    abort:  &AbortFlag,
) -> SimResult<()> {
    let mut rng = ActorRng::for_skier(config.seed, id);
    let subject = Subject::Skier(id);

    state.acquire().log(subject, EventKind::Started)?;

    abort.check()?;
    thread::sleep(rng.delay_up_to(config.max_skier_wait()));
    abort.check()?;

    let mut gate = state.acquire();
    let stop = gate.mark_waiting(id)?;
    gate.log(subject, EventKind::ArrivedAt(stop))?;
    drop(gate);

    trace!(skier = id.0, stop = stop.number(), "waiting");
    Ok(())
}
