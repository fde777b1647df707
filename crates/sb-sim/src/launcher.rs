//! Thread-per-actor bootstrap.

use std::collections::VecDeque;
use std::io;
use std::thread::{self, Scope, ScopedJoinHandle};

use sb_core::{SimConfig, SimRng, SkierId, StopId};
use sb_state::{EventSink, SharedState, SkierRecord, Store};
use tracing::{error, info, warn};

use crate::abort::RaiseOnPanic;
use crate::{AbortFlag, SimError, SimResult, run_bus, run_skier};

/// Stack size for actor threads.  Actors keep almost nothing on the stack.
pub const DEFAULT_STACK_SIZE: usize = 256 * 1024;

/// Upper bound on skier threads alive at once.  Every thread costs several
/// memory mappings until it is joined, and 20 000 simultaneous threads exceed
/// the default Linux `vm.max_map_count`.
pub const DEFAULT_MAX_LIVE_SKIERS: usize = 1024;

/// What a completed run hands back.
pub struct SimOutcome<S> {
    /// The sink, already finished.
    pub sink:    S,
    /// Final skier records in ascending id order.
    pub skiers:  Vec<SkierRecord>,
    /// Number of events logged.
    pub actions: u64,
}

/// Fluent builder that owns the resources of one run.
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                |
/// |------------------------|----------------------------------------|
/// | `.stack_size(n)`       | [`DEFAULT_STACK_SIZE`]                 |
/// | `.max_live_skiers(n)`  | [`DEFAULT_MAX_LIVE_SKIERS`]            |
/// | `.abort_flag(f)`       | a fresh, private flag                  |
/// | `.assigned_stops(v)`   | uniform draw seeded by `config.seed`   |
///
/// # Example
///
/// ```rust,ignore
/// let abort = AbortFlag::new();
/// install_interrupt_handler(abort.clone());
/// let outcome = Launcher::new(config, sink).abort_flag(abort).run()?;
/// ```
pub struct Launcher<S: EventSink> {
    config:     SimConfig,
    sink:       S,
    stack_size: usize,
    max_live:   usize,
    abort:      AbortFlag,
    stops:      Option<Vec<StopId>>,
}

type ActorHandle<'scope> = ScopedJoinHandle<'scope, SimResult<()>>;

impl<S: EventSink> Launcher<S> {
    pub fn new(config: SimConfig, sink: S) -> Self {
        Self {
            config,
            sink,
            stack_size: DEFAULT_STACK_SIZE,
            max_live:   DEFAULT_MAX_LIVE_SKIERS,
            abort:      AbortFlag::new(),
            stops:      None,
        }
    }

    pub fn stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = bytes;
        self
    }

    /// Cap the number of skier threads alive at once (at least 1).  When the
    /// cap is reached the oldest skier is joined before the next is spawned.
    pub fn max_live_skiers(mut self, n: usize) -> Self {
        self.max_live = n.max(1);
        self
    }

    /// Share an externally owned flag, e.g. one raised by a signal handler.
    pub fn abort_flag(mut self, abort: AbortFlag) -> Self {
        self.abort = abort;
        self
    }

    /// Fix each skier's stop instead of drawing them (length `num_skiers`,
    /// entry `i` for `SkierId::from_index(i)`).
    pub fn assigned_stops(mut self, stops: Vec<StopId>) -> Self {
        self.stops = Some(stops);
        self
    }

    /// Start one bus and `num_skiers` skier threads, wait for all of them,
    /// finish the sink, and tear the shared state down.  At most
    /// `max_live_skiers` skier threads exist at any moment.
    ///
    /// On failure every spawned thread is still joined and the sink is still
    /// finished before the first concrete error is returned.
    pub fn run(self) -> SimResult<SimOutcome<S>> {
        let config = self.config;
        let abort = self.abort;
        let stack_size = self.stack_size;
        let max_live = self.max_live;

        let stops = match self.stops {
            Some(stops) => {
                if stops.len() != config.num_skiers as usize {
                    return Err(SimError::SkierCountMismatch {
                        expected: config.num_skiers as usize,
                        got:      stops.len(),
                    });
                }
                if let Some(bad) = stops.iter().find(|s| s.0 >= config.num_stops) {
                    return Err(SimError::ResourceInit(format!(
                        "stop {} outside 1..={}",
                        bad.number(),
                        config.num_stops
                    )));
                }
                stops
            }
            None => SimRng::new(config.seed).assign_stops(config.num_skiers, config.num_stops),
        };

        let state = SharedState::new(Store::new(&stops, config.bus_capacity), self.sink);
        info!(
            skiers   = config.num_skiers,
            stops    = config.num_stops,
            capacity = config.bus_capacity,
            seed     = config.seed,
            "simulation starting"
        );

        let failure = thread::scope(|scope| {
            let mut failure = None;
            match spawn_bus(scope, &state, &config, &abort, stack_size) {
                Ok(bus) => {
                    let actors = Actors { state: &state, config: &config, abort: &abort, stack_size };
                    actors.spawn_skiers(scope, max_live, &mut failure);
                    join_into(&mut failure, "bus", bus);
                }
                Err(e) => record(&mut failure, spawn_failed("bus", e, &abort)),
            }
            failure
        });

        let (store, mut sink) = state.into_parts();
        let finished = sink.finish();

        if let Some(e) = failure {
            if let Err(finish_err) = finished {
                error!(error = %finish_err, "failed to finish event log during teardown");
            }
            match &e {
                SimError::Aborted => warn!("simulation aborted"),
                other => error!(error = %other, "simulation failed"),
            }
            return Err(e);
        }
        finished?;

        let actions = store.actions_logged();
        info!(actions, "simulation finished");
        Ok(SimOutcome { sink, skiers: store.into_skiers(), actions })
    }
}

fn spawn_bus<'scope, 'env, S: EventSink>(
    scope:      &'scope Scope<'scope, 'env>,
    state:      &'env SharedState<S>,
    config:     &'env SimConfig,
    abort:      &'env AbortFlag,
    stack_size: usize,
) -> io::Result<ActorHandle<'scope>> {
    thread::Builder::new()
        .name("bus".into())
        .stack_size(stack_size)
        .spawn_scoped(scope, move || {
            let _guard = RaiseOnPanic(abort);
            let result = run_bus(state, config, abort);
            if result.is_err() {
                abort.raise();
            }
            result
        })
}

/// Borrowed resources every skier thread needs.
struct Actors<'env, S: EventSink> {
    state:      &'env SharedState<S>,
    config:     &'env SimConfig,
    abort:      &'env AbortFlag,
    stack_size: usize,
}

impl<'env, S: EventSink> Actors<'env, S> {
    /// Spawn every skier through a window of at most `max_live` unjoined
    /// threads.  Stops spawning at the first spawn failure or once `abort` is
    /// raised; every spawned skier is joined before this returns.
    fn spawn_skiers<'scope>(
        &self,
        scope:    &'scope Scope<'scope, 'env>,
        max_live: usize,
        failure:  &mut Option<SimError>,
    ) {
        let total = self.config.num_skiers as usize;
        let mut live: VecDeque<ActorHandle<'scope>> = VecDeque::with_capacity(max_live.min(total));

        for i in 0..total {
            if self.abort.is_raised() {
                break;
            }
            if live.len() >= max_live {
                if let Some(oldest) = live.pop_front() {
                    join_into(failure, "skier", oldest);
                }
            }
            match self.spawn_skier(scope, SkierId::from_index(i)) {
                Ok(h) => live.push_back(h),
                Err(e) => {
                    record(failure, spawn_failed("skier", e, self.abort));
                    break;
                }
            }
        }

        for h in live {
            join_into(failure, "skier", h);
        }
    }

    fn spawn_skier<'scope>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        id:    SkierId,
    ) -> io::Result<ActorHandle<'scope>> {
        let (state, config, abort) = (self.state, self.config, self.abort);
        thread::Builder::new()
            .name(format!("skier-{}", id.0))
            .stack_size(self.stack_size)
            .spawn_scoped(scope, move || {
                let _guard = RaiseOnPanic(abort);
                let result = run_skier(id, state, config, abort);
                if result.is_err() {
                    abort.raise();
                }
                result
            })
    }
}

fn join_into(failure: &mut Option<SimError>, role: &'static str, handle: ActorHandle<'_>) {
    if let Err(e) = handle.join().unwrap_or(Err(SimError::ActorPanicked(role))) {
        record(failure, e);
    }
}

/// Keep the first concrete error; `Aborted` only until something better shows up.
fn record(failure: &mut Option<SimError>, e: SimError) {
    let keep_prev = matches!(failure, Some(prev) if !prev.is_echo() || e.is_echo());
    if !keep_prev {
        *failure = Some(e);
    }
}

fn spawn_failed(role: &str, e: io::Error, abort: &AbortFlag) -> SimError {
    abort.raise();
    error!(role, error = %e, "failed to spawn actor thread");
    SimError::ResourceInit(format!("cannot spawn {role} thread: {e}"))
}
