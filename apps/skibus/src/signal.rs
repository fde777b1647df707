//! SIGINT / SIGTERM handling.
//!
//! A dedicated thread runs a current-thread tokio runtime that waits for a
//! termination signal and raises the shared [`AbortFlag`].  The actors notice
//! at their next suspension point, the launcher joins them and finishes the
//! sink, and `main` exits non-zero.

use std::io;
use std::thread;

use sb_sim::AbortFlag;
use tokio::runtime::Builder;
use tracing::{error, warn};

/// Register the handlers and start the watcher thread.
///
/// Handlers are registered before this returns, so a signal that arrives
/// while the actors are starting is still caught.
pub fn install(abort: AbortFlag) -> io::Result<()> {
    let runtime = Builder::new_current_thread().enable_all().build()?;
    let waiter = {
        let _ctx = runtime.enter();
        Termination::register()?
    };

    thread::Builder::new()
        .name("signal-watcher".into())
        .spawn(move || {
            runtime.block_on(async move {
                match waiter.wait().await {
                    Ok(name) => {
                        warn!(signal = name, "termination requested, stopping actors");
                        abort.raise();
                    }
                    Err(e) => error!(error = %e, "signal watcher failed"),
                }
            });
        })?;
    Ok(())
}

#[cfg(unix)]
struct Termination {
    interrupt: tokio::signal::unix::Signal,
    terminate: tokio::signal::unix::Signal,
}

#[cfg(unix)]
impl Termination {
    fn register() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    async fn wait(mut self) -> io::Result<&'static str> {
        tokio::select! {
            _ = self.interrupt.recv() => Ok("SIGINT"),
            _ = self.terminate.recv() => Ok("SIGTERM"),
        }
    }
}

#[cfg(not(unix))]
struct Termination;

#[cfg(not(unix))]
impl Termination {
    fn register() -> io::Result<Self> {
        Ok(Self)
    }

    async fn wait(self) -> io::Result<&'static str> {
        tokio::signal::ctrl_c().await.map(|_| "ctrl-c")
    }
}
