//! The `EventSink` trait through which the Gate publishes events.

use sb_core::Event;

use crate::SinkResult;

/// Receiver of the ordered Event Log.
///
/// The Gate calls [`record`][Self::record] while it is held, so a sink sees
/// events strictly in `ActionSeq` order and never concurrently.  Implementors
/// that buffer must make the event durable before returning.
pub trait EventSink: Send {
    /// Write one event.
    fn record(&mut self, event: &Event) -> SinkResult<()>;

    /// Flush and close.  Idempotent; safe to call more than once.
    fn finish(&mut self) -> SinkResult<()> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn record(&mut self, event: &Event) -> SinkResult<()> {
        (**self).record(event)
    }

    fn finish(&mut self) -> SinkResult<()> {
        (**self).finish()
    }
}

/// An [`EventSink`] that discards everything.
pub struct NoopSink;

impl EventSink for NoopSink {
    fn record(&mut self, _event: &Event) -> SinkResult<()> {
        Ok(())
    }
}
