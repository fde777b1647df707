use sb_core::Event;
use sb_state::{EventSink, SinkResult};

/// Sends every event to `first`, then to `second`.
///
/// Both sinks are finished even if the first one fails; the first error wins.
pub struct Tee<A, B> {
    pub first:  A,
    pub second: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn record(&mut self, event: &Event) -> SinkResult<()> {
        self.first.record(event)?;
        self.second.record(event)
    }

    fn finish(&mut self) -> SinkResult<()> {
        let first = self.first.finish();
        let second = self.second.finish();
        first.and(second)
    }
}
