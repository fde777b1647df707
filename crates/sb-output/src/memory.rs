//! In-memory sink used by tests and by log audits.

use sb_core::Event;
use sb_state::{EventSink, SinkResult};

use crate::LogLine;

#[derive(Default)]
pub struct MemorySink {
    events: Vec<Event>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// The recorded events as audit lines.
    pub fn lines(&self) -> Vec<LogLine> {
        self.events.iter().map(LogLine::from).collect()
    }
}

impl EventSink for MemorySink {
    fn record(&mut self, event: &Event) -> SinkResult<()> {
        self.events.push(*event);
        Ok(())
    }
}
