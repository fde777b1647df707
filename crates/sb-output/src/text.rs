//! Plain-text event log.
//!
//! Every event becomes one line, written and flushed before the Gate is
//! released, so a reader tailing the file sees lines in `ActionSeq` order even
//! if the process is killed.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sb_core::Event;
use sb_state::{EventSink, SinkError, SinkResult};

use crate::format_event;

pub struct TextSink<W: Write> {
    out:      W,
    mirror:   Option<io::Stdout>,
    finished: bool,
}

impl TextSink<BufWriter<File>> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: &Path) -> SinkResult<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, mirror: None, finished: false }
    }

    /// Also echo every line to stdout.
    pub fn mirrored(mut self) -> Self {
        self.mirror = Some(io::stdout());
        self
    }

    /// Unwrap the inner writer (e.g. to inspect an in-memory buffer).
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> EventSink for TextSink<W> {
    fn record(&mut self, event: &Event) -> SinkResult<()> {
        if self.finished {
            return Err(SinkError::Finished);
        }
        let mut line = format_event(event);
        line.push('\n');

        self.out.write_all(line.as_bytes())?;
        self.out.flush()?;

        if let Some(stdout) = &self.mirror {
            let mut lock = stdout.lock();
            lock.write_all(line.as_bytes())?;
            lock.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
