//! CSV event export.
//!
//! Columns: `seq,subject,skier,verb,stop,occupied_seats`.  `skier` is empty
//! for bus events and `stop` is empty for events without a numbered stop.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use csv::Writer;
use sb_core::{Event, EventKind, Subject};
use sb_state::{EventSink, SinkError, SinkResult};

use crate::format::Verb;

pub const HEADER: [&str; 6] = ["seq", "subject", "skier", "verb", "stop", "occupied_seats"];

pub struct CsvSink<W: Write> {
    rows:     Writer<W>,
    finished: bool,
}

impl CsvSink<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> SinkResult<Self> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W) -> SinkResult<Self> {
        let mut rows = Writer::from_writer(out);
        rows.write_record(HEADER).map_err(io::Error::from)?;
        Ok(Self { rows, finished: false })
    }

    /// Flush and return the inner writer.
    pub fn into_inner(self) -> SinkResult<W> {
        self.rows
            .into_inner()
            .map_err(|e| SinkError::Io(io::Error::new(e.error().kind(), e.to_string())))
    }
}

impl<W: Write + Send> EventSink for CsvSink<W> {
    fn record(&mut self, event: &Event) -> SinkResult<()> {
        if self.finished {
            return Err(SinkError::Finished);
        }
        let (subject, skier) = match event.subject {
            Subject::Skier(id) => ("skier", id.0.to_string()),
            Subject::Bus       => ("bus", String::new()),
        };
        let stop = match event.kind {
            EventKind::ArrivedAt(s) | EventKind::Leaving(s) => s.number().to_string(),
            _ => String::new(),
        };
        self.rows
            .write_record([
                event.seq.to_string(),
                subject.to_owned(),
                skier,
                Verb(event.kind).to_string(),
                stop,
                event.occupied_seats.to_string(),
            ])
            .map_err(io::Error::from)?;
        self.rows.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> SinkResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.rows.flush()?;
        Ok(())
    }
}
