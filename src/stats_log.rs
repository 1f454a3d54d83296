//! JSON-lines [`StatsSink`] for finished intermissions.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::error;

use crate::core::{LevelSummary, StatsSink};

/// Appends one JSON object per summary.
pub struct JsonLinesSink<W: Write> {
    out: W,
    written: usize,
}

impl JsonLinesSink<BufWriter<File>> {
    /// Open `path` for appending, creating it if needed.
    pub fn append(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("could not open stats log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Summaries written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn write_summary(&mut self, summary: &LevelSummary) -> Result<()> {
        serde_json::to_writer(&mut self.out, summary)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatsSink for JsonLinesSink<W> {
    fn record(&mut self, summary: &LevelSummary) {
        if let Err(e) = self.write_summary(summary) {
            error!(level = %summary.level, error = %format!("{e:#}"), "failed to write stats log");
        }
    }
}
