//! JSON-lines sink for game records.

use crate::simulator::{GameRecord, SimError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub struct OutputWriter {
    writer: Box<dyn Write + Send>,
    written: usize,
}

impl OutputWriter {
    /// Truncates `path` if it already exists.
    pub fn to_file(path: &Path) -> Result<Self, SimError> {
        let file = File::create(path)?;
        Ok(Self::new(Box::new(BufWriter::new(file))))
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        OutputWriter { writer, written: 0 }
    }

    pub fn write_record(&mut self, record: &GameRecord) -> Result<(), SimError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<usize, SimError> {
        self.writer.flush()?;
        Ok(self.written)
    }
}
