use std::io::Write;
use std::sync::Mutex;

use super::LoggerService;
use crate::errors::{KpLogError, Result};

/// Newline-delimited JSON sink over any writer (stdout, a file, a socket)
///
/// Lines are written whole under a lock, so concurrent sessions never
/// interleave partial lines.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the sink and return the writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|_| KpLogError::Sink("writer lock poisoned".to_string()))
    }

    fn write_line(&self, line: &str) {
        let written = self
            .writer
            .lock()
            .map_err(|_| KpLogError::Sink("writer lock poisoned".to_string()))
            .and_then(|mut w| {
                w.write_all(line.as_bytes())?;
                w.write_all(b"\n")?;
                Ok(())
            });
        if let Err(err) = written {
            tracing::warn!(error = %err, "Dropped log line");
        }
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> LoggerService for WriterSink<W> {
    fn info(&self, line: &str) {
        self.write_line(line);
    }

    fn debug(&self, line: &str) {
        self.write_line(line);
    }

    fn error(&self, line: &str) {
        self.write_line(line);
    }

    fn sync(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| KpLogError::Sink("writer lock poisoned".to_string()))?;
        writer.flush()?;
        Ok(())
    }
}
