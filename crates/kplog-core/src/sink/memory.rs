use std::sync::{Arc, Mutex};

use super::LoggerService;
use crate::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineLevel {
    Info,
    Debug,
    Error,
}

/// A line received by a `MemorySink`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedLine {
    pub level: LineLevel,
    pub line: String,
}

/// Sink that keeps every line in memory
///
/// Clones share the same buffer, so a test can hand one clone to the
/// engine and assert on another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<CapturedLine>>>,
    syncs: Arc<Mutex<usize>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured lines in arrival order
    pub fn lines(&self) -> Vec<CapturedLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Captured lines parsed as JSON; unparsable lines are skipped
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.lines()
            .iter()
            .filter_map(|l| serde_json::from_str(&l.line).ok())
            .collect()
    }

    pub fn count_level(&self, level: LineLevel) -> usize {
        self.lines().iter().filter(|l| l.level == level).count()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sync_count(&self) -> usize {
        self.syncs.lock().map(|s| *s).unwrap_or_default()
    }

    pub fn clear(&self) {
        self.lines.lock().map(|mut l| l.clear()).ok();
    }

    fn push(&self, level: LineLevel, line: &str) {
        self.lines
            .lock()
            .map(|mut l| {
                l.push(CapturedLine {
                    level,
                    line: line.to_string(),
                })
            })
            .ok();
    }
}

impl LoggerService for MemorySink {
    fn info(&self, line: &str) {
        self.push(LineLevel::Info, line);
    }

    fn debug(&self, line: &str) {
        self.push(LineLevel::Debug, line);
    }

    fn error(&self, line: &str) {
        self.push(LineLevel::Error, line);
    }

    fn sync(&self) -> Result<()> {
        self.syncs.lock().map(|mut s| *s += 1).ok();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.info("{}");
        sink.debug("not json");

        assert_eq!(handle.len(), 2);
        assert_eq!(handle.json_lines().len(), 1);
        assert_eq!(handle.count_level(LineLevel::Debug), 1);
    }
}
