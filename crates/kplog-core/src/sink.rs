//! Sinks that persist finished log lines
//!
//! The engine hands fully-serialized JSON lines to a `LoggerService`. A sink
//! must not mutate or reorder lines; `sync` flushes any buffering at
//! shutdown.
//!
//! - `TracingSink`: forwards lines to `tracing` under a per-channel target
//! - `WriterSink`: newline-delimited JSON to any `io::Write`
//! - `MemorySink`: captures lines in memory for assertions

pub mod memory;
pub mod tracing_sink;
pub mod writer;

use std::sync::Arc;

use crate::errors::Result;
use crate::masking::{MaskingEngine, MaskingService};

pub use memory::{CapturedLine, LineLevel, MemorySink};
pub use tracing_sink::{Channel, TracingSink};
pub use writer::WriterSink;

/// Destination for serialized log lines
pub trait LoggerService: Send + Sync {
    fn info(&self, line: &str);
    fn debug(&self, line: &str);
    fn error(&self, line: &str);
    fn sync(&self) -> Result<()>;
}

/// Collaborators injected into every session
///
/// Cloning is cheap; all members are shared handles.
#[derive(Clone)]
pub struct LogServices {
    pub app: Arc<dyn LoggerService>,
    pub detail: Arc<dyn LoggerService>,
    pub summary: Arc<dyn LoggerService>,
    pub masking: Arc<dyn MaskingService>,
}

impl LogServices {
    pub fn new(
        app: Arc<dyn LoggerService>,
        detail: Arc<dyn LoggerService>,
        summary: Arc<dyn LoggerService>,
        masking: Arc<dyn MaskingService>,
    ) -> Self {
        Self {
            app,
            detail,
            summary,
            masking,
        }
    }

    /// Route every channel through `tracing`
    pub fn tracing(masking: MaskingEngine) -> Self {
        Self::new(
            Arc::new(TracingSink::new(Channel::App)),
            Arc::new(TracingSink::new(Channel::Detail)),
            Arc::new(TracingSink::new(Channel::Summary)),
            Arc::new(masking),
        )
    }

    /// Flush every sink, reporting the first failure
    pub fn sync_all(&self) -> Result<()> {
        let results = [self.app.sync(), self.detail.sync(), self.summary.sync()];
        results.into_iter().collect::<Result<Vec<_>>>().map(|_| ())
    }
}

impl std::fmt::Debug for LogServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogServices").finish_non_exhaustive()
    }
}
