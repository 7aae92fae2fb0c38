//! Request-scoped logging session
//!
//! A `LogSession` is created once per unit of work and owned by it. Every
//! detail emission writes one detail line and appends an event tag to the
//! summary sequence; exactly one `flush` (or `end`) emits the summary and
//! retires the session.
//!
//! Sessions carry no internal synchronization. A unit of work that fans out
//! must collect results on its owning task before emitting.

pub mod detail;
pub mod fields;
pub mod summary;
pub mod timer;

use kplog_core_types::schema::{RESULT_FAIL, RESULT_SUCCESS, TAG_CODE_ERROR, TAG_CODE_OK};
use kplog_core_types::CorrelationId;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{KpLogError, Result};
use crate::masking::MaskingRule;
use crate::model::{EventTag, LogRecord, LoggerAction, ResolutionStack};
use crate::sink::{LineLevel, LogServices};
use crate::{log_op_end, log_op_error, log_op_start};

pub use detail::DetailLogger;
pub use summary::SummaryAggregator;
pub use timer::Timer;

/// One unit of work's detail logger and summary aggregate
#[derive(Debug)]
pub struct LogSession {
    correlation_id: CorrelationId,
    detail: DetailLogger,
    summary: SummaryAggregator,
    pending_tag: Option<EventTag>,
}

impl LogSession {
    /// Start a session seeded with service identity and correlation metadata
    ///
    /// The timer starts here. The seed's `threadId` is replaced by a fresh
    /// correlation id stamped on every line of the session.
    pub fn new(seed: LogRecord, services: &LogServices) -> Self {
        let correlation_id = CorrelationId::new();
        log_op_start!(
            "session_start",
            session_id = seed.session_id.as_str(),
            correlation_id = correlation_id.as_str()
        );

        let mut seed = seed;
        seed.thread_id = correlation_id.to_string();

        Self {
            detail: DetailLogger::new(services.detail.clone(), services.masking.clone()),
            summary: SummaryAggregator::new(seed, Timer::start(), services.summary.clone()),
            correlation_id,
            pending_tag: None,
        }
    }

    /// Re-seed the aggregate record
    ///
    /// The session's correlation id is kept on the new seed.
    ///
    /// # Errors
    ///
    /// Returns `SessionRetired` after the summary was flushed.
    pub fn init(&mut self, seed: LogRecord) -> Result<()> {
        let mut seed = seed;
        seed.thread_id = self.correlation_id.to_string();
        self.summary.init(seed)
    }

    /// Set one schema field by its wire name
    ///
    /// Returns whether the field was set. Unknown keys, values of the wrong
    /// shape and calls on a retired session are ignored.
    pub fn update(&mut self, key: &str, value: impl Into<Value>) -> bool {
        match self.summary.update(key, value.into()) {
            Ok(true) => true,
            Ok(false) => {
                tracing::debug!(key, "Ignoring update of unknown field");
                false
            }
            Err(KpLogError::SessionRetired { session_id, .. }) => {
                tracing::error!(key, session_id = %session_id, "Update on a retired session");
                false
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "Rejected field update");
                false
            }
        }
    }

    /// Add a free-form entry to the summary's `customFields`
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.summary.add_field(key, value.into());
        self
    }

    /// Stage resolution overrides applied beneath the stack given to `flush`
    pub fn set_resolution(&mut self, stack: ResolutionStack) -> &mut Self {
        self.summary.set_resolution(stack);
        self
    }

    /// Stage the event tag recorded by the next detail emission
    pub fn set_summary(&mut self, tag: EventTag) -> &mut Self {
        self.pending_tag = Some(tag);
        self
    }

    pub fn info<T: Serialize + ?Sized>(&mut self, action: &LoggerAction, payload: &T, rules: &[MaskingRule]) {
        self.emit(LineLevel::Info, action, payload, rules);
    }

    pub fn debug<T: Serialize + ?Sized>(&mut self, action: &LoggerAction, payload: &T, rules: &[MaskingRule]) {
        self.emit(LineLevel::Debug, action, payload, rules);
    }

    pub fn error<T: Serialize + ?Sized>(&mut self, action: &LoggerAction, payload: &T, rules: &[MaskingRule]) {
        self.emit(LineLevel::Error, action, payload, rules);
    }

    fn emit<T: Serialize + ?Sized>(
        &mut self,
        level: LineLevel,
        action: &LoggerAction,
        payload: &T,
        rules: &[MaskingRule],
    ) {
        if self.summary.is_flushed() {
            tracing::error!(
                correlation_id = self.correlation_id.as_str(),
                action = action.action.as_str(),
                "Detail emission on a retired session"
            );
            self.pending_tag = None;
            return;
        }

        let tag = self
            .pending_tag
            .take()
            .unwrap_or_else(|| action.default_tag());
        let tag = resolve_tag(tag, level);

        self.detail
            .emit(level, self.summary.record(), action, payload, rules);
        self.summary.push_event(tag);
    }

    /// Flush with the outcome of the unit of work
    ///
    /// `status` becomes `appResultHttpStatus` and a non-empty `description`
    /// the summary `message`. For a 4xx/5xx status the description is also
    /// the `appResult`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFlushed` if the summary was already emitted.
    pub fn end(&mut self, status: u16, description: &str) -> Result<LogRecord> {
        let mut stack = ResolutionStack::new()
            .with_status(status.to_string())
            .with_message(description);
        if status >= 400 && !description.is_empty() {
            stack = stack.with_result_type(description);
        }
        self.flush(stack)
    }

    /// Resolve and emit the summary, retiring the session
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFlushed` if the summary was already emitted. The sink
    /// receives nothing in that case.
    pub fn flush(&mut self, stack: ResolutionStack) -> Result<LogRecord> {
        let elapsed_ms = self.summary.timer().elapsed_millis();
        match self.summary.flush(stack) {
            Ok(summary) => {
                log_op_end!(
                    "flush",
                    duration_ms = elapsed_ms,
                    session_id = summary.session_id.as_str(),
                    flow_len = summary.flow.len() as u64
                );
                Ok(summary)
            }
            Err(err) => {
                log_op_error!(
                    "flush",
                    err.clone(),
                    duration_ms = elapsed_ms,
                    correlation_id = self.correlation_id.as_str()
                );
                Err(err)
            }
        }
    }

    /// Snapshot of the current aggregate record
    pub fn record(&self) -> LogRecord {
        self.summary.record().clone()
    }

    /// Event tags recorded since the session started
    pub fn pending_events(&self) -> &[EventTag] {
        self.summary.sequence()
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    pub fn is_flushed(&self) -> bool {
        self.summary.is_flushed()
    }
}

/// Fill in the code and result a caller left unset
fn resolve_tag(mut tag: EventTag, level: LineLevel) -> EventTag {
    let failed = level == LineLevel::Error;
    if tag.code.is_empty() {
        tag.code = if failed { TAG_CODE_ERROR } else { TAG_CODE_OK }.to_string();
    }
    if tag.result.is_none() {
        let result = if failed || !tag.code.starts_with('2') {
            RESULT_FAIL
        } else {
            RESULT_SUCCESS
        };
        tag.result = Some(result.to_string());
    }
    tag
}
