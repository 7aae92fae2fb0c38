use std::sync::Arc;

use kplog_core_types::schema::{
    APP_RESULT_TYPE_HEALTHY, DEFAULT_APP_RESULT, DEFAULT_APP_RESULT_CODE,
    DEFAULT_APP_RESULT_HTTP_STATUS, SEVERITY_NORMAL,
};
use kplog_core_types::CorrelationId;
use serde_json::Value;

use super::fields;
use super::timer::Timer;
use crate::errors::{KpLogError, Result};
use crate::model::{CustomFields, EventTag, LogRecord, LogType, ResolutionStack};
use crate::sink::LoggerService;

/// Owns the single mutable aggregate of a session
///
/// Detail emissions append to the pending event sequence; `flush` resolves
/// the final result fields, emits exactly one summary line and retires the
/// aggregate.
pub struct SummaryAggregator {
    record: LogRecord,
    sequence: Vec<EventTag>,
    custom_fields: CustomFields,
    staged: ResolutionStack,
    timer: Timer,
    sink: Arc<dyn LoggerService>,
    flushed: bool,
}

impl SummaryAggregator {
    pub fn new(seed: LogRecord, timer: Timer, sink: Arc<dyn LoggerService>) -> Self {
        Self {
            record: seed,
            sequence: Vec::new(),
            custom_fields: CustomFields::new(),
            staged: ResolutionStack::default(),
            timer,
            sink,
            flushed: false,
        }
    }

    /// Replace the aggregate with a new seed record
    ///
    /// The event sequence, custom fields and staged resolution are kept.
    pub fn init(&mut self, seed: LogRecord) -> Result<()> {
        self.ensure_active("init")?;
        self.record = seed;
        Ok(())
    }

    /// Set one schema field by its wire name
    ///
    /// Returns `Ok(false)` when `key` is not an updatable field.
    pub fn update(&mut self, key: &str, value: Value) -> Result<bool> {
        self.ensure_active("update")?;
        fields::apply(&mut self.record, key, value)
    }

    /// Stage overrides that `flush` will apply beneath its own argument
    pub fn set_resolution(&mut self, stack: ResolutionStack) -> &mut Self {
        self.staged = stack.over(std::mem::take(&mut self.staged));
        self
    }

    pub fn add_field(&mut self, key: impl Into<String>, value: Value) {
        self.custom_fields.set(key, value);
    }

    pub fn push_event(&mut self, tag: EventTag) {
        self.sequence.push(tag);
    }

    /// Current aggregate, used as the base of every detail record
    pub fn record(&self) -> &LogRecord {
        &self.record
    }

    pub fn sequence(&self) -> &[EventTag] {
        &self.sequence
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Resolve, emit and retire the summary
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFlushed` if the summary was already emitted; the
    /// sink receives nothing in that case.
    pub fn flush(&mut self, stack: ResolutionStack) -> Result<LogRecord> {
        if self.flushed {
            return Err(KpLogError::AlreadyFlushed {
                session_id: self.record.session_id.clone(),
            });
        }

        let staged = std::mem::take(&mut self.staged);
        let summary = self.resolve(stack.over(staged));

        self.sink.info(&summary.to_line());

        // Retire: nothing of the aggregate may leak into a later flush
        self.flushed = true;
        self.record = LogRecord::default();
        self.record.session_id = summary.session_id.clone();
        self.sequence.clear();
        self.custom_fields = CustomFields::new();

        Ok(summary)
    }

    fn resolve(&mut self, stack: ResolutionStack) -> LogRecord {
        let mut summary = std::mem::take(&mut self.record);

        summary.response_time_micros = self.timer.elapsed_micros();

        summary.app_result_code = pick(stack.code, summary.app_result_code, DEFAULT_APP_RESULT_CODE);
        summary.app_result_http_status = pick(
            stack.status,
            summary.app_result_http_status,
            DEFAULT_APP_RESULT_HTTP_STATUS,
        );
        summary.app_result_type = pick(None, summary.app_result_type, APP_RESULT_TYPE_HEALTHY);
        summary.severity = pick(None, summary.severity, SEVERITY_NORMAL);
        summary.app_result = match stack.result_type {
            Some(result_type) if result_type.eq_ignore_ascii_case("ok") => {
                DEFAULT_APP_RESULT.to_string()
            }
            Some(result_type) => result_type,
            None => pick(None, summary.app_result, DEFAULT_APP_RESULT),
        };

        if !self.sequence.is_empty() {
            summary.flow = self.sequence.drain(..).map(|tag| tag.to_flow_entry()).collect();
        }

        summary
            .custom_fields
            .merge(std::mem::take(&mut self.custom_fields));

        summary.clear_transient();
        summary.message = stack.message.or(summary.message);
        if summary.thread_id.is_empty() {
            summary.thread_id = CorrelationId::new().to_string();
        }

        summary.into_log_type(LogType::Summary)
    }

    fn ensure_active(&self, op: &str) -> Result<()> {
        if self.flushed {
            return Err(KpLogError::SessionRetired {
                session_id: self.record.session_id.clone(),
                op: op.to_string(),
            });
        }
        Ok(())
    }
}

/// override > existing > default
fn pick(explicit: Option<String>, existing: String, default: &str) -> String {
    match explicit {
        Some(value) => value,
        None if !existing.is_empty() => existing,
        None => default.to_string(),
    }
}

impl std::fmt::Debug for SummaryAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryAggregator")
            .field("record", &self.record)
            .field("sequence", &self.sequence)
            .field("flushed", &self.flushed)
            .finish_non_exhaustive()
    }
}
