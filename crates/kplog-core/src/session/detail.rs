use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use kplog_core_types::schema::MARSHAL_FAILURE_SENTINEL;
use serde::Serialize;

use crate::masking::{apply_rules, MaskingRule, MaskingService};
use crate::model::{LogRecord, LogType, LoggerAction};
use crate::sink::{LineLevel, LoggerService};

/// Emits one detail record per call
///
/// Each record is a copy of the session's aggregate record stamped with the
/// step's action, a timestamp and the masked payload.
#[derive(Clone)]
pub struct DetailLogger {
    sink: Arc<dyn LoggerService>,
    masking: Arc<dyn MaskingService>,
}

impl DetailLogger {
    pub fn new(sink: Arc<dyn LoggerService>, masking: Arc<dyn MaskingService>) -> Self {
        Self { sink, masking }
    }

    /// Build, serialize and hand one detail record to the sink
    ///
    /// Returns the record that was emitted.
    pub fn emit<T: Serialize + ?Sized>(
        &self,
        level: LineLevel,
        base: &LogRecord,
        action: &LoggerAction,
        payload: &T,
        rules: &[MaskingRule],
    ) -> LogRecord {
        let mut record = base.clone().into_log_type(LogType::Detail);
        record.apply_action(action);
        record.timestamp = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        record.message = Some(self.render_payload(payload, rules));

        let line = record.to_line();
        match level {
            LineLevel::Info => self.sink.info(&line),
            LineLevel::Debug => self.sink.debug(&line),
            LineLevel::Error => self.sink.error(&line),
        }
        record
    }

    /// Serialize `payload` to a JSON string with `rules` applied
    ///
    /// Falls back to the marshal-failure sentinel instead of failing.
    pub fn render_payload<T: Serialize + ?Sized>(&self, payload: &T, rules: &[MaskingRule]) -> String {
        let mut value = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to serialize detail payload");
                return MARSHAL_FAILURE_SENTINEL.to_string();
            }
        };
        if !rules.is_empty() {
            apply_rules(&mut value, rules, self.masking.as_ref());
        }
        serde_json::to_string(&value).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to serialize masked payload");
            MARSHAL_FAILURE_SENTINEL.to_string()
        })
    }
}

impl std::fmt::Debug for DetailLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailLogger").finish_non_exhaustive()
    }
}
