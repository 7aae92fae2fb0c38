use kplog_core_types::schema::{LOG_TYPE_DETAIL, LOG_TYPE_SUMMARY, MARSHAL_FAILURE_SENTINEL};
use serde::{Deserialize, Serialize};

use super::action::LoggerAction;
use super::custom_fields::CustomFields;
use super::event::FlowEntry;
use super::metadata::Metadata;

/// Channel a record is emitted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    #[default]
    Detail,
    Summary,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Detail => LOG_TYPE_DETAIL,
            LogType::Summary => LOG_TYPE_SUMMARY,
        }
    }
}

/// Canonical schema shared by the detail and summary channels
///
/// Serialized as one JSON object per line. Field names are part of the
/// compatibility surface. Transient per-step fields (`action`,
/// `actionDescription`, `subAction`, `timestamp`, `metadata`) are omitted
/// when empty so the summary digest does not replay the last step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub service_name: String,
    log_type: LogType,
    pub component_version: String,
    pub instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub session_id: String,
    pub request_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action_description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sub_action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub response_time_micros: u64,
    pub app_result: String,
    pub app_result_code: String,
    pub app_result_http_status: String,
    pub app_result_type: String,
    pub severity: String,
    pub thread_id: String,
    pub custom_fields: CustomFields,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flow: Vec<FlowEntry>,
}

impl LogRecord {
    /// Create an empty record on the given channel
    pub fn new(log_type: LogType) -> Self {
        Self {
            log_type,
            ..Default::default()
        }
    }

    pub fn log_type(&self) -> LogType {
        self.log_type
    }

    /// Re-emit this record's content on another channel
    ///
    /// Consumes the record so a single value is never stamped twice.
    pub(crate) fn into_log_type(self, log_type: LogType) -> Self {
        Self { log_type, ..self }
    }

    /// Stamp the per-step action fields
    pub fn apply_action(&mut self, action: &LoggerAction) {
        self.action = action.action.clone();
        self.action_description = action.action_description.clone();
        self.sub_action = action.sub_action.clone();
    }

    /// Serialize to a single JSON line
    ///
    /// Never fails: a record that cannot be serialized degrades to the
    /// marshal-failure sentinel so the sink still receives a line.
    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            tracing::warn!(error = %err, log_type = self.log_type.as_str(), "Failed to serialize log record");
            MARSHAL_FAILURE_SENTINEL.to_string()
        })
    }

    /// Clear the fields that only describe a single detail step
    pub fn clear_transient(&mut self) {
        self.action.clear();
        self.action_description.clear();
        self.sub_action.clear();
        self.timestamp = None;
        self.metadata = None;
    }
}
