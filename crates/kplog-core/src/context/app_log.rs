use kplog_core_types::schema::{LOG_TYPE_APP, MARSHAL_FAILURE_SENTINEL};
use serde::{Deserialize, Serialize};

use crate::sink::LineLevel;

/// One line of the application log channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLogLine {
    pub log_type: String,
    pub log_level: String,
    /// JSON encoding of the logged value
    pub message: String,
    pub service_name: String,
    pub request_id: String,
    pub session_id: String,
}

impl AppLogLine {
    pub fn new<T: Serialize + ?Sized>(
        level: LineLevel,
        msg: &T,
        service_name: &str,
        request_id: &str,
        session_id: &str,
    ) -> Self {
        let message = serde_json::to_string(msg).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to serialize app log message");
            MARSHAL_FAILURE_SENTINEL.to_string()
        });
        Self {
            log_type: LOG_TYPE_APP.to_string(),
            log_level: level_name(level).to_string(),
            message,
            service_name: service_name.to_string(),
            request_id: request_id.to_string(),
            session_id: session_id.to_string(),
        }
    }

    pub fn to_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to serialize app log line");
            MARSHAL_FAILURE_SENTINEL.to_string()
        })
    }
}

fn level_name(level: LineLevel) -> &'static str {
    match level {
        LineLevel::Info => "info",
        LineLevel::Debug => "debug",
        LineLevel::Error => "error",
    }
}
