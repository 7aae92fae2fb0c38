//! Canonical schema constants for emitted log records
//!
//! Wire field names and enumerated values are read by downstream log
//! consumers and must be reproduced verbatim.

// Log record field keys (wire names)
pub const FIELD_SERVICE_NAME: &str = "serviceName";
pub const FIELD_LOG_TYPE: &str = "logType";
pub const FIELD_COMPONENT_VERSION: &str = "componentVersion";
pub const FIELD_INSTANCE: &str = "instance";
pub const FIELD_METADATA: &str = "metadata";
pub const FIELD_SESSION_ID: &str = "sessionId";
pub const FIELD_REQUEST_ID: &str = "requestId";
pub const FIELD_ACTION: &str = "action";
pub const FIELD_ACTION_DESCRIPTION: &str = "actionDescription";
pub const FIELD_SUB_ACTION: &str = "subAction";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_TIMESTAMP: &str = "timestamp";
pub const FIELD_RESPONSE_TIME: &str = "responseTimeMicros";
pub const FIELD_APP_RESULT: &str = "appResult";
pub const FIELD_APP_RESULT_CODE: &str = "appResultCode";
pub const FIELD_APP_RESULT_HTTP_STATUS: &str = "appResultHttpStatus";
pub const FIELD_APP_RESULT_TYPE: &str = "appResultType";
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_THREAD_ID: &str = "threadId";
pub const FIELD_CUSTOM_FIELDS: &str = "customFields";
pub const FIELD_FLOW: &str = "flow";

// Log types
pub const LOG_TYPE_DETAIL: &str = "detail";
pub const LOG_TYPE_SUMMARY: &str = "summary";
pub const LOG_TYPE_APP: &str = "app";

// Request sources
pub const SOURCE_API: &str = "api";
pub const SOURCE_EVENT: &str = "event-source";
pub const BROKER_NONE: &str = "none";

// Summary defaults
pub const DEFAULT_APP_RESULT_CODE: &str = "20000";
pub const DEFAULT_APP_RESULT_HTTP_STATUS: &str = "200";
pub const DEFAULT_APP_RESULT: &str = "Success";
pub const APP_RESULT_TYPE_HEALTHY: &str = "HEALTHY";
pub const SEVERITY_NORMAL: &str = "NORMAL";

// Detail event tag codes and results
pub const TAG_CODE_OK: &str = "200";
pub const TAG_CODE_ERROR: &str = "500";
pub const RESULT_SUCCESS: &str = "success";
pub const RESULT_FAIL: &str = "fail";

// Placeholder written when a payload or record cannot be serialized
pub const MARSHAL_FAILURE_SENTINEL: &str = "failed to marshal message";

// Canonical field keys for engine diagnostics (tracing)
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Canonical diagnostic event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compatibility_values_are_verbatim() {
        assert_eq!(DEFAULT_APP_RESULT_CODE, "20000");
        assert_eq!(DEFAULT_APP_RESULT_HTTP_STATUS, "200");
        assert_eq!(DEFAULT_APP_RESULT, "Success");
        assert_eq!(APP_RESULT_TYPE_HEALTHY, "HEALTHY");
        assert_eq!(SEVERITY_NORMAL, "NORMAL");
    }

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_log_types_are_distinct() {
        assert_ne!(LOG_TYPE_DETAIL, LOG_TYPE_SUMMARY);
        assert_ne!(LOG_TYPE_SUMMARY, LOG_TYPE_APP);
    }
}
