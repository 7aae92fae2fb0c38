//! Schema-guarded field updates
//!
//! `update(key, value)` may only touch fields listed in `UPDATABLE_FIELDS`.
//! `logType`, `responseTimeMicros`, `flow` and `customFields` are owned by
//! the engine and are never settable by key.

use kplog_core_types::schema::*;
use serde_json::Value;

use crate::errors::{KpLogError, Result};
use crate::model::LogRecord;

type Setter = fn(&mut LogRecord, String);

pub struct FieldSetter {
    pub key: &'static str,
    set: Setter,
}

pub const UPDATABLE_FIELDS: &[FieldSetter] = &[
    FieldSetter { key: FIELD_SERVICE_NAME, set: |r, v| r.service_name = v },
    FieldSetter { key: FIELD_COMPONENT_VERSION, set: |r, v| r.component_version = v },
    FieldSetter { key: FIELD_INSTANCE, set: |r, v| r.instance = v },
    FieldSetter { key: FIELD_SESSION_ID, set: |r, v| r.session_id = v },
    FieldSetter { key: FIELD_REQUEST_ID, set: |r, v| r.request_id = v },
    FieldSetter { key: FIELD_ACTION, set: |r, v| r.action = v },
    FieldSetter { key: FIELD_ACTION_DESCRIPTION, set: |r, v| r.action_description = v },
    FieldSetter { key: FIELD_SUB_ACTION, set: |r, v| r.sub_action = v },
    FieldSetter { key: FIELD_MESSAGE, set: |r, v| r.message = Some(v) },
    FieldSetter { key: FIELD_APP_RESULT, set: |r, v| r.app_result = v },
    FieldSetter { key: FIELD_APP_RESULT_CODE, set: |r, v| r.app_result_code = v },
    FieldSetter { key: FIELD_APP_RESULT_HTTP_STATUS, set: |r, v| r.app_result_http_status = v },
    FieldSetter { key: FIELD_APP_RESULT_TYPE, set: |r, v| r.app_result_type = v },
    FieldSetter { key: FIELD_SEVERITY, set: |r, v| r.severity = v },
];

pub fn lookup(key: &str) -> Option<&'static FieldSetter> {
    UPDATABLE_FIELDS.iter().find(|f| f.key == key)
}

/// Set `key` on `record`
///
/// Returns `Ok(false)` for keys outside the schema. Strings are stored
/// as-is and numbers are stored in their decimal form (`"500"`), since
/// every updatable field is a string on the wire.
pub fn apply(record: &mut LogRecord, key: &str, value: Value) -> Result<bool> {
    let Some(field) = lookup(key) else {
        return Ok(false);
    };
    let text = match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => {
            return Err(KpLogError::InvalidFieldValue {
                key: key.to_string(),
                expected: "a string or number".to_string(),
            })
        }
    };
    (field.set)(record, text);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LogType;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_registry_keys_are_unique() {
        let keys: HashSet<_> = UPDATABLE_FIELDS.iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), UPDATABLE_FIELDS.len());
    }

    #[test]
    fn test_every_registered_key_is_a_wire_field() {
        for field in UPDATABLE_FIELDS {
            let mut record = LogRecord::new(LogType::Detail);
            assert!(apply(&mut record, field.key, json!("sample")).unwrap());

            let value = serde_json::to_value(&record).unwrap();
            assert_eq!(
                value.get(field.key),
                Some(&json!("sample")),
                "{} did not land on its wire field",
                field.key
            );
        }
    }

    #[test]
    fn test_engine_owned_fields_are_not_updatable() {
        for key in [FIELD_LOG_TYPE, FIELD_RESPONSE_TIME, FIELD_FLOW, FIELD_CUSTOM_FIELDS, FIELD_METADATA] {
            assert!(lookup(key).is_none(), "{} must not be updatable", key);
        }
    }

    #[test]
    fn test_numbers_are_stored_as_strings() {
        let mut record = LogRecord::new(LogType::Detail);
        assert!(apply(&mut record, FIELD_APP_RESULT_HTTP_STATUS, json!(404)).unwrap());
        assert_eq!(record.app_result_http_status, "404");
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut record = LogRecord::new(LogType::Detail);
        let before = record.clone();
        assert!(!apply(&mut record, "AppResultCode", json!("1")).unwrap());
        assert_eq!(record, before);
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        let mut record = LogRecord::new(LogType::Detail);
        let err = apply(&mut record, FIELD_SEVERITY, json!({"a": 1})).unwrap_err();
        assert!(matches!(err, KpLogError::InvalidFieldValue { .. }));
    }
}
