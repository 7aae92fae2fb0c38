use kplog_core::errors::{ExError, ExErrorKind, KpLogError};

#[test]
fn test_already_flushed_verifiable_by_kind() {
    let err = KpLogError::AlreadyFlushed {
        session_id: "sess-1".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::TerminalStateViolation);
    assert_eq!(ex_err.code(), "ERR_ALREADY_FLUSHED");
    assert_eq!(ex_err.op(), Some("flush"));
    assert_eq!(ex_err.session_id().map(|s| s.as_str()), Some("sess-1"));
}

#[test]
fn test_retired_distinct_from_already_flushed() {
    let err = KpLogError::SessionRetired {
        session_id: "sess-2".to_string(),
        op: "init".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::SessionRetired);
    assert_ne!(ex_err.kind(), ExErrorKind::TerminalStateViolation);
    assert_eq!(ex_err.op(), Some("init"));
}

#[test]
fn test_invalid_field_value_structured_fields() {
    let err = KpLogError::InvalidFieldValue {
        key: "severity".to_string(),
        expected: "a string or number".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert!(ex_err.message().contains("severity"));
}

#[test]
fn test_error_kind_code_mapping() {
    // Test that each kind has a stable, unique code
    let kinds = vec![
        (ExErrorKind::TerminalStateViolation, "ERR_ALREADY_FLUSHED"),
        (ExErrorKind::SessionRetired, "ERR_SESSION_RETIRED"),
        (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Config, "ERR_CONFIG"),
        (ExErrorKind::Sink, "ERR_SINK"),
    ];

    let mut codes: Vec<&str> = kinds.iter().map(|(kind, _)| kind.code()).collect();
    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), 6, "codes must be unique");
}

#[test]
fn test_io_error_maps_to_sink() {
    let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
    let err: KpLogError = io.into();

    assert!(matches!(err, KpLogError::Sink(ref msg) if msg.contains("pipe closed")));
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.code(), "ERR_SINK");
}

#[test]
fn test_display_is_human_readable() {
    let err = KpLogError::AlreadyFlushed {
        session_id: "sess-9".to_string(),
    };
    assert_eq!(err.to_string(), "Summary already flushed for session sess-9");

    let ex_err: ExError = err.into();
    assert_eq!(
        ex_err.to_string(),
        "[ERR_ALREADY_FLUSHED] in operation 'flush': Summary already flushed (session_id: sess-9)"
    );
}
