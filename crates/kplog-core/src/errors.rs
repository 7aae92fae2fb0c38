use kplog_core_types::{RequestId, SessionId};
use thiserror::Error;

/// Result type alias using KpLogError
pub type Result<T> = std::result::Result<T, KpLogError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling
/// and assertions in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Session lifecycle
    /// A second terminal flush was attempted on a retired session
    TerminalStateViolation,
    /// A non-terminal operation was attempted on a retired session
    SessionRetired,

    // Input
    InvalidInput,

    // Integration/IO
    Serialization,
    Config,
    Sink,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::TerminalStateViolation => "ERR_ALREADY_FLUSHED",
            ExErrorKind::SessionRetired => "ERR_SESSION_RETIRED",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Sink => "ERR_SINK",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling and the
/// correlation identifiers of the session the error belongs to.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    session_id: Option<SessionId>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            session_id: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add session ID context
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(session_id) = &self.session_id {
            write!(f, " (session_id: {})", session_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Errors reported by the logging engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KpLogError {
    /// `flush` was called on a session whose summary was already emitted
    #[error("Summary already flushed for session {session_id}")]
    AlreadyFlushed { session_id: String },

    /// A mutating operation was attempted after the session was retired
    #[error("Session {session_id} is retired; '{op}' is not allowed after flush")]
    SessionRetired { session_id: String, op: String },

    /// A schema field was updated with a value of the wrong shape
    #[error("Invalid value for field '{key}': expected {expected}")]
    InvalidFieldValue { key: String, expected: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// The sink reported a failure (only surfaced by `sync`)
    #[error("Sink error: {0}")]
    Sink(String),
}

impl From<KpLogError> for ExError {
    fn from(err: KpLogError) -> Self {
        match err {
            KpLogError::AlreadyFlushed { session_id } => {
                ExError::new(ExErrorKind::TerminalStateViolation)
                    .with_op("flush")
                    .with_session_id(SessionId::from_string(session_id))
                    .with_message("Summary already flushed")
            }

            KpLogError::SessionRetired { session_id, op } => {
                ExError::new(ExErrorKind::SessionRetired)
                    .with_op(op)
                    .with_session_id(SessionId::from_string(session_id))
                    .with_message("Session is retired")
            }

            KpLogError::InvalidFieldValue { key, expected } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("update")
                    .with_message(format!("Field '{}' expects {}", key, expected))
            }

            KpLogError::Serialization(message) => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            KpLogError::Config(message) => ExError::new(ExErrorKind::Config).with_message(message),

            KpLogError::Sink(message) => ExError::new(ExErrorKind::Sink).with_message(message),
        }
    }
}

impl From<serde_json::Error> for KpLogError {
    fn from(err: serde_json::Error) -> Self {
        KpLogError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for KpLogError {
    fn from(err: config::ConfigError) -> Self {
        KpLogError::Config(err.to_string())
    }
}

impl From<std::io::Error> for KpLogError {
    fn from(err: std::io::Error) -> Self {
        KpLogError::Sink(err.to_string())
    }
}
