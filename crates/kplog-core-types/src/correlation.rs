//! Correlation types for request tracking and tracing
//!
//! These identifiers are captured once when a logging session starts and
//! are carried unchanged on every detail and summary record the session
//! emits.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TRACE_ID_HEX_LEN: usize = 32;
const SPAN_ID_HEX_LEN: usize = 16;

/// Declares an opaque string identifier generated from a UUIDv7.
macro_rules! uuid_string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a new random identifier using UUIDv7
            pub fn new() -> Self {
                Self(Uuid::now_v7().to_string())
            }

            /// Get the string representation
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Create from an existing string (e.g. an inbound header)
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_string_id!(
    /// Unique identifier for a single inbound request
    RequestId
);

uuid_string_id!(
    /// Identifier of the caller's session, usually propagated by a header
    SessionId
);

uuid_string_id!(
    /// Per-session worker identifier stamped as `threadId` on emitted records
    ///
    /// Used for log-line correlation only. It is generated at session
    /// creation and never derived from runtime thread identifiers.
    CorrelationId
);

/// W3C trace identifier (32 lowercase hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceId(String);

impl TraceId {
    /// Generate a new random TraceId
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// The all-zero id reported when no trace context is present
    pub fn zero() -> Self {
        Self("0".repeat(TRACE_ID_HEX_LEN))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn is_zero(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// W3C span identifier (16 lowercase hex characters)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpanId(String);

impl SpanId {
    /// Generate a new random SpanId
    pub fn new() -> Self {
        let mut hex = Uuid::new_v4().simple().to_string();
        hex.truncate(SPAN_ID_HEX_LEN);
        Self(hex)
    }

    /// The all-zero id reported when no trace context is present
    pub fn zero() -> Self {
        Self("0".repeat(SPAN_ID_HEX_LEN))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Default for SpanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SpanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Distributed tracing identifiers for the current unit of work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    pub trace_id: TraceId,
    pub span_id: SpanId,
    pub sampled: bool,
}

impl TraceContext {
    /// Context used when the inbound call carries no trace headers
    pub fn empty() -> Self {
        Self {
            trace_id: TraceId::zero(),
            span_id: SpanId::zero(),
            sampled: false,
        }
    }

    /// Parse a W3C `traceparent` header value
    ///
    /// Format: `<version>-<trace-id>-<parent-id>-<flags>`, all lowercase hex.
    /// Returns `None` for malformed values and for the all-zero ids, which
    /// the format declares invalid.
    pub fn from_traceparent(header: &str) -> Option<Self> {
        let mut parts = header.trim().split('-');
        let version = parts.next()?;
        let trace_id = parts.next()?;
        let span_id = parts.next()?;
        let flags = parts.next()?;

        if version.len() != 2 || version == "ff" || !is_lower_hex(version) {
            return None;
        }
        // Version 00 has exactly four fields
        if version == "00" && parts.next().is_some() {
            return None;
        }
        if trace_id.len() != TRACE_ID_HEX_LEN || !is_lower_hex(trace_id) {
            return None;
        }
        if span_id.len() != SPAN_ID_HEX_LEN || !is_lower_hex(span_id) {
            return None;
        }
        if flags.len() != 2 || !is_lower_hex(flags) {
            return None;
        }

        let trace_id = TraceId::from_string(trace_id);
        let span_id = SpanId::from_string(span_id);
        if trace_id.is_zero() || span_id.as_str().bytes().all(|b| b == b'0') {
            return None;
        }

        let sampled = u8::from_str_radix(flags, 16).ok()? & 0x01 == 0x01;
        Some(Self {
            trace_id,
            span_id,
            sampled,
        })
    }
}

impl Default for TraceContext {
    fn default() -> Self {
        Self::empty()
    }
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
