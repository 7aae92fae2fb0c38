//! Core types shared across the kplog crates
//!
//! This crate provides the leaf types used by the logging engine:
//!
//! - **Correlation types**: TraceId, SpanId, RequestId, SessionId, CorrelationId, TraceContext
//! - **Sensitive data**: Sensitive<T> marker for automatic redaction
//! - **Schema constants**: Canonical wire field names and enumerated values

pub mod correlation;
pub mod schema;
pub mod sensitive;

pub use correlation::{CorrelationId, RequestId, SessionId, SpanId, TraceContext, TraceId};
pub use sensitive::Sensitive;
