//! KpLog Core - request-scoped dual-channel structured logging
//!
//! Every inbound unit of work (an HTTP call or a consumed event) owns one
//! `LogSession` that:
//! - emits a detail line for every significant step (inbound, outbound,
//!   consuming, producing), with field-level masking of the payload
//! - accumulates the steps into a summary aggregate
//! - emits exactly one summary line when the unit of work ends, resolving
//!   result codes by override, then updated value, then default
//!
//! Lines are handed to injected `LoggerService` sinks as newline-delimited
//! JSON. The engine's own diagnostics go through `tracing`.

pub mod config;
pub mod context;
pub mod errors;
pub mod logging_facility;
pub mod masking;
pub mod model;
pub mod session;
pub mod sink;

pub use kplog_core_types::schema;

// Re-export commonly used types
pub use config::KpLogConfig;
pub use context::{CallParts, CorrelationContext, InboundCall, IncomingRequest, RequestLog};
pub use errors::{ExError, ExErrorKind, KpLogError, Result};
pub use masking::{mask, MaskingEngine, MaskingRule, MaskingService, MaskingType};
pub use model::{EventTag, FlowEntry, LogRecord, LogType, LoggerAction, ResolutionStack};
pub use session::LogSession;
pub use sink::{LogServices, LoggerService, MemorySink, WriterSink};
