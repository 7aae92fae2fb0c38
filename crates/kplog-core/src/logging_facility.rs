//! Diagnostics of the logging engine itself
//!
//! Detail, summary and app lines go to the injected sinks. Everything the
//! engine has to say about its own behavior (rejected updates, serialization
//! fallbacks, double flushes, session boundaries) goes through `tracing`:
//! - `init(profile)` installs the subscriber once
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` mark operation
//!   boundaries with the canonical `component`/`op`/`event` fields
//! - `test_capture` records events in memory for assertions
//!
//! # Usage
//!
//! ```rust
//! use kplog_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
