//! Field-level masking of sensitive values
//!
//! - `MaskingType`: the closed set of redaction kinds
//! - `MaskingEngine`: pure `(value, type) -> String` masking
//! - `MaskingRule`: a field selector paired with a type, applied to JSON payloads
//!
//! Masking is stateless and deterministic for a given `(value, type)` pair,
//! so one engine is shared by every session.

pub mod engine;
pub mod rule;

pub use engine::{mask, MaskingEngine, MaskingService, MaskingType};
pub use rule::{apply_rules, MaskingRule};
