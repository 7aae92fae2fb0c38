pub mod action;
pub mod custom_fields;
pub mod event;
pub mod metadata;
pub mod record;
pub mod resolution;

pub use action::{ActionKind, LoggerAction};
pub use custom_fields::CustomFields;
pub use event::{EventTag, FlowEntry};
pub use metadata::{Metadata, Source};
pub use record::{LogRecord, LogType};
pub use resolution::ResolutionStack;
