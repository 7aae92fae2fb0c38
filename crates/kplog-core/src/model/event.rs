use serde::{Deserialize, Serialize};

/// One step of the unit of work as seen by the summary channel
///
/// Produced by every detail emission and appended, never mutated, to the
/// aggregator's pending sequence. `result` is resolved at emission time
/// when the caller leaves it unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventTag {
    pub node: String,
    pub command: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl EventTag {
    pub fn new(node: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            command: command.into(),
            ..Default::default()
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_result(mut self, result: impl Into<String>) -> Self {
        self.result = Some(result.into());
        self
    }

    /// `node.command`, the event name used in the summary flow
    pub fn event_name(&self) -> String {
        format!("{}.{}", self.node, self.command)
    }

    /// Read-only projection used by the summary record
    pub fn to_flow_entry(&self) -> FlowEntry {
        FlowEntry {
            event: self.event_name(),
            result: self.result.clone().unwrap_or_default(),
        }
    }
}

/// Normalized entry of a summary record's `flow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEntry {
    pub event: String,
    pub result: String,
}

impl FlowEntry {
    pub fn new(event: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            result: result.into(),
        }
    }
}
