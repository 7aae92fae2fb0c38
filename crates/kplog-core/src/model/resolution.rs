use serde::{Deserialize, Serialize};

/// Explicit overrides applied when the summary is flushed
///
/// Every field is optional; an absent field falls back to the value already
/// on the aggregate and then to the hard default.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStack {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_type: Option<String>,
    /// Accepted for wire compatibility; the summary's severity only comes
    /// from `init`/`update`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ResolutionStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = non_empty(status.into());
        self
    }

    pub fn with_result_type(mut self, result_type: impl Into<String>) -> Self {
        self.result_type = non_empty(result_type.into());
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = non_empty(severity.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = non_empty(message.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = non_empty(code.into());
        self
    }

    /// Field-wise merge where `self` wins over `staged`
    pub fn over(self, staged: ResolutionStack) -> ResolutionStack {
        ResolutionStack {
            status: self.status.or(staged.status),
            result_type: self.result_type.or(staged.result_type),
            severity: self.severity.or(staged.severity),
            message: self.message.or(staged.message),
            code: self.code.or(staged.code),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ResolutionStack::default()
    }
}

// An empty override string counts as absent
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_strings_are_absent() {
        let stack = ResolutionStack::new().with_code("").with_status("500");
        assert!(stack.code.is_none());
        assert_eq!(stack.status.as_deref(), Some("500"));
    }

    #[test]
    fn test_over_prefers_explicit_fields() {
        let staged = ResolutionStack::new()
            .with_code("40400")
            .with_message("staged");
        let explicit = ResolutionStack::new().with_code("50000");

        let merged = explicit.over(staged);

        assert_eq!(merged.code.as_deref(), Some("50000"));
        assert_eq!(merged.message.as_deref(), Some("staged"));
        assert!(merged.status.is_none());
    }
}
