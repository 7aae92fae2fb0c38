use kplog_core_types::schema::{SOURCE_API, SOURCE_EVENT};
use serde::{Deserialize, Serialize};

/// Boundary the unit of work entered through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Source {
    /// An HTTP call answered through a response writer
    #[default]
    #[serde(rename = "api")]
    Api,
    /// A message consumed from an event stream
    #[serde(rename = "event-source")]
    EventSource,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Api => SOURCE_API,
            Source::EventSource => SOURCE_EVENT,
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client and tracing metadata captured once at session start
///
/// For event-stream calls `method` holds the consumer topic and `url` the
/// broker address, mirroring what the transport reports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(rename = "clientIP")]
    pub client_ip: String,
    pub user_agent: String,
    pub referer: String,
    pub method: String,
    pub url: String,
    pub source: Source,
    pub broker: String,
    pub trace_id: String,
    pub span_id: String,
}
