use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::call::InboundCall;

/// Snapshot of an HTTP call, logged once as the inbound detail record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IncomingRequest {
    pub url: String,
    pub ip: String,
    /// Multi-valued headers joined with `,`
    pub headers: BTreeMap<String, String>,
    pub method: String,
    pub params: BTreeMap<String, String>,
    pub query: BTreeMap<String, Vec<String>>,
    /// Parsed JSON object body; empty when absent or not a JSON object
    pub body: Map<String, Value>,
    /// Why a non-empty body could not be captured
    #[serde(skip)]
    body_error: Option<String>,
}

impl IncomingRequest {
    pub fn capture(call: &dyn InboundCall) -> Self {
        let parsed = match call.body() {
            Ok(raw) => parse_body(&raw),
            Err(err) => Err(err.to_string()),
        };
        let (body, body_error) = match parsed {
            Ok(body) => (body, None),
            Err(error) => {
                tracing::debug!(error = error.as_str(), "Inbound body not captured");
                (Map::new(), Some(error))
            }
        };

        Self {
            url: call.url().to_string(),
            ip: call.client_ip().to_string(),
            headers: call
                .headers()
                .into_iter()
                .map(|(name, values)| (name, values.join(",")))
                .collect(),
            method: call.method().to_string(),
            params: call.path_params(),
            query: call.query(),
            body,
            body_error,
        }
    }

    pub fn body_error(&self) -> Option<&str> {
        self.body_error.as_deref()
    }

    /// A capture without URL or method has nothing worth logging
    pub fn is_empty(&self) -> bool {
        self.url.is_empty() || self.method.is_empty()
    }
}

fn parse_body(raw: &str) -> Result<Map<String, Value>, String> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str(raw) {
        Ok(Value::Object(body)) => Ok(body),
        Ok(_) => Err("body is not a JSON object".to_string()),
        Err(err) => Err(err.to_string()),
    }
}
