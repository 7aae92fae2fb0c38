use kplog_core_types::schema::BROKER_NONE;
use kplog_core_types::{RequestId, SessionId, TraceContext};

use super::call::InboundCall;
use crate::model::{Metadata, Source};

/// Identifiers and client metadata frozen at session start
///
/// Read-only once captured.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationContext {
    session_id: SessionId,
    request_id: RequestId,
    trace: TraceContext,
    metadata: Metadata,
}

impl CorrelationContext {
    /// Capture the context of an inbound call
    ///
    /// A call with a responder is an `api` call on broker `none`; anything
    /// else is an `event-source` message whose broker is the host name.
    /// Missing session or request ids are generated.
    pub fn capture(call: &dyn InboundCall) -> Self {
        let (source, broker) = if call.has_responder() {
            (Source::Api, BROKER_NONE.to_string())
        } else {
            (Source::EventSource, call.host_name().to_string())
        };

        let trace = call.trace_context();
        let metadata = Metadata {
            client_ip: call.client_ip().to_string(),
            user_agent: call.user_agent().to_string(),
            referer: call.referer().to_string(),
            method: call.method().to_string(),
            url: call.url().to_string(),
            source,
            broker,
            trace_id: trace.trace_id.to_string(),
            span_id: trace.span_id.to_string(),
        };

        Self {
            session_id: call
                .session_id()
                .filter(|id| !id.is_empty())
                .map(SessionId::from_string)
                .unwrap_or_default(),
            request_id: call
                .request_id()
                .filter(|id| !id.is_empty())
                .map(RequestId::from_string)
                .unwrap_or_default(),
            trace,
            metadata,
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn trace(&self) -> &TraceContext {
        &self.trace
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn source(&self) -> Source {
        self.metadata.source
    }

    pub fn broker(&self) -> &str {
        &self.metadata.broker
    }

    pub fn is_http(&self) -> bool {
        self.metadata.source == Source::Api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::CallParts;

    #[test]
    fn test_http_call_is_api_source() {
        let ctx = CorrelationContext::capture(&CallParts::http("POST", "/orders"));
        assert_eq!(ctx.source(), Source::Api);
        assert_eq!(ctx.broker(), "none");
        assert!(ctx.is_http());
    }

    #[test]
    fn test_event_call_uses_host_as_broker() {
        let ctx = CorrelationContext::capture(&CallParts::event("orders", "kafka-1:9092"));
        assert_eq!(ctx.source(), Source::EventSource);
        assert_eq!(ctx.broker(), "kafka-1:9092");
        assert_eq!(ctx.metadata().method, "orders");
    }

    #[test]
    fn test_ids_are_kept_or_generated() {
        let ctx = CorrelationContext::capture(
            &CallParts::http("GET", "/").with_session_id("sess-9"),
        );
        assert_eq!(ctx.session_id().as_str(), "sess-9");
        assert!(!ctx.request_id().as_str().is_empty());
    }

    #[test]
    fn test_missing_trace_headers_yield_zero_ids() {
        let ctx = CorrelationContext::capture(&CallParts::http("GET", "/"));
        assert_eq!(ctx.metadata().trace_id, "0".repeat(32));
        assert_eq!(ctx.metadata().span_id, "0".repeat(16));
    }
}
