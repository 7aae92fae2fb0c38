use std::collections::BTreeMap;
use std::io;

use kplog_core_types::TraceContext;

const TRACEPARENT_HEADER: &str = "traceparent";

/// What the engine reads from an inbound HTTP call or event-stream message
///
/// Implemented by the transport layer. `has_responder` distinguishes an
/// HTTP call answered through a response writer from a consumed message.
pub trait InboundCall {
    fn client_ip(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn referer(&self) -> &str;
    /// HTTP method, or the consumer topic for event-stream messages
    fn method(&self) -> &str;
    /// Request URL, or the broker address for event-stream messages
    fn url(&self) -> &str;
    fn host_name(&self) -> &str;
    fn session_id(&self) -> Option<&str>;
    fn request_id(&self) -> Option<&str>;
    fn param(&self, name: &str) -> Option<&str>;
    fn path_params(&self) -> BTreeMap<String, String>;
    fn query(&self) -> BTreeMap<String, Vec<String>>;
    fn headers(&self) -> BTreeMap<String, Vec<String>>;
    fn body(&self) -> io::Result<String>;
    fn has_responder(&self) -> bool;

    /// Trace identifiers propagated with the call
    ///
    /// Defaults to the `traceparent` header, and to the all-zero ids when
    /// the header is absent or malformed.
    fn trace_context(&self) -> TraceContext {
        self.headers()
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(TRACEPARENT_HEADER))
            .and_then(|(_, values)| values.first())
            .and_then(|value| TraceContext::from_traceparent(value))
            .unwrap_or_else(TraceContext::empty)
    }
}

/// Owned `InboundCall` for transports that decode a call up front
#[derive(Debug, Clone)]
pub struct CallParts {
    pub client_ip: String,
    pub user_agent: String,
    pub referer: String,
    pub method: String,
    pub url: String,
    pub host_name: String,
    pub session_id: Option<String>,
    pub request_id: Option<String>,
    pub params: BTreeMap<String, String>,
    pub path_params: BTreeMap<String, String>,
    pub query: BTreeMap<String, Vec<String>>,
    pub headers: BTreeMap<String, Vec<String>>,
    /// Raw body, or the error text of a failed body read
    pub body: Result<String, String>,
    pub responder: bool,
}

impl CallParts {
    /// An HTTP call that will be answered through a response writer
    pub fn http(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            responder: true,
            ..Default::default()
        }
    }

    /// A message consumed from `topic` on `broker`
    pub fn event(topic: impl Into<String>, broker: impl Into<String>) -> Self {
        let topic = topic.into();
        let broker = broker.into();
        let mut params = BTreeMap::new();
        params.insert("topic".to_string(), topic.clone());
        Self {
            method: topic,
            url: broker.clone(),
            host_name: broker,
            params,
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Ok(body.into());
        self
    }

    pub fn with_body_error(mut self, error: impl Into<String>) -> Self {
        self.body = Err(error.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.entry(name.into()).or_default().push(value.into());
        self
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn with_client_ip(mut self, client_ip: impl Into<String>) -> Self {
        self.client_ip = client_ip.into();
        self
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl Default for CallParts {
    fn default() -> Self {
        Self {
            client_ip: String::new(),
            user_agent: String::new(),
            referer: String::new(),
            method: String::new(),
            url: String::new(),
            host_name: String::new(),
            session_id: None,
            request_id: None,
            params: BTreeMap::new(),
            path_params: BTreeMap::new(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: Ok(String::new()),
            responder: false,
        }
    }
}

impl InboundCall for CallParts {
    fn client_ip(&self) -> &str {
        &self.client_ip
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn referer(&self) -> &str {
        &self.referer
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn host_name(&self) -> &str {
        &self.host_name
    }

    fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    fn path_params(&self) -> BTreeMap<String, String> {
        self.path_params.clone()
    }

    fn query(&self) -> BTreeMap<String, Vec<String>> {
        self.query.clone()
    }

    fn headers(&self) -> BTreeMap<String, Vec<String>> {
        self.headers.clone()
    }

    fn body(&self) -> io::Result<String> {
        self.body
            .clone()
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    fn has_responder(&self) -> bool {
        self.responder
    }
}
