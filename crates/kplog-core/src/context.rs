//! Request-scoped logging context
//!
//! `RequestLog` binds one inbound call to one `LogSession`. At start it
//! captures the correlation context and either emits the consuming record
//! of an event-stream message or keeps the HTTP request for `log_inbound`.

pub mod app_log;
pub mod call;
pub mod correlation;
pub mod incoming;

use std::sync::Arc;

use kplog_core_types::schema::{TAG_CODE_ERROR, TAG_CODE_OK};
use serde::Serialize;
use serde_json::json;

pub use app_log::AppLogLine;
pub use call::{CallParts, InboundCall};
pub use correlation::CorrelationContext;
pub use incoming::IncomingRequest;

use crate::config::KpLogConfig;
use crate::errors::Result;
use crate::masking::MaskingRule;
use crate::model::{EventTag, LogRecord, LoggerAction};
use crate::session::LogSession;
use crate::sink::{LineLevel, LogServices, LoggerService};

const TOPIC_PARAM: &str = "topic";
const CONSUMER_NODE: &str = "consumer";
const CONSUMER_DESCRIPTION: &str = "kafka_consumer";
const CLIENT_NODE: &str = "client";

/// Logging state of one inbound call
pub struct RequestLog {
    correlation: CorrelationContext,
    session: LogSession,
    incoming: Option<IncomingRequest>,
    default_masking: Vec<MaskingRule>,
    service_name: String,
    app: Arc<dyn LoggerService>,
}

impl RequestLog {
    /// Open the session for `call`
    ///
    /// Never fails: an unreadable event body is recorded as a failed
    /// consuming step instead of aborting the session.
    pub fn start(call: &dyn InboundCall, config: &KpLogConfig, services: &LogServices) -> Self {
        let correlation = CorrelationContext::capture(call);
        let mut session = LogSession::new(config.seed_record(&correlation), services);

        let incoming = if correlation.is_http() {
            Some(IncomingRequest::capture(call))
        } else {
            log_consumed(&mut session, call, correlation.broker());
            None
        };

        Self {
            correlation,
            session,
            incoming,
            default_masking: config.default_masking.clone(),
            service_name: config.service_name.clone(),
            app: services.app.clone(),
        }
    }

    pub fn correlation(&self) -> &CorrelationContext {
        &self.correlation
    }

    /// HTTP request captured at start and not yet logged
    pub fn incoming(&self) -> Option<&IncomingRequest> {
        self.incoming.as_ref()
    }

    /// Emit the captured HTTP request as the inbound detail record
    ///
    /// Configured default rules apply ahead of `masks`. Only the first call
    /// emits; later calls just return the session. A body that could not be
    /// parsed is logged at error level with a `500` tag carrying the reason.
    pub fn log_inbound(&mut self, masks: &[MaskingRule]) -> &mut LogSession {
        if let Some(incoming) = self.incoming.take().filter(|i| !i.is_empty()) {
            let rules: Vec<MaskingRule> = self
                .default_masking
                .iter()
                .chain(masks)
                .cloned()
                .collect();
            let action = LoggerAction::inbound(CLIENT_NODE, "");
            match incoming.body_error() {
                None => self.session.info(&action, &incoming, &rules),
                Some(error) => {
                    let tag = action
                        .default_tag()
                        .with_code(TAG_CODE_ERROR)
                        .with_description(error);
                    self.session.set_summary(tag).error(&action, &incoming, &rules);
                }
            }
        }
        &mut self.session
    }

    pub fn log(&mut self) -> &mut LogSession {
        &mut self.session
    }

    pub fn session(&self) -> &LogSession {
        &self.session
    }

    /// Log the response sent to the client and end the session with `status`
    ///
    /// # Errors
    ///
    /// Returns `AlreadyFlushed` if the session was already ended.
    pub fn reply<T: Serialize + ?Sized>(&mut self, status: u16, payload: &T) -> Result<LogRecord> {
        self.session
            .info(&LoggerAction::outbound(CLIENT_NODE, ""), payload, &[]);
        self.session.end(status, "")
    }

    pub fn app_info<T: Serialize + ?Sized>(&self, msg: &T) {
        self.app.info(&self.app_line(LineLevel::Info, msg));
    }

    pub fn app_debug<T: Serialize + ?Sized>(&self, msg: &T) {
        self.app.debug(&self.app_line(LineLevel::Debug, msg));
    }

    pub fn app_error<T: Serialize + ?Sized>(&self, msg: &T) {
        self.app.error(&self.app_line(LineLevel::Error, msg));
    }

    fn app_line<T: Serialize + ?Sized>(&self, level: LineLevel, msg: &T) -> String {
        AppLogLine::new(
            level,
            msg,
            &self.service_name,
            self.correlation.request_id().as_str(),
            self.correlation.session_id().as_str(),
        )
        .to_line()
    }
}

impl std::fmt::Debug for RequestLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLog")
            .field("correlation", &self.correlation)
            .field("session", &self.session)
            .field("incoming", &self.incoming)
            .finish_non_exhaustive()
    }
}

/// Record the consumed message as the session's first step
fn log_consumed(session: &mut LogSession, call: &dyn InboundCall, broker: &str) {
    let topic = call.param(TOPIC_PARAM).unwrap_or_default().to_string();
    let action = LoggerAction::consuming(&topic, CONSUMER_DESCRIPTION);
    let tag = EventTag::new(CONSUMER_NODE, &topic);

    match call.body() {
        Ok(body) => {
            session.set_summary(tag.with_code(TAG_CODE_OK)).info(
                &action,
                &json!({ "topic": topic, "broker": broker, "body": body }),
                &[],
            );
        }
        Err(err) => {
            let error = err.to_string();
            session
                .set_summary(tag.with_code(TAG_CODE_ERROR).with_description(&error))
                .error(
                    &action,
                    &json!({ "topic": topic, "broker": broker, "error": error }),
                    &[],
                );
        }
    }
}
