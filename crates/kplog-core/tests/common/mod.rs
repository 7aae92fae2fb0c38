use std::sync::Arc;

use kplog_core::masking::MaskingEngine;
use kplog_core::model::{LogRecord, LogType};
use kplog_core::sink::{LogServices, MemorySink};
use kplog_core::LogSession;

/// One capturing sink per channel
#[allow(dead_code)]
pub struct Sinks {
    pub app: MemorySink,
    pub detail: MemorySink,
    pub summary: MemorySink,
}

/// Services whose channels are captured in memory
#[allow(dead_code)]
pub fn memory_services() -> (LogServices, Sinks) {
    let sinks = Sinks {
        app: MemorySink::new(),
        detail: MemorySink::new(),
        summary: MemorySink::new(),
    };
    let services = LogServices::new(
        Arc::new(sinks.app.clone()),
        Arc::new(sinks.detail.clone()),
        Arc::new(sinks.summary.clone()),
        Arc::new(MaskingEngine::new()),
    );
    (services, sinks)
}

/// Seed record with service identity filled in
#[allow(dead_code)]
pub fn seed(session_id: &str) -> LogRecord {
    let mut record = LogRecord::new(LogType::Detail);
    record.service_name = "orders".to_string();
    record.component_version = "1.4.0".to_string();
    record.instance = "host-a".to_string();
    record.session_id = session_id.to_string();
    record.request_id = format!("req-{}", session_id);
    record
}

/// A fresh session plus its captured channels
#[allow(dead_code)]
pub fn new_session(session_id: &str) -> (LogSession, Sinks) {
    let (services, sinks) = memory_services();
    (LogSession::new(seed(session_id), &services), sinks)
}
