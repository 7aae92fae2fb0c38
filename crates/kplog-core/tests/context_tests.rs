//! Request context
//!
//! Starting a request log captures correlation metadata from the inbound
//! call. HTTP calls are logged on demand through `log_inbound`; consumed
//! messages are logged immediately, including unreadable ones.

mod common;

use common::memory_services;
use kplog_core::context::{CallParts, RequestLog};
use kplog_core::masking::MaskingRule;
use kplog_core::model::{LoggerAction, Source};
use kplog_core::KpLogConfig;
use serde_json::{json, Value};

fn config() -> KpLogConfig {
    KpLogConfig {
        service_name: "orders".to_string(),
        component_version: "1.4.0".to_string(),
        instance: "host-a".to_string(),
        ..Default::default()
    }
}

fn http_call() -> CallParts {
    CallParts::http("POST", "/v1/orders")
        .with_client_ip("10.0.0.7")
        .with_session_id("sess-http")
        .with_request_id("req-http")
        .with_header("authorization", "Bearer abc.def")
        .with_body(r#"{"password": "hunter22", "qty": 2}"#)
}

#[test]
fn test_http_call_is_api_source_and_waits_for_log_inbound() {
    let (services, sinks) = memory_services();

    let request = RequestLog::start(&http_call(), &config(), &services);

    assert_eq!(request.correlation().source(), Source::Api);
    assert_eq!(request.correlation().broker(), "none");
    assert!(request.incoming().is_some());
    assert!(sinks.detail.is_empty());
}

#[test]
fn test_event_without_trace_headers_is_event_source() {
    let (services, sinks) = memory_services();
    let call = CallParts::event("orders", "kafka-1:9092").with_body(r#"{"id":1}"#);

    let request = RequestLog::start(&call, &config(), &services);

    let correlation = request.correlation();
    assert_eq!(correlation.source(), Source::EventSource);
    assert_eq!(correlation.broker(), "kafka-1:9092");
    assert_eq!(correlation.metadata().trace_id, "0".repeat(32));

    let line = &sinks.detail.json_lines()[0];
    assert_eq!(line["action"], "[CONSUMING]");
    assert_eq!(line["actionDescription"], "kafka_consumer");
    assert_eq!(line["metadata"]["source"], "event-source");
    assert_eq!(line["metadata"]["broker"], "kafka-1:9092");

    let message: Value = serde_json::from_str(line["message"].as_str().unwrap()).unwrap();
    assert_eq!(
        message,
        json!({"topic": "orders", "broker": "kafka-1:9092", "body": r#"{"id":1}"#})
    );

    let tag = &request.session().pending_events()[0];
    assert_eq!(tag.event_name(), "consumer.orders");
    assert_eq!(tag.code, "200");
}

#[test]
fn test_unreadable_event_body_is_recorded_as_500() {
    let (services, sinks) = memory_services();
    let call = CallParts::event("orders", "kafka-1:9092").with_body_error("unexpected EOF");

    let mut request = RequestLog::start(&call, &config(), &services);

    let tag = request.session().pending_events()[0].clone();
    assert_eq!(tag.code, "500");
    assert_eq!(tag.description, "unexpected EOF");
    assert_eq!(tag.result.as_deref(), Some("fail"));

    let detail = &sinks.detail.lines()[0];
    assert_eq!(detail.level, kplog_core::sink::LineLevel::Error);
    let message: Value = serde_json::from_str(
        sinks.detail.json_lines()[0]["message"].as_str().unwrap(),
    )
    .unwrap();
    assert_eq!(message["error"], "unexpected EOF");

    let summary = request.log().end(500, "unreadable message").unwrap();
    assert_eq!(summary.flow[0].event, "consumer.orders");
    assert_eq!(summary.flow[0].result, "fail");
}

#[test]
fn test_log_inbound_applies_default_and_call_masks_once() {
    let (services, sinks) = memory_services();
    let config = KpLogConfig {
        default_masking: vec![MaskingRule::full("headers.authorization")],
        ..config()
    };
    let mut request = RequestLog::start(&http_call(), &config, &services);

    request.log_inbound(&[MaskingRule::full("body.password")]);
    request.log_inbound(&[]);

    assert_eq!(sinks.detail.len(), 1);
    assert!(request.incoming().is_none());

    let line = &sinks.detail.json_lines()[0];
    assert_eq!(line["action"], "[INBOUND]");
    assert_eq!(line["subAction"], "client");
    assert_eq!(line["requestId"], "req-http");
    assert_eq!(line["metadata"]["clientIP"], "10.0.0.7");

    let message: Value = serde_json::from_str(line["message"].as_str().unwrap()).unwrap();
    assert_eq!(message["headers"]["authorization"], "********");
    assert_eq!(message["body"]["password"], "********");
    assert_eq!(message["body"]["qty"], 2);
    assert_eq!(message["method"], "POST");
}

#[test]
fn test_malformed_http_body_is_logged_as_failed_inbound() {
    let (services, sinks) = memory_services();
    let call = CallParts::http("POST", "/v1/orders")
        .with_request_id("req-bad-body")
        .with_body(r#"{"qty": "#);
    let mut request = RequestLog::start(&call, &config(), &services);

    request.log_inbound(&[]);

    let tag = request.session().pending_events()[0].clone();
    assert_eq!(tag.event_name(), "client.inbound");
    assert_eq!(tag.code, "500");
    assert!(!tag.description.is_empty());
    assert_eq!(tag.result.as_deref(), Some("fail"));

    assert_eq!(sinks.detail.lines()[0].level, kplog_core::sink::LineLevel::Error);
    let line = &sinks.detail.json_lines()[0];
    assert_eq!(line["action"], "[INBOUND]");
    let message: Value = serde_json::from_str(line["message"].as_str().unwrap()).unwrap();
    assert_eq!(message["body"], json!({}));

    let summary = request.reply(400, &json!({"error": "bad request"})).unwrap();
    assert_eq!(summary.flow[0].result, "fail");
}

#[test]
fn test_reply_logs_outbound_and_flushes() {
    let (services, sinks) = memory_services();
    let mut request = RequestLog::start(&http_call(), &config(), &services);
    request.log_inbound(&[]);
    request.log().info(
        &LoggerAction::producing("order-events", "kafka_producer"),
        &json!({"orderId": "A-1"}),
        &[],
    );

    let summary = request.reply(201, &json!({"orderId": "A-1"})).unwrap();

    assert_eq!(sinks.detail.len(), 3);
    assert_eq!(sinks.detail.json_lines()[2]["action"], "[OUTBOUND]");
    assert_eq!(sinks.summary.len(), 1);
    assert_eq!(summary.app_result_http_status, "201");
    assert_eq!(summary.session_id, "sess-http");
    let events: Vec<&str> = summary.flow.iter().map(|f| f.event.as_str()).collect();
    assert_eq!(
        events,
        vec!["client.inbound", "producer.order-events", "client.outbound"]
    );

    assert!(request.reply(500, &json!({})).is_err());
    assert_eq!(sinks.summary.len(), 1);
}

#[test]
fn test_app_log_lines_carry_correlation() {
    let (services, sinks) = memory_services();
    let request = RequestLog::start(&http_call(), &config(), &services);

    request.app_info(&"cache warm");
    request.app_error(&json!({"reason": "timeout"}));

    let lines = sinks.app.json_lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["logType"], "app");
    assert_eq!(lines[0]["logLevel"], "info");
    assert_eq!(lines[0]["message"], r#""cache warm""#);
    assert_eq!(lines[0]["serviceName"], "orders");
    assert_eq!(lines[0]["requestId"], "req-http");
    assert_eq!(lines[0]["sessionId"], "sess-http");
    assert_eq!(lines[1]["logLevel"], "error");
    assert_eq!(lines[1]["message"], r#"{"reason":"timeout"}"#);
    assert!(sinks.detail.is_empty());
}
