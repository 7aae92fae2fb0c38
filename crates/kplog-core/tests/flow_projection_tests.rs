//! Flow projection
//!
//! Every detail emission appends one event tag; the summary projects the
//! tags to `{event, result}` entries in emission order.

mod common;

use common::new_session;
use kplog_core::model::{EventTag, FlowEntry, LoggerAction, ResolutionStack};
use serde_json::json;

#[test]
fn test_three_emissions_project_in_order() {
    let (mut session, sinks) = new_session("sess-flow");
    let consume = LoggerAction::consuming("topicA", "kafka_consumer");
    let produce = LoggerAction::producing("topicB", "kafka_producer");

    session
        .set_summary(EventTag::new("consumer", "topicA").with_result("ok"))
        .info(&consume, &json!({"n": 1}), &[]);
    session
        .set_summary(EventTag::new("consumer", "topicA").with_result("ok"))
        .info(&consume, &json!({"n": 2}), &[]);
    session
        .set_summary(EventTag::new("producer", "topicB").with_result("fail"))
        .error(&produce, &json!({"error": "broker down"}), &[]);

    let summary = session.flush(ResolutionStack::default()).unwrap();

    assert_eq!(
        summary.flow,
        vec![
            FlowEntry::new("consumer.topicA", "ok"),
            FlowEntry::new("consumer.topicA", "ok"),
            FlowEntry::new("producer.topicB", "fail"),
        ]
    );
    assert_eq!(
        sinks.summary.json_lines()[0]["flow"],
        json!([
            {"event": "consumer.topicA", "result": "ok"},
            {"event": "consumer.topicA", "result": "ok"},
            {"event": "producer.topicB", "result": "fail"}
        ])
    );
    assert_eq!(sinks.detail.len(), 3);
}

#[test]
fn test_default_tags_come_from_the_action() {
    let (mut session, _sinks) = new_session("sess-default-tags");

    session.info(&LoggerAction::inbound("client", ""), &json!({}), &[]);
    session.info(&LoggerAction::outbound("payment", "charge"), &json!({}), &[]);
    session.error(&LoggerAction::producing("audit", ""), &json!({}), &[]);
    session.info(&LoggerAction::outbound("client", ""), &json!({}), &[]);

    let summary = session.flush(ResolutionStack::default()).unwrap();

    assert_eq!(
        summary.flow,
        vec![
            FlowEntry::new("client.inbound", "success"),
            FlowEntry::new("payment.charge", "success"),
            FlowEntry::new("producer.audit", "fail"),
            FlowEntry::new("client.outbound", "success"),
        ]
    );
}

#[test]
fn test_staged_tag_is_consumed_by_one_emission() {
    let (mut session, _sinks) = new_session("sess-staged-tag");
    let action = LoggerAction::outbound("payment", "charge");

    session
        .set_summary(EventTag::new("payment", "refund").with_code("404"))
        .info(&action, &json!({}), &[]);
    session.info(&action, &json!({}), &[]);

    let events = session.pending_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].event_name(), "payment.refund");
    assert_eq!(events[0].code, "404");
    assert_eq!(events[0].result.as_deref(), Some("fail"));
    assert_eq!(events[1].event_name(), "payment.charge");
    assert_eq!(events[1].code, "200");
}

#[test]
fn test_no_emissions_means_no_flow() {
    let (mut session, sinks) = new_session("sess-no-flow");

    let summary = session.flush(ResolutionStack::default()).unwrap();

    assert!(summary.flow.is_empty());
    assert!(sinks.summary.json_lines()[0].get("flow").is_none());
}

#[test]
fn test_sequence_is_discarded_after_projection() {
    let (mut session, _sinks) = new_session("sess-discard");
    session.info(&LoggerAction::inbound("client", ""), &json!({}), &[]);

    session.flush(ResolutionStack::default()).unwrap();

    assert!(session.pending_events().is_empty());
}
