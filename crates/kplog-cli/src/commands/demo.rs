//! Demo command
//!
//! Usage: kplog demo [--event <TOPIC>] [--fail]
//!
//! Runs one session against stdout so the detail and summary lines can be
//! inspected or piped into a log shipper.

use std::sync::Arc;

use clap::Args;
use kplog_core::context::{CallParts, RequestLog};
use kplog_core::model::{EventTag, LoggerAction};
use kplog_core::sink::{LogServices, LoggerService, WriterSink};
use kplog_core::{KpLogConfig, MaskingRule};
use serde_json::json;

const DEMO_BROKER: &str = "localhost:9092";
const DEMO_PRODUCE_TOPIC: &str = "order-events";

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Simulate a message consumed from TOPIC instead of an HTTP call
    #[arg(long, value_name = "TOPIC")]
    pub event: Option<String>,

    /// Make the unit of work fail
    #[arg(long)]
    pub fail: bool,
}

/// Execute demo command
pub fn execute(args: DemoArgs, config: &KpLogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stdout: Arc<dyn LoggerService> = Arc::new(WriterSink::stdout());
    let services = LogServices::new(
        stdout.clone(),
        stdout.clone(),
        stdout,
        Arc::new(config.masking_engine()),
    );

    match args.event {
        Some(topic) => run_event(&topic, args.fail, config, &services)?,
        None => run_http(args.fail, config, &services)?,
    }

    services.sync_all()?;
    Ok(())
}

fn run_http(
    fail: bool,
    config: &KpLogConfig,
    services: &LogServices,
) -> Result<(), Box<dyn std::error::Error>> {
    let call = CallParts::http("POST", "/v1/orders")
        .with_client_ip("127.0.0.1")
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "customer": {"email": "jane.doe@example.com"},
                "cardNumber": "4111111111111111",
                "amount": 42
            })
            .to_string(),
        );

    let mut request = RequestLog::start(&call, config, services);
    request.app_info(&"order received");
    request.log_inbound(&[
        MaskingRule::partial("body.cardNumber"),
        MaskingRule::email("body.customer.email"),
    ]);

    if fail {
        let session = request.log();
        session
            .set_summary(
                EventTag::new("payment", "charge")
                    .with_code("504")
                    .with_description("gateway timeout"),
            )
            .error(
                &LoggerAction::outbound("payment", "charge"),
                &json!({"error": "gateway timeout"}),
                &[],
            );
        session.update("appResultCode", "50400");
        session.update("appResultType", "SYSTEM_ERROR");
        request.app_error(&json!({"reason": "payment gateway timeout"}));
        request.reply(504, &json!({"error": "payment unavailable"}))?;
    } else {
        request.log().info(
            &LoggerAction::producing(DEMO_PRODUCE_TOPIC, "kafka_producer"),
            &json!({"orderId": "A-1001", "status": "created"}),
            &[],
        );
        request.log().add_field("orderId", "A-1001");
        request.reply(201, &json!({"orderId": "A-1001"}))?;
    }
    Ok(())
}

fn run_event(
    topic: &str,
    fail: bool,
    config: &KpLogConfig,
    services: &LogServices,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut call = CallParts::event(topic, DEMO_BROKER);
    call = if fail {
        call.with_body_error("unexpected end of JSON input")
    } else {
        call.with_body(json!({"orderId": "A-1001"}).to_string())
    };

    let mut request = RequestLog::start(&call, config, services);
    if fail {
        request.log().end(500, "unreadable message")?;
    } else {
        request.log().info(
            &LoggerAction::producing(DEMO_PRODUCE_TOPIC, "kafka_producer"),
            &json!({"orderId": "A-1001", "status": "processed"}),
            &[],
        );
        request.log().end(200, "")?;
    }
    Ok(())
}
