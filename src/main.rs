#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use eventbridge_handler::order_processor::{OrderDetail, OrderProcessor};
use eventbridge_handler::{
    Config, EventBridgeHandler, EventEnvelope, InvocationContext,
};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use tracing::error;

async fn function_handler(
    event: LambdaEvent<Option<EventEnvelope<OrderDetail>>>,
    handler: &EventBridgeHandler<OrderProcessor>,
) -> Result<(), Error> {
    let (envelope, context) = event.into_parts();
    let context = InvocationContext::from(context);

    if let Err(error) = handler.handle(envelope, &context).await {
        error!(
            { request_id = %context.request_id, error = format!("{:?}", error) },
            "Error in event handler"
        );

        return Err(error.into());
    }

    Ok(())
}

macro_rules! optional_env {
    ($name: literal) => {
        std::env::var($name)
            .ok()
            .map(|value| value.parse().context($name))
            .transpose()?
    };
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    if cfg!(debug_assertions) {
        dotenv().ok();
    }

    if cfg!(debug_assertions) {
        color_eyre::install()?;
        tracing_subscriber::fmt().pretty().init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::INFO)
            // disable printing the name of the module in every log line.
            .with_target(false)
            // disabling time is handy because CloudWatch will add the ingestion time.
            .without_time()
            .init();
    }

    let mut config = Config::new();

    if let Some(deadline_margin_ms) = optional_env!("DEADLINE_MARGIN_MS") {
        config.deadline_margin = Duration::from_millis(deadline_margin_ms);
    }

    if let Some(max_line_quantity) = optional_env!("ORDER_MAX_LINE_QUANTITY") {
        config.max_line_quantity = max_line_quantity;
    }

    let handler = EventBridgeHandler::new(
        OrderProcessor::from_config(&config),
        config,
    );

    if cfg!(debug_assertions) {
        let event_path = Path::new(env!("CARGO_MANIFEST_DIR"));

        let event_json = std::fs::read_to_string(event_path.join("event.json"))
            .context("event.json")?;

        let envelope: Option<EventEnvelope<OrderDetail>> =
            serde_json::from_str(event_json.as_str())?;

        handler
            .handle(envelope, &InvocationContext::default())
            .await?;
    } else {
        run(service_fn(|event| function_handler(event, &handler))).await?;
    }

    Ok(())
}
