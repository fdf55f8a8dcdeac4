use std::time::Duration;

use notify_core::contract::{ExecutionRequest, WorkerResponse};
use notify_core::elapsed::ElapsedTime;
use notify_core::message::build_completion_message;
use serde_json::Value;

use crate::adapters::clock::Clock;
use crate::adapters::webhook::WebhookSink;
use crate::error::WorkerError;

/// Waits `delay`, then reports the time since the execution's start date to
/// the webhook. Failures are logged and returned unchanged so the
/// orchestrator sees a failed step.
pub async fn handle_worker_event<W, C>(
    payload: Value,
    environment: &str,
    delay: Duration,
    clock: &C,
    sink: &W,
) -> Result<WorkerResponse, WorkerError>
where
    W: WebhookSink + Sync,
    C: Clock + Sync,
{
    let result = process_execution(payload, environment, delay, clock, sink).await;
    if let Err(error) = &result {
        tracing::error!(error = %error, "background processing failed");
    }
    result
}

async fn process_execution<W, C>(
    payload: Value,
    environment: &str,
    delay: Duration,
    clock: &C,
    sink: &W,
) -> Result<WorkerResponse, WorkerError>
where
    W: WebhookSink + Sync,
    C: Clock + Sync,
{
    let request: ExecutionRequest = serde_json::from_value(payload)?;
    let start_date = request.start_date;

    tracing::info!(start_date, "starting background processing");
    tokio::time::sleep(delay).await;

    let elapsed = ElapsedTime::between(start_date, clock.now_millis());
    if elapsed.was_clamped() {
        tracing::warn!(
            start_date,
            "worker clock is behind the start date; reporting zero elapsed time"
        );
    }

    let message = build_completion_message(environment, elapsed);
    sink.deliver(&message).await?;

    tracing::info!(
        start_date,
        elapsed_ms = elapsed.as_millis(),
        "notification delivered"
    );
    Ok(WorkerResponse::succeeded())
}
