use lambda_runtime::{service_fn, Error, LambdaEvent};
use notify_lambda::adapters::clock::SystemClock;
use notify_lambda::adapters::orchestrator::StepFunctionsStarter;
use notify_lambda::adapters::webhook::HttpWebhookSink;
use notify_lambda::config::{InitiatorConfig, WorkerConfig};
use notify_lambda::handlers::initiator::handle_initiator_event;
use notify_lambda::handlers::worker::handle_worker_event;
use serde_json::Value;

struct RuntimeDependencies {
    initiator: InitiatorConfig,
    worker: WorkerConfig,
    starter: StepFunctionsStarter,
    sink: HttpWebhookSink,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<Value, Error> {
    if is_worker_event(&event.payload) {
        let response = handle_worker_event(
            event.payload,
            &deps.worker.environment,
            deps.worker.delay,
            &SystemClock,
            &deps.sink,
        )
        .await?;
        serde_json::to_value(response)
            .map_err(|error| Error::from(format!("failed to serialize worker response: {error}")))
    } else {
        let response = handle_initiator_event(
            &event.context.request_id,
            &deps.initiator.environment,
            &deps.starter,
            &SystemClock,
        )
        .await;
        serde_json::to_value(response)
            .map_err(|error| Error::from(format!("failed to serialize api response: {error}")))
    }
}

/// Orchestrator task invocations carry the execution input at the top level;
/// API Gateway proxy events never do.
fn is_worker_event(event: &Value) -> bool {
    event
        .get("startDate")
        .map(Value::is_number)
        .unwrap_or(false)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let initiator = InitiatorConfig::from_env()?;
    let worker = WorkerConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        starter: StepFunctionsStarter::new(
            aws_sdk_sfn::Client::new(&aws_config),
            initiator.state_machine_arn.clone(),
        ),
        sink: HttpWebhookSink::new(reqwest::Client::new(), worker.webhook_url.clone()),
        initiator,
        worker,
    };

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, deps).await
    }))
    .await
}
