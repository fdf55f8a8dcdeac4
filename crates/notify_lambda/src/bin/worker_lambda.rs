use lambda_runtime::{service_fn, Error, LambdaEvent};
use notify_core::contract::WorkerResponse;
use notify_lambda::adapters::clock::SystemClock;
use notify_lambda::adapters::webhook::HttpWebhookSink;
use notify_lambda::config::WorkerConfig;
use notify_lambda::handlers::worker::handle_worker_event;
use serde_json::Value;

struct RuntimeDependencies {
    config: WorkerConfig,
    sink: HttpWebhookSink,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<WorkerResponse, Error> {
    handle_worker_event(
        event.payload,
        &deps.config.environment,
        deps.config.delay,
        &SystemClock,
        &deps.sink,
    )
    .await
    .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let config = WorkerConfig::from_env()?;
    let sink = HttpWebhookSink::new(reqwest::Client::new(), config.webhook_url.clone());
    let deps = RuntimeDependencies { config, sink };

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, deps).await
    }))
    .await
}
