use lambda_runtime::{service_fn, Error, LambdaEvent};
use notify_lambda::adapters::clock::SystemClock;
use notify_lambda::adapters::orchestrator::StepFunctionsStarter;
use notify_lambda::config::InitiatorConfig;
use notify_lambda::handlers::initiator::{handle_initiator_event, ApiGatewayResponse};
use serde_json::Value;

struct RuntimeDependencies {
    environment: String,
    starter: StepFunctionsStarter,
}

async fn handle_request(
    event: LambdaEvent<Value>,
    deps: &RuntimeDependencies,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_initiator_event(
        &event.context.request_id,
        &deps.environment,
        &deps.starter,
        &SystemClock,
    )
    .await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();

    let config = InitiatorConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let deps = RuntimeDependencies {
        environment: config.environment,
        starter: StepFunctionsStarter::new(
            aws_sdk_sfn::Client::new(&aws_config),
            config.state_machine_arn,
        ),
    };

    let deps = &deps;
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, deps).await
    }))
    .await
}
