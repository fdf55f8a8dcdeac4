use notify_core::contract::{AcknowledgmentBody, ErrorBody, ExecutionRequest};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::adapters::clock::Clock;
use crate::adapters::orchestrator::ExecutionStarter;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Starts one orchestrated execution stamped with the current time and
/// acknowledges the caller without waiting for it.
pub async fn handle_initiator_event<S, C>(
    request_id: &str,
    environment: &str,
    starter: &S,
    clock: &C,
) -> ApiGatewayResponse
where
    S: ExecutionStarter + Sync,
    C: Clock + Sync,
{
    let start_date = clock.now_millis();
    let request = ExecutionRequest::new(start_date);

    match starter.start_execution(request.to_input_json()).await {
        Ok(execution_id) => {
            tracing::info!(request_id, start_date, execution_id = %execution_id, "execution started");
            success_response(
                200,
                AcknowledgmentBody::processing_started(start_date, request_id, environment),
            )
        }
        Err(error) => {
            tracing::error!(request_id, start_date, error = %error, "failed to start execution");
            error_response(500, ErrorBody::start_failure())
        }
    }
}

fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "GET",
            "Access-Control-Allow-Headers": "Content-Type",
        }),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

fn error_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    use crate::error::StartExecutionError;

    use super::*;

    struct CapturingStarter {
        inputs: Mutex<Vec<String>>,
    }

    impl CapturingStarter {
        fn new() -> Self {
            Self {
                inputs: Mutex::new(Vec::new()),
            }
        }

        fn inputs(&self) -> Vec<String> {
            self.inputs.lock().expect("poisoned mutex").clone()
        }
    }

    impl ExecutionStarter for CapturingStarter {
        async fn start_execution(&self, input: String) -> Result<String, StartExecutionError> {
            self.inputs.lock().expect("poisoned mutex").push(input);
            Ok("arn:aws:states:example:execution:notify:1".to_string())
        }
    }

    struct RejectingStarter;

    impl ExecutionStarter for RejectingStarter {
        async fn start_execution(&self, _input: String) -> Result<String, StartExecutionError> {
            Err(StartExecutionError::new("ExecutionLimitExceeded"))
        }
    }

    fn fixed_clock(now_ms: i64) -> impl Fn() -> i64 + Sync {
        move || now_ms
    }

    fn parse_body(response: &ApiGatewayResponse) -> Value {
        serde_json::from_str(&response.body).expect("body should be JSON")
    }

    #[tokio::test]
    async fn acknowledges_and_starts_single_execution() {
        let starter = CapturingStarter::new();
        let response =
            handle_initiator_event("req-42", "staging", &starter, &fixed_clock(1_000)).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(starter.inputs(), vec![r#"{"startDate":1000}"#.to_string()]);
        assert_eq!(
            parse_body(&response),
            json!({
                "message": "Processing started",
                "timestamp": 1000,
                "requestId": "req-42",
                "environment": "staging"
            })
        );
    }

    #[tokio::test]
    async fn success_response_carries_cors_headers() {
        let starter = CapturingStarter::new();
        let response = handle_initiator_event("req-1", "dev", &starter, &fixed_clock(5)).await;

        assert_eq!(response.headers["Content-Type"], "application/json");
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        assert_eq!(response.headers["Access-Control-Allow-Methods"], "GET");
        assert_eq!(response.headers["Access-Control-Allow-Headers"], "Content-Type");
    }

    #[tokio::test]
    async fn timestamp_is_taken_once_at_handler_start() {
        let ticks = AtomicI64::new(1_000);
        let clock = || ticks.fetch_add(500, Ordering::SeqCst);
        let starter = CapturingStarter::new();

        let response = handle_initiator_event("req-7", "dev", &starter, &clock).await;

        assert_eq!(parse_body(&response)["timestamp"], 1000);
        assert_eq!(starter.inputs(), vec![r#"{"startDate":1000}"#.to_string()]);
        assert_eq!(ticks.load(Ordering::SeqCst), 1_500);
    }

    #[tokio::test]
    async fn orchestrator_failure_maps_to_500() {
        let response =
            handle_initiator_event("req-9", "prod", &RejectingStarter, &fixed_clock(1_000)).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(
            parse_body(&response),
            json!({"error": "Failed to start processing"})
        );
        assert!(response.headers.get("Access-Control-Allow-Origin").is_none());
    }
}
