use serde::{Deserialize, Serialize};

pub const PROCESSING_STARTED_MESSAGE: &str = "Processing started";
pub const START_FAILURE_MESSAGE: &str = "Failed to start processing";
pub const WORKER_DELAY_MS: u64 = 4_000;

/// Input handed to the orchestrator and, verbatim, to the worker step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionRequest {
    #[serde(rename = "startDate")]
    pub start_date: i64,
}

impl ExecutionRequest {
    pub fn new(start_date: i64) -> Self {
        Self { start_date }
    }

    pub fn to_input_json(&self) -> String {
        stable_contract_json(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AcknowledgmentBody {
    pub message: String,
    pub timestamp: i64,
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub environment: String,
}

impl AcknowledgmentBody {
    pub fn processing_started(
        timestamp: i64,
        request_id: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            message: PROCESSING_STARTED_MESSAGE.to_string(),
            timestamp,
            request_id: request_id.into(),
            environment: environment.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn start_failure() -> Self {
        Self {
            error: START_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkerResponse {
    pub success: bool,
}

impl WorkerResponse {
    pub fn succeeded() -> Self {
        Self { success: true }
    }
}

pub fn stable_contract_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of contract value should not fail")
}
