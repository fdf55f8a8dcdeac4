use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

/// The orchestrator refused or failed to start an execution.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("failed to start execution: {message}")]
pub struct StartExecutionError {
    message: String,
}

impl StartExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("webhook rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Any failure while processing a worker invocation. Surfaced to the Lambda
/// runtime so the orchestrator records the step as failed.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("invalid worker payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("notification delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}
