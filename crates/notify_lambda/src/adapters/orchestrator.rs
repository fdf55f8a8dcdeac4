use std::future::Future;

use aws_sdk_sfn::error::DisplayErrorContext;

use crate::error::StartExecutionError;

pub trait ExecutionStarter {
    /// Starts one execution with the given JSON input and returns its
    /// identifier.
    fn start_execution(
        &self,
        input: String,
    ) -> impl Future<Output = Result<String, StartExecutionError>> + Send;
}

/// Starts executions of a fixed Step Functions state machine.
#[derive(Debug, Clone)]
pub struct StepFunctionsStarter {
    client: aws_sdk_sfn::Client,
    state_machine_arn: String,
}

impl StepFunctionsStarter {
    pub fn new(client: aws_sdk_sfn::Client, state_machine_arn: impl Into<String>) -> Self {
        Self {
            client,
            state_machine_arn: state_machine_arn.into(),
        }
    }
}

impl ExecutionStarter for StepFunctionsStarter {
    async fn start_execution(&self, input: String) -> Result<String, StartExecutionError> {
        self.client
            .start_execution()
            .state_machine_arn(&self.state_machine_arn)
            .input(input)
            .send()
            .await
            .map(|output| output.execution_arn().to_string())
            .map_err(|error| StartExecutionError::new(DisplayErrorContext(&error).to_string()))
    }
}
