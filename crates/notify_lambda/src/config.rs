use std::time::Duration;

use notify_core::contract::WORKER_DELAY_MS;

use crate::error::ConfigError;

pub const STATE_MACHINE_ARN_VAR: &str = "STATE_MACHINE_ARN";
pub const WEBHOOK_URL_VAR: &str = "WEBHOOK_URL";
pub const DEPLOY_ENV_VAR: &str = "DEPLOY_ENV";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiatorConfig {
    pub state_machine_arn: String,
    pub environment: String,
}

impl InitiatorConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            state_machine_arn: required(&lookup, STATE_MACHINE_ARN_VAR)?,
            environment: required(&lookup, DEPLOY_ENV_VAR)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub webhook_url: String,
    pub environment: String,
    pub delay: Duration,
}

impl WorkerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            webhook_url: required(&lookup, WEBHOOK_URL_VAR)?,
            environment: required(&lookup, DEPLOY_ENV_VAR)?,
            delay: Duration::from_millis(WORKER_DELAY_MS),
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| values.get(key).cloned()
    }

    #[test]
    fn initiator_config_reads_required_variables() {
        let config = InitiatorConfig::from_lookup(lookup_from(&[
            (STATE_MACHINE_ARN_VAR, "arn:aws:states:eu-west-1:1:stateMachine:notify"),
            (DEPLOY_ENV_VAR, "staging"),
        ]))
        .expect("config should load");

        assert_eq!(
            config.state_machine_arn,
            "arn:aws:states:eu-west-1:1:stateMachine:notify"
        );
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn initiator_config_rejects_missing_arn() {
        let error = InitiatorConfig::from_lookup(lookup_from(&[(DEPLOY_ENV_VAR, "staging")]))
            .expect_err("missing arn should fail");
        assert_eq!(error, ConfigError::Missing(STATE_MACHINE_ARN_VAR));
        assert_eq!(error.to_string(), "STATE_MACHINE_ARN must be configured");
    }

    #[test]
    fn worker_config_treats_blank_values_as_missing() {
        let error = WorkerConfig::from_lookup(lookup_from(&[
            (WEBHOOK_URL_VAR, "   "),
            (DEPLOY_ENV_VAR, "prod"),
        ]))
        .expect_err("blank url should fail");
        assert_eq!(error, ConfigError::Missing(WEBHOOK_URL_VAR));
    }

    #[test]
    fn worker_config_uses_fixed_delay() {
        let config = WorkerConfig::from_lookup(lookup_from(&[
            (WEBHOOK_URL_VAR, "https://hooks.example.com/T000/B000"),
            (DEPLOY_ENV_VAR, "prod"),
        ]))
        .expect("config should load");
        assert_eq!(config.delay, Duration::from_millis(4_000));
        assert_eq!(config.environment, "prod");
    }
}
