use std::future::Future;

use notify_core::message::NotificationMessage;

use crate::error::DeliveryError;

pub trait WebhookSink {
    fn deliver(
        &self,
        message: &NotificationMessage,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Posts messages as JSON to a fixed webhook URL. Any non-2xx status is a
/// rejection.
#[derive(Debug, Clone)]
pub struct HttpWebhookSink {
    client: reqwest::Client,
    url: String,
}

impl HttpWebhookSink {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl WebhookSink for HttpWebhookSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        let response = self.client.post(&self.url).json(message).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
