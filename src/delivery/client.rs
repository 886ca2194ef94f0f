//! Outbound webhook client.

use super::{DeliveryOutcome, DeliveryReport};
use crate::error::{HookError, Result};
use bytes::Bytes;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{info, warn};

/// Default upper bound on a single delivery, connect through response body.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client used to POST notifications to callback URLs.
///
/// Cloning is cheap; clones share one connection pool.
///
/// # Examples
///
/// ```rust,no_run
/// use fswatch_hooks::delivery::WebhookClient;
/// use std::time::Duration;
///
/// # fn example() -> fswatch_hooks::error::Result<()> {
/// let client = WebhookClient::builder()
///     .with_timeout(Duration::from_secs(5))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct WebhookClient {
    client: Client,
}

impl WebhookClient {
    /// Create a new builder for constructing a client.
    pub fn builder() -> WebhookClientBuilder {
        WebhookClientBuilder::new()
    }

    /// POST `body` to `url` and report what happened.
    ///
    /// Never fails: connection errors and non-2xx statuses end up in the
    /// returned report and in the log.
    pub async fn deliver(&self, path: &str, url: &str, body: Bytes) -> DeliveryReport {
        let result = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        let outcome = match result {
            Ok(response) => {
                let status = response.status();
                let body = match response.text().await {
                    Ok(text) => text,
                    Err(e) => {
                        warn!(path = %path, url = %url, error = %e, "failed to read callback response body");
                        String::new()
                    }
                };
                DeliveryOutcome::Delivered {
                    status: status.as_u16(),
                    body,
                }
            }
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        };

        let report = DeliveryReport::new(url, outcome);
        match report.outcome() {
            DeliveryOutcome::Delivered { status, body } if report.is_success() => {
                info!(path = %path, url = %url, status = *status, body = %body, "callback delivered");
            }
            DeliveryOutcome::Delivered { status, body } => {
                warn!(path = %path, url = %url, status = *status, body = %body, "callback rejected notification");
            }
            DeliveryOutcome::Failed(reason) => {
                warn!(path = %path, url = %url, error = %reason, "callback delivery failed");
            }
        }
        report
    }
}

impl Default for WebhookClient {
    fn default() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

/// Builder for constructing a [`WebhookClient`].
pub struct WebhookClientBuilder {
    timeout: Option<Duration>,
}

impl WebhookClientBuilder {
    /// Create a new builder with the default timeout.
    pub fn new() -> Self {
        Self {
            timeout: Some(DEFAULT_DELIVERY_TIMEOUT),
        }
    }

    /// Bound each delivery to `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Let deliveries run for as long as the subscriber takes.
    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<WebhookClient> {
        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| HookError::Delivery(format!("Failed to create HTTP client: {}", e)))?;

        Ok(WebhookClient { client })
    }
}

impl Default for WebhookClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
