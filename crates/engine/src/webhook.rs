//! Webhook delivery for transition-triggered automation rules.
//!
//! [`WebhookDelivery`] sends a JSON payload to an external URL via HTTP
//! POST. One attempt per firing — the automation contract is at-least-once
//! best-effort with a logged outcome, and the caller records whatever
//! happened rather than retrying.
//!
//! Success is transport-level only: a response was received, whatever its
//! status code. A non-2xx reply is NOT treated as failure (transport
//! success, not application success); only a reqwest error — DNS,
//! connection refused, timeout — fails the delivery.

use std::time::Duration;

/// HTTP request timeout for a delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for webhook delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Delivers lead snapshots to external webhook endpoints.
pub struct WebhookDelivery {
    client: reqwest::Client,
}

impl WebhookDelivery {
    /// Create a new delivery service with a pre-configured HTTP client.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client }
    }

    /// POST `payload` to `url`, once.
    ///
    /// The URL is taken verbatim from the rule's config; no authentication
    /// header is attached. The response status is deliberately not
    /// inspected — see the module docs.
    pub async fn deliver(
        &self,
        url: &str,
        payload: &serde_json::Value,
    ) -> Result<(), WebhookError> {
        let response = self.client.post(url).json(payload).send().await?;
        tracing::debug!(url, status = response.status().as_u16(), "Webhook delivered");
        Ok(())
    }
}

impl Default for WebhookDelivery {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_panic() {
        let _delivery = WebhookDelivery::new();
    }

    #[test]
    fn default_does_not_panic() {
        let _delivery = WebhookDelivery::default();
    }

    #[test]
    fn webhook_error_display_request() {
        // Build a reqwest error from an invalid URL.
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = WebhookError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
