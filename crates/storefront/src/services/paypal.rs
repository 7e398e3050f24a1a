//! PayPal Orders v2 API client.
//!
//! Implements the [`PaymentProvider`] capability against PayPal's REST API.
//! Each call authenticates with a client-credentials token; the shop's
//! traffic does not justify a token cache.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use mi_tienda_core::{CaptureId, PaymentStatus, ProviderOrderId};

use crate::config::PaypalConfig;
use crate::services::checkout::{OrderRequest, PaymentError, PaymentProvider};

/// Per-request timeout; a provider hang surfaces as a retriable error
/// instead of holding the request open.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// PayPal REST API client.
#[derive(Clone)]
pub struct PaypalClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: SecretString,
}

impl PaypalClient {
    /// Create a new PayPal API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PaypalConfig) -> Result<Self, PaymentError> {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.environment.base_url().to_owned(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Fetch an OAuth2 access token via the client-credentials grant.
    async fn access_token(&self) -> Result<String, PaymentError> {
        let url = format!("{}/v1/oauth2/token", self.base_url);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(self.client_secret.expose_secret()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        Ok(token.access_token)
    }
}

impl PaymentProvider for PaypalClient {
    async fn create_order(&self, order: &OrderRequest) -> Result<ProviderOrderId, PaymentError> {
        let token = self.access_token().await?;
        let url = format!("{}/v2/checkout/orders", self.base_url);

        let body = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": order.amount.currency_code.code(),
                    "value": order.amount.amount_string(),
                },
                "description": order.description,
            }]
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: OrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        Ok(ProviderOrderId::new(created.id))
    }

    async fn capture_order(&self, order_id: &ProviderOrderId) -> Result<CaptureId, PaymentError> {
        let token = self.access_token().await?;
        let url = format!("{}/v2/checkout/orders/{order_id}/capture", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let captured: OrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Parse(e.to_string()))?;

        if !payment_status(captured.status.as_deref()).is_captured() {
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message: format!(
                    "capture of {order_id} not completed (status {:?})",
                    captured.status
                ),
            });
        }

        Ok(CaptureId::new(captured.id))
    }
}

/// Map the provider's order status strings onto the payment lifecycle.
fn payment_status(raw: Option<&str>) -> PaymentStatus {
    match raw {
        Some("COMPLETED" | "CAPTURED") => PaymentStatus::Captured,
        _ => PaymentStatus::Created,
    }
}

/// OAuth2 token response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Order resource, as returned by both create and capture.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_statuses_map_to_captured() {
        assert!(payment_status(Some("COMPLETED")).is_captured());
        assert!(payment_status(Some("CAPTURED")).is_captured());
    }

    #[test]
    fn other_statuses_stay_created() {
        assert!(!payment_status(Some("CREATED")).is_captured());
        assert!(!payment_status(Some("PAYER_ACTION_REQUIRED")).is_captured());
        assert!(!payment_status(None).is_captured());
    }
}
