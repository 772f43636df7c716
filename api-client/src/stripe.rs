//! Card payment confirmation through the payment processor's public API

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

/// Confirms a payment intent created by the backend
#[async_trait]
pub trait PaymentConfirmer: Send + Sync {
    async fn confirm_card_payment(&self, client_secret: &str) -> ClientResult<()>;
}

/// Confirms intents with the publishable key, the way a browser checkout does
#[derive(Debug, Clone)]
pub struct StripeConfirmer {
    client: Client,
    api_url: String,
    publishable_key: String,
}

#[derive(Debug, Deserialize)]
struct IntentStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<ProcessorError>,
}

#[derive(Debug, Deserialize)]
struct ProcessorError {
    #[serde(default)]
    message: Option<String>,
}

impl StripeConfirmer {
    pub fn new(api_url: &str, publishable_key: &str, timeout_seconds: u64) -> ClientResult<Self> {
        if publishable_key.trim().is_empty() {
            return Err(ClientError::Configuration(
                "a publishable key is required for card payments".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            publishable_key: publishable_key.to_string(),
        })
    }
}

/// Payment intent id embedded in a client secret (`pi_..._secret_...`)
pub fn payment_intent_id(client_secret: &str) -> ClientResult<&str> {
    client_secret
        .split_once("_secret_")
        .map(|(id, _)| id)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ClientError::Payment("Invalid payment client secret".to_string()))
}

#[async_trait]
impl PaymentConfirmer for StripeConfirmer {
    async fn confirm_card_payment(&self, client_secret: &str) -> ClientResult<()> {
        let intent_id = payment_intent_id(client_secret)?;
        let url = format!("{}/v1/payment_intents/{}/confirm", self.api_url, intent_id);
        debug!("Confirming payment intent {}", intent_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.publishable_key)
            .form(&[("client_secret", client_secret)])
            .send()
            .await?;
        let status = response.status();
        let body: IntentStatus = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        if let Some(error) = body.error {
            warn!("Payment intent {} was declined ({})", intent_id, status);
            return Err(ClientError::Payment(
                error.message.unwrap_or_else(|| "Payment failed".to_string()),
            ));
        }
        if !status.is_success() {
            return Err(ClientError::Payment(format!("Payment failed with status {}", status)));
        }

        match body.status.as_deref() {
            Some("succeeded") | Some("processing") => {
                info!("Payment intent {} confirmed", intent_id);
                Ok(())
            }
            Some("requires_action") => Err(ClientError::Payment(
                "This payment requires additional authentication".to_string(),
            )),
            other => Err(ClientError::Payment(format!(
                "Payment not completed (status: {})",
                other.unwrap_or("unknown")
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn test_payment_intent_id() {
        assert_eq!(payment_intent_id("pi_123_secret_abc").unwrap(), "pi_123");
        assert!(payment_intent_id("garbage").is_err());
        assert!(payment_intent_id("_secret_abc").is_err());
    }

    #[test]
    fn test_requires_publishable_key() {
        assert!(StripeConfirmer::new("https://api.stripe.com", " ", 5).is_err());
    }

    #[tokio::test]
    async fn test_confirm_card_payment_succeeds() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/payment_intents/pi_123/confirm")
            .match_header("authorization", "Bearer pk_test_1")
            .match_body(Matcher::UrlEncoded("client_secret".into(), "pi_123_secret_abc".into()))
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"pi_123","status":"succeeded"}"#)
            .create_async()
            .await;

        let confirmer = StripeConfirmer::new(&server.url(), "pk_test_1", 5).unwrap();
        confirmer.confirm_card_payment("pi_123_secret_abc").await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_confirm_card_payment_surfaces_decline() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/payment_intents/pi_123/confirm")
            .with_status(402)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Your card was declined."}}"#)
            .create_async()
            .await;

        let confirmer = StripeConfirmer::new(&server.url(), "pk_test_1", 5).unwrap();
        let err = confirmer.confirm_card_payment("pi_123_secret_abc").await.unwrap_err();
        assert_eq!(err.to_string(), "Your card was declined.");
    }
}
