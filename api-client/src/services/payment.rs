use agora_shared::types::{
    CashoutIntentRequest, MessageResponse, PaymentIntentResponse, WithdrawHistoryResponse,
    Withdrawal, WithdrawalRequest,
};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::bounty::client_secret;
use crate::error::{ClientError, ClientResult};
use crate::transport::Service;
use crate::AgoraClient;

impl AgoraClient {
    /// Past withdrawals; an unavailable history is logged and reads as empty
    pub async fn get_withdraw_history(&self, username: &str) -> Vec<Withdrawal> {
        let result: ClientResult<WithdrawHistoryResponse> = self
            .transport
            .get_json(
                Service::BountyApi,
                "/api/get_withdraw_history",
                &[("username", username.to_string())],
            )
            .await;

        match result {
            Ok(response) => response.history,
            Err(e) => {
                warn!("Error fetching withdraw history for {}: {}", username, e);
                Vec::new()
            }
        }
    }

    /// Creates a card payout intent; returns the client secret to confirm
    pub async fn create_cashout_intent(&self, username: &str, amount: Decimal) -> ClientResult<String> {
        let request = CashoutIntentRequest {
            username: username.to_string(),
            amount,
        };
        let response: PaymentIntentResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/create_cashout_intent", &request)
            .await?;

        client_secret(response, "Failed to create payment")
    }

    /// Requests a manual PayPal or bank payout
    pub async fn process_withdrawal(&self, request: &WithdrawalRequest) -> ClientResult<()> {
        let response: MessageResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/process_withdrawal", request)
            .await?;

        if response.is_success() {
            info!(
                "Withdrawal of {} via {} requested for {}",
                request.amount, request.payment_method, request.username
            );
            return Ok(());
        }
        Err(ClientError::Api(
            response
                .message
                .unwrap_or_else(|| "Failed to process withdrawal".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::client;
    use agora_shared::types::{PaymentMethod, WithdrawalStatus};
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_withdraw_history() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/get_withdraw_history")
            .match_query(Matcher::UrlEncoded("username".into(), "hank".into()))
            .with_header("content-type", "application/json")
            .with_body(
                json!({"history": [{"amount": 12.5, "date": "2025-04-02T10:11:12Z", "status": "completed"}]})
                    .to_string(),
            )
            .create_async()
            .await;

        let history = client(&server.url()).get_withdraw_history("hank").await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, WithdrawalStatus::Completed);
        assert_eq!(history[0].amount, Decimal::new(125, 1));
    }

    #[tokio::test]
    async fn test_withdraw_history_failure_is_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/get_withdraw_history")
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        assert!(client(&server.url()).get_withdraw_history("hank").await.is_empty());
    }

    #[tokio::test]
    async fn test_create_cashout_intent() {
        let mut server = Server::new_async().await;
        let ok = server
            .mock("POST", "/api/create_cashout_intent")
            .match_body(Matcher::Json(json!({"username": "hank", "amount": 20.0})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success","clientSecret":"pi_9_secret_z"}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        let secret = client.create_cashout_intent("hank", Decimal::from(20)).await.unwrap();
        assert_eq!(secret, "pi_9_secret_z");
        ok.remove_async().await;

        server
            .mock("POST", "/api/create_cashout_intent")
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"insufficient_balance"}"#)
            .create_async()
            .await;
        let err = client.create_cashout_intent("hank", Decimal::from(20)).await.unwrap_err();
        assert_eq!(err.to_string(), "insufficient_balance");
    }

    #[tokio::test]
    async fn test_process_withdrawal() {
        let mut server = Server::new_async().await;
        let request = WithdrawalRequest {
            username: "hank".to_string(),
            amount: Decimal::new(725, 2),
            payment_method: PaymentMethod::Bank,
            payment_details: "IBAN DE00".to_string(),
        };

        let ok = server
            .mock("POST", "/api/process_withdrawal")
            .match_body(Matcher::PartialJson(json!({"payment_method": "bank", "amount": 7.25})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success"}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        assert!(client.process_withdrawal(&request).await.is_ok());
        ok.remove_async().await;

        server
            .mock("POST", "/api/process_withdrawal")
            .with_header("content-type", "application/json")
            .with_body(r#"{}"#)
            .create_async()
            .await;
        let err = client.process_withdrawal(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to process withdrawal");
    }
}
