use agora_shared::types::{
    Bounty, BountyDetailsResponse, BountyFilters, CreateBountyRequest, CreateBountyResponse,
    PaymentIntentRequest, PaymentIntentResponse, Submission, UserBounties, MESSAGE_SUCCESS,
};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::transport::Service;
use crate::AgoraClient;

const MESSAGE_BOUNTY_NOT_FOUND: &str = "bounty_not_found";

/// Result of looking up a single bounty
#[derive(Debug, Clone, PartialEq)]
pub enum BountyDetails {
    Found {
        bounty: Bounty,
        submissions: Vec<Submission>,
    },
    NotFound,
}

impl AgoraClient {
    pub async fn search_bounties(&self, filters: &BountyFilters) -> ClientResult<Vec<Bounty>> {
        let query = filters.query_pairs();
        debug!("Searching bounties with {} filter(s)", query.len());
        self.transport
            .get_json(Service::BountyApi, "/api/search_bounties", &query)
            .await
    }

    pub async fn get_bounty_details(&self, bounty_id: &str) -> ClientResult<BountyDetails> {
        let response: BountyDetailsResponse = self
            .transport
            .get_json(
                Service::BountyApi,
                "/api/get_bounty_details",
                &[("bounty_id", bounty_id.to_string())],
            )
            .await
            .map_err(|e| match e {
                ClientError::Status { status, .. } => ClientError::Status { status, message: None },
                other => other,
            })?;

        match response.message.as_deref() {
            Some(MESSAGE_SUCCESS) => {
                let bounty = response
                    .bounty
                    .ok_or_else(|| ClientError::Decode("bounty missing from success payload".to_string()))?;
                Ok(BountyDetails::Found {
                    bounty,
                    submissions: response.submissions,
                })
            }
            Some(MESSAGE_BOUNTY_NOT_FOUND) => Ok(BountyDetails::NotFound),
            Some(other) if !other.is_empty() => Err(ClientError::Api(other.to_string())),
            _ => Err(ClientError::Api("Failed to fetch bounty details".to_string())),
        }
    }

    /// Creates a bounty and returns its id
    pub async fn create_bounty(&self, request: &CreateBountyRequest) -> ClientResult<String> {
        let response: CreateBountyResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/create_bounty", request)
            .await?;

        match response.bounty_id {
            Some(bounty_id) => {
                info!("Created bounty {} for {}", bounty_id, request.username);
                Ok(bounty_id)
            }
            None => Err(ClientError::Api(
                response
                    .message
                    .unwrap_or_else(|| "Failed to create bounty".to_string()),
            )),
        }
    }

    pub async fn get_user_bounties(&self, username: &str) -> ClientResult<UserBounties> {
        self.transport
            .get_json(
                Service::BountyApi,
                "/api/get_user_bounties",
                &[("username", username.to_string())],
            )
            .await
    }

    /// Creates a payment intent funding a bounty reward; returns the client secret
    pub async fn create_payment_intent(
        &self,
        username: &str,
        amount: Decimal,
        bounty_id: Option<&str>,
    ) -> ClientResult<String> {
        let request = PaymentIntentRequest {
            username: username.to_string(),
            amount,
            bounty_id: bounty_id.map(str::to_string),
        };
        let response: PaymentIntentResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/create_payment_intent", &request)
            .await?;

        client_secret(response, "Failed to create payment")
    }
}

/// Client secret of a successful intent, or the backend's failure message
pub(crate) fn client_secret(response: PaymentIntentResponse, fallback: &str) -> ClientResult<String> {
    if !response.is_success() {
        return Err(ClientError::Api(
            response.message.unwrap_or_else(|| fallback.to_string()),
        ));
    }
    response
        .client_secret
        .ok_or_else(|| ClientError::Decode("clientSecret missing from success payload".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::client;
    use agora_shared::types::BountyStatus;
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bounty_json() -> serde_json::Value {
        json!({
            "id": "b1",
            "title": "Find wild garlic",
            "description": "Photos of Allium ursinum in bloom",
            "plant_species": "Allium ursinum",
            "reward": 25.5,
            "num_submissions_needed": 10,
            "current_submissions": 3,
            "status": "open",
            "creator": "ada"
        })
    }

    #[tokio::test]
    async fn test_search_bounties_sends_only_set_filters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/search_bounties")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("plant_species".into(), "Allium ursinum".into()),
            ]))
            .with_header("content-type", "application/json")
            .with_body(json!([bounty_json()]).to_string())
            .create_async()
            .await;

        let filters = BountyFilters {
            plant_species: Some("Allium ursinum".to_string()),
            min_reward: Some(String::new()),
        };
        let bounties = client(&server.url()).search_bounties(&filters).await.unwrap();

        assert_eq!(bounties.len(), 1);
        assert_eq!(bounties[0].reward, Decimal::new(255, 1));
        assert_eq!(bounties[0].status, BountyStatus::Open);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_bounty_details_found() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/get_bounty_details")
            .match_query(Matcher::UrlEncoded("bounty_id".into(), "b1".into()))
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "message": "success",
                    "bounty": bounty_json(),
                    "submissions": [{"id": "s1", "bounty_id": "b1", "username": "lin", "status": "pending_verification"}]
                })
                .to_string(),
            )
            .create_async()
            .await;

        match client(&server.url()).get_bounty_details("b1").await.unwrap() {
            BountyDetails::Found { bounty, submissions } => {
                assert_eq!(bounty.title, "Find wild garlic");
                assert_eq!(submissions.len(), 1);
                assert!(submissions[0].status.is_pending());
            }
            BountyDetails::NotFound => panic!("expected a bounty"),
        }
    }

    #[tokio::test]
    async fn test_get_bounty_details_not_found_and_errors() {
        let mut server = Server::new_async().await;
        let client = client(&server.url());

        let not_found = server
            .mock("GET", "/api/get_bounty_details")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"bounty_not_found"}"#)
            .create_async()
            .await;
        assert_eq!(client.get_bounty_details("nope").await.unwrap(), BountyDetails::NotFound);
        not_found.remove_async().await;

        let failed = server
            .mock("GET", "/api/get_bounty_details")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"gone"}"#)
            .create_async()
            .await;
        let err = client.get_bounty_details("b1").await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! Status: 404");
        failed.remove_async().await;

        server
            .mock("GET", "/api/get_bounty_details")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body(r#"{}"#)
            .create_async()
            .await;
        let err = client.get_bounty_details("b1").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch bounty details");
    }

    #[tokio::test]
    async fn test_create_bounty() {
        let mut server = Server::new_async().await;
        let request = CreateBountyRequest {
            title: "Find wild garlic".to_string(),
            description: "Photos in bloom".to_string(),
            plant_species: "Allium ursinum".to_string(),
            reward: Decimal::new(1500, 2),
            num_submissions_needed: 4,
            additional_notes: String::new(),
            username: "ada".to_string(),
        };

        let created = server
            .mock("POST", "/api/create_bounty")
            .match_body(Matcher::PartialJson(json!({
                "reward": 15.0,
                "num_submissions_needed": 4,
                "username": "ada"
            })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"bounty_id":"b9","message":"success"}"#)
            .create_async()
            .await;

        let client = client(&server.url());
        assert_eq!(client.create_bounty(&request).await.unwrap(), "b9");
        created.remove_async().await;

        server
            .mock("POST", "/api/create_bounty")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"missing_fields"}"#)
            .create_async()
            .await;
        let err = client.create_bounty(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "missing_fields");
    }

    #[tokio::test]
    async fn test_create_payment_intent() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/create_payment_intent")
            .match_body(Matcher::Json(json!({"username": "ada", "amount": 15.0, "bounty_id": "b9"})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success","clientSecret":"pi_123_secret_abc"}"#)
            .create_async()
            .await;

        let secret = client(&server.url())
            .create_payment_intent("ada", Decimal::new(15, 0), Some("b9"))
            .await
            .unwrap();
        assert_eq!(secret, "pi_123_secret_abc");
    }

    #[tokio::test]
    async fn test_get_user_bounties() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/get_user_bounties")
            .match_query(Matcher::UrlEncoded("username".into(), "ada".into()))
            .with_header("content-type", "application/json")
            .with_body(json!({"created_bounties": [bounty_json()], "submitted_bounties": []}).to_string())
            .create_async()
            .await;

        let bounties = client(&server.url()).get_user_bounties("ada").await.unwrap();
        assert_eq!(bounties.created_bounties.len(), 1);
        assert!(bounties.submitted_bounties.is_empty());
    }
}
