use agora_shared::types::{Event, MessageResponse};
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::transport::Service;
use crate::AgoraClient;

impl AgoraClient {
    pub async fn create_event(&self, event: &Event) -> ClientResult<()> {
        let response: MessageResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/create_event", event)
            .await?;

        if !response.is_success() {
            return Err(ClientError::Api(
                "Failed to create event. Please try again.".to_string(),
            ));
        }
        info!("Event created by {}", event.username);
        Ok(())
    }
}
