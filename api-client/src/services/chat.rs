use agora_shared::types::{AskRequest, AskResponse, FLORA_SYSTEM_MESSAGE, MESSAGE_SUCCESS};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::transport::Service;
use crate::AgoraClient;

impl AgoraClient {
    /// Asks the flora assistant about a plant
    pub async fn ask_chatgpt(&self, prompt: &str) -> ClientResult<String> {
        let request = AskRequest {
            prompt,
            system_message: FLORA_SYSTEM_MESSAGE,
        };
        debug!("Asking flora assistant ({} chars)", prompt.len());
        let response: AskResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/ask_chatgpt", &request)
            .await?;

        match (response.message.as_deref(), response.response) {
            (Some(MESSAGE_SUCCESS), Some(answer)) => Ok(answer),
            _ => Err(ClientError::Api(
                response
                    .error
                    .unwrap_or_else(|| "Failed to get a response".to_string()),
            )),
        }
    }
}
