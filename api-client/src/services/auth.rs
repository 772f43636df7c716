use agora_shared::types::{
    Credentials, MessageResponse, MESSAGE_INVALID_PASSWORD, MESSAGE_INVALID_USER, MESSAGE_SUCCESS,
    MESSAGE_USER_EXISTS,
};
use tracing::debug;

use crate::error::ClientResult;
use crate::transport::Service;
use crate::AgoraClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    InvalidPassword,
    UnknownUser,
    /// Any other backend answer, kept verbatim
    Other(Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created,
    UserExists,
}

impl AgoraClient {
    pub async fn verify_login(&self, credentials: &Credentials) -> ClientResult<LoginOutcome> {
        debug!("Verifying login for {}", credentials.username);
        let response: MessageResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/verify_login", credentials)
            .await?;

        Ok(match response.message.as_deref() {
            Some(MESSAGE_SUCCESS) => LoginOutcome::Success,
            Some(MESSAGE_INVALID_PASSWORD) => LoginOutcome::InvalidPassword,
            Some(MESSAGE_INVALID_USER) => LoginOutcome::UnknownUser,
            _ => LoginOutcome::Other(response.message),
        })
    }

    /// Registers a user; every answer except `user_exists` counts as created
    pub async fn add_user(&self, credentials: &Credentials) -> ClientResult<RegisterOutcome> {
        debug!("Registering user {}", credentials.username);
        let response: MessageResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/add_user", credentials)
            .await?;

        Ok(match response.message.as_deref() {
            Some(MESSAGE_USER_EXISTS) => RegisterOutcome::UserExists,
            _ => RegisterOutcome::Created,
        })
    }
}
