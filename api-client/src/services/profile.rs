use agora_shared::types::{LeaderboardEntry, UserProfile};

use crate::error::ClientResult;
use crate::transport::Service;
use crate::AgoraClient;

impl AgoraClient {
    pub async fn get_user_profile(&self, username: &str) -> ClientResult<UserProfile> {
        self.transport
            .get_json(
                Service::BountyApi,
                "/api/get_user_profile",
                &[("username", username.to_string())],
            )
            .await
    }

    /// Users ordered by approved submissions, best first
    pub async fn leaderboard(&self) -> ClientResult<Vec<LeaderboardEntry>> {
        self.transport
            .get_json(Service::BountyApi, "/api/leaderboard", &[])
            .await
    }
}
