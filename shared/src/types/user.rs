use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Message values returned by `verify_login` and `add_user`
pub const MESSAGE_INVALID_PASSWORD: &str = "invalid_password";
pub const MESSAGE_INVALID_USER: &str = "invalid_user";
pub const MESSAGE_USER_EXISTS: &str = "user_exists";

/// Body shared by `verify_login` and `add_user`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Profile as returned by `get_user_profile`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub username: String,
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "null_as_zero"
    )]
    pub earnings: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_verified_org: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_approved_submissions: Option<u64>,
    /// Any profile fields this client does not model
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Accounts created before earnings tracking report `null`
fn null_as_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(rust_decimal::serde::float_option::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserProfile {
    /// Headline under the username on the dashboard
    pub fn role_label(&self) -> String {
        if self.is_verified_org {
            format!(
                "Verified Organization: {}",
                self.organization_name.as_deref().unwrap_or_default()
            )
        } else {
            "Citizen Scientist".to_string()
        }
    }
}

/// One row of the leaderboard; the backend groups by username under `_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(rename = "_id")]
    pub username: String,
    #[serde(default)]
    pub total_approved_submissions: u64,
}

/// Medal shown next to the top three leaderboard positions
pub fn rank_medal(rank: usize) -> Option<&'static str> {
    match rank {
        1 => Some("🥇"),
        2 => Some("🥈"),
        3 => Some("🥉"),
        _ => None,
    }
}
