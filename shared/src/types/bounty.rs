/// Bounty records and the request/response shapes of the bounty endpoints
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::open_string_enum;
use super::submission::Submission;

open_string_enum! {
    /// Lifecycle status of a bounty as reported by the backend
    pub enum BountyStatus {
        Open => "open",
        Completed => "completed",
        Closed => "closed",
    }
}

impl Default for BountyStatus {
    fn default() -> Self {
        BountyStatus::Open
    }
}

impl BountyStatus {
    /// Badge text shown next to a bounty
    pub fn label(&self) -> &str {
        match self {
            BountyStatus::Open => "Open",
            BountyStatus::Completed => "Completed",
            BountyStatus::Closed => "Closed",
            BountyStatus::Other(raw) => raw.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounty {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub plant_species: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub reward: Decimal,
    pub num_submissions_needed: u32,
    #[serde(default)]
    pub current_submissions: u32,
    #[serde(default)]
    pub status: BountyStatus,
    #[serde(default)]
    pub creator: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Bounty {
    /// "3/10 submissions" progress text
    pub fn progress(&self) -> String {
        format!(
            "{}/{} submissions",
            self.current_submissions, self.num_submissions_needed
        )
    }

    pub fn is_created_by(&self, username: &str) -> bool {
        !username.is_empty() && self.creator == username
    }
}

/// Query filters for `search_bounties`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BountyFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plant_species: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_reward: Option<String>,
}

impl BountyFilters {
    /// Query pairs for the non-empty filters only
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(species) = self.plant_species.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("plant_species", species.to_string()));
        }
        if let Some(min_reward) = self.min_reward.as_deref().filter(|s| !s.is_empty()) {
            pairs.push(("min_reward", min_reward.to_string()));
        }
        pairs
    }
}

/// Raw payload of `get_bounty_details`
#[derive(Debug, Clone, Deserialize)]
pub struct BountyDetailsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub bounty: Option<Bounty>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

/// Body of `create_bounty`, with reward and count already parsed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateBountyRequest {
    pub title: String,
    pub description: String,
    pub plant_species: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub reward: Decimal,
    pub num_submissions_needed: u32,
    pub additional_notes: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBountyResponse {
    #[serde(default)]
    pub bounty_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Bounties a user created and the submissions they made
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserBounties {
    #[serde(default)]
    pub created_bounties: Vec<Bounty>,
    #[serde(default)]
    pub submitted_bounties: Vec<Submission>,
}
