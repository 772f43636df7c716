/// Submission records, plant identification results and verification payloads
use serde::{Deserialize, Serialize};

use super::common::{open_string_enum, GeoLocation};

open_string_enum! {
    /// Verification state of a submission
    pub enum SubmissionStatus {
        PendingVerification => "pending_verification",
        Approved => "approved",
        Rejected => "rejected",
    }
}

impl Default for SubmissionStatus {
    fn default() -> Self {
        SubmissionStatus::PendingVerification
    }
}

impl SubmissionStatus {
    /// Only submissions still waiting for the bounty creator can be verified
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::PendingVerification)
    }
}

/// Kind of field work a submission reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionType {
    #[default]
    Research,
    Removal,
}

impl std::fmt::Display for SubmissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionType::Research => write!(f, "research"),
            SubmissionType::Removal => write!(f, "removal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    #[serde(default)]
    pub bounty_id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub submission_type: SubmissionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identified_species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scientific_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub common_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitter_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Submission {
    /// Species name to show in lists, falling back to "Unidentified"
    pub fn display_species(&self) -> &str {
        self.identified_species.as_deref().unwrap_or("Unidentified")
    }

    /// First eight characters of the id, as shown next to verify actions
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((index, _)) => &self.id[..index],
            None => &self.id,
        }
    }
}

/// Converts a 0..1 confidence score to a whole percentage
pub fn confidence_percent(confidence: f64) -> i64 {
    (confidence * 100.0).round() as i64
}

/// Body of `submit_bounty`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitBountyRequest {
    pub bounty_id: String,
    pub username: String,
    pub image_base64: String,
    pub submission_type: SubmissionType,
    pub submitter_note: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubmitBountyResponse {
    #[serde(default)]
    pub submission_id: Option<String>,
    #[serde(default)]
    pub identified_species: Option<String>,
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Identification preview returned by `identify_plant`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantIdentification {
    #[serde(default)]
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub common_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IdentifyPlantRequest<'a> {
    pub image_base64: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentifyPlantResponse {
    #[serde(default)]
    pub result: Option<PlantIdentification>,
}

/// Body of `verify_submission`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifySubmissionRequest {
    pub submission_id: String,
    pub verified_by: String,
    pub is_approved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerifySubmissionResponse {
    #[serde(default)]
    pub modified_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}
