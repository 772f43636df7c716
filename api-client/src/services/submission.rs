use agora_shared::types::{
    confidence_percent, IdentifyPlantRequest, IdentifyPlantResponse, PlantIdentification,
    SubmitBountyRequest, SubmitBountyResponse, VerifySubmissionRequest, VerifySubmissionResponse,
};
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::transport::Service;
use crate::AgoraClient;

/// Accepted submission with whatever the backend identified
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub submission_id: String,
    pub identified_species: Option<String>,
    pub scientific_name: Option<String>,
    pub confidence: Option<f64>,
}

impl SubmissionReceipt {
    /// Confirmation text listing the identification result
    pub fn summary(&self) -> String {
        let species = match self.identified_species.as_deref().filter(|s| !s.is_empty()) {
            Some(species) => species,
            None => return "Submission successful! Plant could not be identified.".to_string(),
        };

        let mut lines = vec![
            "Submission successful!".to_string(),
            String::new(),
            format!("Plant identified as: {}", species),
        ];
        if let Some(name) = self.scientific_name.as_deref().filter(|s| !s.is_empty()) {
            lines.push(format!("Scientific name: {}", name));
        }
        if let Some(confidence) = self.confidence.filter(|c| *c > 0.0) {
            lines.push(format!("Confidence: {}%", confidence_percent(confidence)));
        }
        lines.join("\n")
    }
}

impl AgoraClient {
    /// Best-effort identification preview; failures are logged and yield `None`
    pub async fn identify_plant(&self, image_base64: &str) -> Option<PlantIdentification> {
        let request = IdentifyPlantRequest { image_base64 };
        match self
            .transport
            .post_json::<_, IdentifyPlantResponse>(Service::BountyApi, "/api/identify_plant", &request)
            .await
        {
            Ok(response) => response.result,
            Err(e) => {
                warn!("Plant preview failed: {}", e);
                None
            }
        }
    }

    pub async fn submit_bounty(&self, request: &SubmitBountyRequest) -> ClientResult<SubmissionReceipt> {
        debug!("Submitting {} for bounty {}", request.submission_type, request.bounty_id);
        let response: SubmitBountyResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/submit_bounty", request)
            .await?;

        match response.submission_id {
            Some(submission_id) => {
                info!("Submission {} accepted for bounty {}", submission_id, request.bounty_id);
                Ok(SubmissionReceipt {
                    submission_id,
                    identified_species: response.identified_species,
                    scientific_name: response.scientific_name,
                    confidence: response.confidence,
                })
            }
            None => Err(ClientError::Api(
                response
                    .message
                    .unwrap_or_else(|| "Failed to submit bounty".to_string()),
            )),
        }
    }

    /// Approves or rejects a submission; returns the number of records changed
    pub async fn verify_submission(
        &self,
        submission_id: &str,
        verified_by: &str,
        is_approved: bool,
    ) -> ClientResult<u64> {
        let request = VerifySubmissionRequest {
            submission_id: submission_id.to_string(),
            verified_by: verified_by.to_string(),
            is_approved,
        };
        let response: VerifySubmissionResponse = self
            .transport
            .post_json(Service::BountyApi, "/api/verify_submission", &request)
            .await?;

        debug!("verify_submission modified {} record(s)", response.modified_count);
        Ok(response.modified_count)
    }
}
