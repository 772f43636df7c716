use agora_shared::types::{confidence_percent, GeoLocation, PlantIdentification, SubmitBountyRequest};
use agora_shared::validation::validate_coordinates;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::handlers::bounties::{fetch, render_details};
use crate::models::SubmitArgs;
use crate::services::image::encode_image;
use crate::services::prompt;

const LOCATION_UNAVAILABLE: &str =
    "Unable to retrieve your location. Please enable location services and try again.";

/// Explicit coordinates win over the configured default
fn resolve_location(ctx: &AppContext, latitude: Option<f64>, longitude: Option<f64>) -> CliResult<GeoLocation> {
    let location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => GeoLocation::new(latitude, longitude),
        _ => ctx
            .config
            .default_location()
            .ok_or_else(|| CliError::failed(LOCATION_UNAVAILABLE))?,
    };
    validate_coordinates(location.latitude, location.longitude)?;
    Ok(location)
}

pub async fn submit(ctx: &AppContext, args: SubmitArgs) -> CliResult<String> {
    let username = ctx.require_user()?;
    let image_base64 = encode_image(args.image.as_deref())?;
    let location = resolve_location(ctx, args.latitude, args.longitude)?;

    let mut sections = Vec::new();
    if !args.no_preview {
        let preview = ctx.client.identify_plant(&image_base64).await;
        sections.push(render_identification(preview.as_ref()));
    }

    let request = SubmitBountyRequest {
        bounty_id: args.bounty_id,
        username,
        image_base64,
        submission_type: args.kind.into(),
        submitter_note: args.note,
        latitude: location.latitude,
        longitude: location.longitude,
    };
    let receipt = ctx.client.submit_bounty(&request).await?;
    info!("Submitted {} to bounty {}", receipt.submission_id, request.bounty_id);

    sections.push(receipt.summary());

    // re-read so the progress reflects this submission
    match fetch(ctx, &request.bounty_id).await {
        Ok((bounty, _)) => sections.push(format!("Bounty progress: {}", bounty.progress())),
        Err(e) => warn!("Could not refresh bounty {}: {}", request.bounty_id, e),
    }
    Ok(sections.join("\n\n"))
}

pub async fn identify(ctx: &AppContext, image: &Path) -> CliResult<String> {
    let image_base64 = encode_image(Some(image))?;
    let result = ctx.client.identify_plant(&image_base64).await;
    Ok(render_identification(result.as_ref()))
}

pub fn render_identification(result: Option<&PlantIdentification>) -> String {
    let result = match result {
        Some(result) if result.scientific_name.is_some() => result,
        _ => return "Plant could not be identified.".to_string(),
    };

    let mut lines = vec![format!(
        "Preview: {}",
        result.scientific_name.as_deref().unwrap_or_default()
    )];
    if let Some(confidence) = result.confidence {
        lines.push(format!("Confidence: {}%", confidence_percent(confidence)));
    }
    if !result.common_names.is_empty() {
        lines.push(format!("Common names: {}", result.common_names.join(", ")));
    }
    lines.join("\n")
}

pub async fn verify(
    ctx: &AppContext,
    bounty_id: &str,
    submission_id: &str,
    approve: bool,
    assume_yes: bool,
) -> CliResult<String> {
    let username = ctx.require_user()?;
    let (bounty, submissions) = fetch(ctx, bounty_id).await?;

    if !bounty.is_created_by(&username) {
        return Err(CliError::failed("Only the bounty creator can verify submissions"));
    }
    let submission = submissions
        .iter()
        .find(|s| s.id == submission_id || s.short_id() == submission_id)
        .ok_or_else(|| CliError::failed(format!("Submission {} not found on this bounty", submission_id)))?;
    if !submission.status.is_pending() {
        return Err(CliError::failed(format!(
            "Submission {} has already been reviewed ({})",
            submission.short_id(),
            submission.status
        )));
    }

    let verb = if approve { "approve" } else { "reject" };
    if !assume_yes {
        let question = format!("Are you sure you want to {} this submission?", verb);
        if !prompt::confirm(&question)? {
            debug!("Verification of {} cancelled", submission.id);
            return Ok("Verification cancelled.".to_string());
        }
    }

    let modified = ctx
        .client
        .verify_submission(&submission.id, &username, approve)
        .await?;
    if modified == 0 {
        return Err(CliError::failed("Failed to update submission status"));
    }

    let outcome = if approve { "approved" } else { "rejected" };
    info!("Submission {} {} by {}", submission.id, outcome, username);

    let (bounty, submissions) = fetch(ctx, bounty_id).await?;
    Ok(format!(
        "Submission {} successfully!\n\n{}",
        outcome,
        render_details(&bounty, &submissions, Some(&username))
    ))
}
