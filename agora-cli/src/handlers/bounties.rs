use agora_client::BountyDetails;
use agora_shared::types::{format_usd, Bounty, BountyFilters, Submission};
use agora_shared::validation::BountyForm;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::handlers::{bounty_line, submission_line};
use crate::models::CreateBountyArgs;

pub async fn list(ctx: &AppContext, filters: BountyFilters) -> CliResult<String> {
    let bounties = ctx.client.search_bounties(&filters).await?;
    Ok(render_list(&bounties))
}

pub fn render_list(bounties: &[Bounty]) -> String {
    if bounties.is_empty() {
        return "No bounties found.".to_string();
    }
    let mut lines = vec![format!("{} bounties:", bounties.len())];
    lines.extend(bounties.iter().map(bounty_line));
    lines.join("\n")
}

/// Fetches a bounty, turning "not found" into an error
pub(crate) async fn fetch(ctx: &AppContext, bounty_id: &str) -> CliResult<(Bounty, Vec<Submission>)> {
    match ctx.client.get_bounty_details(bounty_id).await? {
        BountyDetails::Found { bounty, submissions } => Ok((bounty, submissions)),
        BountyDetails::NotFound => Err(CliError::failed("Bounty not found")),
    }
}

pub async fn show(ctx: &AppContext, bounty_id: &str) -> CliResult<String> {
    let (bounty, submissions) = fetch(ctx, bounty_id).await?;
    let username = ctx.current_user()?;
    Ok(render_details(&bounty, &submissions, username.as_deref()))
}

pub fn render_details(bounty: &Bounty, submissions: &[Submission], username: Option<&str>) -> String {
    let mut lines = vec![
        format!("{} [{}]", bounty.title, bounty.status.label()),
        format!("Species: {}", bounty.plant_species),
        format!("Reward: {}", format_usd(bounty.reward)),
        format!("Progress: {}", bounty.progress()),
    ];
    if !bounty.creator.is_empty() {
        lines.push(format!("Posted by: {}", bounty.creator));
    }
    if !bounty.description.is_empty() {
        lines.push(String::new());
        lines.push(bounty.description.clone());
    }
    if let Some(notes) = bounty.additional_notes.as_deref().filter(|n| !n.is_empty()) {
        lines.push(format!("Notes: {}", notes));
    }

    lines.push(String::new());
    if submissions.is_empty() {
        lines.push("No submissions yet.".to_string());
    } else {
        lines.push(format!("Submissions ({}):", submissions.len()));
        for submission in submissions {
            let mut line = format!("  {}", submission_line(submission));
            if !submission.username.is_empty() {
                line.push_str(&format!(" by {}", submission.username));
            }
            if let Some(location) = submission.location {
                line.push_str(&format!(" at {}", location));
            }
            lines.push(line);
            if let Some(note) = submission.submitter_note.as_deref().filter(|n| !n.is_empty()) {
                lines.push(format!("    Note: {}", note));
            }
        }
    }

    let is_creator = username.map(|u| bounty.is_created_by(u)).unwrap_or(false);
    if is_creator && submissions.iter().any(|s| s.status.is_pending()) {
        lines.push(String::new());
        lines.push(format!(
            "Review pending submissions with `agora submissions verify --bounty {} <SUBMISSION_ID> --approve|--reject`.",
            bounty.id
        ));
    }
    lines.join("\n")
}

pub async fn create(ctx: &AppContext, args: CreateBountyArgs) -> CliResult<String> {
    let username = ctx.require_user()?;
    let fund = args.fund;
    let form = BountyForm {
        title: args.title,
        description: args.description,
        plant_species: args.species,
        reward: args.reward,
        num_submissions_needed: args.submissions,
        additional_notes: args.notes,
    };
    let request = form.into_request(&username)?;
    let confirmer = if fund { Some(ctx.payment_confirmer()?) } else { None };

    let bounty_id = ctx.client.create_bounty(&request).await?;
    let mut output = format!("Bounty created successfully! ID: {}", bounty_id);

    if let Some(confirmer) = confirmer {
        let secret = ctx
            .client
            .create_payment_intent(&username, request.reward, Some(&bounty_id))
            .await?;
        match confirmer.confirm_card_payment(&secret).await {
            Ok(()) => {
                info!("Funded bounty {} with {}", bounty_id, request.reward);
                output.push_str(&format!("\nPayment of {} received.", format_usd(request.reward)));
            }
            Err(e) => {
                warn!("Funding bounty {} failed: {}", bounty_id, e);
                return Err(CliError::failed(format!(
                    "Bounty {} was created but the payment failed: {}",
                    bounty_id, e
                )));
            }
        }
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::{context, logged_in, MockConfirmer};
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    const DETAILS: &str = r#"{
        "message": "success",
        "bounty": {"id":"b1","title":"Find milkweed","plant_species":"Asclepias syriaca","reward":25.5,
                   "num_submissions_needed":10,"current_submissions":1,"status":"open","creator":"ada"},
        "submissions": [{"id":"s1234567890","username":"ben","status":"pending_verification",
                         "identified_species":"Milkweed","confidence":0.8,
                         "location":{"latitude":40.1,"longitude":-88.2},"submitter_note":"by the fence"}]
    }"#;

    fn args(fund: bool) -> CreateBountyArgs {
        CreateBountyArgs {
            title: "Find milkweed".to_string(),
            description: "Monarch habitat".to_string(),
            species: "Asclepias syriaca".to_string(),
            reward: "12.50".to_string(),
            submissions: "4".to_string(),
            notes: String::new(),
            fund,
        }
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/search_bounties")
            .match_query(Matcher::UrlEncoded("plant_species".into(), "Asclepias".into()))
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"id":"b1","title":"Find milkweed","plant_species":"Asclepias","reward":10,"num_submissions_needed":2}]"#,
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());
        let filters = BountyFilters {
            plant_species: Some("Asclepias".to_string()),
            min_reward: None,
        };
        let output = list(&ctx, filters).await.unwrap();

        assert_eq!(
            output,
            "1 bounties:\n[b1] Find milkweed (Asclepias) $10.00 reward, 0/2 submissions [Open]"
        );
        assert_eq!(render_list(&[]), "No bounties found.");
    }

    #[tokio::test]
    async fn test_show_for_creator() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/get_bounty_details?bounty_id=b1")
            .with_header("content-type", "application/json")
            .with_body(DETAILS)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "ada");
        let output = show(&ctx, "b1").await.unwrap();

        assert_eq!(
            output,
            "Find milkweed [Open]\n\
             Species: Asclepias syriaca\n\
             Reward: $25.50\n\
             Progress: 1/10 submissions\n\
             Posted by: ada\n\
             \n\
             Submissions (1):\n  \
             [s1234567] Milkweed research submission, pending_verification, 80% confidence by ben at 40.1000, -88.2000\n    \
             Note: by the fence\n\
             \n\
             Review pending submissions with `agora submissions verify --bounty b1 <SUBMISSION_ID> --approve|--reject`."
        );
    }

    #[tokio::test]
    async fn test_show_missing_and_failing() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/get_bounty_details?bounty_id=nope")
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"bounty_not_found"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/get_bounty_details?bounty_id=broken")
            .with_status(500)
            .with_body(r#"{"message":"db down"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());
        assert_eq!(show(&ctx, "nope").await.unwrap_err().to_string(), "Bounty not found");
        assert_eq!(
            show(&ctx, "broken").await.unwrap_err().to_string(),
            "HTTP error! Status: 500"
        );
    }

    #[tokio::test]
    async fn test_create_requires_login() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context("http://127.0.0.1:1", dir.path());
        assert!(matches!(create(&ctx, args(false)).await, Err(CliError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_create_validates_reward() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in("http://127.0.0.1:1", dir.path(), "ada");
        let mut bad = args(false);
        bad.reward = "free".to_string();

        let err = create(&ctx, bad).await.unwrap_err();
        assert_eq!(err.to_string(), "Reward must be a positive number: free");
    }

    #[tokio::test]
    async fn test_create_and_fund() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/create_bounty")
            .match_body(Matcher::PartialJson(json!({
                "title": "Find milkweed",
                "reward": 12.5,
                "num_submissions_needed": 4,
                "username": "ada"
            })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"bounty_id":"b9"}"#)
            .create_async()
            .await;
        let intent = server
            .mock("POST", "/api/create_payment_intent")
            .match_body(Matcher::Json(json!({"username": "ada", "amount": 12.5, "bounty_id": "b9"})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success","clientSecret":"pi_9_secret_x"}"#)
            .create_async()
            .await;

        let mut confirmer = MockConfirmer::new();
        confirmer
            .expect_confirm_card_payment()
            .withf(|secret| secret.to_string() == "pi_9_secret_x")
            .times(1)
            .returning(|_| Ok(()));

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "ada").with_confirmer(Arc::new(confirmer));
        let output = create(&ctx, args(true)).await.unwrap();

        assert_eq!(output, "Bounty created successfully! ID: b9\nPayment of $12.50 received.");
        intent.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_fund_without_processor() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/create_bounty")
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "ada");
        assert!(create(&ctx, args(true)).await.is_err());
        mock.assert_async().await;
    }
}
