//! Command handlers. Each returns the text printed on success.

pub mod auth;
pub mod bounties;
pub mod cashout;
pub mod chatbot;
pub mod dashboard;
pub mod events;
pub mod home;
pub mod leaderboard;
pub mod projects;
pub mod submissions;

use agora_shared::types::{confidence_percent, format_usd, Bounty, Submission};

pub const DASHBOARD_HINT: &str = "Run `agora dashboard` to see your bounties and submissions.";

/// One-line bounty summary used by lists
pub(crate) fn bounty_line(bounty: &Bounty) -> String {
    format!(
        "[{}] {} ({}) {} reward, {} [{}]",
        bounty.id,
        bounty.title,
        bounty.plant_species,
        format_usd(bounty.reward),
        bounty.progress(),
        bounty.status.label()
    )
}

/// One-line submission summary used by lists
pub(crate) fn submission_line(submission: &Submission) -> String {
    let mut line = format!(
        "[{}] {} {} submission, {}",
        submission.short_id(),
        submission.display_species(),
        submission.submission_type,
        submission.status
    );
    if let Some(confidence) = submission.confidence.filter(|c| *c > 0.0) {
        line.push_str(&format!(", {}% confidence", confidence_percent(confidence)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines() {
        let bounty: Bounty = serde_json::from_str(
            r#"{"id":"b1","title":"Find milkweed","plant_species":"Asclepias","reward":25,
                "num_submissions_needed":10,"current_submissions":3,"status":"completed"}"#,
        )
        .unwrap();
        assert_eq!(
            bounty_line(&bounty),
            "[b1] Find milkweed (Asclepias) $25.00 reward, 3/10 submissions [Completed]"
        );

        let submission: Submission = serde_json::from_str(
            r#"{"id":"abcdef123456","identified_species":"Milkweed","confidence":0.914,"status":"approved"}"#,
        )
        .unwrap();
        assert_eq!(
            submission_line(&submission),
            "[abcdef12] Milkweed research submission, approved, 91% confidence"
        );
    }
}
