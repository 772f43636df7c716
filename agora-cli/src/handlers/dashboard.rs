use agora_shared::types::{format_usd, UserBounties, UserProfile};

use crate::context::AppContext;
use crate::error::CliResult;
use crate::handlers::{bounty_line, submission_line};

const PREVIEW_COUNT: usize = 3;

pub async fn dashboard(ctx: &AppContext) -> CliResult<String> {
    let username = ctx.require_user()?;
    let (profile, bounties) = tokio::try_join!(
        ctx.client.get_user_profile(&username),
        ctx.client.get_user_bounties(&username)
    )?;
    Ok(render_dashboard(&profile, &bounties))
}

pub fn render_dashboard(profile: &UserProfile, bounties: &UserBounties) -> String {
    let mut lines = vec![
        profile.username.clone(),
        profile.role_label(),
        format!("Earnings: {}", format_usd(profile.earnings)),
        String::new(),
        format!("Created bounties: {}", bounties.created_bounties.len()),
    ];
    lines.extend(
        bounties
            .created_bounties
            .iter()
            .take(PREVIEW_COUNT)
            .map(|b| format!("  {}", bounty_line(b))),
    );

    lines.push(format!("Submissions: {}", bounties.submitted_bounties.len()));
    lines.extend(
        bounties
            .submitted_bounties
            .iter()
            .take(PREVIEW_COUNT)
            .map(|s| format!("  {}", submission_line(s))),
    );
    lines.join("\n")
}
