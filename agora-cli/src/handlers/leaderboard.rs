use agora_shared::types::{rank_medal, LeaderboardEntry};

use crate::context::AppContext;
use crate::error::CliResult;

pub async fn leaderboard(ctx: &AppContext) -> CliResult<String> {
    let entries = ctx.client.leaderboard().await?;
    Ok(render_leaderboard(&entries))
}

pub fn render_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No approved submissions yet.".to_string();
    }

    let mut lines = vec!["Rank  User  Approved submissions".to_string()];
    for (index, entry) in entries.iter().enumerate() {
        let rank = index + 1;
        let badge = match rank_medal(rank) {
            Some(medal) => format!("{} {}", medal, rank),
            None => rank.to_string(),
        };
        lines.push(format!(
            "{}  {}  {}",
            badge, entry.username, entry.total_approved_submissions
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context;
    use mockito::Server;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_leaderboard_medals() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/leaderboard")
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"_id":"a","total_approved_submissions":9},{"_id":"b","total_approved_submissions":7},
                    {"_id":"c","total_approved_submissions":4},{"_id":"d","total_approved_submissions":1}]"#,
            )
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());
        let output = leaderboard(&ctx).await.unwrap();

        assert_eq!(
            output,
            "Rank  User  Approved submissions\n🥇 1  a  9\n🥈 2  b  7\n🥉 3  c  4\n4  d  1"
        );
    }

    #[test]
    fn test_empty_leaderboard() {
        assert_eq!(render_leaderboard(&[]), "No approved submissions yet.");
    }
}
