use agora_shared::types::{format_usd, PaymentMethod, Withdrawal, WithdrawalRequest};
use agora_shared::validation::{parse_withdraw_amount, validate_withdrawal};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::error::{CliError, CliResult};

pub async fn status(ctx: &AppContext) -> CliResult<String> {
    let username = ctx.require_user()?;
    let profile = ctx.client.get_user_profile(&username).await?;
    let history = ctx.client.get_withdraw_history(&username).await;
    Ok(render_status(profile.earnings, &history))
}

pub fn render_status(earnings: Decimal, history: &[Withdrawal]) -> String {
    let mut lines = vec![format!("Available earnings: {}", format_usd(earnings)), String::new()];
    if history.is_empty() {
        lines.push("No withdrawals yet.".to_string());
    } else {
        lines.push("Withdrawal history:".to_string());
        lines.extend(history.iter().map(|w| {
            format!("  {}  {}  {}", w.display_date(), format_usd(w.amount), w.status)
        }));
    }
    lines.join("\n")
}

/// `max` withdraws everything available
fn requested_amount(input: &str, earnings: Decimal) -> CliResult<Decimal> {
    if input.trim().eq_ignore_ascii_case("max") {
        return Ok(earnings);
    }
    Ok(parse_withdraw_amount(input)?)
}

pub async fn withdraw(
    ctx: &AppContext,
    amount: &str,
    method: PaymentMethod,
    details: &str,
) -> CliResult<String> {
    let username = ctx.require_user()?;
    let profile = ctx.client.get_user_profile(&username).await?;
    let amount = requested_amount(amount, profile.earnings)?;
    validate_withdrawal(amount, profile.earnings, method, details)?;

    let message = if method.requires_details() {
        let request = WithdrawalRequest {
            username: username.clone(),
            amount,
            payment_method: method,
            payment_details: details.to_string(),
        };
        if let Err(e) = ctx.client.process_withdrawal(&request).await {
            warn!("Withdrawal of {} for {} refused: {}", amount, username, e);
            let history = ctx.client.get_withdraw_history(&username).await;
            return Err(CliError::failed(format!(
                "{}\n\n{}",
                e,
                render_status(profile.earnings, &history)
            )));
        }
        format!(
            "Successfully requested withdrawal of {}. Our team will process it shortly.",
            format_usd(amount)
        )
    } else {
        let confirmer = ctx.payment_confirmer()?;
        let secret = ctx.client.create_cashout_intent(&username, amount).await?;
        if let Err(e) = confirmer.confirm_card_payment(&secret).await {
            warn!("Card payout of {} for {} failed: {}", amount, username, e);
            return Err(e.into());
        }
        info!("Card payout of {} confirmed for {}", amount, username);
        format!("Successfully processed withdrawal of {}.", format_usd(amount))
    };

    // optimistic balance; the profile is not re-read
    let remaining = profile.earnings - amount;
    let history = ctx.client.get_withdraw_history(&username).await;
    Ok(format!("{}\n\n{}", message, render_status(remaining, &history)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::{logged_in, MockConfirmer};
    use agora_client::ClientError;
    use mockito::{Matcher, Server, ServerGuard};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    async fn server_with_profile(earnings: &str) -> ServerGuard {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/get_user_profile?username=kai")
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"username":"kai","earnings":{}}}"#, earnings))
            .create_async()
            .await;
        server
    }

    #[tokio::test]
    async fn test_status_with_unavailable_history() {
        let mut server = server_with_profile("20.5").await;
        server
            .mock("GET", "/api/get_withdraw_history?username=kai")
            .with_status(500)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "kai");
        assert_eq!(
            status(&ctx).await.unwrap(),
            "Available earnings: $20.50\n\nNo withdrawals yet."
        );
    }

    #[tokio::test]
    async fn test_paypal_withdrawal() {
        let mut server = server_with_profile("20").await;
        let withdrawal = server
            .mock("POST", "/api/process_withdrawal")
            .match_body(Matcher::Json(json!({
                "username": "kai",
                "amount": 12.5,
                "payment_method": "paypal",
                "payment_details": "kai@example.com"
            })))
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/get_withdraw_history?username=kai")
            .with_header("content-type", "application/json")
            .with_body(r#"{"history":[{"amount":12.5,"date":"2025-04-02T10:11:12Z","status":"pending"}]}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "kai");
        let output = withdraw(&ctx, "12.50", PaymentMethod::Paypal, "kai@example.com")
            .await
            .unwrap();

        assert_eq!(
            output,
            "Successfully requested withdrawal of $12.50. Our team will process it shortly.\n\n\
             Available earnings: $7.50\n\n\
             Withdrawal history:\n  \
             2025-04-02  $12.50  pending"
        );
        withdrawal.assert_async().await;
    }

    #[tokio::test]
    async fn test_card_withdrawal_of_everything() {
        let mut server = server_with_profile("8").await;
        server
            .mock("POST", "/api/create_cashout_intent")
            .match_body(Matcher::Json(json!({"username": "kai", "amount": 8.0})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success","clientSecret":"pi_7_secret_y"}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/get_withdraw_history?username=kai")
            .with_header("content-type", "application/json")
            .with_body(r#"{"history":[]}"#)
            .create_async()
            .await;

        let mut confirmer = MockConfirmer::new();
        confirmer
            .expect_confirm_card_payment()
            .withf(|secret| secret.to_string() == "pi_7_secret_y")
            .times(1)
            .returning(|_| Ok(()));

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "kai").with_confirmer(Arc::new(confirmer));
        let output = withdraw(&ctx, "max", PaymentMethod::Stripe, "").await.unwrap();

        assert_eq!(
            output,
            "Successfully processed withdrawal of $8.00.\n\nAvailable earnings: $0.00\n\nNo withdrawals yet."
        );
    }

    #[tokio::test]
    async fn test_card_decline_is_reported() {
        let mut server = server_with_profile("8").await;
        server
            .mock("POST", "/api/create_cashout_intent")
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success","clientSecret":"pi_7_secret_y"}"#)
            .create_async()
            .await;

        let mut confirmer = MockConfirmer::new();
        confirmer
            .expect_confirm_card_payment()
            .returning(|_| Err(ClientError::Payment("Your card was declined.".to_string())));

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "kai").with_confirmer(Arc::new(confirmer));
        let err = withdraw(&ctx, "5", PaymentMethod::Stripe, "").await.unwrap_err();
        assert_eq!(err.to_string(), "Your card was declined.");
    }

    #[tokio::test]
    async fn test_withdrawal_validation() {
        let mut server = server_with_profile("10").await;
        let withdrawal = server
            .mock("POST", "/api/process_withdrawal")
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "kai");

        let cases = [
            ("25", PaymentMethod::Bank, "acct", "You cannot withdraw more than your available earnings"),
            ("0", PaymentMethod::Bank, "acct", "Please enter a valid withdrawal amount"),
            ("5", PaymentMethod::Paypal, " ", "Please enter your PayPal email"),
            ("5", PaymentMethod::Bank, "", "Please enter your bank account details"),
        ];
        for (amount, method, details, expected) in cases {
            let err = withdraw(&ctx, amount, method, details).await.unwrap_err();
            assert!(matches!(err, CliError::Validation(_)));
            assert_eq!(err.to_string(), expected);
        }
        withdrawal.assert_async().await;
    }

    #[tokio::test]
    async fn test_backend_refusal() {
        let mut server = server_with_profile("10").await;
        server
            .mock("POST", "/api/process_withdrawal")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Withdrawals are paused"}"#)
            .create_async()
            .await;
        let history = server
            .mock("GET", "/api/get_withdraw_history?username=kai")
            .with_header("content-type", "application/json")
            .with_body(r#"{"history":[{"amount":3,"date":"2025-03-30","status":"completed"}]}"#)
            .expect(1)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = logged_in(&server.url(), dir.path(), "kai");
        let err = withdraw(&ctx, "5", PaymentMethod::Bank, "acct 1").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Withdrawals are paused\n\n\
             Available earnings: $10.00\n\n\
             Withdrawal history:\n  \
             2025-03-30  $3.00  completed"
        );
        history.assert_async().await;
    }
}
