use agora_client::{LoginOutcome, RegisterOutcome};
use agora_shared::types::Credentials;
use agora_shared::validation::validate_registration;
use tracing::info;

use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::handlers::DASHBOARD_HINT;

pub async fn login(ctx: &AppContext, username: &str, password: &str) -> CliResult<String> {
    let credentials = Credentials::new(username, password);

    match ctx.client.verify_login(&credentials).await? {
        LoginOutcome::Success => {
            ctx.log_in(username)?;
            info!("Logged in as {}", username);
            Ok(format!("Logged in as {}.\n{}", username, DASHBOARD_HINT))
        }
        LoginOutcome::InvalidPassword => Err(CliError::failed("Invalid password, please try again")),
        LoginOutcome::UnknownUser => Err(CliError::failed("User not found, please register first")),
        LoginOutcome::Other(message) => Err(CliError::failed(
            message.unwrap_or_else(|| "Login failed".to_string()),
        )),
    }
}

pub async fn register(
    ctx: &AppContext,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> CliResult<String> {
    validate_registration(password, confirm_password)?;
    let credentials = Credentials::new(username, password);

    match ctx.client.add_user(&credentials).await? {
        RegisterOutcome::UserExists => Err(CliError::failed(
            "Username already exists, please try another one",
        )),
        RegisterOutcome::Created => {
            ctx.log_in(username)?;
            info!("Registered {}", username);
            Ok(format!("Account created for {}.\n{}", username, DASHBOARD_HINT))
        }
    }
}

pub fn logout(ctx: &AppContext) -> CliResult<String> {
    let user = ctx.current_user()?;
    ctx.session.clear()?;
    Ok(match user {
        Some(username) => format!("Logged out {}.", username),
        None => "No user was logged in.".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_support::context;
    use mockito::{Matcher, Server};
    use serde_json::json;

    #[tokio::test]
    async fn test_login_persists_session() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/verify_login")
            .match_body(Matcher::Json(json!({"username": "nia", "password": "pw"})))
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());
        let output = login(&ctx, "nia", "pw").await.unwrap();

        assert!(output.starts_with("Logged in as nia."));
        assert_eq!(ctx.require_user().unwrap(), "nia");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_failures() {
        let mut server = Server::new_async().await;
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());

        let wrong_password = server
            .mock("POST", "/api/verify_login")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"invalid_password"}"#)
            .create_async()
            .await;
        let err = login(&ctx, "nia", "bad").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid password, please try again");
        wrong_password.remove_async().await;

        server
            .mock("POST", "/api/verify_login")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"invalid_user"}"#)
            .create_async()
            .await;
        let err = login(&ctx, "ghost", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "User not found, please register first");
        assert_eq!(ctx.current_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_checks_passwords_before_calling() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/add_user")
            .expect(0)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());
        let err = register(&ctx, "oli", "a", "b").await.unwrap_err();

        assert_eq!(err.to_string(), "Passwords do not match");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_register_existing_user() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/add_user")
            .with_status(409)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"user_exists"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());
        let err = register(&ctx, "oli", "pw", "pw").await.unwrap_err();

        assert_eq!(err.to_string(), "Username already exists, please try another one");
        assert_eq!(ctx.current_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_register_and_logout() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/add_user")
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"success"}"#)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ctx = context(&server.url(), dir.path());
        register(&ctx, "oli", "pw", "pw").await.unwrap();
        assert_eq!(ctx.require_user().unwrap(), "oli");

        assert_eq!(logout(&ctx).unwrap(), "Logged out oli.");
        assert_eq!(logout(&ctx).unwrap(), "No user was logged in.");
    }
}
