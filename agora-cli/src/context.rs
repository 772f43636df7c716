use agora_client::{AgoraClient, PaymentConfirmer, StripeConfirmer};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::error::{CliError, CliResult};
use crate::services::session::{Session, SessionStore};

/// Everything a command handler needs
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub client: AgoraClient,
    pub session: SessionStore,
    /// Absent when no publishable key is configured
    pub confirmer: Option<Arc<dyn PaymentConfirmer>>,
}

impl AppContext {
    pub fn new(config: Config) -> CliResult<Self> {
        let client = AgoraClient::new(config.client_config())?;
        let session = SessionStore::new(config.session.file.clone());

        let confirmer: Option<Arc<dyn PaymentConfirmer>> =
            match config.payments.stripe_publishable_key.as_deref() {
                Some(key) => Some(Arc::new(StripeConfirmer::new(
                    &config.payments.stripe_api_url,
                    key,
                    config.api.timeout_seconds,
                )?)),
                None => {
                    debug!("No publishable key configured, card payments are unavailable");
                    None
                }
            };

        debug!("Session file: {}", session.path().display());
        Ok(Self {
            config,
            client,
            session,
            confirmer,
        })
    }

    #[cfg(test)]
    pub fn with_confirmer(mut self, confirmer: Arc<dyn PaymentConfirmer>) -> Self {
        self.confirmer = Some(confirmer);
        self
    }

    pub fn current_user(&self) -> CliResult<Option<String>> {
        self.session.current_user()
    }

    pub fn require_user(&self) -> CliResult<String> {
        self.current_user()?.ok_or(CliError::NotLoggedIn)
    }

    pub fn log_in(&self, username: &str) -> CliResult<()> {
        self.session.save(&Session::for_user(username))
    }

    pub fn payment_confirmer(&self) -> CliResult<&dyn PaymentConfirmer> {
        self.confirmer.as_deref().ok_or_else(|| {
            CliError::failed("Card payments are not configured. Set STRIPE_PUBLISHABLE_KEY and try again.")
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use agora_client::ClientResult;
    use async_trait::async_trait;
    use mockall::mock;
    use std::path::Path;

    mock! {
        pub Confirmer {}

        #[async_trait]
        impl PaymentConfirmer for Confirmer {
            async fn confirm_card_payment(&self, client_secret: &str) -> ClientResult<()>;
        }
    }

    /// Context pointed at a mock server for both APIs, with the session under `dir`
    pub fn context(url: &str, dir: &Path) -> AppContext {
        let mut config = Config::default();
        config.api.url = url.to_string();
        config.api.projects_url = url.to_string();
        config.api.max_retries = 0;
        config.api.retry_delay_ms = 1;
        config.session.file = dir.join("session.toml");
        AppContext::new(config).unwrap()
    }

    pub fn logged_in(url: &str, dir: &Path, username: &str) -> AppContext {
        let ctx = context(url, dir);
        ctx.log_in(username).unwrap();
        ctx
    }
}
