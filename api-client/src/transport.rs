//! HTTP transport shared by every endpoint call
//!
//! Each backend gets its own circuit breaker. Reads are retried with linear
//! back-off; writes go out exactly once.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, State};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Query string pairs; empty values are the caller's responsibility
pub type Query<'a> = &'a [(&'a str, String)];

/// The two backends the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    BountyApi,
    ProjectApi,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Service::BountyApi => "bounty-api",
            Service::ProjectApi => "project-api",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
    config: ClientConfig,
    bounty_breaker: CircuitBreaker,
    project_breaker: CircuitBreaker,
}

impl Transport {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let breaker = |service: Service| {
            CircuitBreaker::new(
                CircuitBreakerConfig::new(service.name())
                    .with_threshold(config.circuit_breaker_threshold)
                    .with_timeout(Duration::from_secs(config.circuit_breaker_timeout_seconds)),
            )
        };
        let bounty_breaker = breaker(Service::BountyApi);
        let project_breaker = breaker(Service::ProjectApi);

        Ok(Self {
            client,
            config,
            bounty_breaker,
            project_breaker,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn breaker(&self, service: Service) -> &CircuitBreaker {
        match service {
            Service::BountyApi => &self.bounty_breaker,
            Service::ProjectApi => &self.project_breaker,
        }
    }

    pub async fn breaker_state(&self, service: Service) -> State {
        self.breaker(service).get_state().await
    }

    fn url(&self, service: Service, path: &str) -> String {
        let base = match service {
            Service::BountyApi => &self.config.api_url,
            Service::ProjectApi => &self.config.projects_api_url,
        };
        format!("{}{}", base.trim_end_matches('/'), path)
    }

    fn request(&self, method: Method, service: Service, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(service, path));
        match (service, &self.config.projects_token) {
            (Service::ProjectApi, Some(token)) => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn admit(&self, service: Service) -> ClientResult<&CircuitBreaker> {
        let breaker = self.breaker(service);
        if !breaker.is_request_allowed().await {
            return Err(ClientError::CircuitOpen(service.name().to_string()));
        }
        Ok(breaker)
    }

    /// GET with retry on transport errors and 5xx answers
    async fn send_get(&self, service: Service, path: &str, query: Query<'_>) -> ClientResult<Response> {
        let breaker = self.admit(service).await?;
        debug!("GET {} {}", service.name(), path);

        let mut attempt: u32 = 0;
        loop {
            if attempt > 0 {
                let delay = Duration::from_millis(self.config.retry_delay_ms * attempt as u64);
                warn!(
                    "Retrying GET {} (attempt {}/{}) after {:?}",
                    path, attempt, self.config.max_retries, delay
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self.request(Method::GET, service, path);
            if !query.is_empty() {
                request = request.query(query);
            }
            let exhausted = attempt >= self.config.max_retries;

            match request.send().await {
                Ok(response) if response.status().is_server_error() && !exhausted => {
                    warn!("{} answered {} for {}", service.name(), response.status(), path);
                }
                Ok(response) => {
                    if response.status().is_server_error() {
                        breaker.record_failure().await;
                    } else {
                        breaker.record_success().await;
                    }
                    return Ok(response);
                }
                Err(e) if !exhausted => {
                    warn!("GET {} failed: {}", path, e);
                }
                Err(e) => {
                    breaker.record_failure().await;
                    return Err(ClientError::Transport(e));
                }
            }
            attempt += 1;
        }
    }

    /// GET a JSON body; any non-2xx status is an error
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<T> {
        let response = self.send_get(service, path, query).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: backend_message(&body),
            });
        }
        serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// GET a binary body such as a CSV export
    pub async fn get_bytes(&self, service: Service, path: &str, query: Query<'_>) -> ClientResult<Vec<u8>> {
        let response = self.send_get(service, path, query).await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: backend_message(&body),
            });
        }
        Ok(body.to_vec())
    }

    /// POST a JSON body once and decode the answer whatever its status.
    ///
    /// The backend reports domain failures as a `message` payload, often with
    /// a 4xx status, so the payload is what callers branch on.
    pub async fn post_json<B, T>(&self, service: Service, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let breaker = self.admit(service).await?;
        debug!("POST {} {}", service.name(), path);

        let response = match self.request(Method::POST, service, path).json(body).send().await {
            Ok(response) => response,
            Err(e) => {
                breaker.record_failure().await;
                return Err(ClientError::Transport(e));
            }
        };

        let status = response.status();
        if status.is_server_error() {
            breaker.record_failure().await;
        } else {
            breaker.record_success().await;
        }

        let bytes = response.bytes().await?;
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(ClientError::Status {
                status: status.as_u16(),
                message: backend_message(&bytes),
            }),
            Err(e) => Err(ClientError::Decode(e.to_string())),
        }
    }
}

/// `message` field of a JSON error body, when there is one
fn backend_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()?
        .get("message")?
        .as_str()
        .map(str::to_string)
}
