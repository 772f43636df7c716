use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Circuit breaker guarding one backend service.
/// Fails fast while the service keeps failing instead of waiting on timeouts.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    state: Arc<RwLock<CircuitBreakerState>>,
    config: CircuitBreakerConfig,
}

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Normal operation - requests are allowed through
    Closed,
    /// Service is failing - requests are rejected immediately
    Open,
    /// Testing if service has recovered - the next request decides
    HalfOpen,
}

#[derive(Debug, Clone)]
struct CircuitBreakerState {
    state: State,
    consecutive_failures: u32,
    last_state_change: Instant,
    rejected_requests: u64,
}

impl Default for CircuitBreakerState {
    fn default() -> Self {
        Self {
            state: State::Closed,
            consecutive_failures: 0,
            last_state_change: Instant::now(),
            rejected_requests: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before opening the circuit
    pub failure_threshold: u32,
    /// Time to wait before letting a probe request through
    pub timeout: Duration,
    /// Service name used in logs and errors
    pub name: String,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            timeout: Duration::from_secs(60),
            name: "default".to_string(),
        }
    }
}

impl CircuitBreakerConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_threshold(mut self, failure_threshold: u32) -> Self {
        self.failure_threshold = failure_threshold;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        debug!("Initializing circuit breaker: {}", config.name);

        Self {
            state: Arc::new(RwLock::new(CircuitBreakerState::default())),
            config,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Check if a request is allowed through the circuit breaker
    pub async fn is_request_allowed(&self) -> bool {
        let mut state = self.state.write().await;

        match state.state {
            State::Closed | State::HalfOpen => true,
            State::Open => {
                if state.last_state_change.elapsed() >= self.config.timeout {
                    info!("Circuit breaker {} timeout elapsed - transitioning to HalfOpen", self.config.name);
                    state.state = State::HalfOpen;
                    state.last_state_change = Instant::now();
                    true
                } else {
                    state.rejected_requests += 1;
                    debug!("Circuit breaker {} is Open - rejecting request", self.config.name);
                    false
                }
            }
        }
    }

    /// Record a successful call; a single success closes the circuit
    pub async fn record_success(&self) {
        let mut state = self.state.write().await;

        if state.state != State::Closed {
            info!("Circuit breaker {} recovered - transitioning to Closed", self.config.name);
            state.state = State::Closed;
            state.last_state_change = Instant::now();
        }
        state.consecutive_failures = 0;
    }

    /// Record a failed call
    pub async fn record_failure(&self) {
        let mut state = self.state.write().await;
        state.consecutive_failures += 1;

        match state.state {
            State::Closed => {
                if state.consecutive_failures >= self.config.failure_threshold {
                    warn!(
                        "Circuit breaker {} failure threshold reached ({}/{}) - transitioning to Open",
                        self.config.name, state.consecutive_failures, self.config.failure_threshold
                    );
                    state.state = State::Open;
                    state.last_state_change = Instant::now();
                } else {
                    debug!(
                        "Circuit breaker {} - failure {}/{}",
                        self.config.name, state.consecutive_failures, self.config.failure_threshold
                    );
                }
            }
            State::HalfOpen => {
                warn!(
                    "Circuit breaker {} failed during recovery - transitioning back to Open",
                    self.config.name
                );
                state.state = State::Open;
                state.last_state_change = Instant::now();
            }
            State::Open => {}
        }
    }

    pub async fn get_state(&self) -> State {
        self.state.read().await.state
    }

    /// Number of requests turned away while open
    pub async fn rejected_requests(&self) -> u64 {
        self.state.read().await.rejected_requests
    }
}
