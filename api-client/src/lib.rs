//! Typed client for the Agora bounty marketplace
//!
//! One [`AgoraClient`] wraps both backends: the bounty marketplace API
//! (auth, bounties, submissions, payments, leaderboard, events, chat) and the
//! separate project-management API. Endpoint calls live in [`services`].

pub mod circuit_breaker;
pub mod config;
pub mod error;
pub mod services;
pub mod stripe;
pub mod transport;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use services::{BountyDetails, LoginOutcome, RegisterOutcome, SubmissionReceipt};
pub use stripe::{PaymentConfirmer, StripeConfirmer};
pub use transport::{Service, Transport};

use tracing::info;

#[derive(Debug, Clone)]
pub struct AgoraClient {
    transport: Transport,
}

impl AgoraClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let transport = Transport::new(config)?;
        info!(
            "Agora client initialized (bounty API {}, project API {})",
            transport.config().api_url,
            transport.config().projects_api_url
        );
        Ok(Self { transport })
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }
}
