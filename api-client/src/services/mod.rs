//! Endpoint calls, grouped by the page that uses them

pub mod auth;
pub mod bounty;
pub mod chat;
pub mod event;
pub mod payment;
pub mod profile;
pub mod project;
pub mod submission;

pub use auth::{LoginOutcome, RegisterOutcome};
pub use bounty::BountyDetails;
pub use submission::SubmissionReceipt;
