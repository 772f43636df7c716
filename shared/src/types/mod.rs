//! Data types exchanged with the Agora backends
//!
//! Records are passed through from the backend as-is. The only client-side
//! interpretation is typed parsing of statuses, amounts and wire field names:
//!
//! - Bounties, filters and the bounty endpoints' payloads
//! - Submissions, plant identification and verification
//! - User profiles and leaderboard rows
//! - Payment intents, cashouts and withdrawals
//! - Events, flora chat messages and the project-management API

pub mod bounty;
pub mod chat;
pub mod common;
pub mod event;
pub mod payment;
pub mod project;
pub mod submission;
pub mod user;

pub use bounty::{
    Bounty, BountyDetailsResponse, BountyFilters, BountyStatus, CreateBountyRequest,
    CreateBountyResponse, UserBounties,
};
pub use chat::{
    AskRequest, AskResponse, ChatMessage, ChatRole, CHAT_APOLOGY, CHAT_WELCOME,
    FLORA_SYSTEM_MESSAGE,
};
pub use common::{GeoLocation, MessageResponse, MESSAGE_SUCCESS};
pub use event::Event;
pub use payment::{
    format_usd, CashoutIntentRequest, PaymentIntentRequest, PaymentIntentResponse, PaymentMethod,
    WithdrawHistoryResponse, Withdrawal, WithdrawalRequest, WithdrawalStatus,
};
pub use project::{
    ConfidencePoint, CreateProjectRequest, DatasetDescriptor, DatasetKind, DatasetSummary,
    JoinProjectRequest, MapPoint, Project, ProjectDataSummary, ProjectMutationResponse,
    ProjectProgress, ProjectUpdate, TimeSeriesPoint, UpdateProjectRequest, Visualization,
    VisualizationKind,
};
pub use submission::{
    confidence_percent, IdentifyPlantRequest, IdentifyPlantResponse, PlantIdentification,
    SubmitBountyRequest, SubmitBountyResponse, Submission, SubmissionStatus, SubmissionType,
    VerifySubmissionRequest, VerifySubmissionResponse,
};
pub use user::{
    rank_medal, Credentials, LeaderboardEntry, UserProfile, MESSAGE_INVALID_PASSWORD,
    MESSAGE_INVALID_USER, MESSAGE_USER_EXISTS,
};
