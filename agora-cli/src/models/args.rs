//! # CLI Argument Definitions
//!
//! One subcommand per page of the marketplace.

use agora_shared::types::{DatasetKind, PaymentMethod, SubmissionType, VisualizationKind};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "agora")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Command-line client for the Agora plant bounty marketplace")]
pub struct Cli {
    /// Read settings from a TOML file instead of the environment
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AppCommands,
}

#[derive(Debug, Subcommand)]
pub enum AppCommands {
    /// Show the landing page
    Home {},
    /// Log in with an existing account
    Login {
        username: String,
        #[arg(long, env = "AGORA_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in
    Register {
        username: String,
        #[arg(long, env = "AGORA_PASSWORD", hide_env_values = true)]
        password: String,
        /// Repeat the password
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the logged-in user
    Logout {},
    /// Browse, inspect and create bounties
    Bounties {
        #[command(subcommand)]
        action: BountyAction,
    },
    /// Submit to a bounty or verify submissions
    Submissions {
        #[command(subcommand)]
        action: SubmissionAction,
    },
    /// Profile, created bounties and submissions of the logged-in user
    Dashboard {},
    /// Top contributors by approved submissions
    Leaderboard {},
    /// Earnings and withdrawals
    Cashout {
        #[command(subcommand)]
        action: CashoutAction,
    },
    /// Schedule a field event
    CreateEvent(EventArgs),
    /// Ask the flora identification assistant; reads questions from stdin without a prompt
    Chat { prompt: Option<String> },
    /// Research projects on the project-management API
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum BountyAction {
    /// List bounties, optionally filtered
    List {
        #[arg(long)]
        species: Option<String>,
        #[arg(long)]
        min_reward: Option<String>,
    },
    /// Show a bounty with its submissions
    Show { id: String },
    /// Post a new bounty
    Create(CreateBountyArgs),
}

#[derive(Debug, Args)]
pub struct CreateBountyArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub species: String,
    /// Reward in dollars
    #[arg(long)]
    pub reward: String,
    /// Number of submissions needed
    #[arg(long)]
    pub submissions: String,
    #[arg(long, default_value = "")]
    pub notes: String,
    /// Pay the reward by card right after creating the bounty
    #[arg(long)]
    pub fund: bool,
}

#[derive(Debug, Subcommand)]
pub enum SubmissionAction {
    /// Submit a photo to a bounty
    Submit(SubmitArgs),
    /// Preview the plant identification for a photo
    Identify {
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
    },
    /// Approve or reject a pending submission (bounty creator only)
    Verify {
        /// Bounty the submission belongs to
        #[arg(long)]
        bounty: String,
        submission_id: String,
        #[arg(long, conflicts_with = "reject", required_unless_present = "reject")]
        approve: bool,
        #[arg(long)]
        reject: bool,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    pub bounty_id: String,
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
    #[arg(long = "type", value_enum, default_value_t = SubmissionKind::Research)]
    pub kind: SubmissionKind,
    #[arg(long, default_value = "")]
    pub note: String,
    #[arg(long, allow_hyphen_values = true, requires = "longitude")]
    pub latitude: Option<f64>,
    #[arg(long, allow_hyphen_values = true, requires = "latitude")]
    pub longitude: Option<f64>,
    /// Skip the identification preview
    #[arg(long)]
    pub no_preview: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SubmissionKind {
    Research,
    Removal,
}

impl From<SubmissionKind> for SubmissionType {
    fn from(kind: SubmissionKind) -> Self {
        match kind {
            SubmissionKind::Research => SubmissionType::Research,
            SubmissionKind::Removal => SubmissionType::Removal,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CashoutAction {
    /// Show earnings and withdrawal history
    Status {},
    /// Withdraw earnings
    Withdraw {
        /// Amount in dollars, or "max" for all available earnings
        amount: String,
        #[arg(long, value_enum, default_value_t = PayoutMethod::Stripe)]
        method: PayoutMethod,
        /// PayPal email or bank account details
        #[arg(long, default_value = "")]
        details: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PayoutMethod {
    Stripe,
    Paypal,
    Bank,
}

impl From<PayoutMethod> for PaymentMethod {
    fn from(method: PayoutMethod) -> Self {
        match method {
            PayoutMethod::Stripe => PaymentMethod::Stripe,
            PayoutMethod::Paypal => PaymentMethod::Paypal,
            PayoutMethod::Bank => PaymentMethod::Bank,
        }
    }
}

#[derive(Debug, Args)]
pub struct EventArgs {
    #[arg(long, default_value = "")]
    pub location: String,
    /// Event date
    #[arg(long, default_value = "")]
    pub date: String,
    /// Free-form time range, e.g. "9am-noon"
    #[arg(long, default_value = "")]
    pub time_range: String,
    /// The location is a suggestion and may be left empty
    #[arg(long)]
    pub flexible_location: bool,
    /// The date is a suggestion and may be left empty
    #[arg(long)]
    pub flexible_time: bool,
}

#[derive(Debug, Subcommand)]
pub enum ProjectAction {
    /// Projects you created or joined
    Mine {},
    /// Projects open to join
    Available {},
    /// Show project details
    Show { id: String },
    /// Start a new project
    Create(CreateProjectArgs),
    /// Join a project as a contributor
    Join { id: String },
    /// Edit project details (creator only)
    Update(UpdateProjectArgs),
    /// Progress and dataset counts
    Data { id: String },
    /// Datasets available for download
    Datasets { id: String },
    /// Download project data as CSV
    Download {
        id: String,
        #[arg(long, value_enum, default_value_t = DatasetChoice::All)]
        dataset: DatasetChoice,
        /// Output file; defaults to the name the server suggests
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Visualization data points
    Visualize {
        id: String,
        #[arg(long = "type", value_enum, default_value_t = VisualizationChoice::Map)]
        kind: VisualizationChoice,
    },
}

#[derive(Debug, Args)]
pub struct CreateProjectArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub plant_type: String,
    #[arg(long, default_value = "")]
    pub data_needed: String,
    #[arg(long, default_value = "")]
    pub location: String,
    #[arg(long, default_value = "")]
    pub purpose: String,
}

#[derive(Debug, Args)]
pub struct UpdateProjectArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub plant_type: Option<String>,
    #[arg(long)]
    pub data_needed: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetChoice {
    Pictures,
    MatchingPictures,
    Locations,
    Contributors,
    All,
}

impl From<DatasetChoice> for DatasetKind {
    fn from(choice: DatasetChoice) -> Self {
        match choice {
            DatasetChoice::Pictures => DatasetKind::Pictures,
            DatasetChoice::MatchingPictures => DatasetKind::MatchingPictures,
            DatasetChoice::Locations => DatasetKind::Locations,
            DatasetChoice::Contributors => DatasetKind::Contributors,
            DatasetChoice::All => DatasetKind::All,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VisualizationChoice {
    Map,
    TimeSeries,
    Confidence,
}

impl From<VisualizationChoice> for VisualizationKind {
    fn from(choice: VisualizationChoice) -> Self {
        match choice {
            VisualizationChoice::Map => VisualizationKind::Map,
            VisualizationChoice::TimeSeries => VisualizationKind::TimeSeries,
            VisualizationChoice::Confidence => VisualizationKind::Confidence,
        }
    }
}
