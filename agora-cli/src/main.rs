mod config;
mod context;
mod error;
mod handlers;
mod models;
mod services;

use agora_shared::observability::init_logging;
use agora_shared::types::BountyFilters;
use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::debug;

use crate::config::Config;
use crate::context::AppContext;
use crate::error::CliResult;
use crate::handlers::{
    auth, bounties, cashout, chatbot, dashboard, events, home, leaderboard, projects, submissions,
};
use crate::models::{
    AppCommands, BountyAction, CashoutAction, Cli, ProjectAction, SubmissionAction,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;
    init_logging(config.log_config()?)?;
    debug!("Configuration loaded");

    let ctx = AppContext::new(config).context("Failed to initialize the Agora client")?;
    let output = run(&ctx, cli.command).await?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

async fn run(ctx: &AppContext, command: AppCommands) -> CliResult<String> {
    match command {
        AppCommands::Home {} => home::home(ctx),
        AppCommands::Login { username, password } => auth::login(ctx, &username, &password).await,
        AppCommands::Register {
            username,
            password,
            confirm_password,
        } => auth::register(ctx, &username, &password, &confirm_password).await,
        AppCommands::Logout {} => auth::logout(ctx),
        AppCommands::Bounties { action } => match action {
            BountyAction::List { species, min_reward } => {
                let filters = BountyFilters {
                    plant_species: species,
                    min_reward,
                };
                bounties::list(ctx, filters).await
            }
            BountyAction::Show { id } => bounties::show(ctx, &id).await,
            BountyAction::Create(args) => bounties::create(ctx, args).await,
        },
        AppCommands::Submissions { action } => match action {
            SubmissionAction::Submit(args) => submissions::submit(ctx, args).await,
            SubmissionAction::Identify { image } => submissions::identify(ctx, &image).await,
            SubmissionAction::Verify {
                bounty,
                submission_id,
                approve,
                reject: _,
                yes,
            } => submissions::verify(ctx, &bounty, &submission_id, approve, yes).await,
        },
        AppCommands::Dashboard {} => dashboard::dashboard(ctx).await,
        AppCommands::Leaderboard {} => leaderboard::leaderboard(ctx).await,
        AppCommands::Cashout { action } => match action {
            CashoutAction::Status {} => cashout::status(ctx).await,
            CashoutAction::Withdraw {
                amount,
                method,
                details,
            } => cashout::withdraw(ctx, &amount, method.into(), &details).await,
        },
        AppCommands::CreateEvent(args) => events::create_event(ctx, args).await,
        AppCommands::Chat { prompt } => chatbot::chat(ctx, prompt).await,
        AppCommands::Projects { action } => match action {
            ProjectAction::Mine {} => projects::mine(ctx).await,
            ProjectAction::Available {} => projects::available(ctx).await,
            ProjectAction::Show { id } => projects::show(ctx, &id).await,
            ProjectAction::Create(args) => projects::create(ctx, args).await,
            ProjectAction::Join { id } => projects::join(ctx, &id).await,
            ProjectAction::Update(args) => projects::update(ctx, args).await,
            ProjectAction::Data { id } => projects::data(ctx, &id).await,
            ProjectAction::Datasets { id } => projects::datasets(ctx, &id).await,
            ProjectAction::Download {
                id,
                dataset,
                output,
            } => projects::download(ctx, &id, dataset.into(), output).await,
            ProjectAction::Visualize { id, kind } => projects::visualize(ctx, &id, kind.into()).await,
        },
    }
}
