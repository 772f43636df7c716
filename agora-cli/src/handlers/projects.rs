use agora_shared::types::{
    confidence_percent, CreateProjectRequest, DatasetDescriptor, DatasetKind, Project,
    ProjectDataSummary, ProjectUpdate, Visualization, VisualizationKind,
};
use std::path::PathBuf;
use tracing::info;

use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::models::{CreateProjectArgs, UpdateProjectArgs};

pub async fn mine(ctx: &AppContext) -> CliResult<String> {
    let username = ctx.require_user()?;
    let projects = ctx.client.user_projects(&username).await?;
    Ok(render_list(&projects, "You have not created or joined any projects yet."))
}

pub async fn available(ctx: &AppContext) -> CliResult<String> {
    let username = ctx.require_user()?;
    let projects = ctx.client.available_projects(&username).await?;
    Ok(render_list(&projects, "No projects are open to join right now."))
}

pub fn render_list(projects: &[Project], empty: &str) -> String {
    if projects.is_empty() {
        return empty.to_string();
    }
    projects
        .iter()
        .map(|p| {
            format!(
                "[{}] {} ({}) by {}, {} contributor(s)",
                p.id,
                p.title,
                p.plant_type.as_deref().unwrap_or("any plant"),
                p.creator,
                p.contributors.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn show(ctx: &AppContext, project_id: &str) -> CliResult<String> {
    ctx.require_user()?;
    let project = ctx.client.get_project(project_id).await?;
    Ok(render_project(&project))
}

pub fn render_project(project: &Project) -> String {
    let mut lines = vec![
        project.title.clone(),
        format!("Created by: {}", project.creator),
    ];
    if let Some(plant_type) = project.plant_type.as_deref() {
        lines.push(format!("Plant type: {}", plant_type));
    }
    if let Some(location) = project.location.as_deref().filter(|l| !l.is_empty()) {
        lines.push(format!("Location: {}", location));
    }
    lines.push(format!("Contributors: {}", project.contributors.len()));
    lines.push(String::new());
    lines.push(project.description_text().to_string());
    lines.push(String::new());
    lines.push(format!("Purpose: {}", project.purpose_text()));
    lines.push(format!("Data needed: {}", project.data_needed_text()));
    lines.join("\n")
}

pub async fn create(ctx: &AppContext, args: CreateProjectArgs) -> CliResult<String> {
    let username = ctx.require_user()?;
    if args.title.trim().is_empty() || args.plant_type.trim().is_empty() {
        return Err(CliError::failed("A title and plant type are required"));
    }

    let request = CreateProjectRequest {
        title: args.title,
        description: args.description,
        plant_type: args.plant_type,
        data_needed: args.data_needed,
        location: args.location,
        purpose: args.purpose,
        username,
    };
    let project_id = ctx.client.create_project(&request).await?;
    Ok(format!("Project created successfully! ID: {}", project_id))
}

pub async fn join(ctx: &AppContext, project_id: &str) -> CliResult<String> {
    let username = ctx.require_user()?;
    ctx.client.join_project(project_id, &username).await?;
    Ok(format!("You joined project {}.", project_id))
}

pub async fn update(ctx: &AppContext, args: UpdateProjectArgs) -> CliResult<String> {
    let username = ctx.require_user()?;
    let updates = ProjectUpdate {
        title: args.title,
        description: args.description,
        plant_type: args.plant_type,
        data_needed: args.data_needed,
        location: args.location,
    };
    if updates.is_empty() {
        return Err(CliError::failed("Nothing to update"));
    }

    let project = ctx.client.get_project(&args.id).await?;
    let updated = ctx.client.update_project(&project, &updates, &username).await?;
    Ok(format!(
        "Project details updated successfully!\n\n{}",
        render_project(&updated)
    ))
}

pub async fn data(ctx: &AppContext, project_id: &str) -> CliResult<String> {
    ctx.require_user()?;
    let summary = ctx.client.project_data(project_id).await?;
    Ok(render_summary(&summary))
}

pub fn render_summary(summary: &ProjectDataSummary) -> String {
    let progress = &summary.progress;
    let mut lines = vec![
        format!("{} ({})", summary.project_title, summary.plant_type),
        format!(
            "Progress: {}/{} submissions ({:.1}%)",
            progress.submissions_completed, progress.submissions_needed, progress.completion_percentage
        ),
    ];
    for dataset in &summary.datasets {
        lines.push(format!("  {}: {} ({})", dataset.name, dataset.count, dataset.id.as_str()));
    }
    lines.join("\n")
}

pub async fn datasets(ctx: &AppContext, project_id: &str) -> CliResult<String> {
    ctx.require_user()?;
    let datasets = ctx.client.project_datasets(project_id).await?;
    Ok(render_datasets(&datasets))
}

pub fn render_datasets(datasets: &[DatasetDescriptor]) -> String {
    if datasets.is_empty() {
        return "No datasets available.".to_string();
    }
    datasets
        .iter()
        .map(|d| {
            format!(
                "{} ({}): {}\n  fields: {}",
                d.name,
                d.id.as_str(),
                d.description,
                d.fields.join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn download(
    ctx: &AppContext,
    project_id: &str,
    dataset: DatasetKind,
    output: Option<PathBuf>,
) -> CliResult<String> {
    ctx.require_user()?;
    let bytes = match dataset {
        DatasetKind::All => ctx.client.download_data(project_id).await?,
        other => ctx.client.download_dataset(project_id, other).await?,
    };

    let path = output.unwrap_or_else(|| PathBuf::from(dataset.default_file_name(project_id)));
    tokio::fs::write(&path, &bytes).await?;
    info!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(format!("Saved {} ({} bytes).", path.display(), bytes.len()))
}

pub async fn visualize(ctx: &AppContext, project_id: &str, kind: VisualizationKind) -> CliResult<String> {
    ctx.require_user()?;
    let visualization = ctx.client.project_visualization(project_id, kind).await?;
    Ok(render_visualization(&visualization))
}

pub fn render_visualization(visualization: &Visualization) -> String {
    if visualization.is_empty() {
        return "No data to visualize yet.".to_string();
    }
    let match_flag = |is_match: bool| if is_match { "match" } else { "other" };

    let lines: Vec<String> = match visualization {
        Visualization::Map(points) => points
            .iter()
            .map(|p| match (p.latitude, p.longitude) {
                (Some(latitude), Some(longitude)) => format!(
                    "{:.4}, {:.4}  {}  {}%  {}",
                    latitude,
                    longitude,
                    p.species,
                    confidence_percent(p.confidence),
                    match_flag(p.is_match)
                ),
                _ => format!("(no location)  {}  {}", p.species, match_flag(p.is_match)),
            })
            .collect(),
        Visualization::TimeSeries(points) => points
            .iter()
            .map(|p| format!("{}  {} cumulative matches", p.date, p.cumulative_matches))
            .collect(),
        Visualization::Confidence(points) => points
            .iter()
            .map(|p| {
                format!(
                    "{}  {}  {}%  {}",
                    p.id,
                    p.species,
                    confidence_percent(p.confidence),
                    match_flag(p.is_match)
                )
            })
            .collect(),
    };
    lines.join("\n")
}
