/// Types of the separate project-management API
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "plantType")]
    pub plant_type: Option<String>,
    #[serde(default, rename = "dataNeeded")]
    pub data_needed: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub purpose: Option<String>,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub contributors: Vec<String>,
}

impl Project {
    pub fn is_owned_by(&self, username: &str) -> bool {
        !username.is_empty() && self.creator == username
    }

    pub fn description_text(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description available.")
    }

    pub fn purpose_text(&self) -> String {
        match self.purpose.as_deref().filter(|p| !p.is_empty()) {
            Some(purpose) => purpose.to_string(),
            None => format!(
                "The purpose of this citizen science project is to collect data on {} to aid in scientific research.",
                self.plant_type.as_deref().unwrap_or("plants")
            ),
        }
    }

    pub fn data_needed_text(&self) -> &str {
        self.data_needed
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No specific data collection instructions provided.")
    }

    /// Applies an edit locally, mirroring what `update_project` stores
    pub fn apply(&mut self, update: &ProjectUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if update.description.is_some() {
            self.description = update.description.clone();
        }
        if update.plant_type.is_some() {
            self.plant_type = update.plant_type.clone();
        }
        if update.data_needed.is_some() {
            self.data_needed = update.data_needed.clone();
        }
        if update.location.is_some() {
            self.location = update.location.clone();
        }
    }
}

/// Editable subset of a project; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "plantType", skip_serializing_if = "Option::is_none")]
    pub plant_type: Option<String>,
    #[serde(rename = "dataNeeded", skip_serializing_if = "Option::is_none")]
    pub data_needed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ProjectUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.plant_type.is_none()
            && self.data_needed.is_none()
            && self.location.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(rename = "plantType")]
    pub plant_type: String,
    #[serde(rename = "dataNeeded")]
    pub data_needed: String,
    pub location: String,
    pub purpose: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinProjectRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateProjectRequest {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub updates: ProjectUpdate,
    pub username: String,
}

/// `{ success, projectId?, message? }` returned by the project mutations
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectMutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "projectId")]
    pub project_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Downloadable dataset of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Pictures,
    MatchingPictures,
    Locations,
    Contributors,
    All,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Pictures => "pictures",
            DatasetKind::MatchingPictures => "matching_pictures",
            DatasetKind::Locations => "locations",
            DatasetKind::Contributors => "contributors",
            DatasetKind::All => "all",
        }
    }

    /// File name the backend suggests for the CSV export
    pub fn default_file_name(&self, project_id: &str) -> String {
        match self {
            DatasetKind::All => format!("project_{}_data.csv", project_id),
            other => format!("project_{}_{}.csv", project_id, other.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub id: DatasetKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    pub id: DatasetKind,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectProgress {
    pub submissions_completed: u64,
    pub submissions_needed: u64,
    #[serde(default)]
    pub completion_percentage: f64,
}

/// Summary returned by `project_data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDataSummary {
    pub project_id: String,
    pub project_title: String,
    #[serde(default)]
    pub plant_type: String,
    #[serde(default)]
    pub action_type: String,
    pub progress: ProjectProgress,
    #[serde(default)]
    pub datasets: Vec<DatasetSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizationKind {
    #[default]
    Map,
    TimeSeries,
    Confidence,
}

impl VisualizationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationKind::Map => "map",
            VisualizationKind::TimeSeries => "time_series",
            VisualizationKind::Confidence => "confidence",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub is_match: bool,
    #[serde(default)]
    pub uploaded_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    #[serde(default)]
    pub date: String,
    pub cumulative_matches: u64,
    #[serde(default)]
    pub is_match: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidencePoint {
    pub id: String,
    #[serde(default)]
    pub species: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub is_match: bool,
}

/// Data behind one project visualization
#[derive(Debug, Clone, PartialEq)]
pub enum Visualization {
    Map(Vec<MapPoint>),
    TimeSeries(Vec<TimeSeriesPoint>),
    Confidence(Vec<ConfidencePoint>),
}

impl Visualization {
    pub fn len(&self) -> usize {
        match self {
            Visualization::Map(points) => points.len(),
            Visualization::TimeSeries(points) => points.len(),
            Visualization::Confidence(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
