use agora_shared::types::{
    ConfidencePoint, CreateProjectRequest, DatasetDescriptor, DatasetKind, JoinProjectRequest,
    MapPoint, Project, ProjectDataSummary, ProjectMutationResponse, ProjectUpdate,
    TimeSeriesPoint, UpdateProjectRequest, Visualization, VisualizationKind,
};
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::transport::Service;
use crate::AgoraClient;

impl AgoraClient {
    /// Projects the user created or joined
    pub async fn user_projects(&self, username: &str) -> ClientResult<Vec<Project>> {
        self.transport
            .get_json(
                Service::ProjectApi,
                "/api/user_projects",
                &[("username", username.to_string())],
            )
            .await
    }

    /// Projects open for the user to join
    pub async fn available_projects(&self, username: &str) -> ClientResult<Vec<Project>> {
        self.transport
            .get_json(
                Service::ProjectApi,
                "/api/available_projects",
                &[("username", username.to_string())],
            )
            .await
    }

    pub async fn get_project(&self, project_id: &str) -> ClientResult<Project> {
        self.transport
            .get_json(
                Service::ProjectApi,
                "/api/get_project",
                &[("projectId", project_id.to_string())],
            )
            .await
    }

    /// Creates a project and returns its id
    pub async fn create_project(&self, request: &CreateProjectRequest) -> ClientResult<String> {
        let response: ProjectMutationResponse = self
            .transport
            .post_json(Service::ProjectApi, "/api/create_project", request)
            .await?;

        match (response.success, response.project_id) {
            (true, Some(project_id)) => {
                info!("Created project {} for {}", project_id, request.username);
                Ok(project_id)
            }
            _ => Err(ClientError::Api(
                response
                    .message
                    .unwrap_or_else(|| "Failed to create project".to_string()),
            )),
        }
    }

    pub async fn join_project(&self, project_id: &str, username: &str) -> ClientResult<()> {
        let request = JoinProjectRequest {
            project_id: project_id.to_string(),
            username: username.to_string(),
        };
        let response: ProjectMutationResponse = self
            .transport
            .post_json(Service::ProjectApi, "/api/join_project", &request)
            .await?;

        if response.success {
            info!("{} joined project {}", username, project_id);
            return Ok(());
        }
        Err(ClientError::Api(
            response
                .message
                .unwrap_or_else(|| "Failed to join project".to_string()),
        ))
    }

    /// Saves edits to a project. Only the creator may edit; that is checked
    /// against `project` before anything is sent.
    pub async fn update_project(
        &self,
        project: &Project,
        updates: &ProjectUpdate,
        username: &str,
    ) -> ClientResult<Project> {
        if !project.is_owned_by(username) {
            return Err(ClientError::Api(
                "Only the project creator can edit project details".to_string(),
            ));
        }

        let request = UpdateProjectRequest {
            project_id: project.id.clone(),
            updates: updates.clone(),
            username: username.to_string(),
        };
        let response: ProjectMutationResponse = self
            .transport
            .post_json(Service::ProjectApi, "/api/update_project", &request)
            .await?;

        if !response.success {
            return Err(ClientError::Api(
                "Failed to update project details".to_string(),
            ));
        }

        let mut updated = project.clone();
        updated.apply(updates);
        Ok(updated)
    }

    /// CSV export of every picture in the project
    pub async fn download_data(&self, project_id: &str) -> ClientResult<Vec<u8>> {
        debug!("Downloading data for project {}", project_id);
        self.transport
            .get_bytes(
                Service::ProjectApi,
                &format!("/api/download_data/{}", project_id),
                &[],
            )
            .await
    }

    /// Progress and dataset counts of a project
    pub async fn project_data(&self, project_id: &str) -> ClientResult<ProjectDataSummary> {
        self.transport
            .get_json(
                Service::ProjectApi,
                &format!("/api/project_data/{}", project_id),
                &[],
            )
            .await
    }

    /// Datasets available for download, with their CSV fields
    pub async fn project_datasets(&self, project_id: &str) -> ClientResult<Vec<DatasetDescriptor>> {
        self.transport
            .get_json(
                Service::ProjectApi,
                &format!("/api/project_datasets/{}", project_id),
                &[],
            )
            .await
    }

    pub async fn download_dataset(&self, project_id: &str, dataset: DatasetKind) -> ClientResult<Vec<u8>> {
        debug!("Downloading {} dataset for project {}", dataset.as_str(), project_id);
        self.transport
            .get_bytes(
                Service::ProjectApi,
                &format!("/api/download_dataset/{}/{}", project_id, dataset.as_str()),
                &[],
            )
            .await
    }

    pub async fn project_visualization(
        &self,
        project_id: &str,
        kind: VisualizationKind,
    ) -> ClientResult<Visualization> {
        let path = format!("/api/project_visualization/{}", project_id);
        let query = [("type", kind.as_str().to_string())];

        let visualization = match kind {
            VisualizationKind::Map => Visualization::Map(
                self.transport
                    .get_json::<Vec<MapPoint>>(Service::ProjectApi, &path, &query)
                    .await?,
            ),
            VisualizationKind::TimeSeries => Visualization::TimeSeries(
                self.transport
                    .get_json::<Vec<TimeSeriesPoint>>(Service::ProjectApi, &path, &query)
                    .await?,
            ),
            VisualizationKind::Confidence => Visualization::Confidence(
                self.transport
                    .get_json::<Vec<ConfidencePoint>>(Service::ProjectApi, &path, &query)
                    .await?,
            ),
        };
        Ok(visualization)
    }
}
