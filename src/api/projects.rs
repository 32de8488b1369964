use async_trait::async_trait;

use super::client::Client;
use super::types::{Environment, EnvironmentWithCursor, Project, ProjectWithCursor};
use crate::core::error::AppError;
use crate::core::resource::ProjectSource;

/// Projects and the environments inside them.
pub struct ProjectRepo {
    client: Client,
}

impl ProjectRepo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProjectSource for ProjectRepo {
    async fn list_projects(&self, owner_id: Option<&str>) -> Result<Vec<Project>, AppError> {
        let mut query = vec![("limit", "100".to_string())];
        if let Some(owner) = owner_id {
            query.push(("ownerId", owner.to_string()));
        }

        let page: Vec<ProjectWithCursor> = self.client.get_json("/projects", &query).await?;
        Ok(page.into_iter().map(|p| p.project).collect())
    }

    async fn list_environments(&self, project_ids: &[String]) -> Result<Vec<Environment>, AppError> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = vec![("limit", "100".to_string())];
        query.extend(project_ids.iter().map(|id| ("projectId", id.clone())));

        let page: Vec<EnvironmentWithCursor> =
            self.client.get_json("/environments", &query).await?;
        Ok(page.into_iter().map(|e| e.environment).collect())
    }
}
