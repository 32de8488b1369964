//! # Resources
//!
//! Services and postgres databases shown side by side in one table. The
//! service layer joins them with their project and environment names and
//! routes mutations by resource ID prefix.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use crate::api::postgres::{POSTGRES_ID_PREFIX, POSTGRES_TYPE};
use crate::api::services::{CRON_JOB_ID_PREFIX, SERVER_ID_PREFIX};
use crate::api::types::{Environment, Postgres, Project, Service};
use crate::core::error::AppError;

#[async_trait]
pub trait ServiceSource: Send + Sync {
    async fn list_services(&self, owner_id: Option<&str>) -> Result<Vec<Service>, AppError>;
    async fn restart_service(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PostgresSource: Send + Sync {
    async fn list_postgres(&self, owner_id: Option<&str>) -> Result<Vec<Postgres>, AppError>;
    async fn restart_postgres(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProjectSource: Send + Sync {
    async fn list_projects(&self, owner_id: Option<&str>) -> Result<Vec<Project>, AppError>;
    async fn list_environments(&self, project_ids: &[String]) -> Result<Vec<Environment>, AppError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResourceKind {
    Service(Service),
    Postgres(Postgres),
}

/// A listable resource plus the names of where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub kind: ResourceKind,
    pub project_name: String,
    pub environment_name: String,
}

impl Resource {
    pub fn id(&self) -> &str {
        match &self.kind {
            ResourceKind::Service(s) => &s.id,
            ResourceKind::Postgres(p) => &p.id,
        }
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            ResourceKind::Service(s) => &s.name,
            ResourceKind::Postgres(p) => &p.name,
        }
    }

    pub fn resource_type(&self) -> &str {
        match &self.kind {
            ResourceKind::Service(s) => &s.service_type,
            ResourceKind::Postgres(_) => POSTGRES_TYPE,
        }
    }

    fn environment_id(&self) -> Option<&str> {
        match &self.kind {
            ResourceKind::Service(s) => s.environment_id.as_deref(),
            ResourceKind::Postgres(p) => p.environment_id.as_deref(),
        }
    }
}

pub struct ResourceService {
    services: Arc<dyn ServiceSource>,
    postgres: Arc<dyn PostgresSource>,
    projects: Arc<dyn ProjectSource>,
}

impl ResourceService {
    pub fn new(
        services: Arc<dyn ServiceSource>,
        postgres: Arc<dyn PostgresSource>,
        projects: Arc<dyn ProjectSource>,
    ) -> Self {
        Self {
            services,
            postgres,
            projects,
        }
    }

    /// Lists services first, then postgres databases, each tagged with
    /// its project and environment name (empty when ungrouped).
    pub async fn list_resources(&self, owner_id: Option<&str>) -> Result<Vec<Resource>, AppError> {
        let services = self.services.list_services(owner_id).await?;
        let databases = self.postgres.list_postgres(owner_id).await?;

        let projects = self.projects.list_projects(owner_id).await?;
        let project_ids: Vec<String> = projects.iter().map(|p| p.id.clone()).collect();
        let environments = self.projects.list_environments(&project_ids).await?;

        let project_names: HashMap<&str, &str> = projects
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();
        let environments: HashMap<&str, &Environment> =
            environments.iter().map(|e| (e.id.as_str(), e)).collect();

        let kinds = services
            .into_iter()
            .map(ResourceKind::Service)
            .chain(databases.into_iter().map(ResourceKind::Postgres));

        let resources: Vec<Resource> = kinds
            .map(|kind| {
                let mut resource = Resource {
                    kind,
                    project_name: String::new(),
                    environment_name: String::new(),
                };
                if let Some(env) = resource.environment_id().and_then(|id| environments.get(id)) {
                    resource.environment_name = env.name.clone();
                    resource.project_name = project_names
                        .get(env.project_id.as_str())
                        .map(|n| n.to_string())
                        .unwrap_or_default();
                }
                resource
            })
            .collect();

        debug!("Listed {} resources", resources.len());
        Ok(resources)
    }

    /// Restarts a resource, picking the endpoint from its ID prefix.
    pub async fn restart_resource(&self, id: &str) -> Result<(), AppError> {
        if id.starts_with(SERVER_ID_PREFIX) {
            return self.services.restart_service(id).await;
        }

        if id.starts_with(POSTGRES_ID_PREFIX) {
            return self.postgres.restart_postgres(id).await;
        }

        if id.starts_with(CRON_JOB_ID_PREFIX) {
            return Err(AppError::Unsupported(
                "cron jobs cannot be restarted".to_string(),
            ));
        }

        Err(AppError::Unsupported("unknown resource type".to_string()))
    }
}
