use async_trait::async_trait;
use log::info;

use super::client::Client;
use super::types::{Deploy, Service, ServiceWithCursor};
use crate::core::error::AppError;
use crate::core::resource::ServiceSource;

pub const WEB_SERVICE: &str = "web_service";
pub const PRIVATE_SERVICE: &str = "private_service";
pub const BACKGROUND_WORKER: &str = "background_worker";
pub const CRON_JOB: &str = "cron_job";
pub const STATIC_SITE: &str = "static_site";

/// Every resource type served by the services endpoint.
pub const SERVICE_TYPES: &[&str] = &[
    WEB_SERVICE,
    PRIVATE_SERVICE,
    BACKGROUND_WORKER,
    CRON_JOB,
    STATIC_SITE,
];

pub const SERVER_ID_PREFIX: &str = "srv-";
pub const CRON_JOB_ID_PREFIX: &str = "crn-";

pub struct ServiceRepo {
    client: Client,
}

impl ServiceRepo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Triggers a deploy of the service's latest commit.
    pub async fn deploy_service(&self, id: &str) -> Result<Deploy, AppError> {
        info!("Creating deploy for {id}");
        self.client
            .post_json(&format!("/services/{id}/deploys"), &serde_json::json!({}))
            .await
    }
}

#[async_trait]
impl ServiceSource for ServiceRepo {
    async fn list_services(&self, owner_id: Option<&str>) -> Result<Vec<Service>, AppError> {
        let mut query = vec![("limit", "100".to_string())];
        if let Some(owner) = owner_id {
            query.push(("ownerId", owner.to_string()));
        }

        let page: Vec<ServiceWithCursor> = self.client.get_json("/services", &query).await?;
        Ok(page.into_iter().map(|s| s.service).collect())
    }

    async fn restart_service(&self, id: &str) -> Result<(), AppError> {
        info!("Restarting service {id}");
        self.client.post_empty(&format!("/services/{id}/restart")).await
    }
}
