use async_trait::async_trait;
use log::info;

use super::client::Client;
use super::types::{Postgres, PostgresWithCursor};
use crate::core::error::AppError;
use crate::core::resource::PostgresSource;

pub const POSTGRES_TYPE: &str = "postgres";
pub const POSTGRES_ID_PREFIX: &str = "dpg-";

pub struct PostgresRepo {
    client: Client,
}

impl PostgresRepo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PostgresSource for PostgresRepo {
    async fn list_postgres(&self, owner_id: Option<&str>) -> Result<Vec<Postgres>, AppError> {
        let mut query = vec![("limit", "100".to_string())];
        if let Some(owner) = owner_id {
            query.push(("ownerId", owner.to_string()));
        }

        let page: Vec<PostgresWithCursor> = self.client.get_json("/postgres", &query).await?;
        Ok(page.into_iter().map(|p| p.postgres).collect())
    }

    async fn restart_postgres(&self, id: &str) -> Result<(), AppError> {
        info!("Restarting postgres {id}");
        self.client.post_empty(&format!("/postgres/{id}/restart")).await
    }
}
