use super::client::Client;
use super::types::{Owner, OwnerWithCursor};
use crate::core::error::AppError;

pub struct OwnerRepo {
    client: Client,
}

impl OwnerRepo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Lists every workspace the API key can act on.
    pub async fn list_owners(&self) -> Result<Vec<Owner>, AppError> {
        let page: Vec<OwnerWithCursor> = self
            .client
            .get_json("/owners", &[("limit", "100".to_string())])
            .await?;
        Ok(page.into_iter().map(|o| o.owner).collect())
    }
}
