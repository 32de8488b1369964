use log::{debug, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ErrorBody;
use crate::core::error::AppError;

/// Authenticated JSON client for the control-plane REST API.
///
/// Cheap to clone: `reqwest::Client` is reference counted internally.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    /// Builds a client against `base_url`. A missing API key is a config
    /// error rather than a request-time 401.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, AppError> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(
                    "API key not set (config file or CLOUDNAV_API_KEY env var)".to_string(),
                )
            })?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        debug!("GET {path} query={query:?}");
        let response = self
            .http
            .get(self.url(path))
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await?;

        let response = error_from_response(response).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AppError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("POST {path}");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let response = error_from_response(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// POST without a body, for endpoints that answer with no content.
    pub async fn post_empty(&self, path: &str) -> Result<(), AppError> {
        debug!("POST {path}");
        let response = self
            .http
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        error_from_response(response).await?;
        Ok(())
    }
}

/// Turns a non-2xx response into `AppError::Api`, preferring the body's
/// `message` field over the raw body text.
async fn error_from_response(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| {
            if body.is_empty() {
                status.canonical_reason().unwrap_or("unknown error").to_string()
            } else {
                body.clone()
            }
        });

    warn!("API request failed with HTTP {}: {}", status.as_u16(), message);
    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}
