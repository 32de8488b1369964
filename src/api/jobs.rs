use chrono::{DateTime, SecondsFormat, Utc};
use log::info;
use serde::Serialize;

use super::client::Client;
use super::types::{Job, JobStatus, JobWithCursor};
use crate::core::error::AppError;

/// Page size requested from the jobs endpoint.
pub const JOB_LIST_LIMIT: u32 = 100;

/// Filters for listing a service's jobs. Statuses are validated before any
/// request is made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListJobsInput {
    pub service_id: String,
    pub status: Vec<String>,
    pub created_before: Option<DateTime<Utc>>,
    pub created_after: Option<DateTime<Utc>>,
    pub started_before: Option<DateTime<Utc>>,
    pub started_after: Option<DateTime<Utc>>,
    pub finished_before: Option<DateTime<Utc>>,
    pub finished_after: Option<DateTime<Utc>>,
}

impl ListJobsInput {
    pub fn for_service(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            ..Default::default()
        }
    }

    fn query(&self) -> Result<Vec<(&'static str, String)>, AppError> {
        let mut query = vec![("limit", JOB_LIST_LIMIT.to_string())];

        for status in &self.status {
            let status = JobStatus::from_filter(status)?;
            query.push(("status", status.as_str().to_string()));
        }

        let times = [
            ("createdBefore", self.created_before),
            ("createdAfter", self.created_after),
            ("startedBefore", self.started_before),
            ("startedAfter", self.started_after),
            ("finishedBefore", self.finished_before),
            ("finishedAfter", self.finished_after),
        ];
        for (key, value) in times {
            if let Some(t) = value {
                query.push((key, t.to_rfc3339_opts(SecondsFormat::Secs, true)));
            }
        }

        Ok(query)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobInput {
    #[serde(skip)]
    pub service_id: String,
    pub start_command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<String>,
}

pub struct JobRepo {
    client: Client,
}

impl JobRepo {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn list_jobs(&self, input: &ListJobsInput) -> Result<Vec<Job>, AppError> {
        let query = input.query()?;
        let page: Vec<JobWithCursor> = self
            .client
            .get_json(&format!("/services/{}/jobs", input.service_id), &query)
            .await?;
        Ok(page.into_iter().map(|j| j.job).collect())
    }

    pub async fn create_job(&self, input: &CreateJobInput) -> Result<Job, AppError> {
        info!("Creating job on {}: {}", input.service_id, input.start_command);
        self.client
            .post_json(&format!("/services/{}/jobs", input.service_id), input)
            .await
    }

    pub async fn cancel_job(&self, service_id: &str, job_id: &str) -> Result<Job, AppError> {
        info!("Canceling job {job_id} on {service_id}");
        self.client
            .post_json(
                &format!("/services/{service_id}/jobs/{job_id}/cancel"),
                &serde_json::json!({}),
            )
            .await
    }

    pub async fn get_job(&self, service_id: &str, job_id: &str) -> Result<Job, AppError> {
        self.client
            .get_json(&format!("/services/{service_id}/jobs/{job_id}"), &[])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_query_includes_limit_and_statuses() {
        let input = ListJobsInput {
            status: vec!["failed".to_string(), "running".to_string()],
            ..ListJobsInput::for_service("srv-1")
        };
        let query = input.query().unwrap();
        assert_eq!(query[0], ("limit", "100".to_string()));
        assert!(query.contains(&("status", "failed".to_string())));
        assert!(query.contains(&("status", "running".to_string())));
    }

    #[test]
    fn test_query_rejects_unknown_status() {
        let input = ListJobsInput {
            status: vec!["bogus".to_string()],
            ..ListJobsInput::for_service("srv-1")
        };
        let err = input.query().unwrap_err();
        assert_eq!(err, AppError::InvalidInput("invalid status: bogus".to_string()));
    }

    #[test]
    fn test_query_formats_timestamps() {
        let input = ListJobsInput {
            created_after: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            ..ListJobsInput::for_service("srv-1")
        };
        let query = input.query().unwrap();
        assert!(query.contains(&("createdAfter", "2024-03-01T12:00:00Z".to_string())));
    }

    #[test]
    fn test_create_job_body_omits_service_id() {
        let input = CreateJobInput {
            service_id: "srv-1".to_string(),
            start_command: "echo hi".to_string(),
            plan_id: None,
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body, serde_json::json!({ "startCommand": "echo hi" }));
    }
}
