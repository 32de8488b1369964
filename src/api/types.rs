use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;

// ============================================================================
// Resources
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(default)]
    pub environment_id: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Postgres {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub environment_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// A workspace (team or personal account) that owns resources.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Owner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
    pub project_id: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Deploy {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

// ============================================================================
// Jobs
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Canceled,
}

impl JobStatus {
    /// Parses a `--status` filter value. `canceled` is a state a job can be
    /// in, but the list endpoint does not filter on it.
    pub fn from_filter(value: &str) -> Result<Self, AppError> {
        match value {
            "failed" => Ok(JobStatus::Failed),
            "pending" => Ok(JobStatus::Pending),
            "running" => Ok(JobStatus::Running),
            "succeeded" => Ok(JobStatus::Succeeded),
            other => Err(AppError::InvalidInput(format!("invalid status: {other}"))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
        }
    }

    /// Whether the job can still be canceled.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Running)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub service_id: String,
    pub start_command: String,
    #[serde(default)]
    pub plan_id: Option<String>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

// ============================================================================
// List envelopes
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct ServiceWithCursor {
    pub service: Service,
}

#[derive(Deserialize, Debug)]
pub struct PostgresWithCursor {
    pub postgres: Postgres,
}

#[derive(Deserialize, Debug)]
pub struct OwnerWithCursor {
    pub owner: Owner,
}

#[derive(Deserialize, Debug)]
pub struct ProjectWithCursor {
    pub project: Project,
}

#[derive(Deserialize, Debug)]
pub struct EnvironmentWithCursor {
    pub environment: Environment,
}

#[derive(Deserialize, Debug)]
pub struct JobWithCursor {
    pub job: Job,
}

/// Body returned with a non-success status.
#[derive(Deserialize, Debug)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
