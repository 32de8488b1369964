//! # Commands
//!
//! Builders for the screen entries behind each CLI command. Every entry
//! carries the command line that would reopen it, which is what the copy
//! key puts on the clipboard.
//!
//! - [`services`]: resource table and the per-resource palette
//! - [`workspace`]: workspace picker
//! - [`jobs`]: job table for a service, with cancel
//! - [`mutations`]: restart, deploy and cancel result screens

pub mod jobs;
pub mod mutations;
pub mod services;
pub mod workspace;

use std::sync::Arc;

use crate::api::{Client, JobRepo, OwnerRepo, PostgresRepo, ProjectRepo, ServiceRepo};
use crate::core::resource::ResourceService;

/// Binary name used in replay command lines.
pub const BIN_NAME: &str = "cloudnav";

/// What every command needs to talk to the API.
#[derive(Clone)]
pub struct AppContext {
    pub client: Client,
    /// Owner the session is scoped to. `None` lists everything the key can see.
    pub workspace: Option<String>,
}

impl AppContext {
    pub fn new(client: Client, workspace: Option<String>) -> Self {
        Self { client, workspace }
    }

    /// Same client, scoped to another workspace.
    pub fn with_workspace(&self, workspace: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            workspace: Some(workspace.into()),
        }
    }

    pub fn resources(&self) -> ResourceService {
        ResourceService::new(
            Arc::new(ServiceRepo::new(self.client.clone())),
            Arc::new(PostgresRepo::new(self.client.clone())),
            Arc::new(ProjectRepo::new(self.client.clone())),
        )
    }

    pub fn services(&self) -> ServiceRepo {
        ServiceRepo::new(self.client.clone())
    }

    pub fn owners(&self) -> OwnerRepo {
        OwnerRepo::new(self.client.clone())
    }

    pub fn jobs(&self) -> JobRepo {
        JobRepo::new(self.client.clone())
    }

    /// `cloudnav <args...>` plus `--workspace` when the session is scoped.
    pub fn command_line(&self, args: &[&str]) -> String {
        let mut parts = vec![BIN_NAME.to_string()];
        parts.extend(args.iter().map(|a| a.to_string()));
        if let Some(workspace) = &self.workspace {
            parts.push("--workspace".to_string());
            parts.push(workspace.clone());
        }
        parts.join(" ")
    }
}

#[cfg(test)]
pub(crate) fn test_context(workspace: Option<&str>) -> AppContext {
    let client = Client::new("http://127.0.0.1:9", Some("test-key".to_string()))
        .expect("static test config is valid");
    AppContext::new(client, workspace.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_without_workspace() {
        let ctx = test_context(None);
        assert_eq!(ctx.command_line(&["deploy", "srv-1"]), "cloudnav deploy srv-1");
    }

    #[test]
    fn test_command_line_with_workspace() {
        let ctx = test_context(None).with_workspace("tea-123");
        assert_eq!(
            ctx.command_line(&["services"]),
            "cloudnav services --workspace tea-123"
        );
    }
}
