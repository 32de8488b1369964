//! # Control-plane API
//!
//! Thin typed repositories over the REST API. Each repository maps typed
//! inputs to HTTP calls through [`client::Client`] and back; none of them
//! know anything about the terminal UI.

pub mod client;
pub mod jobs;
pub mod owners;
pub mod postgres;
pub mod projects;
pub mod services;
pub mod types;

pub use client::Client;
pub use jobs::{CreateJobInput, JobRepo, ListJobsInput};
pub use owners::OwnerRepo;
pub use postgres::PostgresRepo;
pub use projects::ProjectRepo;
pub use services::ServiceRepo;
