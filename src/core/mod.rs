//! # Core
//!
//! Everything below the terminal UI that is not a raw API call.
//!
//! - [`config`]: config file, env vars and CLI flags collapsed into one
//!   `ResolvedConfig`
//! - [`error`]: the `AppError` every fallible operation returns
//! - [`resource`]: services and databases merged into one listing, and
//!   restarts routed by ID prefix

pub mod config;
pub mod error;
pub mod resource;
