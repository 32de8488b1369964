use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use cloudnav::api::{Client, CreateJobInput, ListJobsInput};
use cloudnav::commands::jobs::jobs_entry;
use cloudnav::commands::mutations::{deploy_entry, restart_entry, run_job_entry};
use cloudnav::commands::services::services_entry;
use cloudnav::commands::workspace::workspaces_entry;
use cloudnav::commands::AppContext;
use cloudnav::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "cloudnav", about = "Browse and operate cloud services from the terminal")]
struct Args {
    /// Workspace (owner ID) to scope listings to
    #[arg(long, global = true)]
    workspace: Option<String>,

    /// Config file to read instead of ~/.cloudnav/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List services and databases
    Services,
    /// List one-off jobs of a service
    Jobs {
        service_id: String,
        /// Only show jobs in this status (repeatable)
        #[arg(long)]
        status: Vec<String>,
        #[command(flatten)]
        times: JobTimeFilters,
    },
    /// Restart a service or database
    Restart { resource_id: String },
    /// Deploy a service
    Deploy { service_id: String },
    /// Start a one-off job on a service
    RunJob {
        service_id: String,
        start_command: String,
        /// Instance plan for the job; defaults to the service's plan
        #[arg(long)]
        plan_id: Option<String>,
    },
    /// Pick a workspace to browse
    Workspaces,
}

// RFC 3339 bounds on job timestamps, e.g. 2024-03-01T12:00:00Z
#[derive(ClapArgs)]
struct JobTimeFilters {
    #[arg(long)]
    created_before: Option<DateTime<Utc>>,
    #[arg(long)]
    created_after: Option<DateTime<Utc>>,
    #[arg(long)]
    started_before: Option<DateTime<Utc>>,
    #[arg(long)]
    started_after: Option<DateTime<Utc>>,
    #[arg(long)]
    finished_before: Option<DateTime<Utc>>,
    #[arg(long)]
    finished_after: Option<DateTime<Utc>>,
}

fn level_filter(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Debug)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            workspace: args.workspace.as_deref(),
            log_level: args.log_level.as_deref(),
        },
    );

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(level_filter(&resolved.log_level), log_config, log_file);
    }

    log::info!("cloudnav starting up against {}", resolved.host);

    let client = match Client::new(resolved.host.clone(), resolved.api_key.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let ctx = AppContext::new(client, resolved.workspace.clone());

    let root = match args.command.unwrap_or(Command::Services) {
        Command::Services => services_entry(ctx),
        Command::Jobs {
            service_id,
            status,
            times,
        } => {
            let input = ListJobsInput {
                status,
                created_before: times.created_before,
                created_after: times.created_after,
                started_before: times.started_before,
                started_after: times.started_after,
                finished_before: times.finished_before,
                finished_after: times.finished_after,
                ..ListJobsInput::for_service(service_id)
            };
            jobs_entry(ctx, input)
        }
        Command::Restart { resource_id } => restart_entry(ctx, resource_id),
        Command::Deploy { service_id } => deploy_entry(ctx, service_id),
        Command::RunJob {
            service_id,
            start_command,
            plan_id,
        } => run_job_entry(
            ctx,
            CreateJobInput {
                service_id,
                start_command,
                plan_id,
            },
        ),
        Command::Workspaces => workspaces_entry(ctx),
    };

    match cloudnav::tui::run(root) {
        Ok(messages) => {
            for message in messages {
                println!("{message}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Terminal error: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
