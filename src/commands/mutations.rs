//! Result screens for one-shot operations.

use log::info;

use super::AppContext;
use crate::api::{CreateJobInput, JobRepo, ServiceRepo};
use crate::core::error::AppError;
use crate::core::resource::ResourceService;
use crate::tui::loader::Loader;
use crate::tui::screens::ResultScreen;
use crate::tui::stack::ScreenEntry;

async fn restart(resources: ResourceService, id: String) -> Result<String, AppError> {
    resources.restart_resource(&id).await?;
    info!("Restart triggered for {id}");
    Ok(format!("Restart triggered for {id}"))
}

async fn deploy(services: ServiceRepo, id: String) -> Result<String, AppError> {
    let deploy = services.deploy_service(&id).await?;
    Ok(match deploy.status {
        Some(status) => format!("Deploy {} created for {id} ({status})", deploy.id),
        None => format!("Deploy {} created for {id}", deploy.id),
    })
}

async fn cancel(jobs: JobRepo, service_id: String, job_id: String) -> Result<String, AppError> {
    let job = jobs.cancel_job(&service_id, &job_id).await?;
    let status = job.status.map(|s| s.as_str()).unwrap_or("unknown");
    Ok(format!("Job {} is now {status}", job.id))
}

async fn run_job(jobs: JobRepo, input: CreateJobInput) -> Result<String, AppError> {
    let job = jobs.create_job(&input).await?;
    let status = job.status.map(|s| s.as_str()).unwrap_or("unknown");
    Ok(format!("Job {} created for {} ({status})", job.id, input.service_id))
}

pub fn restart_entry(ctx: AppContext, resource_id: impl Into<String>) -> ScreenEntry {
    let resource_id = resource_id.into();
    let command = ctx.command_line(&["restart", &resource_id]);
    let breadcrumb = format!("Restart {resource_id}");

    let loader = Loader::new(move || restart(ctx.resources(), resource_id.clone()));

    ScreenEntry::new(ResultScreen::new(loader))
        .with_command(command)
        .with_breadcrumb(breadcrumb)
}

pub fn deploy_entry(ctx: AppContext, service_id: impl Into<String>) -> ScreenEntry {
    let service_id = service_id.into();
    let command = ctx.command_line(&["deploy", &service_id]);
    let breadcrumb = format!("Deploy {service_id}");

    let loader = Loader::new(move || deploy(ctx.services(), service_id.clone()));

    ScreenEntry::new(ResultScreen::new(loader))
        .with_command(command)
        .with_breadcrumb(breadcrumb)
}

pub fn run_job_entry(ctx: AppContext, input: CreateJobInput) -> ScreenEntry {
    let mut args = vec!["run-job", input.service_id.as_str()];
    let quoted = format!("'{}'", input.start_command.replace('\'', "'\\''"));
    args.push(&quoted);
    if let Some(plan_id) = &input.plan_id {
        args.push("--plan-id");
        args.push(plan_id);
    }
    let command = ctx.command_line(&args);
    let breadcrumb = format!("Run job on {}", input.service_id);

    let loader = Loader::new(move || run_job(ctx.jobs(), input.clone()));

    ScreenEntry::new(ResultScreen::new(loader))
        .with_command(command)
        .with_breadcrumb(breadcrumb)
}

/// Not reachable from the CLI, so there is no replay command.
pub fn cancel_job_entry(
    ctx: AppContext,
    service_id: impl Into<String>,
    job_id: impl Into<String>,
) -> ScreenEntry {
    let service_id = service_id.into();
    let job_id = job_id.into();
    let breadcrumb = format!("Cancel {job_id}");

    let loader = Loader::new(move || cancel(ctx.jobs(), service_id.clone(), job_id.clone()));

    ScreenEntry::new(ResultScreen::new(loader)).with_breadcrumb(breadcrumb)
}
