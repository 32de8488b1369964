//! The `jobs` command: one-off jobs of a service.

use chrono::{DateTime, SecondsFormat, Utc};

use super::AppContext;
use super::mutations::cancel_job_entry;
use crate::api::{JobRepo, ListJobsInput};
use crate::api::types::Job;
use crate::core::error::AppError;
use crate::tui::action::Effect;
use crate::tui::loader::Loader;
use crate::tui::screens::{Column, PaletteCommand, PaletteScreen, ResultScreen, TableScreen};
use crate::tui::stack::ScreenEntry;

async fn list_jobs(jobs: JobRepo, input: ListJobsInput) -> Result<Vec<Job>, AppError> {
    jobs.list_jobs(&input).await
}

fn format_time(time: Option<&DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn format_job(job: &Job) -> Vec<String> {
    vec![
        job.id.clone(),
        job.status.map(|s| s.as_str()).unwrap_or("").to_string(),
        job.start_command.clone(),
        format_time(Some(&job.created_at)),
        format_time(job.started_at.as_ref()),
        format_time(job.finished_at.as_ref()),
    ]
}

/// The replay command for a job listing, with its status and time filters.
fn jobs_command(ctx: &AppContext, input: &ListJobsInput) -> String {
    let mut args = vec!["jobs".to_string(), input.service_id.clone()];
    for status in &input.status {
        args.push("--status".to_string());
        args.push(status.clone());
    }

    let times = [
        ("--created-before", input.created_before),
        ("--created-after", input.created_after),
        ("--started-before", input.started_before),
        ("--started-after", input.started_after),
        ("--finished-before", input.finished_before),
        ("--finished-after", input.finished_after),
    ];
    for (flag, value) in times {
        if let Some(t) = value {
            args.push(flag.to_string());
            args.push(t.to_rfc3339_opts(SecondsFormat::Secs, true));
        }
    }

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    ctx.command_line(&args)
}

fn describe_job(job: &Job) -> String {
    let mut lines = vec![
        format!("Job:      {}", job.id),
        format!("Service:  {}", job.service_id),
        format!("Command:  {}", job.start_command),
        format!("Status:   {}", job.status.map(|s| s.as_str()).unwrap_or("unknown")),
        format!("Created:  {}", format_time(Some(&job.created_at))),
    ];
    if let Some(plan_id) = &job.plan_id {
        lines.push(format!("Plan:     {plan_id}"));
    }
    if let Some(started) = &job.started_at {
        lines.push(format!("Started:  {}", format_time(Some(started))));
    }
    if let Some(finished) = &job.finished_at {
        lines.push(format!("Finished: {}", format_time(Some(finished))));
    }
    lines.join("\n")
}

async fn job_details(jobs: JobRepo, service_id: String, job_id: String) -> Result<String, AppError> {
    let job = jobs.get_job(&service_id, &job_id).await?;
    Ok(describe_job(&job))
}

/// Fetches the job again and shows its current fields.
fn job_details_entry(ctx: AppContext, service_id: String, job_id: String) -> ScreenEntry {
    let breadcrumb = format!("Job {job_id}");
    let loader = Loader::new(move || job_details(ctx.jobs(), service_id.clone(), job_id.clone()));
    ScreenEntry::new(ResultScreen::new(loader)).with_breadcrumb(breadcrumb)
}

pub fn jobs_entry(ctx: AppContext, input: ListJobsInput) -> ScreenEntry {
    let command = jobs_command(&ctx, &input);

    let repo_ctx = ctx.clone();
    let load_input = input.clone();
    let table = TableScreen::new(
        Loader::new(move || list_jobs(repo_ctx.jobs(), load_input.clone())),
        vec![
            Column::fixed("ID", 28),
            Column::fixed("Status", 10),
            Column::flex("Start Command", 1),
            Column::fixed("Created", 20),
            Column::fixed("Started", 20),
            Column::fixed("Finished", 20),
        ],
        format_job,
    )
    .on_select(move |job: &Job| Effect::Push(job_palette_entry(ctx.clone(), job)));

    ScreenEntry::new(table)
        .with_command(command)
        .with_breadcrumb("Jobs")
}

/// Commands offered for a job. Every job has details; only pending and
/// running jobs can be canceled.
pub fn job_commands(ctx: &AppContext, job: &Job) -> Vec<PaletteCommand> {
    let mut commands = Vec::new();

    {
        let ctx = ctx.clone();
        let service_id = job.service_id.clone();
        let job_id = job.id.clone();
        commands.push(PaletteCommand::new("details", "Show the job's current state", move || {
            Effect::Push(job_details_entry(ctx.clone(), service_id.clone(), job_id.clone()))
        }));
    }

    if job.status.is_some_and(|s| s.is_active()) {
        let ctx = ctx.clone();
        let service_id = job.service_id.clone();
        let job_id = job.id.clone();
        commands.push(PaletteCommand::new("cancel", "Cancel the job", move || {
            Effect::Push(cancel_job_entry(ctx.clone(), service_id.clone(), job_id.clone()))
        }));
    }

    commands
}

fn job_palette_entry(ctx: AppContext, job: &Job) -> ScreenEntry {
    ScreenEntry::new(PaletteScreen::new(job_commands(&ctx, job))).with_breadcrumb(job.id.clone())
}
