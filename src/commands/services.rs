//! The `services` command: every service and database in the workspace,
//! and a palette of what can be done with the selected one.

use super::jobs::jobs_entry;
use super::mutations::{deploy_entry, restart_entry};
use super::workspace::workspaces_entry;
use super::AppContext;
use crate::api::ListJobsInput;
use crate::api::services::{
    BACKGROUND_WORKER, CRON_JOB, PRIVATE_SERVICE, SERVICE_TYPES, WEB_SERVICE,
};
use crate::core::error::AppError;
use crate::core::resource::Resource;
use crate::tui::action::Effect;
use crate::tui::loader::Loader;
use crate::tui::screens::{Column, PaletteCommand, PaletteScreen, TableScreen};
use crate::tui::stack::ScreenEntry;

/// Service types that can run one-off jobs.
const JOB_TYPES: &[&str] = &[WEB_SERVICE, PRIVATE_SERVICE, BACKGROUND_WORKER, CRON_JOB];

async fn list_resources(ctx: AppContext) -> Result<Vec<Resource>, AppError> {
    ctx.resources().list_resources(ctx.workspace.as_deref()).await
}

fn format_resource(r: &Resource) -> Vec<String> {
    vec![
        r.id().to_string(),
        r.resource_type().to_string(),
        r.project_name.clone(),
        r.environment_name.clone(),
        r.name().to_string(),
    ]
}

fn filter_resource(r: &Resource, filter: &str) -> bool {
    [
        r.id(),
        r.name(),
        r.project_name.as_str(),
        r.environment_name.as_str(),
        r.resource_type(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(filter))
}

pub fn services_entry(ctx: AppContext) -> ScreenEntry {
    let command = ctx.command_line(&["services"]);

    let load_ctx = ctx.clone();
    let select_ctx = ctx.clone();
    let table = TableScreen::new(
        Loader::new(move || list_resources(load_ctx.clone())),
        vec![
            Column::fixed("ID", 25),
            Column::fixed("Type", 18),
            Column::fixed("Project", 15),
            Column::fixed("Environment", 20),
            Column::flex("Name", 1),
        ],
        format_resource,
    )
    .with_filter(filter_resource)
    .on_select(move |r: &Resource| {
        Effect::Push(resource_palette_entry(select_ctx.clone(), r))
    })
    .with_option('w', "Change Workspace", move |_: Option<&Resource>| {
        Effect::Push(workspaces_entry(ctx.clone()))
    });

    ScreenEntry::new(table)
        .with_command(command)
        .with_breadcrumb("Services")
}

/// Commands offered for `resource`, filtered by its type.
pub fn resource_commands(ctx: &AppContext, resource: &Resource) -> Vec<PaletteCommand> {
    let id = resource.id().to_string();
    let resource_type = resource.resource_type();
    let mut commands = Vec::new();

    if JOB_TYPES.iter().any(|t| *t == resource_type) {
        let (ctx, id) = (ctx.clone(), id.clone());
        commands.push(PaletteCommand::new("jobs", "List jobs for the service", move || {
            Effect::Push(jobs_entry(ctx.clone(), ListJobsInput::for_service(id.clone())))
        }));
    }

    {
        let (ctx, id) = (ctx.clone(), id.clone());
        commands.push(PaletteCommand::new("restart", "Restart the resource", move || {
            Effect::Push(restart_entry(ctx.clone(), id.clone()))
        }));
    }

    if SERVICE_TYPES.iter().any(|t| *t == resource_type) {
        let ctx = ctx.clone();
        commands.push(PaletteCommand::new("deploy", "Deploy the service", move || {
            Effect::Push(deploy_entry(ctx.clone(), id.clone()))
        }));
    }

    commands
}

fn resource_palette_entry(ctx: AppContext, resource: &Resource) -> ScreenEntry {
    ScreenEntry::new(PaletteScreen::new(resource_commands(&ctx, resource)))
        .with_breadcrumb(resource.name().to_string())
}
