//! The `workspaces` command: pick the owner the session is scoped to.
//!
//! Selecting a workspace replaces the whole stack with a services table for
//! that workspace. The choice lasts for the session only; the config file is
//! never written.

use log::info;

use super::AppContext;
use super::services::services_entry;
use crate::api::OwnerRepo;
use crate::api::types::Owner;
use crate::core::error::AppError;
use crate::tui::action::{Action, Effect};
use crate::tui::loader::Loader;
use crate::tui::screens::{Column, TableScreen};
use crate::tui::stack::ScreenEntry;

async fn list_owners(owners: OwnerRepo) -> Result<Vec<Owner>, AppError> {
    owners.list_owners().await
}

fn format_owner(owner: &Owner) -> Vec<String> {
    vec![
        owner.id.clone(),
        owner.name.clone(),
        owner.email.clone().unwrap_or_default(),
    ]
}

/// Effect of choosing `owner`: start over on its services.
pub fn select_workspace(ctx: &AppContext, owner: &Owner) -> Effect {
    info!("Switching to workspace {} ({})", owner.name, owner.id);
    let services = services_entry(ctx.with_workspace(owner.id.clone()));
    Effect::Emit(Action::ClearScreen(Box::new(Effect::Push(services))))
}

pub fn workspaces_entry(ctx: AppContext) -> ScreenEntry {
    let command = ctx.command_line(&["workspaces"]);

    let repo_ctx = ctx.clone();
    let table = TableScreen::new(
        Loader::new(move || list_owners(repo_ctx.owners())),
        vec![
            Column::fixed("ID", 28),
            Column::flex("Name", 1),
            Column::flex("Email", 1),
        ],
        format_owner,
    )
    .on_select(move |owner: &Owner| select_workspace(&ctx, owner));

    ScreenEntry::new(table)
        .with_command(command)
        .with_breadcrumb("Workspaces")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_context;
    use crate::test_support::{FakeClipboard, entry};
    use crate::tui::stack::Stack;

    fn owner() -> Owner {
        Owner {
            id: "tea-42".to_string(),
            name: "Acme".to_string(),
            email: Some("ops@acme.dev".to_string()),
        }
    }

    #[test]
    fn test_select_replaces_stack_with_scoped_services() {
        let mut stack = Stack::new(Box::new(FakeClipboard::default()));
        stack.push(entry("services").with_breadcrumb("Services"));
        stack.push(entry("workspaces").with_breadcrumb("Workspaces"));

        let Effect::Emit(action) = select_workspace(&test_context(None), &owner()) else {
            panic!("selecting a workspace should emit ClearScreen");
        };
        let Effect::Push(services) = stack.dispatch(action) else {
            panic!("ClearScreen should hand back the services push");
        };
        assert!(stack.is_empty());
        assert_eq!(
            services.command.as_deref(),
            Some("cloudnav services --workspace tea-42")
        );
    }

    #[test]
    fn test_format_owner_without_email() {
        let mut o = owner();
        o.email = None;
        assert_eq!(format_owner(&o), ["tea-42", "Acme", ""]);
    }
}
