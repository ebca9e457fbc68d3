use dialoguer::Select;
use expense_storage_json::BackupInfo;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::{self, preferences};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "backup",
            "Snapshot the expense file",
            "backup [note]",
            cmd_backup,
        ),
        CommandEntry::new(
            "backups",
            "List expense snapshots, newest first",
            "backups",
            cmd_backups,
        ),
        CommandEntry::new(
            "restore",
            "Replace all expenses with a snapshot",
            "restore <name|number>",
            cmd_restore,
        ),
    ]
}

fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let note = args.join(" ");
    let note = Some(note.trim()).filter(|note| !note.is_empty());
    let info = context
        .storage
        .backup(context.tracker.repository().expenses(), note)?;
    io::print_success(format!("Backup written: {}", info.id));
    Ok(())
}

fn cmd_backups(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let backups = context.storage.list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups yet.");
        return Ok(());
    }

    let mut table = Table::new(
        Some(format!("Backups of `{}`", context.storage.key())),
        vec![
            TableColumn::new("#", 2).right(),
            TableColumn::new("Name", 24),
            TableColumn::new("Created", 19),
            TableColumn::new("Size", 6).right(),
        ],
    );
    for (index, backup) in backups.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            backup.id.clone(),
            backup
                .created_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "unknown".into()),
            format!("{} B", backup.size_bytes),
        ]);
    }
    output::text(TableRenderer::render(&table, preferences().plain_mode));
    Ok(())
}

fn cmd_restore(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let backups = context.storage.list_backups()?;
    if backups.is_empty() {
        io::print_info("No backups to restore.");
        return Ok(());
    }

    let name = match args {
        [reference] => resolve_reference(&backups, reference)?,
        [] if context.can_prompt() => {
            let labels: Vec<&str> = backups.iter().map(|backup| backup.id.as_str()).collect();
            let choice = Select::with_theme(&context.theme)
                .with_prompt("Select backup to restore")
                .items(&labels)
                .default(0)
                .interact_opt()?;
            match choice {
                Some(index) => backups[index].id.clone(),
                None => {
                    io::print_info("Operation cancelled.");
                    return Ok(());
                }
            }
        }
        _ => return Err(CommandError::usage("restore <name|number>")),
    };

    context.storage.restore_backup(&name)?;
    let loaded = context.tracker.reload()?;
    io::print_success(format!("Restored {loaded} expenses from {name}."));
    Ok(())
}

/// Accepts a backup file name or its 1-based position in `backups`.
fn resolve_reference(backups: &[BackupInfo], reference: &str) -> Result<String, CommandError> {
    if let Some(found) = backups.iter().find(|backup| backup.id == reference) {
        return Ok(found.id.clone());
    }
    reference
        .parse::<usize>()
        .ok()
        .and_then(|position| position.checked_sub(1))
        .and_then(|index| backups.get(index))
        .map(|backup| backup.id.clone())
        .ok_or_else(|| CommandError::Message(format!("Backup `{reference}` not found.")))
}
