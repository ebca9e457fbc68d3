use dialoguer::Select;

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

const CONFIG_USAGE: &str = "config [show|set <key> <value>|backup [note]|backups|restore [name]]";

/// Keys whose change requires reopening the expense store.
const STORAGE_KEYS: [&str; 4] = ["store_key", "backup_retention", "data_root", "backup_root"];

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and manage preferences",
        CONFIG_USAGE,
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return show_config(context);
    };

    match action.to_lowercase().as_str() {
        "show" => show_config(context),
        "set" => {
            let [key, value @ ..] = rest else {
                return Err(CommandError::usage("config set <key> <value>"));
            };
            if value.is_empty() {
                return Err(CommandError::usage("config set <key> <value>"));
            }
            set_value(context, key, &value.join(" "))
        }
        "backup" => {
            let note = rest.join(" ");
            let note = Some(note.trim()).filter(|note| !note.is_empty());
            let name = context.config_manager.backup(&context.config, note)?;
            io::print_success(format!("Configuration backup created: {name}"));
            Ok(())
        }
        "backups" => list_backups(context),
        "restore" => restore(context, rest.first().copied()),
        _ => Err(CommandError::usage(CONFIG_USAGE)),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    output_section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {key:<20} {value}"));
    }
    io::print_info(format!(
        "  {:<20} {}",
        "config_file",
        context.config_manager.config_path().display()
    ));
    io::print_info(format!(
        "  {:<20} {}",
        "expense_file",
        context.storage.store_path().display()
    ));
    Ok(())
}

fn set_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let previous = context.config.clone();
    context.config.set(key, value)?;
    if context.config == previous {
        io::print_info(format!("`{key}` is already `{}`.", value.trim()));
        return Ok(());
    }
    context.persist_config()?;

    let normalized = key.trim().to_ascii_lowercase();
    if STORAGE_KEYS.contains(&normalized.as_str()) {
        if let Err(err) = context.reopen_storage() {
            // Keep the old store usable rather than leave the shell without one.
            context.config = previous;
            context.persist_config()?;
            return Err(err);
        }
        io::print_info(format!(
            "Expense file: {}",
            context.storage.store_path().display()
        ));
    }
    io::print_success(format!("Set `{normalized}` to `{}`.", value.trim()));
    Ok(())
}

fn list_backups(context: &ShellContext) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups yet.");
        return Ok(());
    }
    output_section("Configuration backups");
    for (index, name) in backups.iter().enumerate() {
        io::print_info(format!("  {:>2}. {name}", index + 1));
    }
    Ok(())
}

fn restore(context: &mut ShellContext, reference: Option<&str>) -> CommandResult {
    let backups = context.config_manager.list_backups()?;
    if backups.is_empty() {
        io::print_info("No configuration backups to restore.");
        return Ok(());
    }

    let name = match reference {
        Some(reference) => backups
            .iter()
            .find(|name| name.as_str() == reference)
            .cloned()
            .or_else(|| {
                reference
                    .parse::<usize>()
                    .ok()
                    .and_then(|position| position.checked_sub(1))
                    .and_then(|index| backups.get(index).cloned())
            })
            .ok_or_else(|| {
                CommandError::Message(format!("Configuration backup `{reference}` not found."))
            })?,
        None if context.can_prompt() => {
            let choice = Select::with_theme(&context.theme)
                .with_prompt("Select configuration backup")
                .items(&backups)
                .default(0)
                .interact_opt()?;
            match choice {
                Some(index) => backups[index].clone(),
                None => {
                    io::print_info("Operation cancelled.");
                    return Ok(());
                }
            }
        }
        None => return Err(CommandError::usage("config restore <name>")),
    };

    context.config = context.config_manager.restore(&name)?;
    context.persist_config()?;
    context.reopen_storage()?;
    io::print_success(format!("Configuration restored from {name}."));
    Ok(())
}
