use expense_core::{CurrencyFormatter, DateFormatter, Submission};
use expense_domain::{Expense, ExpenseDraft};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::forms::{parse_expense_form, parse_id, EXPENSE_FORM_USAGE};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Save the form: creates an expense, or updates the one being edited",
            "add <category> <amount> [YYYY-MM-DD|today|yesterday] [description...]",
            cmd_add,
        )
        .with_aliases(&["submit", "save"]),
        CommandEntry::new(
            "edit",
            "Start editing an expense; with fields, save the changes at once",
            "edit <id> [<category> <amount> [date] [description...]]",
            cmd_edit,
        )
        .with_aliases(&["update"]),
        CommandEntry::new("cancel", "Abandon the current edit", "cancel", cmd_cancel),
        CommandEntry::new(
            "delete",
            "Delete an expense",
            "delete <id> [--yes]",
            cmd_delete,
        )
        .with_aliases(&["remove", "rm"]),
        CommandEntry::new("show", "Show one expense in full", "show <id>", cmd_show),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::usage(&format!("add {EXPENSE_FORM_USAGE}")));
    }
    let draft = parse_expense_form(args, context.tracker.today())?;
    submit(context, draft)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((raw_id, fields)) = args.split_first() else {
        return Err(CommandError::usage("edit <id> [fields...]"));
    };
    let id = parse_id(raw_id)?;

    // Parse before entering edit mode so bad fields leave the session untouched.
    let draft = if fields.is_empty() {
        None
    } else {
        Some(parse_expense_form(fields, context.tracker.today())?)
    };

    let Some(current) = context.tracker.begin_edit(id) else {
        return Err(CommandError::Message(format!("Expense {id} not found.")));
    };

    match draft {
        Some(draft) => submit(context, draft),
        None => {
            output_section(format!("Editing expense {id}"));
            print_draft(context, &current);
            io::print_hint(format!(
                "Use `add {EXPENSE_FORM_USAGE}` to save changes or `cancel` to stop editing."
            ));
            Ok(())
        }
    }
}

fn cmd_cancel(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.tracker.cancel_edit() {
        Some(id) => io::print_info(format!("Stopped editing expense {id}.")),
        None => io::print_info("Nothing is being edited."),
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let skip_confirm = args.iter().any(|arg| *arg == "--yes" || *arg == "-y");
    let positional: Vec<&str> = args
        .iter()
        .copied()
        .filter(|arg| !arg.starts_with('-'))
        .collect();
    let [raw_id] = positional.as_slice() else {
        return Err(CommandError::usage("delete <id> [--yes]"));
    };
    let id = parse_id(raw_id)?;

    if context.tracker.expense(id).is_none() {
        io::print_warning(format!("Expense {id} not found."));
        return Ok(());
    }

    if context.can_prompt() && !skip_confirm {
        let confirmed = io::confirm_action(
            &context.theme,
            "Are you sure you want to delete this expense?",
            false,
        )?;
        if !confirmed {
            io::print_info("Operation cancelled.");
            return Ok(());
        }
    }

    if let Some(removed) = context.tracker.remove(id)? {
        io::print_success(format!(
            "Expense deleted: {} {} on {}.",
            removed.category.label(),
            context.formatters.format_amount(removed.amount),
            context.formatters.format_date(removed.date)
        ));
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw_id] = args else {
        return Err(CommandError::usage("show <id>"));
    };
    let id = parse_id(raw_id)?;
    let Some(expense) = context.tracker.expense(id) else {
        return Err(CommandError::Message(format!("Expense {id} not found.")));
    };
    output_section(format!("Expense {id}"));
    print_expense(context, expense);
    Ok(())
}

fn submit(context: &mut ShellContext, draft: ExpenseDraft) -> CommandResult {
    match context.tracker.submit(draft)? {
        Submission::Created(id) => {
            io::print_success(format!("Expense added (id {id})."));
        }
        Submission::Updated { id, applied: true } => {
            io::print_success(format!("Expense {id} updated."));
        }
        Submission::Updated { id, applied: false } => {
            io::print_warning(format!(
                "Expense {id} no longer exists; nothing was saved."
            ));
        }
    }
    Ok(())
}

fn print_expense(context: &ShellContext, expense: &Expense) {
    io::print_info(format!("  Id          : {}", expense.id));
    print_draft(context, &expense.to_draft());
}

fn print_draft(context: &ShellContext, draft: &ExpenseDraft) {
    let formatters = &context.formatters;
    io::print_info(format!("  Category    : {}", draft.category.label()));
    io::print_info(format!(
        "  Amount      : {}",
        formatters.format_amount(draft.amount)
    ));
    io::print_info(format!("  Date        : {}", formatters.format_date(draft.date)));
    let description = if draft.description.is_empty() {
        "-"
    } else {
        draft.description.as_str()
    };
    io::print_info(format!("  Description : {description}"));
}
