use expense_core::{CurrencyFormatter, DateFormatter, SortColumn, SortConfig, SortDirection};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::forms::parse_category;
use crate::cli::io;
use crate::cli::output::{self, preferences};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "Show expenses with the active filter and sort",
            "list",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "filter",
            "Show only one category, or `all` to clear",
            "filter [category|all]",
            cmd_filter,
        ),
        CommandEntry::new(
            "sort",
            "Sort by a column; repeating the column flips the direction",
            "sort <date|category|description|amount>",
            cmd_sort,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let total = context.tracker.repository().len();
    if total == 0 {
        io::print_info("No expenses recorded yet. Use `add` to record one.");
        return Ok(());
    }

    let rows = context.tracker.view();
    let state = context.tracker.view_state();
    if rows.is_empty() {
        io::print_info(format!(
            "No expenses in category `{}`. Use `filter all` to show everything.",
            state.filter_category().unwrap_or_default()
        ));
        return Ok(());
    }

    let sort = state.sort();
    let title = match state.filter_category() {
        Some(category) => format!("Expenses: {category} ({} of {total})", rows.len()),
        None => format!("Expenses ({total})"),
    };
    let column = |label: &str, col: SortColumn, min: usize| {
        TableColumn::new(format!("{label} {}", sort_indicator(sort, col)), min)
    };
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::new("Id", 2).right(),
            column("Date", SortColumn::Date, 12),
            column("Category", SortColumn::Category, 10),
            column("Description", SortColumn::Description, 12),
            column("Amount", SortColumn::Amount, 10).right(),
        ],
    );

    let formatters = &context.formatters;
    let editing = context.tracker.editing();
    for expense in &rows {
        let marker = if editing == Some(expense.id) { "*" } else { "" };
        table.add_row(vec![
            format!("{marker}{}", expense.id),
            formatters.format_date(expense.date),
            expense.category.label(),
            expense.description.clone(),
            formatters.format_amount(expense.amount),
        ]);
    }

    output::text(TableRenderer::render(&table, preferences().plain_mode));
    let shown: f64 = rows.iter().map(|expense| expense.amount).sum();
    io::print_info(format!("Total shown: {}", formatters.format_amount(shown)));
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let requested = args.join(" ");
    let requested = requested.trim();
    if requested.is_empty() || requested.eq_ignore_ascii_case("all") {
        context.tracker.set_filter(None);
        io::print_info("Showing all categories.");
        return Ok(());
    }

    // Known names are matched loosely; anything else filters on the literal stored name.
    let name = parse_category(requested)
        .map(|category| category.as_str().to_string())
        .unwrap_or_else(|_| requested.to_string());
    context.tracker.set_filter(Some(&name));
    let matches = context.tracker.view().len();
    io::print_info(format!("Filtering by `{name}` ({matches} matching)."));
    Ok(())
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::usage(
            "sort <date|category|description|amount>",
        ));
    };
    let column: SortColumn = raw.parse()?;
    let config = context.tracker.toggle_sort(column);
    io::print_info(format!(
        "Sorted by {} ({}).",
        config.column,
        direction_label(config.direction)
    ));
    Ok(())
}

fn sort_indicator(sort: Option<SortConfig>, column: SortColumn) -> &'static str {
    match sort {
        Some(config) if config.column == column => match config.direction {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        },
        _ => "↕",
    }
}

fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ascending",
        SortDirection::Descending => "descending",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_marks_only_the_active_column() {
        let sort = Some(SortConfig {
            column: SortColumn::Amount,
            direction: SortDirection::Descending,
        });
        assert_eq!(sort_indicator(sort, SortColumn::Amount), "↓");
        assert_eq!(sort_indicator(sort, SortColumn::Date), "↕");
        assert_eq!(sort_indicator(None, SortColumn::Date), "↕");
    }
}
