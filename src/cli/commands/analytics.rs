use chrono::Datelike;
use expense_core::{CurrencyFormatter, DateFormatter};
use expense_domain::{CategoryTotal, DashboardSummary, MonthWindow};

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::{self, preferences, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Table, TableColumn, TableRenderer};

const BAR_WIDTH: usize = 30;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Show this month's totals and daily average",
            "summary",
            cmd_summary,
        )
        .with_aliases(&["dashboard"]),
        CommandEntry::new(
            "weeks",
            "Chart this month's spending by week (Monday to Sunday)",
            "weeks",
            cmd_weeks,
        ),
        CommandEntry::new(
            "days",
            "Chart this month's spending per day",
            "days",
            cmd_days,
        ),
        CommandEntry::new(
            "categories",
            "Break spending down by category",
            "categories [--all]",
            cmd_categories,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.tracker.dashboard();
    let formatters = &context.formatters;

    output_section(format!("Summary for {}", month_label(&summary)));
    io::print_info(format!(
        "  This month    : {} ({} expenses)",
        formatters.format_amount(summary.month_total),
        summary.month_count
    ));
    io::print_info(format!(
        "  Daily average : {}",
        formatters.format_amount(summary.average_daily)
    ));
    io::print_info(format!(
        "  All time      : {} ({} expenses)",
        formatters.format_amount(summary.all_time_total),
        summary.all_time_count
    ));
    if let Some(top) = summary
        .month_category_totals
        .iter()
        .max_by(|a, b| a.total.total_cmp(&b.total))
    {
        io::print_info(format!(
            "  Top category  : {} {} ({})",
            top.category.label(),
            formatters.format_amount(top.total),
            formatters.format_percent(summary.month_share(&top.category))
        ));
    }
    Ok(())
}

fn cmd_weeks(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.tracker.dashboard();
    let formatters = &context.formatters;
    let plain = preferences().plain_mode;
    let max = summary
        .week_buckets
        .iter()
        .map(|bucket| bucket.total)
        .fold(0.0, f64::max);

    let mut table = Table::new(
        Some(format!("Weekly spending, {}", month_label(&summary))),
        vec![
            TableColumn::new("Week", 6),
            TableColumn::new("Days", 14),
            TableColumn::new("Total", 10).right(),
            TableColumn::new("", 0),
        ],
    );
    for bucket in &summary.week_buckets {
        table.add_row(vec![
            bucket.label(),
            format!(
                "{} - {}",
                formatters.format_short(bucket.start),
                formatters.format_short(bucket.end)
            ),
            formatters.format_amount(bucket.total),
            bar(bucket.total, max, plain),
        ]);
    }
    output::text(TableRenderer::render(&table, plain));
    Ok(())
}

fn cmd_days(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.tracker.dashboard();
    if summary.daily_buckets.is_empty() {
        io::print_info(format!("No spending recorded in {}.", month_label(&summary)));
        return Ok(());
    }

    let formatters = &context.formatters;
    let plain = preferences().plain_mode;
    let max = summary
        .daily_buckets
        .iter()
        .map(|bucket| bucket.total)
        .fold(0.0, f64::max);

    let mut table = Table::new(
        Some(format!("Daily spending, {}", month_label(&summary))),
        vec![
            TableColumn::new("Day", 6),
            TableColumn::new("Total", 10).right(),
            TableColumn::new("", 0),
        ],
    );
    for bucket in &summary.daily_buckets {
        table.add_row(vec![
            formatters.format_short(bucket.date),
            formatters.format_amount(bucket.total),
            bar(bucket.total, max, plain),
        ]);
    }
    output::text(TableRenderer::render(&table, plain));
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let all_time = match args {
        [] => false,
        ["--all"] => true,
        _ => return Err(CommandError::usage("categories [--all]")),
    };
    let summary = context.tracker.dashboard();
    let (title, totals, grand_total) = if all_time {
        (
            "Spending by category, all time".to_string(),
            &summary.all_time_category_totals,
            summary.all_time_total,
        )
    } else {
        (
            format!("Spending by category, {}", month_label(&summary)),
            &summary.month_category_totals,
            summary.month_total,
        )
    };

    if totals.is_empty() {
        io::print_info("No spending to break down yet.");
        return Ok(());
    }

    let formatters = &context.formatters;
    let plain = preferences().plain_mode;
    let mut sorted: Vec<&CategoryTotal> = totals.iter().collect();
    sorted.sort_by(|a, b| b.total.total_cmp(&a.total));
    let max = sorted.first().map(|entry| entry.total).unwrap_or(0.0);

    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::new("Category", 10),
            TableColumn::new("Total", 10).right(),
            TableColumn::new("Share", 6).right(),
            TableColumn::new("", 0),
        ],
    );
    for entry in sorted {
        let share = if grand_total > 0.0 {
            entry.total / grand_total * 100.0
        } else {
            0.0
        };
        let label = if entry.category.is_recognized() {
            entry.category.label()
        } else {
            format!("{} ({})", entry.category.label(), entry.category.display_bucket())
        };
        table.add_row(vec![
            label,
            formatters.format_amount(entry.total),
            formatters.format_percent(share),
            bar(entry.total, max, plain),
        ]);
    }
    output::text(TableRenderer::render(&table, plain));
    Ok(())
}

fn month_label(summary: &DashboardSummary) -> String {
    let month = MonthWindow::containing(summary.reference);
    format!("{} {}", month.start.format("%B"), month.start.year())
}

/// Horizontal bar scaled so that `max` fills the full width.
fn bar(value: f64, max: f64, plain: bool) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * BAR_WIDTH as f64).round().max(1.0) as usize;
    let glyph = if plain { "#" } else { "█" };
    glyph.repeat(cells.min(BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_largest_value() {
        assert_eq!(bar(50.0, 100.0, true).len(), BAR_WIDTH / 2);
        assert_eq!(bar(100.0, 100.0, true).len(), BAR_WIDTH);
        assert_eq!(bar(0.01, 100.0, true), "#");
        assert_eq!(bar(0.0, 100.0, true), "");
        assert_eq!(bar(5.0, 0.0, false), "");
    }
}
