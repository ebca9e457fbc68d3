use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use expense_core::{AnalyticsService, ExpenseRepository, SortColumn, ViewState};
use expense_domain::{Category, Expense, ExpenseDraft, ExpenseId};
use expense_storage_json::{load_from_path, save_to_path};
use tempfile::tempdir;

fn build_sample_expenses(count: usize) -> Vec<Expense> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let categories = Category::known();
    (0..count)
        .map(|idx| {
            Expense::new(
                ExpenseId(idx as u64 + 1),
                ExpenseDraft::new(
                    categories[idx % categories.len()].clone(),
                    10.0 + (idx % 250) as f64,
                    format!("expense {idx}"),
                    start + Duration::days((idx % 366) as i64),
                ),
            )
        })
        .collect()
}

fn bench_analytics(c: &mut Criterion) {
    let repository = ExpenseRepository::from_expenses(build_sample_expenses(black_box(10_000)));
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

    c.bench_function("dashboard_10k", |b| {
        b.iter(|| black_box(AnalyticsService::dashboard(repository.expenses(), today)))
    });

    let mut view = ViewState::new();
    view.apply_filter(Some("food"));
    view.toggle_sort(SortColumn::Amount);
    c.bench_function("view_filtered_sorted_10k", |b| {
        b.iter(|| black_box(view.compute_view(repository.expenses()).len()))
    });
}

fn bench_storage(c: &mut Criterion) {
    let expenses = build_sample_expenses(10_000);
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("expenses.json");

    c.bench_function("expenses_save_10k", |b| {
        b.iter(|| save_to_path(&expenses, &file_path).expect("save expenses"))
    });

    save_to_path(&expenses, &file_path).expect("seed");
    c.bench_function("expenses_load_10k", |b| {
        b.iter(|| black_box(load_from_path(&file_path).expect("load expenses")))
    });
}

criterion_group!(benches, bench_analytics, bench_storage);
criterion_main!(benches);
