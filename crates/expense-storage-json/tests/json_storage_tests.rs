use chrono::NaiveDate;
use expense_core::ExpenseStore;
use expense_domain::{Expense, ExpenseDraft, ExpenseId};
use expense_storage_json::{JsonExpenseStore, StoragePaths};
use std::{fs, path::Path};
use tempfile::tempdir;

fn expense(id: u64, category: &str, amount: f64) -> Expense {
    Expense::new(
        ExpenseId(id),
        ExpenseDraft::new(
            category,
            amount,
            "stored",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        ),
    )
}

#[test]
fn json_store_saves_and_loads_expenses() {
    let dir = tempdir().expect("tempdir");
    let store = JsonExpenseStore::new(StoragePaths::under(dir.path())).expect("create store");

    let expenses = vec![expense(1, "food", 10.0), expense(2, "fuel", 20.5)];
    store.save(&expenses).expect("save expenses");
    let loaded = store.load().expect("load expenses");

    assert_eq!(loaded, expenses);
    let path = store.store_path();
    assert_eq!(path.file_name().and_then(|name| name.to_str()), Some("expenses.json"));
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_store_missing_file_is_empty() {
    let dir = tempdir().expect("tempdir");
    let store = JsonExpenseStore::new(StoragePaths::under(dir.path())).expect("create store");
    assert!(store.load().expect("load").is_empty());
}

#[test]
fn json_store_reports_corrupt_file() {
    let dir = tempdir().expect("tempdir");
    let store = JsonExpenseStore::new(StoragePaths::under(dir.path())).expect("create store");
    fs::write(store.store_path(), "{ nope").expect("write garbage");
    let err = store.load().expect_err("corrupt file");
    assert!(err.to_string().contains("Serialization"), "unexpected: {err}");
}

#[test]
fn json_store_reads_records_without_description() {
    let dir = tempdir().expect("tempdir");
    let store = JsonExpenseStore::new(StoragePaths::under(dir.path())).expect("create store");
    fs::write(
        store.store_path(),
        r#"[{"id": 42, "category": "pets", "amount": 3.5, "date": "2024-02-29"}]"#,
    )
    .expect("write legacy record");

    let loaded = store.load().expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].description, "");
    assert_eq!(loaded[0].category.as_str(), "pets");
    assert!(!loaded[0].category.is_recognized());
}

#[test]
fn json_store_creates_and_restores_backups() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let store = JsonExpenseStore::new(paths.clone()).expect("create store");

    let original = vec![expense(1, "food", 10.0)];
    store.save(&original).expect("save original");
    let info = store
        .backup(&original, Some("Before cleanup"))
        .expect("create backup");
    assert!(info.id.ends_with("_before-cleanup.json"), "id: {}", info.id);
    assert!(info.created_at.is_some());
    assert_eq!(info.path.parent(), Some(paths.backup_root.join("expenses").as_path()));

    store.save(&[]).expect("clear store");
    assert!(store.load().expect("load").is_empty());

    let backups = store.list_backups().expect("list backups");
    assert!(backups.iter().any(|entry| entry.id == info.id));

    let restored = store.restore_backup(&info.id).expect("restore backup");
    assert_eq!(restored, original);
    assert_eq!(store.load().expect("load restored"), original);
}

#[test]
fn json_store_restore_of_unknown_backup_fails() {
    let dir = tempdir().expect("tempdir");
    let store = JsonExpenseStore::new(StoragePaths::under(dir.path())).expect("create store");
    let err = store
        .restore_backup("expenses_20200101_000000.json")
        .expect_err("missing backup");
    assert!(err.to_string().contains("not found"));
}

/// Seeds automatic copies with distinct, old timestamps.
fn seed_automatic_backups(store: &JsonExpenseStore, backup_root: &Path, count: u32) {
    let dir = backup_root.join(store.key());
    fs::create_dir_all(&dir).expect("backup dir");
    for day in 1..=count {
        let name = format!("{}_202001{day:02}_000000.json", store.key());
        fs::write(dir.join(name), "[]").expect("seed backup");
    }
}

#[test]
fn json_store_prunes_backups_beyond_retention() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let store = JsonExpenseStore::with_retention(paths.clone(), "expenses", 2).expect("create store");
    seed_automatic_backups(&store, &paths.backup_root, 4);

    let expenses = vec![expense(1, "food", 1.0)];
    store.save(&expenses).expect("first save");
    store.save(&expenses).expect("second save");

    let backups = store.list_backups().expect("list");
    assert_eq!(backups.len(), 2);
    assert!(backups.iter().all(|entry| entry.note.is_none()));
    assert!(!backups.iter().any(|entry| entry.id == "expenses_20200101_000000.json"));
}

#[test]
fn json_store_keeps_labelled_backups_through_routine_saves() {
    let dir = tempdir().expect("tempdir");
    let paths = StoragePaths::under(dir.path());
    let store = JsonExpenseStore::with_retention(paths.clone(), "expenses", 2).expect("create store");
    let expenses = vec![expense(1, "food", 1.0)];
    store.save(&expenses).expect("initial save");
    let named = store
        .backup(&expenses, Some("before cleanup"))
        .expect("labelled backup");
    assert_eq!(named.note.as_deref(), Some("before-cleanup"));

    seed_automatic_backups(&store, &paths.backup_root, 6);
    for _ in 0..3 {
        store.save(&expenses).expect("routine save");
    }

    let backups = store.list_backups().expect("list");
    assert!(backups.iter().any(|entry| entry.id == named.id));
    assert_eq!(backups.iter().filter(|entry| entry.note.is_none()).count(), 2);
}

#[test]
fn json_store_uses_canonical_key_for_file_name() {
    let dir = tempdir().expect("tempdir");
    let store = JsonExpenseStore::with_retention(StoragePaths::under(dir.path()), "Household 2024", 3)
        .expect("create store");
    assert_eq!(store.key(), "household_2024");
    store.save(&[expense(9, "bills", 80.0)]).expect("save");
    assert!(dir.path().join("data").join("household_2024.json").exists());
}
