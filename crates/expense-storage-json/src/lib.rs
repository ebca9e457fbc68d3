use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use expense_core::{
    storage::{decode_expenses, encode_expenses, DEFAULT_STORE_KEY},
    CoreError, ExpenseStore,
};
use expense_domain::Expense;
use tracing::{debug, warn};

const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Directories holding the live store file and its backups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub data_root: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    pub fn new(data_root: impl Into<PathBuf>, backup_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            backup_root: backup_root.into(),
        }
    }

    /// `data/` and `backups/` underneath `base`.
    pub fn under(base: &Path) -> Self {
        Self::new(base.join("data"), base.join("backups"))
    }
}

/// A stored snapshot of the expense file.
#[derive(Debug, Clone)]
pub struct BackupInfo {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub size_bytes: u64,
    pub path: PathBuf,
    /// Label given to `backup`; `None` for the automatic copy taken before each save.
    pub note: Option<String>,
}

/// Keeps the whole expense collection in `<data_root>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place. The previous file
/// is copied into the backup directory before each overwrite, keeping at most
/// `retention` of those automatic copies. Labelled snapshots are never pruned.
#[derive(Debug, Clone)]
pub struct JsonExpenseStore {
    data_dir: PathBuf,
    backups_dir: PathBuf,
    key: String,
    retention: usize,
}

impl JsonExpenseStore {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_STORE_KEY, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        paths: StoragePaths,
        key: &str,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.data_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            data_dir: paths.data_root,
            backups_dir: paths.backup_root,
            key: canonical_key(key),
            retention: retention.max(1),
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.{}", self.key, FILE_EXTENSION))
    }

    fn backup_dir(&self) -> PathBuf {
        self.backups_dir.join(&self.key)
    }

    /// Backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };
            let size_bytes = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
            entries.push(BackupInfo {
                id: file_name.to_string(),
                created_at: parse_backup_timestamp(&self.key, file_name),
                size_bytes,
                path: path.clone(),
                note: parse_backup_note(&self.key, file_name),
            });
        }
        entries.sort_by(|a, b| {
            Reverse(a.created_at)
                .cmp(&Reverse(b.created_at))
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }

    /// Writes a snapshot of `expenses`, labelled when `note` is given.
    pub fn backup(&self, expenses: &[Expense], note: Option<&str>) -> Result<BackupInfo, CoreError> {
        let dir = self.backup_dir();
        fs::create_dir_all(&dir)?;
        let now = Utc::now();
        let mut stem = format!("{}_{}", self.key, now.format(BACKUP_TIMESTAMP_FORMAT));
        let note = sanitize_backup_note(note);
        if let Some(label) = &note {
            stem.push('_');
            stem.push_str(label);
        }
        let file_name = format!("{stem}.{FILE_EXTENSION}");
        let path = dir.join(&file_name);
        let data = encode_expenses(expenses)?;
        write_atomic(&path, &data)?;
        self.prune_backups()?;
        debug!(backup = %file_name, "backup written");
        Ok(BackupInfo {
            created_at: parse_backup_timestamp(&self.key, &file_name),
            id: file_name,
            size_bytes: data.len() as u64,
            path,
            note,
        })
    }

    /// Copies the named backup over the live file and returns its contents.
    pub fn restore_backup(&self, backup_id: &str) -> Result<Vec<Expense>, CoreError> {
        let source = self.backup_dir().join(backup_id);
        if !source.is_file() {
            return Err(CoreError::Storage(format!("backup `{backup_id}` not found")));
        }
        let expenses = load_from_path(&source)?;
        let target = self.store_path();
        let tmp = tmp_path(&target);
        // Stage first: pruning during the backup below may remove `source`.
        fs::copy(&source, &tmp)?;
        self.backup_existing_file(&target)?;
        fs::rename(&tmp, &target)?;
        Ok(expenses)
    }

    fn backup_existing_file(&self, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir();
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let backup_path = dir.join(format!("{}_{}.{}", self.key, timestamp, FILE_EXTENSION));
        fs::copy(path, &backup_path)?;
        self.prune_backups()
    }

    /// Drops the oldest automatic copies beyond `retention`.
    fn prune_backups(&self) -> Result<(), CoreError> {
        let automatic = self
            .list_backups()?
            .into_iter()
            .filter(|entry| entry.note.is_none());
        for entry in automatic.skip(self.retention) {
            if let Err(err) = fs::remove_file(&entry.path) {
                warn!(backup = %entry.id, error = %err, "failed to prune backup");
            }
        }
        Ok(())
    }
}

impl ExpenseStore for JsonExpenseStore {
    fn load(&self) -> Result<Vec<Expense>, CoreError> {
        let path = self.store_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        load_from_path(&path)
    }

    fn save(&self, expenses: &[Expense]) -> Result<(), CoreError> {
        let path = self.store_path();
        self.backup_existing_file(&path)?;
        save_to_path(expenses, &path)
    }
}

/// Writes the collection to an arbitrary path via a temporary file.
pub fn save_to_path(expenses: &[Expense], path: &Path) -> Result<(), CoreError> {
    let tmp = tmp_path(path);
    write_atomic(&tmp, &encode_expenses(expenses)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Vec<Expense>, CoreError> {
    let data = fs::read_to_string(path)?;
    decode_expenses(&data)
}

fn canonical_key(key: &str) -> String {
    let sanitized: String = key
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        DEFAULT_STORE_KEY.into()
    } else {
        sanitized
    }
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !sanitized.is_empty() && !last_dash {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Reads the `YYYYMMDD_HHMMSS` stamp that follows `<key>_` in a backup file name.
fn parse_backup_timestamp(key: &str, file_name: &str) -> Option<DateTime<Utc>> {
    let rest = file_name
        .strip_suffix(&format!(".{FILE_EXTENSION}"))?
        .strip_prefix(key)?
        .strip_prefix('_')?;
    let mut segments = rest.split('_');
    let date = segments.next()?;
    let time = segments.next()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Reads the label after `<key>_YYYYMMDD_HHMMSS_`, if any.
fn parse_backup_note(key: &str, file_name: &str) -> Option<String> {
    let rest = file_name
        .strip_suffix(&format!(".{FILE_EXTENSION}"))?
        .strip_prefix(key)?
        .strip_prefix('_')?;
    let mut segments = rest.splitn(3, '_');
    let (date, time) = (segments.next()?, segments.next()?);
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    segments
        .next()
        .filter(|note| !note.is_empty())
        .map(str::to_string)
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_replaces_unsafe_characters() {
        assert_eq!(canonical_key("My Expenses"), "my_expenses");
        assert_eq!(canonical_key("  ../ "), DEFAULT_STORE_KEY);
    }

    #[test]
    fn notes_become_slugs() {
        assert_eq!(sanitize_backup_note(Some("Before  March!")), Some("before-march".into()));
        assert_eq!(sanitize_backup_note(Some("   ")), None);
        assert_eq!(sanitize_backup_note(None), None);
    }

    #[test]
    fn timestamp_parses_after_key_prefix() {
        let parsed = parse_backup_timestamp("expenses", "expenses_20240301_101500_note.json")
            .expect("stamp parsed");
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-01 10:15:00");
        assert!(parse_backup_timestamp("expenses", "other_20240301_101500.json").is_none());
        assert!(parse_backup_timestamp("expenses", "expenses_2024.json").is_none());
    }

    #[test]
    fn note_follows_the_timestamp() {
        assert_eq!(
            parse_backup_note("expenses", "expenses_20240301_101500_before-march.json"),
            Some("before-march".into())
        );
        assert_eq!(parse_backup_note("expenses", "expenses_20240301_101500.json"), None);
    }
}
