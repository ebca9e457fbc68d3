use std::{
    cmp::Reverse,
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Config, ConfigError};

/// Overrides the base directory holding config, data and backups.
pub const HOME_ENV_VAR: &str = "EXPENSE_TRACKER_HOME";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";

/// `$EXPENSE_TRACKER_HOME`, else `~/.expense_tracker`, else `./.expense_tracker`.
pub fn default_base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV_VAR).filter(|value| !value.is_empty()) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".expense_tracker")
}

/// Handles persistence and backup management for [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        let backups_dir = config_dir.join("backups");
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            config_path: config_dir.join("config.json"),
            backups_dir,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Reads the config file, falling back to defaults when it does not exist yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }

    /// Writes a snapshot and returns its file name.
    pub fn backup(&self, config: &Config, note: Option<&str>) -> Result<String, ConfigError> {
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT);
        let mut name = format!("config_{timestamp}");
        if let Some(label) = sanitize_note(note) {
            name.push('_');
            name.push_str(&label);
        }
        name.push_str(&format!(".{BACKUP_EXTENSION}"));
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.backups_dir.join(&name), &json)?;
        Ok(name)
    }

    /// Reads a snapshot. The caller decides whether to save it as the live config.
    pub fn restore(&self, backup_name: &str) -> Result<Config, ConfigError> {
        let path = self.backups_dir.join(backup_name);
        if !path.is_file() {
            return Err(ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("configuration backup `{backup_name}` not found"),
            )));
        }
        let data = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Backup file names, newest first.
    pub fn list_backups(&self) -> Result<Vec<String>, ConfigError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| {
            Reverse(parse_timestamp(a))
                .cmp(&Reverse(parse_timestamp(b)))
                .then_with(|| b.cmp(a))
        });
        Ok(entries)
    }
}

fn sanitize_note(note: Option<&str>) -> Option<String> {
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

fn parse_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let rest = name
        .strip_suffix(&format!(".{BACKUP_EXTENSION}"))?
        .strip_prefix("config_")?;
    let mut segments = rest.split('_');
    let date = segments.next()?;
    let time = segments.next()?;
    if date.len() != 8 || time.len() != 6 {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{date}{time}"), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
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

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
