use serde::{de::Deserializer, Deserialize, Serialize};
use std::{fmt, path::PathBuf};

use crate::ConfigError;

/// User preferences for the expense tracker CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_currency_precision")]
    pub currency_precision: u8,
    #[serde(default)]
    pub date_style: DateStyle,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_store_key")]
    pub store_key: String,
    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory for the expense file. Defaults to `<base>/data`.
    pub data_root: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory for expense backups. Defaults to `<base>/backups`.
    pub backup_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-IN".into(),
            currency: "INR".into(),
            currency_symbol: Self::default_currency_symbol(),
            currency_precision: Self::default_currency_precision(),
            date_style: DateStyle::default(),
            accessibility: AccessibilitySettings::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            store_key: Self::default_store_key(),
            backup_retention: Self::default_backup_retention(),
            data_root: None,
            backup_root: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "₹".into()
    }

    pub fn default_currency_precision() -> u8 {
        2
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_store_key() -> String {
        "expenses".into()
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    /// Directory holding the expense file, relative to `base` unless overridden.
    pub fn resolve_data_root(&self, base: &std::path::Path) -> PathBuf {
        self.data_root.clone().unwrap_or_else(|| base.join("data"))
    }

    pub fn resolve_backup_root(&self, base: &std::path::Path) -> PathBuf {
        self.backup_root
            .clone()
            .unwrap_or_else(|| base.join("backups"))
    }

    /// Whether output should avoid colour and decoration.
    pub fn plain(&self) -> bool {
        self.accessibility.plain_output || !self.ui_color_enabled
    }

    /// Key/value pairs shown by `config show`, in a stable order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let optional = |path: &Option<PathBuf>| {
            path.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(default)".into())
        };
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            ("currency_symbol", self.currency_symbol.clone()),
            ("currency_precision", self.currency_precision.to_string()),
            ("date_style", self.date_style.to_string()),
            ("ui_color_enabled", self.ui_color_enabled.to_string()),
            ("plain_output", self.accessibility.plain_output.to_string()),
            ("high_contrast", self.accessibility.high_contrast.to_string()),
            ("store_key", self.store_key.clone()),
            ("backup_retention", self.backup_retention.to_string()),
            ("data_root", optional(&self.data_root)),
            ("backup_root", optional(&self.backup_root)),
        ]
    }

    /// Updates a single preference from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "locale" => self.locale = non_empty(key, value)?,
            "currency" => self.currency = non_empty(key, value)?.to_ascii_uppercase(),
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "currency_precision" => {
                let precision: u8 = parse(key, value)?;
                if precision > 6 {
                    return Err(invalid(key, value));
                }
                self.currency_precision = precision;
            }
            "date_style" => {
                self.date_style = DateStyle::parse(value).ok_or_else(|| invalid(key, value))?
            }
            "ui_color_enabled" => self.ui_color_enabled = parse_bool(key, value)?,
            "plain_output" => self.accessibility.plain_output = parse_bool(key, value)?,
            "high_contrast" => self.accessibility.high_contrast = parse_bool(key, value)?,
            "store_key" => self.store_key = non_empty(key, value)?,
            "backup_retention" => {
                let retention: usize = parse(key, value)?;
                if retention == 0 {
                    return Err(invalid(key, value));
                }
                self.backup_retention = retention;
            }
            "data_root" => self.data_root = optional_path(value),
            "backup_root" => self.backup_root = optional_path(value),
            _ => {
                return Err(ConfigError::InvalidValue(format!(
                    "unknown configuration key `{key}`"
                )))
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue(format!("`{value}` is not a valid value for `{key}`"))
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(invalid(key, value));
    }
    Ok(value.to_string())
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn optional_path(value: &str) -> Option<PathBuf> {
    match value {
        "" | "default" | "none" => None,
        path => Some(PathBuf::from(path)),
    }
}

/// How dates are printed in tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `Mar 1, 2024`
    #[default]
    Short,
    /// `2024-03-01`
    Iso,
}

impl DateStyle {
    pub fn pattern(self) -> &'static str {
        match self {
            DateStyle::Short => "%b %-d, %Y",
            DateStyle::Iso => "%Y-%m-%d",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => Some(DateStyle::Short),
            "iso" => Some(DateStyle::Iso),
            _ => None,
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DateStyle::Short => "short",
            DateStyle::Iso => "iso",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for DateStyle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .as_deref()
            .and_then(DateStyle::parse)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
    #[serde(default)]
    pub high_contrast: bool,
}
