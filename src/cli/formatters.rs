use chrono::NaiveDate;
use expense_config::{Config, DateStyle};
use expense_core::{CurrencyFormatter, DateFormatter};

/// Presentation formatters derived from the active configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFormatters {
    symbol: String,
    precision: usize,
    date_style: DateStyle,
}

impl CliFormatters {
    pub fn from_config(config: &Config) -> Self {
        Self {
            symbol: config.currency_symbol.clone(),
            precision: config.currency_precision as usize,
            date_style: config.date_style,
        }
    }

    /// Share of a total as a percentage with one decimal place.
    pub fn format_percent(&self, share: f64) -> String {
        format!("{share:.1}%")
    }
}

impl Default for CliFormatters {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CurrencyFormatter for CliFormatters {
    fn format_amount(&self, amount: f64) -> String {
        format!("{}{amount:.prec$}", self.symbol, prec = self.precision)
    }
}

impl DateFormatter for CliFormatters {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_style.pattern()).to_string()
    }

    fn format_short(&self, date: NaiveDate) -> String {
        match self.date_style {
            DateStyle::Short => date.format("%b %-d").to_string(),
            DateStyle::Iso => date.format("%m-%d").to_string(),
        }
    }
}
