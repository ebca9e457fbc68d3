use chrono::NaiveDate;

/// Formats currency amounts for presentation. Rounding happens here and nowhere else.
pub trait CurrencyFormatter: Send + Sync {
    fn format_amount(&self, amount: f64) -> String;
}

/// Formats dates for presentation.
pub trait DateFormatter: Send + Sync {
    fn format_date(&self, date: NaiveDate) -> String;

    /// Compact label for chart axes. Defaults to the full format.
    fn format_short(&self, date: NaiveDate) -> String {
        self.format_date(date)
    }
}
