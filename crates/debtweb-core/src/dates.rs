//! Default dates for date inputs

use chrono::{NaiveDate, Utc};

/// Format used by date inputs and the backend
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Today's date as `YYYY-MM-DD`
pub fn today_iso() -> String {
    format_date(today())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
