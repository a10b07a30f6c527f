// src/record.rs

use chrono::{Days, NaiveDate};
use std::fmt;

use crate::geo::CoordinatePair;

/// A single-day query window: the portal's start and end inputs both get
/// this date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateWindow(NaiveDate);

impl DateWindow {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// `today` minus `offset` days. Saturates at the earliest representable date.
    pub fn days_back(today: NaiveDate, offset: u32) -> Self {
        Self(
            today
                .checked_sub_days(Days::new(u64::from(offset)))
                .unwrap_or(NaiveDate::MIN),
        )
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// ISO calendar form, `YYYY-MM-DD`.
    pub fn iso(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// One extracted table row, tagged with the query that produced it.
///
/// Price and percent change keep the portal's raw text (`"Rp 12.000"`,
/// `"+1.2%"`); downstream consumers parse them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: String,
    pub commodity: String,
    pub location: String,
    pub price: String,
    pub percent_change: String,
    pub coordinates: CoordinatePair,
    /// Cells past the third, in table order.
    pub extra: Vec<String>,
}

impl PriceRecord {
    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_back_counts_from_today() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(DateWindow::days_back(today, 0).iso(), "2024-03-01");
        assert_eq!(DateWindow::days_back(today, 1).iso(), "2024-02-29");
        assert_eq!(DateWindow::days_back(today, 31).to_string(), "2024-01-30");
    }
}
