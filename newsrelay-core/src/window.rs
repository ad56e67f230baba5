//! Search period validation and defaulting

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, RelayResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive civil-date range, invariant `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Resolve raw caller-supplied dates against the current local time.
    ///
    /// A missing end date defaults to today, a missing start date to seven
    /// days before today. Present values must be `YYYY-MM-DD`.
    pub fn resolve(
        start_raw: Option<&str>,
        end_raw: Option<&str>,
        now: DateTime<FixedOffset>,
    ) -> RelayResult<Self> {
        let today = now.date_naive();

        let end = match end_raw {
            Some(raw) => parse_civil_date("end_date", raw)?,
            None => today,
        };
        let start = match start_raw {
            Some(raw) => parse_civil_date("start_date", raw)?,
            None => today - Duration::days(7),
        };

        if start > end {
            return Err(RelayError::invalid_input(
                "start date must not be after end date",
            ));
        }

        Ok(Self { start, end })
    }

    /// Human-readable period label, e.g. `2025-06-03 ~ 2025-06-10`
    pub fn label(&self) -> String {
        format!(
            "{} ~ {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

fn parse_civil_date(field: &str, raw: &str) -> RelayResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        RelayError::invalid_input(format!(
            "{field} must be in YYYY-MM-DD format (got: {raw})"
        ))
    })
}
