// src/domain/period.rs
use chrono::{Days, NaiveDate};

use super::MembershipError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Result<NaiveDate, MembershipError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| MembershipError::InvalidDate(raw.to_string()))
}

/// End of a membership period: `start + duration_days` calendar days.
pub fn compute_end_date(start: NaiveDate, duration_days: i64) -> Result<NaiveDate, MembershipError> {
    if duration_days <= 0 {
        return Err(MembershipError::NonPositiveDuration(duration_days));
    }

    start
        .checked_add_days(Days::new(duration_days as u64))
        .ok_or(MembershipError::DateOutOfRange {
            start,
            days: duration_days,
        })
}

/// Signed number of whole days from `earlier` to `later`.
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}
