pub mod member;
pub mod period;
pub mod renewal;
pub mod status;

use thiserror::Error;

pub use member::{Member, MemberUpdate, NewMember};
pub use period::parse_date;
pub use renewal::{preview, renew, RenewalPreview, RenewalRequest};
pub use status::{classify, days_remaining, MemberStatus, StatusFilter, DURATION_PRESETS};

/// Input errors raised by the membership calculators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MembershipError {
    #[error("duration must be a positive number of days, got {0}")]
    NonPositiveDuration(i64),
    #[error("price must be a non-negative amount, got {0}")]
    InvalidPrice(f64),
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("date out of range: {start} + {days} days")]
    DateOutOfRange { start: chrono::NaiveDate, days: i64 },
    #[error("name must be between 2 and 50 characters")]
    InvalidName,
    #[error("phone number must be exactly 10 digits")]
    InvalidPhone,
}
