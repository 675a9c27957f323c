// src/domain/renewal.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::member::{validate_price, Member, RenewalRecord};
use super::period::{compute_end_date, days_between};
use super::MembershipError;

/// What the operator picked in the renewal form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalRequest {
    pub start_date: NaiveDate,
    pub duration: i64,
    pub price: f64,
}

/// Unused days of the current period, measured from `new_start`.
/// Zero once the period has ended on or before `new_start`.
pub fn remaining_days(member: &Member, new_start: NaiveDate) -> i64 {
    days_between(member.end_date, new_start).max(0)
}

/// Outcome of renewing on `start_date` for `duration` days, before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalPreview {
    pub start_date: NaiveDate,
    pub remaining_days: i64,
    pub total_duration: i64,
    pub end_date: NaiveDate,
}

pub fn preview(
    member: &Member,
    start_date: NaiveDate,
    duration: i64,
) -> Result<RenewalPreview, MembershipError> {
    if duration <= 0 {
        return Err(MembershipError::NonPositiveDuration(duration));
    }

    let remaining_days = remaining_days(member, start_date);
    let total_duration =
        duration
            .checked_add(remaining_days)
            .ok_or(MembershipError::DateOutOfRange {
                start: start_date,
                days: duration,
            })?;
    Ok(RenewalPreview {
        start_date,
        remaining_days,
        total_duration,
        end_date: compute_end_date(start_date, total_duration)?,
    })
}

/// Extend a membership. Leftover days roll into the new period and a
/// history record is appended; the input member is left untouched.
pub fn renew(
    member: &Member,
    request: &RenewalRequest,
    performed_on: NaiveDate,
) -> Result<Member, MembershipError> {
    validate_price(request.price)?;
    let RenewalPreview {
        total_duration,
        end_date,
        ..
    } = preview(member, request.start_date, request.duration)?;

    let mut renewal_history = member.renewal_history.clone();
    renewal_history.push(RenewalRecord {
        performed_on,
        duration: request.duration,
        price: request.price,
        start_date: request.start_date,
        end_date,
    });

    Ok(Member {
        id: member.id,
        name: member.name.clone(),
        phone_number: member.phone_number.clone(),
        start_date: request.start_date,
        end_date,
        duration: total_duration,
        price: request.price,
        renewal_history,
    })
}
