// src/domain/member.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::compute_end_date;
use super::MembershipError;

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const PHONE_DIGITS: usize = 10;

/// One subscriber and their current membership period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: i64,
    pub price: f64,
    #[serde(default)]
    pub renewal_history: Vec<RenewalRecord>,
}

/// Snapshot written once per renewal. Never edited afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalRecord {
    pub performed_on: NaiveDate,
    pub duration: i64,
    pub price: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Fields accepted when adding a member. `endDate`, `id` and history are derived.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub start_date: NaiveDate,
    pub duration: i64,
    pub price: f64,
}

/// Partial field edit. Absent fields keep their value; an empty phone clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<i64>,
    pub price: Option<f64>,
}

impl Member {
    /// Build a member from validated input. The caller supplies the id.
    pub fn create(id: Uuid, input: NewMember) -> Result<Self, MembershipError> {
        let name = normalize_name(&input.name)?;
        let phone_number = normalize_phone(input.phone_number.as_deref())?;
        validate_price(input.price)?;
        let end_date = compute_end_date(input.start_date, input.duration)?;

        Ok(Self {
            id,
            name,
            phone_number,
            start_date: input.start_date,
            end_date,
            duration: input.duration,
            price: input.price,
            renewal_history: Vec::new(),
        })
    }

    /// Apply a field edit, recomputing the end date. History is left as is.
    pub fn apply_update(&self, update: MemberUpdate) -> Result<Self, MembershipError> {
        let name = match update.name {
            Some(name) => normalize_name(&name)?,
            None => self.name.clone(),
        };
        let phone_number = match update.phone_number {
            Some(phone) => normalize_phone(Some(&phone))?,
            None => self.phone_number.clone(),
        };
        let price = update.price.unwrap_or(self.price);
        validate_price(price)?;

        let start_date = update.start_date.unwrap_or(self.start_date);
        let duration = update.duration.unwrap_or(self.duration);
        let end_date = compute_end_date(start_date, duration)?;

        Ok(Self {
            id: self.id,
            name,
            phone_number,
            start_date,
            end_date,
            duration,
            price,
            renewal_history: self.renewal_history.clone(),
        })
    }

    /// Case-insensitive substring match on the display name.
    pub fn name_matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(&needle.trim().to_lowercase())
    }
}

fn normalize_name(raw: &str) -> Result<String, MembershipError> {
    let name = raw.trim();
    let len = name.chars().count();
    if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
        return Err(MembershipError::InvalidName);
    }
    Ok(name.to_string())
}

fn normalize_phone(raw: Option<&str>) -> Result<Option<String>, MembershipError> {
    let Some(phone) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    if phone.len() != PHONE_DIGITS || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MembershipError::InvalidPhone);
    }
    Ok(Some(phone.to_string()))
}

pub(crate) fn validate_price(price: f64) -> Result<(), MembershipError> {
    if !price.is_finite() || price < 0.0 {
        return Err(MembershipError::InvalidPrice(price));
    }
    Ok(())
}
