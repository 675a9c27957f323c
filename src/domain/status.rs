// src/domain/status.rs
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::member::Member;
use super::period::days_between;

/// Members with this many days left or fewer are flagged as ending soon.
pub const ENDING_SOON_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationPreset {
    pub label: &'static str,
    pub days: i64,
}

/// Period lengths offered when adding or renewing a member.
pub const DURATION_PRESETS: [DurationPreset; 6] = [
    DurationPreset { label: "15 days", days: 15 },
    DurationPreset { label: "1 month", days: 30 },
    DurationPreset { label: "2 months", days: 60 },
    DurationPreset { label: "3 months", days: 90 },
    DurationPreset { label: "6 months", days: 180 },
    DurationPreset { label: "1 year", days: 365 },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    Active,
    EndingSoon,
    Expired,
}

impl MemberStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::EndingSoon => "ending-soon",
            MemberStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Days from `today` until the period ends. Zero or negative once it has ended.
pub fn days_remaining(member: &Member, today: NaiveDate) -> i64 {
    days_between(member.end_date, today)
}

pub fn classify(member: &Member, today: NaiveDate) -> MemberStatus {
    match days_remaining(member, today) {
        d if d > ENDING_SOON_DAYS => MemberStatus::Active,
        d if d > 0 => MemberStatus::EndingSoon,
        _ => MemberStatus::Expired,
    }
}

/// List view selector. `All` applies no status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(MemberStatus),
}

impl StatusFilter {
    pub fn matches(self, status: MemberStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Only(MemberStatus::Active)),
            "ending-soon" => Ok(StatusFilter::Only(MemberStatus::EndingSoon)),
            "expired" => Ok(StatusFilter::Only(MemberStatus::Expired)),
            other => Err(format!("unknown filter {other:?}")),
        }
    }
}
