use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A point on the in-universe campaign calendar.
///
/// Ordering is year-major, day-minor; wall-clock time plays no role
/// anywhere in effectiveness decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDate {
    pub day: i32,
    pub year: i32,
}

impl CampaignDate {
    pub fn new(day: i32, year: i32) -> Self {
        Self { day, year }
    }
}

impl Ord for CampaignDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year.cmp(&other.year).then(self.day.cmp(&other.day))
    }
}

impl PartialOrd for CampaignDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CampaignDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.day, self.year)
    }
}

/// Emitted whenever the campaign clock moves, in either direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockChange {
    pub previous: CampaignDate,
    pub current: CampaignDate,
}

/// Counts of transactions reclassified by a sync pass.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub posted: usize,
    pub unposted: usize,
}

/// Database model for the single campaign clock row
#[derive(
    Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::campaign)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CampaignClockDB {
    pub id: i32,
    pub current_day: i32,
    pub current_year: i32,
    pub updated_at: NaiveDateTime,
}

impl From<CampaignClockDB> for CampaignDate {
    fn from(db: CampaignClockDB) -> Self {
        CampaignDate::new(db.current_day, db.current_year)
    }
}
