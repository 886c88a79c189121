//! Service Period Model

use super::serde_helpers;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// A recurring weekly window during which reservations are accepted
///
/// `day_of_week` runs 0–6 with 0 = Monday. `slot_duration_min` is how long
/// a table stays occupied; `slot_interval_min` is the booking granularity
/// (19:00, 19:30, 20:00, ...). When `last_seating` is unset the fallback to
/// `end_time` as the last bookable moment is documented behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicePeriod {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub venue: String,
    /// "Lunch", "Dinner", ...
    pub name: String,
    /// 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Latest accepted reservation time (e.g. 21:00 for a 22:00 close)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seating: Option<NaiveTime>,
    /// Occupancy length in minutes
    #[serde(default = "default_duration")]
    pub slot_duration_min: i64,
    /// Booking granularity in minutes
    #[serde(default = "default_interval")]
    pub slot_interval_min: i64,
    /// Optional cap on covers per service; stored only, no algorithm reads it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_covers: Option<i32>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub active: bool,
}

fn default_duration() -> i64 {
    90
}

fn default_interval() -> i64 {
    30
}

fn default_true() -> bool {
    true
}

/// Create service period payload — times arrive as HH:MM strings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServicePeriodCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub last_seating: Option<String>,
    #[validate(range(min = 1))]
    pub slot_duration_min: Option<i64>,
    #[validate(range(min = 1))]
    pub slot_interval_min: Option<i64>,
    pub max_covers: Option<i32>,
}
