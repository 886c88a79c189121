//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

/// A physical, bookable table
///
/// `priority` ranks tables for assignment: lower value is offered first
/// among capacity-eligible tables. `combinable`/`combine_with` are a hook
/// for future table merging; no current algorithm reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// Owning venue
    pub venue: String,
    /// Unique per venue
    pub name: String,
    /// Seating area: interior | terrace | private_room | garden | bar | ...
    #[serde(default = "default_zone")]
    pub zone: String,
    #[serde(default = "default_min_seats")]
    pub min_seats: i32,
    #[serde(default = "default_max_seats")]
    pub max_seats: i32,
    /// 1 = seat first, 10 = seat last
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default)]
    pub combinable: bool,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub combine_with: Option<RecordId>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub active: bool,
    /// Placement notes, e.g. "by the window"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

fn default_zone() -> String {
    "interior".to_string()
}

fn default_min_seats() -> i32 {
    2
}

fn default_max_seats() -> i32 {
    4
}

fn default_priority() -> i32 {
    5
}

fn default_true() -> bool {
    true
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_seat_range"))]
pub struct DiningTableCreate {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub zone: Option<String>,
    #[validate(range(min = 1))]
    pub min_seats: Option<i32>,
    #[validate(range(min = 1))]
    pub max_seats: Option<i32>,
    #[validate(range(min = 1, max = 10))]
    pub priority: Option<i32>,
    pub combinable: Option<bool>,
    pub notes: Option<String>,
}

fn validate_seat_range(payload: &DiningTableCreate) -> Result<(), validator::ValidationError> {
    if let (Some(min), Some(max)) = (payload.min_seats, payload.max_seats)
        && min > max
    {
        return Err(validator::ValidationError::new(
            "min_seats must not exceed max_seats",
        ));
    }
    Ok(())
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_seats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_seats: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combinable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
