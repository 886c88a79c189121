//! Closed Day Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// A day the venue does not take reservations
///
/// Either a specific calendar date (holiday, private event) or a recurring
/// weekday (weekly rest day). A date matching either form closes the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedDay {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub venue: String,
    /// Specific closed date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Recurring weekly closure, 0 = Monday .. 6 = Sunday
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_weekday: Option<u8>,
    /// "Rest day", "Christmas", ...
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "Closed".to_string()
}

/// Create closed day payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedDayCreate {
    /// YYYY-MM-DD; omitted for purely recurring closures
    pub date: Option<String>,
    pub recurring_weekday: Option<u8>,
    pub reason: Option<String>,
}
