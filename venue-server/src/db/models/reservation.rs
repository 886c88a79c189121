//! Reservation Model
//!
//! Reservations are created only through the booking protocol in
//! [`crate::reservations::ReservationManager`] and are never hard-deleted:
//! cancellation and no-show are terminal statuses, not row removal.

use super::serde_helpers;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Reservation lifecycle state
///
/// ```text
/// confirmed ──► seated ──► completed
///     │
///     ├──► cancelled
///     └──► noshow
/// ```
///
/// There is no pending state: only availability-checked bookings exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Confirmed,
    Seated,
    Completed,
    Cancelled,
    Noshow,
}

impl ReservationStatus {
    /// The transition table; undefined edges are rejected
    pub fn allows(self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Confirmed, Seated)
                | (Seated, Completed)
                | (Confirmed, Cancelled)
                | (Confirmed, Noshow)
        )
    }

    /// Whether a reservation in this state holds its table for conflict
    /// detection purposes
    pub fn occupies_table(self) -> bool {
        matches!(self, ReservationStatus::Confirmed | ReservationStatus::Seated)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed | ReservationStatus::Cancelled | ReservationStatus::Noshow
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Seated => "seated",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Noshow => "noshow",
        }
    }
}

impl std::str::FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "seated" => Ok(ReservationStatus::Seated),
            "completed" => Ok(ReservationStatus::Completed),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            "noshow" => Ok(ReservationStatus::Noshow),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub venue: String,

    // Booking details
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Computed at creation: time + the covering period's slot duration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    pub party_size: i32,

    // Guest identity
    pub guest_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_email: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<String>,

    // Table assignment
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub table: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_preference: Option<String>,

    // Status tracking
    pub status: ReservationStatus,
    /// Booking channel: whatsapp | phone | walkin | website | dashboard
    #[serde(default = "default_source")]
    pub source: String,
    /// "Birthday", "nut allergy", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// "High chair", "wheelchair access", ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_sent_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noshow_marked_at: Option<DateTime<Utc>>,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_source() -> String {
    "dashboard".to_string()
}

/// Guest-facing field edits; scheduling fields stay engine-owned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_allows_defined_edges_only() {
        use ReservationStatus::*;
        assert!(Confirmed.allows(Seated));
        assert!(Confirmed.allows(Cancelled));
        assert!(Confirmed.allows(Noshow));
        assert!(Seated.allows(Completed));

        assert!(!Seated.allows(Cancelled));
        assert!(!Seated.allows(Noshow));
        assert!(!Completed.allows(Seated));
        assert!(!Cancelled.allows(Seated));
        assert!(!Noshow.allows(Confirmed));
        assert!(!Confirmed.allows(Completed));
    }

    #[test]
    fn only_confirmed_and_seated_occupy_tables() {
        use ReservationStatus::*;
        assert!(Confirmed.occupies_table());
        assert!(Seated.occupies_table());
        assert!(!Completed.occupies_table());
        assert!(!Cancelled.occupies_table());
        assert!(!Noshow.occupies_table());
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReservationStatus::Noshow).unwrap(),
            "\"noshow\""
        );
        assert_eq!(
            "cancelled".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::Cancelled
        );
    }
}
