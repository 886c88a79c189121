//! Engine boundary types
//!
//! Business rejections are never errors: availability checks and the
//! booking protocol answer with a structured outcome carrying an explicit
//! reason and an alternatives list. System failures stay on the error
//! channel of the calling code.

use crate::db::models::ReservationStatus;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize, Serializer};

/// Why a requested time could not be booked
///
/// Precedence is fixed: closed > outside_hours > after_last_seating >
/// fully_booked. Downstream message selection depends on this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    Closed,
    OutsideHours,
    AfterLastSeating,
    FullyBooked,
}

fn ser_hhmm<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&crate::utils::time::fmt_hhmm(*time))
}

/// One free table inside a slot listing
#[derive(Debug, Clone, Serialize)]
pub struct TableOption {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub seats: i32,
}

/// A bookable start time with its free tables, priority ordered
#[derive(Debug, Clone, Serialize)]
pub struct SlotAvailability {
    #[serde(serialize_with = "ser_hhmm")]
    pub time: NaiveTime,
    pub period: String,
    pub tables: Vec<TableOption>,
    /// Name of the first (most preferred) free table
    pub best_table: String,
}

/// A nearby slot offered when the requested time is taken
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternativeSlot {
    #[serde(serialize_with = "ser_hhmm")]
    pub time: NaiveTime,
    pub period: String,
}

/// The assigned (or assignable) table in a reply
#[derive(Debug, Clone, Serialize)]
pub struct TableSummary {
    pub id: String,
    pub name: String,
    pub zone: String,
}

/// Answer to "is this specific time free for this party?"
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityReply {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DenialReason>,
    pub alternatives: Vec<AlternativeSlot>,
}

impl AvailabilityReply {
    pub fn available(table: TableSummary) -> Self {
        Self {
            available: true,
            table: Some(table),
            reason: None,
            alternatives: Vec::new(),
        }
    }

    pub fn denied(reason: DenialReason, alternatives: Vec<AlternativeSlot>) -> Self {
        Self {
            available: false,
            table: None,
            reason: Some(reason),
            alternatives,
        }
    }
}

/// What upstream intent extraction managed to pull out of a guest message
///
/// Everything is optional; the engine decides what is still missing and the
/// calling layer asks the guest for it. The core assumes nothing about how
/// extraction worked.
#[derive(Debug, Clone, Default)]
pub struct BookingIntent {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub party_size: Option<i32>,
    pub zone_preference: Option<String>,
}

impl BookingIntent {
    /// The fields a booking still needs, in asking order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.date.is_none() {
            missing.push("date");
        }
        if self.time.is_none() {
            missing.push("time");
        }
        match self.party_size {
            Some(n) if n > 0 => {}
            _ => missing.push("party_size"),
        }
        missing
    }

    /// Resolve into concrete values, or report what is missing
    pub fn require(self) -> Result<(NaiveDate, NaiveTime, i32), Vec<&'static str>> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok((
                self.date.unwrap(),
                self.time.unwrap(),
                self.party_size.unwrap(),
            ))
        } else {
            Err(missing)
        }
    }
}

/// Answer at the intent boundary
///
/// Either the fields the calling layer still has to collect from the
/// guest, or a normal availability reply for the resolved values.
#[derive(Debug, Clone)]
pub enum IntentReply {
    NeedsFields(Vec<&'static str>),
    Checked(AvailabilityReply),
}

/// A complete booking request at the engine boundary
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub guest_email: Option<String>,
    pub language: String,
    pub zone_preference: Option<String>,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub source: String,
    pub guest_id: Option<String>,
}

/// Summary of a freshly created reservation
#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub id: String,
    pub date: NaiveDate,
    #[serde(serialize_with = "ser_hhmm")]
    pub time: NaiveTime,
    pub party_size: i32,
    pub guest_name: String,
    pub table: String,
    pub zone: String,
    pub status: ReservationStatus,
}

/// Result of the booking protocol
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<BookingConfirmation>,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    pub denial: Option<DenialReason>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<AlternativeSlot>,
}

impl BookingOutcome {
    pub fn booked(confirmation: BookingConfirmation) -> Self {
        Self {
            success: true,
            reservation: Some(confirmation),
            denial: None,
            alternatives: Vec::new(),
        }
    }

    pub fn denied(reason: DenialReason, alternatives: Vec<AlternativeSlot>) -> Self {
        Self {
            success: false,
            reservation: None,
            denial: Some(reason),
            alternatives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_reasons_serialize_snake_case() {
        assert_eq!(
            serde_json::to_string(&DenialReason::AfterLastSeating).unwrap(),
            "\"after_last_seating\""
        );
        assert_eq!(
            serde_json::to_string(&DenialReason::FullyBooked).unwrap(),
            "\"fully_booked\""
        );
    }

    #[test]
    fn intent_reports_missing_fields_in_asking_order() {
        let intent = BookingIntent::default();
        assert_eq!(intent.missing_fields(), vec!["date", "time", "party_size"]);

        let intent = BookingIntent {
            date: Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
            time: Some(NaiveTime::from_hms_opt(19, 0, 0).unwrap()),
            party_size: Some(0),
            zone_preference: None,
        };
        // Zero guests is not a party
        assert_eq!(intent.missing_fields(), vec!["party_size"]);
    }

    #[test]
    fn complete_intent_resolves() {
        let intent = BookingIntent {
            date: Some(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
            time: Some(NaiveTime::from_hms_opt(19, 0, 0).unwrap()),
            party_size: Some(4),
            zone_preference: None,
        };
        let (_, _, party) = intent.require().unwrap();
        assert_eq!(party, 4);
    }
}
