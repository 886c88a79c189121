//! Availability Resolver
//!
//! Composes the calendar, the table inventory and the day's ledger rows to
//! answer "is X free" and "what slots exist". Built per (venue, date)
//! snapshot by the manager; all decisions here are pure.
//!
//! Conflict rule: a table is free for [start, end) iff no reservation on
//! the same table and date with a table-holding status (confirmed or
//! seated) has an interval overlapping it, half-open:
//! `existing.start < candidate.end && existing.end > candidate.start`.

use crate::db::models::{DiningTable, Reservation};
use crate::utils::time::minutes_of_day;
use chrono::{NaiveDate, NaiveTime};

use super::calendar::ScheduleCalendar;
use super::inventory::TableInventory;
use super::types::{
    AlternativeSlot, AvailabilityReply, DenialReason, SlotAvailability, TableOption, TableSummary,
};

/// How many nearby slots to offer when a request is fully booked
pub const ALTERNATIVE_LIMIT: usize = 5;

fn overlaps(a_start: i64, a_end: i64, b_start: i64, b_end: i64) -> bool {
    a_start < b_end && a_end > b_start
}

/// Occupied interval of an existing reservation, in minutes of day.
/// A missing end_time defaults to start + the period's slot duration; an
/// interval that crosses midnight extends past 1440.
fn occupied_interval(reservation: &Reservation, default_duration_min: i64) -> (i64, i64) {
    let start = minutes_of_day(reservation.time);
    let end = match reservation.end_time {
        Some(end_time) => {
            let end = minutes_of_day(end_time);
            if end <= start { end + 24 * 60 } else { end }
        }
        None => start + default_duration_min,
    };
    (start, end)
}

pub struct AvailabilityResolver {
    date: NaiveDate,
    calendar: ScheduleCalendar,
    inventory: TableInventory,
    /// Every reservation on `date`, any status
    ledger: Vec<Reservation>,
}

impl AvailabilityResolver {
    pub fn new(
        date: NaiveDate,
        calendar: ScheduleCalendar,
        inventory: TableInventory,
        ledger: Vec<Reservation>,
    ) -> Self {
        Self {
            date,
            calendar,
            inventory,
            ledger,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn calendar(&self) -> &ScheduleCalendar {
        &self.calendar
    }

    pub fn inventory(&self) -> &TableInventory {
        &self.inventory
    }

    /// Whether one table is free for [start, start + duration)
    fn table_is_free(&self, table: &DiningTable, start: NaiveTime, duration_min: i64) -> bool {
        let cand_start = minutes_of_day(start);
        let cand_end = cand_start + duration_min;
        self.ledger
            .iter()
            .filter(|r| r.status.occupies_table())
            .filter(|r| r.table.is_some() && r.table == table.id)
            .all(|r| {
                let (res_start, res_end) = occupied_interval(r, duration_min);
                !overlaps(cand_start, cand_end, res_start, res_end)
            })
    }

    /// Capacity-eligible tables free for [time, time + duration), in
    /// preference order
    pub fn free_tables(
        &self,
        time: NaiveTime,
        duration_min: i64,
        party_size: i32,
    ) -> Vec<&DiningTable> {
        self.inventory
            .eligible(party_size)
            .into_iter()
            .filter(|t| self.table_is_free(t, time, duration_min))
            .collect()
    }

    /// Every offerable slot with at least one free table
    pub fn available_slots(&self, party_size: i32) -> Vec<SlotAvailability> {
        if self.calendar.is_closed(self.date) {
            return Vec::new();
        }

        let mut available = Vec::new();
        for period in self.calendar.periods_for(self.date) {
            for slot in ScheduleCalendar::generate_slots(period) {
                let tables = self.free_tables(slot, period.slot_duration_min, party_size);
                if let Some(best) = tables.first() {
                    available.push(SlotAvailability {
                        time: slot,
                        period: period.name.clone(),
                        best_table: best.name.clone(),
                        tables: tables.iter().map(|t| table_option(t)).collect(),
                    });
                }
            }
        }
        available
    }

    /// Check one specific time
    ///
    /// Reason precedence: closed > outside_hours > after_last_seating >
    /// fully_booked.
    pub fn check(&self, time: NaiveTime, party_size: i32) -> AvailabilityReply {
        if self.calendar.is_closed(self.date) {
            return AvailabilityReply::denied(DenialReason::Closed, Vec::new());
        }

        let Some(period) = self.calendar.find_period_covering(self.date, time) else {
            return AvailabilityReply::denied(DenialReason::OutsideHours, Vec::new());
        };

        if let Some(last_seating) = period.last_seating
            && time > last_seating
        {
            return AvailabilityReply::denied(DenialReason::AfterLastSeating, Vec::new());
        }

        let tables = self.free_tables(time, period.slot_duration_min, party_size);
        match tables.first() {
            Some(best) => AvailabilityReply::available(table_summary(best)),
            None => AvailabilityReply::denied(
                DenialReason::FullyBooked,
                self.alternatives(party_size, time, ALTERNATIVE_LIMIT),
            ),
        }
    }

    /// Open slots ranked by minute distance to the preferred time; ties go
    /// to the earlier slot. Only (time, period) leaves the resolver.
    pub fn alternatives(
        &self,
        party_size: i32,
        preferred: NaiveTime,
        limit: usize,
    ) -> Vec<AlternativeSlot> {
        let preferred_min = minutes_of_day(preferred);
        let mut slots = self.available_slots(party_size);
        slots.sort_by_key(|s| {
            let slot_min = minutes_of_day(s.time);
            ((slot_min - preferred_min).abs(), slot_min)
        });
        slots
            .into_iter()
            .take(limit)
            .map(|s| AlternativeSlot {
                time: s.time,
                period: s.period,
            })
            .collect()
    }

    /// The day's reservations (for view composition)
    pub fn ledger(&self) -> &[Reservation] {
        &self.ledger
    }
}

fn table_option(table: &DiningTable) -> TableOption {
    TableOption {
        id: record_id_string(table),
        name: table.name.clone(),
        zone: table.zone.clone(),
        seats: table.max_seats,
    }
}

fn table_summary(table: &DiningTable) -> TableSummary {
    TableSummary {
        id: record_id_string(table),
        name: table.name.clone(),
        zone: table.zone.clone(),
    }
}

fn record_id_string(table: &DiningTable) -> String {
    table.id.as_ref().map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{ClosedDay, ReservationStatus, ServicePeriod};
    use chrono::{DateTime, Utc};
    use surrealdb::RecordId;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2025-06-06 is a Friday, weekday 4
    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 6).unwrap()
    }

    fn dinner() -> ServicePeriod {
        ServicePeriod {
            id: None,
            venue: "v".into(),
            name: "Dinner".into(),
            day_of_week: 4,
            start_time: t(18, 0),
            end_time: t(22, 0),
            last_seating: Some(t(21, 0)),
            slot_duration_min: 90,
            slot_interval_min: 30,
            max_covers: None,
            active: true,
        }
    }

    fn table(key: &str, min: i32, max: i32, priority: i32) -> DiningTable {
        DiningTable {
            id: Some(RecordId::from_table_key("dining_table", key)),
            venue: "v".into(),
            name: key.to_string(),
            zone: "interior".into(),
            min_seats: min,
            max_seats: max,
            priority,
            combinable: false,
            combine_with: None,
            active: true,
            notes: None,
        }
    }

    fn booking(table_key: &str, start: NaiveTime, end: Option<NaiveTime>) -> Reservation {
        Reservation {
            id: None,
            venue: "v".into(),
            date: friday(),
            time: start,
            end_time: end,
            party_size: 2,
            guest_name: "Guest".into(),
            guest_phone: None,
            guest_email: None,
            language: "en".into(),
            guest_id: None,
            table: Some(RecordId::from_table_key("dining_table", table_key)),
            zone_preference: None,
            status: ReservationStatus::Confirmed,
            source: "dashboard".into(),
            notes: None,
            special_requests: None,
            created_at: DateTime::<Utc>::MIN_UTC,
            confirmed_at: None,
            reminder_sent_at: None,
            seated_at: None,
            completed_at: None,
            cancelled_at: None,
            noshow_marked_at: None,
        }
    }

    fn resolver(
        tables: Vec<DiningTable>,
        closed: Vec<ClosedDay>,
        ledger: Vec<Reservation>,
    ) -> AvailabilityResolver {
        AvailabilityResolver::new(
            friday(),
            ScheduleCalendar::new(vec![dinner()], closed),
            TableInventory::new(tables),
            ledger,
        )
    }

    #[test]
    fn overlap_test_is_half_open() {
        // 18:00-19:30 booked; 19:30 start touches but does not overlap
        let r = resolver(
            vec![table("t1", 2, 4, 1)],
            vec![],
            vec![booking("t1", t(18, 0), Some(t(19, 30)))],
        );
        assert!(!r.check(t(18, 0), 2).available);
        assert!(!r.check(t(19, 0), 2).available);
        assert!(r.check(t(19, 30), 2).available);
    }

    #[test]
    fn missing_end_time_defaults_to_period_duration() {
        // Open-ended booking at 19:00 occupies 19:00-20:30
        let r = resolver(
            vec![table("t1", 2, 4, 1)],
            vec![],
            vec![booking("t1", t(19, 0), None)],
        );
        assert!(!r.check(t(20, 0), 2).available);
        assert!(r.check(t(20, 30), 2).available);
    }

    #[test]
    fn terminal_statuses_release_the_table() {
        let mut cancelled = booking("t1", t(19, 0), Some(t(20, 30)));
        cancelled.status = ReservationStatus::Cancelled;
        let r = resolver(vec![table("t1", 2, 4, 1)], vec![], vec![cancelled]);
        assert!(r.check(t(19, 0), 2).available);
    }

    #[test]
    fn reason_precedence_closed_wins() {
        let closed = ClosedDay {
            id: None,
            venue: "v".into(),
            date: Some(friday()),
            recurring_weekday: None,
            reason: "Private event".into(),
        };
        // Closed outranks outside_hours even at 03:00
        let r = resolver(vec![table("t1", 2, 4, 1)], vec![closed], vec![]);
        let reply = r.check(t(3, 0), 2);
        assert_eq!(reply.reason, Some(DenialReason::Closed));
        assert!(reply.alternatives.is_empty());
        assert!(r.available_slots(2).is_empty());
    }

    #[test]
    fn outside_hours_before_last_seating_check() {
        let r = resolver(vec![table("t1", 2, 4, 1)], vec![], vec![]);
        assert_eq!(
            r.check(t(15, 0), 2).reason,
            Some(DenialReason::OutsideHours)
        );
        // 21:30 is inside [18:00, 22:00] but past the 21:00 last seating
        assert_eq!(
            r.check(t(21, 30), 2).reason,
            Some(DenialReason::AfterLastSeating)
        );
    }

    #[test]
    fn priority_table_is_assigned_first_and_conflicts_cascade() {
        let tables = vec![table("prio1", 2, 4, 1), table("prio3", 2, 4, 3)];

        // First 4-top at 19:00 gets the priority-1 table
        let r = resolver(tables.clone(), vec![], vec![]);
        let reply = r.check(t(19, 0), 4);
        assert!(reply.available);
        assert_eq!(reply.table.as_ref().unwrap().name, "prio1");

        // Same window again: the priority-3 table is a distinct free table
        let r = resolver(
            tables.clone(),
            vec![],
            vec![booking("prio1", t(19, 0), Some(t(20, 30)))],
        );
        let reply = r.check(t(19, 0), 4);
        assert!(reply.available);
        assert_eq!(reply.table.as_ref().unwrap().name, "prio3");

        // Third request: fully booked, with ranked alternatives
        let r = resolver(
            tables,
            vec![],
            vec![
                booking("prio1", t(19, 0), Some(t(20, 30))),
                booking("prio3", t(19, 0), Some(t(20, 30))),
            ],
        );
        let reply = r.check(t(19, 0), 4);
        assert!(!reply.available);
        assert_eq!(reply.reason, Some(DenialReason::FullyBooked));
        assert!(!reply.alternatives.is_empty());
        assert!(reply.alternatives.len() <= ALTERNATIVE_LIMIT);
    }

    #[test]
    fn alternatives_rank_by_distance_with_earlier_tie_break() {
        // Both tables taken 19:00-20:30: free slots are 18:00..18:30 and 20:30..21:00
        let r = resolver(
            vec![table("t1", 2, 4, 1)],
            vec![],
            vec![booking("t1", t(19, 0), Some(t(20, 30)))],
        );
        let alts = r.alternatives(2, t(19, 0), ALTERNATIVE_LIMIT);
        let times: Vec<NaiveTime> = alts.iter().map(|a| a.time).collect();
        // 18:30 (30'), 18:00 (60'), 20:30 (90'), 21:00 (120')
        assert_eq!(times, vec![t(18, 30), t(18, 0), t(20, 30), t(21, 0)]);
    }

    #[test]
    fn equidistant_alternatives_prefer_the_earlier_slot() {
        let r = resolver(
            vec![table("t1", 2, 4, 1)],
            vec![],
            vec![booking("t1", t(19, 30), Some(t(19, 31)))],
        );
        let alts = r.alternatives(2, t(19, 30), 2);
        // 19:00 and 20:00 are both 30' away; earlier first
        assert_eq!(alts[0].time, t(19, 0));
        assert_eq!(alts[1].time, t(20, 0));
    }

    #[test]
    fn slot_listing_carries_priority_ordered_tables_and_best() {
        let r = resolver(
            vec![table("prio3", 2, 4, 3), table("prio1", 2, 4, 1)],
            vec![],
            vec![],
        );
        let slots = r.available_slots(2);
        assert_eq!(slots.len(), 8);
        let first = &slots[0];
        assert_eq!(first.best_table, "prio1");
        assert_eq!(first.tables[0].name, "prio1");
        assert_eq!(first.tables[1].name, "prio3");
    }

    #[test]
    fn oversized_party_finds_nothing() {
        let r = resolver(vec![table("t1", 2, 4, 1)], vec![], vec![]);
        assert!(r.available_slots(5).is_empty());
        let reply = r.check(t(19, 0), 5);
        assert_eq!(reply.reason, Some(DenialReason::FullyBooked));
        assert!(reply.alternatives.is_empty());
    }
}
