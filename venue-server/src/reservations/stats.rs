//! Stats Aggregator
//!
//! Read-model composition for the dashboard: day overview, per-table
//! timeline and range statistics. All functions are pure over ledger rows
//! the manager has already loaded; aggregation happens here, not in the
//! query layer.

use std::collections::BTreeMap;

use crate::db::models::{DiningTable, Reservation, ReservationStatus};
use crate::utils::time::fmt_hhmm;
use chrono::{NaiveDate, Timelike};
use serde::Serialize;
use surrealdb::RecordId;

/// One reservation row inside the day overview, grouped under its slot
#[derive(Debug, Clone, Serialize)]
pub struct OverviewEntry {
    pub id: String,
    pub guest_name: String,
    pub party_size: i32,
    pub table: String,
    pub zone: String,
    pub status: ReservationStatus,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub source: String,
    pub phone: Option<String>,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayOverview {
    pub date: NaiveDate,
    pub is_closed: bool,
    pub total_tables: usize,
    pub total_seats: i32,
    pub booked_seats: i32,
    pub utilization_pct: i64,
    pub reservation_count: usize,
    /// Active rows keyed by "HH:MM" start, keys in chronological order
    pub by_time: BTreeMap<String, Vec<OverviewEntry>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub id: String,
    pub time: String,
    pub end_time: Option<String>,
    pub guest_name: String,
    pub party_size: i32,
    pub status: ReservationStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableTimeline {
    pub table_id: String,
    pub table_name: String,
    pub zone: String,
    pub max_seats: i32,
    pub reservations: Vec<TimelineEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HourCount {
    pub hour: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_reservations: usize,
    /// Rows that held or honored a booking (confirmed, seated, completed)
    pub confirmed: usize,
    pub noshows: usize,
    pub noshow_rate_pct: f64,
    pub cancelled: usize,
    /// Seats across everything except cancellations
    pub total_covers: i32,
    pub avg_party_size: f64,
    pub by_source: BTreeMap<String, usize>,
    pub peak_hour: Option<String>,
    /// Up to five busiest hours, count descending, earlier hour on ties
    pub busiest_hours: Vec<HourCount>,
}

fn id_string(id: &Option<RecordId>) -> String {
    id.as_ref().map(|r| r.to_string()).unwrap_or_default()
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Dashboard view of one service day: active rows grouped by slot plus
/// seat utilization against the full inventory
pub fn compute_day_overview(
    date: NaiveDate,
    is_closed: bool,
    tables: &[DiningTable],
    reservations: &[Reservation],
) -> DayOverview {
    let table_info: BTreeMap<String, (&str, &str)> = tables
        .iter()
        .filter_map(|t| {
            t.id.as_ref()
                .map(|id| (id.to_string(), (t.name.as_str(), t.zone.as_str())))
        })
        .collect();

    let mut active: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.status.occupies_table())
        .collect();
    active.sort_by_key(|r| r.time);

    let total_seats: i32 = tables.iter().map(|t| t.max_seats).sum();
    let booked_seats: i32 = active.iter().map(|r| r.party_size).sum();
    let utilization_pct = if total_seats > 0 {
        (f64::from(booked_seats) / f64::from(total_seats) * 100.0).round() as i64
    } else {
        0
    };

    let mut by_time: BTreeMap<String, Vec<OverviewEntry>> = BTreeMap::new();
    for r in &active {
        let (table_name, zone) = r
            .table
            .as_ref()
            .and_then(|id| table_info.get(&id.to_string()).copied())
            .unwrap_or(("–", "–"));
        by_time
            .entry(fmt_hhmm(r.time))
            .or_default()
            .push(OverviewEntry {
                id: id_string(&r.id),
                guest_name: r.guest_name.clone(),
                party_size: r.party_size,
                table: table_name.to_string(),
                zone: zone.to_string(),
                status: r.status,
                notes: r.notes.clone(),
                special_requests: r.special_requests.clone(),
                source: r.source.clone(),
                phone: r.guest_phone.clone(),
                language: r.language.clone(),
            });
    }

    DayOverview {
        date,
        is_closed,
        total_tables: tables.len(),
        total_seats,
        booked_seats,
        utilization_pct,
        reservation_count: active.len(),
        by_time,
    }
}

/// Who sits where and when: one entry per active table (zone, name order)
/// with its chronological confirmed/seated rows
pub fn compute_table_timeline(
    tables: &[DiningTable],
    reservations: &[Reservation],
) -> Vec<TableTimeline> {
    let mut ordered: Vec<&DiningTable> = tables.iter().collect();
    ordered.sort_by(|a, b| (&a.zone, &a.name).cmp(&(&b.zone, &b.name)));

    ordered
        .into_iter()
        .map(|table| {
            let mut rows: Vec<&Reservation> = reservations
                .iter()
                .filter(|r| r.status.occupies_table())
                .filter(|r| r.table.is_some() && r.table == table.id)
                .collect();
            rows.sort_by_key(|r| r.time);

            TableTimeline {
                table_id: id_string(&table.id),
                table_name: table.name.clone(),
                zone: table.zone.clone(),
                max_seats: table.max_seats,
                reservations: rows
                    .into_iter()
                    .map(|r| TimelineEntry {
                        id: id_string(&r.id),
                        time: fmt_hhmm(r.time),
                        end_time: r.end_time.map(fmt_hhmm),
                        guest_name: r.guest_name.clone(),
                        party_size: r.party_size,
                        status: r.status,
                    })
                    .collect(),
            }
        })
        .collect()
}

/// Range statistics over every row between `from` and `to` inclusive
pub fn compute_stats(from: NaiveDate, to: NaiveDate, reservations: &[Reservation]) -> StatsReport {
    let total = reservations.len();
    let confirmed = reservations
        .iter()
        .filter(|r| {
            matches!(
                r.status,
                ReservationStatus::Confirmed
                    | ReservationStatus::Seated
                    | ReservationStatus::Completed
            )
        })
        .count();
    let noshows = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Noshow)
        .count();
    let cancelled = reservations
        .iter()
        .filter(|r| r.status == ReservationStatus::Cancelled)
        .count();

    let valid: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.status != ReservationStatus::Cancelled)
        .collect();
    let total_covers: i32 = valid.iter().map(|r| r.party_size).sum();
    let avg_party_size = if valid.is_empty() {
        0.0
    } else {
        round1(f64::from(total_covers) / valid.len() as f64)
    };

    let noshow_rate_pct = if total > 0 {
        round1(noshows as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    let mut by_source: BTreeMap<String, usize> = BTreeMap::new();
    for r in reservations {
        *by_source.entry(r.source.clone()).or_default() += 1;
    }

    // BTreeMap keys are hour-ascending, so a stable sort by descending
    // count leaves earlier hours first on ties
    let mut hours: BTreeMap<String, usize> = BTreeMap::new();
    for r in &valid {
        *hours.entry(format!("{:02}:00", r.time.hour())).or_default() += 1;
    }
    let mut busiest: Vec<HourCount> = hours
        .into_iter()
        .map(|(hour, count)| HourCount { hour, count })
        .collect();
    busiest.sort_by(|a, b| b.count.cmp(&a.count));
    let peak_hour = busiest.first().map(|h| h.hour.clone());
    busiest.truncate(5);

    StatsReport {
        from,
        to,
        total_reservations: total,
        confirmed,
        noshows,
        noshow_rate_pct,
        cancelled,
        total_covers,
        avg_party_size,
        by_source,
        peak_hour,
        busiest_hours: busiest,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveTime, Utc};
    use surrealdb::RecordId;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 6).unwrap()
    }

    fn table(key: &str, zone: &str, max: i32) -> DiningTable {
        DiningTable {
            id: Some(RecordId::from_table_key("dining_table", key)),
            venue: "v".into(),
            name: key.to_string(),
            zone: zone.into(),
            min_seats: 2,
            max_seats: max,
            priority: 5,
            combinable: false,
            combine_with: None,
            active: true,
            notes: None,
        }
    }

    fn row(
        table_key: Option<&str>,
        time: NaiveTime,
        party: i32,
        status: ReservationStatus,
        source: &str,
    ) -> Reservation {
        Reservation {
            id: Some(RecordId::from_table_key("reservation", "r")),
            venue: "v".into(),
            date: date(),
            time,
            end_time: None,
            party_size: party,
            guest_name: "Guest".into(),
            guest_phone: None,
            guest_email: None,
            language: "en".into(),
            guest_id: None,
            table: table_key.map(|k| RecordId::from_table_key("dining_table", k)),
            zone_preference: None,
            status,
            source: source.into(),
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

    #[test]
    fn overview_counts_only_table_holding_rows() {
        let tables = vec![table("t1", "interior", 4), table("t2", "terrace", 6)];
        let rows = vec![
            row(Some("t1"), t(19, 0), 4, ReservationStatus::Confirmed, "phone"),
            row(Some("t2"), t(19, 0), 2, ReservationStatus::Seated, "walkin"),
            row(Some("t1"), t(20, 30), 3, ReservationStatus::Cancelled, "phone"),
        ];
        let overview = compute_day_overview(date(), false, &tables, &rows);
        assert_eq!(overview.reservation_count, 2);
        assert_eq!(overview.total_seats, 10);
        assert_eq!(overview.booked_seats, 6);
        assert_eq!(overview.utilization_pct, 60);
        assert_eq!(overview.by_time.len(), 1);
        let slot = &overview.by_time["19:00"];
        assert_eq!(slot.len(), 2);
        assert_eq!(slot[0].table, "t1");
        assert_eq!(slot[0].zone, "interior");
    }

    #[test]
    fn overview_with_no_tables_has_zero_utilization() {
        let overview = compute_day_overview(date(), true, &[], &[]);
        assert!(overview.is_closed);
        assert_eq!(overview.utilization_pct, 0);
    }

    #[test]
    fn timeline_orders_tables_by_zone_then_name() {
        let tables = vec![
            table("z9", "terrace", 4),
            table("a1", "interior", 4),
            table("b2", "interior", 4),
        ];
        let rows = vec![
            row(Some("a1"), t(20, 0), 2, ReservationStatus::Confirmed, "phone"),
            row(Some("a1"), t(18, 0), 2, ReservationStatus::Seated, "phone"),
            row(Some("a1"), t(19, 0), 2, ReservationStatus::Noshow, "phone"),
        ];
        let timeline = compute_table_timeline(&tables, &rows);
        let names: Vec<&str> = timeline.iter().map(|t| t.table_name.as_str()).collect();
        assert_eq!(names, vec!["a1", "b2", "z9"]);
        // Chronological, no-show excluded
        let times: Vec<&str> = timeline[0]
            .reservations
            .iter()
            .map(|r| r.time.as_str())
            .collect();
        assert_eq!(times, vec!["18:00", "20:00"]);
        assert!(timeline[1].reservations.is_empty());
    }

    #[test]
    fn stats_rates_and_covers_exclude_cancellations() {
        let rows = vec![
            row(Some("t1"), t(19, 0), 4, ReservationStatus::Completed, "whatsapp"),
            row(Some("t1"), t(19, 30), 2, ReservationStatus::Noshow, "phone"),
            row(Some("t1"), t(20, 0), 6, ReservationStatus::Cancelled, "whatsapp"),
            row(Some("t1"), t(12, 0), 3, ReservationStatus::Confirmed, "website"),
        ];
        let stats = compute_stats(date(), date(), &rows);
        assert_eq!(stats.total_reservations, 4);
        assert_eq!(stats.confirmed, 2);
        assert_eq!(stats.noshows, 1);
        assert_eq!(stats.noshow_rate_pct, 25.0);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.total_covers, 9);
        assert_eq!(stats.avg_party_size, 3.0);
        assert_eq!(stats.by_source["whatsapp"], 2);
        assert_eq!(stats.by_source["phone"], 1);
    }

    #[test]
    fn peak_hour_ties_break_toward_the_earlier_hour() {
        let rows = vec![
            row(Some("t1"), t(19, 0), 2, ReservationStatus::Confirmed, "phone"),
            row(Some("t1"), t(19, 30), 2, ReservationStatus::Confirmed, "phone"),
            row(Some("t1"), t(12, 0), 2, ReservationStatus::Confirmed, "phone"),
            row(Some("t1"), t(12, 15), 2, ReservationStatus::Confirmed, "phone"),
            // Cancelled rows never count toward peaks
            row(Some("t1"), t(21, 0), 2, ReservationStatus::Cancelled, "phone"),
        ];
        let stats = compute_stats(date(), date(), &rows);
        assert_eq!(stats.peak_hour.as_deref(), Some("12:00"));
        assert_eq!(stats.busiest_hours.len(), 2);
        assert_eq!(stats.busiest_hours[0].hour, "12:00");
        assert_eq!(stats.busiest_hours[0].count, 2);
    }

    #[test]
    fn empty_range_yields_zeroes() {
        let stats = compute_stats(date(), date(), &[]);
        assert_eq!(stats.total_reservations, 0);
        assert_eq!(stats.noshow_rate_pct, 0.0);
        assert_eq!(stats.avg_party_size, 0.0);
        assert!(stats.peak_hour.is_none());
        assert!(stats.busiest_hours.is_empty());
    }
}
