//! Venue bootstrap
//!
//! One-shot installation of a workable default layout for a fresh venue:
//! eleven tables across three zones, lunch and dinner periods for every
//! open weekday and one recurring rest day. Everything installed here is
//! ordinary data the operator can edit afterwards.

use crate::db::models::{ClosedDay, DiningTableCreate, ServicePeriod};
use crate::db::repository::{
    ClosedDayRepository, DiningTableRepository, RepoResult, ServicePeriodRepository,
};
use chrono::NaiveTime;
use serde::Serialize;
use tracing::info;

/// Monday, in the 0 = Monday weekday scheme
pub const DEFAULT_REST_DAY: u8 = 0;

#[derive(Debug, Clone, Serialize)]
pub struct SetupSummary {
    pub tables_created: usize,
    pub periods_created: usize,
    pub rest_day: u8,
}

fn default_tables() -> Vec<DiningTableCreate> {
    let layout: [(&str, &str, i32, i32, i32); 11] = [
        ("Table 1", "interior", 2, 2, 1),
        ("Table 2", "interior", 2, 2, 1),
        ("Table 3", "interior", 2, 4, 3),
        ("Table 4", "interior", 2, 4, 3),
        ("Table 5", "interior", 4, 6, 5),
        ("Table 6", "interior", 4, 6, 5),
        ("Table 7", "private_room", 6, 8, 7),
        ("Table 8", "private_room", 6, 10, 8),
        ("Terrace 1", "terrace", 2, 4, 2),
        ("Terrace 2", "terrace", 2, 4, 2),
        ("Terrace 3", "terrace", 4, 6, 4),
    ];
    layout.into_iter()
        .map(|(name, zone, min, max, priority)| DiningTableCreate {
            name: name.to_string(),
            zone: Some(zone.to_string()),
            min_seats: Some(min),
            max_seats: Some(max),
            priority: Some(priority),
            combinable: None,
            notes: None,
        })
        .collect()
}

fn period(
    venue: &str,
    name: &str,
    weekday: u8,
    start: NaiveTime,
    end: NaiveTime,
    last_seating: NaiveTime,
) -> ServicePeriod {
    ServicePeriod {
        id: None,
        venue: venue.to_string(),
        name: name.to_string(),
        day_of_week: weekday,
        start_time: start,
        end_time: end,
        last_seating: Some(last_seating),
        slot_duration_min: 90,
        slot_interval_min: 30,
        max_covers: None,
        active: true,
    }
}

fn hm(h: u32, m: u32) -> NaiveTime {
    // Both components are compile-time constants below
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

/// Install the default layout for a venue: tables, lunch 11:30–14:00
/// (last seating 13:30) and dinner 18:00–22:00 (last seating 21:00) on
/// every weekday except the rest day, which becomes a recurring closure
pub async fn install_defaults(
    tables: &DiningTableRepository,
    periods: &ServicePeriodRepository,
    closed_days: &ClosedDayRepository,
    venue: &str,
    rest_day: Option<u8>,
) -> RepoResult<SetupSummary> {
    let rest_day = rest_day.unwrap_or(DEFAULT_REST_DAY).min(6);

    let mut tables_created = 0;
    for table in default_tables() {
        tables.create(venue, table).await?;
        tables_created += 1;
    }

    let mut periods_created = 0;
    for weekday in 0u8..7 {
        if weekday == rest_day {
            closed_days
                .create(ClosedDay {
                    id: None,
                    venue: venue.to_string(),
                    date: None,
                    recurring_weekday: Some(weekday),
                    reason: "Rest day".to_string(),
                })
                .await?;
            continue;
        }

        periods
            .create(period(venue, "Lunch", weekday, hm(11, 30), hm(14, 0), hm(13, 30)))
            .await?;
        periods
            .create(period(venue, "Dinner", weekday, hm(18, 0), hm(22, 0), hm(21, 0)))
            .await?;
        periods_created += 2;
    }

    info!(venue, tables_created, periods_created, rest_day, "venue defaults installed");

    Ok(SetupSummary {
        tables_created,
        periods_created,
        rest_day,
    })
}
