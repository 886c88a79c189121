//! Schedule Calendar
//!
//! Decides whether a date is open and which service windows apply. Pure
//! over the venue's loaded periods and closures; the manager feeds it a
//! snapshot per request.

use crate::db::models::{ClosedDay, ServicePeriod};
use chrono::{Datelike, NaiveDate, NaiveTime};

/// Weekday index with 0 = Monday .. 6 = Sunday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

pub struct ScheduleCalendar {
    periods: Vec<ServicePeriod>,
    closed_days: Vec<ClosedDay>,
}

impl ScheduleCalendar {
    pub fn new(periods: Vec<ServicePeriod>, closed_days: Vec<ClosedDay>) -> Self {
        let mut periods: Vec<ServicePeriod> = periods.into_iter().filter(|p| p.active).collect();
        periods.sort_by_key(|p| (p.day_of_week, p.start_time));
        Self {
            periods,
            closed_days,
        }
    }

    /// True if an exact-date closure exists or a recurring closure matches
    /// the date's weekday
    pub fn is_closed(&self, date: NaiveDate) -> bool {
        let weekday = weekday_index(date);
        self.closed_days
            .iter()
            .any(|c| c.date == Some(date) || c.recurring_weekday == Some(weekday))
    }

    /// Active periods whose day_of_week matches the date's weekday
    pub fn periods_for(&self, date: NaiveDate) -> Vec<&ServicePeriod> {
        let weekday = weekday_index(date);
        self.periods
            .iter()
            .filter(|p| p.day_of_week == weekday)
            .collect()
    }

    /// The period whose [start_time, end_time] inclusively contains the
    /// time; absence means "outside business hours"
    pub fn find_period_covering(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Option<&ServicePeriod> {
        self.periods_for(date)
            .into_iter()
            .find(|p| p.start_time <= time && time <= p.end_time)
    }

    /// All offerable start times of a period: start_time, start_time +
    /// interval, ... up to and including last_seating (falling back to
    /// end_time when unset — documented behavior), both endpoints inclusive
    pub fn generate_slots(period: &ServicePeriod) -> Vec<NaiveTime> {
        let last = period.last_seating.unwrap_or(period.end_time);
        let step = chrono::Duration::minutes(period.slot_interval_min.max(0));

        let mut slots = Vec::new();
        let mut current = period.start_time;
        while current <= last {
            slots.push(current);
            let next = current + step;
            // NaiveTime arithmetic wraps at midnight; a non-advancing step
            // would loop forever
            if next <= current {
                break;
            }
            current = next;
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn period(day: u8, start: NaiveTime, end: NaiveTime, last: Option<NaiveTime>) -> ServicePeriod {
        ServicePeriod {
            id: None,
            venue: "v".into(),
            name: "Dinner".into(),
            day_of_week: day,
            start_time: start,
            end_time: end,
            last_seating: last,
            slot_duration_min: 90,
            slot_interval_min: 30,
            max_covers: None,
            active: true,
        }
    }

    #[test]
    fn dinner_slots_run_to_last_seating_inclusive() {
        let p = period(4, t(18, 0), t(22, 0), Some(t(21, 0)));
        let slots = ScheduleCalendar::generate_slots(&p);
        assert_eq!(slots.len(), 8);
        assert_eq!(slots.first().copied(), Some(t(18, 0)));
        assert_eq!(slots.last().copied(), Some(t(21, 0)));
        assert!(!slots.contains(&t(21, 30)));
    }

    #[test]
    fn without_last_seating_slots_run_to_end_time() {
        let p = period(4, t(18, 0), t(20, 0), None);
        let slots = ScheduleCalendar::generate_slots(&p);
        assert_eq!(slots.last().copied(), Some(t(20, 0)));
        assert_eq!(slots.len(), 5);
    }

    #[test]
    fn recurring_weekday_closes_the_venue() {
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        assert_eq!(weekday_index(monday), 0);
        let calendar = ScheduleCalendar::new(
            vec![],
            vec![ClosedDay {
                id: None,
                venue: "v".into(),
                date: None,
                recurring_weekday: Some(0),
                reason: "Rest day".into(),
            }],
        );
        assert!(calendar.is_closed(monday));
        assert!(!calendar.is_closed(monday.succ_opt().unwrap()));
        // Next Monday too
        assert!(calendar.is_closed(monday + chrono::Duration::days(7)));
    }

    #[test]
    fn specific_date_closes_the_venue() {
        let christmas = NaiveDate::from_ymd_opt(2025, 12, 25).unwrap();
        let calendar = ScheduleCalendar::new(
            vec![],
            vec![ClosedDay {
                id: None,
                venue: "v".into(),
                date: Some(christmas),
                recurring_weekday: None,
                reason: "Christmas".into(),
            }],
        );
        assert!(calendar.is_closed(christmas));
        assert!(!calendar.is_closed(christmas.pred_opt().unwrap()));
    }

    #[test]
    fn covering_period_is_inclusive_at_both_ends() {
        // 2025-06-06 is a Friday (weekday 4)
        let friday = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        let calendar = ScheduleCalendar::new(
            vec![period(4, t(18, 0), t(22, 0), Some(t(21, 0)))],
            vec![],
        );
        assert!(calendar.find_period_covering(friday, t(18, 0)).is_some());
        assert!(calendar.find_period_covering(friday, t(22, 0)).is_some());
        assert!(calendar.find_period_covering(friday, t(17, 59)).is_none());
        assert!(calendar.find_period_covering(friday, t(22, 1)).is_none());
        // Wrong weekday
        let saturday = friday.succ_opt().unwrap();
        assert!(calendar.find_period_covering(saturday, t(19, 0)).is_none());
    }

    #[test]
    fn inactive_periods_are_ignored() {
        let mut p = period(4, t(18, 0), t(22, 0), None);
        p.active = false;
        let friday = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        let calendar = ScheduleCalendar::new(vec![p], vec![]);
        assert!(calendar.periods_for(friday).is_empty());
    }
}
