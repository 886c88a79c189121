//! Time helpers — civil dates and minute-resolution clock times
//!
//! The engine works purely on `NaiveDate` + `NaiveTime` in the venue's own
//! local frame. Parsing from API strings happens here; repositories only
//! ever see the chrono types.

use chrono::{NaiveDate, NaiveTime};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse a clock time string (HH:MM, seconds optional)
pub fn parse_hhmm(time: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| AppError::validation(format!("Invalid time format: {}", time)))
}

/// Format a clock time as HH:MM (API representation)
pub fn fmt_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Minutes since midnight, for distance ranking
pub fn minutes_of_day(time: NaiveTime) -> i64 {
    use chrono::Timelike;
    time.hour() as i64 * 60 + time.minute() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hhmm_with_and_without_seconds() {
        assert_eq!(
            parse_hhmm("19:30").unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap()
        );
        assert_eq!(
            parse_hhmm("19:30:00").unwrap(),
            NaiveTime::from_hms_opt(19, 30, 0).unwrap()
        );
        assert!(parse_hhmm("7pm").is_err());
    }

    #[test]
    fn formats_back_to_hhmm() {
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(fmt_hhmm(t), "09:05");
    }

    #[test]
    fn minutes_of_day_ranks_times() {
        let t = NaiveTime::from_hms_opt(19, 30, 0).unwrap();
        assert_eq!(minutes_of_day(t), 19 * 60 + 30);
    }
}
