//! Week boundaries, date keys and clock labels for the planner

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::config::ClockFormat;

/// Monday of the week containing `date`
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Duration::days(days_from_monday as i64)
}

/// Monday of the current local week
pub fn current_week_start() -> NaiveDate {
    start_of_week(Local::now().date_naive())
}

/// Shift a week start by whole weeks (negative goes back)
pub fn add_weeks(week_start: NaiveDate, weeks: i64) -> NaiveDate {
    week_start + Duration::days(weeks * 7)
}

/// Format a date as "YYYY-MM-DD"
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a "YYYY-MM-DD" key back into a date
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), "%Y-%m-%d").ok()
}

/// Label for Monday through Sunday, e.g. "Oct 12-18, 2026" or "Sep 28-Oct 4, 2026"
pub fn format_week_range(week_start: NaiveDate) -> String {
    let end = week_start + Duration::days(6);
    let start_label = week_start.format("%b %-d").to_string();
    let end_label = if week_start.month() == end.month() {
        end.format("%-d").to_string()
    } else {
        end.format("%b %-d").to_string()
    };
    format!("{}-{}, {}", start_label, end_label, end.year())
}

/// Format an hour-of-day value (6.5 = 6:30) as a clock label.
/// Values outside 0..24 wrap around midnight.
pub fn format_clock_time(hour: f64, clock_format: ClockFormat) -> String {
    let total_minutes = ((hour.rem_euclid(24.0)) * 60.0).round() as u32 % (24 * 60);
    let h = total_minutes / 60;
    let m = total_minutes % 60;

    match clock_format {
        ClockFormat::Hour24 => format!("{:02}:{:02}", h, m),
        ClockFormat::Hour12 => {
            let (h12, ampm) = if h == 0 {
                (12, "AM")
            } else if h < 12 {
                (h, "AM")
            } else if h == 12 {
                (12, "PM")
            } else {
                (h - 12, "PM")
            };
            format!("{}:{:02} {}", h12, m, ampm)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-10-12 is a Monday
        assert_eq!(start_of_week(date(2026, 10, 12)), date(2026, 10, 12));
        assert_eq!(start_of_week(date(2026, 10, 15)), date(2026, 10, 12));
        // Sunday maps back six days
        assert_eq!(start_of_week(date(2026, 10, 18)), date(2026, 10, 12));
        // across a year boundary
        assert_eq!(start_of_week(date(2027, 1, 1)), date(2026, 12, 28));
    }

    #[test]
    fn date_keys_are_zero_padded() {
        assert_eq!(date_key(date(2026, 3, 2)), "2026-03-02");
        assert_eq!(parse_date_key("2026-03-02"), Some(date(2026, 3, 2)));
        assert_eq!(parse_date_key("03/02/2026"), None);
    }

    #[test]
    fn week_range_compresses_shared_month() {
        assert_eq!(format_week_range(date(2026, 10, 12)), "Oct 12-18, 2026");
        assert_eq!(format_week_range(date(2026, 9, 28)), "Sep 28-Oct 4, 2026");
        assert_eq!(format_week_range(date(2026, 12, 28)), "Dec 28-Jan 3, 2027");
    }

    #[test]
    fn clock_labels() {
        assert_eq!(format_clock_time(6.0, ClockFormat::Hour12), "6:00 AM");
        assert_eq!(format_clock_time(13.0, ClockFormat::Hour12), "1:00 PM");
        assert_eq!(format_clock_time(0.0, ClockFormat::Hour12), "12:00 AM");
        assert_eq!(format_clock_time(12.5, ClockFormat::Hour12), "12:30 PM");
        assert_eq!(format_clock_time(20.0, ClockFormat::Hour24), "20:00");
        assert_eq!(format_clock_time(27.0, ClockFormat::Hour24), "03:00");
        assert_eq!(format_clock_time(24.0, ClockFormat::Hour12), "12:00 AM");
    }

    #[test]
    fn week_arithmetic() {
        assert_eq!(add_weeks(date(2026, 10, 12), -1), date(2026, 10, 5));
        assert_eq!(add_weeks(date(2026, 10, 12), 2), date(2026, 10, 26));
    }
}
