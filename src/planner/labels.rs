use crate::api::{format_clock_time, Day, DetailedShift, ShiftId, WeeklySchedule};
use crate::config::ClockFormat;

use super::placement::overflow_from_previous;
use super::policy::SchedulePolicy;

/// "6:00 AM – 1:00 PM", or "10:00 PM → Tuesday 5:00 AM" when the block runs
/// past midnight into the next work day
pub fn format_shift_label(
    day: Day,
    block: &DetailedShift,
    policy: &SchedulePolicy,
    clock: ClockFormat,
) -> String {
    let start_label = format_clock_time(block.start_hour, clock);
    let end_hour = block.start_hour + policy.shift_length_hours;
    match day.next_work_day() {
        Some(next) if end_hour > 24.0 => {
            format!("{} → {} {}", start_label, next.label(), format_clock_time(end_hour, clock))
        }
        _ => format!("{} – {}", start_label, format_clock_time(end_hour, clock)),
    }
}

/// Next work day the block spills into, if any
pub fn wraps_into(day: Day, block: &DetailedShift, policy: &SchedulePolicy) -> Option<Day> {
    if block.start_hour + policy.shift_length_hours > 24.0 {
        day.next_work_day()
    } else {
        None
    }
}

/// "Morning · 6:00 AM – 1:00 PM" for the earliest preset picked, if any
pub fn format_simple_summary(
    presets: &[ShiftId],
    policy: &SchedulePolicy,
    clock: ClockFormat,
) -> Option<String> {
    let earliest = presets
        .iter()
        .min_by(|a, b| a.start_hour().total_cmp(&b.start_hour()))?;
    let start = earliest.start_hour();
    Some(format!(
        "{} · {} – {}",
        earliest.label(),
        format_clock_time(start, clock),
        format_clock_time(start + policy.shift_length_hours, clock)
    ))
}

/// Label line of a detailed timeline row, plus the day's simple-view summary when it has one:
/// ("10:00 PM → Tuesday 5:00 AM · 7h (wraps to Tuesday)", Some("Simple view: Night · 8:00 PM – 3:00 AM"))
pub fn detailed_row_labels(
    schedule: &WeeklySchedule,
    day: Day,
    policy: &SchedulePolicy,
    clock: ClockFormat,
) -> (String, Option<String>) {
    let line = match schedule.detailed_view[day] {
        Some(block) => {
            let mut line = format!(
                "{} · {}h",
                format_shift_label(day, &block, policy, clock),
                format_hours(policy.shift_length_hours)
            );
            if let Some(next) = wraps_into(day, &block, policy) {
                line.push_str(&format!(" (wraps to {})", next.label()));
            }
            line
        }
        None => "Press the timeline to place a shift".to_string(),
    };
    let simple = format_simple_summary(&schedule.simple_view[day], policy, clock)
        .map(|summary| format!("Simple view: {}", summary));
    (line, simple)
}

/// Heading and time line of a day card in the simple view
pub fn day_card_labels(
    schedule: &WeeklySchedule,
    day: Day,
    policy: &SchedulePolicy,
    clock: ClockFormat,
) -> (String, String) {
    let selection = schedule.selected_preset(day);
    let start = schedule.detailed_view[day]
        .map(|block| block.start_hour)
        .or_else(|| selection.map(ShiftId::start_hour));

    let Some(start) = start else {
        let heading = if day.is_work_day() { "Off duty" } else { "Not scheduled" };
        return (heading.to_string(), "Tap to set a shift".to_string());
    };

    let heading = match selection {
        Some(id) if id.start_hour() == start => id.label().to_string(),
        _ => "Custom shift".to_string(),
    };
    let time = format!(
        "{} – {}",
        format_clock_time(start, clock),
        format_clock_time(start + policy.shift_length_hours, clock)
    );
    (heading, time)
}

/// "Continuing from Monday · 12:00 AM – 3:00 AM" when the previous work day wraps into `day`
pub fn continuation_label(
    schedule: &WeeklySchedule,
    day: Day,
    policy: &SchedulePolicy,
    clock: ClockFormat,
) -> Option<String> {
    let overflow = overflow_from_previous(schedule, day, policy);
    if overflow <= 0.0 {
        return None;
    }
    let previous = day.previous_work_day()?;
    Some(format!(
        "Continuing from {} · {} – {}",
        previous.label(),
        format_clock_time(0.0, clock),
        format_clock_time(overflow, clock)
    ))
}

/// Hour counts without a trailing ".0"
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        let s = format!("{:.2}", hours);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const CLOCK: ClockFormat = ClockFormat::Hour12;

    fn empty_schedule() -> WeeklySchedule {
        WeeklySchedule::empty("worker-jordan", NaiveDate::from_ymd_opt(2026, 10, 12).unwrap())
    }

    #[test]
    fn shift_label_wraps_to_next_work_day() {
        let policy = SchedulePolicy::default();
        let late = DetailedShift { start_hour: 22.0 };
        assert_eq!(format_shift_label(Day::Monday, &late, &policy, CLOCK), "10:00 PM → Tuesday 5:00 AM");
        assert_eq!(wraps_into(Day::Monday, &late, &policy), Some(Day::Tuesday));

        let early = DetailedShift { start_hour: 6.0 };
        assert_eq!(format_shift_label(Day::Monday, &early, &policy, CLOCK), "6:00 AM – 1:00 PM");
        assert_eq!(wraps_into(Day::Monday, &early, &policy), None);

        // Friday has no following work day
        assert_eq!(format_shift_label(Day::Friday, &late, &policy, CLOCK), "10:00 PM – 5:00 AM");
    }

    #[test]
    fn simple_summary_uses_earliest_preset() {
        let policy = SchedulePolicy::default();
        assert_eq!(format_simple_summary(&[], &policy, CLOCK), None);
        assert_eq!(
            format_simple_summary(&[ShiftId::Night, ShiftId::Morning], &policy, CLOCK).as_deref(),
            Some("Morning · 6:00 AM – 1:00 PM")
        );
    }

    #[test]
    fn day_card_headings() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        assert_eq!(day_card_labels(&schedule, Day::Monday, &policy, CLOCK).0, "Off duty");
        assert_eq!(day_card_labels(&schedule, Day::Sunday, &policy, CLOCK).0, "Not scheduled");

        schedule.set_simple_preset(Day::Monday, Some(ShiftId::Afternoon), &policy);
        assert_eq!(
            day_card_labels(&schedule, Day::Monday, &policy, CLOCK),
            ("Afternoon".to_string(), "1:00 PM – 8:00 PM".to_string())
        );

        schedule.apply_detailed_shift(Day::Monday, 15.0, &policy);
        assert_eq!(day_card_labels(&schedule, Day::Monday, &policy, CLOCK).0, "Custom shift");
    }

    #[test]
    fn continuation_from_previous_day() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        schedule.apply_detailed_shift(Day::Wednesday, 21.0, &policy);
        assert_eq!(
            continuation_label(&schedule, Day::Thursday, &policy, CLOCK).as_deref(),
            Some("Continuing from Wednesday · 12:00 AM – 4:00 AM")
        );
        assert_eq!(continuation_label(&schedule, Day::Wednesday, &policy, CLOCK), None);
    }

    #[test]
    fn detailed_row_shows_length_wrap_and_simple_summary() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        assert_eq!(
            detailed_row_labels(&schedule, Day::Monday, &policy, CLOCK),
            ("Press the timeline to place a shift".to_string(), None)
        );

        schedule.set_simple_preset(Day::Monday, Some(ShiftId::Night), &policy);
        let (line, simple) = detailed_row_labels(&schedule, Day::Monday, &policy, CLOCK);
        assert_eq!(line, "8:00 PM → Tuesday 3:00 AM · 7h (wraps to Tuesday)");
        assert_eq!(simple.as_deref(), Some("Simple view: Night · 8:00 PM – 3:00 AM"));

        // a custom block has no simple-view counterpart
        schedule.apply_detailed_shift(Day::Monday, 9.0, &policy);
        assert_eq!(
            detailed_row_labels(&schedule, Day::Monday, &policy, CLOCK),
            ("9:00 AM – 4:00 PM · 7h".to_string(), None)
        );
    }

    #[test]
    fn hour_counts() {
        assert_eq!(format_hours(35.0), "35");
        assert_eq!(format_hours(3.5), "3.5");
        assert_eq!(format_hours(0.0), "0");
    }
}
