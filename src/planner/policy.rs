//! Scheduling policy: shift length, weekly cap, the end-of-week cutoff and the
//! clamp every detailed block placement goes through.

use serde::{Deserialize, Serialize};

use crate::api::{Day, WeeklySchedule};
use crate::config::ViewMode;

pub const SHIFT_LENGTH_HOURS: f64 = 7.0;
pub const WEEKLY_TARGET_HOURS: f64 = 35.0;
pub const FRIDAY_CUTOFF_HOUR: f64 = 20.0; // 8 PM
pub const LATEST_START_HOUR: f64 = 23.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulePolicy {
    pub shift_length_hours: f64,
    pub weekly_target_hours: f64,
    /// Day on which no block may end after `cutoff_hour`
    pub cutoff_day: Day,
    pub cutoff_hour: f64,
    pub latest_start_hour: f64,
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self {
            shift_length_hours: SHIFT_LENGTH_HOURS,
            weekly_target_hours: WEEKLY_TARGET_HOURS,
            cutoff_day: Day::Friday,
            cutoff_hour: FRIDAY_CUTOFF_HOUR,
            latest_start_hour: LATEST_START_HOUR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Simple view exceeds {max} hrs on at least one day.")]
    DailyCapExceeded { max: f64 },
    #[error("Weekly hours cannot exceed {max}.")]
    SimpleWeeklyCapExceeded { max: f64 },
    #[error("Detailed schedule exceeds {max} hrs.")]
    DetailedWeeklyCapExceeded { max: f64 },
}

/// A policy whose numbers would break the clamp (a block starting before
/// midnight, or spilling more than one shift into the next day)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    #[error("shift length must be within (0, 24] hours, got {0}")]
    ShiftLength(f64),
    #[error("weekly target must be a non-negative number of hours, got {0}")]
    WeeklyTarget(f64),
    #[error("latest start hour must be within [0, 24), got {0}")]
    LatestStart(f64),
    #[error("cutoff hour must be within [{min}, 24] for a {min}-hour shift, got {hour}")]
    Cutoff { hour: f64, min: f64 },
}

impl SchedulePolicy {
    /// Reject numbers the clamp cannot honour
    pub fn validate_bounds(&self) -> Result<(), PolicyError> {
        let length = self.shift_length_hours;
        if !(length > 0.0 && length <= 24.0) {
            return Err(PolicyError::ShiftLength(length));
        }
        if !(self.weekly_target_hours >= 0.0 && self.weekly_target_hours.is_finite()) {
            return Err(PolicyError::WeeklyTarget(self.weekly_target_hours));
        }
        if !(self.latest_start_hour >= 0.0 && self.latest_start_hour < 24.0) {
            return Err(PolicyError::LatestStart(self.latest_start_hour));
        }
        if !(self.cutoff_hour >= length && self.cutoff_hour <= 24.0) {
            return Err(PolicyError::Cutoff { hour: self.cutoff_hour, min: length });
        }
        Ok(())
    }

    pub fn max_daily_hours(&self) -> f64 {
        self.shift_length_hours
    }

    /// Number of shifts that make up the weekly target (35 / 7 = 5)
    pub fn target_shifts(&self) -> usize {
        if self.shift_length_hours <= 0.0 {
            return 0;
        }
        (self.weekly_target_hours / self.shift_length_hours).floor() as usize
    }

    /// Latest legal start hour for a block on `day`
    pub fn max_start_hour(&self, day: Day) -> f64 {
        if day == self.cutoff_day {
            (self.cutoff_hour - self.shift_length_hours).max(0.0)
        } else {
            self.latest_start_hour
        }
    }

    /// Snap a proposed start hour to the nearest whole hour inside the legal range for `day`
    pub fn clamp_start_hour(&self, day: Day, raw_hour: f64) -> f64 {
        // f64::max discards NaN, so a degenerate pointer reading lands on 0
        raw_hour.round().max(0.0).min(self.max_start_hour(day))
    }

    /// Hours a block starting at `start_hour` spills past midnight into the next day
    pub fn overflow_hours(&self, start_hour: f64) -> f64 {
        (start_hour + self.shift_length_hours - 24.0).max(0.0)
    }

    /// First violated constraint, checked in order: daily cap, simple weekly cap, detailed weekly cap
    pub fn validate(&self, schedule: &WeeklySchedule) -> Result<(), ValidationError> {
        let max_daily = self.max_daily_hours();
        let daily_exceeded = Day::ALL
            .into_iter()
            .any(|day| schedule.daily_hours(ViewMode::Simple, day, self) > max_daily);
        if daily_exceeded {
            return Err(ValidationError::DailyCapExceeded { max: max_daily });
        }

        let max_weekly = self.weekly_target_hours;
        if schedule.weekly_hours(ViewMode::Simple, self) > max_weekly {
            return Err(ValidationError::SimpleWeeklyCapExceeded { max: max_weekly });
        }
        if schedule.weekly_hours(ViewMode::Detailed, self) > max_weekly {
            return Err(ValidationError::DetailedWeeklyCapExceeded { max: max_weekly });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DetailedShift, ShiftId};
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn empty_schedule() -> WeeklySchedule {
        WeeklySchedule::empty("worker-jordan", NaiveDate::from_ymd_opt(2026, 10, 12).unwrap())
    }

    fn any_day() -> impl Strategy<Value = Day> {
        prop::sample::select(Day::ALL.to_vec())
    }

    #[test]
    fn friday_ceiling_is_thirteen() {
        let policy = SchedulePolicy::default();
        assert_eq!(policy.max_start_hour(Day::Friday), 13.0);
        assert_eq!(policy.clamp_start_hour(Day::Friday, 22.0), 13.0);
        assert_eq!(policy.clamp_start_hour(Day::Thursday, 22.0), 22.0);
        assert_eq!(policy.clamp_start_hour(Day::Monday, 23.7), 23.0);
        assert_eq!(policy.clamp_start_hour(Day::Monday, -3.0), 0.0);
        assert_eq!(policy.clamp_start_hour(Day::Monday, 6.5), 7.0);
        assert_eq!(policy.clamp_start_hour(Day::Monday, f64::NAN), 0.0);
    }

    #[test]
    fn target_is_five_shifts() {
        assert_eq!(SchedulePolicy::default().target_shifts(), 5);
    }

    #[test]
    fn overflow_past_midnight() {
        let policy = SchedulePolicy::default();
        assert_eq!(policy.overflow_hours(20.0), 3.0);
        assert_eq!(policy.overflow_hours(17.0), 0.0);
        assert_eq!(policy.overflow_hours(policy.max_start_hour(Day::Friday)), 0.0);
    }

    #[test]
    fn five_morning_shifts_meet_target() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        for day in Day::WORK_DAYS {
            schedule.set_simple_preset(day, Some(ShiftId::Morning), &policy);
        }
        assert_eq!(schedule.weekly_hours(ViewMode::Simple, &policy), 35.0);
        assert_eq!(policy.validate(&schedule), Ok(()));
    }

    #[test]
    fn six_detailed_blocks_exceed_weekly_cap() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        for day in Day::ALL.into_iter().take(6) {
            // custom start hours keep the simple view empty
            schedule.apply_detailed_shift(day, 9.0, &policy);
        }
        assert_eq!(schedule.weekly_hours(ViewMode::Detailed, &policy), 42.0);
        let err = policy.validate(&schedule).unwrap_err();
        assert_eq!(err, ValidationError::DetailedWeeklyCapExceeded { max: 35.0 });
        assert_eq!(err.to_string(), "Detailed schedule exceeds 35 hrs.");
    }

    #[test]
    fn stacked_presets_trip_daily_cap_first() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        // only reachable through a wholesale replace; the editors never stack presets
        schedule.simple_view[Day::Saturday] = vec![ShiftId::Morning, ShiftId::Night];
        for day in Day::WORK_DAYS {
            schedule.simple_view[day] = vec![ShiftId::Morning];
            schedule.detailed_view[day] = Some(DetailedShift { start_hour: 6.0 });
        }
        let err = policy.validate(&schedule).unwrap_err();
        assert_eq!(err.to_string(), "Simple view exceeds 7 hrs on at least one day.");
    }

    #[test]
    fn simple_weekly_cap_message() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        for day in Day::ALL.into_iter().take(6) {
            schedule.simple_view[day] = vec![ShiftId::Afternoon];
        }
        assert_eq!(
            policy.validate(&schedule).unwrap_err().to_string(),
            "Weekly hours cannot exceed 35."
        );
    }

    #[test]
    fn policy_bounds() {
        assert_eq!(SchedulePolicy::default().validate_bounds(), Ok(()));

        let policy = |edit: fn(&mut SchedulePolicy)| {
            let mut p = SchedulePolicy::default();
            edit(&mut p);
            p.validate_bounds()
        };
        assert_eq!(policy(|p| p.latest_start_hour = -5.0), Err(PolicyError::LatestStart(-5.0)));
        assert_eq!(policy(|p| p.latest_start_hour = 30.0), Err(PolicyError::LatestStart(30.0)));
        assert_eq!(policy(|p| p.shift_length_hours = 0.0), Err(PolicyError::ShiftLength(0.0)));
        assert_eq!(policy(|p| p.shift_length_hours = 25.0), Err(PolicyError::ShiftLength(25.0)));
        assert_eq!(policy(|p| p.weekly_target_hours = -1.0), Err(PolicyError::WeeklyTarget(-1.0)));
        assert_eq!(
            policy(|p| p.cutoff_hour = 5.0),
            Err(PolicyError::Cutoff { hour: 5.0, min: 7.0 })
        );
        assert!(policy(|p| p.latest_start_hour = f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn prop_clamp_is_idempotent(day in any_day(), hour in -48.0f64..72.0) {
            let policy = SchedulePolicy::default();
            let once = policy.clamp_start_hour(day, hour);
            prop_assert_eq!(policy.clamp_start_hour(day, once), once);
        }

        #[test]
        fn prop_friday_never_passes_cutoff(hour in -48.0f64..72.0) {
            let policy = SchedulePolicy::default();
            let start = policy.clamp_start_hour(Day::Friday, hour);
            prop_assert!(start + SHIFT_LENGTH_HOURS <= FRIDAY_CUTOFF_HOUR);
            prop_assert_eq!(policy.overflow_hours(start), 0.0);
        }

        #[test]
        fn prop_other_days_stay_in_range(day in any_day(), hour in -48.0f64..72.0) {
            prop_assume!(day != Day::Friday);
            let start = SchedulePolicy::default().clamp_start_hour(day, hour);
            prop_assert!((0.0..=23.0).contains(&start));
            prop_assert_eq!(start.fract(), 0.0);
        }
    }
}
