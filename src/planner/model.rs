use crate::api::{Day, DetailedShift, ShiftId, SimpleView, WeeklySchedule, PRESETS};
use crate::config::ViewMode;

use super::policy::SchedulePolicy;

/// Tap-to-cycle order; `None` means the day is off
pub const SHIFT_SEQUENCE: [Option<ShiftId>; 4] = [
    Some(ShiftId::Morning),
    Some(ShiftId::Afternoon),
    Some(ShiftId::Night),
    None,
];

/// Reverse preset lookup; only an exact start-hour match counts
pub fn match_preset(start_hour: f64) -> Option<ShiftId> {
    PRESETS
        .iter()
        .find(|preset| preset.start_hour == start_hour)
        .map(|preset| preset.id)
}

pub fn daily_simple_hours(view: &SimpleView, day: Day, policy: &SchedulePolicy) -> f64 {
    view[day].len() as f64 * policy.shift_length_hours
}

pub fn daily_detailed_hours(block: Option<&DetailedShift>, policy: &SchedulePolicy) -> f64 {
    if block.is_some() {
        policy.shift_length_hours
    } else {
        0.0
    }
}

/// Totals shown in the planner header for the active view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekSummary {
    pub weekly_hours: f64,
    pub target_hours: f64,
    pub remaining_hours: f64,
    pub shift_count: usize,
    pub target_shifts: usize,
}

impl WeekSummary {
    pub fn target_met(&self) -> bool {
        self.remaining_hours <= 0.0
    }
}

impl WeeklySchedule {
    pub fn daily_hours(&self, view: ViewMode, day: Day, policy: &SchedulePolicy) -> f64 {
        match view {
            ViewMode::Simple => daily_simple_hours(&self.simple_view, day, policy),
            ViewMode::Detailed => daily_detailed_hours(self.detailed_view[day].as_ref(), policy),
        }
    }

    pub fn weekly_hours(&self, view: ViewMode, policy: &SchedulePolicy) -> f64 {
        Day::ALL
            .into_iter()
            .map(|day| self.daily_hours(view, day, policy))
            .sum()
    }

    pub fn selected_preset(&self, day: Day) -> Option<ShiftId> {
        self.simple_view[day].first().copied()
    }

    /// Work days holding a shift in the given view
    pub fn scheduled_work_days(&self, view: ViewMode) -> usize {
        Day::WORK_DAYS
            .into_iter()
            .filter(|day| match view {
                ViewMode::Simple => !self.simple_view[*day].is_empty(),
                ViewMode::Detailed => self.detailed_view[*day].is_some(),
            })
            .count()
    }

    pub fn summary(&self, view: ViewMode, policy: &SchedulePolicy) -> WeekSummary {
        let weekly_hours = self.weekly_hours(view, policy);
        WeekSummary {
            weekly_hours,
            target_hours: policy.weekly_target_hours,
            remaining_hours: (policy.weekly_target_hours - weekly_hours).max(0.0),
            shift_count: self.scheduled_work_days(view),
            target_shifts: policy.target_shifts(),
        }
    }

    /// Place `day`'s block at `raw_start` (clamped) and derive the simple view from it.
    /// Every detailed-block edit funnels through here.
    pub fn apply_detailed_shift(&mut self, day: Day, raw_start: f64, policy: &SchedulePolicy) {
        let start_hour = policy.clamp_start_hour(day, raw_start);
        self.detailed_view[day] = Some(DetailedShift { start_hour });
        self.simple_view[day] = match_preset(start_hour).into_iter().collect();
    }

    pub fn clear_day(&mut self, day: Day) {
        self.detailed_view[day] = None;
        self.simple_view[day].clear();
    }

    /// Pick a preset for `day`, or clear it with `None`.
    /// The preset's start still goes through the clamp, so a preset that cannot
    /// fit on the cutoff day lands on whatever preset the clamped hour matches.
    pub fn set_simple_preset(&mut self, day: Day, preset: Option<ShiftId>, policy: &SchedulePolicy) {
        match preset {
            Some(id) => self.apply_detailed_shift(day, id.start_hour(), policy),
            None => self.clear_day(day),
        }
    }

    /// Advance `day` through morning, afternoon, night, off.
    /// Steps that would leave the selection unchanged after clamping are skipped.
    pub fn cycle_preset(&mut self, day: Day, policy: &SchedulePolicy) {
        let current = self.selected_preset(day);
        let current_index = SHIFT_SEQUENCE.iter().position(|entry| *entry == current);
        let start = current_index.map(|i| i + 1).unwrap_or(0);

        for step in 0..SHIFT_SEQUENCE.len() {
            let candidate = SHIFT_SEQUENCE[(start + step) % SHIFT_SEQUENCE.len()];
            let outcome = candidate
                .map(|id| policy.clamp_start_hour(day, id.start_hour()))
                .and_then(match_preset);
            // "off" must still clear a custom block that matches no preset
            if outcome != current || (candidate.is_none() && self.detailed_view[day].is_some()) {
                self.set_simple_preset(day, candidate, policy);
                return;
            }
        }
    }

    /// Re-apply the day's selected preset to its detailed block
    pub fn apply_simple_preset(&mut self, day: Day, policy: &SchedulePolicy) {
        if let Some(id) = self.selected_preset(day) {
            self.set_simple_preset(day, Some(id), policy);
        }
    }

    /// Ensure the day has a block to fine tune: its preset, else morning
    pub fn ensure_detailed_block(&mut self, day: Day, policy: &SchedulePolicy) {
        if self.detailed_view[day].is_none() {
            let fallback = self.selected_preset(day).unwrap_or(ShiftId::Morning);
            self.set_simple_preset(day, Some(fallback), policy);
        }
    }

    /// Overwrite both views wholesale with a previously stored schedule.
    /// Trusted input: no clamping is applied.
    pub fn replace_views(&mut self, source: WeeklySchedule) {
        self.simple_view = source.simple_view;
        self.detailed_view = source.detailed_view;
    }

    /// True when every day satisfies the preset/detailed consistency relation
    pub fn views_consistent(&self) -> bool {
        Day::ALL.into_iter().all(|day| {
            let expected = self.detailed_view[day]
                .and_then(|block| match_preset(block.start_hour));
            match expected {
                Some(id) => self.simple_view[day] == [id],
                None => self.simple_view[day].is_empty(),
            }
        })
    }
}
