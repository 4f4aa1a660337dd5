//! Pointer-driven placement of detailed blocks on a day's 24-hour track.
//!
//! A press on empty track drops a new block centred on the pointer; a press on
//! an existing block grabs it at the pressed offset. Until the button is
//! released, every pointer move re-places the block against the same day's
//! track, wherever the pointer is on screen.

use crate::api::{Day, WeeklySchedule};

use super::policy::SchedulePolicy;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        day: Day,
        /// Pointer hour minus block start at the moment of the press
        grab_offset: f64,
    },
}

/// Convert a pointer x-position to an hour on a track spanning 0..24.
/// Returns `None` for a collapsed (zero-width) track.
pub fn hour_from_pointer(pointer_x: f32, track_left: f32, track_width: f32) -> Option<f64> {
    let ratio = ((pointer_x - track_left) / track_width) as f64;
    if !ratio.is_finite() {
        return None;
    }
    Some(ratio.clamp(0.0, 1.0) * 24.0)
}

/// Hours of `day`'s block that fall on the same calendar day
pub fn visible_hours(schedule: &WeeklySchedule, day: Day, policy: &SchedulePolicy) -> f64 {
    schedule.detailed_view[day]
        .map(|block| policy.shift_length_hours.min(24.0 - block.start_hour).max(0.0))
        .unwrap_or(0.0)
}

/// Overflow hours of `day`'s block into the next calendar day
pub fn overflow_hours(schedule: &WeeklySchedule, day: Day, policy: &SchedulePolicy) -> f64 {
    schedule.detailed_view[day]
        .map(|block| policy.overflow_hours(block.start_hour))
        .unwrap_or(0.0)
}

/// Hours the preceding work day's block continues into `day`
pub fn overflow_from_previous(schedule: &WeeklySchedule, day: Day, policy: &SchedulePolicy) -> f64 {
    day.previous_work_day()
        .map(|previous| overflow_hours(schedule, previous, policy))
        .unwrap_or(0.0)
}

/// Copy the preceding work day's start hour onto `day` (re-clamped for `day`).
/// Returns false when there is no preceding work day or it has no block.
pub fn copy_from_previous_day(schedule: &mut WeeklySchedule, day: Day, policy: &SchedulePolicy) -> bool {
    let Some(previous) = day.previous_work_day() else {
        return false;
    };
    let Some(block) = schedule.detailed_view[previous] else {
        return false;
    };
    schedule.apply_detailed_shift(day, block.start_hour, policy);
    true
}

/// Whether `pointer_hour` lands on the visible part of `day`'s block
pub fn hits_block(schedule: &WeeklySchedule, day: Day, pointer_hour: f64, policy: &SchedulePolicy) -> bool {
    match schedule.detailed_view[day] {
        Some(block) => {
            let end = block.start_hour + visible_hours(schedule, day, policy);
            pointer_hour >= block.start_hour && pointer_hour <= end
        }
        None => false,
    }
}

/// Drag state machine for one planner view
#[derive(Debug, Default)]
pub struct PlacementController {
    state: DragState,
}

impl PlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Day whose track the pointer is measured against while dragging
    pub fn dragging_day(&self) -> Option<Day> {
        match self.state {
            DragState::Dragging { day, .. } => Some(day),
            DragState::Idle => None,
        }
    }

    /// Pointer-down on `day`'s track: grabs the block under the pointer, or
    /// places a new block centred on the pointer.
    pub fn press(
        &mut self,
        schedule: &mut WeeklySchedule,
        day: Day,
        pointer_hour: f64,
        policy: &SchedulePolicy,
    ) {
        if hits_block(schedule, day, pointer_hour, policy) {
            self.press_block(schedule, day, pointer_hour, policy);
        } else {
            self.press_track(schedule, day, pointer_hour, policy);
        }
    }

    /// Pointer-down on empty track
    pub fn press_track(
        &mut self,
        schedule: &mut WeeklySchedule,
        day: Day,
        pointer_hour: f64,
        policy: &SchedulePolicy,
    ) {
        let half = policy.shift_length_hours / 2.0;
        schedule.apply_detailed_shift(day, pointer_hour - half, policy);
        self.state = DragState::Dragging { day, grab_offset: half };
    }

    /// Pointer-down on an existing block; the block does not move until the pointer does.
    /// Returns false if `day` has no block.
    pub fn press_block(
        &mut self,
        schedule: &WeeklySchedule,
        day: Day,
        pointer_hour: f64,
        policy: &SchedulePolicy,
    ) -> bool {
        let Some(block) = schedule.detailed_view[day] else {
            return false;
        };
        let grab_offset = (pointer_hour - block.start_hour)
            .max(0.0)
            .min(policy.shift_length_hours);
        self.state = DragState::Dragging { day, grab_offset };
        true
    }

    /// Re-place the dragged block for the live pointer hour.
    /// Returns true if the block moved.
    pub fn pointer_moved(
        &mut self,
        schedule: &mut WeeklySchedule,
        pointer_hour: f64,
        policy: &SchedulePolicy,
    ) -> bool {
        let DragState::Dragging { day, grab_offset } = self.state else {
            return false;
        };
        let before = schedule.detailed_view[day];
        schedule.apply_detailed_shift(day, pointer_hour - grab_offset, policy);
        schedule.detailed_view[day] != before
    }

    /// Pointer-up anywhere, or teardown. Returns the day that was being dragged.
    pub fn release(&mut self) -> Option<Day> {
        let day = self.dragging_day();
        self.state = DragState::Idle;
        day
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DetailedShift, ShiftId};
    use chrono::NaiveDate;

    fn empty_schedule() -> WeeklySchedule {
        WeeklySchedule::empty("worker-jordan", NaiveDate::from_ymd_opt(2026, 10, 12).unwrap())
    }

    #[test]
    fn pointer_to_hour() {
        assert_eq!(hour_from_pointer(160.0, 100.0, 240.0), Some(6.0));
        assert_eq!(hour_from_pointer(40.0, 100.0, 240.0), Some(0.0));
        assert_eq!(hour_from_pointer(900.0, 100.0, 240.0), Some(24.0));
        assert_eq!(hour_from_pointer(100.0, 100.0, 0.0), None);
    }

    #[test]
    fn pressing_empty_track_centres_new_block() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        let mut controller = PlacementController::new();

        controller.press(&mut schedule, Day::Tuesday, 12.0, &policy);

        // 12 - 3.5 = 8.5 rounds to 9
        assert_eq!(schedule.detailed_view[Day::Tuesday], Some(DetailedShift { start_hour: 9.0 }));
        assert_eq!(
            controller.state(),
            DragState::Dragging { day: Day::Tuesday, grab_offset: 3.5 }
        );
    }

    #[test]
    fn grabbing_a_block_keeps_it_in_place_until_moved() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        schedule.apply_detailed_shift(Day::Monday, 6.0, &policy);
        let mut controller = PlacementController::new();

        controller.press(&mut schedule, Day::Monday, 8.0, &policy);
        assert_eq!(schedule.detailed_view[Day::Monday], Some(DetailedShift { start_hour: 6.0 }));
        assert_eq!(controller.state(), DragState::Dragging { day: Day::Monday, grab_offset: 2.0 });

        assert!(controller.pointer_moved(&mut schedule, 15.0, &policy));
        assert_eq!(schedule.detailed_view[Day::Monday], Some(DetailedShift { start_hour: 13.0 }));
        assert_eq!(schedule.selected_preset(Day::Monday), Some(ShiftId::Afternoon));

        assert!(controller.pointer_moved(&mut schedule, 12.4, &policy));
        assert_eq!(schedule.detailed_view[Day::Monday], Some(DetailedShift { start_hour: 10.0 }));
        assert!(schedule.simple_view[Day::Monday].is_empty());

        assert_eq!(controller.release(), Some(Day::Monday));
        assert!(!controller.pointer_moved(&mut schedule, 2.0, &policy));
        assert_eq!(schedule.detailed_view[Day::Monday], Some(DetailedShift { start_hour: 10.0 }));
    }

    #[test]
    fn friday_drag_is_held_at_cutoff() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        let mut controller = PlacementController::new();

        controller.press_track(&mut schedule, Day::Friday, 10.0, &policy);
        controller.pointer_moved(&mut schedule, 22.0 + 3.5, &policy);
        assert_eq!(schedule.detailed_view[Day::Friday], Some(DetailedShift { start_hour: 13.0 }));

        // pressing far right on an empty Friday also lands on 13
        let mut other = empty_schedule();
        controller.release();
        controller.press_track(&mut other, Day::Friday, 24.0, &policy);
        assert_eq!(other.detailed_view[Day::Friday], Some(DetailedShift { start_hour: 13.0 }));
        assert_eq!(overflow_hours(&other, Day::Friday, &policy), 0.0);
    }

    #[test]
    fn late_block_wraps_into_next_day() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        schedule.apply_detailed_shift(Day::Monday, 22.0, &policy);
        assert_eq!(visible_hours(&schedule, Day::Monday, &policy), 2.0);
        assert_eq!(overflow_hours(&schedule, Day::Monday, &policy), 5.0);
        assert_eq!(overflow_from_previous(&schedule, Day::Tuesday, &policy), 5.0);
        assert_eq!(overflow_from_previous(&schedule, Day::Monday, &policy), 0.0);
    }

    #[test]
    fn grab_offset_is_bounded_by_shift_length() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        schedule.apply_detailed_shift(Day::Wednesday, 10.0, &policy);
        let mut controller = PlacementController::new();
        controller.press_block(&schedule, Day::Wednesday, 20.0, &policy);
        assert_eq!(controller.state(), DragState::Dragging { day: Day::Wednesday, grab_offset: 7.0 });
        assert!(!controller.press_block(&schedule, Day::Thursday, 3.0, &policy));
    }

    #[test]
    fn copy_previous_day() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        schedule.apply_detailed_shift(Day::Monday, 6.0, &policy);

        assert!(copy_from_previous_day(&mut schedule, Day::Tuesday, &policy));
        assert_eq!(schedule.detailed_view[Day::Tuesday], Some(DetailedShift { start_hour: 6.0 }));
        assert_eq!(schedule.selected_preset(Day::Tuesday), Some(ShiftId::Morning));

        // Monday has no predecessor; Thursday's predecessor is empty
        assert!(!copy_from_previous_day(&mut schedule, Day::Monday, &policy));
        assert!(!copy_from_previous_day(&mut schedule, Day::Thursday, &policy));
        assert_eq!(schedule.detailed_view[Day::Thursday], None);
    }

    #[test]
    fn copy_onto_friday_is_reclamped() {
        let policy = SchedulePolicy::default();
        let mut schedule = empty_schedule();
        schedule.apply_detailed_shift(Day::Thursday, 21.0, &policy);
        assert!(copy_from_previous_day(&mut schedule, Day::Friday, &policy));
        assert_eq!(schedule.detailed_view[Day::Friday], Some(DetailedShift { start_hour: 13.0 }));
    }
}
