mod labels;
mod model;
mod placement;
mod policy;
mod session;

pub use labels::{
    continuation_label, day_card_labels, detailed_row_labels, format_hours, format_shift_label, format_simple_summary,
    wraps_into,
};
pub use model::{daily_detailed_hours, daily_simple_hours, match_preset, WeekSummary, SHIFT_SEQUENCE};
pub use placement::{
    copy_from_previous_day, hits_block, hour_from_pointer, overflow_from_previous, overflow_hours,
    visible_hours, DragState, PlacementController,
};
pub use policy::{
    PolicyError, SchedulePolicy, ValidationError, FRIDAY_CUTOFF_HOUR, LATEST_START_HOUR, SHIFT_LENGTH_HOURS,
    WEEKLY_TARGET_HOURS,
};
pub use session::{
    PlannerSession, SubmitRefused, COPY_ERROR, COPY_FEEDBACK, LOAD_ERROR, SUBMIT_ERROR, SUBMIT_FEEDBACK,
};
