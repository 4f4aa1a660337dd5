mod types;
mod store;
mod time;

pub use types::*;
pub use store::{MockStore, ScheduleStore, StoreError};
pub use time::{add_weeks, current_week_start, date_key, format_clock_time, format_week_range, parse_date_key, start_of_week};
