//! One planner session: the worker's schedule for the displayed week, the
//! requests in flight against the store, and the status shown to the user.
//!
//! Store calls run on the tokio runtime and post their results back over a
//! channel; `check_async_results` applies them on the UI thread. Every request
//! carries the session generation it was issued under. Opening a week (or
//! closing the planner) starts a new generation, and results from an older one
//! are dropped.

use chrono::NaiveDate;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{add_weeks, start_of_week, Day, ScheduleStore, StoreError, WeeklySchedule};
use crate::config::ViewMode;

use super::model::WeekSummary;
use super::placement::{self, PlacementController};
use super::policy::SchedulePolicy;

pub const LOAD_ERROR: &str = "Unable to load schedule";
pub const COPY_ERROR: &str = "Unable to copy last week's schedule";
pub const SUBMIT_ERROR: &str = "Failed to submit schedule";
pub const COPY_FEEDBACK: &str = "Copied last week's schedule";
pub const SUBMIT_FEEDBACK: &str = "Schedule submitted successfully";

enum AsyncResult {
    ScheduleLoaded(u64, Result<WeeklySchedule, StoreError>),
    LastWeekCopied(u64, Result<WeeklySchedule, StoreError>),
    Submitted(u64, Result<(), StoreError>),
}

/// Why a request was not sent
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitRefused {
    #[error("planner is busy")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] super::policy::ValidationError),
}

pub struct PlannerSession<S: ScheduleStore> {
    worker_id: String,
    week_start: NaiveDate,
    schedule: WeeklySchedule,
    policy: SchedulePolicy,
    view: ViewMode,
    placement: PlacementController,

    // Status
    loading: bool,
    submitting: bool,
    error: Option<String>,
    feedback: Option<String>,

    // Async communication
    generation: u64,
    store: Arc<S>,
    runtime: tokio::runtime::Handle,
    result_rx: Receiver<AsyncResult>,
    result_tx: Sender<AsyncResult>,
}

impl<S: ScheduleStore> PlannerSession<S> {
    /// A session showing an empty schedule for the week containing `week_of`.
    /// Nothing is requested until `open` is called.
    pub fn new(
        store: Arc<S>,
        runtime: tokio::runtime::Handle,
        worker_id: impl Into<String>,
        week_of: NaiveDate,
        policy: SchedulePolicy,
        view: ViewMode,
    ) -> Self {
        let worker_id = worker_id.into();
        let week_start = start_of_week(week_of);
        let (result_tx, result_rx) = channel();

        Self {
            schedule: WeeklySchedule::empty(worker_id.clone(), week_start),
            worker_id,
            week_start,
            policy,
            view,
            placement: PlacementController::new(),
            loading: false,
            submitting: false,
            error: None,
            feedback: None,
            generation: 0,
            store,
            runtime,
            result_rx,
            result_tx,
        }
    }

    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Switching views ends any drag on the detailed timeline
    pub fn set_view(&mut self, view: ViewMode) {
        if view != self.view {
            self.placement.release();
        }
        self.view = view;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    pub fn dragging_day(&self) -> Option<Day> {
        self.placement.dragging_day()
    }

    /// Totals for the active view
    pub fn summary(&self) -> WeekSummary {
        self.schedule.summary(self.view, &self.policy)
    }

    // ========================================================================
    // Loading and navigation
    // ========================================================================

    /// Load the current week from the store
    pub fn open(&mut self) {
        self.load_week(self.week_start);
    }

    pub fn previous_week(&mut self) {
        self.load_week(add_weeks(self.week_start, -1));
    }

    pub fn next_week(&mut self) {
        self.load_week(add_weeks(self.week_start, 1));
    }

    pub fn go_to_week(&mut self, date: NaiveDate) {
        self.load_week(start_of_week(date));
    }

    /// Switch to `week_start` and request its schedule. Unsaved edits are
    /// discarded once the load lands; on failure the last schedule and its
    /// week stay.
    fn load_week(&mut self, week_start: NaiveDate) {
        self.begin_generation();
        self.week_start = week_start;
        self.loading = true;
        self.error = None;
        self.feedback = None;

        let ticket = self.generation;
        let store = Arc::clone(&self.store);
        let tx = self.result_tx.clone();
        let worker_id = self.worker_id.clone();

        debug!(worker_id = %worker_id, week = %week_start, generation = ticket, "loading schedule");

        self.runtime.spawn(async move {
            let result = store.load_schedule(&worker_id, week_start).await;
            let _ = tx.send(AsyncResult::ScheduleLoaded(ticket, result));
        });
    }

    /// Drop everything in flight and stop any drag (planner closed)
    pub fn close(&mut self) {
        self.begin_generation();
        self.loading = false;
    }

    fn begin_generation(&mut self) {
        self.generation += 1;
        self.placement.release();
        // an in-flight submission still completes at the store; only its outcome is dropped
        self.submitting = false;
    }

    // ========================================================================
    // Copy last week and submission
    // ========================================================================

    /// Replace both views with the worker's most recently stored schedule
    pub fn copy_last_week(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.placement.release();
        self.loading = true;
        self.error = None;

        let ticket = self.generation;
        let store = Arc::clone(&self.store);
        let tx = self.result_tx.clone();
        let worker_id = self.worker_id.clone();

        self.runtime.spawn(async move {
            let result = store.load_most_recent_schedule(&worker_id).await;
            let _ = tx.send(AsyncResult::LastWeekCopied(ticket, result));
        });
        true
    }

    /// Validate and, only if valid, send the schedule to the store
    pub fn submit(&mut self) -> Result<(), SubmitRefused> {
        if self.is_busy() {
            return Err(SubmitRefused::Busy);
        }

        if let Err(violation) = self.policy.validate(&self.schedule) {
            info!(worker_id = %self.worker_id, week = %self.week_start, %violation, "schedule rejected");
            self.feedback = None;
            self.error = Some(violation.to_string());
            return Err(violation.into());
        }

        self.submitting = true;
        self.error = None;
        self.feedback = None;

        let payload = WeeklySchedule {
            worker_id: self.worker_id.clone(),
            week_start: self.week_start,
            simple_view: self.schedule.simple_view.clone(),
            detailed_view: self.schedule.detailed_view.clone(),
        };
        let ticket = self.generation;
        let store = Arc::clone(&self.store);
        let tx = self.result_tx.clone();

        self.runtime.spawn(async move {
            let result = store.submit_schedule(&payload).await;
            let _ = tx.send(AsyncResult::Submitted(ticket, result));
        });
        Ok(())
    }

    /// Apply finished store calls. Returns true if anything changed.
    pub fn check_async_results(&mut self) -> bool {
        let mut changed = false;

        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                AsyncResult::ScheduleLoaded(ticket, result) => {
                    if !self.is_current(ticket, "load") {
                        continue;
                    }
                    self.loading = false;
                    match result {
                        Ok(schedule) => self.schedule = schedule,
                        Err(e) => {
                            warn!(error = %e, worker_id = %self.worker_id, week = %self.week_start, "schedule load failed");
                            // The schedule still on screen belongs to its own week
                            self.week_start = self.schedule.week_start;
                            self.error = Some(LOAD_ERROR.to_string());
                        }
                    }
                }
                AsyncResult::LastWeekCopied(ticket, result) => {
                    if !self.is_current(ticket, "copy last week") {
                        continue;
                    }
                    self.loading = false;
                    match result {
                        Ok(previous) => {
                            debug!(from_week = %previous.week_start, "copying stored schedule");
                            self.schedule.replace_views(previous);
                            self.feedback = Some(COPY_FEEDBACK.to_string());
                        }
                        Err(e) => {
                            warn!(error = %e, worker_id = %self.worker_id, "copy last week failed");
                            self.error = Some(COPY_ERROR.to_string());
                        }
                    }
                }
                AsyncResult::Submitted(ticket, result) => {
                    if !self.is_current(ticket, "submit") {
                        continue;
                    }
                    self.submitting = false;
                    match result {
                        Ok(()) => {
                            info!(worker_id = %self.worker_id, week = %self.week_start, "schedule submitted");
                            self.feedback = Some(SUBMIT_FEEDBACK.to_string());
                        }
                        Err(e) => {
                            warn!(error = %e, worker_id = %self.worker_id, week = %self.week_start, "schedule submit failed");
                            self.error = Some(SUBMIT_ERROR.to_string());
                        }
                    }
                }
            }
            changed = true;
        }

        changed
    }

    fn is_current(&self, ticket: u64, request: &str) -> bool {
        if ticket == self.generation {
            return true;
        }
        debug!(request, ticket, generation = self.generation, "dropping stale response");
        false
    }

    // ========================================================================
    // Edits (refused while loading)
    // ========================================================================

    fn edit(&mut self, apply: impl FnOnce(&mut WeeklySchedule, &SchedulePolicy)) -> bool {
        if self.loading {
            return false;
        }
        apply(&mut self.schedule, &self.policy);
        true
    }

    pub fn set_simple_preset(&mut self, day: Day, preset: Option<crate::api::ShiftId>) -> bool {
        self.edit(|schedule, policy| schedule.set_simple_preset(day, preset, policy))
    }

    pub fn cycle_preset(&mut self, day: Day) -> bool {
        self.edit(|schedule, policy| schedule.cycle_preset(day, policy))
    }

    pub fn clear_day(&mut self, day: Day) -> bool {
        self.edit(|schedule, _| schedule.clear_day(day))
    }

    pub fn apply_simple_preset(&mut self, day: Day) -> bool {
        self.edit(|schedule, policy| schedule.apply_simple_preset(day, policy))
    }

    pub fn copy_from_previous_day(&mut self, day: Day) -> bool {
        let mut copied = false;
        self.edit(|schedule, policy| copied = placement::copy_from_previous_day(schedule, day, policy));
        copied
    }

    /// Make sure `day` has a block and switch to the detailed view
    pub fn fine_tune(&mut self, day: Day) -> bool {
        let applied = self.edit(|schedule, policy| schedule.ensure_detailed_block(day, policy));
        if applied {
            self.view = ViewMode::Detailed;
        }
        applied
    }

    // ========================================================================
    // Pointer input for the detailed view
    // ========================================================================

    /// Pointer-down on `day`'s track at `pointer_hour`
    pub fn press_track(&mut self, day: Day, pointer_hour: f64) -> bool {
        if self.loading {
            return false;
        }
        self.placement.press(&mut self.schedule, day, pointer_hour, &self.policy);
        true
    }

    /// Pointer moved while a drag is active. Returns true if the block moved.
    pub fn drag_to(&mut self, pointer_hour: f64) -> bool {
        if self.loading {
            return false;
        }
        self.placement.pointer_moved(&mut self.schedule, pointer_hour, &self.policy)
    }

    pub fn release_pointer(&mut self) -> Option<Day> {
        self.placement.release()
    }
}
