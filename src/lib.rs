//! Weekly shift planning for workers: preset and hour-precision views of one
//! week, the scheduling policy that keeps them legal, and the session that
//! loads and submits schedules against a store.

pub mod api;
pub mod config;
pub mod planner;
pub mod ui;
