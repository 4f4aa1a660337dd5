use chrono::NaiveDate;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;

use super::time::{date_key, parse_date_key};
use super::types::WeeklySchedule;

/// Transport-level failures at the store boundary. Never shown verbatim to the user.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("schedule store unavailable: {0}")]
    Unavailable(String),
    #[error("schedule record could not be decoded: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Remote schedule storage the planner depends on
pub trait ScheduleStore: Send + Sync + 'static {
    /// Stored schedule for the week, or a fresh empty one when none exists
    fn load_schedule(
        &self,
        worker_id: &str,
        week_start: NaiveDate,
    ) -> impl Future<Output = Result<WeeklySchedule, StoreError>> + Send;

    /// Latest stored schedule for the worker by week key, or an empty one
    fn load_most_recent_schedule(
        &self,
        worker_id: &str,
    ) -> impl Future<Output = Result<WeeklySchedule, StoreError>> + Send;

    /// Upsert by (worker_id, week_start)
    fn submit_schedule(
        &self,
        schedule: &WeeklySchedule,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// In-memory simulated backend with artificial latency
pub struct MockStore {
    latency: Duration,
    offline: AtomicBool,
    // (worker_id, "YYYY-MM-DD") -> serialized schedule
    records: Mutex<HashMap<(String, String), String>>,
}

impl MockStore {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            offline: AtomicBool::new(false),
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Make every call fail with a transport error until switched back
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Store a record directly, skipping latency (seeding and tests)
    pub fn seed(&self, schedule: &WeeklySchedule) -> Result<(), StoreError> {
        self.write(schedule)
    }

    async fn simulate_round_trip(&self) -> Result<(), StoreError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("network unreachable".to_string()));
        }
        Ok(())
    }

    fn write(&self, schedule: &WeeklySchedule) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(schedule)?;
        let key = (schedule.worker_id.clone(), date_key(schedule.week_start));
        self.lock_records().insert(key, encoded);
        Ok(())
    }

    fn lock_records(&self) -> std::sync::MutexGuard<'_, HashMap<(String, String), String>> {
        // A panic while holding the lock cannot leave a half-written record behind
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ScheduleStore for MockStore {
    async fn load_schedule(
        &self,
        worker_id: &str,
        week_start: NaiveDate,
    ) -> Result<WeeklySchedule, StoreError> {
        self.simulate_round_trip().await?;

        let key = (worker_id.to_string(), date_key(week_start));
        let record = self.lock_records().get(&key).cloned();
        match record {
            Some(encoded) => Ok(serde_json::from_str(&encoded)?),
            None => {
                debug!(worker_id, week = %key.1, "no stored schedule, starting empty");
                Ok(WeeklySchedule::empty(worker_id, week_start))
            }
        }
    }

    async fn load_most_recent_schedule(&self, worker_id: &str) -> Result<WeeklySchedule, StoreError> {
        self.simulate_round_trip().await?;

        let latest = self
            .lock_records()
            .iter()
            .filter(|((worker, _), _)| worker == worker_id)
            .filter_map(|((_, week), encoded)| Some((parse_date_key(week)?, encoded)))
            .max_by_key(|(week, _)| *week)
            .map(|(_, encoded)| encoded.clone());

        match latest {
            Some(encoded) => Ok(serde_json::from_str(&encoded)?),
            None => Ok(WeeklySchedule::empty(worker_id, super::time::current_week_start())),
        }
    }

    async fn submit_schedule(&self, schedule: &WeeklySchedule) -> Result<(), StoreError> {
        self.simulate_round_trip().await?;
        self.write(schedule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Day, DetailedShift, ShiftId};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap()
    }

    fn week(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn missing_record_loads_empty() {
        let store = MockStore::new(Duration::ZERO);
        let loaded = runtime().block_on(store.load_schedule("worker-jordan", week(12))).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.worker_id, "worker-jordan");
        assert_eq!(loaded.week_start, week(12));
    }

    #[test]
    fn most_recent_picks_latest_week_key() {
        let store = MockStore::new(Duration::ZERO);
        let mut older = WeeklySchedule::empty("worker-jordan", week(5));
        older.simple_view[Day::Monday] = vec![ShiftId::Night];
        older.detailed_view[Day::Monday] = Some(DetailedShift { start_hour: 20.0 });
        let mut newer = WeeklySchedule::empty("worker-jordan", week(12));
        newer.simple_view[Day::Tuesday] = vec![ShiftId::Morning];
        newer.detailed_view[Day::Tuesday] = Some(DetailedShift { start_hour: 6.0 });
        let other_worker = WeeklySchedule::empty("worker-sam", week(19));

        store.seed(&newer).unwrap();
        store.seed(&older).unwrap();
        store.seed(&other_worker).unwrap();

        let latest = runtime().block_on(store.load_most_recent_schedule("worker-jordan")).unwrap();
        assert_eq!(latest, newer);
    }

    #[test]
    fn resubmission_is_idempotent() {
        let store = MockStore::new(Duration::ZERO);
        let rt = runtime();
        let mut schedule = WeeklySchedule::empty("worker-jordan", week(12));
        schedule.detailed_view[Day::Wednesday] = Some(DetailedShift { start_hour: 9.0 });

        rt.block_on(store.submit_schedule(&schedule)).unwrap();
        rt.block_on(store.submit_schedule(&schedule)).unwrap();

        assert_eq!(store.lock_records().len(), 1);
        let loaded = rt.block_on(store.load_schedule("worker-jordan", week(12))).unwrap();
        assert_eq!(loaded, schedule);
    }

    #[test]
    fn offline_store_fails_every_call() {
        let store = MockStore::new(Duration::ZERO);
        store.set_offline(true);
        let rt = runtime();
        let err = rt.block_on(store.load_schedule("worker-jordan", week(12))).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        let schedule = WeeklySchedule::empty("worker-jordan", week(12));
        assert!(rt.block_on(store.submit_schedule(&schedule)).is_err());
        assert!(store.lock_records().is_empty());
    }
}
