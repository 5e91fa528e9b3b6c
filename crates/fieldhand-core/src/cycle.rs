//! Work-cycle timing and the per-worker last-action store.
//!
//! The target site lets an account take work once an hour. The worker sleeps
//! out the remainder of the hour plus a little slack, so it never knocks a
//! few seconds early and burns the cycle.

use crate::config::AppConfig;
use crate::error::{Result, WorkerError};
use crate::types::{Timestamp, WorkerId};
use rand::Rng;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Length of one work cycle, in seconds.
pub const CYCLE_SECS: i64 = 3600;

/// Slack added on top of the remaining cycle time, in seconds.
pub const SLACK_SECS: u64 = 10;

/// Upper bound for the random hunt delay, in seconds.
pub const HUNT_MAX_WAIT_SECS: u64 = 1000;

/// How long to sleep before the next work attempt.
///
/// With no recorded action the worker may start right away. Otherwise the
/// remainder of the hour is topped up with [`SLACK_SECS`]; an already
/// elapsed cycle yields zero, not a negative-plus-slack.
#[must_use]
pub fn wait_time(last_action: Option<Timestamp>, now: Timestamp) -> Duration {
    let Some(last) = last_action else {
        return Duration::ZERO;
    };

    let elapsed = now.timestamp() - last.timestamp();
    let remaining = CYCLE_SECS - elapsed;

    if remaining < 0 {
        Duration::ZERO
    } else {
        Duration::from_secs(remaining.unsigned_abs() + SLACK_SECS)
    }
}

/// Random delay before a hunt attempt.
///
/// Hunts have no fixed cadence on the site; a uniform delay up to
/// [`HUNT_MAX_WAIT_SECS`] keeps the worker from looking like a metronome.
#[must_use]
pub fn hunt_wait_time() -> Duration {
    let secs = rand::thread_rng().gen_range(0..=HUNT_MAX_WAIT_SECS);
    Duration::from_secs(secs)
}

/// On-disk record of each worker's most recent completed action.
///
/// One file per worker, `last-work-{id}.db`, holding unix seconds as text.
/// This is the only state the worker persists between runs.
#[derive(Debug, Clone)]
pub struct LastActionStore {
    dir: PathBuf,
}

impl LastActionStore {
    /// Create a store rooted at a specific directory.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store rooted at the configured state directory, falling back
    /// to the XDG data directory.
    ///
    /// # Errors
    /// Returns error if no state directory can be determined.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let dir = match &config.worker.state_dir {
            Some(dir) => dir.clone(),
            None => AppConfig::data_dir()?,
        };
        Ok(Self::new(dir))
    }

    /// Read the recorded timestamp for a worker.
    ///
    /// A missing file means the worker has never completed an action.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or holds
    /// something other than unix seconds.
    pub fn last_action(&self, worker: &WorkerId) -> Result<Option<Timestamp>> {
        let path = self.file_path(worker);

        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let secs: i64 = trimmed.parse().map_err(|_| {
            WorkerError::Validation(format!(
                "invalid last-action value in {}: '{trimmed}'",
                path.display()
            ))
        })?;

        Ok(Some(Timestamp::from_unix(secs)?))
    }

    /// Record now as the worker's last action, overwriting any earlier value.
    ///
    /// # Errors
    /// Returns error if the state directory or file cannot be written.
    pub fn record(&self, worker: &WorkerId) -> Result<()> {
        self.record_at(worker, Timestamp::now())
    }

    /// Record a specific timestamp as the worker's last action.
    ///
    /// # Errors
    /// Returns error if the state directory or file cannot be written.
    pub fn record_at(&self, worker: &WorkerId, at: Timestamp) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.file_path(worker);
        fs::write(&path, format!("{}\n", at.timestamp()))?;
        debug!("Recorded last action for {worker} at {at}");
        Ok(())
    }

    fn file_path(&self, worker: &WorkerId) -> PathBuf {
        self.dir.join(format!("last-work-{worker}.db"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix(secs).unwrap()
    }

    #[test]
    fn test_wait_time_without_history() {
        assert_eq!(wait_time(None, ts(50_000)), Duration::ZERO);
    }

    #[test]
    fn test_wait_time_mid_cycle() {
        // 30 minutes into the hour: wait the other 30 minutes plus slack
        let wait = wait_time(Some(ts(50_000)), ts(51_800));
        assert_eq!(wait, Duration::from_secs(1_810));
    }

    #[test]
    fn test_wait_time_cycle_elapsed() {
        // Two hours since the last action: no wait at all
        let wait = wait_time(Some(ts(50_000)), ts(57_200));
        assert_eq!(wait, Duration::ZERO);
    }

    #[test]
    fn test_wait_time_exact_boundary() {
        // Exactly one hour later the remainder is zero, but the slack stays
        let wait = wait_time(Some(ts(50_000)), ts(53_600));
        assert_eq!(wait, Duration::from_secs(10));
    }

    #[test]
    fn test_wait_time_fresh_action() {
        let wait = wait_time(Some(ts(50_000)), ts(50_000));
        assert_eq!(wait, Duration::from_secs(3_610));
    }

    #[test]
    fn test_wait_time_future_record() {
        // Clock skew can put the record in the future; wait it out too
        let wait = wait_time(Some(ts(50_100)), ts(50_000));
        assert_eq!(wait, Duration::from_secs(3_710));
    }

    #[test]
    fn test_hunt_wait_time_in_range() {
        for _ in 0..100 {
            let wait = hunt_wait_time();
            assert!(wait <= Duration::from_secs(HUNT_MAX_WAIT_SECS));
        }
    }

    #[test]
    fn test_store_round_trip() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = LastActionStore::new(tmp.path());
        let worker = WorkerId::new("work").unwrap();

        assert!(store.last_action(&worker).unwrap().is_none());

        store.record_at(&worker, ts(1_700_000_000)).unwrap();
        let recorded = store.last_action(&worker).unwrap().expect("recorded");
        assert_eq!(recorded.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_store_overwrites() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = LastActionStore::new(tmp.path());
        let worker = WorkerId::new("work").unwrap();

        store.record_at(&worker, ts(1_000)).unwrap();
        store.record_at(&worker, ts(2_000)).unwrap();

        let recorded = store.last_action(&worker).unwrap().expect("recorded");
        assert_eq!(recorded.timestamp(), 2_000);
    }

    #[test]
    fn test_store_tolerates_whitespace() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = LastActionStore::new(tmp.path());
        let worker = WorkerId::new("work").unwrap();

        fs::write(tmp.path().join("last-work-work.db"), "  1700000000\n\n").unwrap();
        let recorded = store.last_action(&worker).unwrap().expect("recorded");
        assert_eq!(recorded.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_store_empty_file_means_no_history() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = LastActionStore::new(tmp.path());
        let worker = WorkerId::new("work").unwrap();

        fs::write(tmp.path().join("last-work-work.db"), "\n").unwrap();
        assert!(store.last_action(&worker).unwrap().is_none());
    }

    #[test]
    fn test_store_rejects_garbage() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = LastActionStore::new(tmp.path());
        let worker = WorkerId::new("work").unwrap();

        fs::write(tmp.path().join("last-work-work.db"), "yesterday").unwrap();
        let err = store.last_action(&worker).unwrap_err();
        assert!(matches!(err, WorkerError::Validation(_)));
    }

    #[test]
    fn test_workers_have_separate_files() {
        let tmp = TempDir::new().expect("create temp dir");
        let store = LastActionStore::new(tmp.path());
        let work = WorkerId::new("work").unwrap();
        let hunt = WorkerId::new("hunt").unwrap();

        store.record_at(&work, ts(1_000)).unwrap();

        assert!(store.last_action(&work).unwrap().is_some());
        assert!(store.last_action(&hunt).unwrap().is_none());
    }
}
