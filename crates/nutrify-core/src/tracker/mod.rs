//! Domain trackers: diet, exercise and recovery.
//!
//! Three structurally similar state machines, each owning today's
//! accumulated metrics plus a streak counter, sharing one [`StreakEngine`].
//! The in-memory state is a cache over the key/value store and is
//! re-derived from it on every activation.

mod diet;
mod exercise;
mod recovery;
mod streak;

pub use diet::{DietSnapshot, DietTracker, NutrientTargets, Nutrients};
pub use exercise::{ExerciseCompletionSet, ExerciseKind, ExerciseSnapshot, ExerciseTracker};
pub use recovery::{interval_hours, RecoveryTracker, SleepQuality, SleepRecord, SleepSnapshot};
pub use streak::{GoalProgress, StreakEngine, StreakState};

use chrono::Utc;

use crate::calendar::DayKey;
use crate::events::{Event, TrackerKind};
use crate::storage::KvStore;

/// Reads a tracker's keys from the store, remembering the first failure so
/// a single warning can be surfaced after reconciliation.
pub(crate) struct StateReader<'a> {
    store: &'a dyn KvStore,
    failure: Option<String>,
}

impl<'a> StateReader<'a> {
    pub(crate) fn new(store: &'a dyn KvStore) -> Self {
        Self {
            store,
            failure: None,
        }
    }

    pub(crate) fn text(&mut self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                self.failure.get_or_insert(err.to_string());
                None
            }
        }
    }

    pub(crate) fn count(&mut self, key: &str) -> u32 {
        self.text(key).and_then(|s| s.parse().ok()).unwrap_or(0)
    }

    pub(crate) fn amount(&mut self, key: &str) -> f64 {
        self.text(key).and_then(|s| s.parse().ok()).unwrap_or(0.0)
    }

    pub(crate) fn flag(&mut self, key: &str) -> bool {
        self.text(key).and_then(|s| s.parse().ok()).unwrap_or(false)
    }

    pub(crate) fn day(&mut self, key: &str) -> Option<DayKey> {
        self.text(key).and_then(|s| DayKey::parse(&s))
    }

    pub(crate) fn into_warning(self, tracker: TrackerKind) -> Option<Event> {
        self.failure.map(|message| Event::StoreUnavailable {
            tracker,
            message,
            at: Utc::now(),
        })
    }
}

/// Best-effort atomic write of a tracker's record. A failure becomes a
/// warning event, never a hard error -- the in-memory state stays
/// authoritative for the session.
pub(crate) fn persist(
    store: &dyn KvStore,
    tracker: TrackerKind,
    entries: &[(&str, String)],
    events: &mut Vec<Event>,
) {
    if let Err(err) = store.put_many(entries) {
        events.push(Event::StoreUnavailable {
            tracker,
            message: err.to_string(),
            at: Utc::now(),
        });
    }
}

/// Serialize an optional day marker the way the store expects: missing
/// markers are the empty string.
pub(crate) fn day_value(day: Option<DayKey>) -> String {
    day.map(|d| d.to_string()).unwrap_or_default()
}
