//! Recovery tracker: one authoritative sleep record per day and a streak.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::streak::{GoalProgress, StreakEngine, StreakState};
use super::{day_value, persist, StateReader};
use crate::calendar::DayKey;
use crate::error::ValidationError;
use crate::events::{Event, TrackerKind};
use crate::storage::KvStore;

const KEY_STREAK: &str = "sleepStreak";
const KEY_LAST_COMPLETED: &str = "lastSleepStreakDay";
const KEY_HOURS: &str = "lastSleepHours";
const KEY_QUALITY: &str = "lastSleepQuality";
const KEY_DAY: &str = "lastSleepDay";

/// Subjective sleep quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl SleepQuality {
    pub const ALL: [SleepQuality; 4] = [
        SleepQuality::Poor,
        SleepQuality::Fair,
        SleepQuality::Good,
        SleepQuality::Excellent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SleepQuality::Poor => "poor",
            SleepQuality::Fair => "fair",
            SleepQuality::Good => "good",
            SleepQuality::Excellent => "excellent",
        }
    }
}

impl fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SleepQuality {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poor" => Ok(SleepQuality::Poor),
            "fair" => Ok(SleepQuality::Fair),
            "good" => Ok(SleepQuality::Good),
            "excellent" => Ok(SleepQuality::Excellent),
            other => Err(ValidationError::InvalidValue {
                field: "quality".to_string(),
                message: format!("unknown sleep quality '{other}'"),
            }),
        }
    }
}

/// The authoritative record for one night.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepRecord {
    /// Hours slept, clamped to [0, 24].
    pub hours: f64,
    pub quality: SleepQuality,
    /// Day the record was logged on. `None` when the stored marker was
    /// malformed; such a record is kept for display but counts as stale.
    pub day: Option<DayKey>,
}

/// Wall-clock interval from bedtime to wake time in hours.
///
/// A wake time earlier than the bedtime means the session crossed
/// midnight, so 24 hours are added before taking the interval. The result
/// is clamped to [0, 24].
pub fn interval_hours(bedtime: NaiveTime, wake: NaiveTime) -> f64 {
    let mut secs = (wake - bedtime).num_seconds();
    if secs < 0 {
        secs += 86_400;
    }
    (secs as f64 / 3600.0).clamp(0.0, 24.0)
}

#[derive(Debug, Clone)]
struct SleepGoal {
    last: Option<SleepRecord>,
    target_hours: f64,
    logged_today: bool,
}

impl GoalProgress for SleepGoal {
    fn is_complete(&self) -> bool {
        self.logged_today
            && self
                .last
                .map(|record| record.hours >= self.target_hours)
                .unwrap_or(false)
    }

    fn reset(&mut self) {
        // The record itself is kept as "last night" for display; only the
        // logged-today marker rolls over.
        self.logged_today = false;
    }
}

/// Read-only view for the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct SleepSnapshot {
    pub last_night: Option<SleepRecord>,
    pub target_hours: f64,
    pub logged_today: bool,
    pub goal_complete: bool,
    pub streak: u32,
    pub last_completed_day: Option<DayKey>,
}

/// Tracks last night's sleep and the sleep streak.
pub struct RecoveryTracker {
    goal: SleepGoal,
    streak: StreakEngine,
}

impl RecoveryTracker {
    /// Reconcile from the store and run day-rollover detection.
    ///
    /// The record's own day marker doubles as the rollover marker: a record
    /// from a previous day means "not logged today".
    pub fn load(store: &dyn KvStore, target_hours: f64, today: DayKey) -> (Self, Vec<Event>) {
        let mut reader = StateReader::new(store);
        let hours = reader.amount(KEY_HOURS);
        let quality = reader
            .text(KEY_QUALITY)
            .and_then(|s| s.parse().ok())
            .unwrap_or(SleepQuality::Good);
        let record_day = reader.day(KEY_DAY);
        let state = StreakState {
            count: reader.count(KEY_STREAK),
            last_completed: reader.day(KEY_LAST_COMPLETED),
        };

        let mut events = Vec::new();
        if let Some(warning) = reader.into_warning(TrackerKind::Sleep) {
            events.push(warning);
        }

        let last = (hours > 0.0 || record_day.is_some()).then_some(SleepRecord {
            hours,
            quality,
            day: record_day,
        });
        let mut tracker = Self {
            goal: SleepGoal {
                last,
                target_hours,
                logged_today: record_day == Some(today),
            },
            streak: StreakEngine::new(state, record_day),
        };
        let rolled = tracker
            .streak
            .activate(&mut tracker.goal, TrackerKind::Sleep, today);
        if !rolled.is_empty() {
            events.extend(rolled);
            tracker.save(store, &mut events);
        }
        (tracker, events)
    }

    /// Lifecycle activation (app foreground / view appearance).
    pub fn activate(&mut self, store: &dyn KvStore, today: DayKey) -> Vec<Event> {
        let mut events = self
            .streak
            .activate(&mut self.goal, TrackerKind::Sleep, today);
        if !events.is_empty() {
            self.save(store, &mut events);
        }
        events
    }

    /// Log last night's sleep from bed and wake times.
    ///
    /// Re-logging the same day replaces the record (last write wins), it
    /// never accumulates.
    pub fn log_sleep(
        &mut self,
        store: &dyn KvStore,
        bedtime: NaiveTime,
        wake: NaiveTime,
        quality: SleepQuality,
        today: DayKey,
    ) -> Vec<Event> {
        self.record(store, interval_hours(bedtime, wake), quality, today)
    }

    /// Log last night's sleep as a direct hour count.
    ///
    /// Unlike the interval form no clamping applies here; out-of-domain
    /// hours are rejected before any write.
    pub fn log_sleep_hours(
        &mut self,
        store: &dyn KvStore,
        hours: f64,
        quality: SleepQuality,
        today: DayKey,
    ) -> Result<Vec<Event>, ValidationError> {
        if !hours.is_finite() || !(0.0..=24.0).contains(&hours) {
            return Err(ValidationError::OutOfRange {
                field: "hours".to_string(),
                value: hours,
                min: 0.0,
                max: 24.0,
            });
        }
        Ok(self.record(store, hours, quality, today))
    }

    fn record(
        &mut self,
        store: &dyn KvStore,
        hours: f64,
        quality: SleepQuality,
        today: DayKey,
    ) -> Vec<Event> {
        let mut events = self
            .streak
            .activate(&mut self.goal, TrackerKind::Sleep, today);
        self.goal.last = Some(SleepRecord {
            hours,
            quality,
            day: Some(today),
        });
        self.goal.logged_today = true;
        events.push(Event::SleepLogged {
            hours,
            quality,
            at: Utc::now(),
        });
        events.extend(self.streak.reevaluate(&self.goal, TrackerKind::Sleep, today));
        self.save(store, &mut events);
        events
    }

    pub fn last_night(&self) -> Option<SleepRecord> {
        self.goal.last
    }

    pub fn is_goal_complete(&self) -> bool {
        self.goal.is_complete()
    }

    pub fn streak_count(&self) -> u32 {
        self.streak.count()
    }

    pub fn snapshot(&self) -> SleepSnapshot {
        SleepSnapshot {
            last_night: self.goal.last,
            target_hours: self.goal.target_hours,
            logged_today: self.goal.logged_today,
            goal_complete: self.goal.is_complete(),
            streak: self.streak.count(),
            last_completed_day: self.streak.last_completed(),
        }
    }

    fn save(&self, store: &dyn KvStore, events: &mut Vec<Event>) {
        let (hours, quality, record_day) = match self.goal.last {
            Some(record) => (record.hours, record.quality, record.day),
            None => (0.0, SleepQuality::Good, None),
        };
        let entries = [
            (KEY_HOURS, hours.to_string()),
            (KEY_QUALITY, quality.as_str().to_string()),
            (KEY_DAY, day_value(record_day)),
            (KEY_STREAK, self.streak.count().to_string()),
            (KEY_LAST_COMPLETED, day_value(self.streak.last_completed())),
        ];
        persist(store, TrackerKind::Sleep, &entries, events);
    }
}
