//! Exercise tracker: three per-day completion flags and a streak.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::streak::{GoalProgress, StreakEngine, StreakState};
use super::{day_value, persist, StateReader};
use crate::calendar::DayKey;
use crate::error::ValidationError;
use crate::events::{Event, TrackerKind};
use crate::storage::KvStore;

const KEY_STREAK: &str = "exerciseStreak";
const KEY_LAST_COMPLETED: &str = "lastExerciseDay";
const KEY_HANGING: &str = "todayHanging";
const KEY_STRETCHING: &str = "todayStretching";
const KEY_SWIMMING: &str = "todaySwimming";
const KEY_DATA_DAY: &str = "exerciseDataDay";

/// The closed set of tracked exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Hanging,
    Stretching,
    Swimming,
}

impl ExerciseKind {
    pub const ALL: [ExerciseKind; 3] = [
        ExerciseKind::Hanging,
        ExerciseKind::Stretching,
        ExerciseKind::Swimming,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExerciseKind::Hanging => "Hanging",
            ExerciseKind::Stretching => "Stretching",
            ExerciseKind::Swimming => "Swimming",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExerciseKind::Hanging => "Decompresses spine and promotes growth",
            ExerciseKind::Stretching => "Improves posture and flexibility",
            ExerciseKind::Swimming => "Full body exercise that lengthens muscles",
        }
    }

    pub fn recommended_duration(&self) -> &'static str {
        match self {
            ExerciseKind::Hanging => "3 sets x 30-60 seconds",
            ExerciseKind::Stretching => "15-20 minutes",
            ExerciseKind::Swimming => "30-45 minutes",
        }
    }
}

impl fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExerciseKind::Hanging => "hanging",
            ExerciseKind::Stretching => "stretching",
            ExerciseKind::Swimming => "swimming",
        };
        write!(f, "{name}")
    }
}

impl FromStr for ExerciseKind {
    type Err = ValidationError;

    /// The enumeration is closed; anything else is an invalid argument.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hanging" => Ok(ExerciseKind::Hanging),
            "stretching" => Ok(ExerciseKind::Stretching),
            "swimming" => Ok(ExerciseKind::Swimming),
            other => Err(ValidationError::InvalidValue {
                field: "exercise".to_string(),
                message: format!("unknown kind '{other}'"),
            }),
        }
    }
}

/// Today's done-flags. Once set for a day, a flag only reverts at rollover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCompletionSet {
    pub hanging: bool,
    pub stretching: bool,
    pub swimming: bool,
}

impl ExerciseCompletionSet {
    pub fn is_done(&self, kind: ExerciseKind) -> bool {
        match kind {
            ExerciseKind::Hanging => self.hanging,
            ExerciseKind::Stretching => self.stretching,
            ExerciseKind::Swimming => self.swimming,
        }
    }

    /// Set the flag; returns whether it newly transitioned to done.
    fn mark(&mut self, kind: ExerciseKind) -> bool {
        let slot = match kind {
            ExerciseKind::Hanging => &mut self.hanging,
            ExerciseKind::Stretching => &mut self.stretching,
            ExerciseKind::Swimming => &mut self.swimming,
        };
        let newly = !*slot;
        *slot = true;
        newly
    }

    pub fn all_done(&self) -> bool {
        self.hanging && self.stretching && self.swimming
    }
}

impl GoalProgress for ExerciseCompletionSet {
    fn is_complete(&self) -> bool {
        self.all_done()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Read-only view for the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct ExerciseSnapshot {
    pub completed: ExerciseCompletionSet,
    pub all_complete: bool,
    pub streak: u32,
    pub last_completed_day: Option<DayKey>,
}

/// Tracks which exercises were done today and the exercise streak.
pub struct ExerciseTracker {
    completed: ExerciseCompletionSet,
    streak: StreakEngine,
}

impl ExerciseTracker {
    /// Reconcile from the store and run day-rollover detection.
    pub fn load(store: &dyn KvStore, today: DayKey) -> (Self, Vec<Event>) {
        let mut reader = StateReader::new(store);
        let completed = ExerciseCompletionSet {
            hanging: reader.flag(KEY_HANGING),
            stretching: reader.flag(KEY_STRETCHING),
            swimming: reader.flag(KEY_SWIMMING),
        };
        let state = StreakState {
            count: reader.count(KEY_STREAK),
            last_completed: reader.day(KEY_LAST_COMPLETED),
        };
        let last_reset = reader.day(KEY_DATA_DAY);

        let mut events = Vec::new();
        if let Some(warning) = reader.into_warning(TrackerKind::Exercise) {
            events.push(warning);
        }

        let mut tracker = Self {
            completed,
            streak: StreakEngine::new(state, last_reset),
        };
        let rolled = tracker
            .streak
            .activate(&mut tracker.completed, TrackerKind::Exercise, today);
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
            .activate(&mut self.completed, TrackerKind::Exercise, today);
        if !events.is_empty() {
            self.save(store, &mut events);
        }
        events
    }

    /// Mark an exercise done for today. Marking an already-done exercise is
    /// a no-op, not an error.
    pub fn mark_done(&mut self, store: &dyn KvStore, kind: ExerciseKind, today: DayKey) -> Vec<Event> {
        let mut events = self
            .streak
            .activate(&mut self.completed, TrackerKind::Exercise, today);
        let rolled = !events.is_empty();

        if self.completed.mark(kind) {
            events.push(Event::ExerciseMarked {
                kind,
                at: Utc::now(),
            });
            events.extend(
                self.streak
                    .reevaluate(&self.completed, TrackerKind::Exercise, today),
            );
            self.save(store, &mut events);
        } else if rolled {
            self.save(store, &mut events);
        }
        events
    }

    pub fn completed(&self) -> ExerciseCompletionSet {
        self.completed
    }

    pub fn is_goal_complete(&self) -> bool {
        self.completed.all_done()
    }

    pub fn streak_count(&self) -> u32 {
        self.streak.count()
    }

    pub fn snapshot(&self) -> ExerciseSnapshot {
        ExerciseSnapshot {
            completed: self.completed,
            all_complete: self.completed.all_done(),
            streak: self.streak.count(),
            last_completed_day: self.streak.last_completed(),
        }
    }

    fn save(&self, store: &dyn KvStore, events: &mut Vec<Event>) {
        let entries = [
            (KEY_HANGING, self.completed.hanging.to_string()),
            (KEY_STRETCHING, self.completed.stretching.to_string()),
            (KEY_SWIMMING, self.completed.swimming.to_string()),
            (KEY_STREAK, self.streak.count().to_string()),
            (KEY_LAST_COMPLETED, day_value(self.streak.last_completed())),
            (KEY_DATA_DAY, day_value(self.streak.last_reset())),
        ];
        persist(store, TrackerKind::Exercise, &entries, events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    #[test]
    fn test_unknown_kind_fails_to_parse() {
        assert!("hanging".parse::<ExerciseKind>().is_ok());
        assert!("Swimming".parse::<ExerciseKind>().is_ok());
        let err = "jogging".parse::<ExerciseKind>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));
    }

    #[test]
    fn test_marking_twice_is_a_stable_no_op() {
        let db = Database::open_memory().unwrap();
        let today = day("2025-06-21");
        let (mut tracker, _) = ExerciseTracker::load(&db, today);

        let first = tracker.mark_done(&db, ExerciseKind::Hanging, today);
        assert!(first
            .iter()
            .any(|e| matches!(e, Event::ExerciseMarked { .. })));
        assert!(tracker.completed().hanging);

        let second = tracker.mark_done(&db, ExerciseKind::Hanging, today);
        assert!(second.is_empty());
        assert!(tracker.completed().hanging);
        assert_eq!(tracker.streak_count(), 0);
    }

    #[test]
    fn test_all_three_flags_complete_the_goal() {
        let db = Database::open_memory().unwrap();
        let today = day("2025-06-21");
        let (mut tracker, _) = ExerciseTracker::load(&db, today);

        tracker.mark_done(&db, ExerciseKind::Hanging, today);
        tracker.mark_done(&db, ExerciseKind::Stretching, today);
        assert!(!tracker.is_goal_complete());
        assert_eq!(tracker.streak_count(), 0);

        let events = tracker.mark_done(&db, ExerciseKind::Swimming, today);
        assert!(tracker.is_goal_complete());
        assert_eq!(tracker.streak_count(), 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::StreakExtended { count: 1, .. })));

        // Re-marking after completion never double-increments.
        tracker.mark_done(&db, ExerciseKind::Hanging, today);
        assert_eq!(tracker.streak_count(), 1);
    }

    #[test]
    fn test_rollover_clears_flags_but_not_a_fresh_streak() {
        let db = Database::open_memory().unwrap();
        let day1 = day("2025-06-21");
        let (mut tracker, _) = ExerciseTracker::load(&db, day1);
        for kind in ExerciseKind::ALL {
            tracker.mark_done(&db, kind, day1);
        }
        assert_eq!(tracker.streak_count(), 1);

        // Next day: flags reset, streak survives a one-day gap.
        let (tracker, _) = ExerciseTracker::load(&db, day1.next());
        assert_eq!(tracker.completed(), ExerciseCompletionSet::default());
        assert_eq!(tracker.streak_count(), 1);
    }

    #[test]
    fn test_flags_survive_reload_within_the_day() {
        let db = Database::open_memory().unwrap();
        let today = day("2025-06-21");
        let (mut tracker, _) = ExerciseTracker::load(&db, today);
        tracker.mark_done(&db, ExerciseKind::Stretching, today);
        drop(tracker);

        let (tracker, events) = ExerciseTracker::load(&db, today);
        assert!(events.is_empty());
        assert!(tracker.completed().stretching);
        assert!(!tracker.completed().hanging);
    }
}
