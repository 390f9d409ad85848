//! Integration tests for the daily progress and streak engine.
//!
//! Exercises the full workflow across simulated days against one store:
//! goal completion, restart reconciliation, day rollover, gap resets and
//! degraded operation when the store is unavailable.

use nutrify_core::{
    Database, DayKey, DietTracker, Event, ExerciseKind, ExerciseTracker, KvStore,
    NutrientTargets, Nutrients, RecoveryTracker, SleepQuality, StorageError, TrackerKind,
};

fn day(s: &str) -> DayKey {
    DayKey::parse(s).unwrap()
}

fn portion(protein: f64, calcium: f64, zinc: f64, boron: f64) -> Nutrients {
    Nutrients {
        protein,
        calcium,
        zinc,
        boron,
    }
}

#[test]
fn test_diet_day1_complete_day3_resets() {
    let db = Database::open_memory().unwrap();
    let day1 = day("2025-06-21");
    let day3 = day("2025-06-23");

    // Day 1: totals start at zero; add portions until all targets are met.
    let (mut tracker, _) = DietTracker::load(&db, NutrientTargets::default(), day1);
    assert_eq!(tracker.totals(), Nutrients::default());

    for _ in 0..5 {
        tracker
            .add_portion(&db, &portion(22.0, 300.0, 2.5, 2.5), day1)
            .unwrap();
    }
    assert!(tracker.is_goal_complete());
    assert_eq!(tracker.streak_count(), 1);
    assert_eq!(tracker.snapshot().last_completed_day, Some(day1));

    // Day 2 is skipped entirely -- no activation at all. First activation
    // on day 3 sees a two-day gap and resets the streak.
    let (tracker, events) = DietTracker::load(&db, NutrientTargets::default(), day3);
    assert_eq!(tracker.streak_count(), 0);
    assert_eq!(tracker.totals(), Nutrients::default());
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::StreakReset { previous: 1, .. })));
}

#[test]
fn test_diet_streak_survives_restart() {
    let db = Database::open_memory().unwrap();
    let day1 = day("2025-06-21");

    let (mut tracker, _) = DietTracker::load(&db, NutrientTargets::default(), day1);
    tracker
        .add_portion(&db, &portion(100.0, 1000.0, 10.0, 10.0), day1)
        .unwrap();
    assert_eq!(tracker.streak_count(), 1);
    drop(tracker);

    // Same-day restart: nothing rolls over, the completed state is intact
    // and further portions never double-count.
    let (mut tracker, events) = DietTracker::load(&db, NutrientTargets::default(), day1);
    assert!(events.is_empty());
    assert_eq!(tracker.streak_count(), 1);
    tracker
        .add_portion(&db, &portion(10.0, 10.0, 1.0, 1.0), day1)
        .unwrap();
    assert_eq!(tracker.streak_count(), 1);

    // Next-day restart: accumulators reset, one-day gap keeps the streak.
    let (mut tracker, _) = DietTracker::load(&db, NutrientTargets::default(), day1.next());
    assert_eq!(tracker.totals(), Nutrients::default());
    assert_eq!(tracker.streak_count(), 1);
    tracker
        .add_portion(&db, &portion(100.0, 1000.0, 10.0, 10.0), day1.next())
        .unwrap();
    assert_eq!(tracker.streak_count(), 2);
}

#[test]
fn test_exercise_consecutive_days_then_gap() {
    let db = Database::open_memory().unwrap();
    let mut today = day("2025-06-21");

    for expected in 1..=3 {
        let (mut tracker, _) = ExerciseTracker::load(&db, today);
        for kind in ExerciseKind::ALL {
            tracker.mark_done(&db, kind, today);
        }
        assert_eq!(tracker.streak_count(), expected);
        today = today.next();
    }

    // Two idle days later the streak is gone.
    let (tracker, _) = ExerciseTracker::load(&db, today.next().next());
    assert_eq!(tracker.streak_count(), 0);
}

#[test]
fn test_sleep_goal_across_days() {
    let db = Database::open_memory().unwrap();
    let day1 = day("2025-06-21");

    let (mut tracker, _) = RecoveryTracker::load(&db, 8.0, day1);
    tracker
        .log_sleep_hours(&db, 8.5, SleepQuality::Good, day1)
        .unwrap();
    assert_eq!(tracker.streak_count(), 1);
    drop(tracker);

    // Day 2: logging again extends the streak.
    let day2 = day1.next();
    let (mut tracker, _) = RecoveryTracker::load(&db, 8.0, day2);
    assert!(!tracker.snapshot().logged_today);
    tracker
        .log_sleep_hours(&db, 9.0, SleepQuality::Excellent, day2)
        .unwrap();
    assert_eq!(tracker.streak_count(), 2);
    drop(tracker);

    // Day 5: the gap exceeded one day, streak resets before the new log.
    let day5 = day("2025-06-25");
    let (mut tracker, _) = RecoveryTracker::load(&db, 8.0, day5);
    assert_eq!(tracker.streak_count(), 0);
    tracker
        .log_sleep_hours(&db, 8.0, SleepQuality::Good, day5)
        .unwrap();
    assert_eq!(tracker.streak_count(), 1);
}

#[test]
fn test_trackers_are_independent() {
    let db = Database::open_memory().unwrap();
    let today = day("2025-06-21");

    let (mut diet, _) = DietTracker::load(&db, NutrientTargets::default(), today);
    let (mut exercise, _) = ExerciseTracker::load(&db, today);

    diet.add_portion(&db, &portion(100.0, 1000.0, 10.0, 10.0), today)
        .unwrap();
    assert_eq!(diet.streak_count(), 1);
    assert_eq!(exercise.streak_count(), 0);

    exercise.mark_done(&db, ExerciseKind::Hanging, today);
    let (diet, _) = DietTracker::load(&db, NutrientTargets::default(), today);
    assert_eq!(diet.streak_count(), 1);
}

#[test]
fn test_tracker_record_is_persisted_consistently() {
    let db = Database::open_memory().unwrap();
    let today = day("2025-06-21");

    let (mut tracker, _) = DietTracker::load(&db, NutrientTargets::default(), today);
    tracker
        .add_portion(&db, &portion(22.0, 15.0, 5.3, 0.0043), today)
        .unwrap();

    // The whole record lands together: totals, streak and day markers.
    assert_eq!(db.get("todayProtein").unwrap().as_deref(), Some("22"));
    assert_eq!(db.get("todayCalcium").unwrap().as_deref(), Some("15"));
    assert_eq!(db.get("dietStreak").unwrap().as_deref(), Some("0"));
    assert_eq!(
        db.get("dietDataDay").unwrap().as_deref(),
        Some("2025-06-21")
    );
    assert_eq!(db.get("lastCompletedDietDay").unwrap().as_deref(), Some(""));
}

#[test]
fn test_malformed_stored_day_resets_conservatively() {
    let db = Database::open_memory().unwrap();
    db.put_many(&[
        ("exerciseStreak", "9".to_string()),
        ("lastExerciseDay", "not-a-date".to_string()),
        ("exerciseDataDay", "also-bad".to_string()),
    ])
    .unwrap();

    let (tracker, events) = ExerciseTracker::load(&db, day("2025-06-21"));
    assert_eq!(tracker.streak_count(), 0);
    assert!(events
        .iter()
        .any(|e| matches!(e, Event::StreakReset { previous: 9, .. })));
}

/// A store that fails every operation.
struct DownStore;

impl KvStore for DownStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::QueryFailed("store is down".to_string()))
    }

    fn put_many(&self, _entries: &[(&str, String)]) -> Result<(), StorageError> {
        Err(StorageError::QueryFailed("store is down".to_string()))
    }
}

#[test]
fn test_unavailable_store_degrades_to_in_memory() {
    let store = DownStore;
    let today = day("2025-06-21");

    let (mut tracker, events) = DietTracker::load(&store, NutrientTargets::default(), today);
    assert!(events.iter().any(|e| e.is_warning()));

    // Mutations still apply in-memory and only warn about persistence.
    let events = tracker
        .add_portion(&store, &portion(100.0, 1000.0, 10.0, 10.0), today)
        .unwrap();
    assert_eq!(tracker.streak_count(), 1);
    assert!(events.iter().any(
        |e| matches!(e, Event::StoreUnavailable { tracker: TrackerKind::Diet, .. })
    ));
}
