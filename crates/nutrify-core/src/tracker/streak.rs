//! Shared day-rollover and streak algorithm.
//!
//! Each domain tracker embeds one [`StreakEngine`] and exposes its
//! accumulated metrics through the [`GoalProgress`] capability. The engine
//! owns the two rules every tracker needs:
//!
//! - rollover: on the first activation of a new day, zero the accumulators
//!   and, when more than one day passed since the last completion, reset the
//!   streak count
//! - completion: when the day's goal is met for the first time, extend the
//!   streak exactly once

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calendar::{gap_exceeds_one, DayKey};
use crate::events::{Event, TrackerKind};

/// Goal capability consumed by the streak engine.
pub trait GoalProgress {
    /// Whether every tracked target is met for the current day.
    fn is_complete(&self) -> bool;

    /// Roll today's accumulators back to their zero/empty state.
    fn reset(&mut self);
}

/// Consecutive-day streak state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakState {
    /// Count of consecutive completed days.
    pub count: u32,
    /// Day of the most recent completion. Never moves backward.
    pub last_completed: Option<DayKey>,
}

/// Rollover detection and streak bookkeeping for one tracker.
#[derive(Debug, Clone)]
pub struct StreakEngine {
    state: StreakState,
    /// Day the accumulators were last reset for. `None` forces a rollover
    /// on the next activation.
    last_reset: Option<DayKey>,
}

impl StreakEngine {
    pub fn new(state: StreakState, last_reset: Option<DayKey>) -> Self {
        Self { state, last_reset }
    }

    pub fn count(&self) -> u32 {
        self.state.count
    }

    pub fn last_completed(&self) -> Option<DayKey> {
        self.state.last_completed
    }

    pub fn last_reset(&self) -> Option<DayKey> {
        self.last_reset
    }

    pub fn state(&self) -> StreakState {
        self.state
    }

    /// Day-rollover detection. Runs before any metric mutation in the same
    /// activation cycle.
    ///
    /// On the first call of a new day this zeroes the goal's accumulators
    /// and, if the gap since the last completion exceeds one day, resets the
    /// count. Further calls on the same day are no-ops.
    pub fn activate(
        &mut self,
        goal: &mut dyn GoalProgress,
        tracker: TrackerKind,
        today: DayKey,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        if self.last_reset == Some(today) {
            return events;
        }

        goal.reset();
        self.last_reset = Some(today);
        events.push(Event::DayRolledOver {
            tracker,
            day: today,
            at: Utc::now(),
        });

        if gap_exceeds_one(self.state.last_completed, today) && self.state.count > 0 {
            let previous = self.state.count;
            self.state.count = 0;
            events.push(Event::StreakReset {
                tracker,
                previous,
                at: Utc::now(),
            });
        }
        events
    }

    /// Re-evaluate completion after a metric mutation.
    ///
    /// Extends the streak at most once per day: repeated qualifying
    /// mutations after the goal is already complete are no-ops.
    pub fn reevaluate(
        &mut self,
        goal: &dyn GoalProgress,
        tracker: TrackerKind,
        today: DayKey,
    ) -> Vec<Event> {
        let mut events = Vec::new();
        if !goal.is_complete() {
            return events;
        }
        if self.state.last_completed == Some(today) {
            return events;
        }
        if let Some(last) = self.state.last_completed {
            // A clock anomaly put "today" before the marker; never move it
            // backward.
            if today < last {
                return events;
            }
        }

        self.state.count += 1;
        self.state.last_completed = Some(today);
        events.push(Event::GoalCompleted {
            tracker,
            day: today,
            at: Utc::now(),
        });
        events.push(Event::StreakExtended {
            tracker,
            count: self.state.count,
            day: today,
            at: Utc::now(),
        });
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: u32,
        target: u32,
    }

    impl Counter {
        fn new(target: u32) -> Self {
            Self { value: 0, target }
        }
    }

    impl GoalProgress for Counter {
        fn is_complete(&self) -> bool {
            self.value >= self.target
        }

        fn reset(&mut self) {
            self.value = 0;
        }
    }

    fn day(s: &str) -> DayKey {
        DayKey::parse(s).unwrap()
    }

    fn engine(count: u32, last_completed: Option<DayKey>, last_reset: Option<DayKey>) -> StreakEngine {
        StreakEngine::new(
            StreakState {
                count,
                last_completed,
            },
            last_reset,
        )
    }

    #[test]
    fn test_completion_extends_streak_once_per_day() {
        let today = day("2025-06-21");
        let mut goal = Counter::new(2);
        let mut engine = engine(0, None, None);
        engine.activate(&mut goal, TrackerKind::Diet, today);

        goal.value = 1;
        assert!(engine.reevaluate(&goal, TrackerKind::Diet, today).is_empty());

        goal.value = 2;
        let events = engine.reevaluate(&goal, TrackerKind::Diet, today);
        assert_eq!(events.len(), 2);
        assert_eq!(engine.count(), 1);
        assert_eq!(engine.last_completed(), Some(today));

        // Further qualifying mutations the same day are no-ops.
        goal.value = 5;
        for _ in 0..3 {
            assert!(engine.reevaluate(&goal, TrackerKind::Diet, today).is_empty());
        }
        assert_eq!(engine.count(), 1);
    }

    #[test]
    fn test_activation_is_idempotent_within_a_day() {
        let today = day("2025-06-21");
        let mut goal = Counter::new(1);
        let mut engine = engine(3, Some(day("2025-06-20")), Some(day("2025-06-20")));

        let first = engine.activate(&mut goal, TrackerKind::Diet, today);
        assert_eq!(first.len(), 1); // rollover only, gap is one day
        assert_eq!(engine.count(), 3);

        goal.value = 1;
        let again = engine.activate(&mut goal, TrackerKind::Diet, today);
        assert!(again.is_empty());
        // Second activation must not zero accumulators again.
        assert_eq!(goal.value, 1);
    }

    #[test]
    fn test_single_missed_day_keeps_streak() {
        // Completed on the 20th, activated on the 21st: distance 1, no reset.
        let mut goal = Counter::new(1);
        let mut engine = engine(4, Some(day("2025-06-20")), Some(day("2025-06-20")));
        engine.activate(&mut goal, TrackerKind::Exercise, day("2025-06-21"));
        assert_eq!(engine.count(), 4);
    }

    #[test]
    fn test_gap_beyond_one_day_resets_streak() {
        // Day 1 completed, day 2 skipped entirely, day 3 activated.
        let mut goal = Counter::new(1);
        let mut engine = engine(1, Some(day("2025-06-21")), Some(day("2025-06-21")));
        let events = engine.activate(&mut goal, TrackerKind::Diet, day("2025-06-23"));
        assert_eq!(engine.count(), 0);
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::StreakReset { previous: 1, .. })));
    }

    #[test]
    fn test_malformed_marker_is_reset_eligible() {
        // A stored completion day that failed to parse loads as None and is
        // treated as more than one day old.
        let mut goal = Counter::new(1);
        let mut engine = engine(7, None, None);
        engine.activate(&mut goal, TrackerKind::Sleep, day("2025-06-21"));
        assert_eq!(engine.count(), 0);
    }

    #[test]
    fn test_consecutive_days_accumulate() {
        let mut goal = Counter::new(1);
        let mut engine = engine(0, None, None);
        let mut today = day("2025-06-21");
        for expected in 1..=5 {
            engine.activate(&mut goal, TrackerKind::Diet, today);
            goal.value = 1;
            engine.reevaluate(&goal, TrackerKind::Diet, today);
            assert_eq!(engine.count(), expected);
            today = today.next();
        }
    }

    #[test]
    fn test_marker_never_moves_backward() {
        let mut goal = Counter::new(1);
        let mut engine = engine(2, Some(day("2025-06-22")), Some(day("2025-06-22")));
        goal.value = 1;
        // Clock went backward a day.
        let events = engine.reevaluate(&goal, TrackerKind::Diet, day("2025-06-21"));
        assert!(events.is_empty());
        assert_eq!(engine.last_completed(), Some(day("2025-06-22")));
        assert_eq!(engine.count(), 2);
    }
}
