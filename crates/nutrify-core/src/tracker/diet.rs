//! Diet tracker: per-day nutrient accumulation against fixed targets.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::streak::{GoalProgress, StreakEngine, StreakState};
use super::{day_value, persist, StateReader};
use crate::calendar::DayKey;
use crate::error::ValidationError;
use crate::events::{Event, TrackerKind};
use crate::storage::KvStore;

const KEY_STREAK: &str = "dietStreak";
const KEY_LAST_COMPLETED: &str = "lastCompletedDietDay";
const KEY_PROTEIN: &str = "todayProtein";
const KEY_CALCIUM: &str = "todayCalcium";
const KEY_ZINC: &str = "todayZinc";
const KEY_BORON: &str = "todayBoron";
const KEY_DATA_DAY: &str = "dietDataDay";

/// Per-day nutrient amounts: protein and the three minerals, in grams and
/// milligrams respectively. Doubles as the accumulator and as a portion's
/// delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrients {
    pub protein: f64,
    pub calcium: f64,
    pub zinc: f64,
    pub boron: f64,
}

impl Nutrients {
    pub fn add(&mut self, delta: &Nutrients) {
        self.protein += delta.protein;
        self.calcium += delta.calcium;
        self.zinc += delta.zinc;
        self.boron += delta.boron;
    }

    pub fn meets(&self, targets: &NutrientTargets) -> bool {
        self.protein >= targets.protein
            && self.calcium >= targets.calcium
            && self.zinc >= targets.zinc
            && self.boron >= targets.boron
    }

    fn ensure_valid_delta(&self) -> Result<(), ValidationError> {
        for (name, value) in [
            ("protein", self.protein),
            ("calcium", self.calcium),
            ("zinc", self.zinc),
            ("boron", self.boron),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidValue {
                    field: name.to_string(),
                    message: format!("portion delta must be a non-negative amount, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Daily nutrient thresholds. A goal set is complete when every tracked
/// total meets its target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NutrientTargets {
    #[serde(default = "default_protein_target")]
    pub protein: f64,
    #[serde(default = "default_calcium_target")]
    pub calcium: f64,
    #[serde(default = "default_zinc_target")]
    pub zinc: f64,
    #[serde(default = "default_boron_target")]
    pub boron: f64,
}

fn default_protein_target() -> f64 {
    100.0
}
fn default_calcium_target() -> f64 {
    1000.0
}
fn default_zinc_target() -> f64 {
    10.0
}
fn default_boron_target() -> f64 {
    10.0
}

impl Default for NutrientTargets {
    fn default() -> Self {
        Self {
            protein: default_protein_target(),
            calcium: default_calcium_target(),
            zinc: default_zinc_target(),
            boron: default_boron_target(),
        }
    }
}

#[derive(Debug, Clone)]
struct DietGoal {
    totals: Nutrients,
    targets: NutrientTargets,
}

impl GoalProgress for DietGoal {
    fn is_complete(&self) -> bool {
        self.totals.meets(&self.targets)
    }

    fn reset(&mut self) {
        self.totals = Nutrients::default();
    }
}

/// Read-only view for the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct DietSnapshot {
    pub totals: Nutrients,
    pub targets: NutrientTargets,
    pub goal_complete: bool,
    pub streak: u32,
    pub last_completed_day: Option<DayKey>,
}

/// Accumulates today's nutrient totals and maintains the diet streak.
pub struct DietTracker {
    goal: DietGoal,
    streak: StreakEngine,
}

impl DietTracker {
    /// Reconcile from the store and run day-rollover detection.
    ///
    /// Store read failures degrade to zeroed state plus a warning event;
    /// they never fail the load.
    pub fn load(store: &dyn KvStore, targets: NutrientTargets, today: DayKey) -> (Self, Vec<Event>) {
        let mut reader = StateReader::new(store);
        let totals = Nutrients {
            protein: reader.amount(KEY_PROTEIN),
            calcium: reader.amount(KEY_CALCIUM),
            zinc: reader.amount(KEY_ZINC),
            boron: reader.amount(KEY_BORON),
        };
        let state = StreakState {
            count: reader.count(KEY_STREAK),
            last_completed: reader.day(KEY_LAST_COMPLETED),
        };
        let last_reset = reader.day(KEY_DATA_DAY);

        let mut events = Vec::new();
        if let Some(warning) = reader.into_warning(TrackerKind::Diet) {
            events.push(warning);
        }

        let mut tracker = Self {
            goal: DietGoal { totals, targets },
            streak: StreakEngine::new(state, last_reset),
        };
        let rolled = tracker
            .streak
            .activate(&mut tracker.goal, TrackerKind::Diet, today);
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
            .activate(&mut self.goal, TrackerKind::Diet, today);
        if !events.is_empty() {
            self.save(store, &mut events);
        }
        events
    }

    /// Add a portion's nutrient delta to today's totals.
    ///
    /// Negative or non-finite components are rejected before any state or
    /// store mutation.
    pub fn add_portion(
        &mut self,
        store: &dyn KvStore,
        delta: &Nutrients,
        today: DayKey,
    ) -> Result<Vec<Event>, ValidationError> {
        delta.ensure_valid_delta()?;

        let mut events = self
            .streak
            .activate(&mut self.goal, TrackerKind::Diet, today);
        self.goal.totals.add(delta);
        events.push(Event::PortionLogged {
            totals: self.goal.totals,
            at: Utc::now(),
        });
        events.extend(self.streak.reevaluate(&self.goal, TrackerKind::Diet, today));
        self.save(store, &mut events);
        Ok(events)
    }

    pub fn totals(&self) -> Nutrients {
        self.goal.totals
    }

    pub fn is_goal_complete(&self) -> bool {
        self.goal.is_complete()
    }

    pub fn streak_count(&self) -> u32 {
        self.streak.count()
    }

    pub fn snapshot(&self) -> DietSnapshot {
        DietSnapshot {
            totals: self.goal.totals,
            targets: self.goal.targets,
            goal_complete: self.goal.is_complete(),
            streak: self.streak.count(),
            last_completed_day: self.streak.last_completed(),
        }
    }

    fn save(&self, store: &dyn KvStore, events: &mut Vec<Event>) {
        let entries = [
            (KEY_PROTEIN, self.goal.totals.protein.to_string()),
            (KEY_CALCIUM, self.goal.totals.calcium.to_string()),
            (KEY_ZINC, self.goal.totals.zinc.to_string()),
            (KEY_BORON, self.goal.totals.boron.to_string()),
            (KEY_STREAK, self.streak.count().to_string()),
            (KEY_LAST_COMPLETED, day_value(self.streak.last_completed())),
            (KEY_DATA_DAY, day_value(self.streak.last_reset())),
        ];
        persist(store, TrackerKind::Diet, &entries, events);
    }
}
