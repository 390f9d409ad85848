//! # Nutrify Core Library
//!
//! This library provides the core business logic for the Nutrify habit
//! tracker: the daily progress and streak engine behind the diet, exercise
//! and recovery screens. It implements a CLI-first philosophy where all
//! operations are available via a standalone CLI binary, with any GUI being
//! a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Trackers**: three structurally similar state machines (diet,
//!   exercise, recovery), each owning today's accumulated metrics and a
//!   streak counter
//! - **Streak Engine**: one shared rollover/streak algorithm parameterized
//!   by a small goal capability trait
//! - **Storage**: SQLite-backed key/value persistence and TOML-based
//!   configuration
//! - **Catalog**: static quick-add table of food portions and their
//!   nutrient deltas
//!
//! ## Key Components
//!
//! - [`DietTracker`], [`ExerciseTracker`], [`RecoveryTracker`]: per-area trackers
//! - [`StreakEngine`]: shared day-rollover and streak state machine
//! - [`Database`]: durable key/value store
//! - [`Config`]: daily targets

pub mod calendar;
pub mod catalog;
pub mod error;
pub mod events;
pub mod storage;
pub mod tracker;

pub use calendar::{day_distance, DayKey};
pub use catalog::{lookup_portion, Food, Portion};
pub use error::{ConfigError, CoreError, Result, StorageError, ValidationError};
pub use events::{Event, TrackerKind};
pub use storage::{Config, Database, KvStore};
pub use tracker::{
    interval_hours, DietSnapshot, DietTracker, ExerciseCompletionSet, ExerciseKind,
    ExerciseSnapshot, ExerciseTracker, GoalProgress, NutrientTargets, Nutrients, RecoveryTracker,
    SleepQuality, SleepRecord, SleepSnapshot, StreakEngine, StreakState,
};
