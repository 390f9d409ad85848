use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::DayKey;
use crate::tracker::{ExerciseKind, Nutrients, SleepQuality};

/// Which tracker produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    Diet,
    Exercise,
    Sleep,
}

impl TrackerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TrackerKind::Diet => "diet",
            TrackerKind::Exercise => "exercise",
            TrackerKind::Sleep => "sleep",
        }
    }
}

/// Every tracker state change produces an Event.
/// The UI layer consumes these for rendering; the CLI prints them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// First activation on a new day: today's accumulators were zeroed.
    DayRolledOver {
        tracker: TrackerKind,
        day: DayKey,
        at: DateTime<Utc>,
    },
    /// More than one day passed since the last completion.
    StreakReset {
        tracker: TrackerKind,
        previous: u32,
        at: DateTime<Utc>,
    },
    /// The day's goal newly transitioned to complete.
    GoalCompleted {
        tracker: TrackerKind,
        day: DayKey,
        at: DateTime<Utc>,
    },
    StreakExtended {
        tracker: TrackerKind,
        count: u32,
        day: DayKey,
        at: DateTime<Utc>,
    },
    PortionLogged {
        totals: Nutrients,
        at: DateTime<Utc>,
    },
    ExerciseMarked {
        kind: ExerciseKind,
        at: DateTime<Utc>,
    },
    SleepLogged {
        hours: f64,
        quality: SleepQuality,
        at: DateTime<Utc>,
    },
    /// The key/value store could not be read or written; the tracker keeps
    /// operating in-memory for the session.
    StoreUnavailable {
        tracker: TrackerKind,
        message: String,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Non-fatal warnings are routed to stderr by the CLI.
    pub fn is_warning(&self) -> bool {
        matches!(self, Event::StoreUnavailable { .. })
    }
}
