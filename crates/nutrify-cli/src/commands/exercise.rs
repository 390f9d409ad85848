use clap::Subcommand;
use nutrify_core::{Database, DayKey, ExerciseKind, ExerciseTracker};

#[derive(Subcommand)]
pub enum ExerciseAction {
    /// Mark an exercise done for today
    Done {
        /// hanging | stretching | swimming
        kind: String,
    },
    /// List exercise kinds with descriptions and guidelines
    List,
    /// Print today's completion flags and streak as JSON
    Status,
}

pub fn run(action: ExerciseAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ExerciseAction::List => {
            let listing: Vec<_> = ExerciseKind::ALL
                .iter()
                .map(|kind| {
                    serde_json::json!({
                        "kind": kind.to_string(),
                        "label": kind.label(),
                        "description": kind.description(),
                        "recommended_duration": kind.recommended_duration(),
                    })
                })
                .collect();
            super::print_snapshot(&listing)
        }
        ExerciseAction::Status => {
            let db = Database::open()?;
            let (tracker, events) = ExerciseTracker::load(&db, DayKey::today());
            super::report_events(&events)?;
            super::print_snapshot(&tracker.snapshot())
        }
        ExerciseAction::Done { kind } => {
            let kind: ExerciseKind = kind.parse()?;
            let db = Database::open()?;
            let today = DayKey::today();
            let (mut tracker, events) = ExerciseTracker::load(&db, today);
            super::report_events(&events)?;

            let events = tracker.mark_done(&db, kind, today);
            super::report_events(&events)?;
            super::print_snapshot(&tracker.snapshot())
        }
    }
}
