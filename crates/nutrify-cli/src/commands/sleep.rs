use chrono::NaiveTime;
use clap::Subcommand;
use nutrify_core::{Config, Database, DayKey, RecoveryTracker, SleepQuality};

#[derive(Subcommand)]
pub enum SleepAction {
    /// Log last night's sleep
    Log {
        /// Bedtime as HH:MM (paired with --wake)
        #[arg(long)]
        bedtime: Option<String>,
        /// Wake time as HH:MM; earlier than bedtime means the session
        /// crossed midnight
        #[arg(long)]
        wake: Option<String>,
        /// Hours slept, 0-24 (alternative to --bedtime/--wake)
        #[arg(long)]
        hours: Option<f64>,
        /// poor | fair | good | excellent
        #[arg(long, default_value = "good")]
        quality: String,
    },
    /// Print last night's record and streak as JSON
    Status,
}

fn parse_time(label: &str, value: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("cannot parse {label} '{value}', expected HH:MM").into())
}

pub fn run(action: SleepAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load()?;
    let today = DayKey::today();
    let (mut tracker, events) = RecoveryTracker::load(&db, config.sleep.target_hours, today);
    super::report_events(&events)?;

    match action {
        SleepAction::Status => super::print_snapshot(&tracker.snapshot()),
        SleepAction::Log {
            bedtime,
            wake,
            hours,
            quality,
        } => {
            let quality: SleepQuality = quality.parse()?;
            let events = match (bedtime, wake, hours) {
                (Some(bedtime), Some(wake), None) => {
                    let bedtime = parse_time("--bedtime", &bedtime)?;
                    let wake = parse_time("--wake", &wake)?;
                    tracker.log_sleep(&db, bedtime, wake, quality, today)
                }
                (None, None, Some(hours)) => {
                    tracker.log_sleep_hours(&db, hours, quality, today)?
                }
                _ => {
                    return Err(
                        "provide either --bedtime and --wake, or --hours".into()
                    );
                }
            };
            super::report_events(&events)?;
            super::print_snapshot(&tracker.snapshot())
        }
    }
}
