pub mod config;
pub mod diet;
pub mod exercise;
pub mod sleep;

use nutrify_core::Event;

/// Print mutation/rollover events one JSON object per line; store warnings
/// go to stderr.
pub fn report_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        if event.is_warning() {
            eprintln!("warning: {}", serde_json::to_string(event)?);
        } else {
            println!("{}", serde_json::to_string(event)?);
        }
    }
    Ok(())
}

/// Pretty-print a tracker snapshot as JSON.
pub fn print_snapshot<T: serde::Serialize>(snapshot: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}
