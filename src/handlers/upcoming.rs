//! Handler for the `upcoming` command.

use super::{note_fallback, resolve_now};
use anyhow::Result;
use colored::Colorize;
use sweep::config::SweepConfig;
use sweep::engine::resolver::{upcoming_pickups, SCAN_WINDOW_DAYS};

/// Lists the ward's next pickup days, today excluded.
///
/// # Errors
/// Returns error if the catalog cannot be built or `--at` is unreadable.
pub fn handle(
    config: &SweepConfig,
    ward: &str,
    count: Option<usize>,
    at: Option<&str>,
    json: bool,
) -> Result<()> {
    let catalog = config.catalog()?;
    let now = resolve_now(at)?;
    let schedule = catalog.schedule_by_label(ward);
    let upcoming = upcoming_pickups(schedule, now, count.unwrap_or(config.upcoming_count));

    if json {
        println!("{}", serde_json::to_string_pretty(&upcoming)?);
        return Ok(());
    }

    note_fallback(&catalog, ward);
    println!(
        "{} Upcoming pickups for {}:",
        "🚛".cyan(),
        schedule.ward().to_string().yellow()
    );
    if upcoming.is_empty() {
        println!("   (None in the next {SCAN_WINDOW_DAYS} days)");
        return Ok(());
    }
    for pickup in &upcoming {
        let when = match pickup.days_from_now {
            1 => "tomorrow".to_string(),
            n => format!("in {n} days"),
        };
        println!("   {:<10} {}  {}", pickup.weekday_name, pickup.date, when.dimmed());
    }
    Ok(())
}
