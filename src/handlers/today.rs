//! Handler for the `today` command.

use super::resolve_now;
use anyhow::Result;
use colored::Colorize;
use sweep::config::SweepConfig;

/// Lists the wards collecting on the given day.
///
/// # Errors
/// Returns error if the catalog cannot be built or `--at` is unreadable.
pub fn handle(config: &SweepConfig, at: Option<&str>, json: bool) -> Result<()> {
    let catalog = config.catalog()?;
    let date = resolve_now(at)?.date();
    let routes = catalog.pickups_on(date);

    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    println!("{} Routes for {} ({}):", "🚀".cyan(), date.format("%A %Y-%m-%d"), routes.len());
    if routes.is_empty() {
        println!("   (No ward collects today)");
        return Ok(());
    }
    for schedule in routes {
        println!(
            "   [{}] {}  {} {}",
            schedule.ward().to_string().yellow(),
            schedule.time_slot(),
            schedule.vehicle_id(),
            schedule.driver_name().dimmed()
        );
    }
    Ok(())
}
