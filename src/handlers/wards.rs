//! Handler for the `wards` command.

use super::format_days;
use anyhow::Result;
use colored::Colorize;
use sweep::config::SweepConfig;

/// Lists every ward with its pickup days, slot and crew.
///
/// # Errors
/// Returns error if the catalog cannot be built.
pub fn handle(config: &SweepConfig, json: bool) -> Result<()> {
    let catalog = config.catalog()?;

    if json {
        let wards: Vec<_> = catalog.wards().collect();
        println!("{}", serde_json::to_string_pretty(&wards)?);
        return Ok(());
    }

    println!("{} Ward Schedules ({}):", "🗓".cyan(), catalog.len());
    for schedule in catalog.wards() {
        println!(
            "   {:<8} {:<14} {:<20} {} {}",
            schedule.ward().to_string().yellow(),
            format_days(schedule),
            schedule.time_slot().to_string(),
            schedule.vehicle_id().dimmed(),
            schedule.driver_name().dimmed()
        );
    }
    Ok(())
}
