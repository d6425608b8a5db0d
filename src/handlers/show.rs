//! Handler for the `show` command.

use super::{format_days, note_fallback, resolve_now};
use anyhow::Result;
use chrono::Datelike;
use colored::Colorize;
use serde::Serialize;
use sweep::config::SweepConfig;
use sweep::engine::resolver::{upcoming_pickups, UpcomingPickup};
use sweep::engine::types::WardSchedule;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WardView<'a> {
    schedule: &'a WardSchedule,
    pickup_today: bool,
    upcoming: Vec<UpcomingPickup>,
}

/// Shows a ward's schedule, whether it collects today and what comes next.
///
/// # Errors
/// Returns error if the catalog cannot be built or `--at` is unreadable.
pub fn handle(config: &SweepConfig, ward: &str, at: Option<&str>, json: bool) -> Result<()> {
    let catalog = config.catalog()?;
    let now = resolve_now(at)?;
    let schedule = catalog.schedule_by_label(ward);
    let view = WardView {
        schedule,
        pickup_today: schedule.has_pickup_on(now.weekday()),
        upcoming: upcoming_pickups(schedule, now, config.upcoming_count),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    note_fallback(&catalog, ward);
    println!("{} {}", "🚛".cyan(), schedule.ward().to_string().bold());
    println!("   Days:    {}", format_days(schedule));
    println!("   Slot:    {}", schedule.time_slot());
    println!("   Vehicle: {}", schedule.vehicle_id());
    println!("   Driver:  {}", schedule.driver_name());

    let today = if view.pickup_today {
        "pickup today".green()
    } else {
        "no pickup today".dimmed()
    };
    println!("   Today:   {today}");

    if !view.upcoming.is_empty() {
        println!("\n   Next up:");
        for pickup in &view.upcoming {
            println!(
                "     - {} {} ({})",
                pickup.weekday_name,
                pickup.date,
                format!("in {} days", pickup.days_from_now).dimmed()
            );
        }
    }
    Ok(())
}
