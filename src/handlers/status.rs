//! Handler for the `status` command.

use super::{note_fallback, resolve_now, status_icon};
use anyhow::{Context, Result};
use colored::Colorize;
use sweep::config::SweepConfig;
use sweep::engine::resolver::{deadline_with_label, resolve_status, resolve_with_label};
use sweep::engine::types::TaskStatus;

/// Classifies a ward's task from the status the backend reported.
///
/// # Errors
/// Returns error if the status or `--at` cannot be read.
pub fn handle(
    config: &SweepConfig,
    ward: &str,
    status: &str,
    slot: Option<&str>,
    at: Option<&str>,
    json: bool,
) -> Result<()> {
    let catalog = config.catalog()?;
    let current: TaskStatus = status.parse().context("Unknown --status")?;
    let now = resolve_now(at)?;
    let schedule = catalog.schedule_by_label(ward);

    let resolved = match slot {
        Some(label) => resolve_with_label(schedule, current, label, now),
        None => resolve_status(schedule, current, now),
    };
    let deadline = deadline_with_label(schedule, slot, now.date());

    if json {
        let output = serde_json::json!({
            "ward": schedule.ward(),
            "reported": current,
            "status": resolved,
            "label": resolved.label(),
            "color": resolved.color_hint(),
            "deadline": deadline,
            "at": now,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    note_fallback(&catalog, ward);
    println!(
        "{} [{}] {}",
        status_icon(resolved),
        schedule.ward().to_string().cyan().bold(),
        resolved.label()
    );
    println!("   Status:   {} ({})", resolved, resolved.color_hint().dimmed());
    println!("   Reported: {current}");
    println!("   Slot:     {}", slot.map_or_else(|| schedule.time_slot().to_string(), str::to_string));
    let deadline = deadline.map_or_else(|| "unknown".to_string(), |d| d.format("%Y-%m-%d %H:%M").to_string());
    println!("   Deadline: {deadline}");
    println!("   At:       {}", now.format("%Y-%m-%d %H:%M").to_string().dimmed());
    Ok(())
}
