//! One handler per subcommand, plus the bits they share.

pub mod board;
pub mod calendar;
pub mod config;
pub mod show;
pub mod status;
pub mod today;
pub mod upcoming;
pub mod wards;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDateTime};
use colored::Colorize;
use sweep::engine::catalog::{day_name, WardCatalog};
use sweep::engine::types::{ResolvedStatus, WardId, WardSchedule};

const AT_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parses `--at`, falling back to the local clock.
///
/// # Errors
/// Returns error if the value matches none of the accepted formats.
pub fn resolve_now(at: Option<&str>) -> Result<NaiveDateTime> {
    let Some(text) = at else {
        return Ok(Local::now().naive_local());
    };
    for format in AT_FORMATS {
        if let Ok(now) = NaiveDateTime::parse_from_str(text.trim(), format) {
            return Ok(now);
        }
    }
    bail!("Cannot read --at '{text}'. Use e.g. \"2024-03-11 09:00\".")
}

/// True when `label` names no catalog ward, so the default ward stands in.
pub fn is_fallback(catalog: &WardCatalog, label: &str) -> bool {
    label
        .parse::<WardId>()
        .ok()
        .and_then(|ward| catalog.lookup(ward))
        .is_none()
}

/// Prints a note when `label` misses and the default ward stands in.
pub fn note_fallback(catalog: &WardCatalog, label: &str) {
    if is_fallback(catalog, label) {
        println!(
            "   {} '{}' is not in the catalog; showing {}",
            "note:".yellow(),
            label.trim(),
            catalog.default_ward()
        );
    }
}

/// "Sun, Tue, Thu"
pub fn format_days(schedule: &WardSchedule) -> String {
    schedule
        .pickup_days()
        .iter()
        .filter_map(|&d| day_name(d))
        .map(|name| &name[..3])
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn status_icon(status: ResolvedStatus) -> colored::ColoredString {
    match status {
        ResolvedStatus::NoPickup => "·".dimmed(),
        ResolvedStatus::Scheduled => "○".blue(),
        ResolvedStatus::InProgress => "◐".yellow(),
        ResolvedStatus::Completed => "✓".green(),
        ResolvedStatus::Overdue => "✗".red(),
    }
}
