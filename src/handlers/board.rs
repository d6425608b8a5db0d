//! Handler for the `board` command.

use super::{resolve_now, status_icon};
use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use sweep::config::SweepConfig;
use sweep::engine::board::{BoardRow, DailyBoard, StatusCounts};
use sweep::engine::feed::load_records;
use sweep::engine::types::ResolvedStatus;

#[derive(Serialize)]
struct BoardReport<'a> {
    at: String,
    counts: StatusCounts,
    rows: &'a [BoardRow],
}

/// Resolves every ward against the backend feed and prints the board.
///
/// # Errors
/// Returns error if the feed cannot be read or `--at` is unreadable.
pub fn handle(config: &SweepConfig, feed: Option<&Path>, at: Option<&str>, json: bool) -> Result<()> {
    let catalog = config.catalog()?;
    let now = resolve_now(at)?;
    let records = match feed {
        Some(path) => load_records(path)
            .with_context(|| format!("Failed to read feed {}", path.display()))?,
        None => Vec::new(),
    };
    let board = DailyBoard::build(&catalog, &records, now);
    let counts = board.status_counts();

    if json {
        let report = BoardReport {
            at: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
            counts,
            rows: board.rows(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} Collection Board · {}", "📊".cyan(), now.format("%A %Y-%m-%d %H:%M"));
    println!(
        "   {} active · {} completed · {} in progress · {} scheduled · {} overdue",
        counts.active(),
        counts.completed.to_string().green(),
        counts.in_progress.to_string().yellow(),
        counts.scheduled.to_string().blue(),
        counts.overdue.to_string().red()
    );
    println!();

    for row in board.rows().iter().filter(|r| r.status != ResolvedStatus::NoPickup) {
        println!(
            "   {} [{}] {:<20} {} {}",
            status_icon(row.status),
            row.ward.to_string().yellow(),
            row.time_slot,
            row.status.label(),
            row.driver_name.dimmed()
        );
    }

    let attention = board.attention();
    if !attention.is_empty() {
        println!("\n   {} {} ward(s) overdue:", "⚠".red(), attention.len());
        for row in attention {
            println!("     - {} ({}, {})", row.ward, row.vehicle_id, row.driver_name);
        }
    }
    Ok(())
}
