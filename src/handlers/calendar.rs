//! Handler for the `calendar` command.

use super::note_fallback;
use anyhow::{anyhow, Result};
use chrono::{Datelike, Local, Month, NaiveDate};
use colored::Colorize;
use sweep::config::SweepConfig;
use sweep::engine::catalog::{days_in_month, pickup_days_in_month};

/// Prints a month grid with the ward's pickup days highlighted.
///
/// # Errors
/// Returns error if the catalog cannot be built or the month is out of range.
pub fn handle(
    config: &SweepConfig,
    ward: &str,
    year: Option<i32>,
    month: Option<u8>,
    json: bool,
) -> Result<()> {
    let catalog = config.catalog()?;
    let today = Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month_number = match month {
        Some(m) => m,
        None => u8::try_from(today.month())?,
    };
    let month = Month::try_from(month_number).map_err(|_| anyhow!("Invalid month {month_number}"))?;
    let (first, count) = month_bounds(year, month)?;
    let schedule = catalog.schedule_by_label(ward);
    let days = pickup_days_in_month(schedule, year, month);

    if json {
        let output = serde_json::json!({
            "ward": schedule.ward(),
            "year": year,
            "month": month_number,
            "days": days,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    note_fallback(&catalog, ward);
    println!(
        "{} {} {} · {}",
        "📅".cyan(),
        month.name(),
        year,
        schedule.ward().to_string().yellow()
    );
    println!("   {}", "Su Mo Tu We Th Fr Sa".dimmed());

    let lead = first.weekday().num_days_from_sunday();
    let mut line = "   ".to_string() + &"   ".repeat(lead as usize);
    for day in 1..=count {
        let cell = format!("{day:>2}");
        if days.contains(&day) {
            line.push_str(&cell.green().bold().to_string());
        } else {
            line.push_str(&cell.dimmed().to_string());
        }
        line.push(' ');
        if (lead + day) % 7 == 0 {
            println!("{}", line.trim_end());
            line = "   ".to_string();
        }
    }
    if !line.trim().is_empty() {
        println!("{}", line.trim_end());
    }
    println!("\n   {} pickups this month", days.len());
    Ok(())
}

/// First day and length of the month, or an error for years chrono cannot represent.
fn month_bounds(year: i32, month: Month) -> Result<(NaiveDate, u32)> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .ok_or_else(|| anyhow!("Year {year} is out of range"))?;
    let count = days_in_month(year, month).ok_or_else(|| anyhow!("Year {year} is out of range"))?;
    Ok((first, count))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let (first, count) = month_bounds(2024, Month::February).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(count, 29);
    }

    #[test]
    fn test_unrepresentable_year_is_an_error() {
        assert!(month_bounds(300_000, Month::February).is_err());
        assert!(month_bounds(-300_000, Month::January).is_err());
    }
}
