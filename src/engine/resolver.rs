//! Task Status Resolver: classifies a ward's collection task for a moment.
//!
//! Everything here is a pure function of the schedule, the backend status
//! and a caller-supplied `now`; nothing reads the system clock.

use super::catalog::{day_name, WardCatalog};
use super::types::{ClockTime, ResolvedStatus, TaskStatus, TimeSlot, WardId, WardSchedule};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::warn;

/// How many days past today `upcoming_pickups` looks.
pub const SCAN_WINDOW_DAYS: u32 = 14;

/// The end of `schedule`'s time slot on `date`.
#[must_use]
pub fn deadline(schedule: &WardSchedule, date: NaiveDate) -> NaiveDateTime {
    deadline_at(schedule.time_slot().end(), date)
}

/// The deadline on `date` when the backend may override the slot with a
/// display label. `None` when the label is malformed.
#[must_use]
pub fn deadline_with_label(schedule: &WardSchedule, slot_label: Option<&str>, date: NaiveDate) -> Option<NaiveDateTime> {
    let end = match slot_label {
        Some(label) => TimeSlot::end_of_label(label)?,
        None => schedule.time_slot().end(),
    };
    Some(deadline_at(end, date))
}

fn deadline_at(end: ClockTime, date: NaiveDate) -> NaiveDateTime {
    date.and_time(end.as_naive_time())
}

/// Derives the status of `schedule`'s task at `now`.
///
/// `completed` always wins; otherwise a task still open after the slot ends
/// is `overdue`.
#[must_use]
pub fn resolve_status(schedule: &WardSchedule, current: TaskStatus, now: NaiveDateTime) -> ResolvedStatus {
    classify(schedule, current, Some(schedule.time_slot().end()), now)
}

/// Like [`resolve_status`], but takes the slot end from a display label
/// supplied by the backend. A malformed label skips the overdue check.
#[must_use]
pub fn resolve_with_label(
    schedule: &WardSchedule,
    current: TaskStatus,
    slot_label: &str,
    now: NaiveDateTime,
) -> ResolvedStatus {
    let end = TimeSlot::end_of_label(slot_label);
    if end.is_none() {
        warn!(ward = %schedule.ward(), slot_label, "unparseable time slot, skipping overdue check");
    }
    classify(schedule, current, end, now)
}

fn classify(
    schedule: &WardSchedule,
    current: TaskStatus,
    end: Option<ClockTime>,
    now: NaiveDateTime,
) -> ResolvedStatus {
    if !schedule.has_pickup_on(now.weekday()) {
        return ResolvedStatus::NoPickup;
    }

    if current == TaskStatus::Completed {
        return ResolvedStatus::Completed;
    }

    match end {
        Some(end) if now > deadline_at(end, now.date()) => ResolvedStatus::Overdue,
        _ => current.into(),
    }
}

/// A future collection day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPickup {
    pub date: NaiveDate,
    pub weekday_name: &'static str,
    pub days_from_now: u32,
}

/// Lists up to `count` pickup days after today, ascending.
///
/// Today is never included. Only the next [`SCAN_WINDOW_DAYS`] days are
/// scanned, so fewer than `count` entries may come back.
#[must_use]
pub fn upcoming_pickups(schedule: &WardSchedule, now: NaiveDateTime, count: usize) -> Vec<UpcomingPickup> {
    let today = now.date();
    (1..=SCAN_WINDOW_DAYS)
        .filter_map(|days_from_now| {
            let date = today.checked_add_signed(Duration::days(i64::from(days_from_now)))?;
            if !schedule.has_pickup_on(date.weekday()) {
                return None;
            }
            let weekday = u8::try_from(date.weekday().num_days_from_sunday()).ok()?;
            Some(UpcomingPickup {
                date,
                weekday_name: day_name(weekday)?,
                days_from_now,
            })
        })
        .take(count)
        .collect()
}

/// Resolves statuses against a catalog, keeping the catalog's
/// unknown-ward fallback.
pub struct TaskStatusResolver<'a> {
    catalog: &'a WardCatalog,
}

impl<'a> TaskStatusResolver<'a> {
    #[must_use]
    pub fn new(catalog: &'a WardCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn resolve(&self, ward: WardId, current: TaskStatus, now: NaiveDateTime) -> ResolvedStatus {
        resolve_status(self.catalog.schedule(ward), current, now)
    }

    #[must_use]
    pub fn upcoming(&self, ward: WardId, now: NaiveDateTime, count: usize) -> Vec<UpcomingPickup> {
        upcoming_pickups(self.catalog.schedule(ward), now, count)
    }
}
