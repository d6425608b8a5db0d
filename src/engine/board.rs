//! Daily Board: every ward's task status for one moment, for dispatchers.

use super::catalog::WardCatalog;
use super::feed::TaskRecord;
use super::resolver::resolve_status;
use super::types::{ResolvedStatus, TaskStatus, WardId};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// One ward's line on the board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRow {
    pub ward: WardId,
    pub time_slot: String,
    pub vehicle_id: String,
    pub driver_name: String,
    pub status: ResolvedStatus,
}

pub struct DailyBoard {
    rows: Vec<BoardRow>,
}

impl DailyBoard {
    /// Resolves every catalog ward at `now`.
    ///
    /// Wards without a record for today count as `scheduled`. Records for
    /// other dates or for wards outside the catalog are ignored.
    #[must_use]
    pub fn build(catalog: &WardCatalog, records: &[TaskRecord], now: NaiveDateTime) -> Self {
        let today = now.date();
        let mut todays: HashMap<WardId, &TaskRecord> = HashMap::new();
        for record in records.iter().filter(|r| r.applies_to(today)) {
            match record.ward_id().filter(|w| catalog.lookup(*w).is_some()) {
                Some(ward) => {
                    todays.insert(ward, record);
                }
                None => warn!(ward = %record.ward, "record for unknown ward ignored"),
            }
        }

        let rows = catalog
            .wards()
            .map(|schedule| {
                let status = match todays.get(&schedule.ward()) {
                    Some(record) => record.resolve(catalog, now),
                    None => resolve_status(schedule, TaskStatus::Scheduled, now),
                };
                BoardRow {
                    ward: schedule.ward(),
                    time_slot: schedule.time_slot().to_string(),
                    vehicle_id: schedule.vehicle_id().to_string(),
                    driver_name: schedule.driver_name().to_string(),
                    status,
                }
            })
            .collect();

        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[BoardRow] {
        &self.rows
    }

    /// Rows a dispatcher should act on.
    #[must_use]
    pub fn attention(&self) -> Vec<&BoardRow> {
        self.rows.iter().filter(|r| r.status.is_attention()).collect()
    }

    /// Calculates status counts for the whole board.
    #[must_use]
    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for row in &self.rows {
            match row.status {
                ResolvedStatus::NoPickup => counts.no_pickup += 1,
                ResolvedStatus::Scheduled => counts.scheduled += 1,
                ResolvedStatus::InProgress => counts.in_progress += 1,
                ResolvedStatus::Completed => counts.completed += 1,
                ResolvedStatus::Overdue => counts.overdue += 1,
            }
        }
        counts
    }
}

/// Aggregate counts of wards by status.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub no_pickup: usize,
    pub scheduled: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl StatusCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.no_pickup + self.scheduled + self.in_progress + self.completed + self.overdue
    }

    /// Wards collecting today.
    #[must_use]
    pub fn active(&self) -> usize {
        self.total() - self.no_pickup
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn record(ward: &str, status: TaskStatus) -> TaskRecord {
        TaskRecord {
            ward: ward.to_string(),
            status,
            time_slot: None,
            date: None,
        }
    }

    #[test]
    fn test_board_counts_cover_every_ward() {
        let catalog = WardCatalog::builtin().unwrap();
        let board = DailyBoard::build(&catalog, &[], at("2024-03-11 05:00"));
        let counts = board.status_counts();
        assert_eq!(counts.total(), catalog.len());
        assert_eq!(counts.overdue, 0);
        let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(counts.active(), catalog.pickups_on(monday).len());
    }

    #[test]
    fn test_board_applies_records() {
        let catalog = WardCatalog::builtin().unwrap();
        let records = vec![
            record("Ward 2", TaskStatus::Completed),
            record("Ward 4", TaskStatus::InProgress),
            record("Ward 13", TaskStatus::Completed),
            record("Ward 77", TaskStatus::Completed),
        ];
        // Monday 10:00; Ward 2 ends 8:00, Ward 4 ends 9:00, Ward 13 is off.
        let board = DailyBoard::build(&catalog, &records, at("2024-03-11 10:00"));
        let status_of = |n: u8| {
            board
                .rows()
                .iter()
                .find(|r| r.ward.number() == n)
                .map(|r| r.status)
        };
        assert_eq!(status_of(2), Some(ResolvedStatus::Completed));
        assert_eq!(status_of(4), Some(ResolvedStatus::Overdue));
        assert_eq!(status_of(13), Some(ResolvedStatus::NoPickup));
        assert!(board.attention().iter().any(|r| r.ward.number() == 4));
        assert!(board.attention().iter().all(|r| r.ward.number() != 2));
    }

    #[test]
    fn test_board_ignores_stale_records() {
        let catalog = WardCatalog::builtin().unwrap();
        let mut stale = record("Ward 2", TaskStatus::Completed);
        stale.date = NaiveDate::from_ymd_opt(2024, 3, 8);
        let board = DailyBoard::build(&catalog, &[stale], at("2024-03-11 10:00"));
        let ward2 = board.rows().iter().find(|r| r.ward.number() == 2).unwrap();
        assert_eq!(ward2.status, ResolvedStatus::Overdue);
    }
}
