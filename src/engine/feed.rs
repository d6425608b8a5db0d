//! Task-status records as returned by the collection backend.

use super::catalog::WardCatalog;
use super::error::ScheduleResult;
use super::resolver::{resolve_status, resolve_with_label};
use super::types::{ResolvedStatus, TaskStatus, WardId};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One backend record: `{ ward, status, timeSlot, date }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub ward: String,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    /// Missing means "today".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl TaskRecord {
    /// True if this record describes the task on `date`.
    #[must_use]
    pub fn applies_to(&self, date: NaiveDate) -> bool {
        self.date.map_or(true, |d| d == date)
    }

    /// Classifies this record at `now` against the catalog.
    ///
    /// A backend-supplied slot label takes precedence over the catalog slot.
    #[must_use]
    pub fn resolve(&self, catalog: &WardCatalog, now: NaiveDateTime) -> ResolvedStatus {
        let schedule = catalog.schedule_by_label(&self.ward);
        match &self.time_slot {
            Some(label) => resolve_with_label(schedule, self.status, label, now),
            None => resolve_status(schedule, self.status, now),
        }
    }

    #[must_use]
    pub fn ward_id(&self) -> Option<WardId> {
        self.ward.parse().ok()
    }
}

/// Parses a JSON array of records.
///
/// # Errors
/// Returns an error if the JSON is malformed or a status is unknown.
pub fn parse_records(json: &str) -> ScheduleResult<Vec<TaskRecord>> {
    let records: Vec<TaskRecord> = serde_json::from_str(json)?;
    debug!(records = records.len(), "parsed task feed");
    Ok(records)
}

/// Reads a JSON array of records from disk.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_records(path: &Path) -> ScheduleResult<Vec<TaskRecord>> {
    let content = fs::read_to_string(path)?;
    parse_records(&content)
}
