//! Core types for ward schedules and collection tasks.
//!
//! Note: `TaskStatus` is the value owned by the backend; `ResolvedStatus`
//! is what `resolver::resolve_status()` derives from it plus the clock.

use super::error::{ScheduleError, ScheduleResult};
use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// English weekday names indexed 0=Sunday..6=Saturday.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Maps a 0=Sunday weekday number onto chrono's `Weekday`.
#[must_use]
pub fn weekday_from_sunday(n: u8) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// A ward number, displayed as `Ward N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WardId(u8);

impl WardId {
    pub const MAX: u8 = 99;
    /// Ward used when a lookup misses, unless configured otherwise.
    pub const DEFAULT: Self = Self(1);

    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&number).then_some(Self(number))
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }
}

impl fmt::Display for WardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ward {}", self.0)
    }
}

/// Accepts `Ward 7`, `ward 7` and a bare `7`.
impl FromStr for WardId {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = match trimmed.get(..4) {
            Some(prefix) if prefix.eq_ignore_ascii_case("ward") => trimmed[4..].trim_start(),
            _ => trimmed,
        };
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| ScheduleError::InvalidWard(s.to_string()))
    }
}

impl TryFrom<String> for WardId {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WardId> for String {
    fn from(ward: WardId) -> Self {
        ward.to_string()
    }
}

/// A wall-clock time of day with minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Builds a time from a 24-hour hour and a minute.
    #[must_use]
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Some(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Builds a time from a 12-hour clock reading.
    ///
    /// `12 AM` is midnight and `12 PM` is noon.
    #[must_use]
    pub fn from_12h(hour: u8, minute: u8, pm: bool) -> Option<Self> {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let hour24 = match (hour, pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
        Self::new(hour24, minute)
    }

    #[must_use]
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    #[must_use]
    pub fn minutes_of_day(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn hour(self) -> u8 {
        // Always < 24.
        (self.0 / 60) as u8
    }

    #[must_use]
    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    #[must_use]
    pub fn as_naive_time(self) -> NaiveTime {
        NaiveTime::default() + Duration::minutes(i64::from(self.0))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour = self.hour();
        let meridiem = if hour < 12 { "AM" } else { "PM" };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{hour12}:{:02} {meridiem}", self.minute())
    }
}

/// Parses `H:MM AM` / `H:MM PM`; the meridiem is case-insensitive and the
/// space before it is optional.
impl FromStr for ClockTime {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScheduleError::InvalidTime(s.to_string());
        let text = s.trim();
        if text.len() < 2 || !text.is_char_boundary(text.len() - 2) {
            return Err(invalid());
        }
        let (body, meridiem) = text.split_at(text.len() - 2);
        let pm = if meridiem.eq_ignore_ascii_case("pm") {
            true
        } else if meridiem.eq_ignore_ascii_case("am") {
            false
        } else {
            return Err(invalid());
        };

        let (hour, minute) = body.trim_end().split_once(':').ok_or_else(invalid)?;
        if minute.len() != 2 {
            return Err(invalid());
        }
        let hour = parse_digits(hour).ok_or_else(invalid)?;
        let minute = parse_digits(minute).ok_or_else(invalid)?;
        Self::from_12h(hour, minute, pm).ok_or_else(invalid)
    }
}

/// Unsigned decimal only; `u8::from_str` would also take a leading `+`.
fn parse_digits(text: &str) -> Option<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// A same-day collection window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    start: ClockTime,
    end: ClockTime,
}

impl TimeSlot {
    const SEPARATOR: &'static str = " - ";

    /// Creates a slot. Slots crossing midnight are not supported.
    ///
    /// # Errors
    /// Returns `InvalidTimeSlot` if `end` is not after `start`.
    pub fn new(start: ClockTime, end: ClockTime) -> ScheduleResult<Self> {
        if end <= start {
            return Err(ScheduleError::InvalidTimeSlot(
                format!("{start}{}{end}", Self::SEPARATOR),
                "end must be after start".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(&self) -> ClockTime {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> ClockTime {
        self.end
    }

    /// Extracts the end time from a display label such as
    /// `"6:00 AM - 8:00 AM"`.
    ///
    /// Never fails loudly: any malformed label yields `None`.
    #[must_use]
    pub fn end_of_label(label: &str) -> Option<ClockTime> {
        label.split(Self::SEPARATOR).nth(1)?.parse().ok()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.start, Self::SEPARATOR, self.end)
    }
}

impl FromStr for TimeSlot {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = |reason: &str| ScheduleError::InvalidTimeSlot(s.to_string(), reason.to_string());
        let (start, end) = s
            .trim()
            .split_once(Self::SEPARATOR)
            .ok_or_else(|| malformed("expected \"<start> - <end>\""))?;
        let start: ClockTime = start.parse().map_err(|_| malformed("bad start time"))?;
        let end: ClockTime = end.parse().map_err(|_| malformed("bad end time"))?;
        Self::new(start, end).map_err(|_| malformed("end must be after start"))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

/// Status of a collection task as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Scheduled,
    InProgress,
    Completed,
}

impl TaskStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ScheduleError::InvalidStatus(s.to_string())),
        }
    }
}

/// The derived (computed) status of a ward's task for a given moment.
///
/// Unlike `TaskStatus` (which the backend stores), `ResolvedStatus` folds in
/// the ward's pickup days and the end of its time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvedStatus {
    /// Today is not one of the ward's pickup days
    NoPickup,
    Scheduled,
    InProgress,
    Completed,
    /// The slot has ended and the task is not completed
    Overdue,
}

impl ResolvedStatus {
    /// Returns the badge color hint for UI rendering.
    #[must_use]
    pub fn color_hint(&self) -> &'static str {
        match self {
            Self::NoPickup => "gray",
            Self::Scheduled => "blue",
            Self::InProgress => "amber",
            Self::Completed => "green",
            Self::Overdue => "red",
        }
    }

    /// Returns the badge text.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::NoPickup => "No pickup today",
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
        }
    }

    /// Returns true if a dispatcher should look at this ward.
    #[must_use]
    pub fn is_attention(&self) -> bool {
        matches!(self, Self::Overdue)
    }
}

impl From<TaskStatus> for ResolvedStatus {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Scheduled => Self::Scheduled,
            TaskStatus::InProgress => Self::InProgress,
            TaskStatus::Completed => Self::Completed,
        }
    }
}

impl fmt::Display for ResolvedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPickup => write!(f, "NO-PICKUP"),
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::InProgress => write!(f, "IN-PROGRESS"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Overdue => write!(f, "OVERDUE"),
        }
    }
}

/// The recurring collection plan of one ward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WardSchedule {
    ward: WardId,
    pickup_days: [u8; 3],
    time_slot: TimeSlot,
    vehicle_id: String,
    driver_name: String,
}

impl WardSchedule {
    /// Creates a schedule, sorting the pickup days.
    ///
    /// # Errors
    /// Returns `InvalidPickupDays` unless the days are 3 distinct values in `0..=6`.
    pub fn new(
        ward: WardId,
        mut pickup_days: [u8; 3],
        time_slot: TimeSlot,
        vehicle_id: impl Into<String>,
        driver_name: impl Into<String>,
    ) -> ScheduleResult<Self> {
        pickup_days.sort_unstable();
        let distinct = pickup_days[0] != pickup_days[1] && pickup_days[1] != pickup_days[2];
        if !distinct || pickup_days[2] > 6 {
            return Err(ScheduleError::InvalidPickupDays {
                ward: ward.to_string(),
                days: pickup_days.to_vec(),
            });
        }
        Ok(Self {
            ward,
            pickup_days,
            time_slot,
            vehicle_id: vehicle_id.into(),
            driver_name: driver_name.into(),
        })
    }

    #[must_use]
    pub fn ward(&self) -> WardId {
        self.ward
    }

    /// Pickup weekdays, ascending, 0=Sunday.
    #[must_use]
    pub fn pickup_days(&self) -> [u8; 3] {
        self.pickup_days
    }

    #[must_use]
    pub fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    #[must_use]
    pub fn vehicle_id(&self) -> &str {
        &self.vehicle_id
    }

    #[must_use]
    pub fn driver_name(&self) -> &str {
        &self.driver_name
    }

    #[must_use]
    pub fn has_pickup_on(&self, weekday: Weekday) -> bool {
        self.pickup_days
            .iter()
            .any(|&d| u32::from(d) == weekday.num_days_from_sunday())
    }

    #[must_use]
    pub fn pickup_weekdays(&self) -> Vec<Weekday> {
        self.pickup_days
            .iter()
            .filter_map(|&d| weekday_from_sunday(d))
            .collect()
    }
}
