//! Ward Schedule Catalog: read-only pickup plans for every ward.
//!
//! The catalog is built once and never mutated, so a shared `&WardCatalog`
//! can be handed to any number of readers.

use super::error::{ScheduleError, ScheduleResult};
use super::types::{ClockTime, TimeSlot, WardId, WardSchedule, DAY_NAMES};
use chrono::{Datelike, Local, Month, Months, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// (ward, pickup days, slot start, slot end, vehicle, driver).
/// Times are minutes of day.
type Seed = (u8, [u8; 3], u16, u16, &'static str, &'static str);

const BUILTIN: [Seed; 33] = [
    (1, [0, 2, 4], 360, 480, "GA 1 JA 1101", "Ram Bahadur Gurung"),
    (2, [1, 3, 5], 360, 480, "GA 1 JA 1102", "Sita Kumari Thapa"),
    (3, [0, 2, 4], 420, 540, "GA 1 JA 1103", "Hari Prasad Poudel"),
    (4, [1, 3, 5], 420, 540, "GA 1 JA 1104", "Gita Adhikari"),
    (5, [2, 4, 6], 390, 510, "GA 1 JA 1105", "Krishna Bahadur Rana"),
    (6, [0, 3, 6], 330, 450, "GA 1 JA 1106", "Bishnu Maya Pun"),
    (7, [1, 4, 6], 360, 480, "GA 1 JA 1107", "Dil Bahadur Magar"),
    (8, [0, 2, 5], 480, 600, "GA 1 JA 1108", "Laxmi Sharma"),
    (9, [1, 3, 6], 360, 480, "GA 1 JA 1109", "Prem Bahadur Thakuri"),
    (10, [2, 4, 6], 420, 540, "GA 1 JA 1110", "Kamala Bhattarai"),
    (11, [0, 2, 4], 390, 510, "GA 1 JA 1111", "Shyam Kumar Shrestha"),
    (12, [1, 3, 5], 480, 600, "GA 1 JA 1112", "Radha Khadka"),
    (13, [0, 3, 5], 360, 480, "GA 1 JA 1113", "Bhim Bahadur Tamang"),
    (14, [1, 4, 6], 420, 540, "GA 1 JA 1114", "Sarita Baral"),
    (15, [0, 2, 5], 330, 450, "GA 1 JA 1115", "Ganesh Subedi"),
    (16, [1, 3, 6], 390, 510, "GA 1 JA 1116", "Maya Devi Kunwar"),
    (17, [2, 4, 6], 360, 480, "GA 1 JA 1117", "Nabin Gurung"),
    (18, [0, 3, 6], 840, 960, "GA 1 JA 1118", "Anita Paudel"),
    (19, [1, 3, 5], 420, 540, "GA 1 JA 1119", "Suresh Thapa Magar"),
    (20, [0, 2, 4], 480, 600, "GA 1 JA 1120", "Sunita Lamichhane"),
    (21, [1, 4, 6], 360, 480, "GA 1 JA 1121", "Raju Pariyar"),
    (22, [0, 2, 5], 390, 510, "GA 1 JA 1122", "Kopila Acharya"),
    (23, [1, 3, 6], 420, 540, "GA 1 JA 1123", "Bikash Rana Magar"),
    (24, [2, 4, 6], 330, 450, "GA 1 JA 1124", "Sabina Giri"),
    (25, [0, 3, 5], 480, 600, "GA 1 JA 1125", "Dipak Sapkota"),
    (26, [1, 3, 5], 360, 480, "GA 1 JA 1126", "Januka Tiwari"),
    (27, [0, 2, 4], 420, 540, "GA 1 JA 1127", "Rabin Chhetri"),
    (28, [1, 4, 6], 840, 960, "GA 1 JA 1128", "Manisha Pokharel"),
    (29, [0, 3, 6], 390, 510, "GA 1 JA 1129", "Tek Bahadur Bohara"),
    (30, [2, 4, 6], 360, 480, "GA 1 JA 1130", "Pabitra Kandel"),
    (31, [1, 3, 5], 480, 600, "GA 1 JA 1131", "Santosh Gurung"),
    (32, [0, 2, 5], 420, 540, "GA 1 JA 1132", "Bimala Neupane"),
    (33, [1, 3, 6], 330, 450, "GA 1 JA 1133", "Yam Bahadur Kc"),
];

/// Returns the English name of a 0=Sunday weekday number.
#[must_use]
pub fn day_name(weekday: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(weekday)).copied()
}

/// Number of days in a month, taken from the calendar.
#[must_use]
pub fn days_in_month(year: i32, month: Month) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// Days of `month` on which `schedule` collects, ascending.
///
/// Out-of-range years yield an empty list.
#[must_use]
pub fn pickup_days_in_month(schedule: &WardSchedule, year: i32, month: Month) -> Vec<u32> {
    let Some(count) = days_in_month(year, month) else {
        return Vec::new();
    };
    (1..=count)
        .filter(|&day| {
            NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
                .is_some_and(|date| schedule.has_pickup_on(date.weekday()))
        })
        .collect()
}

/// On-disk form of a catalog entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WardRecord {
    ward: WardId,
    pickup_days: Vec<u8>,
    time_slot: TimeSlot,
    vehicle_id: String,
    driver_name: String,
}

impl WardRecord {
    fn into_schedule(self) -> ScheduleResult<WardSchedule> {
        let days = <[u8; 3]>::try_from(self.pickup_days.as_slice()).map_err(|_| {
            ScheduleError::InvalidPickupDays {
                ward: self.ward.to_string(),
                days: self.pickup_days.clone(),
            }
        })?;
        WardSchedule::new(self.ward, days, self.time_slot, self.vehicle_id, self.driver_name)
    }
}

pub struct WardCatalog {
    /// Sorted by ward.
    entries: Vec<WardSchedule>,
    default_index: usize,
}

impl WardCatalog {
    /// Builds the catalog shipped with the binary, defaulting to Ward 1.
    ///
    /// # Errors
    /// Returns an error only if the built-in table violates a schedule invariant.
    pub fn builtin() -> ScheduleResult<Self> {
        let schedules = BUILTIN
            .iter()
            .map(|&(number, days, start, end, vehicle, driver)| {
                let ward = WardId::new(number)
                    .ok_or_else(|| ScheduleError::InvalidWard(number.to_string()))?;
                let slot = TimeSlot::new(minutes(start)?, minutes(end)?)?;
                WardSchedule::new(ward, days, slot, vehicle, driver)
            })
            .collect::<ScheduleResult<Vec<_>>>()?;
        Self::from_schedules(schedules, WardId::DEFAULT)
    }

    /// Builds a catalog from explicit schedules.
    ///
    /// # Errors
    /// Returns an error on duplicate wards or if `default_ward` is absent.
    pub fn from_schedules(mut schedules: Vec<WardSchedule>, default_ward: WardId) -> ScheduleResult<Self> {
        schedules.sort_by_key(WardSchedule::ward);
        if let Some(pair) = schedules.windows(2).find(|w| w[0].ward() == w[1].ward()) {
            return Err(ScheduleError::DuplicateWard(pair[0].ward().to_string()));
        }
        let default_index = schedules
            .binary_search_by_key(&default_ward, WardSchedule::ward)
            .map_err(|_| ScheduleError::MissingDefaultWard(default_ward.to_string()))?;
        Ok(Self {
            entries: schedules,
            default_index,
        })
    }

    /// Loads a catalog from a JSON array of
    /// `{ ward, pickupDays, timeSlot, vehicleId, driverName }` records.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or an entry is invalid.
    pub fn load(path: &Path, default_ward: WardId) -> ScheduleResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, default_ward)
    }

    /// Parses a catalog from its JSON form.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or an entry is invalid.
    pub fn parse(json: &str, default_ward: WardId) -> ScheduleResult<Self> {
        let records: Vec<WardRecord> = serde_json::from_str(json)?;
        let schedules = records
            .into_iter()
            .map(WardRecord::into_schedule)
            .collect::<ScheduleResult<Vec<_>>>()?;
        debug!(wards = schedules.len(), "loaded ward catalog");
        Self::from_schedules(schedules, default_ward)
    }

    /// Looks up a ward, signalling absence.
    #[must_use]
    pub fn lookup(&self, ward: WardId) -> Option<&WardSchedule> {
        self.entries
            .binary_search_by_key(&ward, WardSchedule::ward)
            .ok()
            .map(|i| &self.entries[i])
    }

    /// Returns the schedule for `ward`, substituting the default ward's
    /// schedule when `ward` is unknown.
    #[must_use]
    pub fn schedule(&self, ward: WardId) -> &WardSchedule {
        self.lookup(ward).unwrap_or_else(|| {
            warn!(%ward, default = %self.default_ward(), "unknown ward, using default schedule");
            self.default_schedule()
        })
    }

    /// Like [`WardCatalog::schedule`] for a raw label; unparseable labels
    /// also get the default ward.
    #[must_use]
    pub fn schedule_by_label(&self, label: &str) -> &WardSchedule {
        match label.parse::<WardId>() {
            Ok(ward) => self.schedule(ward),
            Err(_) => {
                warn!(label, default = %self.default_ward(), "unparseable ward, using default schedule");
                self.default_schedule()
            }
        }
    }

    #[must_use]
    pub fn default_ward(&self) -> WardId {
        self.default_schedule().ward()
    }

    #[must_use]
    pub fn default_schedule(&self) -> &WardSchedule {
        &self.entries[self.default_index]
    }

    /// Days of the month on which `ward` collects.
    #[must_use]
    pub fn list_pickup_days_in_month(&self, ward: WardId, year: i32, month: Month) -> Vec<u32> {
        pickup_days_in_month(self.schedule(ward), year, month)
    }

    #[must_use]
    pub fn is_pickup_on(&self, ward: WardId, date: NaiveDate) -> bool {
        self.schedule(ward).has_pickup_on(date.weekday())
    }

    /// Checks against the local calendar date.
    #[must_use]
    pub fn is_pickup_today(&self, ward: WardId) -> bool {
        self.is_pickup_on(ward, Local::now().date_naive())
    }

    /// Wards collecting on `date`, ascending.
    #[must_use]
    pub fn pickups_on(&self, date: NaiveDate) -> Vec<&WardSchedule> {
        self.entries
            .iter()
            .filter(|s| s.has_pickup_on(date.weekday()))
            .collect()
    }

    pub fn wards(&self) -> impl Iterator<Item = &WardSchedule> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn minutes(value: u16) -> ScheduleResult<ClockTime> {
    ClockTime::from_minutes(value).ok_or_else(|| ScheduleError::InvalidTime(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ward(n: u8) -> WardId {
        WardId::new(n).unwrap()
    }

    #[test]
    fn test_builtin_covers_all_wards() {
        let catalog = WardCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 33);
        for n in 1..=33 {
            assert!(catalog.lookup(ward(n)).is_some(), "missing Ward {n}");
        }
    }

    #[test]
    fn test_every_ward_has_three_distinct_days() {
        let catalog = WardCatalog::builtin().unwrap();
        for schedule in catalog.wards() {
            let days: HashSet<u8> = schedule.pickup_days().into_iter().collect();
            assert_eq!(days.len(), 3, "{}", schedule.ward());
            assert!(days.iter().all(|&d| d <= 6));
            assert!(!schedule.time_slot().to_string().is_empty());
        }
    }

    #[test]
    fn test_known_ward_days() {
        let catalog = WardCatalog::builtin().unwrap();
        assert_eq!(catalog.schedule(ward(2)).pickup_days(), [1, 3, 5]);
        assert_eq!(catalog.schedule(ward(13)).pickup_days(), [0, 3, 5]);
    }

    #[test]
    fn test_unknown_ward_falls_back_to_default() {
        let catalog = WardCatalog::builtin().unwrap();
        let fallback = catalog.schedule(ward(99));
        let default = catalog.schedule(ward(1));
        assert!(std::ptr::eq(fallback, default));
        assert!(catalog.lookup(ward(99)).is_none());
        assert!(std::ptr::eq(catalog.schedule_by_label("Ward Ninety"), default));
        assert_eq!(catalog.schedule_by_label("ward 13").ward(), ward(13));
    }

    #[test]
    fn test_leap_february() {
        let catalog = WardCatalog::builtin().unwrap();
        // Ward 2 collects Mon/Wed/Fri. Feb 29 2024 was a Thursday; Feb 28 2024 a Wednesday.
        let leap = catalog.list_pickup_days_in_month(ward(2), 2024, Month::February);
        assert_eq!(leap, vec![2, 5, 7, 9, 12, 14, 16, 19, 21, 23, 26, 28]);

        // Ward 1 collects Sun/Tue/Thu, so Feb 29 2024 is included.
        let leap = catalog.list_pickup_days_in_month(ward(1), 2024, Month::February);
        assert_eq!(leap.last(), Some(&29));

        // Feb 2023 ends on a Tuesday (28th).
        let plain = catalog.list_pickup_days_in_month(ward(1), 2023, Month::February);
        assert_eq!(plain.last(), Some(&28));
        assert!(plain.iter().all(|&d| d <= 28));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, Month::February), Some(29));
        assert_eq!(days_in_month(2023, Month::February), Some(28));
        assert_eq!(days_in_month(1900, Month::February), Some(28));
        assert_eq!(days_in_month(2000, Month::February), Some(29));
        assert_eq!(days_in_month(2024, Month::April), Some(30));
        assert_eq!(days_in_month(2024, Month::December), Some(31));
    }

    #[test]
    fn test_month_listing_contains_every_pickup_date() {
        let catalog = WardCatalog::builtin().unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for schedule in catalog.wards() {
            for offset in 0..400 {
                let date = start + chrono::Duration::days(offset);
                if !schedule.has_pickup_on(date.weekday()) {
                    continue;
                }
                let month = Month::try_from(u8::try_from(date.month()).unwrap()).unwrap();
                let days = pickup_days_in_month(schedule, date.year(), month);
                assert!(days.contains(&date.day()), "{} {date}", schedule.ward());
            }
        }
    }

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(0), Some("Sunday"));
        assert_eq!(day_name(6), Some("Saturday"));
        assert_eq!(day_name(7), None);
    }

    #[test]
    fn test_pickups_on_date() {
        let catalog = WardCatalog::builtin().unwrap();
        // 2024-03-12 is a Tuesday.
        let date = NaiveDate::from_ymd_opt(2024, 3, 12).unwrap();
        let wards: Vec<_> = catalog.pickups_on(date).iter().map(|s| s.ward()).collect();
        assert!(wards.contains(&ward(1)));
        assert!(!wards.contains(&ward(2)));
        assert!(!wards.contains(&ward(13)));
        assert!(catalog.is_pickup_on(ward(1), date));
    }

    #[test]
    fn test_parse_rejects_duplicates_and_missing_default() {
        let json = r#"[
            {"ward": "Ward 4", "pickupDays": [1, 3, 5], "timeSlot": "6:00 AM - 8:00 AM", "vehicleId": "V", "driverName": "D"},
            {"ward": "4", "pickupDays": [0, 2, 4], "timeSlot": "6:00 AM - 8:00 AM", "vehicleId": "V", "driverName": "D"}
        ]"#;
        assert!(matches!(
            WardCatalog::parse(json, ward(4)),
            Err(ScheduleError::DuplicateWard(_))
        ));

        let json = r#"[
            {"ward": "Ward 4", "pickupDays": [1, 3, 5], "timeSlot": "6:00 AM - 8:00 AM", "vehicleId": "V", "driverName": "D"}
        ]"#;
        assert!(matches!(
            WardCatalog::parse(json, ward(1)),
            Err(ScheduleError::MissingDefaultWard(_))
        ));
    }

    #[test]
    fn test_parse_rejects_wrong_day_count() {
        let json = r#"[
            {"ward": "Ward 1", "pickupDays": [1, 3], "timeSlot": "6:00 AM - 8:00 AM", "vehicleId": "V", "driverName": "D"}
        ]"#;
        assert!(matches!(
            WardCatalog::parse(json, ward(1)),
            Err(ScheduleError::InvalidPickupDays { .. })
        ));
    }
}
