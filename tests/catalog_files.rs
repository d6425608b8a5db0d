//! End-to-end checks for file-backed config, catalogs and feeds.

use chrono::{Month, NaiveDateTime};
use std::fs;
use sweep::config::SweepConfig;
use sweep::engine::board::DailyBoard;
use sweep::engine::feed::load_records;
use sweep::engine::resolver::TaskStatusResolver;
use sweep::engine::types::{ResolvedStatus, TaskStatus, WardId};
use tempfile::TempDir;

const CATALOG: &str = r#"[
    {"ward": "Ward 1", "pickupDays": [0, 2, 4], "timeSlot": "6:00 AM - 8:00 AM", "vehicleId": "GA 1 JA 1101", "driverName": "Ram"},
    {"ward": "Ward 2", "pickupDays": [5, 1, 3], "timeSlot": "7:30 AM - 9:30 AM", "vehicleId": "GA 1 JA 1102", "driverName": "Sita"}
]"#;

fn at(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn ward(n: u8) -> WardId {
    WardId::new(n).unwrap()
}

#[test]
fn config_roundtrips_through_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".sweep").join("config.toml");

    let config = SweepConfig {
        upcoming_count: 5,
        ..SweepConfig::default()
    };
    config.save(&path).unwrap();

    assert_eq!(SweepConfig::load(&path).unwrap(), config);
}

#[test]
fn missing_config_means_defaults() {
    let dir = TempDir::new().unwrap();
    let config = SweepConfig::load_or_default(&dir.path().join("nope.toml")).unwrap();
    assert_eq!(config, SweepConfig::default());
    assert_eq!(config.catalog().unwrap().len(), 33);
}

#[test]
fn malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "upcoming_count = \"many\"").unwrap();
    assert!(SweepConfig::load(&path).is_err());
}

#[test]
fn configured_catalog_replaces_builtin() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("wards.json");
    fs::write(&catalog_path, CATALOG).unwrap();

    let config = SweepConfig {
        catalog: Some(catalog_path),
        ..SweepConfig::default()
    };
    let catalog = config.catalog().unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.schedule(ward(2)).pickup_days(), [1, 3, 5]);
    assert_eq!(catalog.schedule(ward(2)).time_slot().to_string(), "7:30 AM - 9:30 AM");

    // Ward 13 is not in this catalog, so Ward 1 stands in.
    assert_eq!(catalog.schedule(ward(13)).ward(), ward(1));

    // March 2024 starts on a Friday.
    let days = catalog.list_pickup_days_in_month(ward(2), 2024, Month::March);
    assert_eq!(&days[..4], &[1, 4, 6, 8]);

    let resolver = TaskStatusResolver::new(&catalog);
    // Monday 2024-03-11, slot ends 9:30.
    assert_eq!(
        resolver.resolve(ward(2), TaskStatus::InProgress, at("2024-03-11 09:30")),
        ResolvedStatus::InProgress
    );
    assert_eq!(
        resolver.resolve(ward(2), TaskStatus::InProgress, at("2024-03-11 09:31")),
        ResolvedStatus::Overdue
    );
}

#[test]
fn invalid_catalog_entry_is_rejected() {
    let dir = TempDir::new().unwrap();
    let catalog_path = dir.path().join("wards.json");
    fs::write(
        &catalog_path,
        r#"[{"ward": "Ward 1", "pickupDays": [0, 2, 2], "timeSlot": "6:00 AM - 8:00 AM", "vehicleId": "V", "driverName": "D"}]"#,
    )
    .unwrap();

    let config = SweepConfig {
        catalog: Some(catalog_path),
        ..SweepConfig::default()
    };
    assert!(config.catalog().is_err());
}

#[test]
fn feed_file_drives_the_board() {
    let dir = TempDir::new().unwrap();
    let feed_path = dir.path().join("feed.json");
    fs::write(
        &feed_path,
        r#"[
            {"ward": "Ward 1", "status": "completed", "date": "2024-03-12"},
            {"ward": "Ward 3", "status": "in-progress", "timeSlot": "7:00 AM - 9:00 AM", "date": "2024-03-12"},
            {"ward": "Ward 5", "status": "scheduled", "timeSlot": "not a slot", "date": "2024-03-12"}
        ]"#,
    )
    .unwrap();

    let catalog = SweepConfig::default().catalog().unwrap();
    let records = load_records(&feed_path).unwrap();
    // Tuesday evening: every open task on a pickup day is past its slot.
    let board = DailyBoard::build(&catalog, &records, at("2024-03-12 18:00"));

    let status_of = |n: u8| board.rows().iter().find(|r| r.ward.number() == n).map(|r| r.status);
    assert_eq!(status_of(1), Some(ResolvedStatus::Completed));
    assert_eq!(status_of(3), Some(ResolvedStatus::Overdue));
    // Malformed slot label: overdue check skipped.
    assert_eq!(status_of(5), Some(ResolvedStatus::Scheduled));
    // Ward 2 does not collect on Tuesdays.
    assert_eq!(status_of(2), Some(ResolvedStatus::NoPickup));

    let counts = board.status_counts();
    assert_eq!(counts.total(), 33);
    assert_eq!(counts.completed, 1);
    assert!(board.attention().iter().all(|r| r.status == ResolvedStatus::Overdue));
}
