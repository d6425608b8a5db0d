//! Ward pickup schedules and collection task status.
//!
//! The `engine` holds the schedule catalog and the status resolver; `config`
//! decides which catalog and defaults the CLI runs with.

pub mod config;
pub mod engine;
