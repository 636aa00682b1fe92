//! Battery device discovery for Home Assistant
//!
//! Reads all entity states from the Home Assistant REST API, picks out the
//! battery sensors, groups them by device family and produces a report,
//! configuration snippets, alert automations and notifications.

pub mod config;
pub mod discovery;
pub mod generator;
pub mod hub;
pub mod models;
pub mod notify;
pub mod output;
pub mod runner;

use chrono::NaiveDateTime;

// Re-export common types for easier access
pub use config::Config;
pub use hub::{HaHttpClient, HubClient};
pub use models::{BatteryRecord, BatteryStatus, CategorizedDevices, Category};
pub use runner::{run_discovery, RunOutcome};

/// Timestamp used in the names of all files of one run
pub fn run_timestamp(at: &NaiveDateTime) -> String {
    return at.format("%Y%m%d_%H%M%S").to_string();
}

pub fn display_time(at: &NaiveDateTime) -> String {
    return at.format("%Y-%m-%d %H:%M:%S").to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_timestamps() {
        let at = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap().and_hms_opt(23, 5, 9).unwrap();
        assert_eq!(run_timestamp(&at), "20251201_230509");
        assert_eq!(display_time(&at), "2025-12-01 23:05:09");
    }
}
