//! Simple test fixtures used across unit and integration tests.

use chrono::NaiveTime;
use timetabler_domain::{DayOfWeek, Period};

use crate::ports::outbound::ApiError;

pub fn api_request_failed(msg: &str) -> ApiError {
    ApiError::RequestFailed(msg.to_string())
}

/// A school morning: `count` 45-minute periods starting at 08:00, with a
/// 5-minute changeover between them.
pub fn morning_periods(count: u32) -> Vec<Period> {
    (0..count)
        .filter_map(|i| {
            let start_minutes = 8 * 60 + i * 50;
            let end_minutes = start_minutes + 45;
            let start = NaiveTime::from_hms_opt(start_minutes / 60, start_minutes % 60, 0)?;
            let end = NaiveTime::from_hms_opt(end_minutes / 60, end_minutes % 60, 0)?;
            Some(Period::new(format!("P{}", i + 1), i + 1, start, end))
        })
        .collect()
}

pub fn school_week() -> Vec<DayOfWeek> {
    DayOfWeek::first_n(5)
}
