//! Period entity - a numbered time slot in the school day
//!
//! Periods are reference data owned by the backend; the editor only reads them.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::ids::PeriodId;
use crate::value_objects::DayOfWeek;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub id: PeriodId,
    pub name: String,
    /// Display order, smallest first
    pub order: u32,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Days this period exists on. `None` means every day.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Vec<DayOfWeek>>,
}

impl Period {
    pub fn new(
        name: impl Into<String>,
        order: u32,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: PeriodId::new(),
            name: name.into(),
            order,
            start_time,
            end_time,
            days: None,
        }
    }

    pub fn with_id(mut self, id: PeriodId) -> Self {
        self.id = id;
        self
    }

    pub fn with_days(mut self, days: impl IntoIterator<Item = DayOfWeek>) -> Self {
        self.days = Some(days.into_iter().collect());
        self
    }

    pub fn applies_on(&self, day: DayOfWeek) -> bool {
        self.days
            .as_ref()
            .map_or(true, |days| days.contains(&day))
    }

    /// "08:00-08:45" style label for grid row headers.
    pub fn time_range(&self) -> String {
        format!(
            "{}-{}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }
}

/// Sort periods into display order (ties broken by start time).
pub fn sort_periods(periods: &mut [Period]) {
    periods.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn period_without_days_applies_every_day() {
        let period = Period::new("P1", 1, at(8, 0), at(8, 45));
        assert!(DayOfWeek::ALL.iter().all(|d| period.applies_on(*d)));
    }

    #[test]
    fn restricted_period_applies_only_on_its_days() {
        let period = Period::new("Assembly", 0, at(7, 45), at(8, 0))
            .with_days([DayOfWeek::Monday, DayOfWeek::Friday]);
        assert!(period.applies_on(DayOfWeek::Monday));
        assert!(!period.applies_on(DayOfWeek::Tuesday));
    }

    #[test]
    fn sorts_by_order_then_start() {
        let mut periods = vec![
            Period::new("P2", 2, at(9, 0), at(9, 45)),
            Period::new("P1b", 1, at(8, 30), at(9, 0)),
            Period::new("P1a", 1, at(8, 0), at(8, 30)),
        ];
        sort_periods(&mut periods);
        let names: Vec<_> = periods.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["P1a", "P1b", "P2"]);
    }

    #[test]
    fn deserializes_backend_shape() {
        let json = r#"{
            "id": "6f1c2b1e-3d4a-4b5c-8d9e-0f1a2b3c4d5e",
            "name": "Period 1",
            "order": 1,
            "startTime": "08:00:00",
            "endTime": "08:45:00",
            "days": [1, 2, 3]
        }"#;
        let period: Period = serde_json::from_str(json).unwrap();
        assert_eq!(period.time_range(), "08:00-08:45");
        assert!(!period.applies_on(DayOfWeek::Thursday));
    }
}
