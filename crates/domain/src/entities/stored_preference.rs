//! Stored preference - a server-persisted preference for one cell of one resource
//!
//! By the time a record is a `StoredPreference` its boolean flags have been
//! decoded into a single [`ActivePreference`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{PeriodId, PreferenceId};
use crate::value_objects::{ActivePreference, CellAddress, DayOfWeek, PreferenceType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPreference {
    pub id: PreferenceId,
    pub period_id: PeriodId,
    pub day: DayOfWeek,
    pub active: ActivePreference,
    /// Soft-deleted records stay around but never render.
    pub is_deleted: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredPreference {
    pub fn new(
        id: PreferenceId,
        period_id: PeriodId,
        day: DayOfWeek,
        preference_type: PreferenceType,
    ) -> Self {
        Self {
            id,
            period_id,
            day,
            active: ActivePreference::of(preference_type),
            is_deleted: false,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.period_id, self.day)
    }

    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }

    /// Type to render, `None` for soft-deleted or flagless records.
    pub fn effective_type(&self) -> Option<PreferenceType> {
        if self.is_deleted {
            None
        } else {
            self.active.kind
        }
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self.updated_at = Some(updated_at);
        self
    }

    pub fn soft_deleted(mut self) -> Self {
        self.is_deleted = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_deleted_records_have_no_effective_type() {
        let pref = StoredPreference::new(
            PreferenceId::new(),
            PeriodId::new(),
            DayOfWeek::Monday,
            PreferenceType::MustSchedule,
        );
        assert_eq!(pref.effective_type(), Some(PreferenceType::MustSchedule));
        let deleted = pref.soft_deleted();
        assert!(!deleted.is_live());
        assert_eq!(deleted.effective_type(), None);
    }

    #[test]
    fn address_matches_period_and_day() {
        let period = PeriodId::new();
        let pref = StoredPreference::new(
            PreferenceId::new(),
            period,
            DayOfWeek::Friday,
            PreferenceType::Prefers,
        );
        assert_eq!(pref.address(), CellAddress::new(period, DayOfWeek::Friday));
    }
}
