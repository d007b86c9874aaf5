//! In-memory cache of the selected resource's stored preferences, keyed by
//! cell address.

use std::collections::HashMap;

use timetabler_domain::{CellAddress, PreferenceId, StoredPreference};

#[derive(Debug, Clone, Default)]
pub struct StoredPreferenceIndex {
    by_cell: HashMap<CellAddress, StoredPreference>,
}

impl StoredPreferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a backend listing.
    ///
    /// When a cell has several records, a live one beats a soft-deleted one
    /// and among equals the most recently updated wins.
    pub fn from_records(records: impl IntoIterator<Item = StoredPreference>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.upsert(record);
        }
        index
    }

    pub fn upsert(&mut self, record: StoredPreference) {
        let address = record.address();
        let replace = match self.by_cell.get(&address) {
            None => true,
            Some(current) if current.id == record.id => true,
            Some(current) => match (current.is_live(), record.is_live()) {
                (false, true) => true,
                (true, false) => false,
                _ => record.updated_at >= current.updated_at,
            },
        };
        if replace {
            self.by_cell.insert(address, record);
        }
    }

    /// Unconditionally make `record` the one for its cell (server results).
    pub fn replace(&mut self, record: StoredPreference) {
        self.by_cell.insert(record.address(), record);
    }

    /// Flag a record as soft-deleted, as the server does on DELETE.
    pub fn mark_deleted(&mut self, id: PreferenceId) -> bool {
        match self.by_cell.values_mut().find(|r| r.id == id) {
            Some(record) => {
                record.is_deleted = true;
                true
            }
            None => false,
        }
    }

    /// The live record for a cell. Soft-deleted records are invisible here.
    pub fn live(&self, cell: &CellAddress) -> Option<&StoredPreference> {
        self.by_cell.get(cell).filter(|r| r.is_live())
    }

    pub fn get(&self, cell: &CellAddress) -> Option<&StoredPreference> {
        self.by_cell.get(cell)
    }

    pub fn live_count(&self) -> usize {
        self.by_cell.values().filter(|r| r.is_live()).count()
    }

    pub fn len(&self) -> usize {
        self.by_cell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_cell.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoredPreference> {
        self.by_cell.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use timetabler_domain::{DayOfWeek, PeriodId, PreferenceType};

    fn record(period: PeriodId, preference_type: PreferenceType) -> StoredPreference {
        StoredPreference::new(PreferenceId::new(), period, DayOfWeek::Monday, preference_type)
    }

    #[test]
    fn live_record_beats_soft_deleted_duplicate() {
        let period = PeriodId::new();
        let deleted = record(period, PreferenceType::MustSchedule).soft_deleted();
        let live = record(period, PreferenceType::Prefers);

        let index = StoredPreferenceIndex::from_records([live.clone(), deleted]);
        assert_eq!(index.live(&live.address()), Some(&live));
    }

    #[test]
    fn newer_record_wins_between_live_duplicates() {
        let period = PeriodId::new();
        let older = record(period, PreferenceType::MustSchedule).with_timestamps(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let newer = record(period, PreferenceType::PreferNot).with_timestamps(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        );

        let index = StoredPreferenceIndex::from_records([newer.clone(), older]);
        assert_eq!(index.live(&newer.address()).unwrap().id, newer.id);
    }

    #[test]
    fn mark_deleted_hides_the_record() {
        let pref = record(PeriodId::new(), PreferenceType::Prefers);
        let mut index = StoredPreferenceIndex::from_records([pref.clone()]);

        assert!(index.mark_deleted(pref.id));
        assert!(index.live(&pref.address()).is_none());
        assert!(index.get(&pref.address()).is_some());
        assert_eq!(index.live_count(), 0);
        assert!(!index.mark_deleted(PreferenceId::new()));
    }
}
