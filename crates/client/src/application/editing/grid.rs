//! Grid render model
//!
//! Projects periods × days into rows of cells and resolves which preference
//! each cell shows. Rendering is a pure function of its inputs.

use serde::Serialize;
use std::collections::BTreeSet;

use timetabler_domain::{sort_periods, CellAddress, DayOfWeek, Period, PeriodId, PreferenceType};

use super::ledger::{ChangeOperation, PendingChangeLedger};
use super::stored_index::StoredPreferenceIndex;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub address: CellAddress,
    pub day: DayOfWeek,
    /// What the cell shows
    pub active: Option<PreferenceType>,
    /// What the server has, ignoring pending edits
    pub stored: Option<PreferenceType>,
    pub pending: Option<ChangeOperation>,
    pub selected: bool,
    /// False when the period doesn't exist on this day
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub period: Period,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceGrid {
    pub days: Vec<DayOfWeek>,
    pub rows: Vec<GridRow>,
}

impl PreferenceGrid {
    pub fn cell(&self, period_id: PeriodId, day: DayOfWeek) -> Option<&GridCell> {
        self.rows
            .iter()
            .find(|row| row.period.id == period_id)
            .and_then(|row| row.cells.iter().find(|c| c.day == day))
    }

    pub fn active_at(&self, period_id: PeriodId, day: DayOfWeek) -> Option<PreferenceType> {
        self.cell(period_id, day).and_then(|c| c.active)
    }

    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.rows.iter().flat_map(|row| row.cells.iter())
    }
}

/// Resolve a cell's displayed preference.
///
/// A pending change always wins, even when it matches what's stored or
/// clears the cell. Otherwise the live stored preference shows.
pub fn resolve_active(
    address: &CellAddress,
    stored: &StoredPreferenceIndex,
    ledger: &PendingChangeLedger,
) -> Option<PreferenceType> {
    match ledger.get(address) {
        Some(change) => change.new_preference_type,
        None => stored.live(address).and_then(|r| r.effective_type()),
    }
}

pub fn render_grid(
    periods: &[Period],
    days: &[DayOfWeek],
    stored: &StoredPreferenceIndex,
    ledger: &PendingChangeLedger,
    selected: &BTreeSet<CellAddress>,
) -> PreferenceGrid {
    let mut periods = periods.to_vec();
    sort_periods(&mut periods);

    let rows = periods
        .into_iter()
        .map(|period| {
            let cells = days
                .iter()
                .map(|&day| {
                    let address = CellAddress::new(period.id, day);
                    GridCell {
                        address,
                        day,
                        active: resolve_active(&address, stored, ledger),
                        stored: stored.live(&address).and_then(|r| r.effective_type()),
                        pending: ledger.get(&address).map(|c| c.operation),
                        selected: selected.contains(&address),
                        available: period.applies_on(day),
                    }
                })
                .collect();
            GridRow { period, cells }
        })
        .collect();

    PreferenceGrid {
        days: days.to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use timetabler_domain::{PreferenceId, StoredPreference};

    fn period(name: &str, order: u32) -> Period {
        Period::new(
            name,
            order,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 45, 0).unwrap(),
        )
    }

    fn stored_at(period: &Period, day: DayOfWeek, t: PreferenceType) -> StoredPreference {
        StoredPreference::new(PreferenceId::new(), period.id, day, t)
    }

    #[test]
    fn stored_preference_renders_when_nothing_is_pending() {
        let p1 = period("P1", 1);
        let stored =
            StoredPreferenceIndex::from_records([stored_at(&p1, DayOfWeek::Monday, PreferenceType::MustSchedule)]);
        let grid = render_grid(
            &[p1.clone()],
            &DayOfWeek::first_n(5),
            &stored,
            &PendingChangeLedger::new(),
            &BTreeSet::new(),
        );
        assert_eq!(grid.active_at(p1.id, DayOfWeek::Monday), Some(PreferenceType::MustSchedule));
        assert_eq!(grid.active_at(p1.id, DayOfWeek::Tuesday), None);
        assert_eq!(grid.cells().count(), 5);
    }

    #[test]
    fn pending_change_overrides_stored_even_when_clearing() {
        let p1 = period("P1", 1);
        let pref = stored_at(&p1, DayOfWeek::Monday, PreferenceType::MustSchedule);
        let stored = StoredPreferenceIndex::from_records([pref.clone()]);
        let mut ledger = PendingChangeLedger::new();
        ledger.record_change(pref.address(), None, Some(&pref));

        let grid = render_grid(&[p1.clone()], &[DayOfWeek::Monday], &stored, &ledger, &BTreeSet::new());
        let cell = grid.cell(p1.id, DayOfWeek::Monday).unwrap();
        assert_eq!(cell.active, None);
        assert_eq!(cell.stored, Some(PreferenceType::MustSchedule));
        assert_eq!(cell.pending, Some(ChangeOperation::Delete));
    }

    #[test]
    fn pending_change_equal_to_stored_still_marks_pending() {
        let p1 = period("P1", 1);
        let pref = stored_at(&p1, DayOfWeek::Monday, PreferenceType::Prefers);
        let stored = StoredPreferenceIndex::from_records([pref.clone()]);
        let mut ledger = PendingChangeLedger::new();
        ledger.record_change(pref.address(), Some(PreferenceType::Prefers), Some(&pref));

        let grid = render_grid(&[p1.clone()], &[DayOfWeek::Monday], &stored, &ledger, &BTreeSet::new());
        let cell = grid.cell(p1.id, DayOfWeek::Monday).unwrap();
        assert_eq!(cell.active, Some(PreferenceType::Prefers));
        assert_eq!(cell.pending, Some(ChangeOperation::Update));
    }

    #[test]
    fn soft_deleted_records_render_empty() {
        let p1 = period("P1", 1);
        let pref = stored_at(&p1, DayOfWeek::Monday, PreferenceType::Prefers).soft_deleted();
        let stored = StoredPreferenceIndex::from_records([pref]);
        let grid = render_grid(
            &[p1.clone()],
            &[DayOfWeek::Monday],
            &stored,
            &PendingChangeLedger::new(),
            &BTreeSet::new(),
        );
        assert_eq!(grid.active_at(p1.id, DayOfWeek::Monday), None);
    }

    #[test]
    fn discarding_restores_the_stored_grid() {
        let p1 = period("P1", 1);
        let pref = stored_at(&p1, DayOfWeek::Wednesday, PreferenceType::PreferNot);
        let stored = StoredPreferenceIndex::from_records([pref.clone()]);
        let days = DayOfWeek::first_n(5);
        let mut ledger = PendingChangeLedger::new();
        let before = render_grid(&[p1.clone()], &days, &stored, &ledger, &BTreeSet::new());

        ledger.record_change(pref.address(), Some(PreferenceType::Prefers), Some(&pref));
        ledger.record_change(
            CellAddress::new(p1.id, DayOfWeek::Monday),
            Some(PreferenceType::MustNotSchedule),
            None,
        );
        assert_ne!(render_grid(&[p1.clone()], &days, &stored, &ledger, &BTreeSet::new()), before);

        ledger.discard_all();
        assert_eq!(render_grid(&[p1], &days, &stored, &ledger, &BTreeSet::new()), before);
    }

    #[test]
    fn rows_follow_period_order_and_mark_unavailable_days() {
        let late = period("P2", 2);
        let early = period("P1", 1).with_days([DayOfWeek::Monday]);
        let grid = render_grid(
            &[late, early.clone()],
            &[DayOfWeek::Monday, DayOfWeek::Tuesday],
            &StoredPreferenceIndex::new(),
            &PendingChangeLedger::new(),
            &BTreeSet::new(),
        );
        assert_eq!(grid.rows[0].period.name, "P1");
        assert!(grid.cell(early.id, DayOfWeek::Monday).unwrap().available);
        assert!(!grid.cell(early.id, DayOfWeek::Tuesday).unwrap().available);
    }

    #[test]
    fn rendering_is_idempotent() {
        let p1 = period("P1", 1);
        let mut ledger = PendingChangeLedger::new();
        ledger.record_change(
            CellAddress::new(p1.id, DayOfWeek::Friday),
            Some(PreferenceType::Prefers),
            None,
        );
        let selected = BTreeSet::from([CellAddress::new(p1.id, DayOfWeek::Friday)]);
        let stored = StoredPreferenceIndex::new();
        let days = DayOfWeek::first_n(5);
        let first = render_grid(&[p1.clone()], &days, &stored, &ledger, &selected);
        let second = render_grid(&[p1.clone()], &days, &stored, &ledger, &selected);
        assert_eq!(first, second);
        assert!(first.cell(p1.id, DayOfWeek::Friday).unwrap().selected);
    }
}
