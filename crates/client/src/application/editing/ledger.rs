//! Pending-change ledger
//!
//! Ordered collection of proposed, unpersisted mutations. Holds at most one
//! entry per cell address: a later edit to the same cell replaces the earlier
//! entry in place, keeping its original position.

use serde::Serialize;
use timetabler_domain::{CellAddress, PreferenceType, StoredPreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeOperation {
    Create,
    Update,
    Delete,
}

impl ChangeOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingChange {
    pub operation: ChangeOperation,
    pub cell: CellAddress,
    /// `None` clears the cell
    pub new_preference_type: Option<PreferenceType>,
    /// The stored record this change modifies, if any
    pub existing: Option<StoredPreference>,
}

impl PendingChange {
    /// A create that ends up clearing the cell has nothing to send.
    pub fn is_noop(&self) -> bool {
        self.operation == ChangeOperation::Create && self.new_preference_type.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Clearing a cell that has nothing to clear
    Ignored,
    Added,
    Replaced,
}

#[derive(Debug, Clone, Default)]
pub struct PendingChangeLedger {
    entries: Vec<PendingChange>,
}

impl PendingChangeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a proposed change for `cell`.
    ///
    /// `existing` is the live stored preference for the cell, if any. The
    /// operation is CREATE without a stored record, UPDATE when a type is
    /// proposed over one, DELETE when clearing one.
    pub fn record_change(
        &mut self,
        cell: CellAddress,
        proposed: Option<PreferenceType>,
        existing: Option<&StoredPreference>,
    ) -> RecordOutcome {
        let position = self.position(&cell);

        if proposed.is_none() && existing.is_none() && position.is_none() {
            return RecordOutcome::Ignored;
        }

        let operation = match (existing, proposed) {
            (None, _) => ChangeOperation::Create,
            (Some(_), Some(_)) => ChangeOperation::Update,
            (Some(_), None) => ChangeOperation::Delete,
        };

        let change = PendingChange {
            operation,
            cell,
            new_preference_type: proposed,
            existing: existing.cloned(),
        };

        match position {
            Some(index) => {
                self.entries[index] = change;
                RecordOutcome::Replaced
            }
            None => {
                self.entries.push(change);
                RecordOutcome::Added
            }
        }
    }

    /// Drop every pending change. Returns how many were dropped.
    pub fn discard_all(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        dropped
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, cell: &CellAddress) -> Option<&PendingChange> {
        self.entries.iter().find(|e| e.cell == *cell)
    }

    pub fn remove(&mut self, cell: &CellAddress) -> Option<PendingChange> {
        self.position(cell).map(|index| self.entries.remove(index))
    }

    pub fn entries(&self) -> &[PendingChange] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingChange> {
        self.entries.iter()
    }

    fn position(&self, cell: &CellAddress) -> Option<usize> {
        self.entries.iter().position(|e| e.cell == *cell)
    }
}
