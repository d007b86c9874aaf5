//! Commit/discard controller
//!
//! Turns the pending-change ledger into backend calls. A commit runs in three
//! steps so that a view holding the session behind a lock can release it
//! while requests are in flight:
//!
//! 1. [`CommitController::begin`] snapshots the ledger and enters `Committing`
//! 2. [`CommitBatch::submit`] issues one request per entry
//! 3. [`CommitController::finish`] reconciles the report and returns to `Idle`
//!
//! Entries are independent. A failed request never stops the rest of the
//! batch and nothing is rolled back: the batch has no atomicity, entries
//! that succeeded stay committed even when their neighbours fail.

use futures_util::future::join_all;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use timetabler_domain::{CellAddress, PreferenceId, ResourceRef, StoredPreference};

use super::ledger::{ChangeOperation, PendingChange, PendingChangeLedger};
use super::stored_index::StoredPreferenceIndex;
use crate::application::ports::{PreferencePort, PreferenceWrite};
use crate::application::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitStrategy {
    /// One request at a time, in ledger order
    #[default]
    Sequential,
    /// All requests issued concurrently
    Parallel,
}

impl fmt::Display for CommitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitStrategy::Sequential => write!(f, "sequential"),
            CommitStrategy::Parallel => write!(f, "parallel"),
        }
    }
}

impl FromStr for CommitStrategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" | "serial" | "seq" => Ok(CommitStrategy::Sequential),
            "parallel" | "concurrent" | "par" => Ok(CommitStrategy::Parallel),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitPhase {
    #[default]
    Idle,
    Committing,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("A commit is already in flight")]
    InFlight,
    #[error("Nothing to commit")]
    NothingToCommit,
    #[error("No commit in flight")]
    NotCommitting,
}

/// What the backend did for one successfully committed entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryResult {
    Created(StoredPreference),
    Updated(StoredPreference),
    Deleted(PreferenceId),
    /// Nothing needed sending (a create that was cleared again)
    Skipped,
}

#[derive(Debug, Clone)]
pub struct CommitSuccess {
    pub change: PendingChange,
    pub result: EntryResult,
}

#[derive(Debug, Clone)]
pub struct CommitFailure {
    pub change: PendingChange,
    pub error: ServiceError,
}

#[derive(Debug, Clone, Default)]
pub struct CommitReport {
    pub succeeded: Vec<CommitSuccess>,
    pub failed: Vec<CommitFailure>,
}

impl CommitReport {
    pub fn succeeded_cells(&self) -> Vec<CellAddress> {
        self.succeeded.iter().map(|s| s.change.cell).collect()
    }

    pub fn failed_cells(&self) -> Vec<CellAddress> {
        self.failed.iter().map(|f| f.change.cell).collect()
    }

    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// A snapshot of the ledger ready to be sent.
pub struct CommitBatch {
    resource: ResourceRef,
    changes: Vec<PendingChange>,
    strategy: CommitStrategy,
    port: Arc<dyn PreferencePort>,
}

impl CommitBatch {
    pub fn resource(&self) -> ResourceRef {
        self.resource
    }

    pub fn changes(&self) -> &[PendingChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Send every entry. Never fails as a whole; see the report.
    pub async fn submit(self) -> CommitReport {
        let port = self.port.as_ref();
        let resource = self.resource;

        let results: Vec<Result<EntryResult, ServiceError>> = match self.strategy {
            CommitStrategy::Sequential => {
                let mut results = Vec::with_capacity(self.changes.len());
                for change in &self.changes {
                    results.push(submit_one(port, resource, change).await);
                }
                results
            }
            CommitStrategy::Parallel => {
                join_all(
                    self.changes
                        .iter()
                        .map(|change| submit_one(port, resource, change)),
                )
                .await
            }
        };

        let mut report = CommitReport::default();
        for (change, result) in self.changes.into_iter().zip(results) {
            match result {
                Ok(result) => report.succeeded.push(CommitSuccess { change, result }),
                Err(error) => {
                    tracing::warn!(
                        resource = %resource,
                        cell = %change.cell,
                        operation = change.operation.as_str(),
                        error = %error,
                        "Preference change failed"
                    );
                    report.failed.push(CommitFailure { change, error });
                }
            }
        }
        report
    }
}

async fn submit_one(
    port: &dyn PreferencePort,
    resource: ResourceRef,
    change: &PendingChange,
) -> Result<EntryResult, ServiceError> {
    let period_id = change.cell.period_id();
    let day = change.cell.day();

    match (change.operation, change.new_preference_type, &change.existing) {
        (ChangeOperation::Create, None, _) => Ok(EntryResult::Skipped),
        (ChangeOperation::Create, Some(preference_type), _) => port
            .create(resource, PreferenceWrite::set(period_id, day, preference_type))
            .await
            .map(EntryResult::Created),
        (ChangeOperation::Update, Some(preference_type), Some(existing)) => port
            .update(
                resource,
                existing.id,
                PreferenceWrite::set(period_id, day, preference_type),
            )
            .await
            .map(EntryResult::Updated),
        (ChangeOperation::Delete, _, Some(existing)) => port
            .delete(resource, existing.id)
            .await
            .map(|()| EntryResult::Deleted(existing.id)),
        (operation, _, _) => Err(ServiceError::invalid(format!(
            "{} for {} is missing its stored preference",
            operation.as_str(),
            change.cell
        ))),
    }
}

#[derive(Debug, Default)]
pub struct CommitController {
    phase: CommitPhase,
}

impl CommitController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CommitPhase {
        self.phase
    }

    pub fn is_committing(&self) -> bool {
        self.phase == CommitPhase::Committing
    }

    /// Snapshot the ledger and enter `Committing`.
    pub fn begin(
        &mut self,
        resource: ResourceRef,
        ledger: &PendingChangeLedger,
        strategy: CommitStrategy,
        port: Arc<dyn PreferencePort>,
    ) -> Result<CommitBatch, CommitError> {
        if self.is_committing() {
            return Err(CommitError::InFlight);
        }
        if ledger.is_empty() {
            return Err(CommitError::NothingToCommit);
        }
        self.phase = CommitPhase::Committing;
        tracing::info!(
            resource = %resource,
            changes = ledger.count(),
            strategy = %strategy,
            "Committing preference changes"
        );
        Ok(CommitBatch {
            resource,
            changes: ledger.entries().to_vec(),
            strategy,
            port,
        })
    }

    /// Apply a report: succeeded entries leave the ledger and their server
    /// results land in the stored cache; failed entries stay pending.
    pub fn finish(
        &mut self,
        report: &CommitReport,
        ledger: &mut PendingChangeLedger,
        stored: &mut StoredPreferenceIndex,
    ) -> Result<(), CommitError> {
        if !self.is_committing() {
            return Err(CommitError::NotCommitting);
        }
        for success in &report.succeeded {
            ledger.remove(&success.change.cell);
            match &success.result {
                EntryResult::Created(record) | EntryResult::Updated(record) => {
                    stored.replace(record.clone())
                }
                EntryResult::Deleted(id) => {
                    stored.mark_deleted(*id);
                }
                EntryResult::Skipped => {}
            }
        }
        self.phase = CommitPhase::Idle;
        tracing::info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Commit finished"
        );
        Ok(())
    }

    /// Drop all pending changes without touching the backend.
    pub fn discard(&self, ledger: &mut PendingChangeLedger) -> Result<usize, CommitError> {
        if self.is_committing() {
            return Err(CommitError::InFlight);
        }
        Ok(ledger.discard_all())
    }
}
