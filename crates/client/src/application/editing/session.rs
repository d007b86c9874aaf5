//! Preference editing session
//!
//! One explicit, owned value holding everything a preference calendar view
//! needs: periods and days, the selected resource and its stored preferences,
//! the paintbrush, highlighted cells, the pending-change ledger and the
//! commit phase. Network failures become notifications and load states; they
//! never reach `render()`.

use std::collections::BTreeSet;
use std::sync::Arc;

use timetabler_domain::catalog::is_allowed;
use timetabler_domain::{
    catalog_for, CellAddress, DayOfWeek, Period, PeriodId, PreferenceOption, PreferenceType,
    ResourceKind, ResourceRef,
};

use super::commit::{CommitBatch, CommitController, CommitError, CommitPhase, CommitReport, CommitStrategy};
use super::grid::{render_grid, resolve_active, PreferenceGrid};
use super::ledger::{PendingChange, PendingChangeLedger, RecordOutcome};
use super::notification::{Notification, NotificationQueue};
use super::stored_index::StoredPreferenceIndex;
use crate::application::ports::{PreferencePort, PreferenceScope};

/// What a cell click paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    Paint(PreferenceType),
    Clear,
}

impl Brush {
    pub fn preference_type(&self) -> Option<PreferenceType> {
        match self {
            Brush::Paint(t) => Some(*t),
            Brush::Clear => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NoResource,
    Loading,
    Ready,
    /// Stored preferences couldn't be fetched; editing disabled until reload
    Failed(String),
}

impl LoadState {
    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("{pending} unsaved preference changes; commit or discard them first")]
    UnsavedChanges { pending: usize },
    #[error("A commit is already in flight")]
    CommitInFlight,
    #[error("Nothing to commit")]
    NothingToCommit,
    #[error("No resource selected")]
    NoResourceSelected,
    #[error("{preference_type} is not available for {kind} preferences")]
    PreferenceNotAllowed {
        kind: ResourceKind,
        preference_type: PreferenceType,
    },
}

impl From<CommitError> for SessionError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::InFlight | CommitError::NotCommitting => SessionError::CommitInFlight,
            CommitError::NothingToCommit => SessionError::NothingToCommit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoResource,
    NoBrush,
    NotLoaded,
    Committing,
    UnknownPeriod,
    DayNotApplicable,
    NothingToClear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Recorded(RecordOutcome),
    Ignored(IgnoreReason),
}

pub struct EditingSession {
    port: Arc<dyn PreferencePort>,
    periods: Vec<Period>,
    days: Vec<DayOfWeek>,
    scope: PreferenceScope,
    strategy: CommitStrategy,

    resource: Option<ResourceRef>,
    load_state: LoadState,
    stored: StoredPreferenceIndex,
    ledger: PendingChangeLedger,
    brush: Option<Brush>,
    selected: BTreeSet<CellAddress>,
    controller: CommitController,
    notifications: NotificationQueue,
}

impl EditingSession {
    pub fn new(port: Arc<dyn PreferencePort>, periods: Vec<Period>, days: Vec<DayOfWeek>) -> Self {
        Self {
            port,
            periods,
            days,
            scope: PreferenceScope::default(),
            strategy: CommitStrategy::default(),
            resource: None,
            load_state: LoadState::NoResource,
            stored: StoredPreferenceIndex::new(),
            ledger: PendingChangeLedger::new(),
            brush: None,
            selected: BTreeSet::new(),
            controller: CommitController::new(),
            notifications: NotificationQueue::default(),
        }
    }

    pub fn with_scope(mut self, scope: PreferenceScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_strategy(mut self, strategy: CommitStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Switch to `resource` and fetch its stored preferences.
    ///
    /// Refused while there are pending changes. Selecting the current
    /// resource again just reloads it.
    pub async fn select_resource(&mut self, resource: ResourceRef) -> Result<(), SessionError> {
        if self.controller.is_committing() {
            return Err(SessionError::CommitInFlight);
        }
        if !self.ledger.is_empty() {
            return Err(SessionError::UnsavedChanges {
                pending: self.ledger.count(),
            });
        }

        if self.resource != Some(resource) {
            tracing::info!(resource = %resource, "Selecting resource");
            self.resource = Some(resource);
            self.brush = None;
            self.selected.clear();
        }
        self.load().await;
        Ok(())
    }

    /// Refetch the selected resource's stored preferences.
    pub async fn reload(&mut self) -> Result<(), SessionError> {
        let resource = self.resource.ok_or(SessionError::NoResourceSelected)?;
        self.select_resource(resource).await
    }

    async fn load(&mut self) {
        let Some(resource) = self.resource else {
            return;
        };
        self.load_state = LoadState::Loading;
        self.stored = StoredPreferenceIndex::new();

        match self.port.list(resource, self.scope).await {
            Ok(records) => {
                self.stored = StoredPreferenceIndex::from_records(records);
                self.load_state = LoadState::Ready;
                tracing::debug!(
                    resource = %resource,
                    live = self.stored.live_count(),
                    "Loaded stored preferences"
                );
            }
            Err(e) => {
                tracing::error!(resource = %resource, error = %e, "Failed to load preferences");
                self.load_state = LoadState::Failed(e.to_string());
                self.notifications.push(Notification::error(format!(
                    "Failed to load {} preferences: {}",
                    resource.kind().display_name(),
                    e
                )));
            }
        }
    }

    /// Set the paintbrush. `None` puts it down.
    pub fn select_preference_type(&mut self, brush: Option<Brush>) -> Result<(), SessionError> {
        if let Some(Brush::Paint(preference_type)) = brush {
            let kind = self
                .resource
                .map(|r| r.kind())
                .ok_or(SessionError::NoResourceSelected)?;
            if !is_allowed(kind, preference_type) {
                return Err(SessionError::PreferenceNotAllowed {
                    kind,
                    preference_type,
                });
            }
        }
        self.brush = brush;
        Ok(())
    }

    /// Paint the cell at (`period_id`, `day`) with the current brush.
    pub fn click_cell(&mut self, period_id: PeriodId, day: DayOfWeek) -> ClickOutcome {
        let outcome = self.try_click(period_id, day);
        if let ClickOutcome::Ignored(reason) = outcome {
            tracing::debug!(period = %period_id, day = %day, ?reason, "Cell click ignored");
        }
        outcome
    }

    fn try_click(&mut self, period_id: PeriodId, day: DayOfWeek) -> ClickOutcome {
        if self.resource.is_none() {
            return ClickOutcome::Ignored(IgnoreReason::NoResource);
        }
        let Some(brush) = self.brush else {
            return ClickOutcome::Ignored(IgnoreReason::NoBrush);
        };
        if !self.load_state.is_ready() {
            return ClickOutcome::Ignored(IgnoreReason::NotLoaded);
        }
        if self.controller.is_committing() {
            return ClickOutcome::Ignored(IgnoreReason::Committing);
        }
        let Some(period) = self.periods.iter().find(|p| p.id == period_id) else {
            return ClickOutcome::Ignored(IgnoreReason::UnknownPeriod);
        };
        if !self.days.contains(&day) || !period.applies_on(day) {
            return ClickOutcome::Ignored(IgnoreReason::DayNotApplicable);
        }

        let cell = CellAddress::new(period_id, day);
        let existing = self.stored.live(&cell);
        match self.ledger.record_change(cell, brush.preference_type(), existing) {
            RecordOutcome::Ignored => ClickOutcome::Ignored(IgnoreReason::NothingToClear),
            recorded => {
                self.selected.insert(cell);
                ClickOutcome::Recorded(recorded)
            }
        }
    }

    /// Snapshot the ledger for submission and enter the committing phase.
    pub fn begin_commit(&mut self) -> Result<CommitBatch, SessionError> {
        let resource = self.resource.ok_or(SessionError::NoResourceSelected)?;
        let batch = self
            .controller
            .begin(resource, &self.ledger, self.strategy, self.port.clone())?;
        Ok(batch)
    }

    /// Reconcile a submitted batch and return to idle.
    pub fn finish_commit(&mut self, report: &CommitReport) -> Result<(), SessionError> {
        self.controller
            .finish(report, &mut self.ledger, &mut self.stored)?;

        for success in &report.succeeded {
            self.selected.remove(&success.change.cell);
        }
        for failure in &report.failed {
            let cell = failure.change.cell;
            self.notifications.push(
                Notification::error(format!(
                    "Failed to save {}: {}",
                    self.describe_cell(&cell),
                    failure.error
                ))
                .for_cell(cell),
            );
        }
        if !report.succeeded.is_empty() {
            self.notifications.push(Notification::success(format!(
                "Saved {} of {} preference changes",
                report.succeeded.len(),
                report.total()
            )));
        }
        Ok(())
    }

    /// Submit every pending change and reconcile the results.
    pub async fn commit(&mut self) -> Result<CommitReport, SessionError> {
        let batch = self.begin_commit()?;
        let report = batch.submit().await;
        self.finish_commit(&report)?;
        Ok(report)
    }

    /// Drop every pending change and highlighted cell. Returns how many
    /// changes were dropped.
    pub fn discard(&mut self) -> Result<usize, SessionError> {
        let dropped = self.controller.discard(&mut self.ledger)?;
        self.selected.clear();
        if dropped > 0 {
            tracing::info!(dropped, "Discarded pending preference changes");
            self.notifications.push(Notification::info(format!(
                "Discarded {dropped} pending changes"
            )));
        }
        Ok(dropped)
    }

    pub fn render(&self) -> PreferenceGrid {
        render_grid(&self.periods, &self.days, &self.stored, &self.ledger, &self.selected)
    }

    /// Displayed preference for one cell, without rendering the grid.
    pub fn active_at(&self, period_id: PeriodId, day: DayOfWeek) -> Option<PreferenceType> {
        resolve_active(&CellAddress::new(period_id, day), &self.stored, &self.ledger)
    }

    pub fn pending_count(&self) -> usize {
        self.ledger.count()
    }

    pub fn pending_changes(&self) -> &[PendingChange] {
        self.ledger.entries()
    }

    pub fn can_commit(&self) -> bool {
        self.resource.is_some() && !self.ledger.is_empty() && !self.controller.is_committing()
    }

    pub fn can_discard(&self) -> bool {
        !self.ledger.is_empty() && !self.controller.is_committing()
    }

    /// Options available for the selected resource; empty without one.
    pub fn catalog(&self) -> &'static [PreferenceOption] {
        self.resource.map(|r| catalog_for(r.kind())).unwrap_or(&[])
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn commit_phase(&self) -> CommitPhase {
        self.controller.phase()
    }

    pub fn resource(&self) -> Option<ResourceRef> {
        self.resource
    }

    pub fn brush(&self) -> Option<Brush> {
        self.brush
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn days(&self) -> &[DayOfWeek] {
        &self.days
    }

    pub fn selected_cells(&self) -> &BTreeSet<CellAddress> {
        &self.selected
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn describe_cell(&self, cell: &CellAddress) -> String {
        let period = self
            .periods
            .iter()
            .find(|p| p.id == cell.period_id())
            .map(|p| p.name.clone())
            .unwrap_or_else(|| cell.period_id().to_string());
        format!("{} on {}", period, cell.day().display_name())
    }
}
