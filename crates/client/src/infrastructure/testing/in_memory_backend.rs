//! In-memory timetable backend
//!
//! Implements the application ports against a `Mutex`-guarded store so the
//! editing session can be driven end to end without a server. Writes behave
//! like the real backend: deletes are soft, and updates rewrite the flags.
//! Failures can be injected per cell or for listing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use timetabler_domain::catalog::is_allowed;
use timetabler_domain::{
    ActivePreference, CellAddress, OrganizationId, Period, PreferenceId, ResourceRef,
    StoredPreference,
};

use crate::application::ports::{PeriodPort, PreferencePort, PreferenceScope, PreferenceWrite};
use crate::application::ServiceError;
use crate::ports::outbound::ApiError;

/// One call received by the backend, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    List(ResourceRef),
    Create(ResourceRef, CellAddress),
    Update(ResourceRef, PreferenceId),
    Delete(ResourceRef, PreferenceId),
}

#[derive(Default)]
struct State {
    periods: Vec<Period>,
    records: HashMap<ResourceRef, Vec<StoredPreference>>,
    failing_cells: HashSet<CellAddress>,
    fail_list: bool,
    calls: Vec<BackendCall>,
}

#[derive(Default)]
pub struct InMemoryBackend {
    state: Mutex<State>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_periods(self, periods: Vec<Period>) -> Self {
        self.lock().periods = periods;
        self
    }

    /// Store a record as if it had been created earlier.
    pub fn seed(&self, resource: ResourceRef, record: StoredPreference) {
        self.lock().records.entry(resource).or_default().push(record);
    }

    /// Make every create/update/delete touching `cell` fail with HTTP 500.
    pub fn fail_writes_for(&self, cell: CellAddress) {
        self.lock().failing_cells.insert(cell);
    }

    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.failing_cells.clear();
        state.fail_list = false;
    }

    pub fn set_list_failure(&self, fail: bool) {
        self.lock().fail_list = fail;
    }

    /// All records for a resource, soft-deleted ones included.
    pub fn records(&self, resource: ResourceRef) -> Vec<StoredPreference> {
        self.lock().records.get(&resource).cloned().unwrap_or_default()
    }

    pub fn live_records(&self, resource: ResourceRef) -> Vec<StoredPreference> {
        self.records(resource)
            .into_iter()
            .filter(StoredPreference::is_live)
            .collect()
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.lock().calls.clone()
    }

    /// Number of writes (create/update/delete) received so far.
    pub fn write_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| !matches!(c, BackendCall::List(_)))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }
}

fn injected_failure(cell: &CellAddress) -> ServiceError {
    ApiError::HttpError {
        status: 500,
        message: format!("injected failure for {cell}"),
    }
    .into()
}

fn not_found(resource: ResourceRef, id: PreferenceId) -> ServiceError {
    ApiError::NotFound(format!("{resource}/preferences/{id}")).into()
}

impl State {
    fn check_write(&self, resource: ResourceRef, write: &PreferenceWrite) -> Result<(), ServiceError> {
        let cell = CellAddress::new(write.period_id, write.day);
        if self.failing_cells.contains(&cell) {
            return Err(injected_failure(&cell));
        }
        if !is_allowed(resource.kind(), write.preference_type) {
            return Err(ApiError::HttpError {
                status: 400,
                message: format!(
                    "{} is not a {} preference",
                    write.preference_type,
                    resource.kind()
                ),
            }
            .into());
        }
        Ok(())
    }

    fn find_mut(&mut self, resource: ResourceRef, id: PreferenceId) -> Option<&mut StoredPreference> {
        self.records
            .get_mut(&resource)
            .and_then(|records| records.iter_mut().find(|r| r.id == id))
    }
}

#[async_trait]
impl PreferencePort for InMemoryBackend {
    async fn list(
        &self,
        resource: ResourceRef,
        _scope: PreferenceScope,
    ) -> Result<Vec<StoredPreference>, ServiceError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::List(resource));
        if state.fail_list {
            return Err(ApiError::RequestFailed("connection refused".into()).into());
        }
        Ok(state.records.get(&resource).cloned().unwrap_or_default())
    }

    async fn create(
        &self,
        resource: ResourceRef,
        write: PreferenceWrite,
    ) -> Result<StoredPreference, ServiceError> {
        let mut state = self.lock();
        state
            .calls
            .push(BackendCall::Create(resource, CellAddress::new(write.period_id, write.day)));
        state.check_write(resource, &write)?;

        let now = Utc::now();
        let record = StoredPreference::new(
            PreferenceId::new(),
            write.period_id,
            write.day,
            write.preference_type,
        )
        .with_timestamps(now, now);
        state.records.entry(resource).or_default().push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        resource: ResourceRef,
        id: PreferenceId,
        write: PreferenceWrite,
    ) -> Result<StoredPreference, ServiceError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::Update(resource, id));
        state.check_write(resource, &write)?;

        let record = state.find_mut(resource, id).ok_or_else(|| not_found(resource, id))?;
        record.active = if write.value {
            ActivePreference::of(write.preference_type)
        } else {
            ActivePreference::NONE
        };
        record.period_id = write.period_id;
        record.day = write.day;
        record.updated_at = Some(Utc::now());
        Ok(record.clone())
    }

    async fn delete(&self, resource: ResourceRef, id: PreferenceId) -> Result<(), ServiceError> {
        let mut state = self.lock();
        state.calls.push(BackendCall::Delete(resource, id));

        let cell = state
            .find_mut(resource, id)
            .map(|r| r.address())
            .ok_or_else(|| not_found(resource, id))?;
        if state.failing_cells.contains(&cell) {
            return Err(injected_failure(&cell));
        }
        if let Some(record) = state.find_mut(resource, id) {
            record.is_deleted = true;
            record.updated_at = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl PeriodPort for InMemoryBackend {
    async fn list_periods(
        &self,
        _organization_id: Option<OrganizationId>,
    ) -> Result<Vec<Period>, ServiceError> {
        Ok(self.lock().periods.clone())
    }
}
