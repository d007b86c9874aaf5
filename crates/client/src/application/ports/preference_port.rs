//! Preference collection port
//!
//! Every resource kind exposes the same CRUD shape for its preferences; only
//! the collection path differs. Implementations decode backend flags into
//! `StoredPreference`s before returning them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use timetabler_domain::{
    DayOfWeek, OrganizationId, PeriodId, PlanId, PreferenceId, PreferenceType, ResourceRef,
    StoredPreference,
};

use crate::application::ServiceError;

/// Optional filters for listing. Only rule preferences are scoped by plan
/// and organization; other kinds ignore the scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceScope {
    pub organization_id: Option<OrganizationId>,
    pub plan_id: Option<PlanId>,
}

impl PreferenceScope {
    pub fn is_empty(&self) -> bool {
        self.organization_id.is_none() && self.plan_id.is_none()
    }
}

/// One preference write (create or update) in domain terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreferenceWrite {
    pub period_id: PeriodId,
    pub day: DayOfWeek,
    pub preference_type: PreferenceType,
    pub value: bool,
}

impl PreferenceWrite {
    /// Set `preference_type` on the cell.
    pub fn set(period_id: PeriodId, day: DayOfWeek, preference_type: PreferenceType) -> Self {
        Self {
            period_id,
            day,
            preference_type,
            value: true,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PreferencePort: Send + Sync {
    async fn list(
        &self,
        resource: ResourceRef,
        scope: PreferenceScope,
    ) -> Result<Vec<StoredPreference>, ServiceError>;

    async fn create(
        &self,
        resource: ResourceRef,
        write: PreferenceWrite,
    ) -> Result<StoredPreference, ServiceError>;

    async fn update(
        &self,
        resource: ResourceRef,
        id: PreferenceId,
        write: PreferenceWrite,
    ) -> Result<StoredPreference, ServiceError>;

    /// Soft delete on the server.
    async fn delete(&self, resource: ResourceRef, id: PreferenceId) -> Result<(), ServiceError>;
}
