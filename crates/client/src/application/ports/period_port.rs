use async_trait::async_trait;
use timetabler_domain::{OrganizationId, Period};

use crate::application::ServiceError;

/// Read access to the period reference data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PeriodPort: Send + Sync {
    async fn list_periods(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<Vec<Period>, ServiceError>;
}
