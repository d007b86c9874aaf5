//! Period Service - read-only access to the period reference data

use async_trait::async_trait;
use std::sync::Arc;

use timetabler_domain::{sort_periods, OrganizationId, Period};

use crate::application::api::Api;
use crate::application::ports::PeriodPort;
use crate::application::ServiceError;
use crate::ports::outbound::RawApiPort;

#[derive(Clone)]
pub struct PeriodService {
    api: Api,
}

impl PeriodService {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { api: Api::new(raw) }
    }
}

#[async_trait]
impl PeriodPort for PeriodService {
    async fn list_periods(
        &self,
        organization_id: Option<OrganizationId>,
    ) -> Result<Vec<Period>, ServiceError> {
        let path = match organization_id {
            Some(org) => format!("/api/periods?organizationId={}", org),
            None => "/api/periods".to_string(),
        };
        let mut periods: Vec<Period> = self.api.get(&path).await?;
        sort_periods(&mut periods);
        tracing::debug!(count = periods.len(), "Loaded periods");
        Ok(periods)
    }
}
