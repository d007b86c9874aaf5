//! Preference Service - REST access to per-resource preference collections
//!
//! Each resource kind has its own collection path but the same CRUD shape:
//! `GET` the list, `POST` a new preference, `PUT`/`DELETE` by preference id.

use async_trait::async_trait;
use std::sync::Arc;
use url::form_urlencoded;

use timetabler_domain::{PreferenceId, ResourceKind, ResourceRef, StoredPreference};

use crate::application::api::Api;
use crate::application::dto::{PreferenceRecordDto, PreferenceWriteBody};
use crate::application::ports::{PreferencePort, PreferenceScope, PreferenceWrite};
use crate::application::ServiceError;
use crate::ports::outbound::RawApiPort;

/// Collection path for a resource's preferences.
pub fn collection_path(resource: ResourceRef) -> String {
    let segment = match resource.kind() {
        ResourceKind::Teacher => "teachers",
        ResourceKind::Class => "classes",
        ResourceKind::ClassBand => "class-bands",
        ResourceKind::Room => "rooms",
        ResourceKind::Rule => "rules",
    };
    format!("/api/{}/{}/preferences", segment, resource.uuid())
}

fn list_path(resource: ResourceRef, scope: PreferenceScope) -> String {
    let base = collection_path(resource);
    if resource.kind() != ResourceKind::Rule || scope.is_empty() {
        return base;
    }
    let mut query = form_urlencoded::Serializer::new(String::new());
    if let Some(plan) = scope.plan_id {
        query.append_pair("planId", &plan.to_string());
    }
    if let Some(org) = scope.organization_id {
        query.append_pair("organizationId", &org.to_string());
    }
    format!("{}?{}", base, query.finish())
}

#[derive(Clone)]
pub struct PreferenceService {
    api: Api,
}

impl PreferenceService {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { api: Api::new(raw) }
    }

    fn body(resource: ResourceRef, write: &PreferenceWrite) -> Result<PreferenceWriteBody, ServiceError> {
        PreferenceWriteBody::from_write(resource.kind(), write)
            .map_err(|e| ServiceError::invalid(e.to_string()))
    }
}

#[async_trait]
impl PreferencePort for PreferenceService {
    async fn list(
        &self,
        resource: ResourceRef,
        scope: PreferenceScope,
    ) -> Result<Vec<StoredPreference>, ServiceError> {
        let records: Vec<PreferenceRecordDto> = self.api.get(&list_path(resource, scope)).await?;
        let kind = resource.kind();
        Ok(records.into_iter().map(|r| r.into_stored(kind)).collect())
    }

    async fn create(
        &self,
        resource: ResourceRef,
        write: PreferenceWrite,
    ) -> Result<StoredPreference, ServiceError> {
        let body = Self::body(resource, &write)?;
        let record: PreferenceRecordDto =
            self.api.post(&collection_path(resource), &body).await?;
        Ok(record.into_stored(resource.kind()))
    }

    async fn update(
        &self,
        resource: ResourceRef,
        id: PreferenceId,
        write: PreferenceWrite,
    ) -> Result<StoredPreference, ServiceError> {
        let body = Self::body(resource, &write)?;
        let path = format!("{}/{}", collection_path(resource), id);
        let record: PreferenceRecordDto = self.api.put(&path, &body).await?;
        Ok(record.into_stored(resource.kind()))
    }

    async fn delete(&self, resource: ResourceRef, id: PreferenceId) -> Result<(), ServiceError> {
        let path = format!("{}/{}", collection_path(resource), id);
        self.api.delete(&path).await?;
        Ok(())
    }
}
