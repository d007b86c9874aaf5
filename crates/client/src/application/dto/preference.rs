use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use timetabler_domain::{
    ActivePreference, DayOfWeek, DomainError, PeriodId, PreferenceId, ResourceKind,
    StoredPreference,
};

use crate::application::ports::PreferenceWrite;

/// A preference record as the backend returns it: fixed columns plus one
/// boolean per preference flag of the resource kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecordDto {
    pub id: PreferenceId,
    pub period_id: PeriodId,
    pub day_of_week: DayOfWeek,
    #[serde(default, alias = "deleted")]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Everything else; the boolean entries are the preference flags.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl PreferenceRecordDto {
    pub fn flags(&self) -> HashMap<String, bool> {
        self.extra
            .iter()
            .filter_map(|(name, value)| value.as_bool().map(|b| (name.clone(), b)))
            .collect()
    }

    /// Decode at the ingestion boundary.
    pub fn into_stored(self, kind: ResourceKind) -> StoredPreference {
        let active = ActivePreference::decode(kind, &self.flags());
        StoredPreference {
            id: self.id,
            period_id: self.period_id,
            day: self.day_of_week,
            active,
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Encode a stored preference back into the backend shape.
    pub fn from_stored(kind: ResourceKind, stored: &StoredPreference) -> Self {
        let extra = timetabler_domain::catalog_for(kind)
            .iter()
            .map(|option| {
                let set = stored.active.kind == Some(option.preference_type);
                (option.flag.to_string(), Value::Bool(set))
            })
            .collect();
        Self {
            id: stored.id,
            period_id: stored.period_id,
            day_of_week: stored.day,
            is_deleted: stored.is_deleted,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            extra,
        }
    }
}

/// Body for POST (create) and PUT (update).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceWriteBody {
    pub period_id: PeriodId,
    pub day_of_week: DayOfWeek,
    /// Backend flag name, e.g. `cannotTeach`
    pub preference_type: String,
    pub preference_value: bool,
}

impl PreferenceWriteBody {
    pub fn from_write(kind: ResourceKind, write: &PreferenceWrite) -> Result<Self, DomainError> {
        let flag = write.preference_type.flag_name(kind).ok_or_else(|| {
            DomainError::validation(format!(
                "{} is not a {} preference",
                write.preference_type, kind
            ))
        })?;
        Ok(Self {
            period_id: write.period_id,
            day_of_week: write.day,
            preference_type: flag.to_string(),
            preference_value: write.value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use timetabler_domain::PreferenceType;

    #[test]
    fn decodes_flags_and_ignores_non_boolean_columns() {
        let value = json!({
            "id": "0b7c8a44-7d3e-4f3a-9c55-1f6a3e0f9b11",
            "periodId": "6f1c2b1e-3d4a-4b5c-8d9e-0f1a2b3c4d5e",
            "dayOfWeek": 1,
            "isDeleted": false,
            "teacherId": "a2f7d7a4-1111-4c1b-9d1e-9a7e3a1b2c3d",
            "cannotTeach": false,
            "mustTeach": true,
            "createdAt": "2024-09-01T08:00:00Z"
        });
        let dto: PreferenceRecordDto = serde_json::from_value(value).unwrap();
        let stored = dto.into_stored(ResourceKind::Teacher);
        assert_eq!(stored.day, DayOfWeek::Monday);
        assert_eq!(stored.effective_type(), Some(PreferenceType::MustSchedule));
        assert!(stored.created_at.is_some());
    }

    #[test]
    fn legacy_deleted_alias_is_honored() {
        let value = json!({
            "id": "0b7c8a44-7d3e-4f3a-9c55-1f6a3e0f9b11",
            "periodId": "6f1c2b1e-3d4a-4b5c-8d9e-0f1a2b3c4d5e",
            "dayOfWeek": 2,
            "deleted": true,
            "notAvailable": true
        });
        let dto: PreferenceRecordDto = serde_json::from_value(value).unwrap();
        let stored = dto.into_stored(ResourceKind::Room);
        assert!(stored.is_deleted);
        assert_eq!(stored.effective_type(), None);
    }

    #[test]
    fn write_body_uses_kind_specific_flag() {
        let write = PreferenceWrite::set(
            PeriodId::new(),
            DayOfWeek::Wednesday,
            PreferenceType::MustNotSchedule,
        );
        let body = PreferenceWriteBody::from_write(ResourceKind::Class, &write).unwrap();
        assert_eq!(body.preference_type, "mustNotScheduleClass");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["dayOfWeek"], 3);
        assert_eq!(json["preferenceValue"], true);
    }

    #[test]
    fn write_body_rejects_types_outside_the_catalog() {
        let write = PreferenceWrite::set(PeriodId::new(), DayOfWeek::Monday, PreferenceType::Prefers);
        assert!(PreferenceWriteBody::from_write(ResourceKind::Rule, &write).is_err());
    }

    #[test]
    fn from_stored_sets_exactly_one_flag() {
        let stored = StoredPreference::new(
            PreferenceId::new(),
            PeriodId::new(),
            DayOfWeek::Friday,
            PreferenceType::PreferNot,
        );
        let dto = PreferenceRecordDto::from_stored(ResourceKind::Teacher, &stored);
        let set: Vec<_> = dto.flags().into_iter().filter(|(_, v)| *v).collect();
        assert_eq!(set, vec![("prefersNotToTeach".to_string(), true)]);
        assert_eq!(dto.into_stored(ResourceKind::Teacher), stored);
    }
}
