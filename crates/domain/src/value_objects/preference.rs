//! Preference types and the decoded "active preference" of a cell
//!
//! The backend stores one boolean flag per preference type (`cannotTeach`,
//! `mustScheduleClass`, ...). Those flags are decoded exactly once, when a
//! record enters the client, into an [`ActivePreference`]. Nothing past the
//! ingestion boundary looks at raw flags again.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::catalog;
use crate::entities::ResourceKind;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PreferenceType {
    MustSchedule,
    MustNotSchedule,
    Prefers,
    PreferNot,
}

impl PreferenceType {
    /// Hard constraints must be honored by the generator; soft ones are weights.
    pub fn is_hard(&self) -> bool {
        matches!(self, Self::MustSchedule | Self::MustNotSchedule)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MustSchedule => "MUST_SCHEDULE",
            Self::MustNotSchedule => "MUST_NOT_SCHEDULE",
            Self::Prefers => "PREFERS",
            Self::PreferNot => "PREFER_NOT",
        }
    }

    /// Wire flag name for this type under a resource kind, if the kind allows it.
    pub fn flag_name(&self, kind: ResourceKind) -> Option<&'static str> {
        catalog::option_for(kind, *self).map(|option| option.flag)
    }

    /// Reverse of [`PreferenceType::flag_name`].
    pub fn from_flag(kind: ResourceKind, flag: &str) -> Result<Self, DomainError> {
        catalog::catalog_for(kind)
            .iter()
            .find(|option| option.flag == flag)
            .map(|option| option.preference_type)
            .ok_or_else(|| {
                DomainError::parse(format!("Flag {} is not a {} preference", flag, kind))
            })
    }
}

impl fmt::Display for PreferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PreferenceType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MUST_SCHEDULE" | "MUST" => Ok(Self::MustSchedule),
            "MUST_NOT_SCHEDULE" | "MUST_NOT" | "CANNOT" => Ok(Self::MustNotSchedule),
            "PREFERS" | "PREFER" => Ok(Self::Prefers),
            "PREFER_NOT" | "PREFERS_NOT" => Ok(Self::PreferNot),
            _ => Err(DomainError::parse(format!("Unknown preference type: {}", s))),
        }
    }
}

/// The single preference that is in effect for a cell, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActivePreference {
    pub kind: Option<PreferenceType>,
}

impl ActivePreference {
    pub const NONE: ActivePreference = ActivePreference { kind: None };

    pub fn of(preference_type: PreferenceType) -> Self {
        Self {
            kind: Some(preference_type),
        }
    }

    pub fn is_none(&self) -> bool {
        self.kind.is_none()
    }

    /// Decode raw backend flags using the kind's canonical priority order.
    ///
    /// The first flag that is `true` in catalog order wins, so records where
    /// more than one flag is set still decode deterministically. Flags that
    /// don't belong to the kind are ignored.
    pub fn decode(kind: ResourceKind, flags: &HashMap<String, bool>) -> Self {
        let kind = catalog::catalog_for(kind)
            .iter()
            .find(|option| flags.get(option.flag).copied().unwrap_or(false))
            .map(|option| option.preference_type);
        Self { kind }
    }
}

impl From<Option<PreferenceType>> for ActivePreference {
    fn from(kind: Option<PreferenceType>) -> Self {
        Self { kind }
    }
}
