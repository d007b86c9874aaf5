//! Resources - the things whose scheduling preferences are edited
//!
//! A preference editor always works on exactly one resource at a time:
//! a teacher, a class, a class band, a room, or a scheduling rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DomainError;
use crate::ids::{ClassBandId, ClassId, RoomId, RuleId, TeacherId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Teacher,
    Class,
    ClassBand,
    Room,
    Rule,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Teacher,
        ResourceKind::Class,
        ResourceKind::ClassBand,
        ResourceKind::Room,
        ResourceKind::Rule,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Teacher => "Teacher",
            Self::Class => "Class",
            Self::ClassBand => "Class band",
            Self::Room => "Room",
            Self::Rule => "Rule",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Class => "class",
            Self::ClassBand => "class_band",
            Self::Room => "room",
            Self::Rule => "rule",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "teacher" => Ok(Self::Teacher),
            "class" => Ok(Self::Class),
            "class_band" | "classband" | "band" => Ok(Self::ClassBand),
            "room" => Ok(Self::Room),
            "rule" => Ok(Self::Rule),
            _ => Err(DomainError::parse(format!("Unknown resource kind: {}", s))),
        }
    }
}

/// A typed reference to the resource being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ResourceRef {
    Teacher(TeacherId),
    Class(ClassId),
    ClassBand(ClassBandId),
    Room(RoomId),
    Rule(RuleId),
}

impl ResourceRef {
    /// Build a reference from an untyped kind + uuid pair (e.g. user input).
    pub fn from_parts(kind: ResourceKind, id: Uuid) -> Self {
        match kind {
            ResourceKind::Teacher => Self::Teacher(TeacherId::from_uuid(id)),
            ResourceKind::Class => Self::Class(ClassId::from_uuid(id)),
            ResourceKind::ClassBand => Self::ClassBand(ClassBandId::from_uuid(id)),
            ResourceKind::Room => Self::Room(RoomId::from_uuid(id)),
            ResourceKind::Rule => Self::Rule(RuleId::from_uuid(id)),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Teacher(_) => ResourceKind::Teacher,
            Self::Class(_) => ResourceKind::Class,
            Self::ClassBand(_) => ResourceKind::ClassBand,
            Self::Room(_) => ResourceKind::Room,
            Self::Rule(_) => ResourceKind::Rule,
        }
    }

    pub fn uuid(&self) -> Uuid {
        match self {
            Self::Teacher(id) => id.to_uuid(),
            Self::Class(id) => id.to_uuid(),
            Self::ClassBand(id) => id.to_uuid(),
            Self::Room(id) => id.to_uuid(),
            Self::Rule(id) => id.to_uuid(),
        }
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.uuid())
    }
}

impl From<TeacherId> for ResourceRef {
    fn from(id: TeacherId) -> Self {
        Self::Teacher(id)
    }
}

impl From<ClassId> for ResourceRef {
    fn from(id: ClassId) -> Self {
        Self::Class(id)
    }
}

impl From<ClassBandId> for ResourceRef {
    fn from(id: ClassBandId) -> Self {
        Self::ClassBand(id)
    }
}

impl From<RoomId> for ResourceRef {
    fn from(id: RoomId) -> Self {
        Self::Room(id)
    }
}

impl From<RuleId> for ResourceRef {
    fn from(id: RuleId) -> Self {
        Self::Rule(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_keeps_kind_and_uuid() {
        let id = Uuid::new_v4();
        for kind in ResourceKind::ALL {
            let resource = ResourceRef::from_parts(kind, id);
            assert_eq!(resource.kind(), kind);
            assert_eq!(resource.uuid(), id);
        }
    }

    #[test]
    fn kind_parsing_accepts_common_spellings() {
        assert_eq!("class-band".parse::<ResourceKind>().unwrap(), ResourceKind::ClassBand);
        assert_eq!("ClassBand".parse::<ResourceKind>().unwrap(), ResourceKind::ClassBand);
        assert_eq!(" Room ".parse::<ResourceKind>().unwrap(), ResourceKind::Room);
        assert!("lab".parse::<ResourceKind>().is_err());
    }

    #[test]
    fn display_is_kind_and_id() {
        let teacher = TeacherId::new();
        let resource = ResourceRef::from(teacher);
        assert_eq!(resource.to_string(), format!("teacher:{}", teacher));
    }
}
