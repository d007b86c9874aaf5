//! Timetabler domain vocabulary: resources, periods, days, cell addresses,
//! preference types and the per-kind preference catalog.

pub mod catalog;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use catalog::{catalog_for, catalog_for_name, PreferenceOption};
pub use entities::{sort_periods, Period, ResourceKind, ResourceRef, StoredPreference};
pub use error::DomainError;
pub use ids::{
    ClassBandId, ClassId, OrganizationId, PeriodId, PlanId, PreferenceId, RoomId, RuleId,
    TeacherId,
};
pub use value_objects::{ActivePreference, CellAddress, DayOfWeek, PreferenceType};
