//! Preference catalog
//!
//! Static mapping from a resource kind to the preference types a user may
//! paint for it. The order of each list is also the canonical priority used
//! when decoding stored flags: hard constraints before soft ones, negative
//! before positive.

use serde::Serialize;

use crate::entities::ResourceKind;
use crate::value_objects::PreferenceType;

/// One paintable preference, as shown in the editor's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PreferenceOption {
    pub preference_type: PreferenceType,
    pub label: &'static str,
    /// CSS-style hex color
    pub color: &'static str,
    pub icon: &'static str,
    /// Backend flag name, also sent as `preferenceType` on writes
    pub flag: &'static str,
}

const RED: &str = "#e53935";
const GREEN: &str = "#43a047";
const AMBER: &str = "#fb8c00";
const BLUE: &str = "#1e88e5";

const TEACHER: &[PreferenceOption] = &[
    PreferenceOption {
        preference_type: PreferenceType::MustNotSchedule,
        label: "Cannot teach",
        color: RED,
        icon: "block",
        flag: "cannotTeach",
    },
    PreferenceOption {
        preference_type: PreferenceType::MustSchedule,
        label: "Must teach",
        color: GREEN,
        icon: "check_circle",
        flag: "mustTeach",
    },
    PreferenceOption {
        preference_type: PreferenceType::PreferNot,
        label: "Prefers not to teach",
        color: AMBER,
        icon: "thumb_down",
        flag: "prefersNotToTeach",
    },
    PreferenceOption {
        preference_type: PreferenceType::Prefers,
        label: "Prefers to teach",
        color: BLUE,
        icon: "thumb_up",
        flag: "prefersToTeach",
    },
];

const CLASS: &[PreferenceOption] = &[
    PreferenceOption {
        preference_type: PreferenceType::MustNotSchedule,
        label: "Must not schedule",
        color: RED,
        icon: "block",
        flag: "mustNotScheduleClass",
    },
    PreferenceOption {
        preference_type: PreferenceType::MustSchedule,
        label: "Must schedule",
        color: GREEN,
        icon: "check_circle",
        flag: "mustScheduleClass",
    },
    PreferenceOption {
        preference_type: PreferenceType::PreferNot,
        label: "Prefer not",
        color: AMBER,
        icon: "thumb_down",
        flag: "prefersNotToScheduleClass",
    },
    PreferenceOption {
        preference_type: PreferenceType::Prefers,
        label: "Prefers",
        color: BLUE,
        icon: "thumb_up",
        flag: "prefersToScheduleClass",
    },
];

const CLASS_BAND: &[PreferenceOption] = &[
    PreferenceOption {
        preference_type: PreferenceType::MustNotSchedule,
        label: "Must not schedule",
        color: RED,
        icon: "block",
        flag: "mustNotScheduleClassBand",
    },
    PreferenceOption {
        preference_type: PreferenceType::MustSchedule,
        label: "Must schedule",
        color: GREEN,
        icon: "check_circle",
        flag: "mustScheduleClassBand",
    },
    PreferenceOption {
        preference_type: PreferenceType::PreferNot,
        label: "Prefer not",
        color: AMBER,
        icon: "thumb_down",
        flag: "prefersNotToScheduleClassBand",
    },
    PreferenceOption {
        preference_type: PreferenceType::Prefers,
        label: "Prefers",
        color: BLUE,
        icon: "thumb_up",
        flag: "prefersToScheduleClassBand",
    },
];

// Rooms can't be forced into a slot, only blocked or weighted.
const ROOM: &[PreferenceOption] = &[
    PreferenceOption {
        preference_type: PreferenceType::MustNotSchedule,
        label: "Not available",
        color: RED,
        icon: "event_busy",
        flag: "notAvailable",
    },
    PreferenceOption {
        preference_type: PreferenceType::PreferNot,
        label: "Prefer not to use",
        color: AMBER,
        icon: "thumb_down",
        flag: "preferNotToSchedule",
    },
    PreferenceOption {
        preference_type: PreferenceType::Prefers,
        label: "Preferred",
        color: BLUE,
        icon: "thumb_up",
        flag: "preferToSchedule",
    },
];

const RULE: &[PreferenceOption] = &[
    PreferenceOption {
        preference_type: PreferenceType::MustNotSchedule,
        label: "Must not apply",
        color: RED,
        icon: "block",
        flag: "mustNotApply",
    },
    PreferenceOption {
        preference_type: PreferenceType::MustSchedule,
        label: "Must apply",
        color: GREEN,
        icon: "rule",
        flag: "mustApply",
    },
];

/// Ordered palette for a resource kind.
pub fn catalog_for(kind: ResourceKind) -> &'static [PreferenceOption] {
    match kind {
        ResourceKind::Teacher => TEACHER,
        ResourceKind::Class => CLASS,
        ResourceKind::ClassBand => CLASS_BAND,
        ResourceKind::Room => ROOM,
        ResourceKind::Rule => RULE,
    }
}

/// Lookup by kind name; unknown names get an empty palette.
pub fn catalog_for_name(kind: &str) -> &'static [PreferenceOption] {
    kind.parse::<ResourceKind>()
        .map(catalog_for)
        .unwrap_or(&[])
}

pub fn option_for(
    kind: ResourceKind,
    preference_type: PreferenceType,
) -> Option<&'static PreferenceOption> {
    catalog_for(kind)
        .iter()
        .find(|option| option.preference_type == preference_type)
}

pub fn is_allowed(kind: ResourceKind, preference_type: PreferenceType) -> bool {
    option_for(kind, preference_type).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_kind_has_a_palette() {
        for kind in ResourceKind::ALL {
            assert!(!catalog_for(kind).is_empty(), "{} has no options", kind);
        }
    }

    #[test]
    fn no_duplicate_types_or_flags_within_a_kind() {
        for kind in ResourceKind::ALL {
            let options = catalog_for(kind);
            let types: HashSet<_> = options.iter().map(|o| o.preference_type).collect();
            let flags: HashSet<_> = options.iter().map(|o| o.flag).collect();
            assert_eq!(types.len(), options.len());
            assert_eq!(flags.len(), options.len());
        }
    }

    #[test]
    fn hard_constraints_come_first() {
        for kind in ResourceKind::ALL {
            let options = catalog_for(kind);
            let first_soft = options
                .iter()
                .position(|o| !o.preference_type.is_hard())
                .unwrap_or(options.len());
            assert!(options[first_soft..]
                .iter()
                .all(|o| !o.preference_type.is_hard()));
        }
    }

    #[test]
    fn unknown_kind_name_gives_empty_palette() {
        assert!(catalog_for_name("laboratory").is_empty());
        assert_eq!(catalog_for_name("teacher").len(), 4);
    }

    #[test]
    fn room_and_rule_subsets() {
        assert!(!is_allowed(ResourceKind::Room, PreferenceType::MustSchedule));
        assert!(is_allowed(ResourceKind::Room, PreferenceType::MustNotSchedule));
        assert!(!is_allowed(ResourceKind::Rule, PreferenceType::Prefers));
        assert!(is_allowed(ResourceKind::Rule, PreferenceType::MustSchedule));
    }
}
