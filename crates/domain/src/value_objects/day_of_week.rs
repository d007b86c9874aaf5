//! Day-of-week value object
//!
//! Uses ISO numbering (Monday = 1 ... Sunday = 7). The number is what goes on
//! the wire and into cell addresses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Build a day from its ISO number.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when `number` is outside 1..=7.
    pub fn from_number(number: u8) -> Result<Self, DomainError> {
        match number {
            1..=7 => Ok(Self::ALL[usize::from(number - 1)]),
            _ => Err(DomainError::validation(format!(
                "day of week must be between 1 and 7, got {}",
                number
            ))),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            DayOfWeek::Monday => 1,
            DayOfWeek::Tuesday => 2,
            DayOfWeek::Wednesday => 3,
            DayOfWeek::Thursday => 4,
            DayOfWeek::Friday => 5,
            DayOfWeek::Saturday => 6,
            DayOfWeek::Sunday => 7,
        }
    }

    /// The first `count` days of the week, clamped to 1..=7.
    ///
    /// Editors usually show a school week, i.e. `first_n(5)`.
    pub fn first_n(count: usize) -> Vec<DayOfWeek> {
        Self::ALL.iter().copied().take(count.clamp(1, 7)).collect()
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
            DayOfWeek::Sunday => "Sunday",
        }
    }

    pub fn short_name(&self) -> &'static str {
        &self.display_name()[..3]
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl TryFrom<u8> for DayOfWeek {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> u8 {
        day.number()
    }
}

/// Accepts either the ISO number ("1") or an English name/abbreviation ("mon").
impl FromStr for DayOfWeek {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<u8>() {
            return Self::from_number(number);
        }
        let lowered = trimmed.to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|day| {
                let name = day.display_name().to_ascii_lowercase();
                name == lowered || (lowered.len() >= 2 && name.starts_with(&lowered))
            })
            .ok_or_else(|| DomainError::parse(format!("Unknown day of week: {}", s)))
    }
}
