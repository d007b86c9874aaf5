//! Cell address - the `periodId-dayOfWeek` key that ties stored preferences,
//! pending edits, and rendered grid cells together.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::PeriodId;
use crate::value_objects::DayOfWeek;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellAddress {
    period_id: PeriodId,
    day: DayOfWeek,
}

impl CellAddress {
    pub fn new(period_id: PeriodId, day: DayOfWeek) -> Self {
        Self { period_id, day }
    }

    pub fn period_id(&self) -> PeriodId {
        self.period_id
    }

    pub fn day(&self) -> DayOfWeek {
        self.day
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.period_id, self.day.number())
    }
}

/// Splits on the last `-`: period ids are hyphenated uuids.
impl FromStr for CellAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (period, day) = s
            .trim()
            .rsplit_once('-')
            .ok_or_else(|| DomainError::parse(format!("Malformed cell address: {}", s)))?;
        let day: u8 = day
            .parse()
            .map_err(|_| DomainError::parse(format!("Malformed cell address: {}", s)))?;
        Ok(Self::new(period.parse()?, DayOfWeek::from_number(day)?))
    }
}

impl TryFrom<String> for CellAddress {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CellAddress> for String {
    fn from(address: CellAddress) -> String {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_period_then_day_number() {
        let period: PeriodId = "6f1c2b1e-3d4a-4b5c-8d9e-0f1a2b3c4d5e".parse().unwrap();
        let address = CellAddress::new(period, DayOfWeek::Tuesday);
        assert_eq!(address.to_string(), "6f1c2b1e-3d4a-4b5c-8d9e-0f1a2b3c4d5e-2");
    }

    #[test]
    fn parses_back_despite_hyphens_in_uuid() {
        let address = CellAddress::new(PeriodId::new(), DayOfWeek::Sunday);
        let parsed: CellAddress = address.to_string().parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn distinct_days_give_distinct_addresses() {
        let period = PeriodId::new();
        assert_ne!(
            CellAddress::new(period, DayOfWeek::Monday),
            CellAddress::new(period, DayOfWeek::Tuesday)
        );
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!("".parse::<CellAddress>().is_err());
        assert!("nohyphen".parse::<CellAddress>().is_err());
        assert!(format!("{}-x", PeriodId::new()).parse::<CellAddress>().is_err());
        assert!(format!("{}-8", PeriodId::new()).parse::<CellAddress>().is_err());
        assert!("abc-1".parse::<CellAddress>().is_err());
    }
}
