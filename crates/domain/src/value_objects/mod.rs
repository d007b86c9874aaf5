//! Value objects - Immutable objects defined by their attributes

mod cell_address;
mod day_of_week;
mod preference;

pub use cell_address::CellAddress;
pub use day_of_week::DayOfWeek;
pub use preference::{ActivePreference, PreferenceType};
