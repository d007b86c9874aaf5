//! Console user interface: command parsing, text rendering and the command
//! loop driver.

pub mod command;
pub mod console;
pub mod grid_view;

pub use command::{parse_command, Command, CommandError, PeriodRef};
pub use console::{Console, Flow};
