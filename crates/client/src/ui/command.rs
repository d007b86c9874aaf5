//! Console command parsing for the interactive editor.

use uuid::Uuid;

use timetabler_domain::{DayOfWeek, PeriodId, PreferenceType, ResourceKind, ResourceRef};

use crate::application::editing::Brush;

/// A period as typed by the user: its 1-based row in the grid, or its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodRef {
    Row(usize),
    Id(PeriodId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(ResourceRef),
    /// `None` puts the brush down
    Brush(Option<Brush>),
    Click { period: PeriodRef, day: DayOfWeek },
    Render,
    Pending,
    Catalog,
    Commit,
    Discard,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}', try 'help'")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  select <teacher|class|class-band|room|rule> <uuid>   load a resource's preferences
  brush <type|clear|none>                             pick what clicks paint
  click <row|period-uuid> <day>                       paint one cell
  render                                              show the grid
  pending                                             list unsaved changes
  catalog                                             list paintable types
  commit                                              save pending changes
  discard                                             drop pending changes
  reload                                              refetch stored preferences
  quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err(CommandError::Empty);
    };
    let args: Vec<&str> = words.collect();

    match head.to_ascii_lowercase().as_str() {
        "select" | "s" => match args.as_slice() {
            [kind, id] => {
                let kind = kind
                    .parse::<ResourceKind>()
                    .map_err(|e| CommandError::Invalid(e.to_string()))?;
                let id = Uuid::parse_str(id)
                    .map_err(|e| CommandError::Invalid(format!("Invalid id '{id}': {e}")))?;
                Ok(Command::Select(ResourceRef::from_parts(kind, id)))
            }
            _ => Err(CommandError::Usage("select <kind> <uuid>")),
        },
        "brush" | "b" => match args.as_slice() {
            ["none" | "off"] => Ok(Command::Brush(None)),
            ["clear" | "erase"] => Ok(Command::Brush(Some(Brush::Clear))),
            [name] => name
                .parse::<PreferenceType>()
                .map(|t| Command::Brush(Some(Brush::Paint(t))))
                .map_err(|e| CommandError::Invalid(e.to_string())),
            _ => Err(CommandError::Usage("brush <type|clear|none>")),
        },
        "click" | "c" => match args.as_slice() {
            [period, day] => {
                let period = parse_period(period)?;
                let day = day
                    .parse::<DayOfWeek>()
                    .map_err(|e| CommandError::Invalid(e.to_string()))?;
                Ok(Command::Click { period, day })
            }
            _ => Err(CommandError::Usage("click <row|period-uuid> <day>")),
        },
        "render" | "r" | "show" => Ok(Command::Render),
        "pending" | "p" => Ok(Command::Pending),
        "catalog" => Ok(Command::Catalog),
        "commit" | "save" => Ok(Command::Commit),
        "discard" => Ok(Command::Discard),
        "reload" => Ok(Command::Reload),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_period(text: &str) -> Result<PeriodRef, CommandError> {
    if let Ok(row) = text.parse::<usize>() {
        return if row == 0 {
            Err(CommandError::Invalid("Rows are numbered from 1".into()))
        } else {
            Ok(PeriodRef::Row(row))
        };
    }
    text.parse::<PeriodId>()
        .map(PeriodRef::Id)
        .map_err(|e| CommandError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use timetabler_domain::RoomId;

    #[test]
    fn parses_select() {
        let id = Uuid::new_v4();
        let command = parse_command(&format!("select room {id}")).unwrap();
        assert_eq!(command, Command::Select(RoomId::from_uuid(id).into()));
        assert_eq!(
            parse_command("select room"),
            Err(CommandError::Usage("select <kind> <uuid>"))
        );
    }

    #[test]
    fn parses_brushes() {
        assert_eq!(
            parse_command("brush must_not").unwrap(),
            Command::Brush(Some(Brush::Paint(PreferenceType::MustNotSchedule)))
        );
        assert_eq!(parse_command("b clear").unwrap(), Command::Brush(Some(Brush::Clear)));
        assert_eq!(parse_command("brush none").unwrap(), Command::Brush(None));
        assert!(matches!(parse_command("brush sometimes"), Err(CommandError::Invalid(_))));
    }

    #[test]
    fn parses_clicks_by_row_or_id() {
        assert_eq!(
            parse_command("click 2 tue").unwrap(),
            Command::Click {
                period: PeriodRef::Row(2),
                day: DayOfWeek::Tuesday
            }
        );
        let period = PeriodId::new();
        assert_eq!(
            parse_command(&format!("c {period} 5")).unwrap(),
            Command::Click {
                period: PeriodRef::Id(period),
                day: DayOfWeek::Friday
            }
        );
        assert!(matches!(parse_command("click 0 mon"), Err(CommandError::Invalid(_))));
    }

    #[test]
    fn rejects_unknown_and_empty_input() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".into()))
        );
        assert_eq!(parse_command("Q").unwrap(), Command::Quit);
    }
}
