//! Console front end over an [`EditingSession`].
//!
//! Executes parsed commands and turns session state, errors and queued
//! notifications into printable lines. Holds no editing state of its own.

use crate::application::editing::{ClickOutcome, EditingSession, SessionError};

use super::command::{Command, PeriodRef, HELP};
use super::grid_view::{render_catalog, render_grid_text, render_notification, render_pending};

/// What the caller should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console {
    session: EditingSession,
}

impl Console {
    pub fn new(session: EditingSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    /// Run one command, returning the text to print.
    pub async fn execute(&mut self, command: Command) -> (Flow, Vec<String>) {
        let mut out = Vec::new();
        let flow = match command {
            Command::Quit => {
                if self.session.pending_count() > 0 {
                    out.push(format!(
                        "Leaving with {} unsaved changes",
                        self.session.pending_count()
                    ));
                }
                Flow::Quit
            }
            Command::Help => {
                out.push(HELP.to_string());
                Flow::Continue
            }
            Command::Select(resource) => {
                match self.session.select_resource(resource).await {
                    Ok(()) if self.session.load_state().is_ready() => {
                        out.push(format!("Editing {resource}"));
                        out.push(render_grid_text(&self.session.render()));
                    }
                    Ok(()) => {}
                    Err(SessionError::UnsavedChanges { pending }) => out.push(format!(
                        "{pending} unsaved changes: 'commit' or 'discard' before switching"
                    )),
                    Err(e) => out.push(e.to_string()),
                }
                Flow::Continue
            }
            Command::Brush(brush) => {
                match self.session.select_preference_type(brush) {
                    Ok(()) => out.push(match brush {
                        Some(b) => format!("Brush: {:?}", b),
                        None => "Brush put down".to_string(),
                    }),
                    Err(e) => out.push(e.to_string()),
                }
                Flow::Continue
            }
            Command::Click { period, day } => {
                let period_id = match period {
                    PeriodRef::Id(id) => Some(id),
                    PeriodRef::Row(row) => row
                        .checked_sub(1)
                        .and_then(|index| self.session.render().rows.get(index).map(|r| r.period.id)),
                };
                match period_id.map(|id| self.session.click_cell(id, day)) {
                    Some(ClickOutcome::Recorded(_)) => {
                        out.push(render_grid_text(&self.session.render()))
                    }
                    Some(ClickOutcome::Ignored(reason)) => {
                        out.push(format!("Click ignored ({reason:?})"))
                    }
                    None => out.push("No such row".to_string()),
                }
                Flow::Continue
            }
            Command::Render => {
                out.push(render_grid_text(&self.session.render()));
                Flow::Continue
            }
            Command::Pending => {
                out.push(render_pending(self.session.pending_changes()));
                Flow::Continue
            }
            Command::Catalog => {
                out.push(render_catalog(self.session.catalog()));
                Flow::Continue
            }
            Command::Commit => {
                match self.session.commit().await {
                    Ok(report) => out.push(format!(
                        "Committed: {} succeeded, {} failed",
                        report.succeeded.len(),
                        report.failed.len()
                    )),
                    Err(e) => out.push(e.to_string()),
                }
                Flow::Continue
            }
            Command::Discard => {
                if let Err(e) = self.session.discard() {
                    out.push(e.to_string());
                }
                Flow::Continue
            }
            Command::Reload => {
                if let Err(e) = self.session.reload().await {
                    out.push(e.to_string());
                }
                Flow::Continue
            }
        };

        out.extend(
            self.session
                .take_notifications()
                .iter()
                .map(render_notification),
        );
        (flow, out)
    }
}
