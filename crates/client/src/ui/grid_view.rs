//! Plain-text rendering of the preference grid and palette.

use std::fmt::Write as _;

use timetabler_domain::{PreferenceOption, PreferenceType};

use crate::application::editing::{GridCell, Notification, NotificationLevel, PendingChange, PreferenceGrid};

const CELL_WIDTH: usize = 6;

pub fn symbol(preference_type: Option<PreferenceType>) -> &'static str {
    match preference_type {
        Some(PreferenceType::MustNotSchedule) => "X",
        Some(PreferenceType::MustSchedule) => "M",
        Some(PreferenceType::PreferNot) => "-",
        Some(PreferenceType::Prefers) => "+",
        None => ".",
    }
}

/// One cell as text: `[..]` marks a highlighted cell, `*` a pending change.
fn cell_text(cell: &GridCell) -> String {
    if !cell.available {
        return String::new();
    }
    let mut text = symbol(cell.active).to_string();
    if cell.pending.is_some() {
        text.push('*');
    }
    if cell.selected {
        text = format!("[{text}]");
    }
    text
}

pub fn render_grid_text(grid: &PreferenceGrid) -> String {
    let label_width = grid
        .rows
        .iter()
        .map(|row| row.period.name.len() + row.period.time_range().len() + 4)
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = String::new();
    let _ = write!(out, "{:label_width$}", "");
    for day in &grid.days {
        let _ = write!(out, "{:^CELL_WIDTH$}", day.short_name());
    }
    out.push('\n');

    for (index, row) in grid.rows.iter().enumerate() {
        let label = format!("{} {} {}", index + 1, row.period.name, row.period.time_range());
        let _ = write!(out, "{label:label_width$}");
        for cell in &row.cells {
            let _ = write!(out, "{:^CELL_WIDTH$}", cell_text(cell));
        }
        out.push('\n');
    }
    out
}

pub fn render_catalog(options: &[PreferenceOption]) -> String {
    if options.is_empty() {
        return "No resource selected\n".to_string();
    }
    let mut out = String::new();
    for option in options {
        let _ = writeln!(
            out,
            "  {}  {:<18} {}",
            symbol(Some(option.preference_type)),
            option.preference_type.as_str(),
            option.label
        );
    }
    let _ = writeln!(out, "  {}  {:<18} remove the preference", symbol(None), "clear");
    out
}

pub fn render_pending(changes: &[PendingChange]) -> String {
    if changes.is_empty() {
        return "No pending changes\n".to_string();
    }
    let mut out = String::new();
    for change in changes {
        let _ = writeln!(
            out,
            "  {:<6} {} -> {}",
            change.operation.as_str(),
            change.cell,
            change
                .new_preference_type
                .map(|t| t.as_str())
                .unwrap_or("clear")
        );
    }
    out
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.level {
        NotificationLevel::Info => "info",
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    format!("[{tag}] {}", notification.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::editing::{render_grid, PendingChangeLedger, StoredPreferenceIndex};
    use chrono::NaiveTime;
    use std::collections::BTreeSet;
    use timetabler_domain::{catalog_for, CellAddress, DayOfWeek, Period, ResourceKind};

    #[test]
    fn grid_marks_pending_and_selected_cells() {
        let period = Period::new(
            "P1",
            1,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 45, 0).unwrap(),
        )
        .with_days([DayOfWeek::Monday, DayOfWeek::Tuesday]);
        let cell = CellAddress::new(period.id, DayOfWeek::Monday);
        let mut ledger = PendingChangeLedger::new();
        ledger.record_change(cell, Some(PreferenceType::MustNotSchedule), None);

        let grid = render_grid(
            &[period],
            &DayOfWeek::first_n(3),
            &StoredPreferenceIndex::new(),
            &ledger,
            &BTreeSet::from([cell]),
        );
        let text = render_grid_text(&grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Mon"));
        assert!(lines[1].starts_with("1 P1 08:00-08:45"));
        assert!(lines[1].contains("[X*]"));
        assert!(lines[1].contains('.'));
    }

    #[test]
    fn catalog_lists_every_option_and_clear() {
        let text = render_catalog(catalog_for(ResourceKind::Rule));
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("MUST_NOT_SCHEDULE"));
        assert!(text.contains("clear"));
        assert_eq!(render_catalog(&[]), "No resource selected\n");
    }
}
