use super::filter::events_on;
use super::grid::CalendarDayCell;
use super::models::CalendarEvent;
use super::state::CalendarState;
use chrono::{Datelike, NaiveDate};

const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Render the month view as plain text.
///
/// Each cell is `<mark><day><today><events>`: mark is `>` for the selected
/// day and `.` for days of a neighbouring month, today carries `*`, and the
/// event count is a digit (or `+` above nine).
pub fn render_month(state: &CalendarState, events: &[CalendarEvent]) -> String {
    let header: Vec<String> = WEEKDAY_LABELS.iter().map(|d| format!("{:>5}", d)).collect();

    let mut lines = vec![
        state.current_month().format("%B %Y").to_string(),
        header.join(" "),
    ];
    let cells = state.day_cells(events);
    for week in cells.chunks(7) {
        let row: Vec<String> = week.iter().map(render_cell).collect();
        lines.push(row.join(" "));
    }

    join_lines(&lines)
}

fn render_cell(cell: &CalendarDayCell<'_>) -> String {
    let mark = if cell.is_selected {
        '>'
    } else if cell.is_outside_month {
        '.'
    } else {
        ' '
    };
    let today = if cell.is_today { '*' } else { ' ' };
    let count = match cell.events.len() {
        0 => ' ',
        n @ 1..=9 => char::from_digit(n as u32, 10).unwrap_or('+'),
        _ => '+',
    };
    format!("{}{:>2}{}{}", mark, cell.date.day(), today, count)
}

/// Render the events panel for `date`, showing at most `limit` entries
pub fn render_events_panel(date: NaiveDate, events: &[CalendarEvent], limit: usize) -> String {
    let mut lines = vec![format!("Events for {}", date.format("%A, %B %d, %Y"))];

    let day_events = events_on(date, events);
    if day_events.is_empty() {
        lines.push("No events scheduled for this day".to_string());
        return join_lines(&lines);
    }

    for event in day_events.iter().take(limit) {
        let title = if event.summary.is_empty() {
            "(untitled)"
        } else {
            event.summary.as_str()
        };
        let mut line = format!(
            "- [{}] {} {}",
            event.kind().as_str(),
            event.time_range(),
            title
        );
        if let Some(location) = &event.location {
            line.push_str(&format!(" @ {}", location));
        }
        line.push_str(&format!(" ({} attendees)", event.attendee_count()));
        lines.push(line);
    }

    if day_events.len() > limit {
        lines.push(format!("... and {} more", day_events.len() - limit));
    }

    join_lines(&lines)
}

/// One line per entry, each newline-terminated
pub(crate) fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}
