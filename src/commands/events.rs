use super::{CommandContext, CommandResult};
use crate::calendar::view::join_lines;
use crate::calendar::CalendarEvent;
use crate::pagination::PaginationState;

/// Paginated table of all fetched events
pub async fn list(ctx: &CommandContext, page: usize) -> CommandResult {
    let events = ctx.fetch_events().await?;

    let mut pagination = PaginationState::new(ctx.config.page_size, events.len())?;
    pagination.go_to(page);

    let mut lines: Vec<String> = events[pagination.range()].iter().map(format_row).collect();
    if events.is_empty() {
        lines.push("No events found".to_string());
    }
    lines.push(pagination.render_controls());
    lines.push(pagination.summary());
    Ok(join_lines(&lines))
}

fn format_row(event: &CalendarEvent) -> String {
    let date = event
        .start_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "????-??-??".to_string());
    format!(
        "{} {} {:<8} {}",
        date,
        event.time_range(),
        event.kind().as_str(),
        event.summary
    )
}
