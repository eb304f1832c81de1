use super::{CommandContext, CommandResult};
use crate::calendar::view::{render_events_panel, render_month};
use crate::calendar::CalendarState;
use chrono::NaiveDate;
use tracing::info;

/// Month view with the selected day's events underneath
pub async fn month(
    ctx: &CommandContext,
    month: Option<NaiveDate>,
    select: Option<NaiveDate>,
) -> CommandResult {
    let events = ctx.fetch_events().await?;

    let mut state = match month {
        Some(month) => CalendarState::with_month(ctx.today, month),
        None => CalendarState::new(ctx.today),
    };
    if let Some(date) = select {
        state.select_date(date);
    }
    info!(
        "Rendering {} with {} events",
        state.current_month().format("%Y-%m"),
        events.len()
    );

    let mut output = render_month(&state, &events);
    output.push('\n');
    output.push_str(&render_events_panel(
        state.selected_date(),
        &events,
        ctx.config.events_panel_limit,
    ));
    Ok(output)
}

/// Events panel for a single day, today by default
pub async fn day(ctx: &CommandContext, date: Option<NaiveDate>) -> CommandResult {
    let events = ctx.fetch_events().await?;
    let date = date.unwrap_or(ctx.today);
    Ok(render_events_panel(date, &events, ctx.config.events_panel_limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarEvent;
    use crate::commands::test_support::context;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("a", "Checkup", "2024-03-15T09:00:00", "2024-03-15T09:30:00"),
            CalendarEvent::new("b", "Review call", "2024-03-20T14:00:00", "2024-03-20T14:30:00"),
        ]
    }

    #[tokio::test]
    async fn test_month_defaults_to_today() {
        let ctx = context(events(), date(2024, 3, 15));
        let output = month(&ctx, None, None).await.unwrap();

        assert!(output.starts_with("March 2024"));
        assert!(output.contains("Events for Friday, March 15, 2024"));
        assert!(output.contains("Checkup"));
    }

    #[tokio::test]
    async fn test_month_with_explicit_selection() {
        let ctx = context(events(), date(2024, 1, 2));
        let output = month(&ctx, Some(date(2024, 3, 1)), Some(date(2024, 3, 20)))
            .await
            .unwrap();

        assert!(output.starts_with("March 2024"));
        assert!(output.contains("[call] 14:00 - 14:30 Review call"));
        assert!(!output.contains("Checkup"));
    }

    #[tokio::test]
    async fn test_day_without_events() {
        let ctx = context(events(), date(2024, 3, 16));
        let output = day(&ctx, None).await.unwrap();
        assert!(output.contains("No events scheduled for this day"));
    }
}
