use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use clinic_calendar::calendar::{CalendarEvent, CalendarState};
use clinic_calendar::commands::{self, CommandContext};
use clinic_calendar::components::calendar_service::{
    CreateEventRequest, DeleteEventResponse, EventList, UpdateEventRequest,
};
use clinic_calendar::components::{CalendarService, CalendarServiceHandle};
use clinic_calendar::config::Config;
use clinic_calendar::error::{other_error, AppResult};
use std::collections::HashMap;
use std::sync::Arc;

fn test_config() -> Config {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("CALENDAR_API_BASE_URL", "http://localhost:8086"),
        ("CALENDAR_API_KEY", "test-key"),
        ("CALENDAR_ID", "doctor-1"),
        ("TIMEZONE", "Europe/Helsinki"),
        ("PAGE_SIZE", "3"),
    ]);
    Config::from_vars(|key| vars.get(key).map(|v| v.to_string())).unwrap()
}

struct StaticBackend(Vec<CalendarEvent>);

#[async_trait]
impl CalendarService for StaticBackend {
    async fn list_events(&self, calendar_id: &str, _upcoming_only: bool) -> AppResult<EventList> {
        Ok(EventList {
            events: self.0.clone(),
            total_count: self.0.len(),
            source: "static".to_string(),
            calendar_id: calendar_id.to_string(),
        })
    }

    async fn create_event(&self, _request: &CreateEventRequest) -> AppResult<CalendarEvent> {
        Err(other_error("read only"))
    }

    async fn update_event(&self, _request: &UpdateEventRequest) -> AppResult<CalendarEvent> {
        Err(other_error("read only"))
    }

    async fn delete_event(&self, _calendar_id: &str, _event_id: &str) -> AppResult<DeleteEventResponse> {
        Err(other_error("read only"))
    }
}

/// Smoke test to verify that the config can be built from variables
#[test]
fn test_config_loads() {
    let config = test_config();
    assert_eq!(config.calendar_id, "doctor-1");
    assert_eq!(config.page_size, 3);
    assert_eq!(config.events_panel_limit, 5);
    assert!(config.upcoming_only);
    assert_eq!(config.tz(), chrono_tz::Europe::Helsinki);
}

/// Month view and events table through the actor handle
#[tokio::test]
async fn test_commands_through_actor() {
    let events = vec![
        CalendarEvent::new("1", "Checkup", "2024-03-15T09:00:00", "2024-03-15T09:30:00"),
        CalendarEvent::new("2", "Staff meeting", "2024-03-15T12:00:00", "2024-03-15T13:00:00"),
        CalendarEvent::new("3", "Lab review", "2024-03-18T08:00:00", "2024-03-18T08:15:00"),
        CalendarEvent::new("4", "Broken", "not-a-date", "not-a-date"),
    ];
    let handle = CalendarServiceHandle::new(Arc::new(StaticBackend(events)));
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let ctx = CommandContext::new(Arc::new(test_config()), Arc::new(handle.clone())).with_today(today);

    let month = commands::calendar::month(&ctx, None, None).await.unwrap();
    assert!(month.starts_with("March 2024"));
    assert!(month.contains("[meeting] 12:00 - 13:00 Staff meeting"));
    assert!(!month.contains("Lab review"));

    let table = commands::events::list(&ctx, 1).await.unwrap();
    assert!(table.contains("????-??-?? --:-- - --:-- event    Broken"));
    assert!(table.contains("Showing 4 - 4 of 4 results"));

    handle.shutdown().await.unwrap();
}

/// Navigating months keeps the selection and the grid in sync
#[test]
fn test_month_navigation() {
    let today = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let mut state = CalendarState::new(today);

    state.go_to_next_month();
    assert_eq!(state.current_month(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
    assert_eq!(state.grid().len(), 35);

    state.go_to_today();
    assert_eq!(state.current_month().month0(), 0);
}
