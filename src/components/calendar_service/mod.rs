mod actor;
mod client;
mod handle;
pub mod models;

pub use client::CalendarApiClient;
pub use handle::CalendarServiceHandle;
pub use models::{CreateEventRequest, DeleteEventResponse, EventList, UpdateEventRequest};

use crate::calendar::CalendarEvent;
use crate::error::AppResult;
use async_trait::async_trait;

/// Operations offered by the calendar backend, one method per endpoint
#[async_trait]
pub trait CalendarService: Send + Sync {
    /// List events of a calendar, optionally only upcoming ones
    async fn list_events(&self, calendar_id: &str, upcoming_only: bool) -> AppResult<EventList>;

    async fn create_event(&self, request: &CreateEventRequest) -> AppResult<CalendarEvent>;

    async fn update_event(&self, request: &UpdateEventRequest) -> AppResult<CalendarEvent>;

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AppResult<DeleteEventResponse>;
}
