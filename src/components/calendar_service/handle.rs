use super::actor::{CalendarServiceActor, CalendarServiceActorHandle};
use super::models::{CreateEventRequest, DeleteEventResponse, EventList, UpdateEventRequest};
use super::CalendarService;
use crate::calendar::CalendarEvent;
use crate::error::AppResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the calendar service actor
#[derive(Clone)]
pub struct CalendarServiceHandle {
    actor_handle: CalendarServiceActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl CalendarServiceHandle {
    /// Create a new handle and spawn the actor on the current runtime
    pub fn new(service: Arc<dyn CalendarService>) -> Self {
        let (mut actor, handle) = CalendarServiceActor::new(service);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl CalendarService for CalendarServiceHandle {
    async fn list_events(&self, calendar_id: &str, upcoming_only: bool) -> AppResult<EventList> {
        self.actor_handle.list_events(calendar_id, upcoming_only).await
    }

    async fn create_event(&self, request: &CreateEventRequest) -> AppResult<CalendarEvent> {
        self.actor_handle.create_event(request.clone()).await
    }

    async fn update_event(&self, request: &UpdateEventRequest) -> AppResult<CalendarEvent> {
        self.actor_handle.update_event(request.clone()).await
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AppResult<DeleteEventResponse> {
        self.actor_handle.delete_event(calendar_id, event_id).await
    }
}
