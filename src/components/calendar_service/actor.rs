use super::models::{CreateEventRequest, DeleteEventResponse, EventList, UpdateEventRequest};
use super::CalendarService;
use crate::calendar::CalendarEvent;
use crate::error::{calendar_api_error, AppResult};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// Size of the actor's command mailbox
const MAILBOX_SIZE: usize = 32;

/// Actor that serializes access to a calendar service
pub struct CalendarServiceActor {
    service: Arc<dyn CalendarService>,
    command_rx: mpsc::Receiver<CalendarServiceCommand>,
}

/// Commands that can be sent to the calendar service actor
pub enum CalendarServiceCommand {
    ListEvents {
        calendar_id: String,
        upcoming_only: bool,
        respond_to: oneshot::Sender<AppResult<EventList>>,
    },
    CreateEvent {
        request: CreateEventRequest,
        respond_to: oneshot::Sender<AppResult<CalendarEvent>>,
    },
    UpdateEvent {
        request: UpdateEventRequest,
        respond_to: oneshot::Sender<AppResult<CalendarEvent>>,
    },
    DeleteEvent {
        calendar_id: String,
        event_id: String,
        respond_to: oneshot::Sender<AppResult<DeleteEventResponse>>,
    },
    Shutdown,
}

/// Handle for communicating with the calendar service actor
#[derive(Clone)]
pub struct CalendarServiceActorHandle {
    command_tx: mpsc::Sender<CalendarServiceCommand>,
}

impl CalendarServiceActorHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<AppResult<T>>) -> CalendarServiceCommand,
    ) -> AppResult<T> {
        let (response_tx, response_rx) = oneshot::channel();
        self.command_tx
            .send(build(response_tx))
            .await
            .map_err(|e| calendar_api_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .await
            .map_err(|_| calendar_api_error("Response channel closed"))?
    }

    pub async fn list_events(&self, calendar_id: &str, upcoming_only: bool) -> AppResult<EventList> {
        let calendar_id = calendar_id.to_string();
        self.request(|respond_to| CalendarServiceCommand::ListEvents {
            calendar_id,
            upcoming_only,
            respond_to,
        })
        .await
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> AppResult<CalendarEvent> {
        self.request(|respond_to| CalendarServiceCommand::CreateEvent { request, respond_to })
            .await
    }

    pub async fn update_event(&self, request: UpdateEventRequest) -> AppResult<CalendarEvent> {
        self.request(|respond_to| CalendarServiceCommand::UpdateEvent { request, respond_to })
            .await
    }

    pub async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AppResult<DeleteEventResponse> {
        let calendar_id = calendar_id.to_string();
        let event_id = event_id.to_string();
        self.request(|respond_to| CalendarServiceCommand::DeleteEvent {
            calendar_id,
            event_id,
            respond_to,
        })
        .await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> AppResult<()> {
        let _ = self.command_tx.send(CalendarServiceCommand::Shutdown).await;
        Ok(())
    }
}

impl CalendarServiceActor {
    /// Create a new actor and return its handle
    pub fn new(service: Arc<dyn CalendarService>) -> (Self, CalendarServiceActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(MAILBOX_SIZE);
        let actor = Self { service, command_rx };
        (actor, CalendarServiceActorHandle { command_tx })
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Calendar service actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                CalendarServiceCommand::ListEvents {
                    calendar_id,
                    upcoming_only,
                    respond_to,
                } => {
                    let result = self.service.list_events(&calendar_id, upcoming_only).await;
                    let _ = respond_to.send(result);
                }
                CalendarServiceCommand::CreateEvent { request, respond_to } => {
                    let result = self.service.create_event(&request).await;
                    let _ = respond_to.send(result);
                }
                CalendarServiceCommand::UpdateEvent { request, respond_to } => {
                    let result = self.service.update_event(&request).await;
                    let _ = respond_to.send(result);
                }
                CalendarServiceCommand::DeleteEvent {
                    calendar_id,
                    event_id,
                    respond_to,
                } => {
                    let result = self.service.delete_event(&calendar_id, &event_id).await;
                    let _ = respond_to.send(result);
                }
                CalendarServiceCommand::Shutdown => {
                    info!("Calendar service actor shutting down");
                    break;
                }
            }
        }

        info!("Calendar service actor shut down");
    }
}
