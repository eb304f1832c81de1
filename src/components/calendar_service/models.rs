use crate::calendar::CalendarEvent;
use crate::error::{validation_error, AppResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /event/create`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub calendar_id: String,
    pub summary: String,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee_email: Option<String>,
}

impl CreateEventRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_fields(&[
            ("calendar_id", &self.calendar_id),
            ("summary", &self.summary),
            ("start", &self.start),
            ("end", &self.end),
        ])
    }
}

/// Body of `PUT /event/update`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub calendar_id: String,
    pub event_id: String,
    pub summary: String,
    pub start: String,
    pub end: String,
}

impl UpdateEventRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_fields(&[
            ("calendar_id", &self.calendar_id),
            ("event_id", &self.event_id),
            ("summary", &self.summary),
            ("start", &self.start),
            ("end", &self.end),
        ])
    }
}

/// Events page returned by `GET /event/list`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub calendar_id: String,
}

/// Reply to `DELETE /event/delete`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteEventResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub google_calendar_id: String,
}

fn require_fields(fields: &[(&str, &String)]) -> AppResult<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(validation_error(&format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
