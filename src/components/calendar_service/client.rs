use super::models::{CreateEventRequest, DeleteEventResponse, EventList, UpdateEventRequest};
use super::CalendarService;
use crate::calendar::CalendarEvent;
use crate::config::Config;
use crate::error::{calendar_api_error, AppResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

/// Header carrying the backend API key
const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the calendar backend
#[derive(Debug, Clone)]
pub struct CalendarApiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl CalendarApiClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> AppResult<Self> {
        // Fail early on a base URL that can never work
        Url::parse(base_url)
            .map_err(|e| calendar_api_error(&format!("Invalid base URL {}: {}", base_url, e)))?;

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(&config.calendar_api_base_url, config.calendar_api_key.clone())
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> AppResult<Url> {
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| calendar_api_error(&format!("Failed to parse URL: {}", e)))?;
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }
        Ok(url)
    }

    /// Send a request and return the JSON body of a successful reply
    async fn send(&self, request: RequestBuilder) -> AppResult<Value> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or_default();
            let message = error_message(&body)
                .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));
            warn!("Calendar backend returned {}: {}", status, message);
            return Err(calendar_api_error(&message));
        }

        let body: Value = response.json().await?;
        Ok(body)
    }
}

#[async_trait]
impl CalendarService for CalendarApiClient {
    async fn list_events(&self, calendar_id: &str, upcoming_only: bool) -> AppResult<EventList> {
        if calendar_id.trim().is_empty() {
            return Err(calendar_api_error("Calendar ID is required"));
        }

        let upcoming = upcoming_only.to_string();
        let url = self.endpoint(
            "event/list",
            &[("calendar_id", calendar_id), ("upcoming_only", &upcoming)],
        )?;
        debug!("Listing events from {}", url);

        let body = self.send(self.client.get(url)).await?;
        let list = parse_event_list(body)?;
        info!(
            "Fetched {} events for calendar {}",
            list.events.len(),
            calendar_id
        );
        Ok(list)
    }

    async fn create_event(&self, request: &CreateEventRequest) -> AppResult<CalendarEvent> {
        request.validate()?;

        let url = self.endpoint("event/create", &[])?;
        let body = self.send(self.client.post(url).json(request)).await?;
        let event = parse_event(unwrap_data(body))?;
        info!("Created event {} in calendar {}", event.id, request.calendar_id);
        Ok(event)
    }

    async fn update_event(&self, request: &UpdateEventRequest) -> AppResult<CalendarEvent> {
        request.validate()?;

        let url = self.endpoint("event/update", &[])?;
        let body = self.send(self.client.put(url).json(request)).await?;
        let event = parse_event(unwrap_data(body))?;
        info!("Updated event {} in calendar {}", request.event_id, request.calendar_id);
        Ok(event)
    }

    async fn delete_event(&self, calendar_id: &str, event_id: &str) -> AppResult<DeleteEventResponse> {
        if calendar_id.trim().is_empty() || event_id.trim().is_empty() {
            return Err(calendar_api_error("Calendar ID and Event ID are required"));
        }

        let url = self.endpoint(
            "event/delete",
            &[("calendar_id", calendar_id), ("event_id", event_id)],
        )?;
        let body = self.send(self.client.delete(url)).await?;
        let response = serde_json::from_value(unwrap_data(body))?;
        info!("Deleted event {} from calendar {}", event_id, calendar_id);
        Ok(response)
    }
}

/// Pull `detail` or `error` out of an error body
fn error_message(body: &Value) -> Option<String> {
    ["detail", "error"].iter().find_map(|key| match body.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    })
}

/// Strip a `data` envelope if the backend added one
fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.get("data").is_some_and(|d| !d.is_null()) => {
            map.remove("data").unwrap_or_default()
        }
        other => other,
    }
}

/// Accepts `{data:{data:{events}}}`, `{data:{events}}` and `{events}`
pub(crate) fn parse_event_list(body: Value) -> AppResult<EventList> {
    let mut payload = body;
    for _ in 0..2 {
        if payload.get("events").is_some() {
            break;
        }
        payload = unwrap_data(payload);
    }

    let mut payload = match payload {
        Value::Object(map) => map,
        _ => return Err(calendar_api_error("No events in response")),
    };

    let events = match payload.remove("events") {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => Vec::new(),
        Some(_) => return Err(calendar_api_error("Events field is not a list")),
    };

    let events = events
        .into_iter()
        .map(parse_event)
        .collect::<AppResult<Vec<_>>>()?;

    let mut list: EventList = serde_json::from_value(Value::Object(payload))?;
    if list.total_count == 0 {
        list.total_count = events.len();
    }
    list.events = events;
    Ok(list)
}

/// Deserialize one event; a non-empty backend `event_id` replaces `id`
pub(crate) fn parse_event(mut value: Value) -> AppResult<CalendarEvent> {
    if let Value::Object(map) = &mut value {
        let event_id = map
            .get("event_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        if let Some(event_id) = event_id {
            map.insert("id".to_string(), Value::String(event_id));
        }
    }
    Ok(serde_json::from_value(value)?)
}
