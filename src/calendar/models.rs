use crate::utils::time::{parse_event_date, parse_event_time};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Start or end of an event as returned by the calendar backend.
///
/// Accepts `{"dateTime": "..."}`, the all-day `{"date": "..."}` form and a
/// bare string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "EventTimeRepr")]
pub struct EventTime {
    #[serde(rename = "dateTime")]
    pub date_time: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EventTimeRepr {
    Object {
        #[serde(rename = "dateTime", default)]
        date_time: Option<String>,
        #[serde(default)]
        date: Option<String>,
    },
    Text(String),
}

impl From<EventTimeRepr> for EventTime {
    fn from(repr: EventTimeRepr) -> Self {
        let date_time = match repr {
            EventTimeRepr::Object { date_time, date } => date_time.or(date).unwrap_or_default(),
            EventTimeRepr::Text(text) => text,
        };
        EventTime { date_time }
    }
}

impl EventTime {
    pub fn new(date_time: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
        }
    }

    /// Literal calendar date, `None` when unparseable
    pub fn date(&self) -> Option<NaiveDate> {
        parse_event_date(&self.date_time)
    }

    /// Literal wall-clock time, `None` for all-day or unparseable values
    pub fn time(&self) -> Option<NaiveTime> {
        parse_event_time(&self.date_time)
    }
}

/// Calendar event record
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CalendarEvent {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: EventTime,
    #[serde(default)]
    pub end: EventTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CalendarEvent {
    /// Create an event with the required fields
    pub fn new(
        id: impl Into<String>,
        summary: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            summary: summary.into(),
            start: EventTime::new(start),
            end: EventTime::new(end),
            ..Default::default()
        }
    }

    /// Calendar date the event starts on
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start.date()
    }

    /// Whether the event starts on `date`
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        self.start_date() == Some(date)
    }

    pub fn kind(&self) -> EventKind {
        EventKind::classify(&self.summary)
    }

    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    /// Format the time span as `HH:MM - HH:MM`
    pub fn time_range(&self) -> String {
        let format = |time: Option<NaiveTime>| match time {
            Some(t) => t.format("%H:%M").to_string(),
            None => "--:--".to_string(),
        };
        format!("{} - {}", format(self.start.time()), format(self.end.time()))
    }
}

/// Coarse category derived from an event summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Meeting,
    Call,
    Review,
    Event,
}

impl EventKind {
    /// Classify by keyword, checked in the order meeting, call, review
    pub fn classify(summary: &str) -> Self {
        let summary = summary.to_lowercase();
        if summary.contains("meeting") {
            EventKind::Meeting
        } else if summary.contains("call") {
            EventKind::Call
        } else if summary.contains("review") {
            EventKind::Review
        } else {
            EventKind::Event
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Meeting => "meeting",
            EventKind::Call => "call",
            EventKind::Review => "review",
            EventKind::Event => "event",
        }
    }
}
