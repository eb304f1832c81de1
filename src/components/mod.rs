//! Clients and payload types for the external backends the dashboard talks to.

pub mod agents;
pub mod calendar_service;

pub use agents::{AgentApiClient, AgentService};
pub use calendar_service::{CalendarApiClient, CalendarService, CalendarServiceHandle};
