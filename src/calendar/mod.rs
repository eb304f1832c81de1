//! Month grid, day filtering and month view state.

pub mod filter;
pub mod grid;
pub mod models;
pub mod state;
pub mod view;

pub use filter::{events_on, EventIndex};
pub use grid::{calendar_days, CalendarDayCell, CalendarGrid};
pub use models::{CalendarEvent, EventKind, EventTime};
pub use state::{CalendarAction, CalendarState};
