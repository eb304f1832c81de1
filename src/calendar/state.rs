use super::filter::{events_on, EventIndex};
use super::grid::{self, CalendarDayCell, CalendarGrid};
use super::models::CalendarEvent;
use crate::utils::time::{first_day_of_month, shift_months};
use chrono::{Datelike, NaiveDate};
use tracing::debug;

/// Actions that change the month view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarAction {
    PreviousMonth,
    NextMonth,
    /// Jump to today's month and select today
    Today,
    Select(NaiveDate),
    /// The wall clock moved to a new day
    DayChanged(NaiveDate),
}

/// Month view state: displayed month, selected day and today.
///
/// Only changed through [`CalendarState::apply`] and the wrappers around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarState {
    current_month: NaiveDate,
    selected_date: NaiveDate,
    today: NaiveDate,
}

impl CalendarState {
    /// Start on today's month with today selected
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current_month: first_day_of_month(today),
            selected_date: today,
            today,
        }
    }

    /// Start on a given month, keeping `today` for highlighting
    pub fn with_month(today: NaiveDate, month: NaiveDate) -> Self {
        Self {
            current_month: first_day_of_month(month),
            selected_date: today,
            today,
        }
    }

    pub fn apply(&mut self, action: CalendarAction) {
        match action {
            CalendarAction::PreviousMonth => {
                self.current_month = shift_months(self.current_month, -1);
            }
            CalendarAction::NextMonth => {
                self.current_month = shift_months(self.current_month, 1);
            }
            CalendarAction::Today => {
                self.current_month = first_day_of_month(self.today);
                self.selected_date = self.today;
            }
            CalendarAction::Select(date) => {
                self.selected_date = date;
            }
            CalendarAction::DayChanged(today) => {
                self.today = today;
            }
        }
        debug!(
            "Calendar state after {:?}: month={} selected={}",
            action, self.current_month, self.selected_date
        );
    }

    pub fn go_to_previous_month(&mut self) {
        self.apply(CalendarAction::PreviousMonth);
    }

    pub fn go_to_next_month(&mut self) {
        self.apply(CalendarAction::NextMonth);
    }

    pub fn go_to_today(&mut self) {
        self.apply(CalendarAction::Today);
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.apply(CalendarAction::Select(date));
    }

    /// First day of the displayed month
    pub fn current_month(&self) -> NaiveDate {
        self.current_month
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn grid(&self) -> CalendarGrid {
        CalendarGrid::for_month(self.current_month)
    }

    pub fn is_today<D: Datelike>(&self, date: &D) -> bool {
        grid::is_today(date, self.today)
    }

    pub fn is_selected<D: Datelike>(&self, date: &D) -> bool {
        grid::is_selected(date, self.selected_date)
    }

    pub fn is_outside_month<D: Datelike>(&self, date: &D) -> bool {
        grid::is_outside_month(date, self.current_month)
    }

    /// Cells for the displayed month with their events
    pub fn day_cells<'a>(&self, events: &'a [CalendarEvent]) -> Vec<CalendarDayCell<'a>> {
        let index = EventIndex::build(events);
        self.grid().cells(self.today, self.selected_date, &index)
    }

    /// Events for the selected day, in backend order
    pub fn events_for_selected_date<'a>(&self, events: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
        events_on(self.selected_date, events)
    }
}
