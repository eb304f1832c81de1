use super::filter::EventIndex;
use super::models::CalendarEvent;
use crate::utils::time::{add_days, days_from_sunday, first_day_of_month, last_day_of_month};
use chrono::{Datelike, NaiveDate};

/// Number of days in a week row
pub const DAYS_PER_WEEK: usize = 7;

/// Sunday-start month grid padded to whole weeks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    month: NaiveDate,
    days: Vec<NaiveDate>,
}

impl CalendarGrid {
    /// Build the grid for the month containing `reference`
    pub fn for_month(reference: NaiveDate) -> Self {
        let first = first_day_of_month(reference);
        let last = last_day_of_month(reference);

        let start = add_days(first, -days_from_sunday(first));
        let end = add_days(last, 6 - days_from_sunday(last));

        let days = start.iter_days().take_while(|day| *day <= end).collect();

        Self { month: first, days }
    }

    /// First day of the month the grid was built for
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Week rows, Sunday through Saturday
    pub fn weeks(&self) -> impl Iterator<Item = &[NaiveDate]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// Whether `date` is a lead or trail day from a neighbouring month
    pub fn is_outside_month<D: Datelike>(&self, date: &D) -> bool {
        is_outside_month(date, self.month)
    }

    /// Cells with their flags and events
    pub fn cells<'a>(
        &self,
        today: NaiveDate,
        selected: NaiveDate,
        index: &EventIndex<'a>,
    ) -> Vec<CalendarDayCell<'a>> {
        self.days
            .iter()
            .map(|&date| CalendarDayCell {
                date,
                is_today: is_same_day(&date, &today),
                is_selected: is_same_day(&date, &selected),
                is_outside_month: self.is_outside_month(&date),
                events: index.on(date).to_vec(),
            })
            .collect()
    }
}

/// One rendered day of the month grid
#[derive(Debug, Clone)]
pub struct CalendarDayCell<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_outside_month: bool,
    pub events: Vec<&'a CalendarEvent>,
}

/// Padded day sequence for the month containing `reference`
pub fn calendar_days(reference: NaiveDate) -> Vec<NaiveDate> {
    CalendarGrid::for_month(reference).days
}

/// Year, month and day-of-month equality, ignoring any time of day
pub fn is_same_day<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

pub fn is_today<D: Datelike>(date: &D, today: NaiveDate) -> bool {
    is_same_day(date, &today)
}

pub fn is_selected<D: Datelike>(date: &D, selected: NaiveDate) -> bool {
    is_same_day(date, &selected)
}

/// Compares the month number only, like the month view it feeds
pub fn is_outside_month<D: Datelike, M: Datelike>(date: &D, current_month: M) -> bool {
    date.month() != current_month.month()
}
