use super::models::CalendarEvent;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Events starting on `date`, in their original order.
///
/// Matching compares the literal date written in `start.dateTime`; events
/// whose timestamp cannot be read never match.
pub fn events_on(date: NaiveDate, events: &[CalendarEvent]) -> Vec<&CalendarEvent> {
    events.iter().filter(|event| event.occurs_on(date)).collect()
}

/// Events grouped by the calendar date they start on
#[derive(Debug, Default)]
pub struct EventIndex<'a> {
    by_date: BTreeMap<NaiveDate, Vec<&'a CalendarEvent>>,
    unparseable: usize,
}

impl<'a> EventIndex<'a> {
    /// Group events by start date, keeping input order within a day
    pub fn build(events: &'a [CalendarEvent]) -> Self {
        let mut index = EventIndex::default();
        for event in events {
            match event.start_date() {
                Some(date) => index.by_date.entry(date).or_default().push(event),
                None => {
                    debug!(
                        "Skipping event {} with unreadable start {:?}",
                        event.id, event.start.date_time
                    );
                    index.unparseable += 1;
                }
            }
        }
        index
    }

    /// Events on `date`, empty when there are none
    pub fn on(&self, date: NaiveDate) -> &[&'a CalendarEvent] {
        self.by_date.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.on(date).len()
    }

    /// Events in the inclusive date range, ordered by date
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&'a CalendarEvent> {
        if from > to {
            return Vec::new();
        }
        self.by_date
            .range(from..=to)
            .flat_map(|(_, events)| events.iter().copied())
            .collect()
    }

    /// Number of events dropped because their start could not be read
    pub fn unparseable(&self) -> usize {
        self.unparseable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent::new("a", "Checkup", "2024-03-15T09:00:00", "2024-03-15T09:30:00"),
            CalendarEvent::new("b", "Surgery", "2024-03-16T09:00:00", "2024-03-16T12:00:00"),
        ]
    }

    #[test]
    fn test_events_on_matches_single_day() {
        let events = sample_events();

        let found = events_on(date(2024, 3, 15), &events);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "a");

        assert!(events_on(date(2024, 3, 17), &events).is_empty());
    }

    #[test]
    fn test_events_on_keeps_order() {
        let events = vec![
            CalendarEvent::new("late", "Late", "2024-03-15T17:00:00", "2024-03-15T18:00:00"),
            CalendarEvent::new("other", "Other", "2024-03-14T08:00:00", "2024-03-14T09:00:00"),
            CalendarEvent::new("early", "Early", "2024-03-15T08:00:00", "2024-03-15T09:00:00"),
        ];
        let ids: Vec<_> = events_on(date(2024, 3, 15), &events)
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[test]
    fn test_offset_does_not_move_day() {
        // Late evening with a negative offset stays on the written date
        let events = vec![CalendarEvent::new(
            "x",
            "Night call",
            "2024-03-15T23:30:00-08:00",
            "2024-03-16T00:30:00-08:00",
        )];
        assert_eq!(events_on(date(2024, 3, 15), &events).len(), 1);
        assert!(events_on(date(2024, 3, 16), &events).is_empty());
    }

    #[test]
    fn test_malformed_start_never_matches() {
        let events = vec![
            CalendarEvent::new("bad", "Broken", "soon", ""),
            CalendarEvent::new("ok", "Fine", "2024-03-15T10:00:00", "2024-03-15T11:00:00"),
        ];
        let found = events_on(date(2024, 3, 15), &events);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "ok");

        let index = EventIndex::build(&events);
        assert_eq!(index.unparseable(), 1);
        assert_eq!(index.count_on(date(2024, 3, 15)), 1);
    }

    #[test]
    fn test_index_agrees_with_filter() {
        let events = sample_events();
        let index = EventIndex::build(&events);

        for day in [date(2024, 3, 14), date(2024, 3, 15), date(2024, 3, 16)] {
            let direct: Vec<_> = events_on(day, &events).iter().map(|e| &e.id).collect();
            let indexed: Vec<_> = index.on(day).iter().map(|e| &e.id).collect();
            assert_eq!(direct, indexed);
        }

        let range = index.between(date(2024, 3, 1), date(2024, 3, 31));
        assert_eq!(range.len(), 2);
        assert!(index.between(date(2024, 3, 31), date(2024, 3, 1)).is_empty());
    }
}
