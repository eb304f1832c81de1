use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};

/// Extract the literal calendar date of an event timestamp.
///
/// Only the `YYYY-MM-DD` part before `T` is read, so an offset such as
/// `+02:00` never moves the event to another day.
pub fn parse_event_date(date_time: &str) -> Option<NaiveDate> {
    let date_part = date_time.trim().split(['T', ' ']).next()?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Extract the literal wall-clock time of an event timestamp.
pub fn parse_event_time(date_time: &str) -> Option<NaiveTime> {
    let (_, time_part) = date_time.trim().split_once(['T', ' '])?;

    // Drop the offset, then fractional seconds
    let end = time_part
        .find(|c: char| c == 'Z' || c == 'z' || c == '+' || c == '-')
        .unwrap_or(time_part.len());
    let time_part = &time_part[..end];
    let time_part = time_part.split('.').next()?;

    NaiveTime::parse_from_str(time_part, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time_part, "%H:%M"))
        .ok()
}

/// Literal date and time of an event timestamp
pub fn parse_event_date_time(date_time: &str) -> Option<NaiveDateTime> {
    let date = parse_event_date(date_time)?;
    let time = parse_event_time(date_time).unwrap_or(NaiveTime::MIN);
    Some(date.and_time(time))
}

/// Parse a `YYYY-MM` month argument into the first day of that month
pub fn parse_year_month(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value.trim()), "%Y-%m-%d").ok()
}

/// First day of the month containing `date`
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Weekday index with Sunday as 0 and Saturday as 6
pub fn days_from_sunday(date: NaiveDate) -> i64 {
    date.weekday().num_days_from_sunday() as i64
}

/// Shift by whole months, landing on the first day of the target month
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let first = first_day_of_month(date);
    let shifted = if months >= 0 {
        first.checked_add_months(Months::new(months as u32))
    } else {
        first.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(first)
}

/// Add a number of days, saturating at the calendar bounds
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_event_date() {
        assert_eq!(parse_event_date("2024-03-15T09:00:00"), Some(date(2024, 3, 15)));
        assert_eq!(parse_event_date("2024-03-15T23:30:00-08:00"), Some(date(2024, 3, 15)));
        assert_eq!(parse_event_date("2024-03-15T00:30:00Z"), Some(date(2024, 3, 15)));
        assert_eq!(parse_event_date("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse_event_date("2024-03-15 09:00:00"), Some(date(2024, 3, 15)));

        // Malformed values never produce a date
        assert_eq!(parse_event_date(""), None);
        assert_eq!(parse_event_date("not a date"), None);
        assert_eq!(parse_event_date("2024-13-01T09:00:00"), None);
        assert_eq!(parse_event_date("2024-02-30T09:00:00"), None);
    }

    #[test]
    fn test_parse_event_time() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        assert_eq!(parse_event_time("2024-03-15T09:00:00"), Some(nine));
        assert_eq!(parse_event_time("2024-03-15T09:00:00.000Z"), Some(nine));
        assert_eq!(parse_event_time("2024-03-15T09:00:00+02:00"), Some(nine));
        assert_eq!(parse_event_time("2024-03-15T09:00:00-05:00"), Some(nine));
        assert_eq!(parse_event_time("2024-03-15T09:00"), Some(nine));

        assert_eq!(parse_event_time("2024-03-15"), None);
        assert_eq!(parse_event_time("2024-03-15T25:00:00"), None);
    }

    #[test]
    fn test_parse_event_date_time() {
        let parsed = parse_event_date_time("2024-03-15T14:45:10Z").unwrap();
        assert_eq!(parsed.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-03-15 14:45:10");

        // All-day values start at midnight
        let parsed = parse_event_date_time("2024-03-15").unwrap();
        assert_eq!(parsed.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(first_day_of_month(date(2024, 2, 17)), date(2024, 2, 1));
        assert_eq!(last_day_of_month(date(2024, 2, 17)), date(2024, 2, 29));
        assert_eq!(last_day_of_month(date(2023, 2, 1)), date(2023, 2, 28));
        assert_eq!(last_day_of_month(date(2024, 12, 31)), date(2024, 12, 31));
        assert_eq!(last_day_of_month(date(2024, 4, 30)), date(2024, 4, 30));
    }

    #[test]
    fn test_shift_months() {
        assert_eq!(shift_months(date(2024, 1, 31), 1), date(2024, 2, 1));
        assert_eq!(shift_months(date(2024, 1, 31), -1), date(2023, 12, 1));
        assert_eq!(shift_months(date(2024, 12, 5), 1), date(2025, 1, 1));
        assert_eq!(shift_months(date(2024, 3, 5), 0), date(2024, 3, 1));
        assert_eq!(shift_months(date(2024, 3, 5), -14), date(2023, 1, 1));
    }

    #[test]
    fn test_days_from_sunday() {
        // 2023-01-01 was a Sunday
        assert_eq!(days_from_sunday(date(2023, 1, 1)), 0);
        assert_eq!(days_from_sunday(date(2023, 1, 4)), 3);
        assert_eq!(days_from_sunday(date(2023, 1, 7)), 6);
    }

    #[test]
    fn test_parse_year_month() {
        assert_eq!(parse_year_month("2024-03"), Some(date(2024, 3, 1)));
        assert_eq!(parse_year_month("2024-3"), Some(date(2024, 3, 1)));
        assert_eq!(parse_year_month("2024-13"), None);
        assert_eq!(parse_year_month("march"), None);
    }
}
