//! Day-first visit date parsing and recency.
//!
//! Roster exports write dates day-first (`15/03/2024`), with `/`, `-` or `.`
//! separators, optionally followed by a time of day. Spreadsheet tools that
//! re-save the files may switch to ISO order (`2024-03-15 00:00:00`); a
//! four-digit leading field selects ISO order.
//!
//! Unparseable values become [`VisitDate::Invalid`]. Nothing here fails or
//! substitutes a default date.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use painel_model::VisitDate;

const SECONDS_PER_DAY: i64 = 86_400;

/// Time-of-day formats accepted after the date part.
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S%.f", "%H:%M"];

/// Parse a day-first textual date.
///
/// Returns [`VisitDate::Invalid`] for blank or unparseable input, including
/// impossible calendar dates such as `31/02/2024`.
pub fn coerce_date(raw: &str) -> VisitDate {
    match parse_datetime(raw.trim()) {
        Some(value) => VisitDate::Valid(value),
        None => VisitDate::Invalid,
    }
}

/// Whole days from `date` to `reference_now`, rounded down.
///
/// Future visits give a negative count; no clamping is applied. Invalid
/// dates give `None`.
pub fn compute_recency(date: VisitDate, reference_now: NaiveDateTime) -> Option<i64> {
    let visit = date.datetime()?;
    let elapsed = reference_now - visit;
    Some(elapsed.num_seconds().div_euclid(SECONDS_PER_DAY))
}

/// Current local wall-clock time, the default reference for recency.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    let (date_part, time_part) = match value.find([' ', 'T']) {
        Some(idx) => (&value[..idx], Some(value[idx + 1..].trim())),
        None => (value, None),
    };
    let date = parse_date_part(date_part)?;
    let time = match time_part {
        None => NaiveTime::MIN,
        Some(time) => parse_time_part(time)?,
    };
    Some(date.and_time(time))
}

fn parse_time_part(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

fn parse_date_part(value: &str) -> Option<NaiveDate> {
    let fields: Vec<&str> = value.split(['/', '-', '.']).collect();
    let [first, second, third] = fields.as_slice() else {
        return None;
    };
    if !fields
        .iter()
        .all(|field| !field.is_empty() && field.chars().all(|ch| ch.is_ascii_digit()))
    {
        return None;
    }
    let (day, month, year) = if first.len() == 4 {
        (*third, *second, *first)
    } else {
        (*first, *second, *third)
    };
    if day.len() > 2 || month.len() > 2 {
        return None;
    }
    let year = expand_year(year)?;
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

/// Four-digit years pass through; two-digit years pivot at 70
/// (`00`-`69` → 2000s, `70`-`99` → 1900s).
fn expand_year(value: &str) -> Option<i32> {
    let year: i32 = value.parse().ok()?;
    match value.len() {
        4 => Some(year),
        2 if year < 70 => Some(2000 + year),
        2 => Some(1900 + year),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datetime(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[test]
    fn expands_two_digit_years() {
        assert_eq!(expand_year("24"), Some(2024));
        assert_eq!(expand_year("85"), Some(1985));
        assert_eq!(expand_year("2024"), Some(2024));
        assert_eq!(expand_year("024"), None);
    }

    #[test]
    fn parses_time_of_day() {
        assert_eq!(
            coerce_date("15/03/2024 14:30"),
            VisitDate::Valid(datetime(2024, 3, 15, 14, 30, 0))
        );
        assert_eq!(
            coerce_date("2024-03-15T08:05:09"),
            VisitDate::Valid(datetime(2024, 3, 15, 8, 5, 9))
        );
        assert_eq!(coerce_date("15/03/2024 25:00"), VisitDate::Invalid);
    }

    #[test]
    fn recency_rounds_down() {
        let now = datetime(2024, 3, 16, 6, 0, 0);
        let visit = VisitDate::Valid(datetime(2024, 3, 15, 12, 0, 0));
        assert_eq!(compute_recency(visit, now), Some(0));

        let future = VisitDate::Valid(datetime(2024, 3, 16, 12, 0, 0));
        assert_eq!(compute_recency(future, now), Some(-1));
    }
}
