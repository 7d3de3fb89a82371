use chrono::{NaiveDate, NaiveDateTime, ParseResult};

pub const APP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const APP_DATETIME_FORMAT_T: &str = "%Y-%m-%dT%H:%M:%S";
pub const APP_DATE_FORMAT: &str = "%Y-%m-%d";

/// parses a timestamp in either of the two formats seen across monthly
/// trip extracts (space-separated and ISO "T"-separated).
pub fn parse_datetime(s: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, APP_DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, APP_DATETIME_FORMAT_T))
}

pub fn parse_date(s: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(s, APP_DATE_FORMAT)
}

/// number of calendar days in a month, leap-year aware.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}
