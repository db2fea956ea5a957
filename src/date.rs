//! Date helpers

use chrono::{DateTime, TimeZone};
use std::cmp::Ordering;

/// `yyyy-MM-ddTHH:mm:ss.SSS` followed by the numeric UTC offset (`+0000`).
pub const POSTGRES_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Formats `date` for a Postgres `timestamptz` column, keeping the offset
/// of its own time zone.
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use helpful_extensions::date::to_postgres_date;
///
/// let tz = FixedOffset::east_opt(2 * 3600).unwrap();
/// let date = tz.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(to_postgres_date(&date), "2024-03-09T14:05:07.000+0200");
/// ```
pub fn to_postgres_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    date.format(POSTGRES_FORMAT).to_string()
}

/// Orders two instants regardless of the zone each is expressed in.
pub fn compare_dates<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>) -> Ordering {
    a.naive_utc().cmp(&b.naive_utc())
}
