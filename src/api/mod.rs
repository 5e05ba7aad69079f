pub mod collaboration;
pub mod dashboard;
pub mod directory;
pub mod notifications;
pub mod pages;
pub mod replacement;
pub mod reports;
pub mod shifts;
pub mod time_clock;

use chrono::{DateTime, Duration, NaiveTime, Utc};

/// Start and end of the UTC day containing `now`.
pub(crate) fn day_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}
