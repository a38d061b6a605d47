//! Anchoring a calendar date to the instant its day begins.
//!
//! Grouping works on minute offsets from the start of the target day. The
//! start of a day is local midnight in the clinic's timezone, which DST can
//! make ambiguous (fall back) or skip entirely (spring forward at 00:00).

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{Result, ScheduleError};

/// Longest DST gap searched when local midnight does not exist.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Resolve the UTC instant of local midnight for `date` in `timezone`.
///
/// - Ambiguous midnight resolves to the earlier of the two instants.
/// - Skipped midnight resolves to the first local minute after the gap.
///
/// # Errors
/// Returns `ScheduleError::InvalidTimezone` if `timezone` is not an IANA
/// identifier, or `ScheduleError::UnresolvableDay` if no local minute of the
/// day maps to an instant.
pub fn day_start(date: NaiveDate, timezone: &str) -> Result<DateTime<Utc>> {
    let tz: Tz = timezone
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(timezone.to_string()))?;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| ScheduleError::UnresolvableDay(date.to_string()))?;

    for minute in 0..MAX_GAP_MINUTES {
        let local = midnight + Duration::minutes(minute);
        if let Some(resolved) = tz.from_local_datetime(&local).earliest() {
            if minute > 0 {
                tracing::debug!(%date, timezone, minute, "local midnight skipped by DST gap");
            }
            return Ok(resolved.with_timezone(&Utc));
        }
    }

    Err(ScheduleError::UnresolvableDay(date.to_string()))
}

/// Whole minutes from `day_start` to `instant`, truncated toward zero.
///
/// Negative for instants before the day begins and above 1440 for instants
/// after it ends; the presentation layer multiplies this by its slot height.
pub fn minute_offset(instant: DateTime<Utc>, day_start: DateTime<Utc>) -> i64 {
    (instant - day_start).num_minutes()
}
