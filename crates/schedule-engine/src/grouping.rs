//! Group a day's appointments into non-overlapping display clusters.
//!
//! Appointments are ordered by `(start, end, id)` in minutes from the start of
//! the day, then merged left to right into a running group. An appointment
//! joins the group when it overlaps the group's current end and the merged
//! span stays within `max_group_duration_minutes`; otherwise it starts the next
//! group. The cap keeps a chain of back-to-back appointments from collapsing a
//! whole day into one block.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::appointment::Scheduled;
use crate::day::{day_start, minute_offset};
use crate::error::Result;

/// Default span cap for one group (three hours).
pub const DEFAULT_MAX_GROUP_DURATION_MINUTES: i64 = 180;

/// Tuning for [`group_appointments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupingOptions {
    /// Merging never lets `group.end - group.start` exceed this many minutes.
    pub max_group_duration_minutes: i64,
    /// When true, an appointment starting exactly at the group's end joins it.
    pub treat_touching_as_overlap: bool,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            max_group_duration_minutes: DEFAULT_MAX_GROUP_DURATION_MINUTES,
            treat_touching_as_overlap: true,
        }
    }
}

/// A cluster of appointments rendered as one calendar block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentGroup<T> {
    /// Earliest start among the members.
    pub start_time: DateTime<Utc>,
    /// Latest end among the members.
    pub end_time: DateTime<Utc>,
    /// Members in `(start, end, id)` order.
    pub appointments: Vec<T>,
}

impl<T> AppointmentGroup<T> {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn len(&self) -> usize {
        self.appointments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appointments.is_empty()
    }
}

/// An appointment paired with its minute offsets from the start of the day.
struct Span<'a, T> {
    item: &'a T,
    start_min: i64,
    end_min: i64,
}

/// A group under construction; `start_min` is fixed by its first member.
struct PendingGroup<'a, T> {
    start_min: i64,
    end_min: i64,
    members: Vec<&'a T>,
}

impl GroupingOptions {
    /// Whether `span` may join `group` under the overlap and span-cap rules.
    fn admits<T>(&self, group: &PendingGroup<'_, T>, span: &Span<'_, T>) -> bool {
        let overlaps = if self.treat_touching_as_overlap {
            span.start_min <= group.end_min
        } else {
            span.start_min < group.end_min
        };
        if !overlaps {
            return false;
        }

        let merged_end = group.end_min.max(span.end_min);
        merged_end - group.start_min <= self.max_group_duration_minutes
    }
}

/// Partition `appointments` into time-ordered display groups.
///
/// `appointments` must already be restricted to the target day; `day_start` is
/// the instant that day begins (see [`crate::day_start`]). Group bounds are
/// computed in whole minutes from `day_start` and converted back to instants.
///
/// Every input appointment lands in exactly one group. The output does not
/// depend on input order. Inverted or zero-length intervals are grouped as
/// given, and an appointment longer than the cap still forms its own group.
pub fn group_appointments<T: Scheduled + Clone>(
    appointments: &[T],
    day_start: DateTime<Utc>,
    options: &GroupingOptions,
) -> Vec<AppointmentGroup<T>> {
    let mut spans: Vec<Span<'_, T>> = appointments
        .iter()
        .map(|item| Span {
            item,
            start_min: minute_offset(item.start(), day_start),
            end_min: minute_offset(item.end(), day_start),
        })
        .collect();

    spans.sort_by(|a, b| {
        a.start_min
            .cmp(&b.start_min)
            .then(a.end_min.cmp(&b.end_min))
            .then_with(|| a.item.id().cmp(b.item.id()))
    });

    let mut pending: Vec<PendingGroup<'_, T>> = Vec::new();
    for span in spans {
        if let Some(current) = pending.last_mut() {
            if options.admits(current, &span) {
                current.end_min = current.end_min.max(span.end_min);
                current.members.push(span.item);
                continue;
            }
        }
        pending.push(PendingGroup {
            start_min: span.start_min,
            end_min: span.end_min,
            members: vec![span.item],
        });
    }

    tracing::debug!(
        appointments = appointments.len(),
        groups = pending.len(),
        cap = options.max_group_duration_minutes,
        touching = options.treat_touching_as_overlap,
        "grouped appointments"
    );

    pending
        .into_iter()
        .map(|group| AppointmentGroup {
            start_time: day_start + Duration::minutes(group.start_min),
            end_time: day_start + Duration::minutes(group.end_min),
            appointments: group.members.into_iter().cloned().collect(),
        })
        .collect()
}

/// Group appointments for a calendar `date` in the clinic's `timezone`.
///
/// Resolves local midnight with [`crate::day_start`] and delegates to
/// [`group_appointments`].
///
/// # Errors
/// Returns `ScheduleError::InvalidTimezone` if `timezone` is not an IANA
/// identifier.
pub fn group_appointments_on<T: Scheduled + Clone>(
    appointments: &[T],
    date: NaiveDate,
    timezone: &str,
    options: &GroupingOptions,
) -> Result<Vec<AppointmentGroup<T>>> {
    let anchor = day_start(date, timezone)?;
    Ok(group_appointments(appointments, anchor, options))
}
