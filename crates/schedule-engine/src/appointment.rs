//! Appointment records and the trait the grouper reads them through.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, ScheduleError};

/// Anything with an identifier and a time span can be grouped.
///
/// The grouper only reads these three accessors. Callers keep their own record
/// type and get the same objects back inside each group.
pub trait Scheduled {
    fn id(&self) -> &str;
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;
}

/// A single appointment as delivered by the scheduling query.
///
/// Fields other than `id`, `start` and `end` (dentist, patient, color,
/// description, ...) are kept verbatim in `extra` and serialized back inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Appointment {
    pub fn new(id: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            extra: Map::new(),
        }
    }

    /// Attach an extra field carried through grouping untouched.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

impl Scheduled for Appointment {
    fn id(&self) -> &str {
        &self.id
    }

    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

impl<T: Scheduled> Scheduled for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn start(&self) -> DateTime<Utc> {
        (**self).start()
    }

    fn end(&self) -> DateTime<Utc> {
        (**self).end()
    }
}

/// Reject input the grouper would silently misplace.
///
/// The grouper accepts inverted intervals and repeated ids as given; surfaces
/// that receive appointments from outside (CLI, WASM) call this first so bad
/// data fails loudly instead of producing a misleading calendar.
///
/// # Errors
/// Returns `ScheduleError::InvertedInterval` for the first appointment whose end
/// precedes its start, or `ScheduleError::DuplicateId` for the first repeated id.
pub fn validate_appointments<T: Scheduled>(appointments: &[T]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(appointments.len());

    for appt in appointments {
        if appt.end() < appt.start() {
            return Err(ScheduleError::InvertedInterval {
                id: appt.id().to_string(),
            });
        }
        if !seen.insert(appt.id()) {
            return Err(ScheduleError::DuplicateId {
                id: appt.id().to_string(),
            });
        }
    }

    Ok(())
}
