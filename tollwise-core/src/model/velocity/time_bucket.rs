use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// hour-of-day bucket a trip's pickup falls into.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeBucket(pub u8);

impl TimeBucket {
    pub fn of(ts: &NaiveDateTime) -> TimeBucket {
        TimeBucket(ts.hour() as u8)
    }
}

impl Display for TimeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}", self.0)
    }
}
