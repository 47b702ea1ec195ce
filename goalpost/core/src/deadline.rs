//! Deadlines as entered through a `datetime-local` field: a wall-clock
//! date-time with no time zone attached.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const STORAGE_FORMAT: &str = "%Y-%m-%dT%H:%M";

const ACCEPTED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("`{0}` is not a date-time such as 2025-01-31T18:00")]
pub struct DeadlineParseError(String);

/// Point in local time by which a task should be finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline(NaiveDateTime);

impl Deadline {
    pub fn new(at: NaiveDateTime) -> Self {
        Deadline(at)
    }

    /// The local date-time of the deadline.
    pub fn at(&self) -> NaiveDateTime {
        self.0
    }

    /// The calendar date of the deadline, ignoring time of day.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl From<NaiveDateTime> for Deadline {
    fn from(at: NaiveDateTime) -> Self {
        Deadline(at)
    }
}

impl FromStr for Deadline {
    type Err = DeadlineParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ACCEPTED_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(Deadline)
            .ok_or_else(|| DeadlineParseError(s.to_string()))
    }
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STORAGE_FORMAT))
    }
}

impl Serialize for Deadline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Deadline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
