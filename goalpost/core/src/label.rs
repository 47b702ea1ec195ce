//! Human readable deadline labels.

use crate::deadline::Deadline;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown locale `{0}`, expected `en` or `ja`")]
pub struct UnknownLocale(String);

/// Language used for labels and for speech recognition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[serde(alias = "en-US", alias = "en-us")]
    En,
    #[serde(alias = "ja-JP", alias = "ja-jp")]
    Ja,
}

impl Locale {
    /// BCP 47 tag handed to the speech recognizer.
    pub fn language_tag(self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Ja => "ja-JP",
        }
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "ja" | "ja-jp" => Ok(Locale::Ja),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Ja => f.write_str("ja"),
        }
    }
}

/// Calendar-day distance between a deadline and today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Tomorrow,
    Yesterday,
    DaysAgo(i64),
    DaysLater(i64),
}

impl RelativeDay {
    /// Compares dates only, so 23:59 today and 00:01 tomorrow are a day apart.
    pub fn between(date: NaiveDate, today: NaiveDate) -> Self {
        match (date - today).num_days() {
            0 => RelativeDay::Today,
            1 => RelativeDay::Tomorrow,
            -1 => RelativeDay::Yesterday,
            diff if diff < 0 => RelativeDay::DaysAgo(-diff),
            diff => RelativeDay::DaysLater(diff),
        }
    }

    pub fn text(self, locale: Locale) -> String {
        match (locale, self) {
            (Locale::En, RelativeDay::Today) => "today".to_string(),
            (Locale::En, RelativeDay::Tomorrow) => "tomorrow".to_string(),
            (Locale::En, RelativeDay::Yesterday) => "yesterday".to_string(),
            (Locale::En, RelativeDay::DaysAgo(n)) => format!("{n} days ago"),
            (Locale::En, RelativeDay::DaysLater(n)) => format!("{n} days later"),
            (Locale::Ja, RelativeDay::Today) => "今日".to_string(),
            (Locale::Ja, RelativeDay::Tomorrow) => "明日".to_string(),
            (Locale::Ja, RelativeDay::Yesterday) => "昨日".to_string(),
            (Locale::Ja, RelativeDay::DaysAgo(n)) => format!("{n}日前"),
            (Locale::Ja, RelativeDay::DaysLater(n)) => format!("{n}日後"),
        }
    }
}

/// Formats a deadline as a relative day followed by the absolute
/// month, day, hour and minute, e.g. `tomorrow (Oct 20, 09:30)`.
pub fn deadline_label(deadline: Deadline, now: NaiveDateTime, locale: Locale) -> String {
    let relative = RelativeDay::between(deadline.date(), now.date()).text(locale);
    let stamp = match locale {
        Locale::En => deadline.at().format("%b %-d, %H:%M"),
        Locale::Ja => deadline.at().format("%-m月%-d日 %H:%M"),
    };
    format!("{relative} ({stamp})")
}
