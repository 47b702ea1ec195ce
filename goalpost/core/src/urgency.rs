use crate::deadline::Deadline;
use chrono::NaiveDateTime;

const MILLIS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// How pressing a deadline is, used only to pick a visual emphasis.
///
/// Ordered from least to most urgent so `level()` and `Ord` agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Urgency {
    /// No deadline at all.
    #[default]
    None,
    /// Due in three days or more.
    Normal,
    /// Due within three days.
    Soon,
    /// Due within a day, or already overdue.
    Urgent,
}

impl Urgency {
    /// Classifies a deadline relative to `now`.
    pub fn classify(deadline: Option<Deadline>, now: NaiveDateTime) -> Self {
        let Some(deadline) = deadline else {
            return Urgency::None;
        };
        let days = (deadline.at() - now).num_milliseconds() as f64 / MILLIS_PER_DAY;

        if days < 1.0 {
            Urgency::Urgent
        } else if days < 3.0 {
            Urgency::Soon
        } else {
            Urgency::Normal
        }
    }

    /// Numeric level: 0 for no deadline up to 3 for urgent.
    pub fn level(self) -> u8 {
        match self {
            Urgency::None => 0,
            Urgency::Normal => 1,
            Urgency::Soon => 2,
            Urgency::Urgent => 3,
        }
    }
}
