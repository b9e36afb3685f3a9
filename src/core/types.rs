//! Value objects produced by calendar queries

use serde::{Deserialize, Serialize};

/// Time of day under a calendar's own subdivision (which need not be 24/60/60)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self { hour, minute, second }
    }
}

/// A fully resolved calendar date
///
/// `month` and `day` are 1-based; `weekday` is a 0-based index into the
/// calendar's weekday list. For a day inside an intercalary block,
/// `intercalary` holds the block name, `month` is the month the block
/// follows, and `day` is the position within the block. For regular days
/// `intercalary` is `None` and `day` never exceeds the month's length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub year: i64,
    pub month: u32,
    pub day: u32,
    pub weekday: u32,
    pub time: TimeOfDay,
    pub intercalary: Option<String>,
}

impl ResolvedDate {
    /// Midnight on a regular month day, with the weekday left unresolved (0)
    ///
    /// Convenient for building query dates by hand; the engine's own
    /// conversions always fill in the true weekday.
    pub fn midnight(year: i64, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            weekday: 0,
            time: TimeOfDay::default(),
            intercalary: None,
        }
    }

    pub fn is_intercalary(&self) -> bool {
        self.intercalary.is_some()
    }
}

/// Phase of one moon on one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhaseInfo {
    /// Name of the moon this entry describes
    pub moon: String,
    /// Name of the current phase
    pub phase: String,
    /// Index of the current phase in the moon's phase list
    pub phase_index: usize,
    /// Whole days elapsed inside the current phase
    pub day_in_phase: i64,
    /// Exact (fractional) days elapsed inside the current phase
    pub day_in_phase_exact: f64,
    /// Whole days until the next phase begins (rounded up)
    pub days_until_next: i64,
    /// Exact days until the next phase begins
    pub days_until_next_exact: f64,
    /// Position within the current phase, in [0, 1)
    pub phase_progress: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_builder() {
        let date = ResolvedDate::midnight(1372, 3, 17);
        assert_eq!(date.year, 1372);
        assert_eq!(date.month, 3);
        assert_eq!(date.day, 17);
        assert_eq!(date.time, TimeOfDay::default());
        assert!(!date.is_intercalary());
    }

    #[test]
    fn test_time_of_day_equality() {
        assert_eq!(TimeOfDay::new(13, 5, 0), TimeOfDay { hour: 13, minute: 5, second: 0 });
        assert_ne!(TimeOfDay::new(13, 5, 0), TimeOfDay::new(13, 5, 1));
    }
}
