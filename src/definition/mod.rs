//! Calendar definition schema
//!
//! This module defines the immutable description of one calendar's
//! geometry: months, weekdays, leap-year rule, intercalary days, time
//! subdivision, moons, and the world-time interpretation mode. Definitions
//! are plain serde data, ordinarily sourced from a JSON calendar file and
//! handed read-only to a [`CalendarEngine`](crate::engine::CalendarEngine),
//! which performs the structural checks at construction.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// One month in the regular month sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    /// Display name (e.g., "Hammer", "January")
    pub name: String,
    /// Base length in days, before any leap adjustment
    pub days: u32,
}

/// One named position in the weekday cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weekday {
    pub name: String,
}

/// Policy determining which years gain extra days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeapYearRule {
    /// No year ever gains days
    #[default]
    None,
    /// Divisible by 4, except centuries unless divisible by 400
    Gregorian {
        /// 1-based month that receives the extra days
        month: u32,
        /// Days added to that month in leap years
        extra_days: u32,
    },
    /// Divisible by `interval`, with no century exception
    Custom {
        interval: i64,
        /// 1-based month that receives the extra days
        month: u32,
        extra_days: u32,
    },
}

/// A run of days inserted outside the regular month sequence
///
/// Festival or leap days such as Midwinter sit between months rather than
/// inside one. They occupy calendar-day slots, but only advance the weekday
/// cycle when `counts_for_weekdays` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntercalaryBlock {
    /// Display name (e.g., "Midsummer")
    pub name: String,
    /// 1-based month this block immediately follows
    pub after_month: u32,
    /// Length of the block in days
    pub days: u32,
    /// Whether these days advance the weekday cycle
    #[serde(default)]
    pub counts_for_weekdays: bool,
}

/// Year numbering configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearConfig {
    /// Zero-point year of the calendar's own numbering
    pub epoch: i64,
    /// Year the campaign currently sits in
    pub current_year: i64,
    /// Weekday index of day 0 of the epoch year
    pub start_day: u32,
}

/// Time-of-day subdivision; need not be the familiar 24/60/60
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConfig {
    pub hours_in_day: u32,
    pub minutes_in_hour: u32,
    pub seconds_in_minute: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            hours_in_day: 24,
            minutes_in_hour: 60,
            seconds_in_minute: 60,
        }
    }
}

impl TimeConfig {
    /// Seconds in one full day under this subdivision
    pub fn seconds_per_day(&self) -> i64 {
        self.hours_in_day as i64 * self.minutes_in_hour as i64 * self.seconds_in_minute as i64
    }
}

/// Calendar date of a moon's reference new moon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonReference {
    pub year: i64,
    /// 1-based month
    pub month: u32,
    /// 1-based day
    pub day: u32,
}

/// One named phase within a moon's cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoonPhase {
    /// Display name (e.g., "Waxing Gibbous")
    pub name: String,
    /// Length in days; fractional lengths are the norm
    pub length: f64,
    /// Whether this phase is rendered as a single-day event
    #[serde(default)]
    pub single_day: bool,
}

/// A moon with an independent phase cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moon {
    /// Display name (e.g., "Luna", "Selûne")
    pub name: String,
    /// Full cycle length in days; the phase lengths should sum to this
    pub cycle_length: f64,
    /// Date of the reference new moon the cycle is anchored to
    pub first_new_moon: MoonReference,
    /// Ordered phase list; a moon with no phases is ignored by queries
    pub phases: Vec<MoonPhase>,
    /// Render color (e.g., "#ffffff")
    #[serde(default)]
    pub color: String,
}

/// How the world-time zero point maps onto the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorldTimeInterpretation {
    /// World time 0 is midnight of day 0 of the epoch year
    EpochBased,
    /// World time 0 is anchored by an externally supplied creation
    /// timestamp, with the year shifted by `current_year - epoch_year`,
    /// reproducing a host system's own clock calculation
    YearOffset,
}

/// World-time interpretation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldTimeConfig {
    pub interpretation: WorldTimeInterpretation,
    /// Year that world time 0 resolves into before the shift is applied
    pub epoch_year: i64,
    /// Year that world time 0 should display as after the shift
    pub current_year: i64,
}

/// Validated, immutable description of one calendar's geometry
///
/// Field invariants (non-empty months/weekdays, positive lengths, known
/// intercalary anchors) are checked when a `CalendarEngine` is built from
/// this, not while deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDefinition {
    /// Display name of the calendar itself
    pub name: String,
    /// Ordered month sequence
    pub months: Vec<Month>,
    /// Ordered weekday cycle
    pub weekdays: Vec<Weekday>,
    /// Leap-year policy
    #[serde(default)]
    pub leap_year: LeapYearRule,
    /// Days inserted outside the month sequence
    #[serde(default)]
    pub intercalary: Vec<IntercalaryBlock>,
    /// Year numbering
    pub year: YearConfig,
    /// Time-of-day subdivision
    #[serde(default)]
    pub time: TimeConfig,
    /// Moons with independent cycles
    #[serde(default)]
    pub moons: Vec<Moon>,
    /// World-time interpretation; absent means epoch-based
    #[serde(default)]
    pub world_time: Option<WorldTimeConfig>,
}

impl CalendarDefinition {
    /// Parse a definition from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Standard Gregorian calendar: 12 months, 7 weekdays, February leap day
    ///
    /// Epoch is year 0 with `start_day` chosen so weekdays line up with the
    /// proleptic Gregorian calendar (day 0 of year 0 is a Saturday). No
    /// moons are configured; tests attach their own.
    pub fn gregorian() -> Self {
        const MONTHS: [(&str, u32); 12] = [
            ("January", 31),
            ("February", 28),
            ("March", 31),
            ("April", 30),
            ("May", 31),
            ("June", 30),
            ("July", 31),
            ("August", 31),
            ("September", 30),
            ("October", 31),
            ("November", 30),
            ("December", 31),
        ];
        const WEEKDAYS: [&str; 7] = [
            "Sunday",
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
        ];

        Self {
            name: "Gregorian".to_string(),
            months: MONTHS
                .iter()
                .map(|(name, days)| Month {
                    name: name.to_string(),
                    days: *days,
                })
                .collect(),
            weekdays: WEEKDAYS
                .iter()
                .map(|name| Weekday {
                    name: name.to_string(),
                })
                .collect(),
            leap_year: LeapYearRule::Gregorian {
                month: 2,
                extra_days: 1,
            },
            intercalary: Vec::new(),
            year: YearConfig {
                epoch: 0,
                current_year: 0,
                start_day: 6,
            },
            time: TimeConfig::default(),
            moons: Vec::new(),
            world_time: None,
        }
    }
}
