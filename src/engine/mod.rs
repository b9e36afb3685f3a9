//! Calendar computation engine
//!
//! `CalendarEngine` is a stateless computation over one
//! [`CalendarDefinition`]: world-time to date conversion and its exact
//! inverse, leap-year and month-length resolution, weekday resolution, and
//! moon-phase resolution (in [`moons`]). The definition is the engine's
//! only state; switching calendars replaces the whole engine rather than
//! mutating it, so in-flight queries stay internally consistent.
//!
//! World time is a signed count of elapsed seconds. Conversions are total
//! for any finite input once construction has succeeded; the render path
//! never sees a panic from these queries.

mod moons;

use crate::core::error::{CalendarError, Result};
use crate::core::types::{ResolvedDate, TimeOfDay};
use crate::definition::{
    CalendarDefinition, IntercalaryBlock, LeapYearRule, WorldTimeInterpretation,
};

/// Fallback label for out-of-range month or weekday lookups
const UNKNOWN_LABEL: &str = "Unknown";

/// How the world-time zero point is anchored, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldTimeMode {
    /// World time 0 is midnight of day 0 of the epoch year
    EpochBased,
    /// World time is offset by the host's creation timestamp, and resolved
    /// years are shifted so the configured current year lines up
    YearOffset { year_shift: i64 },
}

/// Stateless date arithmetic over one calendar definition
#[derive(Debug, Clone)]
pub struct CalendarEngine {
    definition: CalendarDefinition,
    mode: WorldTimeMode,
}

impl CalendarEngine {
    /// Build an engine, rejecting structurally invalid definitions
    ///
    /// Fails fast on geometry the query methods cannot make sense of:
    /// empty month or weekday lists, zero-length months or intercalary
    /// blocks, intercalary anchors or leap months naming no defined month,
    /// a non-positive custom leap interval, or a zero time subdivision.
    pub fn new(definition: CalendarDefinition) -> Result<Self> {
        if definition.months.is_empty() {
            return Err(CalendarError::NoMonths);
        }
        if definition.weekdays.is_empty() {
            return Err(CalendarError::NoWeekdays);
        }
        for month in &definition.months {
            if month.days == 0 {
                return Err(CalendarError::EmptyMonth(month.name.clone()));
            }
        }

        let month_count = definition.months.len() as u32;
        match definition.leap_year {
            LeapYearRule::None => {}
            LeapYearRule::Gregorian { month, .. } => {
                if month == 0 || month > month_count {
                    return Err(CalendarError::UnknownLeapMonth(month));
                }
            }
            LeapYearRule::Custom { interval, month, .. } => {
                if interval <= 0 {
                    return Err(CalendarError::InvalidLeapInterval(interval));
                }
                if month == 0 || month > month_count {
                    return Err(CalendarError::UnknownLeapMonth(month));
                }
            }
        }

        for block in &definition.intercalary {
            if block.days == 0 {
                return Err(CalendarError::EmptyIntercalary(block.name.clone()));
            }
            if block.after_month == 0 || block.after_month > month_count {
                return Err(CalendarError::UnknownIntercalaryMonth {
                    name: block.name.clone(),
                    after_month: block.after_month,
                });
            }
        }

        let time = definition.time;
        if time.hours_in_day == 0 || time.minutes_in_hour == 0 || time.seconds_in_minute == 0 {
            return Err(CalendarError::InvalidTimeSubdivision(
                time.hours_in_day,
                time.minutes_in_hour,
                time.seconds_in_minute,
            ));
        }

        let mode = match definition.world_time {
            Some(cfg) if cfg.interpretation == WorldTimeInterpretation::YearOffset => {
                WorldTimeMode::YearOffset {
                    year_shift: cfg.current_year - cfg.epoch_year,
                }
            }
            _ => WorldTimeMode::EpochBased,
        };

        tracing::debug!(
            "calendar engine ready: {} ({} months, {} weekdays, {} moons, {} s/day)",
            definition.name,
            definition.months.len(),
            definition.weekdays.len(),
            definition.moons.len(),
            time.seconds_per_day(),
        );

        Ok(Self { definition, mode })
    }

    /// The definition this engine computes over
    pub fn definition(&self) -> &CalendarDefinition {
        &self.definition
    }

    /// Seconds in one full day under the calendar's time subdivision
    pub fn seconds_per_day(&self) -> i64 {
        self.definition.time.seconds_per_day()
    }

    // ========================================================================
    // Leap years and month lengths
    // ========================================================================

    /// Whether `year` gains extra days under the configured rule
    pub fn is_leap_year(&self, year: i64) -> bool {
        match self.definition.leap_year {
            LeapYearRule::None => false,
            LeapYearRule::Gregorian { .. } => {
                year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
            }
            LeapYearRule::Custom { interval, .. } => year % interval == 0,
        }
    }

    /// Length of a (1-based) month in a given year, leap days included
    ///
    /// An out-of-range month resolves to 0 rather than panicking.
    pub fn month_length(&self, year: i64, month: u32) -> u32 {
        let base = match (month as usize)
            .checked_sub(1)
            .and_then(|index| self.definition.months.get(index))
        {
            Some(entry) => entry.days,
            None => return 0,
        };
        match self.leap_month() {
            Some((leap_month, extra)) if leap_month == month && self.is_leap_year(year) => {
                base + extra
            }
            _ => base,
        }
    }

    /// Total day slots in a year: months, leap days, and intercalary blocks
    pub fn days_in_year(&self, year: i64) -> i64 {
        let months: i64 = self.definition.months.iter().map(|m| m.days as i64).sum();
        let blocks: i64 = self
            .definition
            .intercalary
            .iter()
            .map(|b| b.days as i64)
            .sum();
        months + self.leap_extra(year) + blocks
    }

    /// Display name of a (1-based) month, or "Unknown" when out of range
    pub fn month_name(&self, month: u32) -> &str {
        (month as usize)
            .checked_sub(1)
            .and_then(|index| self.definition.months.get(index))
            .map(|m| m.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Display name of a (0-based) weekday, or "Unknown" when out of range
    pub fn weekday_name(&self, weekday: u32) -> &str {
        self.definition
            .weekdays
            .get(weekday as usize)
            .map(|w| w.name.as_str())
            .unwrap_or(UNKNOWN_LABEL)
    }

    fn leap_month(&self) -> Option<(u32, u32)> {
        match self.definition.leap_year {
            LeapYearRule::None => None,
            LeapYearRule::Gregorian { month, extra_days }
            | LeapYearRule::Custom { month, extra_days, .. } => Some((month, extra_days)),
        }
    }

    fn leap_extra(&self, year: i64) -> i64 {
        match self.leap_month() {
            Some((_, extra)) if self.is_leap_year(year) => extra as i64,
            _ => 0,
        }
    }

    // ========================================================================
    // World time <-> date
    // ========================================================================

    /// Resolve a world-time instant into a calendar date
    ///
    /// `world_creation_timestamp` anchors the zero point when the
    /// definition runs in year-offset interpretation (a host system's own
    /// reference instant); in epoch-based interpretation it is ignored.
    /// Negative world times resolve into pre-epoch years via floor
    /// division, never by truncation.
    pub fn world_time_to_date(
        &self,
        world_time: i64,
        world_creation_timestamp: Option<i64>,
    ) -> ResolvedDate {
        let (effective, year_shift) = match self.mode {
            WorldTimeMode::EpochBased => (world_time, 0),
            WorldTimeMode::YearOffset { year_shift } => (
                world_time + world_creation_timestamp.unwrap_or(0),
                year_shift,
            ),
        };

        let spd = self.seconds_per_day();
        let mut remaining = effective.div_euclid(spd);
        let time = self.time_of_day(effective.rem_euclid(spd));

        // Find the year containing the day index. `counted` tracks the
        // signed number of weekday-advancing days before the slot.
        let mut year = self.definition.year.epoch;
        let mut counted: i64 = 0;
        if remaining >= 0 {
            loop {
                let length = self.days_in_year(year);
                if remaining < length {
                    break;
                }
                remaining -= length;
                counted += self.counted_days_in_year(year);
                year += 1;
            }
        } else {
            while remaining < 0 {
                year -= 1;
                remaining += self.days_in_year(year);
                counted -= self.counted_days_in_year(year);
            }
        }

        // Walk the year's day sequence: each month, then the intercalary
        // blocks that follow it.
        for number in 1..=self.definition.months.len() as u32 {
            let length = self.month_length(year, number) as i64;
            if remaining < length {
                return self.resolve_slot(
                    year + year_shift,
                    number,
                    remaining,
                    None,
                    counted + remaining,
                    time,
                );
            }
            remaining -= length;
            counted += length;

            for block in self.blocks_after(number) {
                let block_length = block.days as i64;
                if remaining < block_length {
                    // Non-counting blocks report the weekday the next
                    // counting day will carry.
                    let advanced = if block.counts_for_weekdays { remaining } else { 0 };
                    return self.resolve_slot(
                        year + year_shift,
                        number,
                        remaining,
                        Some(block.name.clone()),
                        counted + advanced,
                        time,
                    );
                }
                remaining -= block_length;
                if block.counts_for_weekdays {
                    counted += block_length;
                }
            }
        }

        // The year loop guarantees the walk lands inside the year; this
        // fallback keeps the method total regardless.
        let number = self.definition.months.len() as u32;
        let length = self.month_length(year, number) as i64;
        self.resolve_slot(
            year + year_shift,
            number,
            (length - 1).max(0),
            None,
            counted,
            time,
        )
    }

    /// Convert a resolved date back into a world-time instant
    ///
    /// Exact inverse of [`world_time_to_date`](Self::world_time_to_date)
    /// under the same interpretation mode and creation-timestamp override.
    pub fn date_to_world_time(
        &self,
        date: &ResolvedDate,
        world_creation_timestamp: Option<i64>,
    ) -> i64 {
        let (year, anchor) = match self.mode {
            WorldTimeMode::EpochBased => (date.year, 0),
            WorldTimeMode::YearOffset { year_shift } => (
                date.year - year_shift,
                world_creation_timestamp.unwrap_or(0),
            ),
        };
        let days = self.day_number(year, date.month, date.day, date.intercalary.as_deref());
        days * self.seconds_per_day() + self.time_seconds(&date.time) - anchor
    }

    /// Signed day index of a date's midnight, relative to epoch day 0
    ///
    /// Used by the inverse conversion and as the moon calculator's common
    /// time scale. Out-of-range components resolve deterministically
    /// (missing months contribute nothing) instead of panicking.
    pub(crate) fn day_number(
        &self,
        year: i64,
        month: u32,
        day: u32,
        intercalary: Option<&str>,
    ) -> i64 {
        let epoch = self.definition.year.epoch;
        let mut days: i64 = 0;
        if year >= epoch {
            for y in epoch..year {
                days += self.days_in_year(y);
            }
        } else {
            for y in year..epoch {
                days -= self.days_in_year(y);
            }
        }

        let month_count = self.definition.months.len() as u32;
        for number in 1..month.min(month_count + 1) {
            days += self.month_length(year, number) as i64;
            days += self
                .blocks_after(number)
                .map(|b| b.days as i64)
                .sum::<i64>();
        }

        match intercalary {
            None => days + (i64::from(day).max(1) - 1),
            Some(name) => {
                days += self.month_length(year, month) as i64;
                for block in self.blocks_after(month) {
                    if block.name == name {
                        days += i64::from(day).max(1) - 1;
                        break;
                    }
                    days += block.days as i64;
                }
                days
            }
        }
    }

    // ========================================================================
    // Weekdays and time of day
    // ========================================================================

    /// Day slots in a year that advance the weekday cycle
    fn counted_days_in_year(&self, year: i64) -> i64 {
        let months: i64 = self.definition.months.iter().map(|m| m.days as i64).sum();
        let blocks: i64 = self
            .definition
            .intercalary
            .iter()
            .filter(|b| b.counts_for_weekdays)
            .map(|b| b.days as i64)
            .sum();
        months + self.leap_extra(year) + blocks
    }

    /// Weekday index after `counted` weekday-advancing days from epoch
    ///
    /// Euclidean remainder keeps the result in range for dates far before
    /// the epoch.
    fn weekday_at(&self, counted: i64) -> u32 {
        let cycle = self.definition.weekdays.len() as i64;
        (self.definition.year.start_day as i64 + counted).rem_euclid(cycle) as u32
    }

    fn blocks_after(&self, month: u32) -> impl Iterator<Item = &IntercalaryBlock> {
        self.definition
            .intercalary
            .iter()
            .filter(move |b| b.after_month == month)
    }

    fn resolve_slot(
        &self,
        year: i64,
        month: u32,
        day_index: i64,
        intercalary: Option<String>,
        counted: i64,
        time: TimeOfDay,
    ) -> ResolvedDate {
        ResolvedDate {
            year,
            month,
            day: (day_index + 1) as u32,
            weekday: self.weekday_at(counted),
            time,
            intercalary,
        }
    }

    fn time_of_day(&self, sec_of_day: i64) -> TimeOfDay {
        let time = &self.definition.time;
        let per_minute = time.seconds_in_minute as i64;
        let per_hour = per_minute * time.minutes_in_hour as i64;
        TimeOfDay {
            hour: (sec_of_day / per_hour) as u32,
            minute: (sec_of_day % per_hour / per_minute) as u32,
            second: (sec_of_day % per_minute) as u32,
        }
    }

    fn time_seconds(&self, time: &TimeOfDay) -> i64 {
        let config = &self.definition.time;
        let per_minute = config.seconds_in_minute as i64;
        let per_hour = per_minute * config.minutes_in_hour as i64;
        i64::from(time.hour) * per_hour + i64::from(time.minute) * per_minute
            + i64::from(time.second)
    }
}
