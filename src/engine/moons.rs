//! Moon-phase resolution
//!
//! Each moon is an independent repeating cycle of named phases with
//! fractional-day lengths, anchored to one reference new-moon date. The
//! calculator projects a query date onto that cycle and reports where in
//! which phase the date falls.

use crate::core::types::{MoonPhaseInfo, ResolvedDate};
use crate::definition::Moon;

use super::CalendarEngine;

impl CalendarEngine {
    /// The declared moon list; empty when none are configured
    pub fn moons(&self) -> &[Moon] {
        &self.definition.moons
    }

    /// Phase of each moon (or the named moon) on a given date
    ///
    /// Moons with a non-positive cycle length or an empty phase list are
    /// omitted from the result rather than faulting.
    pub fn moon_phases(&self, date: &ResolvedDate, moon: Option<&str>) -> Vec<MoonPhaseInfo> {
        self.definition
            .moons
            .iter()
            .filter(|m| moon.map_or(true, |name| m.name == name))
            .filter_map(|m| self.phase_of(m, date))
            .collect()
    }

    fn phase_of(&self, moon: &Moon, date: &ResolvedDate) -> Option<MoonPhaseInfo> {
        if moon.cycle_length <= 0.0 || moon.phases.is_empty() {
            return None;
        }

        let reference = moon.first_new_moon;
        let elapsed = self.fractional_day_number(date)
            - self.day_number(reference.year, reference.month, reference.day, None) as f64;

        // Fold into [0, cycle_length). The double remainder maps dates
        // before the reference new moon into the tail of the previous
        // cycle instead of producing a negative offset.
        let offset =
            ((elapsed % moon.cycle_length) + moon.cycle_length) % moon.cycle_length;

        let mut start = 0.0;
        let last = moon.phases.len() - 1;
        for (index, phase) in moon.phases.iter().enumerate() {
            let end = start + phase.length;
            // Accumulated rounding can leave the offset a hair past the
            // final phase boundary; the last phase absorbs it.
            if offset < end || index == last {
                let day_in_phase_exact = offset - start;
                let days_until_next_exact = (phase.length - day_in_phase_exact).max(0.0);
                let phase_progress = if phase.length > 0.0 {
                    (day_in_phase_exact / phase.length).min(1.0 - f64::EPSILON)
                } else {
                    0.0
                };
                return Some(MoonPhaseInfo {
                    moon: moon.name.clone(),
                    phase: phase.name.clone(),
                    phase_index: index,
                    day_in_phase: day_in_phase_exact.floor() as i64,
                    day_in_phase_exact,
                    days_until_next: days_until_next_exact.ceil() as i64,
                    days_until_next_exact,
                    phase_progress,
                });
            }
            start = end;
        }
        None
    }

    /// Day number of a date including its fractional time of day
    fn fractional_day_number(&self, date: &ResolvedDate) -> f64 {
        let midnight =
            self.day_number(date.year, date.month, date.day, date.intercalary.as_deref());
        midnight as f64 + self.time_seconds(&date.time) as f64 / self.seconds_per_day() as f64
    }
}
