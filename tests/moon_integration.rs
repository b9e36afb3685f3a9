//! Integration tests for moon-phase resolution against reference fixtures

use almanac::core::types::ResolvedDate;
use almanac::definition::{CalendarDefinition, Moon, MoonPhase, MoonReference};
use almanac::engine::CalendarEngine;

/// Earth's moon under the standard eight-phase breakdown: four single-day
/// principal phases and four longer intermediate ones, summing to the
/// synodic month of 29.53059 days.
fn luna() -> Moon {
    let phases = [
        ("New Moon", 1.0, true),
        ("Waxing Crescent", 6.3826475, false),
        ("First Quarter", 1.0, true),
        ("Waxing Gibbous", 6.3826475, false),
        ("Full Moon", 1.0, true),
        ("Waning Gibbous", 6.3826475, false),
        ("Last Quarter", 1.0, true),
        ("Waning Crescent", 6.3826475, false),
    ];
    Moon {
        name: "Luna".to_string(),
        cycle_length: 29.53059,
        first_new_moon: MoonReference { year: 2024, month: 1, day: 11 },
        phases: phases
            .iter()
            .map(|(name, length, single_day)| MoonPhase {
                name: name.to_string(),
                length: *length,
                single_day: *single_day,
            })
            .collect(),
        color: "#ffffff".to_string(),
    }
}

fn quartered(name: &str, cycle_length: f64, color: &str) -> Moon {
    Moon {
        name: name.to_string(),
        cycle_length,
        first_new_moon: MoonReference { year: 2024, month: 1, day: 1 },
        phases: ["New", "Waxing", "Full", "Waning"]
            .iter()
            .map(|phase| MoonPhase {
                name: phase.to_string(),
                length: cycle_length / 4.0,
                single_day: false,
            })
            .collect(),
        color: color.to_string(),
    }
}

fn engine_with(moons: Vec<Moon>) -> CalendarEngine {
    let mut def = CalendarDefinition::gregorian();
    def.moons = moons;
    CalendarEngine::new(def).unwrap()
}

#[test]
fn luna_reference_date_is_a_new_moon() {
    let engine = engine_with(vec![luna()]);
    let info = engine.moon_phases(&ResolvedDate::midnight(2024, 1, 11), None);

    assert_eq!(info.len(), 1);
    assert_eq!(info[0].phase, "New Moon");
    assert_eq!(info[0].phase_index, 0);
    assert_eq!(info[0].day_in_phase, 0);
    assert!(info[0].day_in_phase_exact.abs() < 1e-9);
    assert_eq!(info[0].days_until_next, 1);
    assert!(info[0].phase_progress < 1e-9);
}

#[test]
fn luna_eight_days_later_is_a_first_quarter() {
    let engine = engine_with(vec![luna()]);
    let info = engine.moon_phases(&ResolvedDate::midnight(2024, 1, 19), None);

    assert_eq!(info[0].phase, "First Quarter");
    assert_eq!(info[0].phase_index, 2);
    assert_eq!(info[0].day_in_phase, 0);
}

#[test]
fn luna_dates_before_the_reference_stay_valid() {
    let engine = engine_with(vec![luna()]);

    // 17 days before the first recorded new moon: late in the previous
    // cycle, on the waxing gibbous.
    let info = engine.moon_phases(&ResolvedDate::midnight(2023, 12, 25), None);
    assert_eq!(info[0].phase_index, 3);

    // Sweep further back; the index must always stay in range.
    for day in 1..=28 {
        let info = engine.moon_phases(&ResolvedDate::midnight(2023, 2, day), None);
        assert_eq!(info.len(), 1, "missing phase on 2023-02-{day}");
        assert!(info[0].phase_index < 8);
        assert!(info[0].day_in_phase_exact >= 0.0);
    }
}

#[test]
fn independent_moons_report_independent_phases() {
    let engine = engine_with(vec![
        quartered("Harrow", 33.0, "#9ac4e0"),
        quartered("Duskveil", 328.0, "#d06a50"),
    ]);

    let info = engine.moon_phases(&ResolvedDate::midnight(2024, 1, 21), None);
    assert_eq!(info.len(), 2);

    let harrow = info.iter().find(|i| i.moon == "Harrow").unwrap();
    let duskveil = info.iter().find(|i| i.moon == "Duskveil").unwrap();

    // 20 days in: most of the way through the shorter cycle, barely into
    // the longer one.
    assert_eq!(harrow.phase_index, 2);
    assert_eq!(duskveil.phase_index, 0);
    assert!(harrow.phase_index < 4);
    assert!(duskveil.phase_index < 4);
}

#[test]
fn phase_lengths_partition_each_cycle() {
    for moon in [luna(), quartered("Harrow", 33.0, ""), quartered("Duskveil", 328.0, "")] {
        let total: f64 = moon.phases.iter().map(|p| p.length).sum();
        assert!(
            (total - moon.cycle_length).abs() < 1e-6,
            "{}: phases sum to {total}, cycle is {}",
            moon.name,
            moon.cycle_length
        );
    }
}

#[test]
fn phase_progress_stays_normalized_across_a_cycle() {
    let engine = engine_with(vec![luna()]);
    for day in 1..=31 {
        for hour in [0, 11, 23] {
            let mut date = ResolvedDate::midnight(2024, 3, day);
            date.time.hour = hour;
            let info = engine.moon_phases(&date, None);
            let entry = &info[0];
            assert!(
                (0.0..1.0).contains(&entry.phase_progress),
                "progress {} on 2024-03-{day} {hour}:00",
                entry.phase_progress
            );
            assert!(entry.days_until_next_exact >= 0.0);
            assert!(entry.day_in_phase <= entry.day_in_phase_exact.ceil() as i64);
        }
    }
}

#[test]
fn moon_list_accessor_passes_through() {
    let engine = engine_with(vec![luna(), quartered("Harrow", 33.0, "#9ac4e0")]);
    let moons = engine.moons();
    assert_eq!(moons.len(), 2);
    assert_eq!(moons[0].name, "Luna");
    assert!((moons[0].cycle_length - 29.53059).abs() < 1e-9);

    let bare = engine_with(Vec::new());
    assert!(bare.moons().is_empty());
    assert!(bare
        .moon_phases(&ResolvedDate::midnight(2024, 1, 1), None)
        .is_empty());
}
