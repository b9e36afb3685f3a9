//! Hot-path benchmarks: the engine runs once per render tick on several
//! UI surfaces, so conversion and moon queries must stay cheap.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use almanac::definition::{CalendarDefinition, Moon, MoonPhase, MoonReference};
use almanac::engine::CalendarEngine;

fn engine_with_moon() -> CalendarEngine {
    let mut def = CalendarDefinition::gregorian();
    def.moons = vec![Moon {
        name: "Luna".to_string(),
        cycle_length: 29.53059,
        first_new_moon: MoonReference { year: 2024, month: 1, day: 11 },
        phases: (0..8)
            .map(|index| MoonPhase {
                name: format!("Phase {index}"),
                length: if index % 2 == 0 { 1.0 } else { 6.3826475 },
                single_day: index % 2 == 0,
            })
            .collect(),
        color: "#ffffff".to_string(),
    }];
    CalendarEngine::new(def).unwrap()
}

fn bench_conversion(c: &mut Criterion) {
    let engine = engine_with_moon();
    // Roughly two millennia past the epoch, mid-day.
    let world_time: i64 = 63_900_000_000_000;

    c.bench_function("world_time_to_date", |b| {
        b.iter(|| engine.world_time_to_date(black_box(world_time), None))
    });

    let date = engine.world_time_to_date(world_time, None);
    c.bench_function("date_to_world_time", |b| {
        b.iter(|| engine.date_to_world_time(black_box(&date), None))
    });

    c.bench_function("moon_phases", |b| {
        b.iter(|| engine.moon_phases(black_box(&date), None))
    });
}

criterion_group!(benches, bench_conversion);
criterion_main!(benches);
