use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use seesaw_clock::{
    collision::{self, CollisionInfo},
    ManualClock, RecordingSurface, SceneLayout, Simulation, SimulationConfig, Sphere, Line, Vec2,
};

fn start_time(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .unwrap_or_default()
}

// Frames of the full clock at a busy time (many balls resting below).
fn bench_clock_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("clock_frames");

    for iterations in [5u32, 20, 40].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(iterations), iterations, |b, &n| {
            let clock = ManualClock::new(start_time(0, 0));
            let config = SimulationConfig { iterations: n, ..Default::default() };
            let mut simulation = Simulation::new(config, SceneLayout::clock_face(), clock.clone())
                .expect("default layout is valid");
            b.iter(|| {
                clock.advance(Duration::milliseconds(16));
                simulation.update();
                black_box(simulation.dynamic_bodies().len());
            });
        });
    }
    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let clock = ManualClock::new(start_time(11, 59));
    let simulation = Simulation::new(SimulationConfig::default(), SceneLayout::clock_face(), clock)
        .expect("default layout is valid");
    let mut surface = RecordingSurface::new(830.0, 830.0);
    c.bench_function("draw_frame", |b| {
        b.iter(|| {
            surface.clear();
            simulation.draw(&mut surface);
            black_box(surface.commands().len());
        });
    });
}

fn bench_detection(c: &mut Criterion) {
    let line = Line::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 3.0);
    let ball = Sphere::new(Vec2::new(40.0, -10.0), 10.0, 0.1);
    c.bench_function("line_sphere", |b| {
        let mut info = CollisionInfo::new();
        b.iter(|| {
            info.reset();
            black_box(collision::line_sphere(line.capsule(), black_box(&ball), &mut info));
        });
    });
}

criterion_group!(benches, bench_clock_frames, bench_draw, bench_detection);
criterion_main!(benches);
