use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use house_tour::scenes::create_house_scene;
use house_tour::tour::{Pose, TourController, TourPhase};

/// Benchmark: a single controller tick in each phase
fn bench_single_tick(c: &mut Criterion) {
    c.bench_function("tour_tick_approach", |b| {
        b.iter(|| {
            let mut tour = TourController::new();
            black_box(tour.tick(black_box(Pose::at(Vec3::new(0.0, 5.0, 20.0)))))
        })
    });
}

/// Benchmark: one full cycle of the scripted tour
fn bench_full_cycle(c: &mut Criterion) {
    c.bench_function("tour_full_cycle", |b| {
        b.iter(|| {
            let mut tour = TourController::new();
            let mut pose = Pose::at(Vec3::new(0.0, 5.0, 20.0));

            // Run until the script wraps back around to the approach.
            let mut left_start = false;
            loop {
                pose = tour.tick(pose);
                match tour.phase() {
                    TourPhase::Approach if left_start => break,
                    TourPhase::Approach => {}
                    _ => left_start = true,
                }
            }
            black_box(pose)
        })
    });
}

/// Benchmark: building and baking the whole house scene
fn bench_scene_bake(c: &mut Criterion) {
    let scene = create_house_scene();
    c.bench_function("house_scene_bake", |b| {
        b.iter(|| black_box(scene.bake()))
    });
}

criterion_group!(
    benches,
    bench_single_tick,
    bench_full_cycle,
    bench_scene_bake
);
criterion_main!(benches);
