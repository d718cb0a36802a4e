use bendy_planner::{Obstacle, PlanInput, Planner, PlannerState, Pose};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::point;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn cluttered_field(n: usize) -> Vec<Obstacle> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    (0..n)
        .map(|_| {
            let center = point![rng.gen_range(5.0..100.0), rng.gen_range(-40.0..40.0)];
            Obstacle::circle(center, rng.gen_range(1.0..4.0))
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let planner = Planner::default();
    for n in [10, 100] {
        let obstacles = cluttered_field(n);
        let input = PlanInput {
            pose: Pose {
                position: point![0.0, 0.0],
                heading: 0.0,
            },
            speed: 5.0,
            destination: point![120.0, 0.0],
            obstacles: &obstacles,
        };
        c.bench_function(&format!("plan-{}-obstacles", n), |b| {
            b.iter(|| planner.plan(black_box(&PlannerState::default()), black_box(&input)))
        });
        c.bench_function(&format!("survey-{}-obstacles", n), |b| {
            b.iter(|| planner.survey(black_box(&PlannerState::default()), black_box(&input)))
        });
    }
}

pub fn criterion_config() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .measurement_time(core::time::Duration::from_secs(5))
}

criterion_group!(name = benches;
                 config = criterion_config();
                 targets = criterion_benchmark);
criterion_main!(benches);
