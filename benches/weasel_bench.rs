//! Criterion benchmarks for the string evolution engine.
//!
//! Measures full runs to the target and the cost of single generation
//! steps under each evaluator.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_weasel::weasel::{Evaluator, Mutation, RunState, WeaselConfig, WeaselRunner};

const TARGET: &str = "METHINKS IT IS LIKE A WEASEL";
const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ ";

fn bench_run_to_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_to_target");
    group.sample_size(10);

    for (target, pop) in [("CAT", 50usize), ("METHINKS", 100), (TARGET, 100)] {
        let config = WeaselConfig::default()
            .with_population_size(pop)
            .with_alphabet(UPPER)
            .with_seed(42)
            .with_parallel(false)
            .with_max_generations(20_000);
        group.bench_with_input(
            BenchmarkId::new(format!("p{pop}"), target.len()),
            &(target, config),
            |b, (t, c)| {
                b.iter(|| {
                    let result = WeaselRunner::run(black_box(t), black_box(c.clone()));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    group.sample_size(20);

    for evaluator in Evaluator::ALL {
        let config = WeaselConfig::default()
            .with_population_size(200)
            .with_alphabet(UPPER)
            .with_evaluator(evaluator)
            .with_mutations(Mutation::ALL.to_vec())
            .with_seed(42)
            .with_parallel(false);
        let Ok(state) = RunState::initialize(TARGET, config) else {
            continue;
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{evaluator:?}")),
            &state,
            |b, s| {
                b.iter(|| black_box(s.clone().step()));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_run_to_target, bench_step);
criterion_main!(benches);
