//! Benchmarks for staging and teardown.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use launchpad::cleanup::{GuardStack, ScopeGuard};
use launchpad::errors::FailureKind;
use launchpad::events::NoOpObserver;
use launchpad::stages::{Stage, StageSequence};

fn teardown_benchmark(c: &mut Criterion) {
    c.bench_function("guard_stack_teardown_64", |b| {
        b.iter(|| {
            let mut stack = GuardStack::new();
            for i in 0..64 {
                stack.push(ScopeGuard::infallible(format!("guard-{i}"), move || {
                    black_box(i);
                }));
            }
            black_box(stack.teardown())
        });
    });

    c.bench_function("stage_sequence_16", |b| {
        b.iter(|| {
            let mut stages = StageSequence::new();
            for i in 0..16 {
                stages.push(
                    Stage::new(format!("stage-{i}"), FailureKind::TransportInitFailed, || Ok(()))
                        .with_infallible_release(move || {
                            black_box(i);
                        }),
                );
            }
            black_box(stages.run(&NoOpObserver))
        });
    });
}

criterion_group!(benches, teardown_benchmark);
criterion_main!(benches);
