//! Benchmarks for the checkout hot path.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use protopool_core::{
    CloneLifecycle, PoolOptions, PrototypePool, TemplateKey, TemplateSource, Tier,
};

fn registered_pool() -> PrototypePool<Vec<u8>, CloneLifecycle> {
    let mut pool = PrototypePool::new(CloneLifecycle, PoolOptions::default());
    pool.register(
        TemplateKey(1),
        TemplateSource::Owned(vec![0u8; 1024]),
        Tier::new(4),
    );
    pool
}

fn bench_acquire_release_hit(c: &mut Criterion) {
    let mut pool = registered_pool();
    // Prime the free queue so the loop measures the reuse path.
    let handle = pool.acquire(TemplateKey(1)).unwrap();
    pool.release(handle, Duration::ZERO);

    c.bench_function("acquire_release_hit", |b| {
        b.iter(|| {
            let handle = pool.acquire(TemplateKey(1)).unwrap();
            pool.release(handle, Duration::ZERO);
        });
    });
}

fn bench_acquire_miss(c: &mut Criterion) {
    c.bench_function("acquire_miss_cold", |b| {
        b.iter_batched(
            registered_pool,
            |mut pool| {
                let _ = pool.acquire(TemplateKey(1));
                pool
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_drain(c: &mut Criterion) {
    c.bench_function("drain_64_idle_templates", |b| {
        b.iter_batched(
            || {
                let mut pool = PrototypePool::new(CloneLifecycle, PoolOptions::default());
                for k in 0..64u64 {
                    let key = TemplateKey(k);
                    pool.register(key, TemplateSource::Owned(vec![0u8; 256]), Tier::new(0));
                    let handle = pool.acquire(key).unwrap();
                    pool.release(handle, Duration::ZERO);
                    pool.mark_single(key, Duration::ZERO);
                }
                pool
            },
            |mut pool| {
                pool.drain(64);
                pool
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_acquire_release_hit,
    bench_acquire_miss,
    bench_drain
);
criterion_main!(benches);
