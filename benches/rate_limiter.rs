//! 令牌桶性能基准测试

use std::hint::black_box;
use std::sync::Arc;
use std::time::{Duration, Instant};

use criterion::{Criterion, criterion_group, criterion_main};
use ipcountry::ratelimit::TokenBucket;

fn bench_allow(c: &mut Criterion) {
    let mut group = c.benchmark_group("ratelimit/allow");

    // 桶始终有余量
    let bucket = TokenBucket::new(1e12);
    group.bench_function("admitted", |b| {
        b.iter(|| black_box(bucket.allow()));
    });

    // 桶始终为空
    let bucket = TokenBucket::new(0.0);
    group.bench_function("rejected", |b| {
        b.iter(|| black_box(bucket.allow()));
    });

    let bucket = TokenBucket::new(100.0);
    let mut now = Instant::now();
    group.bench_function("simulated_clock", |b| {
        b.iter(|| {
            now += Duration::from_micros(10);
            black_box(bucket.allow_at(now))
        });
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("ratelimit/contended");

    for threads in [2usize, 8] {
        group.bench_function(format!("{}_threads", threads), |b| {
            let bucket = Arc::new(TokenBucket::new(1e12));
            b.iter(|| {
                std::thread::scope(|s| {
                    for _ in 0..threads {
                        let bucket = bucket.clone();
                        s.spawn(move || {
                            for _ in 0..1_000 {
                                black_box(bucket.allow());
                            }
                        });
                    }
                });
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_allow, bench_contended);
criterion_main!(benches);
