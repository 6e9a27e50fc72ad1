use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hash::{BuildHasherDefault, Hasher};
use treeify::HashMap;

/// Sends every key to one bucket.
#[derive(Default)]
struct CollidingHasher;

impl Hasher for CollidingHasher {
    fn write(&mut self, _bytes: &[u8]) {}

    fn finish(&self) -> u64 {
        0
    }
}

type Colliding = BuildHasherDefault<CollidingHasher>;

fn colliding_lookup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("colliding_lookup");

    for size in [8, 64, 512, 4_096] {
        let mut map: HashMap<u32, u32, Colliding> = HashMap::default();
        for i in 0..size {
            map.set_element(i, i);
        }

        group.bench_with_input(BenchmarkId::new("treeified_bucket", size), &size, |b, &size| {
            b.iter(|| {
                for i in (0..size).step_by(3) {
                    black_box(map.get_element_by_key(&i));
                }
            })
        });

        let list: Vec<(u32, u32)> = (0..size).map(|i| (i, i)).collect();
        group.bench_with_input(BenchmarkId::new("linear_list", size), &size, |b, &size| {
            b.iter(|| {
                for i in (0..size).step_by(3) {
                    black_box(list.iter().find(|(k, _)| *k == i));
                }
            })
        });
    }

    group.finish();
}

fn churn_benchmark(c: &mut Criterion) {
    // insert/erase around the promotion thresholds
    c.bench_function("treeify_untreeify_churn", |b| {
        b.iter(|| {
            let mut map: HashMap<u32, u32, Colliding> =
                HashMap::with_bucket_count_and_hasher(64, Colliding::default()).unwrap();
            for round in 0..100u32 {
                for k in 0..8 {
                    map.set_element(round * 8 + k, k);
                }
                for k in 0..8 {
                    map.erase_element_by_key(&(round * 8 + k));
                }
            }
            black_box(map.len())
        })
    });
}

fn growth_benchmark(c: &mut Criterion) {
    c.bench_function("growth_from_minimum", |b| {
        b.iter(|| {
            let mut map = HashMap::new();
            for i in 0..100_000u64 {
                map.set_element(i, ());
            }
            black_box(map.bucket_count())
        })
    });
}

criterion_group!(
    benches,
    colliding_lookup_benchmark,
    churn_benchmark,
    growth_benchmark
);
criterion_main!(benches);
