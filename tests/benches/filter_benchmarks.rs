//! # Bloom Membership Benchmarks
//!
//! | Operation | Cost |
//! |-----------|------|
//! | add | k digests + k atomic ORs |
//! | check (hit) | k digests + k loads |
//! | check (miss) | stops at the first unset bit |

use bloom_tests::benchmarks::membership_filter::{
    bench_add_per_algorithm, bench_check_hit_and_miss, bench_contended_adds,
    bench_round_count_scaling,
};
use criterion::{criterion_group, criterion_main};

criterion_group!(
    benches,
    bench_add_per_algorithm,
    bench_check_hit_and_miss,
    bench_round_count_scaling,
    bench_contended_adds
);
criterion_main!(benches);
