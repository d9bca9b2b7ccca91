use checkpoint_maze::{
    generators,
    units::{ColumnsCount, RowsCount},
};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_wall_extension_maze_30_40(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(7);
    c.bench_function("wall_extension_maze_30_40", move |b| {
        b.iter(|| generators::generate_with_rng(RowsCount(30), ColumnsCount(40), &mut rng))
    });
}

fn bench_wall_extension_maze_301_301(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(7);
    c.bench_function("wall_extension_maze_301_301", move |b| {
        b.iter(|| generators::generate_with_rng(RowsCount(301), ColumnsCount(301), &mut rng))
    });
}

fn bench_recursive_backtracker_maze_30_40(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(7);
    c.bench_function("recursive_backtracker_maze_30_40", move |b| {
        b.iter(|| generators::recursive_backtracker(RowsCount(30), ColumnsCount(40), &mut rng))
    });
}

criterion_group!(
    benches,
    bench_wall_extension_maze_30_40,
    bench_wall_extension_maze_301_301,
    bench_recursive_backtracker_maze_30_40
);
criterion_main!(benches);
