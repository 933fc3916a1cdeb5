//! Benchmarks for the move engine and complete games.
//!
//! `apply_move` is the hot path for strategies, which try every direction
//! before each move.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tilemerge::batch::{BatchConfig, run_game};
use tilemerge::game::{compact_line, legal_moves};
use tilemerge::{Direction, GameConfig, GameState, Grid, SeededRng, Strategy, apply_move};

fn mid_game_grid() -> Grid {
    "2,4,8,16/4,8,16,32/0,2,2,64/0,0,4,128".parse().unwrap()
}

fn bench_compact_line(c: &mut Criterion) {
    c.bench_function("compact_line", |b| {
        b.iter(|| compact_line(black_box([2, 2, 4, 4])));
    });
}

fn bench_apply_move(c: &mut Criterion) {
    let grid = mid_game_grid();
    let mut group = c.benchmark_group("apply_move");
    for direction in Direction::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(direction), &direction, |b, &d| {
            b.iter(|| apply_move(black_box(grid), d));
        });
    }
    group.finish();
}

fn bench_legal_moves(c: &mut Criterion) {
    let grid = mid_game_grid();
    c.bench_function("legal_moves", |b| {
        b.iter(|| legal_moves(black_box(grid)));
    });
}

fn bench_advance(c: &mut Criterion) {
    let config = GameConfig::default();
    let state = GameState::from_grid(mid_game_grid(), 0, &config);
    c.bench_function("advance", |b| {
        let mut rng = SeededRng::new(42);
        b.iter(|| state.advance(black_box(Direction::Left), &config, &mut rng));
    });
}

fn bench_full_game(c: &mut Criterion) {
    let config = BatchConfig::default();
    let mut group = c.benchmark_group("full_game");
    for strategy in [Strategy::Random, Strategy::Greedy, Strategy::Corner] {
        group.bench_with_input(BenchmarkId::from_parameter(strategy), &strategy, |b, &s| {
            b.iter(|| run_game(black_box(42), s, &config));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compact_line,
    bench_apply_move,
    bench_legal_moves,
    bench_advance,
    bench_full_game
);
criterion_main!(benches);
