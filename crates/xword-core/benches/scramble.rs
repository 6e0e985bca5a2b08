//! Benchmarks for solution scrambling.
//!
//! # Benchmarks
//!
//! - **`scramble_round_trip`**: Scrambles and unscrambles a fully lettered grid
//!   with a fixed key.
//! - **`key_search`**: Runs the exhaustive key search over a scrambled grid.
//!   The key is chosen near the end of the range so most keys are tried.
//!
//! # Test Data
//!
//! Grids are filled with a repeating alphabet so that every square holds a
//! scrambleable letter:
//!
//! - **`5x5`**, **`15x15`**, **`21x21`**: common published sizes.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench scramble
//! ```

use std::{hint, time::Duration};

use criterion::{
    BatchSize, BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main,
};
use xword_core::Grid;

const SIZES: [usize; 3] = [5, 15, 21];
const KEY: u16 = 9876;

fn lettered_grid(size: usize) -> Grid {
    let mut grid = Grid::new(size, size);
    for (square, ch) in grid.iter_mut().zip(('A'..='Z').cycle()) {
        square.set_solution(&ch.to_string()).unwrap();
    }
    grid
}

fn bench_scramble_round_trip(c: &mut Criterion) {
    for size in SIZES {
        let grid = lettered_grid(size);
        c.bench_with_input(
            BenchmarkId::new("scramble_round_trip", format!("{size}x{size}")),
            &grid,
            |b, grid| {
                b.iter_batched(
                    || hint::black_box(grid.clone()),
                    |mut grid| {
                        assert!(grid.scramble_solution(KEY));
                        assert!(grid.unscramble_solution(KEY));
                        grid
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_key_search(c: &mut Criterion) {
    for size in SIZES {
        let mut grid = lettered_grid(size);
        assert!(grid.scramble_solution(KEY));
        c.bench_with_input(
            BenchmarkId::new("key_search", format!("{size}x{size}")),
            &grid,
            |b, grid| b.iter(|| hint::black_box(grid).key_search().find_key()),
        );
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(12));
    targets =
        bench_scramble_round_trip,
        bench_key_search
);
criterion_main!(benches);
