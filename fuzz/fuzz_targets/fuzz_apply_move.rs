#![no_main]

//! Single-move fuzzer.
//!
//! Builds a grid from fuzzer bytes (each byte an exponent, 0 for empty) and
//! checks every move invariant in all four directions.

use libfuzzer_sys::fuzz_target;
use tilemerge::game::{check_move, Cells, SIZE};
use tilemerge::{apply_move, Direction, Grid};

fuzz_target!(|data: [u8; 16]| {
    let mut cells: Cells = [[0; SIZE]; SIZE];
    for (i, byte) in data.iter().enumerate() {
        let exp = u32::from(byte % 18);
        cells[i / SIZE][i % SIZE] = if exp == 0 { 0 } else { 1 << exp };
    }

    let Ok(grid) = Grid::from_rows(cells) else {
        return;
    };

    for direction in Direction::ALL {
        let result = apply_move(grid, direction);
        let violations = check_move(&grid, direction, &result);
        assert!(violations.is_empty(), "{grid} {direction}: {violations:?}");
    }
});
