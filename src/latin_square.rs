//! Filling an N×N grid as a [Latin square](https://en.wikipedia.org/wiki/Latin_square):
//! every row and column contains each value `1..=N` exactly once.
//!
//! The filler walks the grid in row-major order and draws each cell's value
//! from the values still unused in its row and column. A cell with no
//! candidates restarts the whole fill from scratch rather than backtracking
//! locally; the restart count is bounded, and the chance of exhausting it is
//! vanishingly small for moderate sizes.

use crate::{error::GenerateError, rng::SeededRng};

/// Number of from-scratch fill attempts before giving up.
const MAX_ATTEMPTS: usize = 30;

/// Fill a `size` × `size` grid with a valid Latin square, returning the
/// cell values in row-major order.
///
/// # Errors
/// - [`GenerateError::InvalidSize`] if `size < 2`.
/// - [`GenerateError::GenerationExhausted`] if no valid grid is found
///   within the attempt bound.
pub fn fill(size: usize, rng: &mut SeededRng) -> Result<Vec<usize>, GenerateError> {
    if size < 2 {
        return Err(GenerateError::InvalidSize(size));
    }

    for attempt in 0..MAX_ATTEMPTS {
        if let Some(cells) = try_fill(size, rng) {
            if attempt > 0 {
                log::debug!("latin fill of size {size} succeeded after {attempt} restarts");
            }
            return Ok(cells);
        }
    }

    log::debug!("latin fill of size {size} exhausted {MAX_ATTEMPTS} attempts");
    Err(GenerateError::GenerationExhausted {
        attempts: MAX_ATTEMPTS,
    })
}

/// One fill pass; `None` means a cell ran out of candidates.
fn try_fill(size: usize, rng: &mut SeededRng) -> Option<Vec<usize>> {
    let mut cells = Vec::with_capacity(size * size);
    // Indexed by value, so slot 0 is unused.
    let mut row_used = vec![vec![false; size + 1]; size];
    let mut col_used = vec![vec![false; size + 1]; size];
    let mut candidates = Vec::with_capacity(size);

    for index in 0..size * size {
        let row = index / size;
        let col = index % size;

        candidates.clear();
        candidates.extend((1..=size).filter(|&v| !row_used[row][v] && !col_used[col][v]));

        let &value = rng.random_from(&candidates)?;
        row_used[row][value] = true;
        col_used[col][value] = true;
        cells.push(value);
    }

    Some(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_latin(cells: &[usize], size: usize) {
        assert_eq!(cells.len(), size * size);
        for line in 0..size {
            let mut row: Vec<_> = (0..size).map(|c| cells[line * size + c]).collect();
            let mut col: Vec<_> = (0..size).map(|r| cells[r * size + line]).collect();
            row.sort_unstable();
            col.sort_unstable();
            let expected: Vec<_> = (1..=size).collect();
            assert_eq!(row, expected, "row {line} is not a permutation");
            assert_eq!(col, expected, "column {line} is not a permutation");
        }
    }

    #[test]
    fn rejects_degenerate_sizes() {
        let mut rng = SeededRng::with_seed(1);

        assert_eq!(fill(0, &mut rng), Err(GenerateError::InvalidSize(0)));
        assert_eq!(fill(1, &mut rng), Err(GenerateError::InvalidSize(1)));
    }

    #[test]
    fn fills_valid_latin_squares() {
        for size in 2..=7 {
            for seed in 1..=10 {
                let mut rng = SeededRng::with_seed(seed);
                let cells = fill(size, &mut rng).expect("fill should succeed");
                assert_latin(&cells, size);
            }
        }
    }

    #[test]
    fn same_seed_fills_identically() {
        let mut a = SeededRng::with_seed(42);
        let mut b = SeededRng::with_seed(42);

        assert_eq!(fill(6, &mut a).unwrap(), fill(6, &mut b).unwrap());
    }
}
