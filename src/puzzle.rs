//! Puzzle assembly: generation options, the generated puzzle value, and
//! the top-level [`generate`] entry point.

use std::collections::HashMap;

use crate::{
    boundary::{self, Point},
    cages::{self, SizeConstraint},
    clues::{self, Operator},
    error::GenerateError,
    latin_square,
    rng::SeededRng,
};

/// Options accepted by [`generate`].
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Grid side length, at least 2.
    pub size: usize,
    /// Explicit seed; `None` draws one from entropy. The effective seed is
    /// recorded on the puzzle either way.
    pub seed: Option<u32>,
    /// Operations cages may be annotated with.
    pub operations: Vec<Operator>,
    /// Probability in `[0, 1]` that an eligible neighbor merge is
    /// attempted; higher means larger cages on average.
    pub grouping_ratio: f64,
    /// Per-size cage count targets; `None` uses the default quota table
    /// for the configured size.
    pub group_size_constraints: Option<HashMap<usize, SizeConstraint>>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        GenerateOptions {
            size: 4,
            seed: None,
            operations: vec![Operator::Addition, Operator::Subtraction],
            grouping_ratio: 0.5,
            group_size_constraints: None,
        }
    }
}

/// A cage: orthogonally connected cells sharing one arithmetic clue.
#[derive(Debug, Clone, PartialEq)]
pub struct Cage {
    /// Indices of the member cells, ascending.
    pub cells: Vec<usize>,
    /// The operation printed on the cage.
    pub operation: Operator,
    /// The operation's result over the cage's cell values.
    pub result: f64,
}

impl Cage {
    /// Recompute the clue result from the current grid cell values.
    ///
    /// Matches [`Cage::result`] for an untouched puzzle; callers that
    /// mutate cells afterwards use this to refresh stale clues.
    pub fn compute_result(&self, grid_cells: &[usize]) -> f64 {
        let mut values: Vec<usize> = self.cells.iter().map(|&index| grid_cells[index]).collect();
        values.sort_unstable();
        self.operation.apply(&values)
    }

    /// Trace the cage outline as a closed polygon of corner points, ready
    /// for a renderer to scale into layout coordinates.
    pub fn boundary(&self, size: usize) -> Vec<Point> {
        boundary::trace_boundary(&self.cells, size)
    }
}

/// A generated puzzle.
///
/// The value is self-contained and read-only once returned; `generate`
/// calls share no state, so puzzles can be produced concurrently with one
/// options value per call.
#[derive(Debug, Clone, PartialEq)]
pub struct Puzzle {
    /// Grid side length.
    pub size: usize,
    /// Seed that reproduces this puzzle exactly.
    pub seed: u32,
    /// Row-major solved cell values, forming a latin square.
    pub cells: Vec<usize>,
    /// The cage partition with clues; the cages jointly cover every cell
    /// index exactly once.
    pub cages: Vec<Cage>,
    /// The operation set generation drew from.
    pub operations: Vec<Operator>,
}

/// Generate a puzzle from `options`.
///
/// The same options with the same seed produce a bit-identical puzzle.
///
/// # Errors
/// - [`GenerateError::InvalidSize`] if `options.size < 2`.
/// - [`GenerateError::GenerationExhausted`] if no valid latin grid was
///   found within the filler's attempt bound; retry with another seed.
/// - [`GenerateError::NoValidOperation`] if a cage ends up with no usable
///   operation, indicating a misconfigured operation set.
pub fn generate(options: &GenerateOptions) -> Result<Puzzle, GenerateError> {
    if options.size < 2 {
        return Err(GenerateError::InvalidSize(options.size));
    }

    let seed = options
        .seed
        .unwrap_or_else(|| rand::random_range(1..=u32::MAX));
    let mut rng = SeededRng::with_seed(seed);
    log::debug!("generating a size {} puzzle from seed {seed}", options.size);

    let cells = latin_square::fill(options.size, &mut rng)?;

    let default_constraints;
    let constraints = match &options.group_size_constraints {
        Some(table) => table,
        None => {
            default_constraints = cages::default_size_constraints(options.size);
            &default_constraints
        }
    };
    let groups = cages::partition(options.size, options.grouping_ratio, constraints, &mut rng);
    let cages = clues::assign(&cells, groups, &options.operations, &mut rng)?;

    Ok(Puzzle {
        size: options.size,
        seed,
        cells,
        cages,
        operations: options.operations.clone(),
    })
}
