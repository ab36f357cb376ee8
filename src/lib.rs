#![deny(missing_docs)]

//! Generation of [KenKen](https://en.wikipedia.org/wiki/KenKen)-style puzzles:
//! a seeded [Latin square](https://en.wikipedia.org/wiki/Latin_square) fill,
//! a randomized cage partition with arithmetic clues, and a contour-traced
//! boundary polygon per cage for renderers.
//!
//! A fixed seed fully determines the puzzle; see [`generate`].

pub mod boundary;
pub mod cages;
pub mod clues;
pub mod error;
pub mod grid_graph;
pub mod latin_square;
pub mod puzzle;
pub mod rng;

pub use boundary::{trace_boundary, Point};
pub use clues::Operator;
pub use error::GenerateError;
pub use puzzle::{generate, Cage, GenerateOptions, Puzzle};
pub use rng::SeededRng;
