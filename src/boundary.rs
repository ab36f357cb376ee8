//! Tracing a cage's cell set into an ordered perimeter polygon.
//!
//! The tracer wall-follows the cage outline: starting from the smallest
//! cell index it repeatedly tries to step to a cage neighbor, preferring
//! directions rotated 90° counterclockwise from the previous travel
//! direction. Where no neighbor exists it emits the boundary edge along
//! that side of the current cell instead of moving. Keeping a hand on the
//! wall this way traces concave outlines without self-crossing. The walk
//! closes when an emitted edge returns to the very first edge's start
//! point; a bounded move count guarantees termination on malformed input,
//! returning whatever partial outline was collected.

use std::collections::VecDeque;

use bumpalo::Bump;

use crate::grid_graph::{Direction, GridGraph};

/// A grid corner point, in corner coordinates (one unit per cell).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Horizontal corner coordinate, `0..=size`.
    pub x: usize,
    /// Vertical corner coordinate, `0..=size`.
    pub y: usize,
}

/// A unit boundary edge between two corner points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Edge {
    from: Point,
    to: Point,
}

/// Cap on cell-to-cell moves; cages are small, so a healthy walk closes
/// well before this.
const MAX_MOVES: usize = 10;

/// Trace the outline of the cage holding `cells` (indices into a `size` ×
/// `size` grid) as a closed polygon of corner points, first point repeated
/// last.
///
/// A walk that cannot close (disconnected or otherwise malformed input)
/// logs a warning and returns the partial outline traced so far; an empty
/// outline falls back to the unit square. Rendering is the only consumer,
/// so a best-effort polygon is preferable to failing the puzzle.
pub fn trace_boundary(cells: &[usize], size: usize) -> Vec<Point> {
    let arena = Bump::new();
    let mut grid = GridGraph::new(&arena, size, size);
    for &index in cells {
        let (row, col) = to_coords(index, size);
        grid.add(col, row, index);
    }

    let Some(&start) = cells.iter().min() else {
        return edges_to_polygon(&[]);
    };
    let (row, col) = to_coords(start, size);

    let mut edges: Vec<Edge> = Vec::new();
    let mut direction = Direction::Right;
    let mut cell = grid.get(col, row).unwrap();
    let mut moves = 0;

    while !is_closed(&edges) && moves < MAX_MOVES {
        let mut queue = direction_priority(direction);
        let mut cell_edges: Vec<Edge> = Vec::new();
        let mut candidate = queue.pop_front();
        let mut next_cell = candidate.and_then(|dir| cell.neighbor(dir));

        // Walk the priority order: emit a boundary edge for every closed
        // side until an open side (a cage neighbor) turns up.
        while let (None, Some(dir)) = (next_cell, candidate) {
            let edge = side_edge(cell.x, cell.y, dir);
            cell_edges.push(edge);

            let closes_walk = edges.first().map_or(false, |first| first.from == edge.to);
            let closes_cell = cell_edges.len() > 1 && cell_edges[0].from == edge.to;
            if closes_walk || closes_cell {
                edges.extend(cell_edges);
                return edges_to_polygon(&edges);
            }

            candidate = queue.pop_front();
            next_cell = candidate.and_then(|dir| cell.neighbor(dir));
        }

        match (next_cell, candidate) {
            (Some(next), Some(dir)) => {
                moves += 1;
                cell = next;
                direction = dir;
                edges.extend(cell_edges);
            }
            _ => {
                log::warn!(
                    "boundary trace of a {}-cell cage ran out of candidate directions; \
                     returning a partial outline",
                    cells.len()
                );
                return edges_to_polygon(&edges);
            }
        }
    }

    if !is_closed(&edges) {
        log::warn!(
            "boundary trace of a {}-cell cage hit the {MAX_MOVES}-move cap before closing; \
             returning a partial outline",
            cells.len()
        );
    }
    edges_to_polygon(&edges)
}

fn to_coords(index: usize, size: usize) -> (usize, usize) {
    (index / size, index % size)
}

/// Candidate direction order after travelling in `previous`: hard left
/// first, then straight on, bending further right each try.
fn direction_priority(previous: Direction) -> VecDeque<Direction> {
    match previous {
        Direction::Right => VecDeque::from([
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]),
        Direction::Down => VecDeque::from([
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ]),
        Direction::Left => VecDeque::from([
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ]),
        Direction::Up => VecDeque::from([
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
        ]),
    }
}

/// The boundary edge along one side of the cell at `(x, y)`, oriented so
/// consecutive emitted edges chain head to tail clockwise.
fn side_edge(x: usize, y: usize, side: Direction) -> Edge {
    match side {
        Direction::Up => Edge {
            from: Point { x, y },
            to: Point { x: x + 1, y },
        },
        Direction::Right => Edge {
            from: Point { x: x + 1, y },
            to: Point { x: x + 1, y: y + 1 },
        },
        Direction::Down => Edge {
            from: Point { x: x + 1, y: y + 1 },
            to: Point { x, y: y + 1 },
        },
        Direction::Left => Edge {
            from: Point { x, y: y + 1 },
            to: Point { x, y },
        },
    }
}

fn is_closed(edges: &[Edge]) -> bool {
    match (edges.first(), edges.last()) {
        (Some(first), Some(last)) => first.from == last.to,
        _ => false,
    }
}

/// Concatenate edge endpoints into the polygon point sequence; an empty
/// edge list falls back to the unit square.
fn edges_to_polygon(edges: &[Edge]) -> Vec<Point> {
    match edges.first() {
        None => vec![
            Point { x: 0, y: 0 },
            Point { x: 1, y: 0 },
            Point { x: 1, y: 1 },
            Point { x: 0, y: 1 },
            Point { x: 0, y: 0 },
        ],
        Some(first) => {
            let mut polygon = Vec::with_capacity(edges.len() + 1);
            polygon.push(first.from);
            polygon.extend(edges.iter().map(|edge| edge.to));
            polygon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: usize, y: usize) -> Point {
        Point { x, y }
    }

    /// Twice the signed shoelace area of a closed polygon.
    fn doubled_area(polygon: &[Point]) -> i64 {
        polygon
            .windows(2)
            .map(|pair| {
                let (a, b) = (pair[0], pair[1]);
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum()
    }

    #[test]
    fn single_cell_traces_unit_square() {
        let polygon = trace_boundary(&[1], 4);

        assert_eq!(polygon, vec![p(1, 0), p(2, 0), p(2, 1), p(1, 1), p(1, 0)]);
    }

    #[test]
    fn pentomino_fixture() {
        // One cell on the top row over a three-cell base.
        let polygon = trace_boundary(&[1, 4, 5, 6], 4);

        assert_eq!(
            polygon,
            vec![
                p(1, 0),
                p(2, 0),
                p(2, 1),
                p(3, 1),
                p(3, 2),
                p(2, 2),
                p(1, 2),
                p(0, 2),
                p(0, 1),
                p(1, 1),
                p(1, 0),
            ]
        );
    }

    #[test]
    fn horizontal_domino() {
        let polygon = trace_boundary(&[0, 1], 4);

        assert_eq!(
            polygon,
            vec![p(0, 0), p(1, 0), p(2, 0), p(2, 1), p(1, 1), p(0, 1), p(0, 0)]
        );
    }

    #[test]
    fn closed_outline_area_matches_cell_count() {
        let cages: [&[usize]; 5] = [
            &[5],
            &[0, 1],
            &[0, 4, 8],
            &[1, 2, 5],
            // Square block in the middle of the grid.
            &[5, 6, 9, 10],
        ];

        for cells in cages {
            let polygon = trace_boundary(cells, 4);
            assert_eq!(polygon.first(), polygon.last());
            assert_eq!(
                doubled_area(&polygon).unsigned_abs() as usize,
                2 * cells.len(),
                "wrong area for cage {cells:?}"
            );
        }
    }

    #[test]
    fn empty_cage_falls_back_to_unit_square() {
        let polygon = trace_boundary(&[], 4);

        assert_eq!(polygon, vec![p(0, 0), p(1, 0), p(1, 1), p(0, 1), p(0, 0)]);
    }

    #[test]
    fn overlong_snake_returns_partial_outline() {
        // Seven cells in a row need more moves than the safety cap allows.
        let polygon = trace_boundary(&[0, 1, 2, 3, 4, 5, 6], 7);

        assert_ne!(polygon.first(), polygon.last());
    }

    #[test]
    fn vertical_domino() {
        let polygon = trace_boundary(&[1, 5], 4);

        assert_eq!(
            polygon,
            vec![p(1, 0), p(2, 0), p(2, 1), p(2, 2), p(1, 2), p(1, 1), p(1, 0)]
        );
    }
}
