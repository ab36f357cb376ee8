//! Partitioning the grid into cages: a randomized single-pass merge of
//! adjacent cells, steered by a merge probability and per-size quotas.
//!
//! Every cell starts as its own group. Cells are visited in random order
//! and offered a merge with each neighbor in random order; an offer must
//! pass the grouping-ratio draw, the hard size cap, and the quota check
//! before the two groups are unioned. Quotas are soft preferences: the
//! single pass returns whatever partition it ends on, and no retry or
//! post-verification happens at this level.

use std::collections::HashMap;

use bumpalo::Bump;

use crate::{
    grid_graph::{Direction, GridGraph},
    rng::SeededRng,
};

/// Inclusive bounds on how many cages of one size class the partitioner
/// should aim for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SizeConstraint {
    /// Soft floor: a merge is rejected if it would drop the class count
    /// below this.
    pub min: usize,
    /// Ceiling: a merge is rejected if the merged size class is already at
    /// this count.
    pub max: usize,
}

/// Default quota table for cage sizes 1 through 5.
pub fn default_size_constraints(size: usize) -> HashMap<usize, SizeConstraint> {
    HashMap::from([
        (
            1,
            SizeConstraint {
                min: 0,
                max: size.saturating_sub(2),
            },
        ),
        (
            2,
            SizeConstraint {
                min: 1,
                max: size * size,
            },
        ),
        (
            3,
            SizeConstraint {
                min: 1,
                max: size.saturating_sub(2),
            },
        ),
        (
            4,
            SizeConstraint {
                min: 0,
                max: size.saturating_sub(3),
            },
        ),
        (5, SizeConstraint { min: 0, max: 2 }),
    ])
}

/// Partition the `size` × `size` grid into cages, returned as lists of cell
/// indices in ascending order, jointly covering every index exactly once.
///
/// `grouping_ratio` is the merge probability knob: each neighbor offer
/// draws one uniform value and proceeds only if it is at or below the
/// ratio, so a higher ratio yields larger cages on average. Merge order
/// depends entirely on `rng`, so identical seeds reproduce identical cages.
pub fn partition(
    size: usize,
    grouping_ratio: f64,
    constraints: &HashMap<usize, SizeConstraint>,
    rng: &mut SeededRng,
) -> Vec<Vec<usize>> {
    let cell_count = size * size;
    let max_cage_size = if size > 5 { 5 } else { 4 };

    let mut group_ids: Vec<usize> = (0..cell_count).collect();

    let arena = Bump::new();
    let mut grid = GridGraph::new(&arena, size, size);
    let mut points = Vec::with_capacity(cell_count);
    for index in 0..cell_count {
        let (row, col) = to_coords(index, size);
        grid.add(col, row, index);
        points.push((col, row));
    }

    rng.shuffle(&mut points);
    for &(x, y) in &points {
        let cell = grid.get(x, y).unwrap();
        let mut directions = Direction::ALL;
        rng.shuffle(&mut directions);

        for direction in directions {
            // The ratio draw happens before the neighbor lookup so border
            // cells consume the random stream like interior cells do.
            if rng.random() > grouping_ratio {
                continue;
            }
            let Some(neighbor) = cell.neighbor(direction) else {
                continue;
            };

            let id_a = group_ids[cell.data];
            let id_b = group_ids[neighbor.data];
            let size_a = group_size(&group_ids, id_a);
            let size_b = group_size(&group_ids, id_b);
            let joined = size_a + size_b;
            if joined > max_cage_size {
                continue;
            }

            let counts = size_distribution(&group_ids);
            let count_a = counts.get(&size_a).copied().unwrap_or(0);
            let count_b = counts.get(&size_b).copied().unwrap_or(0);
            let joined_count = counts.get(&joined).copied().unwrap_or(0);

            let min_a = constraints.get(&size_a).map_or(0, |c| c.min);
            let min_b = constraints.get(&size_b).map_or(0, |c| c.min);
            // A class with no live cages yet, or without a configured
            // bound, may always grow by one.
            let joined_allowed = joined_count == 0
                || constraints
                    .get(&joined)
                    .map_or(true, |c| joined_count < c.max);

            if count_a > min_a && count_b > min_b && joined_allowed {
                // A cell can meet its own group here; the rewrite is then a
                // harmless no-op.
                merge_groups(&mut group_ids, id_a, id_b);
            }
        }
    }

    if log::log_enabled!(log::Level::Debug) {
        let mut counts: Vec<_> = size_distribution(&group_ids).into_iter().collect();
        counts.sort_unstable();
        log::debug!("cage size distribution (size, count): {counts:?}");
    }

    unique_groups(&group_ids)
}

fn to_coords(index: usize, size: usize) -> (usize, usize) {
    (index / size, index % size)
}

/// Number of cells currently carrying `id`.
fn group_size(group_ids: &[usize], id: usize) -> usize {
    group_ids.iter().filter(|&&group| group == id).count()
}

/// Union by rewriting every member of `id_b` onto `id_a`.
///
/// Brute force over the whole id map, which is fine for boards of at most
/// a few hundred cells.
fn merge_groups(group_ids: &mut [usize], id_a: usize, id_b: usize) {
    for id in group_ids.iter_mut() {
        if *id == id_b {
            *id = id_a;
        }
    }
}

/// Map from group size to the number of groups of that size.
fn size_distribution(group_ids: &[usize]) -> HashMap<usize, usize> {
    let mut group_sizes: HashMap<usize, usize> = HashMap::new();
    for &id in group_ids {
        *group_sizes.entry(id).or_insert(0) += 1;
    }

    let mut counts = HashMap::new();
    for size in group_sizes.into_values() {
        *counts.entry(size).or_insert(0) += 1;
    }
    counts
}

/// Collect groups as member lists, ordered by first member, members
/// ascending.
fn unique_groups(group_ids: &[usize]) -> Vec<Vec<usize>> {
    let mut slots: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (index, &id) in group_ids.iter().enumerate() {
        let slot = *slots.entry(id).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(index);
    }

    groups
}
