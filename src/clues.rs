//! Arithmetic clue assignment: picking an operation for each cage and
//! computing the result printed next to it.
//!
//! Cages of one or two cells may use any configured operation; larger cages
//! are restricted to operations that are order-insensitive over a whole set
//! (addition, multiplication, minimum, maximum). Subtraction and division
//! results are defined for any cage size by a left fold of `max(acc, v)`
//! against `min(acc, v)` over the ascending values, which reduces to
//! `max - min` and `max / min` for a pair.

use crate::{error::GenerateError, puzzle::Cage, rng::SeededRng};

/// An arithmetic relation a cage can be annotated with.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    /// Sum of all cage values.
    Addition,
    /// Fold of `max(acc, v) - min(acc, v)` from 0; `max - min` for a pair.
    Subtraction,
    /// Product of all cage values.
    Multiplication,
    /// Fold of `max(acc, v) / min(acc, v)` from 1; `max / min` for a pair.
    Division,
    /// Smallest cage value.
    Minimum,
    /// Largest cage value.
    Maximum,
    /// Largest cage value modulo the smallest.
    Modulus,
    /// Lowest common multiple of a two-cell cage.
    LowestCommonMultiple,
    /// Greatest common divisor of a two-cell cage.
    GreatestCommonDivisor,
}

/// Operations meaningful for cages of three or more cells.
const ASSOCIATIVE: [Operator; 4] = [
    Operator::Addition,
    Operator::Multiplication,
    Operator::Minimum,
    Operator::Maximum,
];

impl Operator {
    /// Every supported operation.
    pub const ALL: [Operator; 9] = [
        Operator::Addition,
        Operator::Subtraction,
        Operator::Multiplication,
        Operator::Division,
        Operator::Minimum,
        Operator::Maximum,
        Operator::Modulus,
        Operator::LowestCommonMultiple,
        Operator::GreatestCommonDivisor,
    ];

    /// The symbol a renderer prints next to the cage result.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Addition => "+",
            Operator::Subtraction => "-",
            Operator::Multiplication => "x",
            Operator::Division => "\u{00F7}",
            Operator::Minimum => "min",
            Operator::Maximum => "max",
            Operator::Modulus => "mod",
            Operator::LowestCommonMultiple => "LCM",
            Operator::GreatestCommonDivisor => "GCD",
        }
    }

    /// Apply the operation to cage values sorted ascending.
    ///
    /// `values` must be non-empty and sorted; the generator always calls
    /// this with the sorted values of one cage.
    pub fn apply(&self, values: &[usize]) -> f64 {
        debug_assert!(!values.is_empty(), "a cage has at least one value");
        debug_assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));

        match self {
            Operator::Addition => values.iter().sum::<usize>() as f64,
            Operator::Subtraction => values
                .iter()
                .fold(0_i64, |acc, &v| acc.max(v as i64) - acc.min(v as i64))
                as f64,
            Operator::Multiplication => values.iter().product::<usize>() as f64,
            Operator::Division => values
                .iter()
                .fold(1.0_f64, |acc, &v| acc.max(v as f64) / acc.min(v as f64)),
            Operator::Minimum => values[0] as f64,
            Operator::Maximum => values[values.len() - 1] as f64,
            Operator::Modulus => (values[values.len() - 1] % values[0]) as f64,
            Operator::LowestCommonMultiple => {
                values.iter().copied().reduce(lcm).unwrap_or(0) as f64
            }
            Operator::GreatestCommonDivisor => {
                values.iter().copied().reduce(gcd).unwrap_or(0) as f64
            }
        }
    }
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

fn lcm(a: usize, b: usize) -> usize {
    a / gcd(a, b) * b
}

/// The configured operations usable by a cage of `cage_size` cells, in
/// configuration order without duplicates.
fn valid_operations(allowed: &[Operator], cage_size: usize) -> Vec<Operator> {
    let pool: &[Operator] = if cage_size < 3 {
        &Operator::ALL
    } else {
        &ASSOCIATIVE
    };

    let mut valid = Vec::new();
    for &operation in allowed {
        if !pool.contains(&operation) || valid.contains(&operation) {
            continue;
        }
        // LCM and GCD clues only make sense over exactly two values.
        if matches!(
            operation,
            Operator::LowestCommonMultiple | Operator::GreatestCommonDivisor
        ) && cage_size != 2
        {
            continue;
        }
        valid.push(operation);
    }
    valid
}

/// Annotate each cell group with an operation drawn uniformly from the
/// configured set valid for its size, and the computed result.
///
/// # Errors
/// [`GenerateError::NoValidOperation`] if a cage has no usable operation
/// after size-based filtering, which indicates an empty or incompatible
/// configured operation set.
pub fn assign(
    cells: &[usize],
    groups: Vec<Vec<usize>>,
    allowed: &[Operator],
    rng: &mut SeededRng,
) -> Result<Vec<Cage>, GenerateError> {
    let mut cages = Vec::with_capacity(groups.len());

    for group in groups {
        let mut values: Vec<usize> = group.iter().map(|&index| cells[index]).collect();
        values.sort_unstable();

        let valid = valid_operations(allowed, group.len());
        let &operation = rng
            .random_from(&valid)
            .ok_or(GenerateError::NoValidOperation {
                cage_size: group.len(),
            })?;

        let result = operation.apply(&values);
        cages.push(Cage {
            cells: group,
            operation,
            result,
        });
    }

    Ok(cages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_formulas() {
        assert_eq!(Operator::Addition.apply(&[1, 2, 3]), 6.0);
        assert_eq!(Operator::Subtraction.apply(&[2, 5]), 3.0);
        // The fold generalizes |max - min| step by step: 1, then 2-1, then 4-1.
        assert_eq!(Operator::Subtraction.apply(&[1, 2, 4]), 3.0);
        assert_eq!(Operator::Multiplication.apply(&[2, 3, 4]), 24.0);
        assert_eq!(Operator::Division.apply(&[2, 6]), 3.0);
        assert_eq!(Operator::Division.apply(&[2, 3]), 1.5);
        assert_eq!(Operator::Minimum.apply(&[2, 5]), 2.0);
        assert_eq!(Operator::Maximum.apply(&[2, 5]), 5.0);
        assert_eq!(Operator::Modulus.apply(&[3, 7]), 1.0);
        assert_eq!(Operator::LowestCommonMultiple.apply(&[4, 6]), 12.0);
        assert_eq!(Operator::GreatestCommonDivisor.apply(&[4, 6]), 2.0);
    }

    #[test]
    fn single_value_results() {
        assert_eq!(Operator::Addition.apply(&[3]), 3.0);
        assert_eq!(Operator::Subtraction.apply(&[3]), 3.0);
        assert_eq!(Operator::Division.apply(&[3]), 3.0);
        assert_eq!(Operator::Modulus.apply(&[3]), 0.0);
    }

    #[test]
    fn large_cages_only_get_associative_operations() {
        let valid = valid_operations(&Operator::ALL, 3);
        assert_eq!(valid, ASSOCIATIVE.to_vec());

        let valid = valid_operations(&[Operator::Subtraction, Operator::Addition], 4);
        assert_eq!(valid, vec![Operator::Addition]);
    }

    #[test]
    fn pairwise_operations_need_two_cells() {
        let allowed = [
            Operator::LowestCommonMultiple,
            Operator::GreatestCommonDivisor,
        ];

        assert!(valid_operations(&allowed, 1).is_empty());
        assert_eq!(valid_operations(&allowed, 2), allowed.to_vec());
    }

    #[test]
    fn duplicate_configuration_entries_collapse() {
        let valid = valid_operations(&[Operator::Addition, Operator::Addition], 2);
        assert_eq!(valid, vec![Operator::Addition]);
    }

    #[test]
    fn assign_computes_matching_results() {
        let cells = vec![1, 2, 2, 1];
        let groups = vec![vec![0, 1], vec![2, 3]];
        let mut rng = SeededRng::with_seed(1);

        let cages = assign(&cells, groups, &[Operator::Addition], &mut rng).unwrap();

        assert_eq!(cages.len(), 2);
        for cage in &cages {
            assert_eq!(cage.operation, Operator::Addition);
            assert_eq!(cage.result, 3.0);
        }
    }

    #[test]
    fn empty_operation_set_is_an_error() {
        let mut rng = SeededRng::with_seed(1);
        let outcome = assign(&[1, 2, 2, 1], vec![vec![0, 1]], &[], &mut rng);

        assert_eq!(
            outcome,
            Err(GenerateError::NoValidOperation { cage_size: 2 })
        );
    }
}
