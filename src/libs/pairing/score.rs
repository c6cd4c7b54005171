use super::error::PairingError;
use super::registry::PrefixId;
use fixedbitset::FixedBitSet;
use rayon::prelude::*;

/// Distinct prefixes of an annotation list as a bit set of `width` bits.
pub fn prefix_set(prefixes: &[PrefixId], width: usize) -> FixedBitSet {
    let mut set = FixedBitSet::with_capacity(width);
    for &p in prefixes {
        set.grow(p + 1);
        set.insert(p);
    }
    set
}

/// Jaccard index of two prefix sets, |A ∩ B| / |A ∪ B|.
///
/// Two empty sets have no defined score and yield
/// [`PairingError::EmptyDescendants`].
pub fn jaccard_sets(a: &FixedBitSet, b: &FixedBitSet) -> Result<f64, PairingError> {
    let union = a.union(b).count();
    if union == 0 {
        return Err(PairingError::EmptyDescendants);
    }
    let intersection = a.intersection(b).count();
    Ok(intersection as f64 / union as f64)
}

/// Jaccard index of two annotation lists; duplicates collapse.
///
/// ```
/// use domtree::libs::pairing::score::jaccard;
///
/// assert_eq!(jaccard(&[0, 1, 1], &[1, 2]).unwrap(), 1.0 / 3.0);
/// assert_eq!(jaccard(&[0], &[1]).unwrap(), 0.0);
/// assert!(jaccard(&[], &[]).is_err());
/// ```
pub fn jaccard(a: &[PrefixId], b: &[PrefixId]) -> Result<f64, PairingError> {
    let width = a.iter().chain(b.iter()).max().map(|&m| m + 1).unwrap_or(0);
    jaccard_sets(&prefix_set(a, width), &prefix_set(b, width))
}

/// Full N×N matrix of Jaccard scores between candidate nodes, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl ScoreMatrix {
    /// Score every ordered pair of `sets`, diagonal included.
    ///
    /// Rows are computed in parallel; the result does not depend on
    /// scheduling.
    pub fn build(sets: &[FixedBitSet]) -> Result<Self, PairingError> {
        let rows: Vec<Vec<f64>> = sets
            .par_iter()
            .map(|a| {
                sets.iter()
                    .map(|b| jaccard_sets(a, b))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            size: sets.len(),
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[i * self.size + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.size..(i + 1) * self.size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_jaccard_values() {
        assert_relative_eq!(jaccard(&[0, 1], &[1, 0]).unwrap(), 1.0);
        assert_relative_eq!(jaccard(&[0, 0, 1], &[1]).unwrap(), 0.5);
        assert_relative_eq!(jaccard(&[0, 1, 2], &[2, 3]).unwrap(), 0.25);
        // One side empty is a plain zero
        assert_relative_eq!(jaccard(&[], &[3]).unwrap(), 0.0);
    }

    #[test]
    fn test_jaccard_both_empty() {
        assert_eq!(jaccard(&[], &[]), Err(PairingError::EmptyDescendants));

        let empty = FixedBitSet::with_capacity(4);
        assert_eq!(
            jaccard_sets(&empty, &empty),
            Err(PairingError::EmptyDescendants)
        );
    }

    #[test]
    fn test_score_matrix() {
        let sets = vec![
            prefix_set(&[0, 1], 3),
            prefix_set(&[1, 0, 0], 3),
            prefix_set(&[2], 3),
        ];
        let matrix = ScoreMatrix::build(&sets).unwrap();

        assert_eq!(matrix.size(), 3);
        for i in 0..3 {
            assert_relative_eq!(matrix.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert_relative_eq!(matrix.get(0, 1), 1.0);
        assert_relative_eq!(matrix.get(0, 2), 0.0);
        assert_eq!(matrix.row(2), &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_score_matrix_rejects_empty_set() {
        let sets = vec![prefix_set(&[0], 2), FixedBitSet::with_capacity(2)];
        assert_eq!(
            ScoreMatrix::build(&sets),
            Err(PairingError::EmptyDescendants)
        );
    }
}
