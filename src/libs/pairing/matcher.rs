use super::ancestry::Ancestry;
use super::score::ScoreMatrix;
use crate::libs::phylo::NodeId;
use itertools::Itertools;
use std::collections::HashSet;

/// An unordered pair of candidate nodes, kept in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match {
    pub a: NodeId,
    pub b: NodeId,
}

impl Match {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        Self { a, b }
    }

    /// Order-independent identity: `(a, b)` and `(b, a)` share a key.
    pub fn key(&self) -> (NodeId, NodeId) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.a == id || self.b == id
    }

    /// The other endpoint, if `id` is one of them
    pub fn partner(&self, id: NodeId) -> Option<NodeId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn nodes(&self) -> [NodeId; 2] {
        [self.a, self.b]
    }
}

/// Thresholded reciprocal matches between candidate nodes.
///
/// Pairs `(i, j)` with `i < j` are visited row-major. A pair is kept when both
/// `scores[i][j]` and `scores[j][i]` reach `threshold` and neither node is an
/// ancestor of the other.
pub fn reciprocal_matches(
    candidates: &[NodeId],
    scores: &ScoreMatrix,
    threshold: f64,
    ancestry: &Ancestry,
) -> Vec<Match> {
    let mut seen: HashSet<(NodeId, NodeId)> = HashSet::new();
    let mut matches = Vec::new();

    for (i, j) in (0..candidates.len()).tuple_combinations() {
        if scores.get(i, j) < threshold || scores.get(j, i) < threshold {
            continue;
        }

        let (a, b) = (candidates[i], candidates[j]);
        if a == b || ancestry.related(a, b) {
            continue;
        }

        let m = Match::new(a, b);
        if seen.insert(m.key()) {
            matches.push(m);
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::pairing::annotate::DescendantTable;
    use crate::libs::pairing::registry::MultipleRegistry;
    use crate::libs::pairing::score::prefix_set;
    use crate::libs::phylo::Tree;

    fn raw_matches(newick: &str, threshold: f64) -> (Vec<NodeId>, Vec<Match>) {
        let tree = Tree::from_newick(newick).unwrap();
        let registry = MultipleRegistry::from_tree(&tree);
        let table = DescendantTable::annotate(&tree, &registry);
        let candidates = table.candidates(&tree);
        let sets: Vec<_> = candidates
            .iter()
            .map(|&id| prefix_set(table.get(id), registry.len()))
            .collect();
        let scores = ScoreMatrix::build(&sets).unwrap();
        let ancestry = Ancestry::new(&tree);
        let matches = reciprocal_matches(&candidates, &scores, threshold, &ancestry);
        (candidates, matches)
    }

    #[test]
    fn test_match_key() {
        let m = Match::new(5, 2);
        assert_eq!(m.key(), (2, 5));
        assert_eq!(m.key(), Match::new(2, 5).key());
        assert_eq!(m.partner(5), Some(2));
        assert_eq!(m.partner(3), None);
        assert!(m.contains(2));
    }

    #[test]
    fn test_sister_clades_match() {
        // 0 root, 1 (X_1,Y_1), 4 (X_2,Y_2)
        let (candidates, matches) = raw_matches("((X_1,Y_1),(X_2,Y_2));", 0.5);
        assert_eq!(candidates, vec![1, 4, 0]);
        assert_eq!(matches, vec![Match::new(1, 4)]);
    }

    #[test]
    fn test_disjoint_prefixes_never_match() {
        let (candidates, matches) = raw_matches("((X_1,X_2),(Y_1,Y_2),(A,B));", 0.5);
        assert_eq!(candidates.len(), 3);
        assert!(matches.is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // {X,Y} vs {X}: 0.5
        let newick = "((X_1,Y_1),(X_2,A),(Y_2,B));";
        let (_, matches) = raw_matches(newick, 0.5);
        assert_eq!(matches.len(), 2);

        let (_, matches) = raw_matches(newick, 0.51);
        assert!(matches.is_empty());
    }
}
