use super::matcher::Match;
use crate::libs::phylo::NodeId;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use petgraph::unionfind::UnionFind;

/// Candidate nodes linked by surviving matches, in insertion order
pub type Group = IndexSet<NodeId>;

/// Single-pass greedy merge.
///
/// A match extends the first group that already holds one of its endpoints,
/// and only that group. A match bridging two existing groups does not fuse
/// them, so the result may overlap; see [`overlapping_groups`].
pub fn merge_greedy(matches: &[Match]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    for m in matches {
        match groups
            .iter_mut()
            .find(|g| g.contains(&m.a) || g.contains(&m.b))
        {
            Some(group) => {
                group.insert(m.a);
                group.insert(m.b);
            }
            None => groups.push(IndexSet::from([m.a, m.b])),
        }
    }

    groups
}

/// Connected components of the match graph.
///
/// Groups are disjoint and ordered by their first node in match order.
pub fn merge_connected(matches: &[Match]) -> Vec<Group> {
    let nodes: IndexSet<NodeId> = matches.iter().flat_map(|m| m.nodes()).collect();

    let mut uf: UnionFind<usize> = UnionFind::new(nodes.len());
    for m in matches {
        if let (Some(a), Some(b)) = (nodes.get_index_of(&m.a), nodes.get_index_of(&m.b)) {
            uf.union(a, b);
        }
    }

    let mut components: IndexMap<usize, Group> = IndexMap::new();
    for (idx, &node) in nodes.iter().enumerate() {
        components.entry(uf.find(idx)).or_default().insert(node);
    }

    components.into_values().collect()
}

/// Index pairs `(i, j)`, `i < j`, of groups sharing at least one node
pub fn overlapping_groups(groups: &[Group]) -> Vec<(usize, usize)> {
    (0..groups.len())
        .tuple_combinations()
        .filter(|&(i, j)| !groups[i].is_disjoint(&groups[j]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(ids: &[NodeId]) -> Group {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_merge_greedy_chain() {
        let matches = vec![Match::new(1, 2), Match::new(2, 3), Match::new(7, 8)];
        let groups = merge_greedy(&matches);

        assert_eq!(groups, vec![group(&[1, 2, 3]), group(&[7, 8])]);
        assert!(overlapping_groups(&groups).is_empty());
    }

    #[test]
    fn test_merge_greedy_bridge_leaves_overlap() {
        // (A,B) (C,D) (A,C): the last match extends the first group only
        let (a, b, c, d) = (10, 11, 12, 13);
        let matches = vec![Match::new(a, b), Match::new(c, d), Match::new(a, c)];
        let groups = merge_greedy(&matches);

        assert_eq!(groups, vec![group(&[a, b, c]), group(&[c, d])]);
        assert_eq!(overlapping_groups(&groups), vec![(0, 1)]);
    }

    #[test]
    fn test_merge_connected_fuses_bridge() {
        let (a, b, c, d) = (10, 11, 12, 13);
        let matches = vec![
            Match::new(a, b),
            Match::new(c, d),
            Match::new(5, 6),
            Match::new(a, c),
        ];
        let groups = merge_connected(&matches);

        assert_eq!(groups, vec![group(&[a, b, c, d]), group(&[5, 6])]);
        assert!(overlapping_groups(&groups).is_empty());
    }

    #[test]
    fn test_merge_empty() {
        assert!(merge_greedy(&[]).is_empty());
        assert!(merge_connected(&[]).is_empty());
        assert!(overlapping_groups(&[]).is_empty());
    }
}
