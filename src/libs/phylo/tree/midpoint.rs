use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;

/// Root the tree at the midpoint of its longest leaf-to-leaf path.
///
/// The two ends of the path are found with two farthest-leaf sweeps. The edge
/// holding the midpoint is split, the tree is rerooted on the new node, and
/// the nodes left with a single child are spliced out.
/// Trees with fewer than two leaves or no positive branch lengths are kept.
pub fn midpoint_root(tree: &mut Tree) -> Result<(), TreeError> {
    let root = tree.get_root().ok_or(TreeError::NoRoot)?;
    let leaves = super::stat::get_leaves(tree, root);
    if leaves.len() < 2 {
        return Ok(());
    }

    let (a, _) = super::stat::farthest_leaf(tree, leaves[0]);
    let (b, diameter) = super::stat::farthest_leaf(tree, a);
    if diameter <= 0.0 {
        return Ok(());
    }
    let half = diameter / 2.0;
    let lca = tree.get_common_ancestor(&a, &b)?;

    let (child, offset) = match split_point(tree, a, lca, half) {
        Some(point) => point,
        None => split_point(tree, b, lca, half).ok_or_else(|| {
            TreeError::LogicError("Midpoint not found on the longest path".to_string())
        })?,
    };

    let new_root = tree.insert_parent_at(child, offset)?;
    tree.reroot_at(new_root)?;
    tree.remove_degree_two_nodes();

    Ok(())
}

/// Walk up from `leaf` towards `lca` and find the edge where the cumulative
/// length reaches `half`. Returns the lower end of that edge and the offset
/// of the split point from it.
fn split_point(tree: &Tree, leaf: NodeId, lca: NodeId, half: f64) -> Option<(NodeId, f64)> {
    let mut acc = 0.0;
    let mut current = leaf;

    while current != lca {
        let node = tree.get_node(current)?;
        let length = node.length.unwrap_or(0.0);
        if length > 0.0 && acc + length >= half {
            return Some((current, half - acc));
        }
        acc += length;
        current = node.parent?;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_midpoint_root_unbalanced() {
        // Longest path A..D = 1 + 1 + 1 + 6 = 9, midpoint 4.5 away from D
        let mut tree = Tree::from_newick("((A:1,B:1):1,(C:1,D:6):1);").unwrap();
        tree.midpoint_root().unwrap();

        let root = tree.get_root().unwrap();
        let children = &tree.get_node(root).unwrap().children;
        assert_eq!(children.len(), 2);

        let d = tree.get_node_by_name("D").unwrap();
        assert_eq!(tree.get_node(d).unwrap().parent, Some(root));
        assert_relative_eq!(tree.get_node(d).unwrap().length.unwrap(), 4.5);

        let a = tree.get_node_by_name("A").unwrap();
        let (dist, _) = tree.get_distance(&a, &d).unwrap();
        assert_relative_eq!(dist, 9.0);

        // One node added on the split edge, the old root spliced out
        assert_eq!(tree.len(), 7);
        assert!(tree.get_node(0).is_none());
    }

    #[test]
    fn test_midpoint_root_keeps_balanced_tree() {
        let mut tree = Tree::from_newick("((A:1,B:1):1,(C:1,D:1):1);").unwrap();
        tree.midpoint_root().unwrap();

        let a = tree.get_node_by_name("A").unwrap();
        let c = tree.get_node_by_name("C").unwrap();
        let (dist, _) = tree.get_distance(&a, &c).unwrap();
        assert_relative_eq!(dist, 4.0);
        assert_eq!(tree.get_leaves().len(), 4);
    }

    #[test]
    fn test_midpoint_root_without_lengths() {
        let mut tree = Tree::from_newick("((A,B),C);").unwrap();
        tree.midpoint_root().unwrap();
        assert_eq!(tree.to_newick(), "((A,B),C);");
    }
}
