use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;

/// Path from the root down to `id`, both ends included.
pub fn get_path_from_root(tree: &Tree, id: &NodeId) -> Result<Vec<NodeId>, TreeError> {
    if tree.get_node(*id).is_none() {
        return Err(TreeError::NodeNotFound(*id));
    }

    let mut path = get_ancestors(tree, id);
    path.reverse();
    path.push(*id);

    if tree.root != Some(path[0]) {
        return Err(TreeError::LogicError(format!(
            "Node {} is detached from root",
            id
        )));
    }

    Ok(path)
}

/// Strict ancestors of `id`, nearest first (parent, grandparent, ..., root).
pub fn get_ancestors(tree: &Tree, id: &NodeId) -> Vec<NodeId> {
    let mut ancestors = Vec::new();
    let mut current = tree.get_node(*id).and_then(|n| n.parent);

    while let Some(p) = current {
        ancestors.push(p);
        current = tree.get_node(p).and_then(|n| n.parent);
    }

    ancestors
}

/// True if `ancestor` lies strictly above `id`. O(depth).
pub fn is_ancestor(tree: &Tree, ancestor: &NodeId, id: &NodeId) -> bool {
    let mut current = tree.get_node(*id).and_then(|n| n.parent);

    while let Some(p) = current {
        if p == *ancestor {
            return true;
        }
        current = tree.get_node(p).and_then(|n| n.parent);
    }

    false
}

/// Lowest Common Ancestor (LCA) of two nodes.
pub fn get_common_ancestor(tree: &Tree, a: &NodeId, b: &NodeId) -> Result<NodeId, TreeError> {
    let path_a = get_path_from_root(tree, a)?;
    let path_b = get_path_from_root(tree, b)?;

    path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(u, v)| u == v)
        .last()
        .map(|(u, _)| *u)
        .ok_or_else(|| {
            TreeError::LogicError("Nodes are not in the same tree (no common ancestor)".to_string())
        })
}

/// Distance between two nodes as (weighted_distance, topological_distance).
/// Missing branch lengths count as zero.
pub fn get_distance(tree: &Tree, a: &NodeId, b: &NodeId) -> Result<(f64, usize), TreeError> {
    let lca = get_common_ancestor(tree, a, b)?;

    let dist_to_lca = |start: &NodeId| -> (f64, usize) {
        let mut weighted = 0.0;
        let mut topo = 0;
        let mut curr = *start;

        while curr != lca {
            match tree.get_node(curr) {
                Some(node) => {
                    weighted += node.length.unwrap_or(0.0);
                    topo += 1;
                    match node.parent {
                        Some(p) => curr = p,
                        None => break,
                    }
                }
                None => break,
            }
        }
        (weighted, topo)
    };

    let (w1, t1) = dist_to_lca(a);
    let (w2, t2) = dist_to_lca(b);

    Ok((w1 + w2, t1 + t2))
}

/// Get node ID by name. Returns first match.
pub fn get_node_by_name(tree: &Tree, name: &str) -> Option<NodeId> {
    tree.nodes
        .iter()
        .find(|n| !n.deleted && n.name.as_deref() == Some(name))
        .map(|n| n.id)
}
