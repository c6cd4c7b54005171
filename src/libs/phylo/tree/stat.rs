use super::Tree;
use crate::libs::phylo::node::NodeId;
use std::collections::{HashMap, VecDeque};

/// IDs of all leaves under `id`, left to right.
pub fn get_leaves(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    super::traversal::preorder(tree, id)
        .into_iter()
        .filter(|&n| tree.is_leaf(n))
        .collect()
}

/// Names of the leaves under `id`, sorted. Unnamed leaves are skipped.
pub fn get_leaf_names(tree: &Tree, id: NodeId) -> Vec<String> {
    let mut names: Vec<String> = get_leaves(tree, id)
        .into_iter()
        .filter_map(|leaf| tree.get_node(leaf).and_then(|n| n.name.clone()))
        .collect();
    names.sort();
    names
}

/// The leaf farthest from `start` along branch lengths, and its distance.
/// Edges are walked in both directions. Ties keep the first leaf reached.
pub fn farthest_leaf(tree: &Tree, start: NodeId) -> (NodeId, f64) {
    let mut best = (start, 0.0);
    let mut visited: HashMap<NodeId, f64> = HashMap::new();
    let mut queue = VecDeque::new();

    visited.insert(start, 0.0);
    queue.push_back(start);

    while let Some(u) = queue.pop_front() {
        let node = match tree.get_node(u) {
            Some(n) => n,
            None => continue,
        };
        let d = visited[&u];
        if node.is_leaf() && d > best.1 {
            best = (u, d);
        }

        // Edge u->child carries the child's length, edge u->parent carries u's
        let mut neighbors: Vec<(NodeId, f64)> = node
            .children
            .iter()
            .map(|&c| (c, tree.get_node(c).and_then(|n| n.length).unwrap_or(0.0)))
            .collect();
        if let Some(p) = node.parent {
            neighbors.push((p, node.length.unwrap_or(0.0)));
        }

        for (v, weight) in neighbors {
            if !visited.contains_key(&v) {
                visited.insert(v, d + weight);
                queue.push_back(v);
            }
        }
    }

    best
}
