use super::Tree;
use crate::libs::phylo::node::NodeId;
use std::collections::VecDeque;

/// Node IDs in preorder (Root -> Children)
pub fn preorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = vec![start_node];

    while let Some(id) = stack.pop() {
        if let Some(node) = tree.get_node(id) {
            result.push(id);
            // Reversed so that the first child is visited first
            stack.extend(node.children.iter().rev());
        }
    }

    result
}

/// Node IDs in postorder (Children -> Root).
/// Every node appears after all of its descendants.
pub fn postorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    // (node, children already pushed)
    let mut stack = vec![(start_node, false)];

    while let Some((id, expanded)) = stack.pop() {
        let node = match tree.get_node(id) {
            Some(n) => n,
            None => continue,
        };
        if expanded || node.children.is_empty() {
            result.push(id);
        } else {
            stack.push((id, true));
            stack.extend(node.children.iter().rev().map(|&c| (c, false)));
        }
    }

    result
}

/// Node IDs in levelorder (BFS)
pub fn levelorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(start_node);

    while let Some(id) = queue.pop_front() {
        if let Some(node) = tree.get_node(id) {
            result.push(id);
            queue.extend(node.children.iter());
        }
    }

    result
}
