use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;

/// Add a child to a parent node.
/// Updates both parent's `children` list and child's `parent` field.
pub fn add_child(tree: &mut Tree, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
    if parent_id == child_id {
        return Err(TreeError::LogicError(
            "Cannot add node as child of itself".to_string(),
        ));
    }
    if tree.get_node(parent_id).is_none() {
        return Err(TreeError::NodeNotFound(parent_id));
    }
    if tree.get_node(child_id).is_none() {
        return Err(TreeError::NodeNotFound(child_id));
    }
    if let Some(old_parent) = tree.nodes[child_id].parent {
        return Err(TreeError::LogicError(format!(
            "Node {} already has parent {}",
            child_id, old_parent
        )));
    }

    tree.nodes[child_id].parent = Some(parent_id);
    tree.nodes[parent_id].children.push(child_id);

    Ok(())
}

/// Collapse a node, connecting its children to its parent in its place.
/// Edge lengths are summed (parent->node + node->child).
pub fn collapse_node(tree: &mut Tree, id: NodeId) -> Result<(), TreeError> {
    let node = tree.get_node(id).ok_or(TreeError::NodeNotFound(id))?;
    if tree.root == Some(id) {
        return Err(TreeError::LogicError("Cannot collapse root node".to_string()));
    }
    let parent_id = node
        .parent
        .ok_or_else(|| TreeError::LogicError(format!("Node {} is detached", id)))?;
    let parent_edge = node.length;
    let children = node.children.clone();

    for &child_id in &children {
        if let Some(child) = tree.get_node_mut(child_id) {
            child.parent = Some(parent_id);
            child.length = match (parent_edge, child.length) {
                (Some(p), Some(c)) => Some(p + c),
                (p, c) => p.or(c),
            };
        }
    }

    if let Some(parent) = tree.get_node_mut(parent_id) {
        if let Some(pos) = parent.children.iter().position(|&x| x == id) {
            parent.children.splice(pos..pos + 1, children);
        }
    }

    if let Some(node) = tree.get_node_mut(id) {
        node.deleted = true;
        node.children.clear();
        node.parent = None;
    }

    Ok(())
}

/// Insert a new node on the edge above `id`, `offset` away from `id`.
/// The new node takes the place of `id` among its parent's children.
/// Returns the new node's ID.
pub fn insert_parent_at(tree: &mut Tree, id: NodeId, offset: f64) -> Result<NodeId, TreeError> {
    let node = tree.get_node(id).ok_or(TreeError::NodeNotFound(id))?;
    let parent = node
        .parent
        .ok_or_else(|| TreeError::LogicError(format!("Node {} has no parent", id)))?;
    let length = node.length;
    let support = node.support;

    let new_node = tree.add_node();

    // Swap the child slot in place so that the sibling order is preserved
    if let Some(p_node) = tree.get_node_mut(parent) {
        if let Some(pos) = p_node.children.iter().position(|&c| c == id) {
            p_node.children[pos] = new_node;
        }
    }
    if let Some(n) = tree.get_node_mut(new_node) {
        n.parent = Some(parent);
        n.length = length.map(|l| (l - offset).max(0.0));
        n.support = support;
    }
    if let Some(n) = tree.get_node_mut(id) {
        n.parent = None;
    }

    add_child(tree, new_node, id)?;
    if let Some(n) = tree.get_node_mut(id) {
        n.length = length.map(|l| offset.clamp(0.0, l));
    }

    Ok(new_node)
}

/// Reroot the tree at the specified node.
/// Edges along the path from the old root are reversed; branch lengths and
/// support values, which both describe edges, travel with them.
pub fn reroot_at(tree: &mut Tree, new_root_id: NodeId) -> Result<(), TreeError> {
    if tree.get_node(new_root_id).is_none() {
        return Err(TreeError::NodeNotFound(new_root_id));
    }
    let old_root_id = tree.root.ok_or(TreeError::NoRoot)?;
    if old_root_id == new_root_id {
        return Ok(());
    }

    let path = tree.get_path_from_root(&new_root_id)?;
    let edges: Vec<(Option<f64>, Option<f64>)> = path
        .iter()
        .map(|&id| (tree.nodes[id].length, tree.nodes[id].support))
        .collect();

    for i in (1..path.len()).rev() {
        let child_id = path[i];
        let parent_id = path[i - 1];
        let (length, support) = edges[i];

        tree.nodes[parent_id].children.retain(|&x| x != child_id);
        tree.nodes[child_id].children.push(parent_id);

        let parent = &mut tree.nodes[parent_id];
        parent.parent = Some(child_id);
        parent.length = length;
        parent.support = support;
    }

    let new_root = &mut tree.nodes[new_root_id];
    new_root.parent = None;
    new_root.length = None;
    new_root.support = None;

    tree.root = Some(new_root_id);

    Ok(())
}

/// Remove non-root nodes with exactly one child.
/// Rerooting leaves the old root in this state.
pub fn remove_degree_two_nodes(tree: &mut Tree) {
    let root = match tree.root {
        Some(r) => r,
        None => return,
    };

    let targets: Vec<NodeId> = tree
        .postorder(&root)
        .into_iter()
        .filter(|&id| id != root && tree.nodes[id].children.len() == 1)
        .collect();

    for id in targets {
        // Targets are live non-root nodes, collapsing cannot fail
        let collapsed = collapse_node(tree, id);
        debug_assert!(collapsed.is_ok(), "failed to collapse node {}", id);
    }
}
