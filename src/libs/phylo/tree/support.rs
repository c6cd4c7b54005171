use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Move numeric internal labels into `support`.
///
/// `((A,B)65:0.8,C);` stores the bootstrap as the internal node's name.
/// Leaves and non-numeric labels are left alone; a support value already
/// read from a bracketed comment wins over the label.
pub fn labels_to_support(tree: &mut Tree) {
    for node in tree.nodes.iter_mut().filter(|n| !n.deleted) {
        if node.is_leaf() || node.support.is_some() {
            continue;
        }
        let value = node.name.as_deref().and_then(|s| s.trim().parse::<f64>().ok());
        if let Some(v) = value {
            node.support = Some(v);
            node.name = None;
        }
    }
}

/// Collapse every non-root internal node whose support is below `cutoff`.
/// Nodes without a support value are kept. Returns the number collapsed.
pub fn collapse_low_support(tree: &mut Tree, cutoff: f64) -> usize {
    let root = match tree.get_root() {
        Some(r) => r,
        None => return 0,
    };

    let weak: Vec<NodeId> = tree
        .postorder(&root)
        .into_iter()
        .filter(|&id| id != root)
        .filter(|&id| {
            tree.get_node(id)
                .map(|n| !n.is_leaf() && n.support.map(|s| s < cutoff).unwrap_or(false))
                .unwrap_or(false)
        })
        .collect();

    weak.into_iter()
        .filter(|&id| tree.collapse_node(id).is_ok())
        .count()
}
