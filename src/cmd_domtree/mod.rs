//! Subcommand modules for the `domtree` binary.

pub mod multiples;
pub mod pair;
pub mod rename;

use domtree::libs::names::trim_name;
use domtree::libs::phylo::Tree;

/// Strip domain positions from every leaf name.
pub fn trim_leaf_names(tree: &mut Tree) {
    for id in tree.get_leaves() {
        if let Some(node) = tree.get_node_mut(id) {
            if let Some(name) = node.name.as_deref() {
                let trimmed = trim_name(name);
                node.set_name(trimmed);
            }
        }
    }
}
