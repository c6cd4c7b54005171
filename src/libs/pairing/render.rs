use super::merge::Group;
use super::registry::MultipleRegistry;
use crate::libs::phylo::Tree;

/// tab20
pub const PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Color of group `index`, cycling through the palette.
pub fn group_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Mark the leaves that are fragments of a true multiple as circles.
pub fn style_multiples(tree: &mut Tree, registry: &MultipleRegistry) {
    let leaves: Vec<_> = tree
        .get_leaves()
        .into_iter()
        .filter(|&id| registry.is_multiple(id))
        .collect();
    for id in leaves {
        if let Some(node) = tree.get_node_mut(id) {
            node.add_property("shape", "circle");
            node.add_property("size", "10");
        }
    }
}

/// Tag every group member with its group index and color.
/// A node in several overlapping groups keeps the last one.
pub fn style_groups(tree: &mut Tree, groups: &[Group]) {
    for (index, group) in groups.iter().enumerate() {
        for &id in group {
            if let Some(node) = tree.get_node_mut(id) {
                node.add_property("group", index.to_string());
                node.add_property("color", group_color(index));
                node.add_property("size", "15");
            }
        }
    }
}

/// One line per group: tree index, group index, color, member count, members.
/// A member is written as its sorted leaf names joined with `,`;
/// members are separated by `|`.
pub fn groups_to_tsv(tree_index: usize, tree: &Tree, groups: &[Group]) -> String {
    let mut out = String::new();
    for (index, group) in groups.iter().enumerate() {
        let members: Vec<String> = group
            .iter()
            .map(|&id| tree.get_leaf_names(id).join(","))
            .collect();
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\t{}\n",
            tree_index,
            index,
            group_color(index),
            group.len(),
            members.join("|")
        ));
    }
    out
}
