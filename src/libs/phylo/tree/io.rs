use super::Tree;
use crate::libs::phylo::node::{Node, NodeId};
use std::io::Read;

/// Read every Newick tree from a file ("stdin" for standard input).
pub fn from_file(infile: &str) -> anyhow::Result<Vec<Tree>> {
    let mut reader = intspan::reader(infile);
    let mut newick = String::new();
    reader
        .read_to_string(&mut newick)
        .map_err(|e| anyhow::anyhow!("Read error: {}", e))?;
    Ok(Tree::from_newick_multi(newick.as_str())?)
}

/// Serialize tree to a single-line Newick string.
///
/// Internal nodes without a name print their support value as the label,
/// properties are written as an NHX comment.
pub fn to_newick(tree: &Tree) -> String {
    match tree.get_root() {
        Some(root) => format!("{};", to_newick_recursive(tree, root)),
        None => ";".to_string(),
    }
}

fn to_newick_recursive(tree: &Tree, node_id: NodeId) -> String {
    let node = match tree.get_node(node_id) {
        Some(n) => n,
        None => return String::new(),
    };

    let mut s = String::new();
    if !node.children.is_empty() {
        let children: Vec<String> = node
            .children
            .iter()
            .map(|&child| to_newick_recursive(tree, child))
            .collect();
        s.push('(');
        s.push_str(&children.join(","));
        s.push(')');
    }
    s.push_str(&node_info(node));
    s
}

fn node_info(node: &Node) -> String {
    let mut info = String::new();

    match (&node.name, node.support) {
        (Some(name), _) => info.push_str(&quote_label(name)),
        (None, Some(support)) if !node.is_leaf() => info.push_str(&format!("{}", support)),
        _ => {}
    }

    if let Some(len) = node.length {
        info.push_str(&format!(":{}", len));
    }

    if let Some(props) = node.properties.as_ref().filter(|p| !p.is_empty()) {
        info.push_str("[&&NHX");
        for (k, v) in props {
            if v.is_empty() {
                info.push_str(&format!(":{}", k));
            } else {
                info.push_str(&format!(":{}={}", k, v));
            }
        }
        info.push(']');
    }

    info
}

/// Serialize the tree to a Graphviz DOT string.
///
/// `color` properties fill the node, `shape` properties pick the node shape.
pub fn to_dot(tree: &Tree) -> String {
    let mut s = String::from("digraph Tree {\n");
    s.push_str("    node [shape=box];\n");

    if let Some(root) = tree.get_root() {
        for node_id in tree.preorder(&root) {
            let node = match tree.get_node(node_id) {
                Some(n) => n,
                None => continue,
            };

            let label = match node.name.as_deref() {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => node_id.to_string(),
            };
            let mut attrs = vec![format!("label=\"{}\"", label)];
            if let Some(shape) = node.get_property("shape") {
                attrs.push(format!("shape={}", shape));
            }
            if let Some(color) = node.get_property("color") {
                attrs.push("style=filled".to_string());
                attrs.push(format!("fillcolor=\"{}\"", color));
            }
            s.push_str(&format!("    {} [{}];\n", node_id, attrs.join(", ")));

            for &child_id in &node.children {
                let edge_attr = tree
                    .get_node(child_id)
                    .and_then(|c| c.length)
                    .map(|len| format!(" [label=\"{}\"]", len))
                    .unwrap_or_default();
                s.push_str(&format!("    {} -> {}{};\n", node_id, child_id, edge_attr));
            }
        }
    }

    s.push_str("}\n");
    s
}

fn quote_label(label: &str) -> String {
    let needs_quote = label.chars().any(|c| "(),:;[] \t\n".contains(c));
    if needs_quote {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_newick() {
        let mut tree = Tree::new();
        let n0 = tree.add_node();
        let n1 = tree.add_node();
        let n2 = tree.add_node();

        tree.set_root(n0);
        tree.add_child(n0, n1).unwrap();
        tree.add_child(n0, n2).unwrap();

        tree.get_node_mut(n1).unwrap().set_name("X_1");
        tree.get_node_mut(n1).unwrap().length = Some(0.1);
        tree.get_node_mut(n2).unwrap().set_name("X_2");
        tree.get_node_mut(n2).unwrap().length = Some(0.2);

        assert_eq!(to_newick(&tree), "(X_1:0.1,X_2:0.2);");
    }

    #[test]
    fn test_to_newick_support_and_properties() {
        let mut tree = Tree::from_newick("((A,B):0.8[65],C);").unwrap();
        tree.get_node_mut(1)
            .unwrap()
            .add_property("color", "#1f77b4");
        tree.get_node_mut(1).unwrap().add_property("group", "0");

        assert_eq!(
            to_newick(&tree),
            "((A,B)65:0.8[&&NHX:color=#1f77b4:group=0],C);"
        );
    }

    #[test]
    fn test_to_newick_quotes() {
        let tree = Tree::from_newick("('Homo sapiens','func(x)');").unwrap();
        assert_eq!(to_newick(&tree), "('Homo sapiens','func(x)');");
    }

    #[test]
    fn test_to_dot() {
        let mut tree = Tree::from_newick("(A:0.1,B);").unwrap();
        tree.get_node_mut(1).unwrap().add_property("shape", "circle");
        tree.get_node_mut(2).unwrap().add_property("color", "#ff7f0e");

        let dot = to_dot(&tree);
        assert!(dot.contains("digraph Tree {"));
        assert!(dot.contains("0 [label=\"0\"];"));
        assert!(dot.contains("1 [label=\"A\", shape=circle];"));
        assert!(dot.contains("2 [label=\"B\", style=filled, fillcolor=\"#ff7f0e\"];"));
        assert!(dot.contains("0 -> 1 [label=\"0.1\"];"));
        assert!(dot.contains("0 -> 2;"));
    }
}
