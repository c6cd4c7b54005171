use super::error::PairingError;
use super::registry::{MultipleRegistry, PrefixId};
use crate::libs::phylo::{NodeId, Tree};

/// Per-node list of the entity prefixes found among the node's leaves.
///
/// It is a side table indexed by NodeId. Duplicates are kept: a clade holding
/// two fragments of the same entity lists its prefix twice.
#[derive(Debug, Clone, Default)]
pub struct DescendantTable {
    /// `None` for IDs the annotation pass never reached
    multi: Vec<Option<Vec<PrefixId>>>,
}

impl DescendantTable {
    /// Fill the table with one postorder pass from the root.
    ///
    /// A leaf gets `[prefix]` when it is a registered fragment, `[]` otherwise.
    /// An internal node gets the concatenation of its children's lists, which
    /// are always complete by the time the node is reached.
    pub fn annotate(tree: &Tree, registry: &MultipleRegistry) -> Self {
        let mut multi: Vec<Option<Vec<PrefixId>>> = vec![None; tree.capacity()];

        let root = match tree.get_root() {
            Some(r) => r,
            None => return Self { multi },
        };

        for id in tree.postorder(&root) {
            let node = match tree.get_node(id) {
                Some(n) => n,
                None => continue,
            };
            multi[id] = Some(if node.is_leaf() {
                registry.prefix_of(id).into_iter().collect()
            } else {
                node.children
                    .iter()
                    .flat_map(|&child| multi[child].iter().flatten().copied())
                    .collect()
            });
        }

        Self { multi }
    }

    /// Prefixes below `id`. Nodes outside the tree have none.
    pub fn get(&self, id: NodeId) -> &[PrefixId] {
        self.multi.get(id).and_then(|v| v.as_deref()).unwrap_or(&[])
    }

    /// Prefixes below `id`, failing for nodes the annotation pass never reached.
    pub fn descendants(&self, id: NodeId) -> Result<&[PrefixId], PairingError> {
        self.multi
            .get(id)
            .and_then(|v| v.as_deref())
            .ok_or(PairingError::UnknownNode(id))
    }

    /// Internal nodes with at least one fragment below them, in postorder.
    /// Leaves are never candidates.
    pub fn candidates(&self, tree: &Tree) -> Vec<NodeId> {
        match tree.get_root() {
            Some(root) => tree
                .postorder(&root)
                .into_iter()
                .filter(|&id| !tree.is_leaf(id) && !self.get(id).is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}
