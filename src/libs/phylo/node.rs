use std::collections::BTreeMap;

/// NodeId is an index into the Tree's node vector.
/// It stays valid for the lifetime of the tree: nodes are only soft-deleted.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    /// Unique identifier for the node (index in the arena)
    pub id: NodeId,

    /// Parent node ID (None for root)
    pub parent: Option<NodeId>,

    /// List of child node IDs, in Newick order
    pub children: Vec<NodeId>,

    // --- Payload ---
    /// Node name/label. Leaves carry sequence IDs, e.g. "Q9XYZ1_2"
    pub name: Option<String>,

    /// Branch length to parent
    pub length: Option<f64>,

    /// Support of the split below this node (bootstrap, posterior, ...)
    /// Like `length`, it describes the edge to the parent.
    pub support: Option<f64>,

    /// Structured properties written back as NHX tags ([&&NHX:color=#1f77b4])
    /// BTreeMap keeps the output order deterministic.
    pub properties: Option<BTreeMap<String, String>>,

    /// Soft deletion flag. Collapsed nodes keep their slot so that
    /// outstanding NodeIds never point at a different node.
    pub deleted: bool,
}

impl Node {
    /// Create a new empty node with a specific ID
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
            support: None,
            properties: None,
            deleted: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Add a property (key-value pair), replacing an existing value
    pub fn add_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
    }

    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties
            .as_ref()
            .and_then(|props| props.get(key))
            .map(|v| v.as_str())
    }

    /// A node is a leaf if it has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
