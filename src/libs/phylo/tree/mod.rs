pub mod io;
pub mod midpoint;
pub mod ops;
pub mod query;
pub mod stat;
pub mod support;
pub mod traversal;

use super::error::TreeError;
use super::node::{Node, NodeId};

#[derive(Debug, Default, Clone)]
pub struct Tree {
    /// Arena storage for all nodes
    pub(super) nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    pub(super) root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new detached node to the tree. Returns the new node's ID.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    /// Number of live (not deleted) nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Size of the arena, deleted slots included.
    /// Side tables indexed by NodeId use this as their length.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).filter(|n| !n.deleted)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).filter(|n| !n.deleted)
    }

    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    /// A node counts as a leaf when it has no children.
    /// Unknown IDs are not leaves.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get_node(id).map(|n| n.is_leaf()).unwrap_or(false)
    }

    // --- Delegation to ops ---

    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
        ops::add_child(self, parent_id, child_id)
    }

    pub fn collapse_node(&mut self, id: NodeId) -> Result<(), TreeError> {
        ops::collapse_node(self, id)
    }

    pub fn insert_parent_at(&mut self, child_id: NodeId, offset: f64) -> Result<NodeId, TreeError> {
        ops::insert_parent_at(self, child_id, offset)
    }

    pub fn reroot_at(&mut self, new_root_id: NodeId) -> Result<(), TreeError> {
        ops::reroot_at(self, new_root_id)
    }

    pub fn remove_degree_two_nodes(&mut self) {
        ops::remove_degree_two_nodes(self)
    }

    // --- Delegation to traversal ---

    pub fn preorder(&self, start_node: &NodeId) -> Vec<NodeId> {
        traversal::preorder(self, *start_node)
    }

    pub fn postorder(&self, start_node: &NodeId) -> Vec<NodeId> {
        traversal::postorder(self, *start_node)
    }

    pub fn levelorder(&self, start_node: &NodeId) -> Vec<NodeId> {
        traversal::levelorder(self, *start_node)
    }

    // --- Delegation to query ---

    pub fn get_path_from_root(&self, id: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        query::get_path_from_root(self, id)
    }

    pub fn get_ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        query::get_ancestors(self, id)
    }

    pub fn is_ancestor(&self, ancestor: &NodeId, id: &NodeId) -> bool {
        query::is_ancestor(self, ancestor, id)
    }

    pub fn get_common_ancestor(&self, a: &NodeId, b: &NodeId) -> Result<NodeId, TreeError> {
        query::get_common_ancestor(self, a, b)
    }

    pub fn get_distance(&self, a: &NodeId, b: &NodeId) -> Result<(f64, usize), TreeError> {
        query::get_distance(self, a, b)
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        query::get_node_by_name(self, name)
    }

    // --- Delegation to stat ---

    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => stat::get_leaves(self, root),
            None => Vec::new(),
        }
    }

    pub fn get_leaf_names(&self, id: NodeId) -> Vec<String> {
        stat::get_leaf_names(self, id)
    }

    // --- Delegation to support / midpoint ---

    pub fn labels_to_support(&mut self) {
        support::labels_to_support(self)
    }

    pub fn collapse_low_support(&mut self, cutoff: f64) -> usize {
        support::collapse_low_support(self, cutoff)
    }

    pub fn midpoint_root(&mut self) -> Result<(), TreeError> {
        midpoint::midpoint_root(self)
    }

    // --- Delegation to io ---

    pub fn from_file(infile: &str) -> anyhow::Result<Vec<Tree>> {
        io::from_file(infile)
    }

    pub fn to_newick(&self) -> String {
        io::to_newick(self)
    }

    pub fn to_dot(&self) -> String {
        io::to_dot(self)
    }
}
