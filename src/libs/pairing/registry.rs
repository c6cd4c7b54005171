use crate::libs::phylo::{NodeId, Tree};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    // `<prefix>_<positive integer>`, the prefix being everything before the last `_`
    static ref MULTIPLE_RE: Regex = Regex::new(r"^(.+)_0*[1-9]\d*$").unwrap();
}

/// Index of an entity prefix inside a [`MultipleRegistry`].
pub type PrefixId = usize;

/// Entity prefix of a fragment name, if it follows the `<prefix>_<n>` convention.
///
/// ```
/// use domtree::libs::pairing::registry::fragment_prefix;
///
/// assert_eq!(fragment_prefix("Q9XYZ1_2"), Some("Q9XYZ1"));
/// assert_eq!(fragment_prefix("Strain_1716|CAMPEP_0113383910_12"), Some("Strain_1716|CAMPEP_0113383910"));
/// assert_eq!(fragment_prefix("Q9XYZ1"), None);
/// assert_eq!(fragment_prefix("Q9XYZ1_0"), None);
/// ```
pub fn fragment_prefix(name: &str) -> Option<&str> {
    MULTIPLE_RE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Leaves that are fragments of multi-domain sequences, grouped by entity prefix.
///
/// Only prefixes carried by at least two leaves are real multiples. A leaf
/// whose prefix is alone is demoted: it leaves the registry and is meant to be
/// renamed to the bare prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipleRegistry {
    /// prefix => fragment leaves, in first-seen order
    prefixes: IndexMap<String, Vec<NodeId>>,
    prefix_of: BTreeMap<NodeId, PrefixId>,
    /// (leaf, bare prefix) for single-fragment artifacts
    demoted: Vec<(NodeId, String)>,
}

impl MultipleRegistry {
    /// Build the registry from (leaf, trimmed name) pairs.
    /// Pure: the same input always gives the same registry.
    pub fn from_leaves<'a, I>(leaves: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, &'a str)>,
    {
        let mut candidates: IndexMap<String, Vec<NodeId>> = IndexMap::new();
        for (id, name) in leaves {
            if let Some(prefix) = fragment_prefix(name) {
                candidates.entry(prefix.to_string()).or_default().push(id);
            }
        }

        let mut registry = MultipleRegistry::default();
        for (prefix, ids) in candidates {
            if ids.len() < 2 {
                registry
                    .demoted
                    .extend(ids.into_iter().map(|id| (id, prefix.clone())));
                continue;
            }
            let prefix_id = registry.prefixes.len();
            for &id in &ids {
                registry.prefix_of.insert(id, prefix_id);
            }
            registry.prefixes.insert(prefix, ids);
        }

        registry
    }

    /// Registry of the named leaves of `tree`, read left to right.
    pub fn from_tree(tree: &Tree) -> Self {
        let named: Vec<(NodeId, &str)> = tree
            .get_leaves()
            .into_iter()
            .filter_map(|id| {
                tree.get_node(id)
                    .and_then(|n| n.name.as_deref())
                    .map(|name| (id, name))
            })
            .collect();
        Self::from_leaves(named)
    }

    /// Rename every demoted leaf to its bare prefix.
    pub fn apply_demotions(&self, tree: &mut Tree) {
        for (id, prefix) in &self.demoted {
            if let Some(node) = tree.get_node_mut(*id) {
                node.set_name(prefix.as_str());
            }
        }
    }

    /// Number of true multiples
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn prefix_of(&self, leaf: NodeId) -> Option<PrefixId> {
        self.prefix_of.get(&leaf).copied()
    }

    pub fn prefix_name(&self, prefix: PrefixId) -> Option<&str> {
        self.prefixes.get_index(prefix).map(|(name, _)| name.as_str())
    }

    pub fn leaves_of(&self, prefix: &str) -> Option<&[NodeId]> {
        self.prefixes.get(prefix).map(|ids| ids.as_slice())
    }

    /// (prefix, fragment leaves), in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.prefixes
            .iter()
            .map(|(prefix, ids)| (prefix.as_str(), ids.as_slice()))
    }

    /// All leaves that are fragments of a true multiple
    pub fn multiples(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.prefix_of.keys().copied()
    }

    pub fn is_multiple(&self, leaf: NodeId) -> bool {
        self.prefix_of.contains_key(&leaf)
    }

    pub fn demoted(&self) -> &[(NodeId, String)] {
        &self.demoted
    }
}
