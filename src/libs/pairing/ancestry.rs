use crate::libs::phylo::{NodeId, Tree};

/// Constant-time ancestor test from preorder enter/exit stamps.
///
/// `a` is an ancestor of `b` iff `enter[a] < enter[b]` and `exit[b] <= exit[a]`.
/// Stamps are taken once; the tree must not change afterwards.
#[derive(Debug, Clone, Default)]
pub struct Ancestry {
    enter: Vec<Option<usize>>,
    exit: Vec<usize>,
}

impl Ancestry {
    pub fn new(tree: &Tree) -> Self {
        let size = tree.capacity();
        let mut enter = vec![None; size];
        let mut exit = vec![0; size];

        let root = match tree.get_root() {
            Some(r) => r,
            None => return Self { enter, exit },
        };

        let mut clock = 0;
        // (node, children already pushed)
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            let node = match tree.get_node(id) {
                Some(n) => n,
                None => continue,
            };
            if expanded {
                exit[id] = clock;
                continue;
            }
            enter[id] = Some(clock);
            clock += 1;
            stack.push((id, true));
            stack.extend(node.children.iter().rev().map(|&c| (c, false)));
        }

        Self { enter, exit }
    }

    /// True if `ancestor` lies strictly above `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        match (self.stamp(ancestor), self.stamp(id)) {
            (Some((ea, xa)), Some((eb, xb))) => ea < eb && xb <= xa,
            _ => false,
        }
    }

    /// True if one node is an ancestor of the other
    pub fn related(&self, a: NodeId, b: NodeId) -> bool {
        self.is_ancestor(a, b) || self.is_ancestor(b, a)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.stamp(id).is_some()
    }

    fn stamp(&self, id: NodeId) -> Option<(usize, usize)> {
        self.enter
            .get(id)
            .copied()
            .flatten()
            .map(|enter| (enter, self.exit[id]))
    }
}
