use crate::libs::phylo::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PairingError {
    /// Jaccard index of two empty prefix sets (0/0)
    #[error("Cannot score two nodes without multiple descendants")]
    EmptyDescendants,
    #[error("Match threshold must lie in [0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("Node {0} is not part of the annotated tree")]
    UnknownNode(NodeId),
}
