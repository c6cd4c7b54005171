//! Pairing of multi-domain fragments on a phylogenetic tree.
//!
//! Registry -> descendant annotation -> Jaccard scores -> reciprocal matches
//! -> ancestral reduction -> groups. Every stage runs to completion before the
//! next one reads its output.

pub mod ancestry;
pub mod annotate;
pub mod error;
pub mod matcher;
pub mod merge;
pub mod reduce;
pub mod registry;
pub mod render;
pub mod score;

pub use ancestry::Ancestry;
pub use annotate::DescendantTable;
pub use error::PairingError;
pub use matcher::Match;
pub use merge::Group;
pub use registry::MultipleRegistry;
pub use score::ScoreMatrix;

use crate::libs::phylo::{NodeId, Tree};
use std::collections::BTreeSet;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergeStrategy {
    /// Extend the first group holding an endpoint; may leave overlaps
    #[default]
    Greedy,
    /// Connected components of the match graph
    Connected,
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(MergeStrategy::Greedy),
            "connected" => Ok(MergeStrategy::Connected),
            _ => Err(format!("Unknown merge strategy: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PairingConfig {
    /// Both directional scores must reach this value
    pub threshold: f64,
    /// Stop after the registry; only multiples get marked
    pub skip_pairing: bool,
    pub merge: MergeStrategy,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            skip_pairing: false,
            merge: MergeStrategy::Greedy,
        }
    }
}

impl PairingConfig {
    pub fn validate(&self) -> Result<(), PairingError> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(PairingError::InvalidThreshold(self.threshold));
        }
        Ok(())
    }
}

/// Everything [`pair_tree`] derived from one tree
#[derive(Debug, Clone, Default)]
pub struct PairingReport {
    pub registry: MultipleRegistry,
    pub candidates: Vec<NodeId>,
    pub raw_matches: Vec<Match>,
    pub clean_matches: Vec<Match>,
    pub groups: Vec<Group>,
    /// Index pairs of groups sharing a node
    pub overlaps: Vec<(usize, usize)>,
}

impl PairingReport {
    /// Distinct nodes taking part in the clean matches
    pub fn matched_nodes(&self) -> BTreeSet<NodeId> {
        self.clean_matches.iter().flat_map(|m| m.nodes()).collect()
    }
}

/// Run the whole pairing pipeline on `tree`.
///
/// Leaf names must already be trimmed. The only change made to the tree is
/// renaming demoted single fragments to their bare prefix.
pub fn pair_tree(tree: &mut Tree, config: &PairingConfig) -> Result<PairingReport, PairingError> {
    config.validate()?;

    let registry = MultipleRegistry::from_tree(tree);
    registry.apply_demotions(tree);
    tracing::debug!(
        "{} multiples, {} demoted",
        registry.len(),
        registry.demoted().len()
    );

    if config.skip_pairing {
        return Ok(PairingReport {
            registry,
            ..Default::default()
        });
    }

    let table = DescendantTable::annotate(tree, &registry);
    let candidates = table.candidates(tree);
    tracing::debug!("{} candidate nodes", candidates.len());

    let sets = candidates
        .iter()
        .map(|&id| Ok(score::prefix_set(table.descendants(id)?, registry.len())))
        .collect::<Result<Vec<_>, PairingError>>()?;
    let scores = ScoreMatrix::build(&sets)?;

    let ancestry = Ancestry::new(tree);
    let raw_matches = matcher::reciprocal_matches(&candidates, &scores, config.threshold, &ancestry);
    tracing::debug!("{} raw matches", raw_matches.len());

    let clean_matches = reduce::reduce(&raw_matches, &ancestry);

    let mut report = PairingReport {
        registry,
        candidates,
        raw_matches,
        clean_matches,
        ..Default::default()
    };
    tracing::info!(
        "found {} matches between {} nodes",
        report.clean_matches.len(),
        report.matched_nodes().len()
    );

    report.groups = match config.merge {
        MergeStrategy::Greedy => merge::merge_greedy(&report.clean_matches),
        MergeStrategy::Connected => merge::merge_connected(&report.clean_matches),
    };
    report.overlaps = merge::overlapping_groups(&report.groups);
    tracing::info!("merged into {} groups", report.groups.len());

    for &(i, j) in &report.overlaps {
        tracing::warn!("groups {} and {} share nodes and were not merged", i, j);
    }

    Ok(report)
}
