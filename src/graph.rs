use crate::chain::{generate_unchecked, Chain, ChainStatus};
use crate::error::{LychrelError, Result};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub struct GraphConfig {
    pub start: BigUint,
    pub end: BigUint,
    pub bound: u32,
    pub parallel: bool,
}

/// The merged reverse-and-add graph of every chain in a seed range.
///
/// An accumulator with an associative, commutative combine: edge-set
/// union, level minimum, flagged-seed union. Chains can be folded in
/// per seed and partial graphs merged in any order with identical
/// results, which is what makes the parallel build safe.
///
/// `level` holds every node the graph knows about (the minimal chain
/// index at which the value was first seen); `adjacency` only holds
/// nodes with at least one outgoing edge, so a node absent from it is
/// some chain's terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseAddGraph {
    pub adjacency: BTreeMap<BigUint, BTreeSet<BigUint>>,
    pub level: BTreeMap<BigUint, u32>,
    pub flagged_seeds: BTreeSet<BigUint>,
}

impl ReverseAddGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_edge(&mut self, from: &BigUint, to: &BigUint) {
        self.adjacency
            .entry(from.clone())
            .or_default()
            .insert(to.clone());
    }

    fn lower_level(&mut self, node: &BigUint, depth: u32) {
        self.level
            .entry(node.clone())
            .and_modify(|level| *level = (*level).min(depth))
            .or_insert(depth);
    }

    /// Fold one chain into the graph: an edge per consecutive pair, a
    /// level min-update per node, and the seed flagged when the chain
    /// exhausted its bound.
    pub fn record_chain(&mut self, chain: &Chain) {
        if chain.status == ChainStatus::Exhausted {
            self.flagged_seeds.insert(chain.seed.clone());
        }

        for (depth, node) in chain.values.iter().enumerate() {
            self.lower_level(node, depth as u32);
            if let Some(next) = chain.values.get(depth + 1) {
                self.add_edge(node, next);
            }
        }
    }

    /// Combine two partial graphs. Associative and commutative, so any
    /// grouping of per-seed partial results reduces to the same graph.
    pub fn merge(mut self, other: Self) -> Self {
        for (node, targets) in other.adjacency {
            self.adjacency.entry(node).or_default().extend(targets);
        }
        for (node, depth) in other.level {
            self.level
                .entry(node)
                .and_modify(|level| *level = (*level).min(depth))
                .or_insert(depth);
        }
        self.flagged_seeds.extend(other.flagged_seeds);
        self
    }

    pub fn node_count(&self) -> usize {
        self.level.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|targets| targets.len()).sum()
    }

    /// Nodes grouped by level, ascending within each level. This is the
    /// layering a renderer positions rows from.
    pub fn nodes_by_level(&self) -> BTreeMap<u32, Vec<BigUint>> {
        let mut layers: BTreeMap<u32, Vec<BigUint>> = BTreeMap::new();
        for (node, depth) in &self.level {
            layers.entry(*depth).or_default().push(node.clone());
        }
        layers
    }

    /// Flatten to the string-valued form a renderer or JSON consumer
    /// reads. Values become decimal strings because BigUint serializes
    /// as a digit array and JSON map keys must be strings anyway.
    pub fn to_export(&self) -> GraphExport {
        let nodes = self
            .level
            .iter()
            .map(|(node, depth)| GraphNode {
                value: node.to_string(),
                level: *depth,
                flagged: self.flagged_seeds.contains(node),
            })
            .collect();

        let edges = self
            .adjacency
            .iter()
            .flat_map(|(from, targets)| {
                targets
                    .iter()
                    .map(move |to| (from.to_string(), to.to_string()))
            })
            .collect();

        GraphExport { nodes, edges }
    }
}

/// One node of the exported graph; `flagged` marks Lychrel-candidate
/// seeds so a renderer can color them distinctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub value: String,
    pub level: u32,
    pub flagged: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<(String, String)>,
}

/// Build the merged reverse-and-add graph for every seed in
/// `[start, end]` inclusive.
///
/// With `parallel` set, per-seed partial graphs are folded and reduced
/// via Rayon using [`ReverseAddGraph::merge`]; the result is identical
/// to the sequential build.
///
/// # Examples
///
/// ```
/// use lychrel_graph::{build_graph, GraphConfig};
/// use num_bigint::BigUint;
///
/// let config = GraphConfig {
///     start: BigUint::from(1u32),
///     end: BigUint::from(50u32),
///     bound: 50,
///     parallel: false,
/// };
///
/// let graph = build_graph(&config).unwrap();
/// assert_eq!(graph.level[&BigUint::from(1u32)], 0);
/// ```
pub fn build_graph(config: &GraphConfig) -> Result<ReverseAddGraph> {
    if config.start > config.end {
        return Err(LychrelError::InvalidRange {
            start: config.start.clone(),
            end: config.end.clone(),
        });
    }
    if config.bound == 0 {
        return Err(LychrelError::InvalidBound(config.bound));
    }

    if config.parallel {
        // Same u64 bridge as the series counter; oversized ranges fall
        // back to the sequential build.
        if let (Some(start), Some(end)) = (config.start.to_u64(), config.end.to_u64()) {
            return Ok(build_parallel(start, end, config.bound));
        }
    }

    Ok(build_sequential(config))
}

fn build_sequential(config: &GraphConfig) -> ReverseAddGraph {
    let mut graph = ReverseAddGraph::new();
    let mut current = config.start.clone();

    while current <= config.end {
        let chain = generate_unchecked(&current, config.bound);
        graph.record_chain(&chain);
        current += 1u32;
    }

    graph
}

fn build_parallel(start: u64, end: u64, bound: u32) -> ReverseAddGraph {
    (start..=end)
        .into_par_iter()
        .fold(ReverseAddGraph::new, |mut graph, n| {
            let chain = generate_unchecked(&BigUint::from(n), bound);
            graph.record_chain(&chain);
            graph
        })
        .reduce(ReverseAddGraph::new, |left, right| left.merge(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: u32, end: u32, bound: u32, parallel: bool) -> GraphConfig {
        GraphConfig {
            start: BigUint::from(start),
            end: BigUint::from(end),
            bound,
            parallel,
        }
    }

    fn big(n: u32) -> BigUint {
        BigUint::from(n)
    }

    #[test]
    fn test_two_seed_graph_exact_shape() {
        // Seed 1: [1, 2]; seed 2: [2, 4]. The value 2 occurs at index 1
        // in the first chain and index 0 in the second, so its level is
        // the minimum, 0.
        let graph = build_graph(&config(1, 2, 5, false)).unwrap();

        assert_eq!(graph.level[&big(1)], 0);
        assert_eq!(graph.level[&big(2)], 0);
        assert_eq!(graph.level[&big(4)], 1);
        assert_eq!(graph.node_count(), 3);

        assert_eq!(graph.adjacency[&big(1)], BTreeSet::from([big(2)]));
        assert_eq!(graph.adjacency[&big(2)], BTreeSet::from([big(4)]));
        assert!(!graph.adjacency.contains_key(&big(4)));
        assert_eq!(graph.edge_count(), 2);

        assert!(graph.flagged_seeds.is_empty());
    }

    #[test]
    fn test_every_seed_sits_at_level_zero() {
        let graph = build_graph(&config(1, 40, 30, false)).unwrap();
        for seed in 1u32..=40 {
            assert_eq!(graph.level[&big(seed)], 0, "seed {seed}");
        }
    }

    #[test]
    fn test_edges_never_skip_more_than_one_level() {
        let graph = build_graph(&config(1, 60, 30, false)).unwrap();
        for (from, targets) in &graph.adjacency {
            for to in targets {
                assert!(graph.level[to] <= graph.level[from] + 1);
            }
        }
    }

    #[test]
    fn test_exhausted_seed_is_flagged_and_terminal_has_no_edge() {
        let graph = build_graph(&config(196, 196, 5, false)).unwrap();
        assert!(graph.flagged_seeds.contains(&big(196)));

        let chain = crate::chain::generate_chain(&big(196), 5).unwrap();
        let terminal = chain.values.last().unwrap();
        assert!(!graph.adjacency.contains_key(terminal));
        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 5);
    }

    #[test]
    fn test_subrange_merge_equals_whole_range() {
        let whole = build_graph(&config(1, 30, 40, false)).unwrap();
        let left = build_graph(&config(1, 15, 40, false)).unwrap();
        let right = build_graph(&config(16, 30, 40, false)).unwrap();
        assert_eq!(left.merge(right), whole);
    }

    #[test]
    fn test_merge_is_commutative_with_empty_identity() {
        let left = build_graph(&config(1, 10, 20, false)).unwrap();
        let right = build_graph(&config(5, 20, 20, false)).unwrap();

        let ab = left.clone().merge(right.clone());
        let ba = right.merge(left.clone());
        assert_eq!(ab, ba);

        assert_eq!(left.clone().merge(ReverseAddGraph::new()), left);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let sequential = build_graph(&config(1, 100, 50, false)).unwrap();
        let parallel = build_graph(&config(1, 100, 50, true)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_export_is_ordered_and_marks_flags() {
        let graph = build_graph(&config(195, 197, 10, false)).unwrap();
        let export = graph.to_export();

        assert_eq!(export.nodes.len(), graph.node_count());
        assert_eq!(export.edges.len(), graph.edge_count());

        let flagged: Vec<&str> = export
            .nodes
            .iter()
            .filter(|node| node.flagged)
            .map(|node| node.value.as_str())
            .collect();
        assert_eq!(flagged, vec!["196"]);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert_eq!(
            build_graph(&config(10, 5, 100, false)).unwrap_err(),
            LychrelError::InvalidRange {
                start: big(10),
                end: big(5),
            }
        );
        assert_eq!(
            build_graph(&config(1, 10, 0, false)).unwrap_err(),
            LychrelError::InvalidBound(0)
        );
    }
}
