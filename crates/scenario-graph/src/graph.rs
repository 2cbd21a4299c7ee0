//! Explicit scenario graph
//!
//! Built on demand from canonical configs. Nodes are scenario keys; every
//! key named by a config or by a transition target becomes a node, so
//! dangling targets show up as nodes with no config behind them.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::graphmap::DiGraphMap;
use petgraph::visit::Bfs;
use petgraph::Direction;
use scenario_config::{ScenarioConfig, ScenarioKey, Transition};

/// Directed graph over scenario keys
#[derive(Debug, Clone)]
pub struct ScenarioGraph {
    inner: DiGraphMap<ScenarioKey, ()>,
    /// Keys backed by a config
    defined: BTreeSet<ScenarioKey>,
    /// Ordered outgoing edges per defined node
    edges: BTreeMap<ScenarioKey, Vec<Transition>>,
    /// Keys that appeared more than once among the configs
    duplicates: Vec<ScenarioKey>,
}

impl ScenarioGraph {
    /// Build from configs; the first config for a repeated key wins
    #[must_use]
    pub fn build<'a>(configs: impl IntoIterator<Item = &'a ScenarioConfig>) -> Self {
        let mut inner = DiGraphMap::new();
        let mut defined = BTreeSet::new();
        let mut edges = BTreeMap::new();
        let mut duplicates = Vec::new();

        for config in configs {
            if !defined.insert(config.key) {
                duplicates.push(config.key);
                continue;
            }
            inner.add_node(config.key);
            for t in &config.transitions {
                inner.add_edge(config.key, t.to, ());
            }
            edges.insert(config.key, config.transitions.clone());
        }

        Self {
            inner,
            defined,
            edges,
            duplicates,
        }
    }

    /// Check if a config exists for `key`
    #[inline]
    #[must_use]
    pub fn contains(&self, key: ScenarioKey) -> bool {
        self.defined.contains(&key)
    }

    /// Keys backed by a config, ascending
    pub fn keys(&self) -> impl Iterator<Item = ScenarioKey> + '_ {
        self.defined.iter().copied()
    }

    /// Number of configs in the graph
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.defined.len()
    }

    /// Whether the graph holds no configs
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }

    /// Outgoing transitions of `key` in record order
    #[must_use]
    pub fn transitions(&self, key: ScenarioKey) -> &[Transition] {
        self.edges.get(&key).map_or(&[], Vec::as_slice)
    }

    /// Distinct successor keys, ascending
    #[must_use]
    pub fn successors(&self, key: ScenarioKey) -> Vec<ScenarioKey> {
        if !self.inner.contains_node(key) {
            return Vec::new();
        }
        let set: BTreeSet<_> = self
            .inner
            .neighbors_directed(key, Direction::Outgoing)
            .collect();
        set.into_iter().collect()
    }

    /// Distinct predecessor keys, ascending
    #[must_use]
    pub fn predecessors(&self, key: ScenarioKey) -> Vec<ScenarioKey> {
        if !self.inner.contains_node(key) {
            return Vec::new();
        }
        let set: BTreeSet<_> = self
            .inner
            .neighbors_directed(key, Direction::Incoming)
            .collect();
        set.into_iter().collect()
    }

    /// Keys reachable from `root`, including `root` itself
    ///
    /// Dangling targets are included if some reachable edge names them.
    #[must_use]
    pub fn reachable_from(&self, root: ScenarioKey) -> BTreeSet<ScenarioKey> {
        let mut seen = BTreeSet::new();
        if !self.inner.contains_node(root) {
            return seen;
        }
        let mut bfs = Bfs::new(&self.inner, root);
        while let Some(key) = bfs.next(&self.inner) {
            seen.insert(key);
        }
        seen
    }

    /// Defined keys with no outgoing transitions, ascending
    #[must_use]
    pub fn terminal_keys(&self) -> Vec<ScenarioKey> {
        self.edges
            .iter()
            .filter(|(_, ts)| ts.is_empty())
            .map(|(k, _)| *k)
            .collect()
    }

    /// Transition targets with no config, ascending and distinct
    #[must_use]
    pub fn dangling_targets(&self) -> Vec<ScenarioKey> {
        self.inner
            .nodes()
            .filter(|k| !self.defined.contains(k))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Keys seen more than once while building, in input order
    #[inline]
    #[must_use]
    pub fn duplicate_keys(&self) -> &[ScenarioKey] {
        &self.duplicates
    }

    /// Smallest defined key, the default entry point
    #[must_use]
    pub fn default_root(&self) -> Option<ScenarioKey> {
        self.defined.first().copied()
    }

    /// Total distinct edges between keys
    #[inline]
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }
}
