//! Advisory validation of the scenario graph
//!
//! Validation never changes runtime behavior. Issues describe content
//! problems for authors and tooling; [`resolve`](crate::resolve) keeps
//! working on graphs that fail every check here.

use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Display, Formatter};

use scenario_config::{ScenarioConfig, ScenarioKey};
use scenario_grid::CellRef;
use serde::Serialize;

use crate::graph::ScenarioGraph;

/// Structural problem found by [`validate_graph`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphIssue {
    /// Transition target has no config
    DanglingEdge {
        /// Source scenario
        from: ScenarioKey,
        /// Position of the transition in the source
        index: usize,
        /// Missing target
        to: ScenarioKey,
    },
    /// Scenario cannot be reached from the root
    Unreachable {
        /// Orphaned scenario
        key: ScenarioKey,
        /// Root used for the walk
        root: ScenarioKey,
    },
    /// Later transition on a tile already claimed; it never fires
    DuplicateTrigger {
        /// Scenario holding both transitions
        key: ScenarioKey,
        /// Shared trigger tile
        tile: CellRef,
        /// Position of the winning transition
        first_index: usize,
        /// Position of the shadowed transition
        index: usize,
    },
    /// Root key has no config; reachability was skipped
    MissingRoot {
        /// Requested root
        root: ScenarioKey,
    },
    /// Same key supplied more than once; the first config was used
    DuplicateScenario {
        /// Repeated key
        key: ScenarioKey,
    },
    /// Grid names a trigger tile but the scenario has no transitions
    GeometryTriggerWithoutEdge {
        /// Scenario in question
        key: ScenarioKey,
        /// Geometry trigger tile
        tile: CellRef,
    },
}

impl GraphIssue {
    /// Scenario the issue is attached to
    #[must_use]
    pub fn key(&self) -> ScenarioKey {
        match self {
            Self::DanglingEdge { from, .. } => *from,
            Self::Unreachable { key, .. }
            | Self::DuplicateTrigger { key, .. }
            | Self::DuplicateScenario { key }
            | Self::GeometryTriggerWithoutEdge { key, .. } => *key,
            Self::MissingRoot { root } => *root,
        }
    }

    /// Whether the issue is informational rather than a content defect
    #[inline]
    #[must_use]
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::GeometryTriggerWithoutEdge { .. })
    }

    /// Root problems first, then by scenario, kind and transition position
    fn sort_key(&self) -> (bool, ScenarioKey, u8, usize) {
        let (kind, index) = match self {
            Self::MissingRoot { .. } => (0, 0),
            Self::DuplicateScenario { .. } => (1, 0),
            Self::Unreachable { .. } => (2, 0),
            Self::GeometryTriggerWithoutEdge { .. } => (3, 0),
            Self::DanglingEdge { index, .. } | Self::DuplicateTrigger { index, .. } => (4, *index),
        };
        (kind != 0, self.key(), kind, index)
    }
}

impl Display for GraphIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DanglingEdge { from, index, to } => {
                write!(f, "{from}: transition #{index} targets missing scenario {to}")
            }
            Self::Unreachable { key, root } => write!(f, "{key}: unreachable from {root}"),
            Self::DuplicateTrigger {
                key,
                tile,
                first_index,
                index,
            } => write!(
                f,
                "{key}: transition #{index} on {tile} is shadowed by #{first_index}"
            ),
            Self::MissingRoot { root } => write!(f, "root scenario {root} does not exist"),
            Self::DuplicateScenario { key } => write!(f, "{key}: defined more than once"),
            Self::GeometryTriggerWithoutEdge { key, tile } => {
                write!(f, "{key}: trigger tile {tile} leads nowhere; scenario is terminal")
            }
        }
    }
}

/// Validate a set of canonical configs as one graph
///
/// `root` defaults to the smallest key. A missing root is reported first;
/// the remaining issues are ordered by scenario key, then by kind, then by
/// transition position, so identical input yields identical output.
#[must_use]
pub fn validate_graph(configs: &[ScenarioConfig], root: Option<ScenarioKey>) -> Vec<GraphIssue> {
    let graph = ScenarioGraph::build(configs);
    let duplicated: BTreeSet<ScenarioKey> = graph.duplicate_keys().iter().copied().collect();
    let mut issues: Vec<GraphIssue> = duplicated
        .into_iter()
        .map(|key| GraphIssue::DuplicateScenario { key })
        .collect();

    match root.or_else(|| graph.default_root()) {
        Some(root) if graph.contains(root) => {
            let reachable = graph.reachable_from(root);
            issues.extend(
                graph
                    .keys()
                    .filter(|k| !reachable.contains(k))
                    .map(|key| GraphIssue::Unreachable { key, root }),
            );
        }
        Some(root) => issues.push(GraphIssue::MissingRoot { root }),
        None => {}
    }

    for key in graph.keys() {
        let transitions = graph.transitions(key);
        let mut first_by_tile: HashMap<CellRef, usize> = HashMap::new();
        for (index, t) in transitions.iter().enumerate() {
            if !graph.contains(t.to) {
                issues.push(GraphIssue::DanglingEdge {
                    from: key,
                    index,
                    to: t.to,
                });
            }
            match first_by_tile.get(&t.trigger_tile) {
                Some(&first_index) => issues.push(GraphIssue::DuplicateTrigger {
                    key,
                    tile: t.trigger_tile,
                    first_index,
                    index,
                }),
                None => {
                    first_by_tile.insert(t.trigger_tile, index);
                }
            }
        }
    }

    // Repeated keys: only the first config counts
    let mut seen = BTreeSet::new();
    for config in configs {
        if !seen.insert(config.key) {
            continue;
        }
        if let Some(tile) = config.grid.trigger_tile.filter(|_| config.is_terminal()) {
            issues.push(GraphIssue::GeometryTriggerWithoutEdge {
                key: config.key,
                tile,
            });
        }
    }

    // Stable: ties keep discovery order
    issues.sort_by_key(GraphIssue::sort_key);

    tracing::debug!(
        scenarios = graph.len(),
        edges = graph.edge_count(),
        issues = issues.len(),
        "validated scenario graph"
    );

    issues
}
