//! Engine facade
//!
//! Wires storage, normalization, resolution and session tracking. Every
//! read normalizes afresh; nothing canonical is cached.

use scenario_config::{normalize_with, scenario_key_of, NormalizationWarning, Normalized, ScenarioKey};
use scenario_graph::{resolve, validate_graph, GraphIssue, TransitionDecision};
use scenario_grid::CellRef;
use scenario_session::{
    InteractionLog, InteractionSessionTracker, MemorySessionStore, SessionId, SessionStore,
};
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::store::{MemoryScenarioStore, ScenarioStore};

/// Record that failed to normalize during validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFailure {
    /// Position in the store listing
    pub index: usize,
    /// Key, when it was readable
    pub key: Option<ScenarioKey>,
    /// Failure description
    pub error: String,
}

/// Normalization warnings of one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioWarnings {
    /// Scenario
    pub key: ScenarioKey,
    /// Warnings in discovery order
    pub warnings: Vec<NormalizationWarning>,
}

/// Outcome of validating every stored scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphReport {
    /// Root used for reachability
    pub root: Option<ScenarioKey>,
    /// Records that normalized
    pub scenarios: usize,
    /// Records that did not
    pub failures: Vec<RecordFailure>,
    /// Graph-level issues among the normalized records
    pub issues: Vec<GraphIssue>,
    /// Per-scenario warnings, only for scenarios that have any
    pub warnings: Vec<ScenarioWarnings>,
}

impl GraphReport {
    /// Whether any record failed to normalize
    #[inline]
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Whether there are graph issues other than advisory ones
    #[must_use]
    pub fn has_defects(&self) -> bool {
        self.issues.iter().any(|i| !i.is_advisory())
    }

    /// No failures, issues or warnings at all
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.issues.is_empty() && self.warnings.is_empty()
    }
}

/// Scenario graph resolution engine
#[derive(Debug)]
pub struct ScenarioEngine<S = MemoryScenarioStore, T = MemorySessionStore> {
    store: S,
    tracker: InteractionSessionTracker<T>,
    config: EngineConfig,
}

impl ScenarioEngine {
    /// Engine over in-memory storage
    #[must_use]
    pub fn in_memory(store: MemoryScenarioStore, config: EngineConfig) -> Self {
        Self::new(store, InteractionSessionTracker::new(), config)
    }
}

impl<S: ScenarioStore, T: SessionStore> ScenarioEngine<S, T> {
    /// Engine over the given collaborators
    #[must_use]
    pub fn new(store: S, tracker: InteractionSessionTracker<T>, config: EngineConfig) -> Self {
        Self {
            store,
            tracker,
            config,
        }
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Scenario storage
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Session tracker
    #[inline]
    #[must_use]
    pub fn tracker(&self) -> &InteractionSessionTracker<T> {
        &self.tracker
    }

    /// Fetch and normalize one scenario
    ///
    /// # Errors
    /// `ScenarioNotFound`, `InvalidScenario` or `Store`.
    pub fn scenario(&self, key: ScenarioKey) -> Result<Normalized, EngineError> {
        let raw = self
            .store
            .raw_scenario(key)?
            .ok_or(EngineError::ScenarioNotFound(key))?;
        Ok(normalize_with(&raw, &self.config.normalize_options())?)
    }

    /// Resolve an interaction on `tile` in scenario `key`
    ///
    /// With a session, the interaction is recorded after resolution. A
    /// recording failure is logged and does not change the decision.
    ///
    /// # Errors
    /// Failures of [`scenario`](Self::scenario) only.
    pub fn trigger(
        &self,
        key: ScenarioKey,
        tile: &CellRef,
        session: Option<&SessionId>,
    ) -> Result<TransitionDecision, EngineError> {
        let normalized = self.scenario(key)?;
        let decision = resolve(&normalized.config, tile);

        tracing::debug!(
            scenario = %key,
            tile = %tile,
            to = ?decision.to(),
            "resolved interaction"
        );

        if let Some(session_id) = session {
            if let Err(e) = self
                .tracker
                .record_interaction(session_id, key, Some(*tile), decision.to())
            {
                tracing::warn!(error = %e, scenario = %key, "interaction not recorded");
            }
        }

        Ok(decision)
    }

    /// [`trigger`](Self::trigger) with the tile given as text
    ///
    /// # Errors
    /// `Grid` if `tile` is not a cell reference, else as `trigger`.
    pub fn trigger_str(
        &self,
        key: ScenarioKey,
        tile: &str,
        session: Option<&SessionId>,
    ) -> Result<TransitionDecision, EngineError> {
        let tile: CellRef = tile.parse()?;
        self.trigger(key, &tile, session)
    }

    /// Interactions recorded for a session, in append order
    ///
    /// # Errors
    /// `Tracker` if the session was never started.
    pub fn session_history(&self, session_id: &SessionId) -> Result<Vec<InteractionLog>, EngineError> {
        Ok(self.tracker.interactions(session_id)?)
    }

    /// Normalize every stored record and validate the resulting graph
    ///
    /// A record that fails to normalize is reported in `failures` and left
    /// out of the graph; the others are still validated. `root` overrides
    /// the configured root.
    ///
    /// # Errors
    /// `Store` if the records cannot be listed.
    pub fn validate(&self, root: Option<ScenarioKey>) -> Result<GraphReport, EngineError> {
        let options = self.config.normalize_options();
        let mut configs = Vec::new();
        let mut failures = Vec::new();
        let mut warnings = Vec::new();

        for (index, raw) in self.store.raw_scenarios()?.iter().enumerate() {
            match normalize_with(raw, &options) {
                Ok(normalized) => {
                    if !normalized.warnings.is_empty() {
                        warnings.push(ScenarioWarnings {
                            key: normalized.config.key,
                            warnings: normalized.warnings,
                        });
                    }
                    configs.push(normalized.config);
                }
                Err(e) => {
                    let key = e.key().or_else(|| scenario_key_of(raw).ok());
                    tracing::warn!(index, error = %e, "scenario record failed to normalize");
                    failures.push(RecordFailure {
                        index,
                        key,
                        error: e.to_string(),
                    });
                }
            }
        }

        let root = root.or(self.config.root);
        let mut issues = validate_graph(&configs, root);
        if !options.flag_geometry_only_triggers {
            issues.retain(|issue| !issue.is_advisory());
        }

        tracing::debug!(
            scenarios = configs.len(),
            failures = failures.len(),
            issues = issues.len(),
            "validation finished"
        );

        Ok(GraphReport {
            root: root.or_else(|| configs.iter().map(|c| c.key).min()),
            scenarios: configs.len(),
            failures,
            issues,
            warnings,
        })
    }
}
