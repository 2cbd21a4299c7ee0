use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scenario_config::{normalize, ScenarioConfig, ScenarioKey};
use scenario_graph::{resolve, validate_graph, GraphIssue, ScenarioGraph, TransitionDecision};
use scenario_grid::CellRef;
use serde_json::json;

fn config(key: (u32, u32), edges: &[((u32, u32), CellRef)]) -> ScenarioConfig {
    let next: Vec<_> = edges
        .iter()
        .map(|((s, ss), tile)| json!({"sceneId": s, "subsceneId": ss, "triggerTile": tile.to_string()}))
        .collect();
    normalize(&json!({
        "sceneId": key.0, "subsceneId": key.1, "title": "t", "rows": 4, "cols": 4,
        "nextScenes": next
    }))
    .unwrap()
    .into_config()
}

fn tile(col: u32, row: u32) -> CellRef {
    CellRef::new(col, row).unwrap()
}

#[test]
fn test_e2e_record_is_terminal_everywhere() {
    let config = normalize(&json!({
        "sceneId": 1, "subsceneId": 2, "title": "Matrix",
        "rows": 7, "cols": 11, "excelRange": "A1:K7", "triggerTile": "A2",
        "animationType": "matrix_spiral"
    }))
    .unwrap()
    .into_config();

    for row in 1..=7 {
        for col in 1..=11 {
            assert_eq!(resolve(&config, &tile(col, row)), TransitionDecision::Terminal);
        }
    }
}

#[test]
fn test_chain_validates_clean() {
    let configs = vec![
        config((1, 1), &[((1, 2), tile(1, 1))]),
        config((1, 2), &[((2, 1), tile(2, 2))]),
        config((2, 1), &[]),
    ];
    assert!(validate_graph(&configs, Some(ScenarioKey::new(1, 1))).is_empty());

    let graph = ScenarioGraph::build(&configs);
    assert_eq!(graph.terminal_keys(), vec![ScenarioKey::new(2, 1)]);
    assert_eq!(graph.reachable_from(ScenarioKey::new(1, 2)).len(), 2);
}

#[test]
fn test_duplicate_trigger_resolves_first_and_is_flagged() {
    let a1 = tile(1, 1);
    let configs = vec![
        config((1, 1), &[((1, 2), a1), ((1, 3), a1)]),
        config((1, 2), &[]),
        config((1, 3), &[]),
    ];
    assert_eq!(resolve(&configs[0], &a1).to(), Some(ScenarioKey::new(1, 2)));

    let issues = validate_graph(&configs, None);
    assert_eq!(
        issues,
        vec![GraphIssue::DuplicateTrigger {
            key: ScenarioKey::new(1, 1),
            tile: a1,
            first_index: 0,
            index: 1
        }]
    );
}

fn arb_graph() -> impl Strategy<Value = Vec<ScenarioConfig>> {
    proptest::collection::vec(
        proptest::collection::vec(((0u32..4, 0u32..3), (1u32..=4, 1u32..=4)), 0..5),
        1..8,
    )
    .prop_map(|nodes| {
        nodes
            .into_iter()
            .enumerate()
            .map(|(i, edges)| {
                let edges: Vec<_> = edges
                    .into_iter()
                    .map(|(to, (c, r))| (to, tile(c, r)))
                    .collect();
                config((i as u32 / 3, i as u32 % 3), &edges)
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_empty_transitions_always_terminal(col in 1u32..200, row in 1u32..200) {
        let c = config((1, 1), &[]);
        prop_assert_eq!(resolve(&c, &tile(col, row)), TransitionDecision::Terminal);
    }

    #[test]
    fn prop_resolve_matches_first_edge(
        edges in proptest::collection::vec(((0u32..9, 0u32..9), (1u32..=3, 1u32..=3)), 1..10),
        probe in (1u32..=3, 1u32..=3)
    ) {
        let edges: Vec<_> = edges.into_iter().map(|(to, (c, r))| (to, tile(c, r))).collect();
        let c = config((0, 0), &edges);
        let probe = tile(probe.0, probe.1);
        let expected = edges
            .iter()
            .find(|(_, t)| *t == probe)
            .map(|((s, ss), _)| ScenarioKey::new(*s, *ss));
        prop_assert_eq!(resolve(&c, &probe).to(), expected);
    }

    #[test]
    fn prop_validation_is_deterministic(configs in arb_graph()) {
        let a = validate_graph(&configs, None);
        let b = validate_graph(&configs, None);
        prop_assert_eq!(&a, &b);
        let keys: Vec<_> = a.iter().map(GraphIssue::key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn prop_dangling_edges_match_missing_targets(configs in arb_graph()) {
        let graph = ScenarioGraph::build(&configs);
        let dangling = validate_graph(&configs, None)
            .into_iter()
            .filter(|i| matches!(i, GraphIssue::DanglingEdge { .. }))
            .count();
        let expected: usize = configs
            .iter()
            .flat_map(|c| c.transitions.iter())
            .filter(|t| !graph.contains(t.to))
            .count();
        prop_assert_eq!(dangling, expected);
    }
}
