use pretty_assertions::assert_eq;
use proptest::prelude::*;
use scenario_config::prelude::*;
use scenario_config::{AnimationSpec, TileHandler};
use scenario_grid::encode_range;
use serde_json::{json, Value};

fn cell(s: &str) -> CellRef {
    s.parse().unwrap()
}

#[test]
fn test_range_and_tile_shapes_agree_on_geometry() {
    let range_shape = json!({
        "sceneId": 1, "subsceneId": 1, "title": "t",
        "rows": 7, "cols": 11, "excelRange": "A1:K7"
    });
    let tile_shape = json!({
        "sceneId": 1, "subsceneId": 1, "title": "t",
        "rows": 7, "columns": 11, "tiles": []
    });

    let a = normalize(&range_shape).unwrap().into_config();
    let b = normalize(&tile_shape).unwrap().into_config();

    assert_eq!(a.grid.dimensions(), b.grid.dimensions());
    assert_eq!(a.grid.excel_range, b.grid.excel_range);
}

#[test]
fn test_terminal_geometry_only_record() {
    let out = normalize(&json!({
        "sceneId": 1, "subsceneId": 2,
        "title": "Matrix",
        "backgroundPath": "/static/bg/matrix.png",
        "rows": 7, "cols": 11, "excelRange": "A1:K7",
        "triggerTile": "A2",
        "animationType": "matrix_spiral"
    }))
    .unwrap();

    let config = &out.config;
    assert_eq!(config.key, ScenarioKey::new(1, 2));
    assert_eq!(config.grid.trigger_tile, Some(cell("A2")));
    assert_eq!(config.animation, Some(AnimationSpec::from_type("matrix_spiral")));
    assert!(config.is_terminal());
    assert!(config.tiles.is_empty());
    assert_eq!(
        out.warnings,
        vec![NormalizationWarning::GeometryTriggerWithoutEdge { tile: cell("A2") }]
    );
}

#[test]
fn test_legacy_column_shape() {
    let out = normalize(&json!({
        "scene_id": 5, "subscene_id": 3, "name": "Cellar",
        "background_image": "cellar.jpg",
        "grid_config": {
            "rows": 3, "columns": 3,
            "tiles": [
                {"row": 1, "col": 1, "handler": "frontend", "actions": {"frontend": "open"}},
                {"cell": "C3", "handler": "BACKEND"}
            ]
        },
        "animation_config": {"animation_type": "fade", "duration_ms": "800"},
        "next_scenes": [{"scene_id": 5, "subscene_id": 4, "trigger_tile": "C3"}]
    }))
    .unwrap();

    let config = out.config;
    assert_eq!(config.key, ScenarioKey::new(5, 3));
    assert_eq!(config.title, "Cellar");
    assert_eq!(config.background_path.as_deref(), Some("cellar.jpg"));
    assert_eq!(config.grid.excel_range.as_deref(), Some("A1:C3"));
    assert_eq!(config.tiles[0].id, cell("A1"));
    assert_eq!(config.tiles[0].actions.frontend, Some(vec!["open".to_string()]));
    assert_eq!(config.tiles[1].handler, TileHandler::Backend);

    let animation = config.animation.unwrap();
    assert_eq!(animation.kind, "fade");
    assert_eq!(animation.duration_ms, 800);

    assert_eq!(config.transitions.len(), 1);
    assert_eq!(config.transitions[0].to, ScenarioKey::new(5, 4));

    // actions string and duration string
    assert_eq!(
        out.warnings
            .iter()
            .filter(|w| matches!(w, NormalizationWarning::CoercedValue { .. }))
            .count(),
        2
    );
}

#[test]
fn test_single_transition_object_is_accepted() {
    let out = normalize(&json!({
        "sceneId": 1, "subsceneId": 1, "title": "t", "rows": 1, "cols": 1,
        "triggerTile": "A1",
        "nextScenes": {"sceneId": 2, "subsceneId": 1, "triggerTile": "A1"}
    }))
    .unwrap();
    assert_eq!(out.config.transitions.len(), 1);
}

#[test]
fn test_warnings_serialize_for_tooling() {
    let out = normalize(&json!({
        "sceneId": 1, "subsceneId": 1, "rows": 2, "cols": 2, "excelRange": "A1:B3"
    }))
    .unwrap();
    let json = serde_json::to_value(&out).unwrap();
    let kinds: Vec<&str> = json["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["grid_mismatch", "missing_title"]);
}

#[test]
fn test_options_silence_geometry_trigger() {
    let raw = json!({"sceneId": 1, "subsceneId": 1, "title": "t", "excelRange": "A1:A1", "triggerTile": "A1"});
    let loud = normalize_with(&raw, &NormalizeOptions::default()).unwrap();
    let quiet = normalize_with(&raw, &NormalizeOptions::new().with_geometry_trigger_flag(false)).unwrap();
    assert_eq!(loud.warnings.len(), 1);
    assert!(quiet.is_clean());
}

fn raw_record(scene: u32, sub: u32, rows: u32, cols: u32, use_range: bool, targets: Vec<(u32, u32)>) -> Value {
    let mut raw = json!({
        "sceneId": scene,
        "subsceneId": sub,
        "title": format!("S{scene}.{sub}"),
        "animationType": "fade",
    });
    if use_range {
        raw["excelRange"] = json!(encode_range(rows, cols));
    } else {
        raw["rows"] = json!(rows);
        raw["columns"] = json!(cols);
    }
    let next: Vec<Value> = targets
        .into_iter()
        .map(|(s, ss)| json!({"sceneId": s, "subsceneId": ss, "triggerTile": "A1"}))
        .collect();
    raw["nextScenes"] = Value::Array(next);
    raw
}

proptest! {
    #[test]
    fn prop_normalize_is_deterministic(
        scene in 0u32..50,
        sub in 0u32..50,
        rows in 1u32..30,
        cols in 1u32..60,
        use_range in any::<bool>(),
        targets in proptest::collection::vec((0u32..5, 0u32..5), 0..4)
    ) {
        let raw = raw_record(scene, sub, rows, cols, use_range, targets);
        let a = normalize(&raw).unwrap();
        let b = normalize(&raw).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.config.grid.rows, rows);
        prop_assert_eq!(a.config.grid.cols, cols);
    }

    #[test]
    fn prop_emitted_record_renormalizes_equal(
        scene in 0u32..50,
        sub in 0u32..50,
        rows in 1u32..30,
        cols in 1u32..60,
        use_range in any::<bool>(),
        targets in proptest::collection::vec((0u32..5, 0u32..5), 0..4)
    ) {
        let config = normalize(&raw_record(scene, sub, rows, cols, use_range, targets))
            .unwrap()
            .into_config();
        let again = normalize(&config.to_raw()).unwrap().into_config();
        prop_assert_eq!(again, config);
    }

    #[test]
    fn prop_first_edge_order_is_preserved(
        targets in proptest::collection::vec((0u32..5, 0u32..5), 1..6)
    ) {
        let raw = raw_record(1, 1, 2, 2, true, targets.clone());
        let config = normalize(&raw).unwrap().into_config();
        let got: Vec<(u32, u32)> = config
            .transitions
            .iter()
            .map(|t| (t.to.scene_id, t.to.subscene_id))
            .collect();
        prop_assert_eq!(got, targets);
    }
}
