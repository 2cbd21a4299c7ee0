use std::io::Write;
use std::process::Command;

use pretty_assertions::assert_eq;
use scenario_engine::prelude::*;
use scenario_engine::{ConfigError, StoreError};
use scenario_test_utils::{
    e2e_record, engine_with, engine_with_config, key, linear_chain, range_record, tile_record,
    write_json,
};
use serde_json::{json, Value};

#[test]
fn test_e2e_record_is_terminal() {
    let engine = engine_with(vec![e2e_record()]);
    let normalized = engine.scenario(key(1, 2)).unwrap();
    let config = &normalized.config;

    assert_eq!((config.grid.rows, config.grid.cols), (7, 11));
    assert_eq!(config.grid.trigger_tile, Some("A2".parse().unwrap()));
    assert!(config.is_terminal());

    for row in 1..=7 {
        for col in 1..=11 {
            let tile = CellRef::new(col, row).unwrap();
            assert_eq!(engine.trigger(key(1, 2), &tile, None).unwrap(), TransitionDecision::Terminal);
        }
    }
}

#[test]
fn test_play_through_is_audited() {
    let engine = engine_with(linear_chain(3));
    let session = engine.tracker().start_session(Some("alice".into()));
    let id = &session.session_id;

    let mut at = key(1, 1);
    while let TransitionDecision::Matched { to, .. } = engine.trigger_str(at, "A1", Some(id)).unwrap() {
        at = to;
    }
    assert_eq!(at, key(1, 3));
    engine.tracker().end_session(id);

    let log = engine.session_history(id).unwrap();
    let path: Vec<_> = log.iter().map(|l| (l.scenario_key, l.resolved_transition)).collect();
    assert_eq!(
        path,
        vec![
            (key(1, 1), Some(key(1, 2))),
            (key(1, 2), Some(key(1, 3))),
            (key(1, 3), None),
        ]
    );
    assert!(log.iter().all(|l| !l.after_session_end));

    // Late interaction still resolves and is flagged
    engine.trigger_str(key(1, 1), "A1", Some(id)).unwrap();
    let log = engine.session_history(id).unwrap();
    assert!(log.last().unwrap().after_session_end);
}

#[test]
fn test_mixed_shapes_validate_together() {
    let engine = engine_with(vec![
        range_record((1, 1), "A1:C3", &[((2, 1), "B2")]),
        tile_record((2, 1), 2, 2, &["A1", "B2"], &[((1, 1), "A1")]),
    ]);
    let report = engine.validate(None).unwrap();
    assert!(report.is_clean(), "{report:?}");
    assert_eq!(report.scenarios, 2);

    let legacy = engine.scenario(key(2, 1)).unwrap().config;
    assert_eq!(legacy.grid.excel_range.as_deref(), Some("A1:B2"));
    assert_eq!(legacy.animation.unwrap().speed.as_str(), "slow");
}

#[test]
fn test_bad_record_is_isolated() {
    let engine = engine_with(vec![
        range_record((1, 1), "A1:C3", &[((1, 2), "A1")]),
        json!({"sceneId": 1, "subsceneId": 2, "title": "No grid"}),
        json!({"title": "No key", "rows": 1, "cols": 1}),
        range_record((3, 1), "A1:A1", &[]),
    ]);
    let report = engine.validate(Some(key(1, 1))).unwrap();

    assert_eq!(report.scenarios, 2);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].key, Some(key(1, 2)));
    assert_eq!(report.failures[1].key, None);

    // 1:2 failed, so the edge to it dangles and 3:1 is orphaned
    let kinds: Vec<&str> = report
        .issues
        .iter()
        .map(|i| match i {
            GraphIssue::DanglingEdge { .. } => "dangling",
            GraphIssue::Unreachable { .. } => "unreachable",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, vec!["dangling", "unreachable"]);

    assert!(matches!(
        engine.scenario(key(1, 2)),
        Err(EngineError::InvalidScenario(_))
    ));
}

#[test]
fn test_configured_root_and_flag() {
    let config = EngineConfig::new()
        .with_root(key(2, 1))
        .with_geometry_trigger_flag(false);
    let engine = engine_with_config(vec![range_record((1, 1), "A1:A1", &[]), e2e_record()], config);
    let report = engine.validate(None).unwrap();

    assert_eq!(report.root, Some(key(2, 1)));
    assert_eq!(report.issues.first(), Some(&GraphIssue::MissingRoot { root: key(2, 1) }));
    assert!(report.warnings.is_empty());
}

#[test]
fn test_store_loads_from_file() {
    let file = write_json(&Value::Array(linear_chain(4)));
    let store = MemoryScenarioStore::load(file.path()).unwrap();
    assert_eq!(store.len(), 4);

    let single = write_json(&e2e_record());
    assert_eq!(MemoryScenarioStore::load(single.path()).unwrap().keys(), vec![key(1, 2)]);
}

#[test]
fn test_store_load_failures() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        MemoryScenarioStore::load(dir.path().join("missing.json")),
        Err(StoreError::Io { .. })
    ));

    let mut garbage = tempfile::NamedTempFile::new().unwrap();
    garbage.write_all(b"{ not json").unwrap();
    assert!(matches!(
        MemoryScenarioStore::load(garbage.path()),
        Err(StoreError::Parse { .. })
    ));
}

#[test]
fn test_config_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.toml");
    std::fs::write(&path, "root = \"1:1\"\nlog_filter = \"debug\"\n").unwrap();

    let config = EngineConfig::load(&path).unwrap();
    assert_eq!(config.root, Some(key(1, 1)));
    assert!(config.flag_geometry_only_triggers);

    assert!(matches!(
        EngineConfig::load(dir.path().join("nope.toml")),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn test_put_raw_then_read_back() {
    let engine = engine_with(Vec::new());
    let config = engine
        .store()
        .put_raw(tile_record((4, 1), 3, 3, &["C3"], &[]))
        .map(|k| engine.scenario(k).unwrap().config)
        .unwrap();

    // Write back in the current shape and read again
    engine.store().put_raw(config.to_raw()).unwrap();
    assert_eq!(engine.scenario(key(4, 1)).unwrap().config, config);
}

fn cli(args: &[&str]) -> (bool, String) {
    let out = Command::new(env!("CARGO_BIN_EXE_scenario-engine"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    (out.status.success(), String::from_utf8(out.stdout).unwrap())
}

#[test]
fn test_cli_resolve() {
    let file = write_json(&Value::Array(linear_chain(2)));
    let path = file.path().to_str().unwrap();

    let (ok, stdout) = cli(&["resolve", "--file", path, "--key", "1:1", "--tile", "a1"]);
    assert!(ok);
    let decision: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(decision["outcome"], "matched");
    assert_eq!(decision["to"], json!({"sceneId": 1, "subsceneId": 2}));
}

#[test]
fn test_cli_validate_strict() {
    let file = write_json(&json!([range_record((1, 1), "A1:B2", &[((9, 9), "A1")])]));
    let path = file.path().to_str().unwrap();

    let (ok, stdout) = cli(&["validate", "--file", path, "--json"]);
    assert!(ok);
    let report: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["issues"][0]["kind"], "dangling_edge");

    let (ok, _) = cli(&["validate", "--file", path, "--strict"]);
    assert!(!ok);
}

#[test]
fn test_cli_normalize_reports_failures() {
    let file = write_json(&json!([e2e_record(), {"sceneId": 1}]));
    let path = file.path().to_str().unwrap();

    let (ok, stdout) = cli(&["normalize", "--file", path]);
    assert!(!ok);
    let out: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(out.as_array().unwrap().len(), 2);
    assert!(out[1]["error"].as_str().unwrap().contains("subsceneId"));
}
