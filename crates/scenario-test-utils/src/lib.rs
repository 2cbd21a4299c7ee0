//! Testing utilities for the scenario workspace
//!
//! Raw record fixtures in each historical shape, plus helpers that put
//! them behind an engine or into a temporary file.

#![allow(missing_docs)]

use std::io::Write;

use scenario_config::{normalize, ScenarioConfig, ScenarioKey};
use scenario_engine::{EngineConfig, MemoryScenarioStore, ScenarioEngine};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

/// The reference record: range notation, geometry trigger, no edges
pub fn e2e_record() -> Value {
    json!({
        "sceneId": 1,
        "subsceneId": 2,
        "title": "Matrix Awakening",
        "description": "A grid of green rain",
        "backgroundPath": "/static/backgrounds/matrix.png",
        "rows": 7,
        "cols": 11,
        "excelRange": "A1:K7",
        "triggerTile": "A2",
        "animationType": "matrix_spiral"
    })
}

/// Range-notation record with the given edges `(to, trigger)`
///
/// Every trigger tile is also declared as a tile.
pub fn range_record(key: (u32, u32), range: &str, next: &[((u32, u32), &str)]) -> Value {
    let mut tiles: Vec<&str> = next.iter().map(|(_, tile)| *tile).collect();
    tiles.sort_unstable();
    tiles.dedup();
    json!({
        "sceneId": key.0,
        "subsceneId": key.1,
        "title": format!("Scene {}.{}", key.0, key.1),
        "excelRange": range,
        "tiles": tiles,
        "nextScenes": next_scenes(next),
    })
}

/// Explicit-tile record in the legacy snake_case column shape
pub fn tile_record(key: (u32, u32), rows: u32, columns: u32, tiles: &[&str], next: &[((u32, u32), &str)]) -> Value {
    let tiles: Vec<Value> = tiles
        .iter()
        .map(|id| json!({"id": id, "handler": "frontend", "actions": {"frontend": ["highlight"]}}))
        .collect();
    json!({
        "scene_id": key.0,
        "subscene_id": key.1,
        "name": format!("Legacy {}.{}", key.0, key.1),
        "grid_config": {"rows": rows, "columns": columns, "tiles": tiles},
        "animation_config": {"type": "fade", "speed": "slow"},
        "next_scenes": next_scenes(next),
    })
}

/// `1:1 → 1:2 → … → 1:n`, each advancing on `A1`; the last is terminal
pub fn linear_chain(n: u32) -> Vec<Value> {
    (1..=n)
        .map(|i| {
            let next: Vec<((u32, u32), &str)> = if i < n { vec![((1, i + 1), "A1")] } else { Vec::new() };
            range_record((1, i), "A1:C3", &next)
        })
        .collect()
}

/// Normalize a fixture, panicking on failure
pub fn canonical(raw: &Value) -> ScenarioConfig {
    normalize(raw).unwrap().into_config()
}

/// In-memory engine over `records` with default configuration
pub fn engine_with(records: Vec<Value>) -> ScenarioEngine {
    engine_with_config(records, EngineConfig::default())
}

/// In-memory engine over `records`
pub fn engine_with_config(records: Vec<Value>, config: EngineConfig) -> ScenarioEngine {
    ScenarioEngine::in_memory(MemoryScenarioStore::from_records(records), config)
}

/// Write `document` to a temporary JSON file
pub fn write_json(document: &Value) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    serde_json::to_writer_pretty(&mut file, document).unwrap();
    file.flush().unwrap();
    file
}

/// Shorthand for a key
pub fn key(scene: u32, subscene: u32) -> ScenarioKey {
    ScenarioKey::new(scene, subscene)
}

fn next_scenes(next: &[((u32, u32), &str)]) -> Vec<Value> {
    next.iter()
        .map(|((s, ss), tile)| json!({"sceneId": s, "subsceneId": ss, "triggerTile": tile}))
        .collect()
}
