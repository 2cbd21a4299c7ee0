//! Canonical config back to the current raw shape

use serde_json::{json, Map, Value as JsonValue};

use crate::types::{AnimationSpec, GridGeometry, ScenarioConfig, Tile, Transition};

impl ScenarioConfig {
    /// Emit the record in the current camelCase raw shape
    ///
    /// Normalizing the output yields a config equal to `self`. Synthesized
    /// ranges are left out so they stay synthesized.
    #[must_use]
    pub fn to_raw(&self) -> JsonValue {
        let mut out = Map::new();
        out.insert("sceneId".into(), json!(self.key.scene_id));
        out.insert("subsceneId".into(), json!(self.key.subscene_id));
        out.insert("title".into(), json!(self.title));
        out.insert("description".into(), json!(self.description));
        out.insert("backgroundPath".into(), json!(self.background_path));
        out.insert("gridConfig".into(), grid_to_raw(&self.grid, &self.tiles));
        if let Some(animation) = &self.animation {
            out.insert("animationConfig".into(), animation_to_raw(animation));
        }
        out.insert(
            "nextScenes".into(),
            JsonValue::Array(self.transitions.iter().map(transition_to_raw).collect()),
        );
        for (k, v) in &self.extra {
            out.entry(k.clone()).or_insert_with(|| v.clone());
        }
        JsonValue::Object(out)
    }
}

fn grid_to_raw(grid: &GridGeometry, tiles: &[Tile]) -> JsonValue {
    let mut out = Map::new();
    out.insert("rows".into(), json!(grid.rows));
    out.insert("cols".into(), json!(grid.cols));
    if !grid.range_synthesized {
        if let Some(range) = &grid.excel_range {
            out.insert("excelRange".into(), json!(range));
        }
    }
    if let Some(tile) = grid.trigger_tile {
        out.insert("triggerTile".into(), json!(tile.to_string()));
    }
    out.insert("invisibleMode".into(), json!(grid.invisible_mode));
    out.insert("matrixAnimationMode".into(), json!(grid.matrix_animation_mode));
    out.insert(
        "tiles".into(),
        JsonValue::Array(tiles.iter().map(tile_to_raw).collect()),
    );
    for (k, v) in &grid.extra {
        out.entry(k.clone()).or_insert_with(|| v.clone());
    }
    JsonValue::Object(out)
}

fn tile_to_raw(tile: &Tile) -> JsonValue {
    let mut out = Map::new();
    out.insert("id".into(), json!(tile.id.to_string()));
    out.insert("handler".into(), json!(tile.handler.as_str()));
    let mut actions = Map::new();
    if let Some(frontend) = &tile.actions.frontend {
        actions.insert("frontend".into(), json!(frontend));
    }
    if let Some(backend) = &tile.actions.backend {
        actions.insert("backend".into(), json!(backend));
    }
    out.insert("actions".into(), JsonValue::Object(actions));
    out.insert(
        "effects".into(),
        JsonValue::Object(tile.effects.iter().map(|(k, v)| (k.clone(), v.clone())).collect()),
    );
    JsonValue::Object(out)
}

fn animation_to_raw(animation: &AnimationSpec) -> JsonValue {
    let mut out = Map::new();
    out.insert("type".into(), json!(animation.kind));
    out.insert("speed".into(), json!(animation.speed.as_str()));
    out.insert("colors".into(), json!(animation.colors));
    out.insert("text".into(), json!(animation.text));
    out.insert("durationMs".into(), json!(animation.duration_ms));
    out.insert("effects".into(), json!(animation.effects));
    out.insert("interactiveParams".into(), json!(animation.interactive_params));
    for (k, v) in &animation.extra {
        out.entry(k.clone()).or_insert_with(|| v.clone());
    }
    JsonValue::Object(out)
}

fn transition_to_raw(transition: &Transition) -> JsonValue {
    let mut out = Map::new();
    out.insert("sceneId".into(), json!(transition.to.scene_id));
    out.insert("subsceneId".into(), json!(transition.to.subscene_id));
    out.insert("triggerTile".into(), json!(transition.trigger_tile.to_string()));
    if let Some(label) = &transition.label {
        out.insert("label".into(), json!(label));
    }
    JsonValue::Object(out)
}
