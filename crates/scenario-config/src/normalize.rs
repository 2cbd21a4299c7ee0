//! Normalize-on-read
//!
//! Reduces every historical raw shape to one [`ScenarioConfig`]. Three
//! axes vary independently across records:
//!
//! - grid: range notation (`excelRange`) or explicit tiles (`columns`)
//! - animation: rich `animationConfig` object or bare `animationType`
//! - transitions: explicit `nextScenes` or none at all (terminal)
//!
//! Only a missing/invalid key or undeterminable grid size is fatal. All
//! other irregularities become [`NormalizationWarning`]s.

use std::borrow::Cow;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};

use scenario_grid::{encode_range, parse_range, CellRef, GridDimensions};
use serde_json::{Map, Value as JsonValue};

use crate::error::InvalidScenarioError;
use crate::key::ScenarioKey;
use crate::raw::{fields, invalid, lookup, read_bool, read_string, read_u32, type_name, RawRecord};
use crate::types::{
    AnimationSpec, GridGeometry, Normalized, ParamValue, ScenarioConfig, Tile, TileActions,
    TileHandler, Transition,
};
use crate::warning::NormalizationWarning;

/// Extra-map key holding raw tile entries that could not be placed
pub const UNRESOLVED_TILES: &str = "unresolvedTiles";

/// Tunables for [`normalize_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Warn when the grid names a trigger tile but no transition exists
    pub flag_geometry_only_triggers: bool,
}

impl NormalizeOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With geometry-only trigger flagging on or off
    #[inline]
    #[must_use]
    pub fn with_geometry_trigger_flag(mut self, enabled: bool) -> Self {
        self.flag_geometry_only_triggers = enabled;
        self
    }
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            flag_geometry_only_triggers: true,
        }
    }
}

/// Normalize a raw record with default options
///
/// # Errors
/// See [`normalize_with`]
#[inline]
pub fn normalize(raw: &JsonValue) -> Result<Normalized, InvalidScenarioError> {
    normalize_with(raw, &NormalizeOptions::default())
}

/// Normalize a raw record
///
/// Pure and deterministic: the input is never mutated and identical input
/// yields an identical result.
///
/// # Errors
/// - `NotAnObject` if `raw` is not a JSON object
/// - `MissingKey`/`InvalidKey` if `sceneId`/`subsceneId` are absent or
///   not non-negative integers
/// - `GridUndetermined` if no rule yields `(rows, cols)`
pub fn normalize_with(
    raw: &JsonValue,
    options: &NormalizeOptions,
) -> Result<Normalized, InvalidScenarioError> {
    let top = raw.as_object().ok_or(InvalidScenarioError::NotAnObject {
        found: type_name(raw),
    })?;

    let mut warnings = Vec::new();
    let record = RawRecord::new(top, &mut warnings);

    let key = read_key(&record)?;
    let grid = normalize_grid(&record, key, &mut warnings)?;
    let animation = normalize_animation(&record, &mut warnings);
    let (tiles, unresolved) = normalize_tiles(&record, &grid, &mut warnings);
    let transitions = normalize_transitions(&record, key, &grid, &tiles, &mut warnings);

    if options.flag_geometry_only_triggers && transitions.is_empty() {
        if let Some(tile) = grid.trigger_tile {
            warnings.push(NormalizationWarning::GeometryTriggerWithoutEdge { tile });
        }
    }

    let title = record
        .field(fields::TITLE)
        .and_then(|(name, value)| read_string(name, value, &mut warnings))
        .unwrap_or_else(|| {
            warnings.push(NormalizationWarning::MissingTitle);
            format!("Scene {}.{}", key.scene_id, key.subscene_id)
        });

    let description = record
        .field(fields::DESCRIPTION)
        .and_then(|(name, value)| read_string(name, value, &mut warnings))
        .unwrap_or_default();

    let background_path = match record.field(fields::BACKGROUND) {
        Some((_, JsonValue::String(path))) => Some(path.clone()),
        Some((name, other)) => {
            warnings.push(invalid(name, other));
            None
        }
        None => None,
    };

    let mut extra: BTreeMap<String, JsonValue> = record
        .unknown_top_level()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    if !unresolved.is_empty() {
        match extra.get_mut(UNRESOLVED_TILES) {
            Some(JsonValue::Array(existing)) => existing.extend(unresolved),
            _ => {
                extra.insert(UNRESOLVED_TILES.to_string(), JsonValue::Array(unresolved));
            }
        }
    }

    let config = ScenarioConfig {
        key,
        title,
        description,
        grid,
        animation,
        background_path,
        tiles,
        transitions,
        extra,
    };

    tracing::debug!(
        scenario = %key,
        rows = config.grid.rows,
        cols = config.grid.cols,
        tiles = config.tiles.len(),
        transitions = config.transitions.len(),
        warnings = warnings.len(),
        "normalized scenario"
    );

    Ok(Normalized { config, warnings })
}

/// Read only the identity of a raw record
///
/// Storage layers use this to index records without paying for a full
/// normalization.
///
/// # Errors
/// `NotAnObject`, `MissingKey` or `InvalidKey` as in [`normalize_with`]
pub fn scenario_key_of(raw: &JsonValue) -> Result<ScenarioKey, InvalidScenarioError> {
    let top = raw.as_object().ok_or(InvalidScenarioError::NotAnObject {
        found: type_name(raw),
    })?;
    let mut ignored = Vec::new();
    read_key(&RawRecord::new(top, &mut ignored))
}

/// Read the identity pair; never defaulted
fn read_key(record: &RawRecord<'_>) -> Result<ScenarioKey, InvalidScenarioError> {
    let scene_id = key_part(record.field(fields::SCENE_ID), "sceneId")?;
    let subscene_id = key_part(record.field(fields::SUBSCENE_ID), "subsceneId")?;
    Ok(ScenarioKey::new(scene_id, subscene_id))
}

fn key_part(
    found: Option<(&'static str, &JsonValue)>,
    canonical: &'static str,
) -> Result<u32, InvalidScenarioError> {
    let (_, value) = found.ok_or(InvalidScenarioError::MissingKey { field: canonical })?;
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| InvalidScenarioError::InvalidKey {
            field: canonical,
            value: value.to_string(),
        })
}

/// Read a dimension, rejecting 0
fn dimension(
    record: &RawRecord<'_>,
    aliases: &[&'static str],
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<u32> {
    let (name, value) = record.grid_field(aliases)?;
    match read_u32(name, value, warnings)? {
        0 => {
            warnings.push(invalid(name, value));
            None
        }
        n => Some(n),
    }
}

fn normalize_grid(
    record: &RawRecord<'_>,
    key: ScenarioKey,
    warnings: &mut Vec<NormalizationWarning>,
) -> Result<GridGeometry, InvalidScenarioError> {
    let rows = dimension(record, fields::ROWS, warnings);
    let cols = dimension(record, fields::COLS, warnings);
    let columns = dimension(record, fields::COLUMNS, warnings);

    let literal_cols = match (cols, columns) {
        (Some(cols), Some(columns)) if cols != columns => {
            warnings.push(NormalizationWarning::ColumnAliasConflict { cols, columns });
            Some(cols)
        }
        (cols, columns) => cols.or(columns),
    };

    let mut range_failure = None;
    let decoded = match record.grid_field(fields::EXCEL_RANGE) {
        Some((_, JsonValue::String(s))) if !s.trim().is_empty() => match parse_range(s) {
            Ok(range) => Some(range),
            Err(e) => {
                warnings.push(NormalizationWarning::UnparsableRange {
                    range: s.clone(),
                    reason: e.to_string(),
                });
                range_failure = Some(e.to_string());
                None
            }
        },
        Some((_, JsonValue::String(_))) | None => None,
        Some((name, other)) => {
            warnings.push(invalid(name, other));
            None
        }
    };

    let (dims, excel_range, range_synthesized) = match decoded {
        Some(range) => {
            let dims = range.dimensions();
            if let Some(literal) = rows.filter(|r| *r != dims.rows) {
                warnings.push(NormalizationWarning::GridMismatch {
                    field: "rows",
                    literal,
                    decoded: dims.rows,
                });
            }
            if let Some(literal) = literal_cols.filter(|c| *c != dims.cols) {
                warnings.push(NormalizationWarning::GridMismatch {
                    field: "cols",
                    literal,
                    decoded: dims.cols,
                });
            }
            (dims, range.to_string(), false)
        }
        None => match (rows, literal_cols) {
            (Some(rows), Some(cols)) => (
                GridDimensions::new(rows, cols),
                encode_range(rows, cols),
                true,
            ),
            (rows, cols) => {
                let missing = match (rows, cols) {
                    (None, None) => "no rows or cols",
                    (None, Some(_)) => "no rows",
                    _ => "no cols",
                };
                let reason = match range_failure {
                    Some(e) => format!("{missing}; {e}"),
                    None => missing.to_string(),
                };
                return Err(InvalidScenarioError::GridUndetermined { key, reason });
            }
        },
    };

    let mut extra: BTreeMap<String, JsonValue> = record
        .unknown_grid()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let trigger_tile = match record.grid_field(fields::TRIGGER_TILE) {
        Some((_, JsonValue::String(s))) if s.trim().is_empty() => None,
        Some((name, value)) => match read_cell(value) {
            Ok(cell) => Some(cell),
            Err(_) => {
                warnings.push(NormalizationWarning::TriggerTileInvalid {
                    value: value.to_string(),
                });
                extra.insert(name.to_string(), value.clone());
                None
            }
        },
        None => None,
    };

    let invisible_mode = record
        .grid_field(fields::INVISIBLE_MODE)
        .and_then(|(name, value)| read_bool(name, value, warnings))
        .unwrap_or(false);
    let matrix_animation_mode = record
        .grid_field(fields::MATRIX_MODE)
        .and_then(|(name, value)| read_bool(name, value, warnings))
        .unwrap_or(false);

    let grid = GridGeometry {
        rows: dims.rows,
        cols: dims.cols,
        excel_range: Some(excel_range),
        range_synthesized,
        trigger_tile,
        invisible_mode,
        matrix_animation_mode,
        extra,
    };

    if let Some(tile) = grid.trigger_tile.filter(|t| !grid.contains(t)) {
        warnings.push(NormalizationWarning::TriggerTileOutOfBounds { tile });
    }

    Ok(grid)
}

/// Cell from `"B2"` or `{"row": 2, "col": 2}`
fn read_cell(value: &JsonValue) -> Result<CellRef, String> {
    match value {
        JsonValue::String(s) => s.parse().map_err(|e: scenario_grid::GridError| e.to_string()),
        JsonValue::Object(map) => {
            let row = map.get("row").and_then(JsonValue::as_u64);
            let col = map
                .get("col")
                .or_else(|| map.get("column"))
                .and_then(JsonValue::as_u64);
            match (row, col) {
                (Some(row), Some(col)) => {
                    let row = u32::try_from(row).map_err(|_| "row out of range".to_string())?;
                    let col = u32::try_from(col).map_err(|_| "col out of range".to_string())?;
                    CellRef::new(col, row).map_err(|e| e.to_string())
                }
                _ => Err("expected {row, col}".to_string()),
            }
        }
        other => Err(format!("expected cell reference, got {}", type_name(other))),
    }
}

fn normalize_animation(
    record: &RawRecord<'_>,
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<AnimationSpec> {
    let bare = match record.field(fields::ANIMATION_TYPE) {
        Some((_, JsonValue::String(s))) if s.trim().is_empty() => None,
        Some((_, JsonValue::String(s))) => Some(s.clone()),
        Some((name, other)) => {
            warnings.push(invalid(name, other));
            None
        }
        None => None,
    };

    let rich: Option<Cow<'_, Map<String, JsonValue>>> = match record.field(fields::ANIMATION_CONFIG) {
        Some((_, JsonValue::Object(map))) => Some(Cow::Borrowed(map)),
        Some((_, JsonValue::String(s))) if s.trim().is_empty() => None,
        // Some stores keep the object as serialized JSON text
        Some((name, JsonValue::String(text))) => match serde_json::from_str(text) {
            Ok(JsonValue::Object(map)) => {
                warnings.push(NormalizationWarning::CoercedValue {
                    field: name.to_string(),
                    from: "string".to_string(),
                });
                Some(Cow::Owned(map))
            }
            _ => {
                warnings.push(NormalizationWarning::InvalidValue {
                    field: name.to_string(),
                    value: text.clone(),
                });
                None
            }
        },
        Some((name, other)) => {
            warnings.push(invalid(name, other));
            None
        }
        None => None,
    };

    match (rich, bare) {
        (Some(map), bare) => Some(rich_animation(&map, bare, warnings)),
        (None, Some(kind)) => Some(AnimationSpec::from_type(kind)),
        (None, None) => None,
    }
}

fn rich_animation(
    map: &Map<String, JsonValue>,
    bare: Option<String>,
    warnings: &mut Vec<NormalizationWarning>,
) -> AnimationSpec {
    let mut spec = AnimationSpec::from_type(String::new());
    let mut kind = None;

    for (name, value) in map {
        if value.is_null() {
            continue;
        }
        let field = format!("animationConfig.{name}");
        match name.as_str() {
            "type" | "animationType" | "animation_type" => {
                kind = read_string(&field, value, warnings).filter(|k| !k.trim().is_empty());
            }
            "speed" => match read_string(&field, value, warnings) {
                Some(speed) => spec.speed = speed.parse().unwrap_or_default(),
                None => {
                    spec.extra.insert(name.clone(), value.clone());
                }
            },
            "text" => match read_string(&field, value, warnings) {
                Some(text) => spec.text = text,
                None => {
                    spec.extra.insert(name.clone(), value.clone());
                }
            },
            "duration" | "durationMs" | "duration_ms" => match read_u32(&field, value, warnings) {
                Some(ms) => spec.duration_ms = u64::from(ms),
                None => {
                    spec.extra.insert(name.clone(), value.clone());
                }
            },
            "colors" => read_colors(&mut spec, name, value, warnings),
            "effects" => read_effects(&mut spec, name, value, warnings),
            "interactiveParams" | "interactive_params" => {
                read_params(&mut spec, name, value, warnings);
            }
            _ => {
                spec.extra.insert(name.clone(), value.clone());
            }
        }
    }

    spec.kind = match (kind, bare) {
        (Some(rich), Some(bare)) => {
            if rich != bare {
                warnings.push(NormalizationWarning::AnimationTypeConflict {
                    bare,
                    rich: rich.clone(),
                });
            }
            rich
        }
        (Some(rich), None) => rich,
        (None, Some(bare)) => bare,
        (None, None) => {
            warnings.push(NormalizationWarning::MissingAnimationType);
            String::new()
        }
    };

    spec
}

fn read_colors(
    spec: &mut AnimationSpec,
    name: &str,
    value: &JsonValue,
    warnings: &mut Vec<NormalizationWarning>,
) {
    let JsonValue::Object(colors) = value else {
        warnings.push(invalid(&format!("animationConfig.{name}"), value));
        spec.extra.insert(name.to_string(), value.clone());
        return;
    };
    for (color, v) in colors {
        match v {
            JsonValue::String(s) => {
                spec.colors.insert(color.clone(), s.clone());
            }
            other => {
                warnings.push(invalid(&format!("animationConfig.{name}.{color}"), other));
                spec.extra.insert(format!("{name}.{color}"), other.clone());
            }
        }
    }
}

fn read_effects(
    spec: &mut AnimationSpec,
    name: &str,
    value: &JsonValue,
    warnings: &mut Vec<NormalizationWarning>,
) {
    match value {
        JsonValue::Object(effects) => {
            for (effect, v) in effects {
                let field = format!("animationConfig.{name}.{effect}");
                match read_bool(&field, v, warnings) {
                    Some(on) => {
                        spec.effects.insert(effect.clone(), on);
                    }
                    None => {
                        spec.extra.insert(format!("{name}.{effect}"), v.clone());
                    }
                }
            }
        }
        // Set form: listed names are on
        JsonValue::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                match item {
                    JsonValue::String(effect) => {
                        spec.effects.insert(effect.clone(), true);
                    }
                    other => {
                        warnings.push(invalid(&format!("animationConfig.{name}[{i}]"), other));
                        spec.extra.insert(format!("{name}[{i}]"), other.clone());
                    }
                }
            }
        }
        other => {
            warnings.push(invalid(&format!("animationConfig.{name}"), other));
            spec.extra.insert(name.to_string(), other.clone());
        }
    }
}

fn read_params(
    spec: &mut AnimationSpec,
    name: &str,
    value: &JsonValue,
    warnings: &mut Vec<NormalizationWarning>,
) {
    let JsonValue::Object(params) = value else {
        warnings.push(invalid(&format!("animationConfig.{name}"), value));
        spec.extra.insert(name.to_string(), value.clone());
        return;
    };
    for (param, v) in params {
        let parsed = match v {
            JsonValue::Bool(b) => Some(ParamValue::Bool(*b)),
            JsonValue::Number(n) => n.as_f64().map(ParamValue::Number),
            JsonValue::String(s) => s.trim().parse::<f64>().ok().map(|n| {
                warnings.push(NormalizationWarning::CoercedValue {
                    field: format!("animationConfig.{name}.{param}"),
                    from: "string".to_string(),
                });
                ParamValue::Number(n)
            }),
            _ => None,
        };
        match parsed {
            Some(p) => {
                spec.interactive_params.insert(param.clone(), p);
            }
            None => {
                warnings.push(invalid(&format!("animationConfig.{name}.{param}"), v));
                spec.extra.insert(format!("{name}.{param}"), v.clone());
            }
        }
    }
}

/// Tiles that made it onto the grid, plus raw entries that did not
fn normalize_tiles(
    record: &RawRecord<'_>,
    grid: &GridGeometry,
    warnings: &mut Vec<NormalizationWarning>,
) -> (Vec<Tile>, Vec<JsonValue>) {
    let Some((name, value)) = record.grid_field(fields::TILES) else {
        return (Vec::new(), Vec::new());
    };
    let Some(entries) = value.as_array() else {
        warnings.push(invalid(name, value));
        return (Vec::new(), vec![value.clone()]);
    };

    let mut tiles = Vec::with_capacity(entries.len());
    let mut unresolved = Vec::new();
    let mut seen = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        match read_tile(entry, warnings) {
            Err(reason) => {
                warnings.push(NormalizationWarning::InvalidTile { index, reason });
                unresolved.push(entry.clone());
            }
            Ok(tile) if !grid.contains(&tile.id) => {
                warnings.push(NormalizationWarning::TileOutOfBounds {
                    index,
                    tile: tile.id,
                });
                unresolved.push(entry.clone());
            }
            Ok(tile) if !seen.insert(tile.id) => {
                warnings.push(NormalizationWarning::DuplicateTile {
                    index,
                    tile: tile.id,
                });
                unresolved.push(entry.clone());
            }
            Ok(tile) => tiles.push(tile),
        }
    }

    (tiles, unresolved)
}

fn read_tile(entry: &JsonValue, warnings: &mut Vec<NormalizationWarning>) -> Result<Tile, String> {
    let map = match entry {
        // Shorthand: bare address, no handler
        JsonValue::String(_) => return read_cell(entry).map(Tile::new),
        JsonValue::Object(map) => map,
        other => return Err(format!("expected object, got {}", type_name(other))),
    };

    let id = match map.get("id").or_else(|| map.get("cell")) {
        Some(value) => read_cell(value)?,
        None => read_cell(entry).map_err(|_| "missing id".to_string())?,
    };

    let handler = match map.get("handler") {
        None | Some(JsonValue::Null) => TileHandler::None,
        Some(JsonValue::String(s)) => TileHandler::parse(s).unwrap_or_else(|| {
            warnings.push(NormalizationWarning::UnknownHandler {
                tile: id,
                handler: s.clone(),
            });
            TileHandler::None
        }),
        Some(other) => {
            warnings.push(NormalizationWarning::UnknownHandler {
                tile: id,
                handler: other.to_string(),
            });
            TileHandler::None
        }
    };

    let actions = match map.get("actions") {
        None | Some(JsonValue::Null) => TileActions::default(),
        Some(JsonValue::Object(sides)) => TileActions {
            frontend: read_action_list(&id, "frontend", sides.get("frontend"), warnings),
            backend: read_action_list(&id, "backend", sides.get("backend"), warnings),
        },
        Some(other) => {
            warnings.push(invalid(&format!("tiles.{id}.actions"), other));
            TileActions::default()
        }
    };

    let effects = match map.get("effects") {
        None | Some(JsonValue::Null) => BTreeMap::new(),
        Some(JsonValue::Object(effects)) => effects
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
        Some(other) => {
            warnings.push(invalid(&format!("tiles.{id}.effects"), other));
            BTreeMap::new()
        }
    };

    Ok(Tile {
        id,
        handler,
        actions,
        effects,
    })
}

fn read_action_list(
    id: &CellRef,
    side: &str,
    value: Option<&JsonValue>,
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<Vec<String>> {
    let field = format!("tiles.{id}.actions.{side}");
    match value? {
        JsonValue::Null => None,
        JsonValue::String(action) => {
            warnings.push(NormalizationWarning::CoercedValue {
                field,
                from: "string".to_string(),
            });
            Some(vec![action.clone()])
        }
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| match item {
                    JsonValue::String(action) => Some(action.clone()),
                    other => {
                        warnings.push(invalid(&field, other));
                        None
                    }
                })
                .collect(),
        ),
        other => {
            warnings.push(invalid(&field, other));
            None
        }
    }
}

fn normalize_transitions(
    record: &RawRecord<'_>,
    from: ScenarioKey,
    grid: &GridGeometry,
    tiles: &[Tile],
    warnings: &mut Vec<NormalizationWarning>,
) -> Vec<Transition> {
    let Some((name, value)) = record.field(fields::NEXT_SCENES) else {
        return Vec::new();
    };
    let entries: &[JsonValue] = match value {
        JsonValue::Array(entries) => entries,
        JsonValue::Object(_) => {
            warnings.push(NormalizationWarning::CoercedValue {
                field: name.to_string(),
                from: "object".to_string(),
            });
            std::slice::from_ref(value)
        }
        other => {
            warnings.push(invalid(name, other));
            return Vec::new();
        }
    };

    let valid_triggers: HashSet<CellRef> = if tiles.is_empty() {
        grid.trigger_tile.into_iter().collect()
    } else {
        tiles.iter().map(|t| t.id).collect()
    };

    let mut first_by_tile: HashMap<CellRef, usize> = HashMap::new();
    let mut transitions = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let transition = match read_transition(from, entry) {
            Ok(t) => t,
            Err(reason) => {
                warnings.push(NormalizationWarning::InvalidTransition { index, reason });
                continue;
            }
        };

        let tile = transition.trigger_tile;
        if !valid_triggers.contains(&tile) {
            warnings.push(NormalizationWarning::TriggerNotOnTile { index, tile });
        }
        match first_by_tile.entry(tile) {
            Entry::Occupied(first) => warnings.push(NormalizationWarning::DuplicateTrigger {
                index,
                tile,
                first_index: *first.get(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(index);
            }
        }

        transitions.push(transition);
    }

    transitions
}

fn read_transition(from: ScenarioKey, entry: &JsonValue) -> Result<Transition, String> {
    let map = entry
        .as_object()
        .ok_or_else(|| format!("expected object, got {}", type_name(entry)))?;

    let scene_id = key_part(lookup(map, fields::SCENE_ID), "sceneId").map_err(|e| e.to_string())?;
    let subscene_id =
        key_part(lookup(map, fields::SUBSCENE_ID), "subsceneId").map_err(|e| e.to_string())?;

    let trigger_tile = match lookup(map, fields::TRIGGER_TILE) {
        Some((_, value)) if !value.is_null() => read_cell(value)?,
        _ => return Err("missing triggerTile".to_string()),
    };

    let label = match lookup(map, fields::LABEL) {
        Some((_, JsonValue::String(s))) => Some(s.clone()),
        Some((_, JsonValue::Null)) | None => None,
        Some((_, other)) => Some(other.to_string()),
    };

    Ok(Transition {
        from,
        trigger_tile,
        to: ScenarioKey::new(scene_id, subscene_id),
        label,
    })
}
