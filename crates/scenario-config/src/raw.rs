//! Raw record access
//!
//! Historical records spell the same field several ways (camelCase API
//! shape, snake_case column shape) and sometimes nest grid fields under
//! `gridConfig`. [`RawRecord`] hides that behind alias lookups.

use serde_json::{Map, Value as JsonValue};

use crate::warning::NormalizationWarning;

/// Field aliases, canonical spelling first
pub(crate) mod fields {
    pub(crate) const SCENE_ID: &[&str] = &["sceneId", "scene_id"];
    pub(crate) const SUBSCENE_ID: &[&str] = &["subsceneId", "subscene_id", "subSceneId"];
    pub(crate) const TITLE: &[&str] = &["title", "name"];
    pub(crate) const DESCRIPTION: &[&str] = &["description"];
    pub(crate) const BACKGROUND: &[&str] = &[
        "backgroundPath",
        "background_path",
        "background",
        "backgroundImage",
        "background_image",
    ];
    pub(crate) const GRID: &[&str] = &["gridConfig", "grid_config"];
    pub(crate) const ROWS: &[&str] = &["rows"];
    pub(crate) const COLS: &[&str] = &["cols"];
    pub(crate) const COLUMNS: &[&str] = &["columns"];
    pub(crate) const EXCEL_RANGE: &[&str] = &["excelRange", "excel_range"];
    pub(crate) const TRIGGER_TILE: &[&str] = &["triggerTile", "trigger_tile"];
    pub(crate) const INVISIBLE_MODE: &[&str] = &["invisibleMode", "invisible_mode"];
    pub(crate) const MATRIX_MODE: &[&str] = &["matrixAnimationMode", "matrix_animation_mode"];
    pub(crate) const TILES: &[&str] = &["tiles"];
    pub(crate) const ANIMATION_CONFIG: &[&str] = &["animationConfig", "animation_config"];
    pub(crate) const ANIMATION_TYPE: &[&str] = &["animationType", "animation_type"];
    pub(crate) const NEXT_SCENES: &[&str] = &["nextScenes", "next_scenes"];
    pub(crate) const LABEL: &[&str] = &["label"];

    /// Fields that may sit either at the top level or inside `gridConfig`
    pub(crate) const GRID_FIELDS: &[&[&str]] = &[
        ROWS,
        COLS,
        COLUMNS,
        EXCEL_RANGE,
        TRIGGER_TILE,
        INVISIBLE_MODE,
        MATRIX_MODE,
        TILES,
    ];

    /// Top-level fields consumed by normalization
    pub(crate) const TOP_LEVEL: &[&[&str]] = &[
        SCENE_ID,
        SUBSCENE_ID,
        TITLE,
        DESCRIPTION,
        BACKGROUND,
        GRID,
        ANIMATION_CONFIG,
        ANIMATION_TYPE,
        NEXT_SCENES,
    ];

    /// Check if `name` is one of the alias groups
    pub(crate) fn is_known(groups: &[&[&str]], name: &str) -> bool {
        groups.iter().any(|g| g.iter().any(|alias| *alias == name))
    }
}

/// Borrowed view over a raw scenario object
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawRecord<'a> {
    top: &'a Map<String, JsonValue>,
    grid: Option<&'a Map<String, JsonValue>>,
}

impl<'a> RawRecord<'a> {
    /// Wrap a raw object; a non-object `gridConfig` is reported and ignored
    pub(crate) fn new(top: &'a Map<String, JsonValue>, warnings: &mut Vec<NormalizationWarning>) -> Self {
        let grid = match lookup(top, fields::GRID) {
            Some((_, JsonValue::Object(map))) => Some(map),
            Some((_, JsonValue::Null)) | None => None,
            Some((name, other)) => {
                warnings.push(invalid(name, other));
                None
            }
        };
        Self { top, grid }
    }

    /// Top-level field by alias group
    pub(crate) fn field(&self, aliases: &[&'static str]) -> Option<(&'static str, &'a JsonValue)> {
        lookup(self.top, aliases).filter(|(_, v)| !v.is_null())
    }

    /// Grid field: nested `gridConfig` first, then top level
    pub(crate) fn grid_field(&self, aliases: &[&'static str]) -> Option<(&'static str, &'a JsonValue)> {
        self.grid
            .and_then(|g| lookup(g, aliases))
            .filter(|(_, v)| !v.is_null())
            .or_else(|| self.field(aliases))
    }

    /// Top-level entries no alias group claims
    pub(crate) fn unknown_top_level(&self) -> impl Iterator<Item = (&'a String, &'a JsonValue)> {
        self.top.iter().filter(|(k, _)| {
            !fields::is_known(fields::TOP_LEVEL, k) && !fields::is_known(fields::GRID_FIELDS, k)
        })
    }

    /// Nested grid entries no alias group claims
    pub(crate) fn unknown_grid(&self) -> impl Iterator<Item = (&'a String, &'a JsonValue)> {
        self.grid
            .into_iter()
            .flat_map(|g| g.iter())
            .filter(|(k, _)| !fields::is_known(fields::GRID_FIELDS, k))
    }
}

/// First present alias in `map`, with the alias that matched
pub(crate) fn lookup<'a>(
    map: &'a Map<String, JsonValue>,
    aliases: &[&'static str],
) -> Option<(&'static str, &'a JsonValue)> {
    aliases
        .iter()
        .find_map(|alias| map.get(*alias).map(|v| (*alias, v)))
}

/// JSON type name for diagnostics
pub(crate) fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// Warning for an ignored, ill-typed value
pub(crate) fn invalid(field: &str, value: &JsonValue) -> NormalizationWarning {
    NormalizationWarning::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Read a non-negative `u32`, accepting digit strings with a warning
pub(crate) fn read_u32(
    field: &str,
    value: &JsonValue,
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<u32> {
    match value {
        JsonValue::Number(n) => match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
            Some(v) => Some(v),
            None => {
                let whole = n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX));
                match whole {
                    Some(f) => {
                        warnings.push(coerced(field, value));
                        Some(f as u32)
                    }
                    None => {
                        warnings.push(invalid(field, value));
                        None
                    }
                }
            }
        },
        JsonValue::String(s) => match s.trim().parse::<u32>() {
            Ok(v) => {
                warnings.push(coerced(field, value));
                Some(v)
            }
            Err(_) => {
                warnings.push(invalid(field, value));
                None
            }
        },
        other => {
            warnings.push(invalid(field, other));
            None
        }
    }
}

/// Read a bool, accepting `"true"`/`"false"` and 0/1 with a warning
pub(crate) fn read_bool(
    field: &str,
    value: &JsonValue,
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<bool> {
    let coerce = match value {
        JsonValue::Bool(b) => return Some(*b),
        JsonValue::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        JsonValue::Number(n) => match n.as_u64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    };
    match coerce {
        Some(b) => {
            warnings.push(coerced(field, value));
            Some(b)
        }
        None => {
            warnings.push(invalid(field, value));
            None
        }
    }
}

/// Read a string, accepting numbers and bools with a warning
pub(crate) fn read_string(
    field: &str,
    value: &JsonValue,
    warnings: &mut Vec<NormalizationWarning>,
) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(_) | JsonValue::Bool(_) => {
            warnings.push(coerced(field, value));
            Some(value.to_string())
        }
        other => {
            warnings.push(invalid(field, other));
            None
        }
    }
}

fn coerced(field: &str, value: &JsonValue) -> NormalizationWarning {
    NormalizationWarning::CoercedValue {
        field: field.to_string(),
        from: type_name(value).to_string(),
    }
}
