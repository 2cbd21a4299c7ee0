//! Canonical scenario representation
//!
//! Every historical raw shape normalizes into these types. They are
//! immutable value objects; nothing here is persisted directly.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use scenario_grid::{encode_range, parse_range, validate_cell_ref, CellRange, CellRef, GridDimensions};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

use crate::key::ScenarioKey;
use crate::warning::NormalizationWarning;

/// Row/column layout and addressing metadata of a scenario grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridGeometry {
    /// Number of rows (≥ 1)
    pub rows: u32,
    /// Number of columns (≥ 1)
    pub cols: u32,
    /// Range notation; decodes to exactly `(rows, cols)`
    pub excel_range: Option<String>,
    /// `true` when `excel_range` was generated from `rows`/`cols`
    #[serde(default)]
    pub range_synthesized: bool,
    /// Tile named by the grid itself, if any
    pub trigger_tile: Option<CellRef>,
    /// Render tiles without visible borders
    #[serde(default)]
    pub invisible_mode: bool,
    /// Drive the grid with the matrix animation
    #[serde(default)]
    pub matrix_animation_mode: bool,
    /// Unrecognized grid fields, passed through
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, JsonValue>,
}

impl GridGeometry {
    /// Geometry from dimensions alone, with a synthesized `A1` range
    #[must_use]
    pub fn from_dimensions(dims: GridDimensions) -> Self {
        Self {
            rows: dims.rows,
            cols: dims.cols,
            excel_range: Some(encode_range(dims.rows, dims.cols)),
            range_synthesized: true,
            trigger_tile: None,
            invisible_mode: false,
            matrix_animation_mode: false,
            extra: BTreeMap::new(),
        }
    }

    /// Row and column counts
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.rows, self.cols)
    }

    /// Decoded range, if the range string is present and valid
    #[must_use]
    pub fn range(&self) -> Option<CellRange> {
        self.excel_range.as_deref().and_then(|r| parse_range(r).ok())
    }

    /// Check if a tile address lies on this grid
    ///
    /// Tile addresses count from the grid's own origin, so the cell must
    /// fall within `[1..rows] × [1..cols]` whatever the range start.
    #[inline]
    #[must_use]
    pub fn contains(&self, cell: &CellRef) -> bool {
        validate_cell_ref(cell, self.dimensions())
    }
}

/// Animation playback speed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AnimationSpeed {
    /// No motion
    None,
    /// Slow
    Slow,
    /// Default speed
    #[default]
    Normal,
    /// Fast
    Fast,
    /// Any other value, kept verbatim
    Other(String),
}

impl AnimationSpeed {
    /// String form as stored in raw records
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => "none",
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for AnimationSpeed {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "slow" => Self::Slow,
            "normal" => Self::Normal,
            "fast" => Self::Fast,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl Display for AnimationSpeed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AnimationSpeed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AnimationSpeed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

/// Interactive animation parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Toggle
    Bool(bool),
    /// Numeric knob
    Number(f64),
}

/// Animation parameters of a scenario
///
/// No field set is universally required; unknown keys survive in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationSpec {
    /// Animation kind, e.g. `matrix_spiral`
    #[serde(rename = "type")]
    pub kind: String,
    /// Playback speed
    pub speed: AnimationSpeed,
    /// Named colors
    pub colors: BTreeMap<String, String>,
    /// Overlay text
    pub text: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
    /// Named effect toggles
    pub effects: BTreeMap<String, bool>,
    /// Named numeric or boolean parameters
    pub interactive_params: BTreeMap<String, ParamValue>,
    /// Unrecognized or ill-typed entries, passed through
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, JsonValue>,
}

impl AnimationSpec {
    /// Lift a bare animation type into a full spec with conservative defaults
    #[must_use]
    pub fn from_type(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            speed: AnimationSpeed::Normal,
            colors: BTreeMap::new(),
            text: String::new(),
            duration_ms: 0,
            effects: BTreeMap::new(),
            interactive_params: BTreeMap::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Check if a named effect is switched on
    #[inline]
    #[must_use]
    pub fn effect(&self, name: &str) -> bool {
        self.effects.get(name).copied().unwrap_or(false)
    }
}

/// Which side handles a tile interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileHandler {
    /// Renderer handles it
    Frontend,
    /// Backend handles it
    Backend,
    /// Not interactive
    #[default]
    None,
}

impl TileHandler {
    /// Parse a raw handler name, case-insensitively
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frontend" => Some(Self::Frontend),
            "backend" => Some(Self::Backend),
            "none" | "" => Some(Self::None),
            _ => None,
        }
    }

    /// String form as stored in raw records
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::None => "none",
        }
    }
}

/// Ordered action lists per handler side
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileActions {
    /// Renderer-side actions
    pub frontend: Option<Vec<String>>,
    /// Backend-side actions
    pub backend: Option<Vec<String>>,
}

/// One addressable cell of a scenario grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Tile address
    pub id: CellRef,
    /// Interaction handler
    pub handler: TileHandler,
    /// Actions per side
    pub actions: TileActions,
    /// Named effect values
    pub effects: BTreeMap<String, JsonValue>,
}

impl Tile {
    /// Non-interactive tile at `id`
    #[must_use]
    pub fn new(id: CellRef) -> Self {
        Self {
            id,
            handler: TileHandler::None,
            actions: TileActions::default(),
            effects: BTreeMap::new(),
        }
    }
}

/// Directed edge of the scenario graph, keyed by its trigger tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    /// Source scenario
    pub from: ScenarioKey,
    /// Tile whose interaction fires the edge
    pub trigger_tile: CellRef,
    /// Destination scenario
    pub to: ScenarioKey,
    /// Optional display label
    pub label: Option<String>,
}

/// Canonical scenario, the output of normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioConfig {
    /// Identity
    pub key: ScenarioKey,
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Grid layout
    pub grid: GridGeometry,
    /// Animation, absent when the record names none
    pub animation: Option<AnimationSpec>,
    /// Opaque asset path, handed to the asset server unchecked
    pub background_path: Option<String>,
    /// Tiles in record order
    pub tiles: Vec<Tile>,
    /// Outgoing edges in record order; first match wins
    pub transitions: Vec<Transition>,
    /// Unrecognized top-level fields, passed through
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, JsonValue>,
}

impl ScenarioConfig {
    /// Whether no tile leads anywhere
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Look up a tile by address
    #[must_use]
    pub fn tile(&self, id: &CellRef) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == *id)
    }
}

/// Canonical config plus the warnings raised while producing it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized {
    /// The canonical scenario
    pub config: ScenarioConfig,
    /// Non-fatal irregularities, in discovery order
    pub warnings: Vec<NormalizationWarning>,
}

impl Normalized {
    /// Drop the warnings
    #[inline]
    #[must_use]
    pub fn into_config(self) -> ScenarioConfig {
        self.config
    }

    /// Whether the record was already clean
    #[inline]
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
