//! Non-fatal normalization diagnostics

use std::fmt::{self, Display, Formatter};

use scenario_grid::CellRef;
use serde::Serialize;

/// Irregularity found while normalizing a raw record
///
/// Warnings never abort normalization; they travel with the result so
/// tooling can surface partially-migrated data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizationWarning {
    /// Literal `rows`/`cols` disagrees with the decoded range
    GridMismatch {
        /// `rows` or `cols`
        field: &'static str,
        /// Value written in the record
        literal: u32,
        /// Value decoded from the range
        decoded: u32,
    },

    /// Both `cols` and `columns` present with different values
    ColumnAliasConflict {
        /// Value of `cols`, which wins
        cols: u32,
        /// Value of `columns`
        columns: u32,
    },

    /// Range string present but undecodable; literals were used instead
    UnparsableRange {
        /// Range text as written
        range: String,
        /// Decoder failure
        reason: String,
    },

    /// Geometry trigger tile is not a cell reference
    TriggerTileInvalid {
        /// Offending value as JSON text
        value: String,
    },

    /// Geometry trigger tile lies outside the grid
    TriggerTileOutOfBounds {
        /// Trigger tile, retained as written
        tile: CellRef,
    },

    /// Value had the wrong JSON type but was converted
    CoercedValue {
        /// Field path
        field: String,
        /// JSON type that was converted
        from: String,
    },

    /// Value had the wrong JSON type and was ignored
    InvalidValue {
        /// Field path
        field: String,
        /// Offending value as JSON text
        value: String,
    },

    /// `animationType` and `animationConfig.type` both present and different
    AnimationTypeConflict {
        /// Bare `animationType`
        bare: String,
        /// Type from the rich object, which wins
        rich: String,
    },

    /// Rich animation object without a `type`
    MissingAnimationType,

    /// No title in the record; a placeholder was used
    MissingTitle,

    /// Tile entry could not be read and was skipped
    InvalidTile {
        /// Position in the raw `tiles` array
        index: usize,
        /// Why the entry was rejected
        reason: String,
    },

    /// Tile address lies outside the grid and was skipped
    TileOutOfBounds {
        /// Position in the raw `tiles` array
        index: usize,
        /// Tile address
        tile: CellRef,
    },

    /// Tile address repeated; later entry skipped
    DuplicateTile {
        /// Position of the skipped entry
        index: usize,
        /// Repeated address
        tile: CellRef,
    },

    /// Tile handler not one of frontend/backend/none
    UnknownHandler {
        /// Tile carrying the handler
        tile: CellRef,
        /// Handler as written
        handler: String,
    },

    /// Transition entry could not be read and was skipped
    InvalidTransition {
        /// Position in the raw `nextScenes` array
        index: usize,
        /// Why the entry was rejected
        reason: String,
    },

    /// Transition trigger matches no tile of the scenario
    TriggerNotOnTile {
        /// Position in the raw `nextScenes` array
        index: usize,
        /// Trigger tile
        tile: CellRef,
    },

    /// Transition trigger repeats an earlier one; it is unreachable
    DuplicateTrigger {
        /// Position of the shadowed entry
        index: usize,
        /// Repeated trigger tile
        tile: CellRef,
        /// Position of the entry that wins
        first_index: usize,
    },

    /// Grid declares a trigger tile but the scenario has no transitions
    GeometryTriggerWithoutEdge {
        /// Geometry trigger tile
        tile: CellRef,
    },
}

impl Display for NormalizationWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::GridMismatch {
                field,
                literal,
                decoded,
            } => write!(f, "{field}={literal} disagrees with range ({decoded}); range wins"),
            Self::ColumnAliasConflict { cols, columns } => {
                write!(f, "cols={cols} and columns={columns} disagree; cols wins")
            }
            Self::UnparsableRange { range, reason } => {
                write!(f, "range '{range}' ignored: {reason}")
            }
            Self::TriggerTileInvalid { value } => write!(f, "trigger tile {value} is not a cell"),
            Self::TriggerTileOutOfBounds { tile } => {
                write!(f, "trigger tile {tile} lies outside the grid")
            }
            Self::CoercedValue { field, from } => write!(f, "{field} coerced from {from}"),
            Self::InvalidValue { field, value } => write!(f, "{field} ignored: {value}"),
            Self::AnimationTypeConflict { bare, rich } => {
                write!(f, "animationType '{bare}' shadowed by animationConfig.type '{rich}'")
            }
            Self::MissingAnimationType => write!(f, "animation config has no type"),
            Self::MissingTitle => write!(f, "missing title"),
            Self::InvalidTile { index, reason } => write!(f, "tile #{index} skipped: {reason}"),
            Self::TileOutOfBounds { index, tile } => {
                write!(f, "tile #{index} ({tile}) lies outside the grid")
            }
            Self::DuplicateTile { index, tile } => write!(f, "tile #{index} repeats {tile}"),
            Self::UnknownHandler { tile, handler } => {
                write!(f, "tile {tile}: unknown handler '{handler}'")
            }
            Self::InvalidTransition { index, reason } => {
                write!(f, "transition #{index} skipped: {reason}")
            }
            Self::TriggerNotOnTile { index, tile } => {
                write!(f, "transition #{index} triggers on {tile}, which is not a tile")
            }
            Self::DuplicateTrigger {
                index,
                tile,
                first_index,
            } => write!(
                f,
                "transition #{index} on {tile} is shadowed by transition #{first_index}"
            ),
            Self::GeometryTriggerWithoutEdge { tile } => {
                write!(f, "trigger tile {tile} has no transition; scenario is terminal")
            }
        }
    }
}
