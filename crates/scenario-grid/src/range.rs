//! Range notation
//!
//! Decodes `"<cell>:<cell>"` strings into grid extents and back.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::{encode_column, CellRef};
use crate::error::{GridError, RangeFault};

/// Row and column counts of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Number of rows (≥ 1)
    pub rows: u32,
    /// Number of columns (≥ 1)
    pub cols: u32,
}

impl GridDimensions {
    /// Create dimensions
    #[inline]
    #[must_use]
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> u64 {
        u64::from(self.rows) * u64::from(self.cols)
    }
}

/// Rectangular range between two cells, inclusive
///
/// The start cell need not be `A1`. Cells inside the range keep their
/// absolute addresses; use [`CellRange::relative`] to translate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    start: CellRef,
    end: CellRef,
}

impl CellRange {
    /// Create range from corners
    ///
    /// # Errors
    /// Returns error if `end` lies above or left of `start`
    pub fn new(start: CellRef, end: CellRef) -> Result<Self, GridError> {
        if end.row() < start.row() || end.col() < start.col() {
            return Err(GridError::range(
                &format!("{start}:{end}"),
                RangeFault::Inverted,
            ));
        }
        Ok(Self { start, end })
    }

    /// Range anchored at `A1`
    ///
    /// # Errors
    /// Returns error if either dimension is 0
    pub fn from_origin(dims: GridDimensions) -> Result<Self, GridError> {
        Ok(Self {
            start: CellRef::new(1, 1)?,
            end: CellRef::new(dims.cols, dims.rows)?,
        })
    }

    /// Top-left cell
    #[inline]
    #[must_use]
    pub fn start(&self) -> CellRef {
        self.start
    }

    /// Bottom-right cell
    #[inline]
    #[must_use]
    pub fn end(&self) -> CellRef {
        self.end
    }

    /// Whether the range starts at `A1`
    #[inline]
    #[must_use]
    pub fn is_origin_anchored(&self) -> bool {
        self.start.row() == 1 && self.start.col() == 1
    }

    /// Row and column counts
    #[inline]
    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        GridDimensions {
            rows: self.end.row() - self.start.row() + 1,
            cols: self.end.col() - self.start.col() + 1,
        }
    }

    /// Check if an absolute cell lies inside the range
    #[inline]
    #[must_use]
    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.start.row()..=self.end.row()).contains(&cell.row())
            && (self.start.col()..=self.end.col()).contains(&cell.col())
    }

    /// Translate an absolute cell into 1-based coordinates relative to the start
    ///
    /// Returns `None` for cells outside the range.
    #[must_use]
    pub fn relative(&self, cell: &CellRef) -> Option<CellRef> {
        if !self.contains(cell) {
            return None;
        }
        CellRef::new(
            cell.col() - self.start.col() + 1,
            cell.row() - self.start.row() + 1,
        )
        .ok()
    }
}

impl Display for CellRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for CellRange {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_range(s)
    }
}

/// Parse a range string into its corner cells
///
/// # Errors
/// Returns [`GridError::MalformedRange`] if the string is not two cell
/// references joined by `:`, if either row is 0, or if the end cell
/// precedes the start cell in either dimension
pub fn parse_range(input: &str) -> Result<CellRange, GridError> {
    let mut parts = input.trim().split(':');
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(GridError::range(input, RangeFault::MissingSeparator));
    };

    let start =
        CellRef::parse_fault(start).map_err(|f| GridError::range(input, RangeFault::Start(f)))?;
    let end = CellRef::parse_fault(end).map_err(|f| GridError::range(input, RangeFault::End(f)))?;

    if end.row() < start.row() || end.col() < start.col() {
        return Err(GridError::range(input, RangeFault::Inverted));
    }

    Ok(CellRange { start, end })
}

/// Decode a range string into row and column counts
///
/// # Errors
/// See [`parse_range`]
#[inline]
pub fn decode_range(input: &str) -> Result<GridDimensions, GridError> {
    parse_range(input).map(|r| r.dimensions())
}

/// Encode dimensions as a range anchored at `A1`
///
/// Inverse of [`decode_range`] for all `rows, cols ≥ 1`.
#[must_use]
pub fn encode_range(rows: u32, cols: u32) -> String {
    format!("A1:{}{}", encode_column(cols), rows)
}

/// Check that a cell lies within `[1..rows] × [1..cols]`
#[inline]
#[must_use]
pub fn validate_cell_ref(cell: &CellRef, dims: GridDimensions) -> bool {
    (1..=dims.rows).contains(&cell.row()) && (1..=dims.cols).contains(&cell.col())
}
