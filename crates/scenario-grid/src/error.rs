//! Error types for grid addressing

/// Errors produced while decoding cell references and ranges
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Range string could not be decoded into a rectangular extent
    #[error("malformed range '{input}': {fault}")]
    MalformedRange {
        /// The offending input, verbatim
        input: String,
        /// What was wrong with it
        fault: RangeFault,
    },

    /// Single cell reference could not be decoded
    #[error("invalid cell reference '{input}': {fault}")]
    InvalidCellRef {
        /// The offending input, verbatim
        input: String,
        /// What was wrong with it
        fault: CellFault,
    },
}

impl GridError {
    /// Build a malformed-range error
    #[inline]
    pub(crate) fn range(input: &str, fault: RangeFault) -> Self {
        Self::MalformedRange {
            input: input.to_string(),
            fault,
        }
    }

    /// Build an invalid-cell error
    #[inline]
    pub(crate) fn cell(input: &str, fault: CellFault) -> Self {
        Self::InvalidCellRef {
            input: input.to_string(),
            fault,
        }
    }

    /// Check if this error came from range decoding
    #[inline]
    #[must_use]
    pub fn is_malformed_range(&self) -> bool {
        matches!(self, Self::MalformedRange { .. })
    }
}

/// Reasons a single cell reference is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CellFault {
    /// Nothing to parse
    #[error("empty reference")]
    Empty,

    /// No column letters before the row digits
    #[error("missing column letters")]
    MissingColumn,

    /// No row digits after the column letters
    #[error("missing row number")]
    MissingRow,

    /// Rows are 1-based
    #[error("row 0 does not exist")]
    ZeroRow,

    /// Column letters decode past u32::MAX
    #[error("column out of range")]
    ColumnOverflow,

    /// Row digits decode past u32::MAX
    #[error("row out of range")]
    RowOverflow,

    /// Character that belongs to neither the column nor the row part
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
}

/// Reasons a range string is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RangeFault {
    /// Not exactly two cell references joined by ':'
    #[error("expected '<cell>:<cell>'")]
    MissingSeparator,

    /// Start cell is unparsable
    #[error("start cell: {0}")]
    Start(CellFault),

    /// End cell is unparsable
    #[error("end cell: {0}")]
    End(CellFault),

    /// End cell lies above or left of the start cell
    #[error("end cell precedes start cell")]
    Inverted,
}
