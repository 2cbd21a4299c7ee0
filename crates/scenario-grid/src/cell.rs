//! Cell references
//!
//! Provides [`CellRef`] for addressing a single tile in spreadsheet notation,
//! plus the base-26 column codec shared with range decoding.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CellFault, GridError};

/// Single addressable cell, e.g. `B2`
///
/// Columns are stored as their 1-based numeric index, so `b2` and `B2`
/// are the same reference. Ordering is row-major: `(row, column)`.
///
/// # Examples
/// - `A1` → column 1, row 1
/// - `AA10` → column 27, row 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    col: u32,
    row: u32,
}

impl CellRef {
    /// Create from 1-based column and row
    ///
    /// # Errors
    /// Returns error if either coordinate is 0
    pub fn new(col: u32, row: u32) -> Result<Self, GridError> {
        if col == 0 {
            return Err(GridError::cell(&format!("col={col},row={row}"), CellFault::MissingColumn));
        }
        if row == 0 {
            return Err(GridError::cell(&format!("col={col},row={row}"), CellFault::ZeroRow));
        }
        Ok(Self { col, row })
    }

    /// 1-based column index
    #[inline]
    #[must_use]
    pub fn col(&self) -> u32 {
        self.col
    }

    /// 1-based row number
    #[inline]
    #[must_use]
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Column letters, upper case
    #[inline]
    #[must_use]
    pub fn col_letters(&self) -> String {
        encode_column(self.col)
    }

    /// Parse without wrapping the fault in a [`GridError`]
    pub(crate) fn parse_fault(input: &str) -> Result<Self, CellFault> {
        let s = input.trim();
        if s.is_empty() {
            return Err(CellFault::Empty);
        }

        let mut chars = s.chars().peekable();
        if chars.peek() == Some(&'$') {
            chars.next();
        }

        let mut col: u32 = 0;
        let mut letters = 0usize;
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            col = push_column_digit(col, c).ok_or(CellFault::ColumnOverflow)?;
            letters += 1;
            chars.next();
        }
        if letters == 0 {
            return match chars.peek() {
                Some(c) if c.is_ascii_digit() => Err(CellFault::MissingColumn),
                Some(&c) => Err(CellFault::UnexpectedCharacter(c)),
                None => Err(CellFault::MissingColumn),
            };
        }

        if chars.peek() == Some(&'$') {
            chars.next();
        }

        let mut row: u32 = 0;
        let mut digits = 0usize;
        for c in chars {
            let d = c.to_digit(10).ok_or(CellFault::UnexpectedCharacter(c))?;
            row = row
                .checked_mul(10)
                .and_then(|r| r.checked_add(d))
                .ok_or(CellFault::RowOverflow)?;
            digits += 1;
        }
        if digits == 0 {
            return Err(CellFault::MissingRow);
        }
        if row == 0 {
            return Err(CellFault::ZeroRow);
        }

        Ok(Self { col, row })
    }
}

impl Display for CellRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", encode_column(self.col), self.row)
    }
}

impl FromStr for CellRef {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_fault(s).map_err(|fault| GridError::cell(s, fault))
    }
}

impl Ord for CellRef {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

impl PartialOrd for CellRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for CellRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Decode base-26 column letters (A=1 … Z=26, AA=27, …)
///
/// Letters are case-insensitive. There is no zero digit.
///
/// # Errors
/// Returns error on empty input, non-letters, or overflow past `u32::MAX`
pub fn decode_column(letters: &str) -> Result<u32, GridError> {
    if letters.is_empty() {
        return Err(GridError::cell(letters, CellFault::MissingColumn));
    }
    letters.chars().try_fold(0u32, |acc, c| {
        if !c.is_ascii_alphabetic() {
            return Err(GridError::cell(letters, CellFault::UnexpectedCharacter(c)));
        }
        push_column_digit(acc, c).ok_or_else(|| GridError::cell(letters, CellFault::ColumnOverflow))
    })
}

/// Encode a 1-based column index as letters
///
/// Index 0 has no letter form and encodes as the empty string.
#[must_use]
pub fn encode_column(mut col: u32) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push(b'A' + rem as u8);
        col = (col - 1) / 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

#[inline]
fn push_column_digit(acc: u32, c: char) -> Option<u32> {
    let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
    acc.checked_mul(26)?.checked_add(digit)
}
