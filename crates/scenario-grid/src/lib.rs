//! Scenario Grid Addressing
//!
//! Spreadsheet-style addressing for the interactive grid of a scenario.
//!
//! # Overview
//!
//! - **CellRef**: a single tile address such as `B2`
//! - **CellRange**: an inclusive rectangle such as `A1:K7`, any origin
//! - **decode_range / encode_range**: range notation ↔ row/column counts
//! - **validate_cell_ref**: bounds check against grid dimensions
//!
//! # Example
//!
//! ```rust
//! use scenario_grid::{decode_range, encode_range, validate_cell_ref, CellRef, GridDimensions};
//!
//! let dims = decode_range("A1:K7").unwrap();
//! assert_eq!(dims, GridDimensions::new(7, 11));
//! assert_eq!(encode_range(7, 11), "A1:K7");
//!
//! let tile: CellRef = "b2".parse().unwrap();
//! assert!(validate_cell_ref(&tile, dims));
//! ```

pub mod cell;
pub mod error;
pub mod range;

// Re-exports
pub use cell::{decode_column, encode_column, CellRef};
pub use error::{CellFault, GridError, RangeFault};
pub use range::{decode_range, encode_range, parse_range, validate_cell_ref, CellRange, GridDimensions};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
