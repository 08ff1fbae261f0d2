//! Error types for board access.

use std::fmt;

use crate::sim::Coord;

/// Errors surfaced by coordinate-addressed board operations.
///
/// Malformed *orders* are not errors: they are clamped into the nearest
/// legal order (possibly a no-op) at submission time. Only addressing a
/// tile that does not exist is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate lies outside the board.
    OutOfBounds {
        /// The rejected coordinate.
        coord: Coord,
        /// Board width in tiles.
        width: u16,
        /// Board height in tiles.
        height: u16,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds {
                coord,
                width,
                height,
            } => {
                write!(
                    f,
                    "coordinate ({}, {}) outside {width}x{height} board",
                    coord.x, coord.y
                )
            }
        }
    }
}

impl std::error::Error for GridError {}

/// Result type for board lookups.
pub type GridResult<T> = Result<T, GridError>;
