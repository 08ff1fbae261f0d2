// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Tessera: a deterministic turn-based territorial strategy engine.
//!
//! This crate provides a grid-wargame simulation core designed for:
//! - Bit-exact deterministic turn resolution from a seed
//! - Simultaneous standing orders resolved in a conflict-ordered sweep
//! - Computer factions that command tiles through the same order
//!   submission surface as the player
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │         Match Runner                │
//! ├─────────────────────────────────────┤
//! │    Turn Engine (four phases)        │
//! ├─────────────────────────────────────┤
//! │  Board / Tiles / Terrain / Combat   │
//! └─────────────────────────────────────┘
//! ```

pub mod error;
pub mod runner;
pub mod scenario;
pub mod sim;

pub use error::{GridError, GridResult};

// Re-export key simulation types at crate root for convenience
pub use sim::{BattleEvent, Board, Coord, Direction, NEUTRAL, TeamId, Tile, TileProperty};
