//! Simulation layer for Tessera.
//!
//! Implements the turn-resolution engine:
//! - Board of tiles with fixed 4-neighbor adjacency
//! - Terrain property stacking (regen, defence, movement and supply caps)
//! - Pending-order bookkeeping with submission-time clamping
//! - Total-attrition combat resolution
//! - Deterministic conflict ordering across one turn's four phases
//! - Heuristic order generation for computer factions

mod ai;
mod board;
mod combat;
mod invariants;
mod terrain;
mod tile;
mod turn;

pub use ai::generate_orders;
pub use board::{Board, Coord, Direction};
pub use combat::{BattleEvent, apply_attack, resolve};
pub use invariants::{InvariantViolation, SANITY_MAX_TROOPS, assert_invariants, check_invariants};
pub use terrain::TileProperty;
pub use tile::{NEUTRAL, Stockpile, TeamId, Tile};
pub use turn::process_turn;
