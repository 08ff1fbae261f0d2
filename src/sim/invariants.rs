//! Board invariants - sanity checks that detect bugs.
//!
//! These hold for any board at rest (between turns) and should NEVER
//! trigger in a correctly implemented simulation. If one does, it
//! indicates a bug, not a gameplay condition.
//!
//! The garrison bound is NOT a gameplay limit - supply caps bound
//! garrisons naturally. It is a sanity check with a very generous bound.

use crate::sim::board::{Board, Direction};
use crate::sim::tile::{NEUTRAL, clamp_troops};

/// Sanity bound: garrison or pending order per tile should never exceed
/// this. Supply caps hold garrisons to double digits and orders are cut
/// from garrisons, so a million troops anywhere means arithmetic ran
/// away.
pub const SANITY_MAX_TROOPS: u32 = 1_000_000;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all at-rest board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// These are bug detectors, not gameplay limits. A board mid-resolution
/// legitimately carries unsynced captures and must not be checked here;
/// call this between turns.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    if !board.in_bounds(board.selection()) {
        violations.push(InvariantViolation {
            message: format!(
                "Selection {:?} lies outside the {}x{} board",
                board.selection(),
                board.width(),
                board.height()
            ),
        });
    }

    for tile in board.iter() {
        // Faction ids below the neutral marker are meaningless.
        if tile.team < NEUTRAL || tile.occupier < NEUTRAL {
            violations.push(InvariantViolation {
                message: format!(
                    "Tile at {:?} has invalid faction ids: team {} occupier {}",
                    tile.coord, tile.team, tile.occupier
                ),
            });
        }

        // Capture lag only exists inside a turn; at rest the closing
        // sync has always run.
        if tile.team != tile.occupier {
            violations.push(InvariantViolation {
                message: format!(
                    "Tile at {:?} has an unsynced capture: team {} occupier {}",
                    tile.coord, tile.team, tile.occupier
                ),
            });
        }

        if tile.garrison > SANITY_MAX_TROOPS {
            violations.push(InvariantViolation {
                message: format!(
                    "Tile at {:?} has garrison {} > sanity max {}",
                    tile.coord, tile.garrison, SANITY_MAX_TROOPS
                ),
            });
        }

        for dir in Direction::ALL {
            let committed = tile.pending(dir);
            if committed == 0 {
                continue;
            }

            let Some(target) = tile.neighbor(dir).and_then(|coord| board.get(coord)) else {
                violations.push(InvariantViolation {
                    message: format!(
                        "Tile at {:?} commits {committed} troops {dir:?} off the board",
                        tile.coord
                    ),
                });
                continue;
            };

            if committed > SANITY_MAX_TROOPS {
                violations.push(InvariantViolation {
                    message: format!(
                        "Tile at {:?} commits {} troops {:?} > sanity max {}",
                        tile.coord, committed, dir, SANITY_MAX_TROOPS
                    ),
                });
            }

            // Orders are capped at submission by the target's movement
            // limit; terrain never changes afterwards.
            let cap = clamp_troops(i64::from(target.effective_maxmove()));
            if committed > cap {
                violations.push(InvariantViolation {
                    message: format!(
                        "Tile at {:?} commits {} troops {:?} past the target cap {}",
                        tile.coord, committed, dir, cap
                    ),
                });
            }

            if target.neighbor(dir.opposite()) != Some(tile.coord) {
                violations.push(InvariantViolation {
                    message: format!(
                        "Adjacency is asymmetric between {:?} and {:?}",
                        tile.coord, target.coord
                    ),
                });
            }
        }
    }

    violations
}

/// Assert all at-rest board invariants hold, panicking if any are
/// violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board) {
    let violations = check_invariants(board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board) {}
