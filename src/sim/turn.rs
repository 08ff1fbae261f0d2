//! Turn orchestration: four deterministic phases.
//!
//! A turn runs AI order generation, conflict-ordered attack resolution,
//! upkeep, and the ownership sync, each phase completing fully before
//! the next begins. All randomness flows through the caller-supplied
//! generator, so a seeded generator replays a turn bit for bit.

use rand::Rng;

use crate::sim::board::{Board, Coord, Direction};
use crate::sim::combat::BattleEvent;
use crate::sim::tile::NEUTRAL;
use crate::sim::{ai, combat};

/// One entry of the resolution worklist: a pending order plus the
/// composite key it sorts under, frozen at worklist-build time.
struct WorkItem {
    source: Coord,
    dir: Direction,
    key: (u8, u8, u32, u32),
}

/// Process one full turn.
///
/// Phases, in order:
/// 1. every tile with `team > 0` generates orders heuristically;
/// 2. every pending order resolves in sorted worklist order; after each
///    resolved pair the `on_event` hook runs with the mid-resolution
///    board so the presentation layer can redraw and pace the playback;
/// 3. every tile applies upkeep;
/// 4. every tile's `team` is synced to its `occupier`, finalizing
///    captures.
///
/// The hook receives a shared borrow; no orders can be submitted while
/// the turn is in flight.
pub fn process_turn<R, F>(board: &mut Board, rng: &mut R, mut on_event: F)
where
    R: Rng,
    F: FnMut(&Board, &BattleEvent),
{
    ai_phase(board, rng);
    resolution_phase(board, rng, &mut on_event);
    upkeep_phase(board);
    sync_phase(board);
}

fn ai_phase<R: Rng>(board: &mut Board, rng: &mut R) {
    let commanders: Vec<Coord> = board
        .iter()
        .filter(|tile| tile.team > 0)
        .map(|tile| tile.coord)
        .collect();
    for coord in commanders {
        ai::generate_orders(board, coord, rng);
    }
}

/// Collect every pending order into a worklist with its sort key.
///
/// The key orders, ascending: friendly reinforcements before any
/// combat, assaults on undefended or neutral targets before contested
/// ones, smaller commitments before larger ones, then a uniform random
/// tiebreak against positional bias. Keys are computed once from the
/// phase-entry snapshot and never refreshed, so the resolution order is
/// fixed before the first pair mutates anything.
fn build_worklist<R: Rng>(board: &Board, rng: &mut R) -> Vec<WorkItem> {
    let mut worklist = Vec::new();
    for tile in board.iter() {
        for dir in Direction::ALL {
            let committed = tile.pending(dir);
            if committed == 0 {
                continue;
            }
            let Some(defender) = tile.neighbor(dir).and_then(|coord| board.get(coord)) else {
                continue;
            };
            let hostile = u8::from(tile.team != defender.occupier);
            let contested = u8::from(defender.occupier != NEUTRAL && defender.garrison > 0);
            worklist.push(WorkItem {
                source: tile.coord,
                dir,
                key: (hostile, contested, committed, rng.next_u32()),
            });
        }
    }
    worklist
}

fn resolution_phase<R, F>(board: &mut Board, rng: &mut R, on_event: &mut F)
where
    R: Rng,
    F: FnMut(&Board, &BattleEvent),
{
    let mut worklist = build_worklist(board, rng);
    worklist.sort_unstable_by_key(|item| item.key);

    for item in worklist {
        if let Some(event) = combat::apply_attack(board, item.source, item.dir) {
            on_event(board, &event);
        }
    }
}

fn upkeep_phase(board: &mut Board) {
    for tile in board.iter_mut() {
        tile.apply_upkeep();
    }
}

fn sync_phase(board: &mut Board) {
    for tile in board.iter_mut() {
        tile.team = tile.occupier;
    }
}
