//! Garrison commander heuristic for computer-controlled factions.
//!
//! Every commanded tile acts alone: it ranks its neighbors, then splits
//! its garrison across them in fixed shares. All commitments go through
//! the same order submission and clamping as player input, so the
//! heuristic can never move troops a player could not.

use rand::Rng;

use crate::sim::board::{Board, Coord, Direction};
use crate::sim::tile::NEUTRAL;

/// Percent of the entry garrison committed toward each ranked neighbor.
///
/// The shares deliberately oversubscribe (they sum past 100) so a rich
/// tile empties itself; order clamping absorbs the excess. The final
/// zero share is submitted anyway, cancelling any stale order toward
/// the lowest-ranked neighbor.
const GARRISON_SHARES: [u64; 4] = [80, 15, 10, 0];

/// Generate and submit this tile's orders for the coming resolution.
///
/// Neighbors are ranked enemy-held ground first (richest regen, then
/// weakest garrison), then friendly and neutral ground (weakest garrison
/// first, then richest regen), with a random tiebreak. Each rank gets a
/// fixed share of the garrison as it stood when the decision began,
/// clamped by the usual submission rules. A `source` off the board is
/// ignored.
pub fn generate_orders<R: Rng>(board: &mut Board, source: Coord, rng: &mut R) {
    let Some(tile) = board.get(source) else {
        return;
    };
    let team = tile.team;
    let garrison = u64::from(tile.garrison);

    let mut ranked: Vec<(Direction, (u8, i64, i64, u32))> = Vec::with_capacity(4);
    for dir in Direction::ALL {
        let Some(defender) = tile.neighbor(dir).and_then(|coord| board.get(coord)) else {
            continue;
        };
        let enemy = defender.occupier != NEUTRAL && defender.occupier != team;
        let regen = i64::from(defender.effective_regen());
        let strength = i64::from(defender.garrison);
        let key = if enemy {
            (0, -regen, strength, rng.next_u32())
        } else {
            (1, strength, -regen, rng.next_u32())
        };
        ranked.push((dir, key));
    }
    ranked.sort_unstable_by_key(|&(_, key)| key);

    for (rank, (dir, _)) in ranked.into_iter().enumerate() {
        let share = GARRISON_SHARES.get(rank).copied().unwrap_or(0);
        let amount = i32::try_from(garrison * share / 100).unwrap_or(i32::MAX);
        board.submit_order_dir(source, dir, amount).ok();
    }
}
