//! Total-attrition combat resolution.
//!
//! One clash always wipes out the weaker side. The stronger side's
//! losses scale with the square of the weaker side: a force with a large
//! numerical edge loses disproportionately little, so consolidation is
//! rewarded and trickle attacks are punished.

use std::cmp::Ordering;

use crate::sim::board::{Board, Coord, Direction};
use crate::sim::tile::clamp_troops;

/// Resolve a clash between two opposed troop counts.
///
/// Pure and symmetric under side exchange: equal forces annihilate each
/// other, otherwise the larger force survives with
/// `larger - smaller^2 / larger` troops (integer division) and the
/// smaller force is destroyed.
#[must_use]
pub fn resolve(attackers: u32, defenders: u32) -> (u32, u32) {
    match attackers.cmp(&defenders) {
        Ordering::Equal => (0, 0),
        Ordering::Greater => {
            // defenders^2 can overflow u32; widen before dividing.
            let attack = u64::from(attackers);
            let defence = u64::from(defenders);
            let survivors = attack - defence * defence / attack;
            (u32::try_from(survivors).unwrap_or(u32::MAX), 0)
        }
        Ordering::Less => {
            let (winners, losers) = resolve(defenders, attackers);
            (losers, winners)
        }
    }
}

/// Something the resolution phase did that presentation may narrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleEvent {
    /// Committed troops merged into a tile already held by their side.
    Reinforce {
        /// Tile the troops marched from.
        from: Coord,
        /// Tile that absorbed them.
        to: Coord,
        /// Troop count transferred.
        troops: u32,
    },
    /// Opposing committed columns met between the tiles and the attack
    /// from `from` was spent before reaching the garrison.
    Skirmish {
        /// Tile whose column was spent.
        from: Coord,
        /// Tile the column was marching on.
        to: Coord,
    },
    /// The defenders absorbed the assault and hold the tile.
    Repelled {
        /// Attacking tile.
        from: Coord,
        /// Defending tile.
        to: Coord,
        /// Garrison left standing after the assault.
        defenders: u32,
    },
    /// The tile fell; surviving attackers garrison it.
    Captured {
        /// Attacking tile.
        from: Coord,
        /// Captured tile.
        to: Coord,
        /// Troops that moved in.
        garrison: u32,
    },
    /// Attack and garrison destroyed each other; the tile lies empty.
    Razed {
        /// Attacking tile.
        from: Coord,
        /// Emptied tile.
        to: Coord,
    },
}

/// Apply the pending order from `source` toward its neighbor in `dir`.
///
/// Covers the whole engagement ladder: reinforcement transfer when the
/// target is already held by the attacker's side (judged by `occupier`,
/// so a tile captured earlier this turn is reinforced, not re-attacked),
/// the mutual border skirmish when both tiles have columns committed at
/// each other, and the assault on the garrison. A defending garrison
/// fights with its terrain defence bonus only while it is nonzero, and
/// the bonus absorbs damage without ever producing net reinforcement.
///
/// Returns `None` when there is no neighbor in that direction, otherwise
/// the event that occurred (used by the turn processor for pacing).
pub fn apply_attack(board: &mut Board, source: Coord, dir: Direction) -> Option<BattleEvent> {
    let (target, committed, attacker_team) = {
        let tile = board.get(source)?;
        (tile.neighbor(dir)?, tile.pending(dir), tile.team)
    };
    let back = dir.opposite();
    let (occupier, garrison, defence, counter) = {
        let tile = board.get(target)?;
        (
            tile.occupier,
            tile.garrison,
            tile.effective_defence(),
            tile.pending(back),
        )
    };

    // Reinforcement: the target is already held by the attacker's side.
    if attacker_team == occupier {
        if let Some(tile) = board.get_mut(target) {
            tile.garrison = tile.garrison.saturating_add(committed);
        }
        if let Some(tile) = board.get_mut(source) {
            tile.clear_pending(dir);
        }
        return Some(BattleEvent::Reinforce {
            from: source,
            to: target,
            troops: committed,
        });
    }

    // Mutual border skirmish: opposing columns meet between the tiles.
    // Survivors become the new pending amounts on both sides.
    let mut committed = committed;
    if committed > 0 && counter > 0 {
        let (attack_left, counter_left) = resolve(committed, counter);
        if let Some(tile) = board.get_mut(source) {
            tile.set_pending(dir, attack_left);
        }
        if let Some(tile) = board.get_mut(target) {
            tile.set_pending(back, counter_left);
        }
        committed = attack_left;
    }
    if committed == 0 {
        // The attacking column was spent between the tiles, either just
        // now or when the opposing pair resolved earlier this phase.
        return Some(BattleEvent::Skirmish {
            from: source,
            to: target,
        });
    }

    // Assault on the garrison. Dug-in defenders fight with their
    // terrain bonus; an empty tile offers none.
    let defended = if garrison > 0 {
        clamp_troops(i64::from(garrison) + i64::from(defence))
    } else {
        0
    };
    let (leftover, survivors) = resolve(committed, defended);
    let survivors = survivors.min(garrison);

    if survivors > 0 {
        if let Some(tile) = board.get_mut(target) {
            tile.garrison = survivors;
        }
        if let Some(tile) = board.get_mut(source) {
            tile.set_pending(dir, leftover);
        }
        Some(BattleEvent::Repelled {
            from: source,
            to: target,
            defenders: survivors,
        })
    } else if leftover > 0 {
        // Capture: the occupier flips now, the team field follows at
        // the end-of-turn sync.
        if let Some(tile) = board.get_mut(target) {
            tile.occupier = attacker_team;
            tile.garrison = leftover;
        }
        if let Some(tile) = board.get_mut(source) {
            tile.clear_pending(dir);
        }
        Some(BattleEvent::Captured {
            from: source,
            to: target,
            garrison: leftover,
        })
    } else {
        if let Some(tile) = board.get_mut(target) {
            tile.garrison = 0;
        }
        if let Some(tile) = board.get_mut(source) {
            tile.clear_pending(dir);
        }
        Some(BattleEvent::Razed {
            from: source,
            to: target,
        })
    }
}

/// Kani formal verification proofs.
///
/// These prove arithmetic safety properties for the resolver.
/// Run with: `cargo kani`
#[cfg(kani)]
mod kani_proofs {
    use super::resolve;

    /// Prove the resolver never panics and always wipes out one side.
    #[kani::proof]
    fn prove_resolver_total_attrition() {
        let a: u32 = kani::any();
        let b: u32 = kani::any();

        let (sa, sb) = resolve(a, b);
        assert!(sa <= a);
        assert!(sb <= b);
        assert!(sa == 0 || sb == 0);
    }

    /// Prove symmetry under side exchange.
    #[kani::proof]
    fn prove_resolver_symmetry() {
        let a: u32 = kani::any();
        let b: u32 = kani::any();

        let (sa, sb) = resolve(a, b);
        let (sb2, sa2) = resolve(b, a);
        assert!(sa == sa2);
        assert!(sb == sb2);
    }
}
