//! Tile state: ownership, garrison, terrain stacking, pending orders.

use crate::sim::board::{Coord, Direction};
use crate::sim::terrain::TileProperty;

/// Faction identifier.
///
/// `-1` marks neutral/unclaimed ground, `0` is the primary (player)
/// faction, positive ids are computer-controlled factions.
pub type TeamId = i16;

/// The neutral/unclaimed faction id.
pub const NEUTRAL: TeamId = -1;

/// Resource counters carried on a tile.
///
/// Not consumed by combat or upkeep; tracked for scenario scripting and
/// future economy rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stockpile {
    /// Food stores.
    pub food: i32,
    /// Timber stores.
    pub wood: i32,
    /// Iron stores.
    pub iron: i32,
    /// Gold reserves.
    pub gold: i32,
}

/// A single cell of the board.
///
/// `team` and `occupier` normally agree; they diverge only between a
/// capture during turn resolution and that turn's closing sync, which is
/// a visible mechanic (a freshly taken tile keeps its old colors until
/// the turn ends), not an implementation accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Position on the board, fixed at construction.
    pub coord: Coord,
    /// Faction this tile counts for. Lags `occupier` within a turn.
    pub team: TeamId,
    /// De-facto controller; updated immediately on capture.
    pub occupier: TeamId,
    /// Troops stationed here, available to commit or defend.
    pub garrison: u32,
    /// Inert resource counters.
    pub stockpile: Stockpile,
    /// Terrain properties stacked on this tile, in assignment order.
    pub assigned: Vec<TileProperty>,
    /// Neighbor handles in direction order; `None` at a board edge.
    pub(crate) neighbors: [Option<Coord>; 4],
    /// Troops committed toward each neighbor, by direction.
    pub(crate) orders: [u32; 4],
}

impl Tile {
    /// Create a neutral, empty tile with pre-wired neighbor handles.
    pub(crate) const fn new(coord: Coord, neighbors: [Option<Coord>; 4]) -> Self {
        Self {
            coord,
            team: NEUTRAL,
            occupier: NEUTRAL,
            garrison: 0,
            stockpile: Stockpile {
                food: 0,
                wood: 0,
                iron: 0,
                gold: 0,
            },
            assigned: Vec::new(),
            neighbors,
            orders: [0; 4],
        }
    }

    /// The neighbor coordinate in the given direction, if any.
    #[must_use]
    pub const fn neighbor(&self, dir: Direction) -> Option<Coord> {
        self.neighbors[dir.index()]
    }

    /// Troops currently committed toward the neighbor in `dir`.
    #[must_use]
    pub const fn pending(&self, dir: Direction) -> u32 {
        self.orders[dir.index()]
    }

    pub(crate) fn set_pending(&mut self, dir: Direction, troops: u32) {
        self.orders[dir.index()] = troops;
    }

    pub(crate) fn clear_pending(&mut self, dir: Direction) {
        self.orders[dir.index()] = 0;
    }

    /// Garrison growth per upkeep phase: baseline plus stacked deltas.
    #[must_use]
    pub fn effective_regen(&self) -> i32 {
        self.assigned
            .iter()
            .fold(TileProperty::BASELINE.regen, |acc, p| {
                acc.saturating_add(p.regen)
            })
    }

    /// Defensive strength bonus: baseline plus stacked deltas.
    #[must_use]
    pub fn effective_defence(&self) -> i32 {
        self.assigned
            .iter()
            .fold(TileProperty::BASELINE.defence, |acc, p| {
                acc.saturating_add(p.defence)
            })
    }

    /// Cap on troops committable toward this tile. Can go negative under
    /// hostile terrain stacking; callers clamp at zero.
    #[must_use]
    pub fn effective_maxmove(&self) -> i32 {
        self.assigned
            .iter()
            .fold(TileProperty::BASELINE.maxmove, |acc, p| {
                acc.saturating_add(p.maxmove)
            })
    }

    /// Garrison supply cap enforced at upkeep. Can go negative under
    /// hostile terrain stacking; callers clamp at zero.
    #[must_use]
    pub fn effective_maxsup(&self) -> i32 {
        self.assigned
            .iter()
            .fold(TileProperty::BASELINE.maxsup, |acc, p| {
                acc.saturating_add(p.maxsup)
            })
    }

    /// Commit (or withdraw) troops toward the neighbor in `dir`.
    ///
    /// `amount` is clamped into `[-pending, garrison]`; an `amount` of
    /// exactly zero is the cancel sentinel and withdraws the whole
    /// standing order. The resulting order is further capped at the
    /// target's effective movement limit (`target_maxmove`, clamped at
    /// zero). Anything un-satisfiable degrades to the nearest legal
    /// order, possibly a no-op; garrison and order stay nonnegative.
    pub(crate) fn submit_order(&mut self, dir: Direction, amount: i32, target_maxmove: i32) {
        let committed = i64::from(self.orders[dir.index()]);
        let garrison = i64::from(self.garrison);

        let mut delta = i64::from(amount);
        if delta > garrison {
            delta = garrison;
        } else if delta == 0 || delta < -committed {
            delta = -committed;
        }

        let cap = i64::from(target_maxmove).max(0);
        if committed + delta > cap {
            delta = cap - committed;
        }

        self.orders[dir.index()] = clamp_troops(committed + delta);
        self.garrison = clamp_troops(garrison - delta);
    }

    /// Apply end-of-turn upkeep: clamp the garrison down to the supply
    /// cap, then grow it by regen on owned, non-decaying terrain.
    ///
    /// Negative regen never drains a garrison by itself; it only bites
    /// through the supply cap and combat interactions.
    pub fn apply_upkeep(&mut self) {
        let cap = clamp_troops(i64::from(self.effective_maxsup()));
        if self.garrison > cap {
            self.garrison = cap;
        }

        let regen = self.effective_regen();
        if regen >= 0 && self.team >= 0 {
            self.garrison = self
                .garrison
                .saturating_add(u32::try_from(regen).unwrap_or(0));
        }
    }
}

/// Clamp a signed troop quantity into the representable range.
pub(crate) fn clamp_troops(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lone_tile() -> Tile {
        Tile::new(Coord::new(0, 0), [None; 4])
    }

    #[test]
    fn test_new_tile_is_neutral_and_empty() {
        let tile = lone_tile();
        assert_eq!(tile.team, NEUTRAL);
        assert_eq!(tile.occupier, NEUTRAL);
        assert_eq!(tile.garrison, 0);
        assert_eq!(tile.stockpile, Stockpile::default());
        for dir in Direction::ALL {
            assert_eq!(tile.pending(dir), 0);
            assert_eq!(tile.neighbor(dir), None);
        }
    }

    #[test]
    fn test_effective_attributes_are_baseline_when_unassigned() {
        let tile = lone_tile();
        assert_eq!(tile.effective_regen(), 0);
        assert_eq!(tile.effective_defence(), 0);
        assert_eq!(tile.effective_maxmove(), 15);
        assert_eq!(tile.effective_maxsup(), 20);
    }

    #[test]
    fn test_effective_attributes_stack_additively() {
        let mut tile = lone_tile();
        tile.assigned.push(TileProperty::HILLS);
        tile.assigned.push(TileProperty::FOREST);
        // Hills: defence +4, maxmove -5, maxsup -5. Forest: +2, -3, 0.
        assert_eq!(tile.effective_defence(), 6);
        assert_eq!(tile.effective_maxmove(), 7);
        assert_eq!(tile.effective_maxsup(), 15);
    }

    #[test]
    fn test_stacking_can_drive_caps_negative() {
        let mut tile = lone_tile();
        tile.assigned.push(TileProperty::MOUNTAINS);
        tile.assigned.push(TileProperty::MOUNTAINS);
        tile.assigned.push(TileProperty::MARSH);
        assert_eq!(tile.effective_maxmove(), -11);
    }

    #[test]
    fn test_submit_order_commits_and_debits_garrison() {
        let mut tile = lone_tile();
        tile.garrison = 10;
        tile.submit_order(Direction::Up, 4, 15);
        assert_eq!(tile.pending(Direction::Up), 4);
        assert_eq!(tile.garrison, 6);
    }

    #[test]
    fn test_submit_order_clamps_to_garrison() {
        let mut tile = lone_tile();
        tile.garrison = 3;
        tile.submit_order(Direction::Left, 99, 15);
        assert_eq!(tile.pending(Direction::Left), 3);
        assert_eq!(tile.garrison, 0);
    }

    #[test]
    fn test_submit_order_zero_is_withdraw_all_sentinel() {
        let mut tile = lone_tile();
        tile.garrison = 10;
        tile.submit_order(Direction::Down, 7, 15);
        assert_eq!(tile.garrison, 3);

        tile.submit_order(Direction::Down, 0, 15);
        assert_eq!(tile.pending(Direction::Down), 0);
        assert_eq!(tile.garrison, 10);
    }

    #[test]
    fn test_submit_order_partial_withdraw() {
        let mut tile = lone_tile();
        tile.garrison = 10;
        tile.submit_order(Direction::Right, 8, 15);
        tile.submit_order(Direction::Right, -3, 15);
        assert_eq!(tile.pending(Direction::Right), 5);
        assert_eq!(tile.garrison, 5);
    }

    #[test]
    fn test_submit_order_overdrawn_withdraw_clamps_to_committed() {
        let mut tile = lone_tile();
        tile.garrison = 10;
        tile.submit_order(Direction::Right, 4, 15);
        tile.submit_order(Direction::Right, -100, 15);
        assert_eq!(tile.pending(Direction::Right), 0);
        assert_eq!(tile.garrison, 10);
    }

    #[test]
    fn test_submit_order_respects_target_maxmove() {
        let mut tile = lone_tile();
        tile.garrison = 30;
        tile.submit_order(Direction::Up, 30, 12);
        assert_eq!(tile.pending(Direction::Up), 12);
        assert_eq!(tile.garrison, 18);

        // Already at the cap; further commitment is refused.
        tile.submit_order(Direction::Up, 5, 12);
        assert_eq!(tile.pending(Direction::Up), 12);
        assert_eq!(tile.garrison, 18);
    }

    #[test]
    fn test_submit_order_negative_maxmove_caps_at_zero() {
        let mut tile = lone_tile();
        tile.garrison = 10;
        tile.submit_order(Direction::Up, 5, -7);
        assert_eq!(tile.pending(Direction::Up), 0);
        assert_eq!(tile.garrison, 10);
    }

    #[test]
    fn test_submit_order_clamped_positive_does_not_withdraw() {
        // A positive amount clamped down by an empty garrison must not
        // fall through to the withdraw-all sentinel.
        let mut tile = lone_tile();
        tile.garrison = 5;
        tile.submit_order(Direction::Up, 5, 15);
        assert_eq!(tile.garrison, 0);
        assert_eq!(tile.pending(Direction::Up), 5);

        tile.submit_order(Direction::Up, 3, 15);
        assert_eq!(tile.pending(Direction::Up), 5);
        assert_eq!(tile.garrison, 0);
    }

    #[test]
    fn test_apply_upkeep_clamps_then_regenerates() {
        let mut tile = lone_tile();
        tile.team = 0;
        tile.occupier = 0;
        tile.garrison = 50;
        tile.assigned.push(TileProperty::PLAINS);

        // Maxsup 25, regen 2: clamp first, then grow.
        tile.apply_upkeep();
        assert_eq!(tile.garrison, 27);
    }

    #[test]
    fn test_apply_upkeep_skips_neutral_tiles() {
        let mut tile = lone_tile();
        tile.assigned.push(TileProperty::VILLAGE);
        tile.garrison = 5;
        tile.apply_upkeep();
        assert_eq!(tile.garrison, 5);
    }

    #[test]
    fn test_apply_upkeep_negative_regen_never_decays() {
        let mut tile = lone_tile();
        tile.team = 1;
        tile.occupier = 1;
        tile.garrison = 8;
        tile.assigned.push(TileProperty::MOUNTAINS);
        tile.apply_upkeep();
        assert_eq!(tile.garrison, 8);
    }

    #[test]
    fn test_apply_upkeep_negative_maxsup_empties_garrison() {
        let mut tile = lone_tile();
        tile.team = 1;
        tile.occupier = 1;
        tile.garrison = 8;
        tile.assigned.push(TileProperty::MOUNTAINS);
        tile.assigned.push(TileProperty::MOUNTAINS);
        tile.assigned.push(TileProperty::MARSH);
        assert!(tile.effective_maxsup() < 0);
        tile.apply_upkeep();
        assert_eq!(tile.garrison, 0);
    }

    #[test]
    fn test_clamp_troops_bounds() {
        assert_eq!(clamp_troops(-5), 0);
        assert_eq!(clamp_troops(0), 0);
        assert_eq!(clamp_troops(42), 42);
        assert_eq!(clamp_troops(i64::from(u32::MAX) + 1), u32::MAX);
    }
}
