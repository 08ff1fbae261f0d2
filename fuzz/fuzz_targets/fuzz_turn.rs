#![no_main]

//! Whole-turn fuzzer.
//!
//! Drives arbitrary boards through several complete turns: seeded
//! setup, player-style submissions, then the four-phase processor with
//! its heuristic factions. Catches integration bugs the
//! single-engagement fuzzer misses, and checks the at-rest invariants
//! after every turn.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tessera::sim::{check_invariants, process_turn};
use tessera::{Board, Coord, Direction, TileProperty};

/// Structured input for full-turn fuzzing.
#[derive(Arbitrary, Debug)]
struct TurnInput {
    /// Board width (wrapped into a small range).
    width: u8,
    /// Board height (wrapped into a small range).
    height: u8,
    /// Tiles to hand to a faction: position, team, garrison.
    seats: Vec<(u8, u8, i8, u32)>,
    /// Terrain to stack: position, catalog pick.
    terrain: Vec<(u8, u8, u8)>,
    /// Standing orders re-submitted each turn: position, slot, amount.
    orders: Vec<(u8, u8, u8, i32)>,
    /// Seed for the turn processor's randomness.
    seed: u64,
    /// Number of turns to run.
    turns: u8,
}

fuzz_target!(|input: TurnInput| {
    let width = u16::from(input.width % 10) + 1;
    let height = u16::from(input.height % 10) + 1;
    let Some(mut board) = Board::new(width, height) else {
        return;
    };

    for &(x, y, team, garrison) in input.seats.iter().take(12) {
        let coord = Coord::new(u16::from(x) % width, u16::from(y) % height);
        if let Some(tile) = board.get_mut(coord) {
            tile.team = i16::from(team.max(-1));
            tile.occupier = tile.team;
            tile.garrison = garrison.min(1_000_000);
        }
    }
    for &(x, y, pick) in input.terrain.iter().take(12) {
        let coord = Coord::new(u16::from(x) % width, u16::from(y) % height);
        if let Some(tile) = board.get_mut(coord) {
            let index = usize::from(pick) % TileProperty::CATALOG.len();
            tile.assigned.push(TileProperty::CATALOG[index]);
        }
    }

    let violations = check_invariants(&board);
    assert!(
        violations.is_empty(),
        "invariants violated at setup: {violations:?}"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(input.seed);
    let turns = (input.turns % 8).max(1);
    for turn in 0..turns {
        // Keep adjusting standing orders between resolutions, the way
        // a player would.
        for &(x, y, slot, amount) in input.orders.iter().take(24) {
            let coord = Coord::new(u16::from(x) % width, u16::from(y) % height);
            let dir = Direction::ALL[usize::from(slot) % Direction::ALL.len()];
            board.submit_order_dir(coord, dir, amount).unwrap();
        }

        process_turn(&mut board, &mut rng, |_, _| {});

        let violations = check_invariants(&board);
        assert!(
            violations.is_empty(),
            "invariants violated after turn {turn}: {violations:?}"
        );
        for tile in board.iter() {
            for dir in Direction::ALL {
                assert_eq!(
                    tile.pending(dir),
                    0,
                    "stale order at {:?} after turn {turn}",
                    tile.coord
                );
            }
        }
    }

    // Regen is bounded per tile per turn, so totals stay small.
    let total: u64 = board.iter().map(|t| u64::from(t.garrison)).sum();
    assert!(total < 100_000_000, "total garrison {total} ran away");
});
