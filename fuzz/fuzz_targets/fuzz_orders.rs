#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera::sim::check_invariants;
use tessera::{Board, Coord, Direction, TileProperty};

/// Structured input for order submission fuzzing.
#[derive(Arbitrary, Debug)]
struct OrdersInput {
    /// Board width (wrapped into a small range).
    width: u8,
    /// Board height (wrapped into a small range).
    height: u8,
    /// Tiles to hand to a faction: position, team, garrison.
    seats: Vec<(u8, u8, i8, u32)>,
    /// Terrain to stack: position, catalog pick.
    terrain: Vec<(u8, u8, u8)>,
    /// Submissions to attempt: position, direction slot, amount.
    orders: Vec<(u8, u8, u8, i32)>,
}

fuzz_target!(|input: OrdersInput| {
    let width = u16::from(input.width % 12) + 1;
    let height = u16::from(input.height % 12) + 1;
    let Some(mut board) = Board::new(width, height) else {
        return;
    };

    for &(x, y, team, garrison) in input.seats.iter().take(16) {
        let coord = Coord::new(u16::from(x) % width, u16::from(y) % height);
        if let Some(tile) = board.get_mut(coord) {
            tile.team = i16::from(team.max(-1));
            tile.occupier = tile.team;
            tile.garrison = garrison.min(1_000_000);
        }
    }
    for &(x, y, pick) in input.terrain.iter().take(16) {
        let coord = Coord::new(u16::from(x) % width, u16::from(y) % height);
        if let Some(tile) = board.get_mut(coord) {
            let index = usize::from(pick) % TileProperty::CATALOG.len();
            tile.assigned.push(TileProperty::CATALOG[index]);
        }
    }

    // Orders have not been placed yet, so the totals are garrisons only.
    let total_before: u64 = board.iter().map(|t| u64::from(t.garrison)).sum();

    for &(x, y, slot, amount) in input.orders.iter().take(32) {
        let coord = Coord::new(u16::from(x) % width, u16::from(y) % height);
        let dir = Direction::ALL[usize::from(slot) % Direction::ALL.len()];
        // Sources are wrapped into bounds, so submission cannot fail.
        board.submit_order_dir(coord, dir, amount).unwrap();
    }

    // Submissions only shuffle troops between garrison and orders.
    let total_after: u64 = board
        .iter()
        .map(|tile| {
            u64::from(tile.garrison)
                + Direction::ALL
                    .iter()
                    .map(|&dir| u64::from(tile.pending(dir)))
                    .sum::<u64>()
        })
        .sum();
    assert_eq!(
        total_before, total_after,
        "submissions minted or lost troops"
    );

    // Every standing order must already respect the at-rest rules.
    let violations = check_invariants(&board);
    assert!(
        violations.is_empty(),
        "invariants violated after submissions: {violations:?}"
    );
});
