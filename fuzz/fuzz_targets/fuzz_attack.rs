#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera::sim::apply_attack;
use tessera::{BattleEvent, Board, Coord, Direction, TileProperty};

/// Structured input for a single engagement between adjacent tiles.
#[derive(Arbitrary, Debug)]
struct AttackInput {
    /// Attacking tile's faction.
    attacker_team: i8,
    /// Defending tile's faction.
    defender_team: i8,
    /// Garrison on the attacking tile.
    attacker_garrison: u32,
    /// Garrison on the defending tile.
    defender_garrison: u32,
    /// Amount submitted toward the defender.
    committed: i32,
    /// Amount the defender submits back at the attacker.
    counter: i32,
    /// Terrain stacked on the defending tile.
    terrain: Vec<u8>,
}

fn total(board: &Board) -> u64 {
    board
        .iter()
        .map(|tile| {
            u64::from(tile.garrison)
                + Direction::ALL
                    .iter()
                    .map(|&dir| u64::from(tile.pending(dir)))
                    .sum::<u64>()
        })
        .sum()
}

fuzz_target!(|input: AttackInput| {
    let mut board = Board::new(2, 1).unwrap();
    let source = Coord::new(0, 0);
    let target = Coord::new(1, 0);

    let attacker_team = i16::from(input.attacker_team.max(-1));
    let defender_team = i16::from(input.defender_team.max(-1));
    {
        let tile = board.get_mut(source).unwrap();
        tile.team = attacker_team;
        tile.occupier = attacker_team;
        tile.garrison = input.attacker_garrison.min(1_000_000);
    }
    {
        let tile = board.get_mut(target).unwrap();
        tile.team = defender_team;
        tile.occupier = defender_team;
        tile.garrison = input.defender_garrison.min(1_000_000);
        for &pick in input.terrain.iter().take(4) {
            let index = usize::from(pick) % TileProperty::CATALOG.len();
            tile.assigned.push(TileProperty::CATALOG[index]);
        }
    }

    board
        .submit_order_dir(source, Direction::Right, input.committed)
        .unwrap();
    board
        .submit_order_dir(target, Direction::Left, input.counter)
        .unwrap();

    let before = total(&board);
    let defender_before = board.get(target).unwrap().garrison;

    // Must not panic for any setup; the tiles are adjacent by
    // construction so an event always comes back.
    let event = apply_attack(&mut board, source, Direction::Right).unwrap();

    let after = total(&board);
    assert!(
        after <= before,
        "engagement minted troops: {before} -> {after}"
    );

    // The reported event must agree with the board it left behind.
    let source_tile = board.get(source).unwrap();
    let target_tile = board.get(target).unwrap();
    match event {
        BattleEvent::Reinforce { .. } => {
            assert_eq!(target_tile.occupier, attacker_team);
            assert_eq!(source_tile.pending(Direction::Right), 0);
        }
        BattleEvent::Skirmish { .. } => {
            assert_eq!(source_tile.pending(Direction::Right), 0);
            assert_eq!(target_tile.garrison, defender_before);
            assert_eq!(target_tile.occupier, defender_team);
        }
        BattleEvent::Repelled { defenders, .. } => {
            assert!(defenders > 0);
            assert!(defenders <= defender_before);
            assert_eq!(target_tile.garrison, defenders);
            assert_eq!(
                target_tile.occupier, defender_team,
                "a repelled assault must not flip the tile"
            );
            assert_eq!(source_tile.pending(Direction::Right), 0);
        }
        BattleEvent::Captured { garrison, .. } => {
            assert!(garrison > 0);
            assert_eq!(target_tile.occupier, attacker_team);
            assert_eq!(target_tile.garrison, garrison);
            assert_eq!(
                target_tile.team, defender_team,
                "the team field lags until the end-of-turn sync"
            );
            assert_eq!(source_tile.pending(Direction::Right), 0);
        }
        BattleEvent::Razed { .. } => {
            assert_eq!(target_tile.garrison, 0);
            assert_eq!(
                target_tile.occupier, defender_team,
                "razing leaves ownership untouched"
            );
            assert_eq!(source_tile.pending(Direction::Right), 0);
        }
    }
});
