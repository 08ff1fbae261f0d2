//! Property-based tests for combat resolution and order mechanics.
//!
//! These tests verify the total-attrition resolver, the order
//! submission envelope, and whole-turn bookkeeping on arbitrary boards.
//! Run with: cargo test --release prop_sim

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use tessera::sim::{check_invariants, generate_orders, process_turn, resolve};
use tessera::{Board, Coord, Direction, TileProperty};

proptest! {
    // `prop_resolve_winner_losses_bounded` assumes `attackers > defenders`,
    // rejecting roughly half of all generated cases; the default global
    // reject budget (1024) is far too small for 10000 cases, so raise it.
    #![proptest_config(ProptestConfig {
        cases: 10000,
        max_global_rejects: 65536,
        ..ProptestConfig::default()
    })]

    /// Every clash wipes out at least one side, and nobody comes out
    /// stronger than they went in.
    #[test]
    fn prop_resolve_always_total(
        attackers in any::<u32>(),
        defenders in any::<u32>()
    ) {
        let (att, def) = resolve(attackers, defenders);

        prop_assert!(
            att == 0 || def == 0,
            "no clash leaves both sides standing: {} vs {}",
            att, def
        );
        prop_assert!(att <= attackers, "attackers grew: {} -> {}", attackers, att);
        prop_assert!(def <= defenders, "defenders grew: {} -> {}", defenders, def);
    }

    /// Swapping the sides swaps the outcome exactly.
    #[test]
    fn prop_resolve_symmetric(
        attackers in any::<u32>(),
        defenders in any::<u32>()
    ) {
        let (att, def) = resolve(attackers, defenders);
        let (def_rev, att_rev) = resolve(defenders, attackers);

        prop_assert_eq!((att, def), (att_rev, def_rev));
    }

    /// The strictly larger force always wins; equal forces annihilate.
    #[test]
    fn prop_resolve_larger_side_wins(
        attackers in any::<u32>(),
        defenders in any::<u32>()
    ) {
        let (att, def) = resolve(attackers, defenders);

        if attackers > defenders {
            prop_assert!(att > 0, "{} vs {} left no attacker", attackers, defenders);
            prop_assert_eq!(def, 0);
        } else if defenders > attackers {
            prop_assert!(def > 0, "{} vs {} left no defender", attackers, defenders);
            prop_assert_eq!(att, 0);
        } else {
            prop_assert_eq!((att, def), (0, 0));
        }
    }

    /// The winner's losses never exceed the loser's whole force: with
    /// `a > b`, survivors land in `[a - b, a]`. The square law only
    /// sharpens this, it never spends more than one-for-one.
    #[test]
    fn prop_resolve_winner_losses_bounded(
        attackers in any::<u32>(),
        defenders in any::<u32>()
    ) {
        prop_assume!(attackers > defenders);
        let (att, _) = resolve(attackers, defenders);

        prop_assert!(
            att >= attackers - defenders,
            "{} vs {}: {} survivors is below the floor",
            attackers, defenders, att
        );
        prop_assert!(att <= attackers);
    }

    /// Reinforcing an attack never hurts it: survivors are monotonic in
    /// the attacking force.
    #[test]
    fn prop_resolve_monotonic_in_strength(
        base in any::<u32>(),
        extra in any::<u32>(),
        defenders in any::<u32>()
    ) {
        let (small, _) = resolve(base, defenders);
        let (large, _) = resolve(base.saturating_add(extra), defenders);

        prop_assert!(
            large >= small,
            "adding {} troops cut survivors {} -> {}",
            extra, small, large
        );
    }

    /// Submitted orders stay inside the legal envelope no matter what
    /// amount is asked for: pending never exceeds the target's movement
    /// cap and no troops leak between garrison and order.
    #[test]
    fn prop_order_submission_stays_in_envelope(
        garrison in 0u32..1_000_000,
        first in any::<i32>(),
        second in any::<i32>(),
        mountains in 0usize..4
    ) {
        let mut board = Board::new(2, 1).unwrap();
        board.get_mut(Coord::new(0, 0)).unwrap().garrison = garrison;
        for _ in 0..mountains {
            board
                .get_mut(Coord::new(1, 0))
                .unwrap()
                .assigned
                .push(TileProperty::MOUNTAINS);
        }
        let cap =
            u32::try_from(board.get(Coord::new(1, 0)).unwrap().effective_maxmove().max(0)).unwrap();

        for amount in [first, second] {
            board
                .submit_order_dir(Coord::new(0, 0), Direction::Right, amount)
                .unwrap();

            let tile = board.get(Coord::new(0, 0)).unwrap();
            let pending = tile.pending(Direction::Right);
            prop_assert!(
                pending <= cap,
                "order {} exceeds the cap {} after submitting {}",
                pending, cap, amount
            );
            prop_assert_eq!(
                u64::from(tile.garrison) + u64::from(pending),
                u64::from(garrison),
                "troops leaked submitting {}",
                amount
            );
        }
    }

    /// A zero submission is the cancel sentinel: whatever stood before,
    /// the order clears and the garrison is made whole.
    #[test]
    fn prop_cancel_restores_the_garrison(
        garrison in 0u32..1_000_000,
        amount in any::<i32>()
    ) {
        let mut board = Board::new(2, 1).unwrap();
        board.get_mut(Coord::new(0, 0)).unwrap().garrison = garrison;

        board
            .submit_order_dir(Coord::new(0, 0), Direction::Right, amount)
            .unwrap();
        board
            .submit_order_dir(Coord::new(0, 0), Direction::Right, 0)
            .unwrap();

        let tile = board.get(Coord::new(0, 0)).unwrap();
        prop_assert_eq!(tile.pending(Direction::Right), 0);
        prop_assert_eq!(tile.garrison, garrison);
    }

    /// The commander heuristic moves troops only through the same
    /// clamped submissions as a player: nothing is minted, nothing
    /// oversteps the per-neighbor cap.
    #[test]
    fn prop_ai_orders_conserve_the_garrison(
        garrison in 0u32..1_000_000,
        team in 1i16..4,
        neighbors in prop::collection::vec((-1i16..4, 0u32..100), 4),
        seed in any::<u64>()
    ) {
        let mut board = Board::new(3, 3).unwrap();
        let center = Coord::new(1, 1);
        {
            let tile = board.get_mut(center).unwrap();
            tile.team = team;
            tile.occupier = team;
            tile.garrison = garrison;
        }
        for (dir, &(other_team, other_garrison)) in Direction::ALL.iter().zip(&neighbors) {
            let coord = board.get(center).unwrap().neighbor(*dir).unwrap();
            let tile = board.get_mut(coord).unwrap();
            tile.team = other_team;
            tile.occupier = other_team;
            tile.garrison = other_garrison;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        generate_orders(&mut board, center, &mut rng);

        let tile = board.get(center).unwrap();
        let mut committed = 0_u64;
        for dir in Direction::ALL {
            let pending = tile.pending(dir);
            prop_assert!(pending <= 15, "order {} oversteps the bare-ground cap", pending);
            committed += u64::from(pending);
        }
        prop_assert_eq!(
            u64::from(tile.garrison) + committed,
            u64::from(garrison),
            "the heuristic minted or lost troops"
        );
    }

    /// Upkeep follows the clamp-then-regen contract exactly: the
    /// garrison drops to the supply cap first, then grows by regen only
    /// on owned ground with non-negative regen.
    #[test]
    fn prop_upkeep_clamps_then_regenerates(
        garrison in 0u32..1_000_000,
        team in -1i16..4,
        stack in prop::collection::vec(0usize..7, 0..5),
        seed in any::<u64>()
    ) {
        let mut board = Board::new(1, 1).unwrap();
        {
            let tile = board.get_mut(Coord::new(0, 0)).unwrap();
            tile.team = team;
            tile.occupier = team;
            tile.garrison = garrison;
            for &index in &stack {
                tile.assigned.push(TileProperty::CATALOG[index]);
            }
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        process_turn(&mut board, &mut rng, |_, _| {});

        let tile = board.get(Coord::new(0, 0)).unwrap();
        let cap = u32::try_from(tile.effective_maxsup().max(0)).unwrap();
        let regen = tile.effective_regen();
        let mut expected = garrison.min(cap);
        if regen >= 0 && team >= 0 {
            expected = expected.saturating_add(u32::try_from(regen).unwrap());
        }

        prop_assert_eq!(
            tile.garrison, expected,
            "garrison {} with cap {} and regen {} on team {}",
            garrison, cap, regen, team
        );
    }

    /// From at or above the supply cap, upkeep is a fixed point: the
    /// clamp re-absorbs the regen tick, so a second pass lands exactly
    /// where the first did.
    #[test]
    fn prop_upkeep_idempotent_once_clamped(
        garrison in 0u32..1_000_000,
        team in -1i16..4,
        stack in prop::collection::vec(0usize..7, 0..5)
    ) {
        let mut board = Board::new(1, 1).unwrap();
        let coord = Coord::new(0, 0);
        {
            let tile = board.get_mut(coord).unwrap();
            tile.team = team;
            tile.occupier = team;
            for &index in &stack {
                tile.assigned.push(TileProperty::CATALOG[index]);
            }
            let cap = u32::try_from(tile.effective_maxsup().max(0)).unwrap();
            tile.garrison = garrison.max(cap);
        }

        let mut once = board.get(coord).unwrap().clone();
        once.apply_upkeep();
        let mut twice = once.clone();
        twice.apply_upkeep();

        prop_assert_eq!(once.garrison, twice.garrison);
    }

    /// A full turn on an arbitrary board leaves it at rest: every
    /// invariant holds and no pending order survives resolution.
    #[test]
    fn prop_turn_leaves_the_board_at_rest(
        width in 1u16..8,
        height in 1u16..8,
        seats in prop::collection::vec((0u16..8, 0u16..8, -1i16..4, 0u32..500), 0..6),
        orders in prop::collection::vec((0u16..8, 0u16..8, 0usize..4, any::<i32>()), 0..8),
        seed in any::<u64>()
    ) {
        let mut board = Board::new(width, height).unwrap();
        for &(x, y, team, garrison) in &seats {
            let coord = Coord::new(x, y);
            if let Some(tile) = board.get_mut(coord) {
                tile.team = team;
                tile.occupier = team;
                tile.garrison = garrison;
            }
        }
        for &(x, y, slot, amount) in &orders {
            // Off-board sources are rejected; that is fine here.
            board
                .submit_order_dir(Coord::new(x, y), Direction::ALL[slot], amount)
                .ok();
        }

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        process_turn(&mut board, &mut rng, |_, _| {});

        let violations = check_invariants(&board);
        prop_assert!(violations.is_empty(), "{:?}", violations);
        for tile in board.iter() {
            for dir in Direction::ALL {
                prop_assert_eq!(
                    tile.pending(dir), 0,
                    "stale order at {:?} {:?}",
                    tile.coord, dir
                );
            }
        }
    }

    /// Without terrain there is no regen, so a turn can only move or
    /// destroy troops, never create them.
    #[test]
    fn prop_bare_turn_never_mints_troops(
        width in 1u16..8,
        height in 1u16..8,
        seats in prop::collection::vec((0u16..8, 0u16..8, -1i16..4, 0u32..500), 0..6),
        orders in prop::collection::vec((0u16..8, 0u16..8, 0usize..4, 0i32..500), 0..8),
        seed in any::<u64>()
    ) {
        let mut board = Board::new(width, height).unwrap();
        for &(x, y, team, garrison) in &seats {
            let coord = Coord::new(x, y);
            if let Some(tile) = board.get_mut(coord) {
                tile.team = team;
                tile.occupier = team;
                tile.garrison = garrison;
            }
        }
        for &(x, y, slot, amount) in &orders {
            board
                .submit_order_dir(Coord::new(x, y), Direction::ALL[slot], amount)
                .ok();
        }

        let before: u64 = board
            .iter()
            .map(|tile| {
                u64::from(tile.garrison)
                    + Direction::ALL
                        .iter()
                        .map(|&dir| u64::from(tile.pending(dir)))
                        .sum::<u64>()
            })
            .sum();

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        process_turn(&mut board, &mut rng, |_, _| {});

        let after: u64 = board.iter().map(|tile| u64::from(tile.garrison)).sum();
        prop_assert!(after <= before, "troops grew {} -> {}", before, after);
    }
}
