//! Headless match runner.
//!
//! Provides a pure function interface: `(scenario, seed, config) -> MatchResult`
//!
//! The runner handles:
//! - Seeded scenario construction
//! - Autopilot for the player faction, which would otherwise idle
//! - Turn processing until one faction stands alone or the cap is hit
//! - Standings aggregation and winner determination

use std::cmp::Reverse;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scenario::Scenario;
use crate::sim::{Board, Coord, TeamId, assert_invariants, generate_orders, process_turn};

/// Configuration for a headless match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Maximum turns before the match is scored as it stands.
    pub max_turns: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self { max_turns: 200 }
    }
}

/// One faction's position in the final accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamStanding {
    /// Faction identifier.
    pub team: TeamId,
    /// Tiles counting for the faction.
    pub tiles: u32,
    /// Troops garrisoned across those tiles.
    pub troops: u64,
}

/// Final result of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// The winning faction (`None` for a dead heat or total ruin).
    pub winner: Option<TeamId>,
    /// Turns actually played.
    pub turns: u32,
    /// One row per faction seated at the start, wiped factions included.
    pub standings: Vec<TeamStanding>,
    /// The seed the match was built and played from.
    pub seed: u64,
}

/// Run a complete match with the given scenario and seed.
///
/// This is the main entry point - a pure function from inputs to result.
/// The player faction is flown by the same heuristic as the computer
/// factions so headless matches are contested from both sides.
///
/// # Determinism
///
/// Given the same scenario, seed, and configuration, this function
/// always produces the same `MatchResult`.
#[must_use]
pub fn run_match(scenario: Scenario, seed: u64, config: &MatchConfig) -> MatchResult {
    let mut board = scenario.build(seed);
    let teams = factions(&board);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut turns = 0;
    while turns < config.max_turns && !decided(&board, &teams) {
        autopilot(&mut board, &mut rng);
        process_turn(&mut board, &mut rng, |_, _| {});
        assert_invariants(&board);
        turns += 1;
    }

    let standings = standings(&board, &teams);
    MatchResult {
        winner: winner(&standings),
        turns,
        standings,
        seed,
    }
}

/// Every faction seated on the board, ascending, neutral excluded.
#[must_use]
pub fn factions(board: &Board) -> Vec<TeamId> {
    let mut teams: Vec<TeamId> = board.iter().map(|t| t.team).filter(|&t| t >= 0).collect();
    teams.sort_unstable();
    teams.dedup();
    teams
}

/// Current tile and troop holdings for the given factions.
#[must_use]
pub fn standings(board: &Board, teams: &[TeamId]) -> Vec<TeamStanding> {
    teams
        .iter()
        .map(|&team| {
            let mut tiles = 0;
            let mut troops = 0_u64;
            for tile in board.tiles_held_by(team) {
                tiles += 1;
                troops += u64::from(tile.garrison);
            }
            TeamStanding {
                team,
                tiles,
                troops,
            }
        })
        .collect()
}

/// Submit heuristic orders for the player faction's tiles.
fn autopilot<R: Rng>(board: &mut Board, rng: &mut R) {
    let commanders: Vec<Coord> = board.tiles_held_by(0).map(|tile| tile.coord).collect();
    for coord in commanders {
        generate_orders(board, coord, rng);
    }
}

/// A match is decided once at most one faction still holds ground.
fn decided(board: &Board, teams: &[TeamId]) -> bool {
    let alive = teams
        .iter()
        .filter(|&&team| board.tiles_held_by(team).next().is_some())
        .count();
    alive <= 1
}

/// Pick the winner: most tiles, then most troops, else a draw.
#[must_use]
pub fn winner(standings: &[TeamStanding]) -> Option<TeamId> {
    let mut ordered: Vec<&TeamStanding> = standings.iter().filter(|s| s.tiles > 0).collect();
    ordered.sort_by_key(|s| (Reverse(s.tiles), Reverse(s.troops), s.team));
    match ordered.as_slice() {
        [] => None,
        [only] => Some(only.team),
        [first, second, ..] => {
            if first.tiles > second.tiles || first.troops > second.troops {
                Some(first.team)
            } else {
                None
            }
        }
    }
}
