//! Output formatting utilities for CLI.

use serde::Serialize;
use tessera::TeamId;
use tessera::runner::MatchResult;

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult {
    /// Random seed used.
    pub(super) seed: u64,
    /// Winning faction id (null for a draw).
    pub(super) winner: Option<TeamId>,
    /// Total turns played.
    pub(super) turns: u32,
    /// Per-faction standings.
    pub(super) teams: Vec<JsonTeamStanding>,
}

/// JSON-serializable faction standing.
#[derive(Debug, Serialize)]
pub(super) struct JsonTeamStanding {
    /// Faction id.
    pub(super) team: TeamId,
    /// Tiles held at match end.
    pub(super) tiles: u32,
    /// Troops garrisoned at match end.
    pub(super) troops: u64,
}

impl JsonMatchResult {
    /// Create from a `MatchResult`.
    pub(super) fn from_match_result(result: &MatchResult) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            turns: result.turns,
            teams: result
                .standings
                .iter()
                .map(|s| JsonTeamStanding {
                    team: s.team,
                    tiles: s.tiles,
                    troops: s.troops,
                })
                .collect(),
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Match result (seed: {})\n", result.seed));
    if let Some(winner) = result.winner {
        output.push_str(&format!("  Winner: Team {winner}\n"));
    } else {
        output.push_str("  Winner: Draw\n");
    }
    output.push_str(&format!("  Turns: {}\n\n", result.turns));

    for standing in &result.standings {
        output.push_str(&format!(
            "  Team {}: {} tiles, {} troops",
            standing.team, standing.tiles, standing.troops
        ));
        if standing.tiles == 0 {
            output.push_str(" [wiped out]");
        }
        output.push('\n');
    }

    output
}

/// Aggregated statistics over a batch of matches.
#[derive(Debug, Default)]
pub(super) struct BatchStats {
    /// Total matches played.
    pub(super) matches_played: u64,
    /// Win count per faction, indexed by faction id.
    pub(super) wins: Vec<u64>,
    /// Matches with no winner.
    pub(super) draws: u64,
    /// Tiles held at match end, summed per faction.
    total_tiles: Vec<u64>,
    /// Total turns across all matches.
    total_turns: u64,
}

impl BatchStats {
    /// Create new stats for n factions.
    pub(super) fn new(num_teams: usize) -> Self {
        Self {
            matches_played: 0,
            wins: vec![0; num_teams],
            draws: 0,
            total_tiles: vec![0; num_teams],
            total_turns: 0,
        }
    }

    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.matches_played += 1;
        self.total_turns += u64::from(result.turns);

        if let Some(winner) = result.winner {
            if let Ok(idx) = usize::try_from(winner)
                && idx < self.wins.len()
            {
                self.wins[idx] += 1;
            }
        } else {
            self.draws += 1;
        }

        for standing in &result.standings {
            if let Ok(idx) = usize::try_from(standing.team)
                && idx < self.total_tiles.len()
            {
                self.total_tiles[idx] += u64::from(standing.tiles);
            }
        }
    }

    /// Fold another partial accumulation into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.matches_played += other.matches_played;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        for (into, from) in self.wins.iter_mut().zip(&other.wins) {
            *into += from;
        }
        for (into, from) in self.total_tiles.iter_mut().zip(&other.total_tiles) {
            *into += from;
        }
    }

    /// Get win rate for a faction (0.0-1.0).
    pub(super) fn win_rate(&self, team_idx: usize) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.wins.get(team_idx).copied().unwrap_or(0) as f64 / self.matches_played as f64
    }

    /// Get average tiles held at match end for a faction.
    pub(super) fn avg_tiles(&self, team_idx: usize) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.total_tiles.get(team_idx).copied().unwrap_or(0) as f64 / self.matches_played as f64
    }

    /// Get average match length.
    pub(super) fn avg_turns(&self) -> f64 {
        if self.matches_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.matches_played as f64
    }

    /// Number of faction columns tracked.
    pub(super) fn num_teams(&self) -> usize {
        self.wins.len()
    }
}

/// JSON-serializable batch result.
#[derive(Debug, Serialize)]
pub(super) struct JsonBatchResult {
    /// Total matches played.
    matches_played: u64,
    /// Per-faction statistics.
    teams: Vec<JsonBatchTeam>,
    /// Number of draws.
    draws: u64,
    /// Average match length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-faction batch stats.
#[derive(Debug, Serialize)]
struct JsonBatchTeam {
    /// Faction id.
    team: usize,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average tiles held at match end.
    avg_tiles: f64,
}

impl JsonBatchResult {
    /// Create from accumulated stats.
    pub(super) fn from_stats(stats: &BatchStats) -> Self {
        let teams = (0..stats.num_teams())
            .map(|i| JsonBatchTeam {
                team: i,
                wins: stats.wins.get(i).copied().unwrap_or(0),
                win_rate: stats.win_rate(i),
                avg_tiles: stats.avg_tiles(i),
            })
            .collect();

        Self {
            matches_played: stats.matches_played,
            teams,
            draws: stats.draws,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format batch stats as human-readable text.
pub(super) fn format_batch_text(stats: &BatchStats) -> String {
    let mut output = String::new();

    output.push_str(&format!("Batch results ({} matches)\n", stats.matches_played));
    output.push_str("========================================\n\n");

    output.push_str("Win rates:\n");
    for team in 0..stats.num_teams() {
        let wins = stats.wins.get(team).copied().unwrap_or(0);
        let rate = stats.win_rate(team) * 100.0;
        output.push_str(&format!("  Team {team}: {rate:.1}% ({wins} wins)\n"));
    }
    output.push_str(&format!(
        "  Draws: {} ({:.1}%)\n\n",
        stats.draws,
        (stats.draws as f64 / stats.matches_played.max(1) as f64) * 100.0
    ));

    output.push_str("Average territory at match end:\n");
    for team in 0..stats.num_teams() {
        output.push_str(&format!("  Team {}: {:.1} tiles\n", team, stats.avg_tiles(team)));
    }

    output.push_str(&format!("\nAverage match length: {:.0} turns\n", stats.avg_turns()));

    output
}

/// Format batch stats as CSV.
pub(super) fn format_batch_csv(stats: &BatchStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("team,wins,win_rate,avg_tiles\n");

    // Data rows
    for team in 0..stats.num_teams() {
        output.push_str(&format!(
            "{},{},{:.4},{:.2}\n",
            team,
            stats.wins.get(team).copied().unwrap_or(0),
            stats.win_rate(team),
            stats.avg_tiles(team)
        ));
    }

    output
}
