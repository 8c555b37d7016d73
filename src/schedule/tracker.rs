use std::collections::HashMap;
use super::types::{match_key, MatchKey, Pair};

/// Running pairing and playing-time counters for one scheduling run.
///
/// Pair-keyed counters are seeded with a zero for every pair of players so a
/// lookup never misses; `match_count` only holds pairings that were played.
#[derive(Debug, Clone)]
pub struct FairnessTracker {
    players: usize,
    partner_count: HashMap<Pair, u32>,
    opponent_count: HashMap<Pair, u32>,
    team_count: HashMap<Pair, u32>,
    match_count: HashMap<MatchKey, u32>,
    played: Vec<u32>,
    rested: Vec<u32>,
}

impl FairnessTracker {
    pub fn new(players: usize) -> Self {
        let zeroed: HashMap<Pair, u32> = Pair::all(players).map(|pair| (pair, 0)).collect();
        FairnessTracker {
            players,
            partner_count: zeroed.clone(),
            opponent_count: zeroed.clone(),
            team_count: zeroed,
            match_count: HashMap::new(),
            played: vec![0; players],
            rested: vec![0; players],
        }
    }

    pub fn players(&self) -> usize {
        self.players
    }

    pub fn record_match(&mut self, team1: Pair, team2: Pair) {
        for team in [team1, team2] {
            *self.partner_count.entry(team).or_insert(0) += 1;
            *self.team_count.entry(team).or_insert(0) += 1;
        }
        for a in team1.members() {
            for b in team2.members() {
                *self.opponent_count.entry(Pair::new(a, b)).or_insert(0) += 1;
            }
        }
        *self.match_count.entry(match_key(team1, team2)).or_insert(0) += 1;
        for player in team1.members().into_iter().chain(team2.members()) {
            self.played[player] += 1;
        }
    }

    pub fn record_rest(&mut self, player: usize) {
        self.rested[player] += 1;
    }

    pub fn partner_count(&self, pair: Pair) -> u32 {
        self.partner_count.get(&pair).copied().unwrap_or(0)
    }

    pub fn opponent_count(&self, pair: Pair) -> u32 {
        self.opponent_count.get(&pair).copied().unwrap_or(0)
    }

    pub fn team_count(&self, pair: Pair) -> u32 {
        self.team_count.get(&pair).copied().unwrap_or(0)
    }

    pub fn match_count(&self, team1: Pair, team2: Pair) -> u32 {
        self.match_count.get(&match_key(team1, team2)).copied().unwrap_or(0)
    }

    pub fn played(&self, player: usize) -> u32 {
        self.played[player]
    }

    pub fn rested(&self, player: usize) -> u32 {
        self.rested[player]
    }

    pub fn played_counts(&self) -> &[u32] {
        &self.played
    }

    pub fn rested_counts(&self) -> &[u32] {
        &self.rested
    }

    /// Number of other players `player` has not partnered with yet.
    pub fn missing_partner_count(&self, player: usize) -> usize {
        (0..self.players)
            .filter(|&other| other != player && self.partner_count(Pair::new(player, other)) == 0)
            .count()
    }

    pub fn unmet_exists(&self) -> bool {
        self.partner_count.values().any(|&count| count == 0)
    }

    /// Pairs that never shared a team, in `(i, j)` order.
    pub fn unmet_pairs(&self) -> Vec<Pair> {
        Pair::all(self.players)
            .filter(|&pair| self.partner_count(pair) == 0)
            .collect()
    }
}
