use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

/// A roster entry. `index` is the position in the (possibly shuffled) roster
/// and is what every counter and tie-break is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub index: usize,
    pub name: String,
}

/// Unordered two-player grouping, stored with `low < high`.
/// Ordering is lexicographic on `(low, high)`, which is what tie-breaks rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pair {
    pub low: usize,
    pub high: usize,
}

impl Pair {
    pub fn new(a: usize, b: usize) -> Self {
        debug_assert_ne!(a, b, "a pair needs two distinct players");
        if a < b {
            Pair { low: a, high: b }
        } else {
            Pair { low: b, high: a }
        }
    }

    pub fn contains(&self, player: usize) -> bool {
        self.low == player || self.high == player
    }

    /// The other member of the pair. Only meaningful when `player` is in it.
    pub fn other(&self, player: usize) -> usize {
        if self.low == player { self.high } else { self.low }
    }

    pub fn members(&self) -> [usize; 2] {
        [self.low, self.high]
    }

    /// Every pair of `n` players, in `(i, j)` order with `i < j`.
    pub fn all(n: usize) -> impl Iterator<Item = Pair> {
        (0..n).flat_map(move |i| (i + 1..n).map(move |j| Pair { low: i, high: j }))
    }
}

/// Key identifying an exact team-vs-team pairing regardless of side.
pub type MatchKey = (Pair, Pair);

/// Lexicographically smaller of `(team1, team2)` and `(team2, team1)`.
pub fn match_key(team1: Pair, team2: Pair) -> MatchKey {
    if team1 <= team2 { (team1, team2) } else { (team2, team1) }
}

/// Games won by team1 and team2, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score(pub u32, pub u32);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub team1: Pair,
    pub team2: Pair,
    pub result: Option<Score>,
}

impl Match {
    pub fn players(&self) -> [usize; 4] {
        [self.team1.low, self.team1.high, self.team2.low, self.team2.high]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub matches: Vec<Match>,
    /// Player indices, ascending.
    pub resting: Vec<usize>,
}

/// One match a player took part in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub round: u32,
    pub teammate: usize,
    pub opponents: Pair,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub appearances: Vec<Appearance>,
    pub rest_rounds: Vec<u32>,
}

/// Output of one scheduling run. Only `Match::result` may change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub players: Vec<Player>,
    pub courts: u32,
    pub rounds: Vec<Round>,
    pub matches_played: Vec<u32>,
    pub rests: Vec<u32>,
    pub unmet_pairs: Vec<Pair>,
    pub histories: Vec<PlayerHistory>,
}

impl Schedule {
    pub fn name(&self, index: usize) -> &str {
        &self.players[index].name
    }

    pub fn names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    fn team_names(&self, team: Pair) -> [String; 2] {
        [self.name(team.low).to_string(), self.name(team.high).to_string()]
    }

    /// Name-based view of the schedule, suitable for JSON output.
    pub fn report(&self) -> ScheduleReport {
        let rounds = self
            .rounds
            .iter()
            .map(|round| RoundReport {
                round_number: round.number,
                matches: round
                    .matches
                    .iter()
                    .map(|m| MatchReport {
                        team1: self.team_names(m.team1),
                        team2: self.team_names(m.team2),
                    })
                    .collect(),
                resting: round.resting.iter().map(|&i| self.name(i).to_string()).collect(),
            })
            .collect();

        let matches_played = self
            .players
            .iter()
            .map(|p| (p.name.clone(), self.matches_played[p.index]))
            .collect();
        let rests = self
            .players
            .iter()
            .map(|p| (p.name.clone(), self.rests[p.index]))
            .collect();

        ScheduleReport {
            names: self.names(),
            rounds,
            matches_played,
            rests,
            unmet_pairs: self.unmet_pairs.iter().map(|&pair| self.team_names(pair)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReport {
    pub team1: [String; 2],
    pub team2: [String; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round_number: u32,
    pub matches: Vec<MatchReport>,
    pub resting: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub names: Vec<String>,
    pub rounds: Vec<RoundReport>,
    pub matches_played: BTreeMap<String, u32>,
    pub rests: BTreeMap<String, u32>,
    pub unmet_pairs: Vec<[String; 2]>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_is_order_independent() {
        assert_eq!(Pair::new(3, 1), Pair::new(1, 3));
        assert_eq!(Pair::new(3, 1).low, 1);
        assert_eq!(Pair::new(3, 1).other(1), 3);
    }

    #[test]
    fn all_pairs_enumerates_combinations_in_order() {
        let pairs: Vec<Pair> = Pair::all(4).collect();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], Pair::new(0, 1));
        assert_eq!(pairs[5], Pair::new(2, 3));
    }

    #[test]
    fn match_key_puts_smaller_team_first() {
        let a = Pair::new(0, 3);
        let b = Pair::new(1, 2);
        assert_eq!(match_key(a, b), (a, b));
        assert_eq!(match_key(b, a), (a, b));
    }
}
