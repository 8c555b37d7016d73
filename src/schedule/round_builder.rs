use std::cmp::Reverse;
use std::collections::BTreeSet;
use super::candidates::{splits, Quads};
use super::tracker::FairnessTracker;
use super::types::{match_key, Match, MatchKey, Pair, Player, Round};

/// Penalty applied to a candidate that forms no new partnership while some
/// pair in the roster has still never partnered.
const STALE_MATCH_PENALTY: f64 = 40.0;

/// Breakdown of a candidate match score. Kept separate so traces can show why
/// a match won.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub new_partner: u32,
    pub partner_repeat: u32,
    pub new_opponent: u32,
    pub opponent_repeat: u32,
    pub team_repeat: u32,
    pub match_repeat: u32,
    pub balance: i64,
    pub unmet_exists: bool,
}

impl MatchScore {
    pub fn evaluate(tracker: &FairnessTracker, team1: Pair, team2: Pair, unmet_exists: bool) -> Self {
        let new_partner = [team1, team2]
            .iter()
            .filter(|&&team| tracker.partner_count(team) == 0)
            .count() as u32;
        let partner_repeat = tracker.partner_count(team1) + tracker.partner_count(team2);

        let mut new_opponent = 0;
        let mut opponent_repeat = 0;
        for a in team1.members() {
            for b in team2.members() {
                if tracker.opponent_count(Pair::new(a, b)) == 0 {
                    new_opponent += 1;
                } else {
                    opponent_repeat += 1;
                }
            }
        }

        let balance = team1
            .members()
            .into_iter()
            .chain(team2.members())
            .map(|p| tracker.rested(p) as i64 - tracker.played(p) as i64)
            .sum();

        MatchScore {
            new_partner,
            partner_repeat,
            new_opponent,
            opponent_repeat,
            team_repeat: tracker.team_count(team1) + tracker.team_count(team2),
            match_repeat: tracker.match_count(team1, team2),
            balance,
            unmet_exists,
        }
    }

    /// Every term is a multiple of 0.5, so totals compare exactly.
    pub fn total(&self) -> f64 {
        let mut score = 100.0 * self.new_partner as f64
            + 10.0 * self.new_opponent as f64
            + 0.5 * self.balance as f64
            - 2.0 * self.opponent_repeat as f64
            - 5.0 * self.partner_repeat as f64
            - 15.0 * self.team_repeat as f64
            - 30.0 * self.match_repeat as f64;
        if self.unmet_exists && self.new_partner == 0 {
            score -= STALE_MATCH_PENALTY;
        }
        score
    }
}

struct Candidate {
    team1: Pair,
    team2: Pair,
    key: MatchKey,
    score: f64,
}

/// Builds a single round from the current tracker state and commits its
/// matches and rests back into the tracker.
pub struct RoundBuilder<'a> {
    tracker: &'a mut FairnessTracker,
    players: &'a [Player],
    max_matches: usize,
}

impl<'a> RoundBuilder<'a> {
    pub fn new(tracker: &'a mut FairnessTracker, players: &'a [Player], max_matches: usize) -> Self {
        RoundBuilder {
            tracker,
            players,
            max_matches,
        }
    }

    /// Players sorted by scheduling priority: most missing partners first, then
    /// fewest matches played, most rests, name and finally roster index.
    pub fn rank_players(&self) -> Vec<usize> {
        let missing: Vec<usize> = (0..self.players.len())
            .map(|p| self.tracker.missing_partner_count(p))
            .collect();

        let mut ranked: Vec<usize> = (0..self.players.len()).collect();
        ranked.sort_by(|&a, &b| {
            let key = |p: usize| {
                (
                    Reverse(missing[p]),
                    self.tracker.played(p),
                    Reverse(self.tracker.rested(p)),
                    self.players[p].name.as_str(),
                    p,
                )
            };
            key(a).cmp(&key(b))
        });
        ranked
    }

    fn best_candidate(&self, pool: &[usize], unmet_exists: bool) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;
        for quad in Quads::new(pool) {
            for (team1, team2) in splits(quad) {
                let score = MatchScore::evaluate(&*self.tracker, team1, team2, unmet_exists).total();
                let key = match_key(team1, team2);
                let better = match &best {
                    None => true,
                    Some(current) => score > current.score || (score == current.score && key < current.key),
                };
                if better {
                    best = Some(Candidate { team1, team2, key, score });
                }
            }
        }
        best
    }

    pub fn build(self, number: u32) -> Round {
        let n = self.players.len();
        let play_count = (self.max_matches * 4).min((n / 4) * 4);

        let ranked = self.rank_players();
        let mut remaining: BTreeSet<usize> = ranked[..play_count].iter().copied().collect();
        let mut resting: BTreeSet<usize> = ranked[play_count..].iter().copied().collect();

        let unmet_exists = self.tracker.unmet_exists();
        let mut matches = Vec::new();

        while remaining.len() >= 4 {
            let pool: Vec<usize> = remaining.iter().copied().collect();
            let Some(chosen) = self.best_candidate(&pool, unmet_exists) else {
                break;
            };

            for player in chosen.team1.members().into_iter().chain(chosen.team2.members()) {
                remaining.remove(&player);
            }
            self.tracker.record_match(chosen.team1, chosen.team2);
            tracing::trace!(
                round = number,
                team1 = ?chosen.team1,
                team2 = ?chosen.team2,
                score = chosen.score,
                "committed match"
            );

            matches.push(Match {
                team1: chosen.team1,
                team2: chosen.team2,
                result: None,
            });
        }

        resting.extend(remaining);
        for &player in &resting {
            self.tracker.record_rest(player);
        }

        Round {
            number,
            matches,
            resting: resting.into_iter().collect(),
        }
    }
}
