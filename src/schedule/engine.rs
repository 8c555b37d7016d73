use std::collections::HashSet;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use crate::error::ValidationError;
use super::round_builder::RoundBuilder;
use super::tracker::FairnessTracker;
use super::types::{Appearance, Player, PlayerHistory, Round, Schedule};

pub const MIN_PLAYERS: usize = 4;

/// Matches that fit in one round: limited by courts and by the roster size.
pub fn max_matches_per_round(players: usize, courts: u32) -> usize {
    (courts as usize).min(players / 4)
}

/// Picks the shuffle seed for a run. An explicit seed always shuffles; a bare
/// shuffle request draws a fresh seed so the run can still be reproduced.
pub fn resolve_seed(shuffle: bool, seed: Option<u64>) -> Option<u64> {
    match (shuffle, seed) {
        (_, Some(seed)) => Some(seed),
        (true, None) => Some(rand::random()),
        (false, None) => None,
    }
}

/// Generates a full doubles schedule.
///
/// With `shuffle_seed` set, the roster order is shuffled once with a seeded
/// RNG before scheduling; this only changes tie-break priority, so the same
/// seed always reproduces the same schedule.
pub fn generate(
    players: &[String],
    courts: u32,
    rounds: u32,
    shuffle_seed: Option<u64>,
) -> Result<Schedule, ValidationError> {
    let n = players.len();
    if n < MIN_PLAYERS {
        return Err(ValidationError::TooFewPlayers { found: n });
    }
    if courts < 1 || rounds < 1 {
        return Err(ValidationError::InvalidDimensions { courts, rounds });
    }
    let max_matches = max_matches_per_round(n, courts);
    if max_matches == 0 {
        return Err(ValidationError::NoMatchesPerRound { players: n, courts });
    }
    // Reports and standings are keyed by name.
    let mut seen = HashSet::with_capacity(n);
    if let Some(name) = players.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(ValidationError::DuplicatePlayer { name: name.clone() });
    }

    let mut names = players.to_vec();
    if let Some(seed) = shuffle_seed {
        let mut rng = StdRng::seed_from_u64(seed);
        names.shuffle(&mut rng);
    }
    let roster: Vec<Player> = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Player { index, name })
        .collect();

    tracing::debug!(players = n, courts, rounds, max_matches, ?shuffle_seed, "generating schedule");

    let mut tracker = FairnessTracker::new(n);
    let mut histories = vec![PlayerHistory::default(); n];
    let mut built: Vec<Round> = Vec::with_capacity(rounds as usize);

    for number in 1..=rounds {
        let round = RoundBuilder::new(&mut tracker, &roster, max_matches).build(number);
        record_history(&mut histories, &round);
        tracing::debug!(
            round = number,
            matches = round.matches.len(),
            resting = round.resting.len(),
            "round built"
        );
        built.push(round);
    }

    let unmet_pairs = tracker.unmet_pairs();
    if !unmet_pairs.is_empty() {
        tracing::info!(unmet = unmet_pairs.len(), "some partnerships were never formed");
    }

    Ok(Schedule {
        players: roster,
        courts,
        rounds: built,
        matches_played: tracker.played_counts().to_vec(),
        rests: tracker.rested_counts().to_vec(),
        unmet_pairs,
        histories,
    })
}

fn record_history(histories: &mut [PlayerHistory], round: &Round) {
    for m in &round.matches {
        for (team, opponents) in [(m.team1, m.team2), (m.team2, m.team1)] {
            for player in team.members() {
                histories[player].appearances.push(Appearance {
                    round: round.number,
                    teammate: team.other(player),
                    opponents,
                });
            }
        }
    }
    for &player in &round.resting {
        histories[player].rest_rounds.push(round.number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("P{:02}", i)).collect()
    }

    #[test]
    fn rejects_fewer_than_four_players() {
        let err = generate(&names(3), 1, 1, None).unwrap_err();
        assert_eq!(err, ValidationError::TooFewPlayers { found: 3 });
    }

    #[test]
    fn rejects_zero_courts_or_rounds() {
        assert_eq!(
            generate(&names(8), 0, 3, None).unwrap_err(),
            ValidationError::InvalidDimensions { courts: 0, rounds: 3 }
        );
        assert_eq!(
            generate(&names(8), 2, 0, None).unwrap_err(),
            ValidationError::InvalidDimensions { courts: 2, rounds: 0 }
        );
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut roster = names(6);
        roster.push("P03".to_string());
        assert_eq!(
            generate(&roster, 1, 2, None).unwrap_err(),
            ValidationError::DuplicatePlayer { name: "P03".to_string() }
        );
    }

    #[test]
    fn history_tracks_teammates_and_rests() {
        let schedule = generate(&names(5), 1, 5, None).unwrap();
        for (index, history) in schedule.histories.iter().enumerate() {
            assert_eq!(history.appearances.len() as u32, schedule.matches_played[index]);
            assert_eq!(history.rest_rounds.len() as u32, schedule.rests[index]);
            for appearance in &history.appearances {
                assert_ne!(appearance.teammate, index);
                assert!(!appearance.opponents.contains(index));
            }
        }
        // Five players, one court: everyone sits out exactly once.
        assert!(schedule.rests.iter().all(|&r| r == 1));
    }

    #[test]
    fn same_seed_same_schedule() {
        let a = generate(&names(9), 2, 4, Some(42)).unwrap();
        let b = generate(&names(9), 2, 4, Some(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seeded_shuffle_keeps_the_same_roster() {
        let schedule = generate(&names(9), 2, 1, Some(7)).unwrap();
        let mut shuffled = schedule.names();
        shuffled.sort();
        assert_eq!(shuffled, names(9));
    }
}
