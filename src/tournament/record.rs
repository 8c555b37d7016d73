use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::{AppError, Result};
use crate::schedule::{Schedule, Score};

/// A match as persisted: team names plus the result, entered later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub team1: [String; 2],
    pub team2: [String; 2],
    #[serde(default)]
    pub result: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub matches: Vec<MatchRecord>,
    #[serde(default)]
    pub resting: Vec<String>,
}

impl RoundRecord {
    /// A round counts as played once it has matches and every one has a result.
    pub fn is_complete(&self) -> bool {
        !self.matches.is_empty() && self.matches.iter().all(|m| m.result.is_some())
    }
}

/// One tournament on disk. Round and match membership is fixed when the
/// record is created; only `MatchRecord::result` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub courts: u32,
    pub rounds_count: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    pub players: Vec<String>,
    pub rounds: Vec<RoundRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub completed_rounds: usize,
    pub total_rounds: usize,
    pub finished: bool,
}

impl Tournament {
    pub fn from_schedule(id: String, name: String, schedule: &Schedule, seed: Option<u64>) -> Self {
        let report = schedule.report();
        let rounds = report
            .rounds
            .into_iter()
            .map(|round| RoundRecord {
                round: round.round_number,
                matches: round
                    .matches
                    .into_iter()
                    .map(|m| MatchRecord {
                        team1: m.team1,
                        team2: m.team2,
                        result: None,
                    })
                    .collect(),
                resting: round.resting,
            })
            .collect::<Vec<_>>();

        Tournament {
            id,
            name,
            created_at: Utc::now(),
            courts: schedule.courts,
            rounds_count: rounds.len() as u32,
            seed,
            players: report.names,
            rounds,
        }
    }

    /// Sets or clears the result of one match. `round` and `index` are 1-based.
    pub fn record_result(&mut self, round: usize, index: usize, result: Option<Score>) -> Result<()> {
        let entry = round
            .checked_sub(1)
            .and_then(|r| self.rounds.get_mut(r))
            .and_then(|r| index.checked_sub(1).and_then(|i| r.matches.get_mut(i)))
            .ok_or(AppError::MatchNotFound { round, index })?;
        entry.result = result;
        Ok(())
    }

    pub fn progress(&self) -> Progress {
        let total_rounds = self.rounds.len();
        let completed_rounds = self.rounds.iter().filter(|r| r.is_complete()).count();
        Progress {
            completed_rounds,
            total_rounds,
            finished: total_rounds > 0 && completed_rounds >= total_rounds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::generate;

    fn sample() -> Tournament {
        let players: Vec<String> = ["Ana", "Beto", "Carla", "Dani", "Eva"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let schedule = generate(&players, 1, 3, None).unwrap();
        Tournament::from_schedule("friday".into(), "Friday".into(), &schedule, None)
    }

    #[test]
    fn record_mirrors_schedule_rounds() {
        let t = sample();
        assert_eq!(t.rounds.len(), 3);
        assert_eq!(t.rounds_count, 3);
        assert!(t.rounds.iter().all(|r| r.matches.len() == 1 && r.resting.len() == 1));
        assert!(t.rounds.iter().flat_map(|r| &r.matches).all(|m| m.result.is_none()));
    }

    #[test]
    fn entering_results_only_touches_the_result() {
        let mut t = sample();
        let before = t.rounds[1].matches[0].clone();
        t.record_result(2, 1, Some(Score(6, 3))).unwrap();

        let after = &t.rounds[1].matches[0];
        assert_eq!(after.team1, before.team1);
        assert_eq!(after.team2, before.team2);
        assert_eq!(after.result, Some(Score(6, 3)));

        t.record_result(2, 1, None).unwrap();
        assert_eq!(t.rounds[1].matches[0].result, None);
    }

    #[test]
    fn unknown_match_is_rejected() {
        let mut t = sample();
        assert!(matches!(
            t.record_result(4, 1, Some(Score(1, 0))),
            Err(AppError::MatchNotFound { round: 4, index: 1 })
        ));
        assert!(t.record_result(0, 1, None).is_err());
        assert!(t.record_result(1, 2, None).is_err());
    }

    #[test]
    fn progress_counts_fully_scored_rounds() {
        let mut t = sample();
        assert_eq!(t.progress().completed_rounds, 0);
        t.record_result(1, 1, Some(Score(6, 4))).unwrap();
        t.record_result(3, 1, Some(Score(2, 6))).unwrap();
        let progress = t.progress();
        assert_eq!(progress.completed_rounds, 2);
        assert!(!progress.finished);

        t.record_result(2, 1, Some(Score(6, 6))).unwrap();
        assert!(t.progress().finished);
    }
}
