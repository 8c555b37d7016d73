use std::collections::HashMap;
use std::path::Path;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use super::record::Tournament;

/// One row of the standings table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: String,
    pub wins: u32,
    pub losses: u32,
    pub played: u32,
    pub points_for: u64,
    pub points_against: u64,
}

impl Standing {
    fn new(player: &str) -> Self {
        Standing {
            player: player.to_string(),
            ..Default::default()
        }
    }

    pub fn point_difference(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    fn apply(&mut self, own: u32, other: u32) {
        self.played += 1;
        self.points_for = self.points_for.saturating_add(u64::from(own));
        self.points_against = self.points_against.saturating_add(u64::from(other));
        if own > other {
            self.wins += 1;
        } else if other > own {
            self.losses += 1;
        }
    }
}

/// Aggregates entered results into a sorted table. Matches without a result
/// are ignored; a drawn score counts as played only.
pub fn compute_standings(tournament: &Tournament) -> Vec<Standing> {
    let mut order: Vec<String> = Vec::new();
    let mut table: HashMap<String, Standing> = HashMap::new();
    for player in &tournament.players {
        if !table.contains_key(player) {
            order.push(player.clone());
            table.insert(player.clone(), Standing::new(player));
        }
    }

    for round in &tournament.rounds {
        for m in &round.matches {
            let Some(score) = m.result else { continue };
            for (team, own, other) in [(&m.team1, score.0, score.1), (&m.team2, score.1, score.0)] {
                for player in team {
                    table
                        .entry(player.clone())
                        .or_insert_with(|| {
                            order.push(player.clone());
                            Standing::new(player)
                        })
                        .apply(own, other);
                }
            }
        }
    }

    let mut standings: Vec<Standing> = order
        .into_iter()
        .filter_map(|player| table.remove(&player))
        .collect();
    standings.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(a.losses.cmp(&b.losses))
            .then(b.point_difference().cmp(&a.point_difference()))
            .then(b.points_for.cmp(&a.points_for))
            .then(a.player.to_lowercase().cmp(&b.player.to_lowercase()))
    });
    standings
}

/// Writes the standings table to a CSV file with a header row.
pub fn export_standings_to_csv(standings: &[Standing], csv_path: &Path) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;
    for standing in standings {
        wtr.serialize(standing)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crate::schedule::Score;
    use crate::tournament::record::{MatchRecord, RoundRecord};

    fn team(a: &str, b: &str) -> [String; 2] {
        [a.to_string(), b.to_string()]
    }

    fn tournament() -> Tournament {
        Tournament {
            id: "t".into(),
            name: "t".into(),
            created_at: Utc::now(),
            courts: 1,
            rounds_count: 3,
            seed: None,
            players: ["ana", "Beto", "Carla", "Dani"].iter().map(|s| s.to_string()).collect(),
            rounds: vec![
                RoundRecord {
                    round: 1,
                    matches: vec![MatchRecord {
                        team1: team("ana", "Beto"),
                        team2: team("Carla", "Dani"),
                        result: Some(Score(6, 2)),
                    }],
                    resting: vec![],
                },
                RoundRecord {
                    round: 2,
                    matches: vec![MatchRecord {
                        team1: team("ana", "Carla"),
                        team2: team("Beto", "Dani"),
                        result: Some(Score(4, 4)),
                    }],
                    resting: vec![],
                },
                RoundRecord {
                    round: 3,
                    matches: vec![MatchRecord {
                        team1: team("ana", "Dani"),
                        team2: team("Beto", "Carla"),
                        result: None,
                    }],
                    resting: vec![],
                },
            ],
        }
    }

    #[test]
    fn results_aggregate_per_player() {
        let standings = compute_standings(&tournament());
        let ana = standings.iter().find(|s| s.player == "ana").unwrap();
        assert_eq!(ana.played, 2);
        assert_eq!(ana.wins, 1);
        assert_eq!(ana.losses, 0);
        assert_eq!(ana.points_for, 10);
        assert_eq!(ana.points_against, 6);

        let dani = standings.iter().find(|s| s.player == "Dani").unwrap();
        assert_eq!((dani.wins, dani.losses, dani.played), (0, 1, 2));
    }

    #[test]
    fn sorted_by_wins_then_points_then_name() {
        let standings = compute_standings(&tournament());
        let order: Vec<&str> = standings.iter().map(|s| s.player.as_str()).collect();
        // ana and Beto both 1-0 with 10 for / 6 against: name decides, case-insensitively.
        assert_eq!(order, vec!["ana", "Beto", "Carla", "Dani"]);
    }

    #[test]
    fn point_difference_breaks_equal_records() {
        let t = Tournament {
            players: ["Alpha", "Beta", "Gamma", "Delta", "Eps", "Zeta", "Eta", "Theta"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rounds: vec![RoundRecord {
                round: 1,
                matches: vec![
                    MatchRecord {
                        team1: team("Alpha", "Beta"),
                        team2: team("Eps", "Zeta"),
                        result: Some(Score(10, 8)),
                    },
                    MatchRecord {
                        team1: team("Gamma", "Delta"),
                        team2: team("Eta", "Theta"),
                        result: Some(Score(9, 2)),
                    },
                ],
                resting: vec![],
            }],
            ..tournament()
        };
        let standings = compute_standings(&t);
        let order: Vec<&str> = standings.iter().map(|s| s.player.as_str()).collect();
        // +7 beats +2 even though Alpha and Beta scored more points.
        assert_eq!(&order[..4], &["Delta", "Gamma", "Alpha", "Beta"]);
        assert_eq!(standings[0].point_difference(), 7);
        // Losers: -2 ranks above -7.
        assert_eq!(&order[4..], &["Eps", "Zeta", "Eta", "Theta"]);
    }

    #[test]
    fn huge_scores_do_not_overflow() {
        let mut t = tournament();
        t.rounds[0].matches[0].result = Some(Score(u32::MAX, 0));
        t.rounds[1].matches[0].result = Some(Score(u32::MAX, 0));
        let standings = compute_standings(&t);
        let ana = standings.iter().find(|s| s.player == "ana").unwrap();
        assert_eq!(ana.points_for, 2 * u64::from(u32::MAX));
        assert_eq!(ana.wins, 2);
        assert_eq!(standings[0].player, "ana");
    }

    #[test]
    fn players_without_results_still_listed() {
        let mut t = tournament();
        t.players.push("Eva".into());
        let standings = compute_standings(&t);
        assert_eq!(standings.len(), 5);
        // No losses ranks Eva above the 0-1 players.
        assert_eq!(standings[2].player, "Eva");
        assert_eq!(standings[2].played, 0);
    }

    #[test]
    fn csv_export_writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("standings.csv");
        export_standings_to_csv(&compute_standings(&tournament()), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("player,wins,losses,played,points_for,points_against"));
        assert_eq!(lines.next(), Some("ana,1,0,2,10,6"));
        assert_eq!(content.lines().count(), 5);
    }
}
