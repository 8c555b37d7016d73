use std::fs::File;
use std::io::Write;
use crate::schedule::{Pair, Schedule};
use crate::tournament::{Standing, TournamentSummary};

fn team_label(schedule: &Schedule, team: Pair) -> String {
    format!("{} + {}", schedule.name(team.low), schedule.name(team.high))
}

/// Renders the schedule as a plain-text report: each round's matches and
/// resting players, then a per-player summary and, if some partnerships never
/// formed, an advisory line.
pub fn format_schedule(schedule: &Schedule) -> String {
    let mut lines = Vec::new();
    for round in &schedule.rounds {
        lines.push(format!("Round {}", round.number));
        if round.matches.is_empty() {
            lines.push("- No matches".to_string());
        }
        for (idx, m) in round.matches.iter().enumerate() {
            lines.push(format!(
                "- Match {}: ({}) vs ({})",
                idx + 1,
                team_label(schedule, m.team1),
                team_label(schedule, m.team2)
            ));
        }

        if round.resting.is_empty() {
            lines.push("- Resting: no one".to_string());
        } else {
            let names: Vec<&str> = round.resting.iter().map(|&i| schedule.name(i)).collect();
            lines.push(format!("- Resting: {}", names.join(", ")));
        }
        lines.push(String::new());
    }

    lines.push("Player summary".to_string());
    for player in &schedule.players {
        lines.push(format!(
            "- {}: plays {} matches; rests {} rounds.",
            player.name, schedule.matches_played[player.index], schedule.rests[player.index]
        ));
    }

    if !schedule.unmet_pairs.is_empty() {
        lines.push(String::new());
        lines.push("Note: not every unique partnership could be formed in the given rounds.".to_string());
    }

    lines.join("\n")
}

/// Per-player view: who they partnered and faced in each round, and when they rested.
pub fn format_player_history(schedule: &Schedule) -> String {
    let mut lines = Vec::new();
    for player in &schedule.players {
        lines.push(player.name.clone());
        let history = &schedule.histories[player.index];
        for appearance in &history.appearances {
            lines.push(format!(
                "  Round {}: with {} against {}",
                appearance.round,
                schedule.name(appearance.teammate),
                team_label(schedule, appearance.opponents)
            ));
        }
        if !history.rest_rounds.is_empty() {
            let rounds: Vec<String> = history.rest_rounds.iter().map(|r| r.to_string()).collect();
            lines.push(format!("  Rests in round(s): {}", rounds.join(", ")));
        }
    }
    if !schedule.unmet_pairs.is_empty() {
        lines.push(String::new());
        lines.push("Never partnered:".to_string());
        for pair in &schedule.unmet_pairs {
            lines.push(format!("  {}", team_label(schedule, *pair)));
        }
    }
    lines.join("\n")
}

pub fn format_standings(standings: &[Standing]) -> String {
    let width = standings
        .iter()
        .map(|s| s.player.chars().count())
        .max()
        .unwrap_or(0)
        .max("Player".len());

    let mut lines = vec![format!(
        "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>4} {:>4}",
        "#", "Player", "W", "L", "P", "PF", "PA",
        width = width
    )];
    for (pos, s) in standings.iter().enumerate() {
        lines.push(format!(
            "{:>3}  {:<width$}  {:>3} {:>3} {:>3} {:>4} {:>4}",
            pos + 1, s.player, s.wins, s.losses, s.played, s.points_for, s.points_against,
            width = width
        ));
    }
    lines.push("W=won, L=lost, P=played, PF=points for, PA=points against".to_string());
    lines.join("\n")
}

pub fn format_tournament_list(items: &[TournamentSummary]) -> String {
    if items.is_empty() {
        return "No tournaments saved yet.".to_string();
    }
    items
        .iter()
        .map(|t| {
            let status = if t.finished { "finished" } else { "in progress" };
            format!(
                "{} ({}): {}/{} rounds complete, {}",
                t.name, t.id, t.completed_rounds, t.total_rounds, status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes a rendered report to a file, replacing any previous content.
pub fn write_report_to_file(report: &str, filename: &str) -> Result<(), std::io::Error> {
    let mut file = File::create(filename)?;
    writeln!(file, "{}", report)?;
    Ok(())
}
