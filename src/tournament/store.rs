use std::fs;
use std::path::{Path, PathBuf};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use crate::error::{AppError, Result};
use crate::schedule::Schedule;
use super::record::Tournament;

/// Turns a display name into a file-safe id: alphanumerics, `-` and `_` are
/// kept, anything else becomes `-`, repeated dashes collapse.
pub fn slugify(name: &str) -> String {
    let cleaned: String = name
        .trim()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    cleaned
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

fn timestamp() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// Listing entry for one stored tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub id: String,
    pub name: String,
    pub completed_rounds: usize,
    pub total_rounds: usize,
    pub finished: bool,
}

/// Tournaments stored as pretty-printed `<id>.json` files in one directory.
#[derive(Debug, Clone)]
pub struct TournamentStore {
    dir: PathBuf,
}

impl TournamentStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        TournamentStore {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        if id.is_empty() || slugify(id) != id {
            return Err(AppError::InvalidInput {
                message: format!("invalid tournament id '{}'", id),
            });
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }

    pub fn exists(&self, id: &str) -> bool {
        self.path_for(id).map(|p| p.exists()).unwrap_or(false)
    }

    /// First of `base`, `base-suffix`, `base-suffix-2`, ... with no file yet.
    fn free_id(&self, base: &str, suffix: &str) -> String {
        if !self.exists(base) {
            return base.to_string();
        }
        let mut id = format!("{}-{}", base, suffix);
        let mut attempt = 2;
        while self.exists(&id) {
            id = format!("{}-{}-{}", base, suffix, attempt);
            attempt += 1;
        }
        id
    }

    /// Saves a freshly generated schedule as a new tournament.
    ///
    /// A named tournament must not clash with an existing one. An unnamed one
    /// gets a timestamp id, suffixed with another timestamp if that is taken.
    pub fn create(&self, name: &str, schedule: &Schedule, seed: Option<u64>) -> Result<Tournament> {
        fs::create_dir_all(&self.dir)?;
        let name = name.trim();
        let base = slugify(name);

        let id = if base.is_empty() {
            let stamp = timestamp();
            self.free_id(&stamp, &timestamp())
        } else if self.exists(&base) {
            return Err(AppError::TournamentExists { id: base });
        } else {
            base
        };

        let tournament = Tournament::from_schedule(id, name.to_string(), schedule, seed);
        self.save(&tournament)?;
        tracing::info!(id = %tournament.id, rounds = tournament.rounds.len(), "tournament created");
        Ok(tournament)
    }

    pub fn save(&self, tournament: &Tournament) -> Result<()> {
        let path = self.path_for(&tournament.id)?;
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(tournament)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(&self, id: &str) -> Result<Tournament> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(AppError::TournamentNotFound { id: id.to_string() });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(AppError::TournamentNotFound { id: id.to_string() });
        }
        fs::remove_file(path)?;
        tracing::info!(id, "tournament deleted");
        Ok(())
    }

    /// Summaries of every readable tournament, unfinished first, then by name.
    pub fn list(&self) -> Result<Vec<TournamentSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let file_base = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };
            let tournament: Tournament = match fs::read_to_string(&path)
                .map_err(AppError::from)
                .and_then(|content| serde_json::from_str(&content).map_err(AppError::from))
            {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable tournament file");
                    continue;
                }
            };
            let progress = tournament.progress();
            let name = if tournament.name.is_empty() { file_base.clone() } else { tournament.name.clone() };
            items.push(TournamentSummary {
                id: if tournament.id.is_empty() { file_base } else { tournament.id },
                name,
                completed_rounds: progress.completed_rounds,
                total_rounds: progress.total_rounds,
                finished: progress.finished,
            });
        }

        items.sort_by(|a, b| {
            a.finished
                .cmp(&b.finished)
                .then(a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(items)
    }
}
