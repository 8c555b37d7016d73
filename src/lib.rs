//! Round-based doubles scheduler.
//!
//! Builds two-versus-two matches per round for a roster of players, balancing
//! playing time and spreading partnerships and opponents as widely as a greedy
//! per-round search allows. Around the scheduler sit a roster parser, a JSON
//! tournament store with score entry and standings, and an HTTP API.

pub mod config;
pub mod display;
pub mod error;
pub mod logger;
pub mod parser;
pub mod schedule;
pub mod tournament;
pub mod web;

pub use error::{AppError, Result, ValidationError};
pub use schedule::{generate, Schedule, ScheduleReport};
