use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use doubles_scheduler::config::AppConfig;
use doubles_scheduler::display::{
    format_player_history, format_schedule, format_standings, format_tournament_list, write_report_to_file,
};
use doubles_scheduler::logger::init_logger;
use doubles_scheduler::parser::{load_roster, parse_player_list, parse_score};
use doubles_scheduler::schedule::{generate, resolve_seed, Schedule};
use doubles_scheduler::tournament::{compute_standings, export_standings_to_csv, TournamentStore};
use doubles_scheduler::web;
use doubles_scheduler::{AppError, Result};

#[derive(Parser, Debug)]
#[command(name = "doubles-scheduler", version, about = "Round-based doubles pairing scheduler")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging for this crate
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct ScheduleArgs {
    /// Comma-separated player names
    #[arg(short, long, conflicts_with = "roster")]
    players: Option<String>,

    /// File with one player per line, or a CSV with a name column
    #[arg(short, long)]
    roster: Option<PathBuf>,

    #[arg(short, long)]
    courts: Option<u32>,

    #[arg(short = 'n', long)]
    rounds: Option<u32>,

    /// Shuffle the roster before scheduling
    #[arg(long)]
    shuffle: bool,

    /// Seed for the shuffle (implies --shuffle)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a schedule without saving it
    Generate {
        #[command(flatten)]
        schedule: ScheduleArgs,
        /// Print the JSON report instead of text
        #[arg(long)]
        json: bool,
        /// Append each player's partners, opponents and rests
        #[arg(long)]
        history: bool,
        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate a schedule and save it as a tournament
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[command(flatten)]
        schedule: ScheduleArgs,
    },
    /// Enter or clear a match result
    Result {
        id: String,
        #[arg(long)]
        round: usize,
        #[arg(long = "match")]
        match_index: usize,
        /// Score such as 6-4
        #[arg(long, conflicts_with = "clear", required_unless_present = "clear")]
        score: Option<String>,
        #[arg(long)]
        clear: bool,
    },
    /// Show the standings of a tournament
    Standings {
        id: String,
        /// Also export the table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// List saved tournaments
    List,
    /// Delete a saved tournament
    Delete { id: String },
    /// Start the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

fn build(args: &ScheduleArgs, config: &AppConfig) -> Result<(Schedule, Option<u64>)> {
    let players = match (&args.players, &args.roster) {
        (Some(list), _) => parse_player_list(list),
        (None, Some(path)) => load_roster(path)?,
        (None, None) => {
            return Err(AppError::InvalidInput {
                message: "pass --players or --roster".to_string(),
            })
        }
    };
    let seed = resolve_seed(args.shuffle, args.seed);
    if let Some(seed) = seed {
        tracing::info!(seed, "shuffling roster");
    }
    let schedule = generate(
        &players,
        args.courts.unwrap_or(config.schedule.courts),
        args.rounds.unwrap_or(config.schedule.rounds),
        seed,
    )?;
    Ok((schedule, seed))
}

async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let store = TournamentStore::new(&config.storage.tournaments_dir);

    match cli.command {
        Command::Generate { schedule, json, history, output } => {
            let (schedule, _) = build(&schedule, &config)?;
            let mut text = if json {
                serde_json::to_string_pretty(&schedule.report())?
            } else {
                format_schedule(&schedule)
            };
            if history && !json {
                text.push_str("\n\n");
                text.push_str(&format_player_history(&schedule));
            }
            println!("{}", text);
            if let Some(path) = output {
                write_report_to_file(&text, &path)?;
                println!("Schedule saved to {}", path);
            }
        }
        Command::Create { name, schedule } => {
            let (schedule, seed) = build(&schedule, &config)?;
            let tournament = store.create(&name, &schedule, seed)?;
            println!("{}", format_schedule(&schedule));
            println!("\nSaved as '{}' in {}", tournament.id, store.dir().display());
        }
        Command::Result { id, round, match_index, score, clear } => {
            let result = match (score, clear) {
                (_, true) => None,
                (Some(value), false) => Some(parse_score(&value).ok_or_else(|| AppError::InvalidInput {
                    message: format!("'{}' is not a score like 6-4", value),
                })?),
                (None, false) => None,
            };
            let mut tournament = store.load(&id)?;
            tournament.record_result(round, match_index, result)?;
            store.save(&tournament)?;
            let progress = tournament.progress();
            println!(
                "Saved. {}/{} rounds complete.",
                progress.completed_rounds, progress.total_rounds
            );
        }
        Command::Standings { id, csv } => {
            let tournament = store.load(&id)?;
            let standings = compute_standings(&tournament);
            println!("{}", format_standings(&standings));
            if let Some(path) = csv {
                export_standings_to_csv(&standings, &path)?;
                println!("Standings exported to {}", path.display());
            }
        }
        Command::List => {
            println!("{}", format_tournament_list(&store.list()?));
        }
        Command::Delete { id } => {
            store.delete(&id)?;
            println!("Deleted '{}'", id);
        }
        Command::Serve { port } => {
            let mut config = config;
            if let Some(port) = port {
                config.server.port = port;
            }
            println!("Starting web server on {}:{}...", config.server.host, config.server.port);
            web::start_server(&config).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    init_logger(&config.logging.filter, cli.verbose);

    if let Err(e) = run(cli, config).await {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
