//! Command-line front end for the travel map.
//!
//! # Responsibility
//! - Stand in for the presentation layer: search, add, remove, list, stats.
//! - Wire config, logging, storage and geocoding together for one command.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use travelmap_core::db::open_db;
use travelmap_core::{
    core_version, default_log_level, init_logging, parse_year, Candidate, NominatimClient,
    PlacePersistence, SearchOutcome, SearchSession, SqliteSlotStore, Statistics, StoreChange,
    TravelLog, TravelMapConfig,
};

#[derive(Debug, Parser)]
#[command(name = "travelmap", version, about = "Track the places you have visited in India")]
struct Cli {
    /// TOML config file (falls back to $TRAVELMAP_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Overrides `storage.db_path` from the config.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show candidates for a query without adding anything.
    Search { query: String },
    /// Search and add one candidate as a visited place.
    Add {
        query: String,
        /// 1-based candidate position from the search results.
        #[arg(long, default_value_t = 1)]
        pick: usize,
        /// Year of the visit.
        #[arg(long)]
        year: Option<String>,
    },
    /// Remove a place by id.
    Remove { id: String },
    /// List visited places in insertion order.
    List,
    /// Show travel statistics.
    Stats,
    /// Remove every place.
    Clear,
    /// Print the core version.
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = TravelMapConfig::load(cli.config.as_deref())?;

    if let Some(log_dir) = &config.logging.dir {
        let level = config
            .logging
            .level
            .as_deref()
            .unwrap_or_else(|| default_log_level());
        init_logging(level, log_dir).map_err(anyhow::Error::msg)?;
    }

    if let Command::Version = cli.command {
        println!("travelmap_core version={}", core_version());
        return Ok(());
    }

    let db_path = cli.db.clone().unwrap_or_else(|| config.storage.db_path.clone());
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let persistence =
        PlacePersistence::with_key(SqliteSlotStore::new(&conn), config.storage.slot_key.clone());
    let mut log = TravelLog::open(persistence);

    match cli.command {
        Command::Search { query } => {
            let mut session = search_session(&config)?;
            report_search(&mut session, &query);
        }
        Command::Add { query, pick, year } => {
            let year = year.as_deref().and_then(parse_year);
            let mut session = search_session(&config)?;
            if !report_search(&mut session, &query) {
                bail!("no candidates for `{query}`");
            }
            let Some(candidate) = pick.checked_sub(1).and_then(|index| session.select(index))
            else {
                bail!("--pick {pick} is out of range");
            };
            let place = log.add_candidate(&candidate, year)?;
            println!("added {} ({}) id={}", place.name, place.kind, place.id);
            print_statistics(log.statistics());
        }
        Command::Remove { id } => match log.remove(&id) {
            StoreChange::Removed { .. } => {
                println!("removed {id}");
                print_statistics(log.statistics());
            }
            _ => println!("no place with id {id}"),
        },
        Command::List => {
            if log.places().is_empty() {
                println!("No places added yet. Start by searching for a place!");
            }
            for place in log.places() {
                let year = place.year.map(|y| format!(" [{y}]")).unwrap_or_default();
                println!(
                    "{}  {:<8} {} ({}){}",
                    place.id, place.kind, place.name, place.country, year
                );
            }
        }
        Command::Stats => print_statistics(log.statistics()),
        Command::Clear => println!("removed {} place(s)", log.clear()),
        Command::Version => {}
    }

    Ok(())
}

fn search_session(config: &TravelMapConfig) -> anyhow::Result<SearchSession<NominatimClient>> {
    let client = NominatimClient::new(config.geocoding.clone())?;
    Ok(SearchSession::new(client, &config.search))
}

/// Runs `query` and prints numbered suggestions. Returns whether any exist.
fn report_search(session: &mut SearchSession<NominatimClient>, query: &str) -> bool {
    match session.run(query) {
        SearchOutcome::Skipped => {
            println!("query must be at least 3 characters");
            false
        }
        SearchOutcome::Discarded => false,
        SearchOutcome::Applied { results: 0 } => {
            println!("no results");
            false
        }
        SearchOutcome::Applied { .. } => {
            for (index, candidate) in session.suggestions().iter().enumerate() {
                print_candidate(index + 1, candidate);
            }
            true
        }
    }
}

fn print_candidate(position: usize, candidate: &Candidate) {
    println!(
        "{position:>2}. {}  ({})",
        candidate.short_name(),
        candidate.display_name
    );
}

fn print_statistics(stats: &Statistics) {
    println!(
        "states={} cities={} landmarks={} total={}",
        stats.states, stats.cities, stats.landmarks, stats.total_places
    );
    if !stats.unique_states.is_empty() {
        println!("regions: {}", stats.unique_states.join(", "));
    }
    if let Some(summary) = stats.summary() {
        println!("{summary}");
    }
}
