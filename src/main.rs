//! Command line entry point for Glicko Ladder
//!
//! Reads a league document, prints the initial leaderboard, then processes
//! each rating period in order and prints the leaderboard after it.

use anyhow::Result;
use clap::Parser;
use glicko_ladder::config::{AppConfig, OutputFormat};
use glicko_ladder::league::{process_period, Leaderboard, LeagueDocument, Roster};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Glicko Ladder - Glicko-2 rating periods for players and teams
#[derive(Parser)]
#[command(
    name = "glicko-ladder",
    version,
    about = "Rate players and teams from a league document using Glicko-2",
    long_about = "Glicko Ladder reads a league document (TOML, or JSON by extension) listing \
                 players, teams and rating periods of games and races, applies the Glicko-2 \
                 update once per period, and prints a leaderboard after every period."
)]
struct Args {
    /// League document to process
    #[arg(value_name = "LEAGUE")]
    league: PathBuf,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Output format override
    #[arg(short, long, value_enum, help = "Leaderboard output format")]
    format: Option<OutputFormat>,

    /// Update the players of each period in parallel
    #[arg(long, help = "Update the players of each period in parallel")]
    parallel: bool,

    /// Skip the leaderboard before the first period
    #[arg(long, help = "Do not print the initial leaderboard")]
    no_initial: bool,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and document, then exit)
    #[arg(long, help = "Validate configuration and league document, then exit")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level.
///
/// Logs go to stderr so stdout only carries leaderboards.
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(format) = args.format {
        config.output.format = format;
    }

    if args.parallel {
        config.output.parallel_updates = true;
    }

    if args.no_initial {
        config.output.show_initial = false;
    }

    glicko_ladder::config::validate_config(&config)?;
    Ok(config)
}

fn print_leaderboard(roster: &Roster, format: OutputFormat) -> Result<()> {
    let board = Leaderboard::from_roster(roster);
    match format {
        OutputFormat::Text => print!("{}", board.render_text()),
        OutputFormat::Json => println!("{}", board.render_json()?),
    }
    Ok(())
}

fn run(config: &AppConfig, document: &LeagueDocument) -> Result<()> {
    let mut roster = Roster::from_document(document, &config.rating)?;
    let format = config.output.format;

    if config.output.show_initial {
        if format == OutputFormat::Text {
            println!("initial ratings");
        }
        print_leaderboard(&roster, format)?;
    }

    for (index, period) in document.periods.iter().enumerate() {
        let report = process_period(
            &mut roster,
            period,
            index + 1,
            config.output.parallel_updates,
        )?;

        for failure in &report.failures {
            warn!(
                "Period {}: kept previous rating. {}",
                report.period,
                failure.to_error()
            );
        }

        if format == OutputFormat::Text {
            println!();
            println!("after rating period {}", report.period);
        }
        print_leaderboard(&roster, format)?;
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "{} v{} reading {}",
        config.service.name,
        glicko_ladder::VERSION,
        args.league.display()
    );

    let document = match LeagueDocument::from_file(&args.league) {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to load league document: {:#}", e);
            std::process::exit(1);
        }
    };

    if args.dry_run {
        if let Err(e) = Roster::from_document(&document, &config.rating) {
            error!("League document is invalid: {:#}", e);
            std::process::exit(1);
        }
        info!(
            players = document.players.len(),
            teams = document.teams.len(),
            periods = document.periods.len(),
            events = document.event_count(),
            "Dry run completed - league document is valid"
        );
        return Ok(());
    }

    if let Err(e) = run(&config, &document) {
        error!("Rating run failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
