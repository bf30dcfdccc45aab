use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_tracker::api::{build_router, state::AppState};
use swiss_tracker::config::AppConfig;
use swiss_tracker::models::PlayerId;
use swiss_tracker::storage::{JsonlStore, StorageConfig};
use swiss_tracker::tournament::Tournament;

#[derive(Parser)]
#[command(name = "swiss")]
#[command(about = "Swiss-system tournament tracker")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new player
    Register {
        /// Player's full name
        name: String,
    },

    /// Report the outcome of a match
    Report {
        /// Id of the player who won
        winner: u32,

        /// Id of the player who lost
        loser: u32,
    },

    /// List registered players
    Players,

    /// Print the number of registered players
    Count,

    /// Print current standings
    Standings,

    /// Print pairings for the next round
    Pairings {
        /// Pair by adjacent rank when no rematch-free pairing exists
        #[arg(long)]
        allow_rematch: bool,
    },

    /// Delete match results and/or players (both when no flag is given)
    Reset {
        #[arg(long)]
        matches: bool,

        #[arg(long)]
        players: bool,
    },

    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(log_level: &str, json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting swiss v{}", env!("CARGO_PKG_VERSION"));

    let mut pairing = config.pairing.clone();
    if let Commands::Pairings { allow_rematch: true } = cli.command {
        pairing.rematch_fallback = true;
    }

    let store = JsonlStore::new(StorageConfig::new(config.data_dir.clone()));
    let tournament = Tournament::new(store, pairing);

    match cli.command {
        Commands::Register { name } => {
            let player = tournament.register_player(&name)?;
            println!("Registered player {} ({})", player.id, player.name);
        }
        Commands::Report { winner, loser } => {
            tournament.report_match(PlayerId::new(winner), PlayerId::new(loser))?;
            println!("Recorded: {} beat {}", winner, loser);
        }
        Commands::Players => {
            let players = tournament.players()?;
            if players.is_empty() {
                println!("No players registered.");
            }
            for player in players {
                println!(
                    "{:>4}  {:<30} registered {}",
                    player.id,
                    player.name,
                    player.registered_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        Commands::Count => {
            println!("{}", tournament.count_players()?);
        }
        Commands::Standings => {
            let standings = tournament.player_standings()?;
            println!("=== Standings ({} players) ===\n", standings.len());
            println!("{:>4}  {:>4}  {:<30} {:>4} {:>4} {:>4}", "Rank", "Id", "Name", "W", "L", "MP");
            for (rank, record) in standings.iter().enumerate() {
                println!(
                    "{:>4}  {:>4}  {:<30} {:>4} {:>4} {:>4}",
                    rank + 1,
                    record.player_id,
                    record.name,
                    record.wins,
                    record.losses(),
                    record.matches
                );
            }
        }
        Commands::Pairings { .. } => {
            let pairings = tournament.swiss_pairings()?;
            println!("=== Next Round ({} pairings) ===\n", pairings.len());
            for (table, p) in pairings.iter().enumerate() {
                println!(
                    "Table {:>2}: {} ({}) vs {} ({})",
                    table + 1,
                    p.player1_name,
                    p.player1_id,
                    p.player2_name,
                    p.player2_id
                );
            }
        }
        Commands::Reset { matches, players } => {
            let (matches, players) = if !matches && !players {
                (true, true)
            } else {
                (matches, players)
            };

            if matches {
                println!("Deleted {} match results", tournament.delete_matches()?);
            }
            if players {
                println!("Deleted {} players", tournament.delete_players()?);
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);

            let state = AppState {
                tournament: Arc::new(tournament),
                cors_origin: config.server.cors_origin,
            };
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
