use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use club_stats::aggregate::{build_leaderboard, load_club_records};
use club_stats::api::{build_router, state::AppState};
use club_stats::calculate::{
    count_milestones, DashboardSummary, DerivedMetrics, LeaderboardKind,
};
use club_stats::client::{ClubApiClient, StatFetcher};
use club_stats::config::AppConfig;
use club_stats::session::EditSession;
use club_stats::Side;

#[derive(Parser)]
#[command(name = "club-stats")]
#[command(about = "Cricket club player statistics: leaderboards, milestones and stat editing")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./club-stats.toml")]
    config: PathBuf,

    /// Club store base URL (overrides config)
    #[arg(long)]
    store_url: Option<String>,

    /// Per-fetch timeout, e.g. "15s" (overrides config)
    #[arg(long)]
    timeout: Option<String>,

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
    /// Print a ranked leaderboard
    Leaderboard {
        /// "batting" (by runs) or "bowling" (by wickets)
        #[arg(long, default_value = "batting")]
        kind: LeaderboardKind,

        /// Only show the top N rows
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Count players who reached each milestone
    Milestones,

    /// Print the club dashboard summary as JSON
    Summary,

    /// Show one player's stats and derived metrics
    Player {
        username: String,
    },

    /// Add to a counter and save the record
    Increment {
        username: String,

        /// Counter name, e.g. "runs", "matches", "wickets", "fiveWickets"
        stat: String,

        /// Target the bowling counters
        #[arg(long)]
        bowling: bool,

        /// How many times to add one
        #[arg(long, default_value = "1")]
        times: u32,
    },

    /// Overwrite a hand-entered field and save the record
    Set {
        username: String,

        /// "strikeRate", "bestBatting", "economy" or "bestBowling"
        field: String,

        value: String,

        /// Target the bowling fields
        #[arg(long)]
        bowling: bool,
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

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(url) = &cli.store_url {
        config.store.base_url = url.clone();
    }
    if let Some(timeout) = &cli.timeout {
        config.store.fetch_timeout = timeout.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.validate()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
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

    tracing::info!("Starting club-stats v{}", env!("CARGO_PKG_VERSION"));

    let timeout = config.store.timeout()?;
    let client = Arc::new(ClubApiClient::new(config.store.client_config()?)?);
    tracing::info!("Using club store at {}", client.base_url());

    match cli.command {
        Commands::Leaderboard { kind, limit } => {
            let board =
                build_leaderboard(client.as_ref(), client.as_ref(), kind, timeout).await?;
            let shown = limit.unwrap_or(board.len());

            println!("\n=== {} leaderboard ===", kind);
            for entry in board.iter().take(shown) {
                let stats = &entry.record.stats;
                let value = match kind {
                    LeaderboardKind::Batting => stats.runs(),
                    LeaderboardKind::Bowling => stats.wickets(),
                };
                let note = if entry.record.stats_available {
                    ""
                } else {
                    "  (stats unavailable)"
                };
                println!(
                    "{:>4}  {:<8} {:<24} {:>6}{}",
                    entry.rank,
                    entry.badge.to_string(),
                    entry.record.player.name,
                    value,
                    note
                );
            }
            if board.is_empty() {
                println!("(no approved players)");
            }
        }
        Commands::Milestones => {
            let records = load_club_records(client.as_ref(), client.as_ref(), timeout).await?;
            let counts = count_milestones(&records);

            println!("\n=== Milestones ({} players) ===", records.len());
            for (milestone, count) in &counts {
                println!("{:<18} {}", format!("{:?}", milestone), count);
            }
        }
        Commands::Summary => {
            let records = load_club_records(client.as_ref(), client.as_ref(), timeout).await?;
            let summary = DashboardSummary::from_records(&records);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Player { username } => {
            let record = client
                .fetch_stats(&username)
                .await
                .with_context(|| format!("fetching stats for {}", username))?;
            let metrics = DerivedMetrics::from_record(&record);
            println!("{}", serde_json::to_string_pretty(&metrics)?);
        }
        Commands::Increment {
            username,
            stat,
            bowling,
            times,
        } => {
            let record = client
                .fetch_stats(&username)
                .await
                .with_context(|| format!("fetching stats for {}", username))?;
            let mut session = EditSession::open(record);

            let side = Side::from_is_batting(!bowling);
            for _ in 0..times {
                if !session.increment(&stat, side) {
                    bail!("unknown {:?} stat {:?}", side, stat);
                }
            }

            commit_and_print(&mut session, client.as_ref()).await?;
        }
        Commands::Set {
            username,
            field,
            value,
            bowling,
        } => {
            let record = client
                .fetch_stats(&username)
                .await
                .with_context(|| format!("fetching stats for {}", username))?;
            let mut session = EditSession::open(record);

            let side = Side::from_is_batting(!bowling);
            if !session.set_field(&field, &value, side) {
                bail!("unknown {:?} field {:?}", side, field);
            }

            commit_and_print(&mut session, client.as_ref()).await?;
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::from_store(client, timeout);
            let app = build_router(state, &config.server.cors_origin);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Serving stats API on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// Save an edited record and print its metrics.
async fn commit_and_print(session: &mut EditSession, client: &ClubApiClient) -> Result<()> {
    match session.commit(client).await {
        Ok(saved) => {
            let metrics = DerivedMetrics::from_record(saved);
            println!("{}", serde_json::to_string_pretty(&metrics)?);
            Ok(())
        }
        Err(e) => {
            tracing::error!("{}", e);
            bail!("{}; record not saved, rerun to retry", e)
        }
    }
}
