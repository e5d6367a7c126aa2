use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tip_tracker::api::{self, state::AppState};
use tip_tracker::cleanup;
use tip_tracker::config::AppConfig;
use tip_tracker::leaderboard::{self, CountingMode};
use tip_tracker::storage::{SeasonStore, StorageConfig};
use tip_tracker::tipping;

#[derive(Parser)]
#[command(name = "tip-tracker")]
#[command(about = "Season-long footy tipping competition engine")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path
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
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show round statuses and the current tipping round
    Status,

    /// Print the standings table
    Leaderboard {
        /// Inclusive round cutoff
        #[arg(long)]
        round: Option<u32>,

        /// Count all submitted tips, not just scored ones
        #[arg(long)]
        all_submitted: bool,
    },

    /// List one round's tips with their results
    RoundTips {
        /// Round number; defaults to the most recent closed round
        #[arg(long)]
        round: Option<u32>,
    },

    /// Detect duplicate tips and optionally delete a batch
    Cleanup {
        /// Actually delete; without this the run is a dry-run report
        #[arg(long)]
        apply: bool,

        /// Batch bound; defaults to the configured size
        #[arg(long)]
        batch: Option<usize>,
    },
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let path = PathBuf::from(&cli.config);
    let mut config = if path.exists() {
        AppConfig::from_file(&path)?
    } else {
        AppConfig::default()
    };

    if let Some(data_dir) = &cli.data_dir {
        config.data_dir = data_dir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.log_level, cli.json_logs);

    let store = SeasonStore::new(
        StorageConfig::new(config.data_dir.clone()),
        config.season.season,
    );

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let state = AppState::new(store, config);
            let app = api::router(state);

            let addr = format!("{}:{}", host, port);
            tracing::info!("Listening on http://{}", addr);

            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }

        Commands::Status => {
            let fixtures = store.load_fixtures()?;
            let now = Utc::now();

            let finalized = fixtures.iter().filter(|f| f.is_finalized()).count();
            println!(
                "Season {} ({} fixtures, {} finalized)",
                store.season(),
                fixtures.len(),
                finalized
            );
            for (round, status) in tipping::round_statuses(&fixtures, now) {
                println!("  round {:>2}  {}", round, status);
            }
            println!(
                "Current tipping round: {}",
                tipping::current_tipping_round(&fixtures, now)
            );
        }

        Commands::Leaderboard {
            round,
            all_submitted,
        } => {
            let fixtures = store.load_fixtures()?;
            let tips = store.load_tips()?;
            let projections = tipping::project_results(&fixtures)?;

            let mode = if all_submitted {
                CountingMode::AllSubmitted
            } else {
                CountingMode::ScoredOnly
            };

            let rows = leaderboard::standings(&tips, &projections, round, mode);
            println!("{:<4} {:<20} {:>5} {:>7} {:>6}", "pos", "name", "tips", "points", "margin");
            for row in rows {
                println!(
                    "{:<4} {:<20} {:>5} {:>7} {:>6}",
                    row.position, row.username, row.tips_count, row.total_points, row.total_margin
                );
            }
        }

        Commands::RoundTips { round } => {
            let fixtures = store.load_fixtures()?;
            let tips = store.load_tips()?;
            let round =
                round.unwrap_or_else(|| tipping::most_recent_closed_round(&fixtures, Utc::now()));

            let projections = tipping::project_results(&fixtures)?;
            let rows = leaderboard::build_result_rows(&tips, &projections);

            println!("Round {} tips:", round);
            for row in leaderboard::result_rows_for_round(&rows, round) {
                println!(
                    "  {:<20} {:<16} {:>5} ({:+})",
                    row.username, row.team, row.outcome, row.margin
                );
            }
        }

        Commands::Cleanup { apply, batch } => {
            let tips = store.load_tips()?;
            let fixtures = store.load_fixtures()?;
            let report = cleanup::build_report(&tips, &fixtures);

            println!(
                "{} duplicate group(s), {} deletion candidate(s), {} late tip(s)",
                report.duplicate_groups.len(),
                report.deletion_candidates.len(),
                report.late_tips.len()
            );
            for candidate in &report.deletion_candidates {
                println!(
                    "  candidate: {} round {} {} @ {}",
                    candidate.email, candidate.round, candidate.team, candidate.committed_at
                );
            }
            for warning in &report.late_tips {
                println!(
                    "  late tip: {} round {} {} committed {} (kickoff {})",
                    warning.tip.email,
                    warning.tip.round,
                    warning.tip.team,
                    warning.tip.committed_at,
                    warning.kickoff
                );
            }

            if apply {
                let batch = batch.unwrap_or(config.season.cleanup_batch_size);
                let deleted =
                    cleanup::apply_deletions(&store, &report.deletion_candidates, batch)?;
                println!("Deleted {} tip(s)", deleted.len());
            } else {
                println!("Dry run; pass --apply to delete");
            }
        }
    }

    Ok(())
}
