use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tgfp::calculate::WeekScope;
use tgfp::config::AppConfig;
use tgfp::models::{Game, GameStatus, Pick};
use tgfp::query::{GameFilter, PickFilter, PlayerFilter, PlayerOrder};
use tgfp::storage::JsonlStore;
use tgfp::EntityStore;

#[derive(Parser)]
#[command(name = "tgfp")]
#[command(about = "Standings and score updates for The Great Football Pool")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./tgfp.toml")]
    config: PathBuf,

    /// Data directory path (overrides config and TGFP_DATA_DIR)
    #[arg(long)]
    data_dir: Option<String>,

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
    /// Show the current and active week
    Week {
        /// Season to resolve (default: current season)
        #[arg(long)]
        season: Option<u32>,
    },

    /// List the seasons that have games
    Seasons,

    /// Print standings by total points
    Standings {
        /// Include inactive players
        #[arg(long)]
        all: bool,
    },

    /// Recompute pick totals for a week and write them back
    Recompute {
        #[arg(long)]
        week: u32,

        /// Season (default: current season)
        #[arg(long)]
        season: Option<u32>,

        /// Compute and print without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Record a score update for one game and rescore its week
    Score {
        /// Game identifier from the schedule feed
        #[arg(long)]
        game: String,

        #[arg(long)]
        home: u32,

        #[arg(long)]
        road: u32,

        /// Game status, e.g. STATUS_IN_PROGRESS or STATUS_FINAL
        #[arg(long, default_value = "STATUS_FINAL")]
        status: String,

        /// Season (default: current season)
        #[arg(long)]
        season: Option<u32>,
    },

    /// Cumulative points per week for every active player, as CSV
    WinCsv,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?
        .with_env_overrides()
        .with_data_dir_override(cli.data_dir.clone());
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.json_logs |= cli.json_logs;
    config.validate()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if config.json_logs {
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

    tracing::debug!("Starting tgfp v{}", env!("CARGO_PKG_VERSION"));

    let mut pool = EntityStore::new(JsonlStore::new(config.storage()));

    match cli.command {
        Commands::Week { season } => {
            let season = match season {
                Some(season) => season,
                None => pool.current_season()?,
            };
            println!("Season:      {}", season);
            println!("Current week: {}", pool.current_week_in(season)?);
            println!("Active week:  {}", pool.current_active_week_in(season)?);
        }

        Commands::Seasons => {
            for season in pool.seasons()? {
                println!("{}", season);
            }
        }

        Commands::Standings { all } => {
            let mut filter = PlayerFilter::new()
                .ordered_by(PlayerOrder::TotalPoints)
                .reversed();
            if !all {
                filter = filter.with_active(true);
            }

            println!(
                "{:<4} {:<20} {:>6} {:>6} {:>6} {:>6} {:>7}",
                "#", "Player", "Wins", "Losses", "Bonus", "Points", "Pct"
            );
            for (rank, player) in pool.find_players(&filter)?.into_iter().enumerate() {
                let stats = pool.player_stats(player)?;
                println!(
                    "{:<4} {:<20} {:>6} {:>6} {:>6} {:>6} {:>7.3}",
                    rank + 1,
                    stats.player().nick_name,
                    stats.wins(WeekScope::All),
                    stats.losses(WeekScope::All),
                    stats.bonus(WeekScope::All),
                    stats.total_points(),
                    stats.winning_pct()
                );
            }
        }

        Commands::Recompute {
            week,
            season,
            dry_run,
        } => {
            let season = match season {
                Some(season) => season,
                None => pool.current_season()?,
            };
            let scored = pool.recompute_week(week, Some(season))?;

            if dry_run {
                for pick in pool.find_picks(
                    &PickFilter::new()
                        .with_week_no(week)
                        .with_season(season),
                )? {
                    println!(
                        "{}: {}-{} bonus {}",
                        pick.player_id, pick.wins, pick.losses, pick.bonus
                    );
                }
                println!("[DRY RUN] Recomputed {} picks, nothing written", scored);
            } else {
                let written =
                    pool.flush(|pick: &Pick| pick.week_no == week && pick.season == season)?;
                println!("Recomputed and saved {} picks", written);
            }
        }

        Commands::Score {
            game,
            home,
            road,
            status,
            season,
        } => {
            let mut filter = GameFilter::new().with_tgfp_nfl_game_id(game.as_str());
            if let Some(season) = season {
                filter = filter.with_season(season);
            }

            let (week, season) = {
                let mut found = pool.find_games_mut(&filter)?;
                let Some(target) = found.first_mut() else {
                    bail!("No game {} in the selected season", game);
                };
                target.home_team_score = home;
                target.road_team_score = road;
                target.game_status = GameStatus::from(status);
                (target.week_no, target.season)
            };

            pool.flush(|g: &Game| g.tgfp_nfl_game_id == game)?;
            let scored = pool.recompute_week(week, Some(season))?;
            pool.flush(|pick: &Pick| pick.week_no == week && pick.season == season)?;
            println!(
                "Updated {} and rescored {} picks for week {}",
                game, scored, week
            );
        }

        Commands::WinCsv => {
            for player in pool.find_players(&PlayerFilter::new().with_active(true))? {
                println!("{}", pool.win_csv(player)?);
            }
        }
    }

    Ok(())
}
