//! Klimatrack - Entry Point
//!
//! Replays a trip log through the progression core and prints the
//! traveller's level and season-pass projection.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use klimatrack::config::{self, Config};
use klimatrack::finance::Projection;
use klimatrack::progression::{level_title, LevelProgress};
use klimatrack::trips::{TripRecord, TripTotals};
use klimatrack::TravelProfile;

#[derive(Parser, Debug)]
#[command(name = "klimatrack", version, about = "Trip XP, levels and season-pass break-even")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a RON trip log and print level and projection
    Summary {
        /// RON list of trip records
        trips: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Config file (defaults to the platform config directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write the default config for editing
    ExportConfig {
        /// Target file (defaults to the platform config directory)
        path: Option<PathBuf>,
    },
}

/// Everything printed by `summary`
#[derive(Serialize)]
struct Summary {
    title: &'static str,
    progress: LevelProgress,
    profile: TravelProfile,
    totals: TripTotals,
    projection: Projection,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::debug!("Starting Klimatrack v{}", env!("CARGO_PKG_VERSION"));

    match Cli::parse().command {
        Command::Summary { trips, json, config } => {
            let config = match config {
                Some(path) => Config::load_from(&path)
                    .with_context(|| format!("loading config {:?}", path))?,
                None => Config::load(),
            };
            run_summary(&trips, json, &config)
        }
        Command::ExportConfig { path } => {
            let path = match path.or_else(config::default_path) {
                Some(path) => path,
                None => bail!("no config directory available; pass a file path"),
            };
            Config::default()
                .export(&path)
                .with_context(|| format!("writing config {:?}", path))?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}

fn run_summary(path: &Path, json: bool, config: &Config) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let trips: Vec<TripRecord> =
        ron::from_str(&text).with_context(|| format!("parsing trips in {:?}", path))?;
    log::info!("Loaded {} trips from {:?}", trips.len(), path);

    let summary = build_summary(&trips, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

/// Replay trips through a fresh profile
fn build_summary(trips: &[TripRecord], config: &Config) -> Result<Summary> {
    let totals = TripTotals::from_trips(trips)?;
    let mut profile = TravelProfile::new();
    profile.record_all(trips, &config.rewards, &config.curve)?;

    let progress = profile.progress(&config.curve)?;
    let projection = profile.projection(&config.projection)?;
    Ok(Summary {
        title: level_title(progress.level),
        progress,
        profile,
        totals,
        projection,
    })
}

fn print_summary(summary: &Summary) {
    let p = &summary.progress;
    let f = &summary.projection;

    println!("Level {} - {}", p.level, summary.title);
    println!(
        "  {} / {} XP in level ({:.0}%), {} XP to level {}",
        p.current_level_xp,
        p.level_span,
        p.fraction() * 100.0,
        p.xp_to_next_level,
        p.level + 1
    );
    println!("  {} XP total", summary.profile.experience);
    println!();
    println!(
        "Trips: {} ({:.1} km, EUR {:.2})",
        summary.totals.trip_count, summary.totals.total_distance_km, summary.totals.total_cost
    );
    for (mode, count) in &summary.totals.by_mode {
        println!("  {:<18} {}", mode, count);
    }
    println!();
    println!(
        "Season pass: {:.0}% of EUR {:.2}",
        f.percentage, f.reference_price
    );
    if f.is_break_even() {
        println!("  Break-even reached, EUR {:.2} saved", f.savings);
    } else {
        println!(
            "  EUR {:.2} remaining, about {} more trips to break even",
            f.remaining, f.trips_needed_to_break_even
        );
    }
}
