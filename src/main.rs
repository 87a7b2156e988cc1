use fissionsim::core::{Bounds, Simulation};
use fissionsim::SimConfig;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Headless frame driver: ticks the engine and reports populations instead of drawing.
#[derive(Parser, Debug)]
#[command(name = "fissionsim", version, about)]
struct Args {
    /// YAML configuration file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// RNG seed; overrides the one in the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print a population line every N frames (0 = only the summary)
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn load_config(args: &Args) -> Result<SimConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let cfg = load_config(&args)?;
    info!(?cfg, "starting");

    let bounds = Bounds::new(args.width, args.height)?;
    let mut sim = Simulation::new(cfg, bounds)?;

    for frame in 1..=args.ticks {
        sim.tick()?;
        if args.report_every > 0 && frame % args.report_every == 0 {
            let pop = sim.population();
            println!(
                "t={frame:>6}  n={:>5}  U={:>4}  products={:>5}",
                pop.neutrons().len(),
                pop.fissile().len(),
                pop.products().len()
            );
        }
        if sim.population().neutrons().is_empty() {
            info!(frame, "no free neutrons left");
            break;
        }
    }

    let stats = sim.stats();
    println!(
        "ticks={} fissions={} neutrons_spawned={} escaped={} peak_neutrons={}",
        stats.ticks, stats.fissions, stats.neutrons_spawned, stats.escaped, stats.peak_neutrons
    );
    Ok(())
}
