use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use env_logger::{Builder, Env};
use stealthgen::{GenerationConfig, MissionGenerator};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML generation config; built-in defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed override; -1 draws a fresh seed and reports it
    #[arg(short, long, allow_hyphen_values = true)]
    seed: Option<i64>,
    /// Pretty-print the JSON mission
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    config.validate().context("Invalid generation config")?;

    let seed = args.seed.unwrap_or(config.seed);
    let mut generator = MissionGenerator::new(config);
    let mission = generator.generate(seed);
    if !mission.layout.is_viable() {
        bail!("seed {} produced a layout without rooms; adjust the level config", mission.seed);
    }

    let json = if args.pretty {
        serde_json::to_string_pretty(mission)
    } else {
        serde_json::to_string(mission)
    }
    .context("Failed to serialize mission")?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}").context("Failed to write mission")?;

    eprintln!("Seed: {}", mission.seed);
    eprintln!(
        "Rooms: {} of {}x{}",
        mission.layout.rooms.len(),
        mission.layout.width,
        mission.layout.height
    );
    eprintln!(
        "Guards: {} ({} patrolling, {} short)",
        mission.encounters.guards.len(),
        mission.encounters.patrolling_count(),
        mission.encounters.shortfall()
    );
    eprintln!("Layout Fingerprint: {:016x}", mission.layout.fingerprint());
    eprintln!("Encounter Fingerprint: {:016x}", mission.encounters.fingerprint());

    Ok(())
}
