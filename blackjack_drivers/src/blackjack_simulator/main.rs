mod simulation;

use std::path::PathBuf;

use anyhow::{bail, Context};
use blackjack_drivers::parse_config_from_file;
use clap::Parser;
use log::info;

const DEFAULT_CONFIG_PATH: &str = "~/.blackjack.yml";

#[derive(Debug, Parser)]
#[command(author, about, long_about = None)]
struct CommandLineArgs {
    /// The path of the config file
    #[arg(short, long, default_value_t = String::from(DEFAULT_CONFIG_PATH))]
    config: String,

    /// Number of rounds to play, overriding the config file
    #[arg(short, long)]
    rounds: Option<u64>,

    /// Seed for the shoe, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,
}

fn resolve_config_path(config: &str) -> anyhow::Result<PathBuf> {
    if config != DEFAULT_CONFIG_PATH {
        return Ok(PathBuf::from(config));
    }
    let home_dir = home::home_dir().context("cannot find home directory")?;
    let config_file_path = home_dir.join(".blackjack.yml");
    if !config_file_path.exists() {
        bail!("config file {} does not exist", config_file_path.display());
    }
    if config_file_path.is_dir() {
        bail!(
            "{} should be a file rather than a directory",
            config_file_path.display()
        );
    }
    Ok(config_file_path)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandLineArgs::parse();
    let config_path = resolve_config_path(&args.config)?;
    info!("reading config from {}", config_path.display());

    let config = parse_config_from_file(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    let mut simulator_config = config.blackjack_simulator;
    if let Some(rounds) = args.rounds {
        simulator_config.rounds = rounds;
    }
    if args.seed.is_some() {
        simulator_config.seed = args.seed;
    }
    let rule: blackjack::Rule = config.rule.try_into()?;

    let summary = simulation::simulate_rounds(rule, &simulator_config)?;
    println!("{summary}");
    Ok(())
}
