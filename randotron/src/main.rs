use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use skrate_execution::Ledger;
use skrate_randotron::{load_history, Config, Engine, PracticeLog};
use skrate_types::{Side, TrickCatalog};
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(
    name = "skrate-randotron",
    about = "Play games of SKATE against a simulated past self."
)]
struct Args {
    /// Path to the YAML config file.
    #[arg(long)]
    config: PathBuf,
    /// Override the configured seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Override the configured user.
    #[arg(long)]
    user: Option<String>,
    /// Override the number of games to play.
    #[arg(long)]
    games: Option<usize>,
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(user) = &args.user {
        config.user = user.clone();
    }
    if let Some(games) = args.games {
        config.games = games;
    }
    config
}

fn load_config(args: &Args) -> Result<Config> {
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("could not read config file {}", args.config.display()))?;
    let config: Config = serde_yaml::from_str(&raw).context("could not parse config file")?;
    Ok(apply_overrides(config, args))
}

fn load_logs(path: &Path) -> Result<Vec<PracticeLog>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("could not read history file {}", path.display()))?;
    serde_yaml::from_str(&raw).context("could not parse history file")
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    // Setup logging
    let level = Level::from_str(&config.log_level)
        .map_err(|_| anyhow::anyhow!("invalid log level {:?}", config.log_level))?;
    tracing_subscriber::fmt().with_max_level(level).init();

    // History paths are relative to the config file
    let history_path = match args.config.parent() {
        Some(dir) if config.history_file.is_relative() => dir.join(&config.history_file),
        _ => config.history_file.clone(),
    };
    let logs = load_logs(&history_path)?;
    let mut catalog = TrickCatalog::standard();
    let history = load_history(&logs, &config.user, &mut catalog);
    info!(
        user = %config.user,
        seed = config.seed,
        attempts = history.len(),
        games = config.games,
        "Starting randotron"
    );

    let ledger = Ledger::with_history(catalog, history);
    let mut engine = Engine::seeded(config.engine_config(), ledger, config.seed)?;
    let (mut user_wins, mut past_self_wins, mut failed) = (0, 0, 0);
    for _ in 0..config.games {
        match engine.play_game() {
            Ok(summary) => {
                println!("Game {}", summary.game_id);
                for line in &summary.status_feed {
                    println!("  {line}");
                }
                println!(
                    "  New you: {:<5}  Past you: {:<5}",
                    summary.user_letters, summary.past_self_letters
                );
                match summary.winner {
                    Side::User => user_wins += 1,
                    Side::PastSelf => past_self_wins += 1,
                }
            }
            Err(err) => {
                warn!(%err, "game abandoned");
                failed += 1;
            }
        }
    }
    info!(user_wins, past_self_wins, failed, "Finished randotron");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        serde_yaml::from_str(
            r#"
user: janedoe
seed: 3
log_level: debug
history_file: history.yaml
"#,
        )
        .expect("config should parse")
    }

    #[test]
    fn parses_overrides() {
        let args = Args::parse_from([
            "skrate-randotron",
            "--config",
            "skrate.yaml",
            "--seed",
            "7",
            "--user",
            "johndoe",
            "--games",
            "3",
        ]);
        let config = apply_overrides(config(), &args);
        assert_eq!(config.seed, 7);
        assert_eq!(config.user, "johndoe");
        assert_eq!(config.games, 3);
    }

    #[test]
    fn keeps_file_values_without_overrides() {
        let args = Args::parse_from(["skrate-randotron", "--config", "skrate.yaml"]);
        let config = apply_overrides(config(), &args);
        assert_eq!(config.seed, 3);
        assert_eq!(config.user, "janedoe");
        assert_eq!(config.log_level, "debug");
    }
}
