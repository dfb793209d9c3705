use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use splitflap_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "splitflap")]
#[command(author, version, about = "Split-flap text effects for the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file to use instead of ~/.config/splitflap/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the animated landing screen
    Run,
    /// Stream a scramble reveal of TEXT to stdout
    Reveal {
        /// Text to resolve into
        text: String,
        /// Milliseconds between steps
        #[arg(long, default_value_t = 50)]
        interval_ms: u64,
        /// Steps per run (derived from the text length when omitted)
        #[arg(long)]
        max_steps: Option<u32>,
        /// Steps between neighbouring positions locking in
        #[arg(long, default_value_t = 2)]
        lock_in_factor: u32,
        /// Filler glyphs: a preset name (morph, alnum, upper, digits, binary, blocks) or literal characters
        #[arg(long, default_value = "morph")]
        pool: String,
        /// Number of runs (0 = until interrupted)
        #[arg(long, default_value_t = 1)]
        repeat: u32,
        /// Pause between runs in milliseconds
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
        pause_ms: u64,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Emit one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Stream a cycler over ITEMS to stdout
    Cycle {
        /// Items to rotate through
        #[arg(required = true)]
        items: Vec<String>,
        /// Milliseconds each item is shown
        #[arg(long, default_value_t = 3000)]
        interval_ms: u64,
        /// Stop after this many frames (default: until interrupted)
        #[arg(long)]
        count: Option<u64>,
        /// Emit one JSON object per frame
        #[arg(long)]
        json: bool,
    },
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path
    Path,
}

/// Initialize tracing; the full-screen UI logs to a file so it does not draw over frames
fn init_logging(config: &AppConfig, log_to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if log_to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let config = Arc::new(AppConfig::load_from(&config_path)?);

    let full_screen = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, full_screen)?;

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config).await,
        Some(Commands::Reveal {
            text,
            interval_ms,
            max_steps,
            lock_in_factor,
            pool,
            repeat,
            pause_ms,
            seed,
            json,
        }) => {
            let args = commands::reveal::RevealArgs {
                text,
                interval_ms,
                max_steps,
                lock_in_factor,
                pool,
                repeat,
                pause_ms,
                seed,
                json,
            };
            commands::reveal::run(args).await
        }
        Some(Commands::Cycle {
            items,
            interval_ms,
            count,
            json,
        }) => commands::cycle::run(items, interval_ms, count, json).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Init { force } => commands::config::init(&config_path, force),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_pause_must_be_positive() {
        let result = Cli::try_parse_from(["splitflap", "reveal", "abc", "--repeat", "3", "--pause-ms", "0"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["splitflap", "reveal", "abc", "--repeat", "3", "--pause-ms", "1"])
            .unwrap();
        assert!(matches!(cli.command, Some(Commands::Reveal { pause_ms: 1, repeat: 3, .. })));
    }

    #[test]
    fn test_no_subcommand_runs_landing_screen() {
        let cli = Cli::try_parse_from(["splitflap"]).unwrap();
        assert!(cli.command.is_none());
    }
}
