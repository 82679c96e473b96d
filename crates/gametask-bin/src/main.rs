// gametask: helpers for preparing video game task runs.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use gametask_play::next_movie_path;
use gametask_types::TaskConfig;
use gametask_types::config::CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "gametask", about = "Video game experiment task utilities")]
struct Cli {
    /// Path to the task config JSON file.
    #[arg(long, global = true, default_value = CONFIG_FILE, env = "GAMETASK_CONFIG")]
    config: PathBuf,

    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the movie file the next live session would record to.
    NextMovie {
        /// Output directory (defaults to the configured one).
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Run prefix, e.g. sub-01_ses-001_task-game_run-1.
        #[arg(long)]
        base: String,

        /// Game name (defaults to the configured one).
        #[arg(long)]
        game: Option<String>,

        /// Save state name.
        #[arg(long)]
        state: Option<String>,
    },
    /// Print the effective config, or write the defaults with --init.
    Config {
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = TaskConfig::load_from(&cli.config)?;
    match cli.command {
        Command::NextMovie {
            output_dir,
            base,
            game,
            state,
        } => {
            let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
            let game = game.unwrap_or_else(|| config.default_game.clone());
            let path = next_movie_path(&dir, &base, &game, state.as_deref())?;
            println!("{}", path.display());
        }
        Command::Config { init } => {
            if init {
                init_config(&cli.config)?;
            } else {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
    }
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    TaskConfig::default().save_to(path)?;
    log::info!("wrote default config to {}", path.display());
    Ok(())
}
