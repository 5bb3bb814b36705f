//! huectl command-line entry point

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use once_cell::sync::Lazy;

use huectl::agent::AgentKind;
use huectl::{logging, Config};

/// Version string: `0.1.0 (abc1234, 2026-01-01)` for dev builds.
static VERSION: Lazy<String> = Lazy::new(|| {
    let date = env!("VERGEN_BUILD_DATE");
    match option_env!("VERGEN_GIT_SHA") {
        // Outside a git checkout vergen emits a placeholder instead of a SHA
        Some(sha) if !sha.is_empty() && sha != "VERGEN_IDEMPOTENT_OUTPUT" => {
            let short = sha.get(..7).unwrap_or(sha);
            format!("{} ({}, {})", env!("CARGO_PKG_VERSION"), short, date)
        }
        _ => format!("{} ({})", env!("CARGO_PKG_VERSION"), date),
    }
});

#[derive(Parser)]
#[command(
    name = "huectl",
    version = VERSION.as_str(),
    about = "Set a display background and an LED strip from color commands",
    long_about = "Set a display background and an LED strip from color commands.\n\n\
                  Type a color name (\"make it teal\") or an RGB value (\"set to 0,255,0\").\n\
                  Names are looked up with the configured search command.\n\
                  Type 'exit' or 'quit' to stop."
)]
pub struct Cli {
    /// Config file (default: <config dir>/huectl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive session and render loop (default)
    Run(RunArgs),

    /// Resolve a color name or R,G,B triple and print it
    Resolve {
        /// Color name (e.g. "teal") or triple (e.g. "0,128,128")
        #[arg(value_name = "COLOR")]
        payload: String,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration as TOML
    Show,
    /// Print the default config file path
    Path,
}

/// Flags that override the config file for `run`.
#[derive(Args, Default, Debug, Clone)]
pub struct RunArgs {
    /// Render period in milliseconds
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Agent that interprets commands
    #[arg(long, value_enum)]
    pub agent: Option<AgentKind>,

    /// Do not paint the terminal background
    #[arg(long)]
    pub no_display: bool,

    /// Adalight LED strip device (e.g. /dev/ttyUSB0)
    #[arg(long, value_name = "PATH")]
    pub strip_device: Option<String>,

    /// Color lookup timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub search_timeout: Option<u64>,
}

impl RunArgs {
    /// Apply the flags on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(tick_ms) = self.tick_ms {
            config.render.tick_ms = tick_ms;
        }
        if let Some(agent) = self.agent {
            config.agent.backend = agent;
        }
        if self.no_display {
            config.display.enabled = false;
        }
        if let Some(device) = &self.strip_device {
            config.strip.device = device.clone();
        }
        if let Some(secs) = self.search_timeout {
            config.search.timeout_secs = secs;
        }
        config
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    Ok(match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            commands::completions::handle(shell);
            Ok(())
        }
        Some(Commands::Config(ConfigCommands::Path)) => commands::config::handle_path(),
        command => {
            let config = load_config(cli.config.as_ref())?;
            logging::init(&config.log)?;

            match command {
                Some(Commands::Resolve { payload }) => {
                    commands::resolve::handle(&config, &payload)
                }
                Some(Commands::Config(ConfigCommands::Show)) => {
                    commands::config::handle_show(&config)
                }
                Some(Commands::Run(args)) => commands::run::handle(args.apply(config)),
                _ => commands::run::handle(config),
            }
        }
    }
}
