//! hwtarget CLI: inspect hardware target platform definitions.

mod commands;
mod config;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use config::{HwtargetConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "hwtarget", version, about = "Inspect hardware target platform definitions")]
struct Cli {
    /// Configuration file (default: hwtarget.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format (overrides the configuration file)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the platforms found in hardware folders
    List {
        /// Hardware folder to scan (repeatable; adds to configured paths)
        #[arg(long)]
        hardware: Vec<PathBuf>,
    },
    /// Show details of a platform directory
    Describe {
        /// Platform directory
        dir: PathBuf,
        /// Platform name (default: directory name)
        #[arg(long)]
        name: Option<String>,
    },
    /// List the boards of a platform
    Boards {
        /// Platform directory
        dir: PathBuf,
    },
    /// Show the preferences of one board
    Board {
        /// Platform directory
        dir: PathBuf,
        /// Board ID
        id: String,
    },
    /// List the programmers of a platform
    Programmers {
        /// Platform directory
        dir: PathBuf,
    },
    /// Show the settings of a tool (tools.<id>.* in platform.txt)
    Tool {
        /// Platform directory
        dir: PathBuf,
        /// Tool ID
        id: String,
    },
    /// Show custom menus, optionally with one board's options
    Menus {
        /// Platform directory
        dir: PathBuf,
        /// Board whose menu options to show
        #[arg(long)]
        board: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let config = load_config(cli.config.as_deref(), &cwd)?;
    let format = cli.format.unwrap_or(config.default_format);

    match cli.command {
        Commands::List { hardware } => {
            let mut folders = hardware;
            folders.extend(config.hardware.iter().cloned());
            commands::platform::list(&folders, format)
        }
        Commands::Describe { dir, name } => {
            commands::platform::describe(&dir, name.as_deref(), format)
        }
        Commands::Boards { dir } => commands::board::list(&dir, format),
        Commands::Board { dir, id } => commands::board::show(&dir, &id, format),
        Commands::Programmers { dir } => commands::tool::programmers(&dir, format),
        Commands::Tool { dir, id } => commands::tool::show(&dir, &id, format),
        Commands::Menus { dir, board } => commands::board::menus(&dir, board.as_deref(), format),
    }
}

/// Load the explicit configuration file, or `hwtarget.toml` in `cwd`.
fn load_config(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<HwtargetConfig> {
    match explicit {
        Some(path) => HwtargetConfig::load(path),
        None => Ok(HwtargetConfig::load_from_dir(cwd)?.unwrap_or_default()),
    }
}
