//! MultiTool CLI - Command-line front end for MultiTool
//!
//! Provides `multitool tools`, `multitool profile`, and `multitool tray`.

mod commands;

use clap::{Parser, Subcommand};
use multitool_core::AppContext;
use tracing_subscriber::EnvFilter;

use commands::profile::ProfileCommands;
use commands::tools::ToolCommands;

/// Environment variable holding the log filter
const LOG_ENV: &str = "MULTITOOL_LOG";

#[derive(Parser)]
#[command(name = "multitool")]
#[command(about = "MultiTool - Windows utility shell")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and use tools
    Tools {
        #[command(subcommand)]
        action: ToolCommands,
    },
    /// Manage network profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Show the tray menu
    Tray {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let ctx = AppContext::from_env();

    let result = match cli.command {
        Commands::Tools { action } => commands::tools::execute(action, &ctx),
        Commands::Profile { action } => commands::profile::execute(action, &ctx),
        Commands::Tray { json } => commands::tray::execute(json, &ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
