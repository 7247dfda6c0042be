use std::path::PathBuf;

use clap::Parser;

/// Zoo staff registration and animal health reports, in the terminal.
#[derive(Debug, Parser)]
#[command(name = "zooport", version, about)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to a JSON config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the data directory from config.
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
}
