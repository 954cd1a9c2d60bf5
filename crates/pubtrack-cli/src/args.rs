use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "pubtrack")]
#[command(about = "Publication progress tracker for notebook portfolios")]
#[command(version)]
pub struct Cli {
    /// Quiet output (errors and warnings only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Portfolio root (default: current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Config file (default: <root>/pubtrack.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the portfolio and rewrite README, progress log and changelog
    Update {
        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Scan and print counts without writing anything
    Status {
        /// Print the scan report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a commented default pubtrack.toml to the portfolio root
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
