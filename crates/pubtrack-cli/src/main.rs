use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;

use pubtrack_core::artifact::WriteStatus;
use pubtrack_core::config::TrackerConfig;
use pubtrack_core::readme::PatchStatus;
use pubtrack_core::scan::Scanner;
use pubtrack_core::update::{run_update, UpdateSummary};
use pubtrack_core::{Result, TrackerError};

mod args;
use args::{Cli, Commands, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let root = resolve_root(cli.root);

    let result = match cli.command {
        Some(Commands::Update { dry_run }) => {
            handle_update(&root, cli.config.as_deref(), dry_run, cli.quiet)
        }
        Some(Commands::Status { json }) => handle_status(&root, cli.config.as_deref(), json),
        Some(Commands::Init { force }) => handle_init(&root, force),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        // Bare invocation runs a full update
        None => handle_update(&root, cli.config.as_deref(), false, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    if let Some(root) = cli_root {
        return root;
    }

    if let Ok(root) = std::env::var("PUBTRACK_ROOT") {
        return PathBuf::from(root);
    }

    PathBuf::from(".")
}

fn load_config(root: &Path, config_path: Option<&Path>) -> Result<TrackerConfig> {
    match config_path {
        Some(path) => TrackerConfig::load_file(path),
        None => TrackerConfig::load(root),
    }
}

fn handle_update(
    root: &Path,
    config_path: Option<&Path>,
    dry_run: bool,
    quiet: bool,
) -> Result<()> {
    let config = load_config(root, config_path)?;
    let summary = run_update(&config, root, dry_run)?;

    if quiet {
        for warning in &summary.readme.warnings {
            eprintln!("{} {}", "Warning:".yellow(), warning);
        }
        return Ok(());
    }

    print_counts(&summary, &config);
    print_artifacts(&summary, &config);

    if !dry_run {
        print_follow_up();
    }

    Ok(())
}

fn print_counts(summary: &UpdateSummary, config: &TrackerConfig) {
    println!();
    if summary.dry_run {
        println!("{}", "Dry run: nothing will be written.".yellow());
        println!();
    }

    for row in &summary.report.categories {
        println!(
            "  {:<28} {} published / {} on disk / {} planned",
            row.folder, row.published, row.discovered, row.planned
        );
    }

    println!();
    println!(
        "  Notebooks published : {} / {}",
        summary.report.notebooks_published(),
        config.targets.notebooks
    );
    println!(
        "  Datasets published  : {} / {}",
        summary.report.datasets_published, config.targets.datasets
    );
    println!();
}

fn print_artifacts(summary: &UpdateSummary, config: &TrackerConfig) {
    match summary.readme.status {
        PatchStatus::Updated => {
            println!("  {} {}", "Updated:".green(), config.artifacts.readme);
        }
        PatchStatus::Unchanged => {
            println!("  {} {} already up to date", "Ok:".cyan(), config.artifacts.readme);
        }
        PatchStatus::MissingFile => {
            println!(
                "  {} {} not found, skipped",
                "Skipped:".yellow(),
                config.artifacts.readme
            );
        }
    }
    for warning in &summary.readme.warnings {
        println!("  {} {}", "Warning:".yellow(), warning);
    }

    print_write_status(summary.progress, &config.artifacts.progress);
    print_write_status(summary.changelog, &config.artifacts.changelog);
    println!();
}

fn print_write_status(status: WriteStatus, name: &str) {
    match status {
        WriteStatus::Created => println!("  {} {}", "Wrote:".green(), name),
        WriteStatus::Updated => println!("  {} {}", "Updated:".green(), name),
        WriteStatus::Unchanged => println!("  {} {} already up to date", "Ok:".cyan(), name),
    }
}

fn print_follow_up() {
    println!("All done. Now run:");
    println!();
    println!("  git add .");
    println!("  git commit -m \"[publish] category/difficulty/notebook-name\"");
    println!("  git push origin main");
    println!();
}

fn handle_status(root: &Path, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(root, config_path)?;
    if !root.is_dir() {
        return Err(TrackerError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let report = Scanner::new(root, &config).scan();

    if json {
        let value = serde_json::json!({
            "categories": report.categories,
            "notebooks": {
                "published": report.notebooks_published(),
                "discovered": report.notebooks_discovered(),
                "planned": report.planned_total(),
                "target": config.targets.notebooks,
            },
            "datasets": {
                "published": report.datasets_published,
                "target": config.targets.datasets,
            },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println!("Portfolio: {}", root.display());
    println!();
    for row in &report.categories {
        println!(
            "  {:<28} {} published / {} on disk / {} planned",
            row.folder, row.published, row.discovered, row.planned
        );
    }
    println!();
    println!(
        "  Notebooks published : {} / {}",
        report.notebooks_published(),
        config.targets.notebooks
    );
    println!(
        "  Datasets published  : {} / {}",
        report.datasets_published, config.targets.datasets
    );
    println!();

    Ok(())
}

fn handle_init(root: &Path, force: bool) -> Result<()> {
    let path = TrackerConfig::init(root, force)?;
    println!("{} {}", "Initialized:".green(), path.display());
    Ok(())
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "pubtrack", &mut io::stdout());
}
