mod cli;
mod preview;
mod tracker;

use anyhow::Result;
use cli::{Cli, Commands, TrackerCommands};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vrname_core::{ConventionTable, ExportStatus, Roots};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    setup_logging(&cli)?;

    info!("Starting vrname");

    let roots = Roots::new(cli.raw_dir.clone(), cli.out_dir.clone());

    match cli.command {
        Commands::Players => handle_players_command(&cli.conventions)?,
        Commands::Patterns { player } => handle_patterns_command(&cli.conventions, &player)?,
        Commands::Files => handle_files_command(&roots)?,
        Commands::Preview { pattern, files } => {
            handle_preview_command(&roots, &pattern, files)?;
        }
        Commands::Export {
            pattern,
            files,
            dry_run,
            interactive,
        } => {
            handle_export_command(&roots, &pattern, files, dry_run, interactive)?;
        }
        Commands::Run { dry_run } => {
            handle_run_command(&roots, &cli.conventions, dry_run)?;
        }
        Commands::Tracker { file, command } => handle_tracker_command(&file, command)?,
    }

    info!("vrname completed successfully");
    Ok(())
}

// The convention file is optional: a missing or unreadable file is an
// empty table, per-line junk is skipped by the parser.
fn load_conventions(path: &Path) -> ConventionTable {
    match fs::read_to_string(path) {
        Ok(text) => vrname_core::parse_conventions(&text),
        Err(err) => {
            debug!("Convention file {:?} not readable ({}); using empty table", path, err);
            ConventionTable::new()
        }
    }
}

fn handle_players_command(conventions: &Path) -> Result<()> {
    let table = load_conventions(conventions);

    if table.is_empty() {
        println!("No naming conventions found in {:?}", conventions);
        return Ok(());
    }

    for player in table.keys() {
        println!("{player}");
    }

    Ok(())
}

fn handle_patterns_command(conventions: &Path, player: &str) -> Result<()> {
    let table = load_conventions(conventions);

    let Some(patterns) = table.get(player) else {
        println!("No player named '{player}' in {:?}", conventions);
        return Ok(());
    };

    for pattern in patterns {
        println!("{pattern}");
    }

    Ok(())
}

fn handle_files_command(roots: &Roots) -> Result<()> {
    let files = vrname_core::list_videos(&roots.raw)?;

    if files.is_empty() {
        println!("No video files found under {:?}", roots.raw);
        return Ok(());
    }

    for file in &files {
        println!("{file}");
    }

    Ok(())
}

fn handle_preview_command(roots: &Roots, pattern: &str, files: Vec<String>) -> Result<()> {
    validate_pattern(pattern)?;

    let files = resolve_files(roots, files)?;
    if files.is_empty() {
        println!("No files to preview.");
        return Ok(());
    }

    let plans = vrname_core::plan_renames(&files, pattern);
    preview::render_plan(&plans);

    Ok(())
}

fn handle_export_command(
    roots: &Roots,
    pattern: &str,
    files: Vec<String>,
    dry_run: bool,
    interactive: bool,
) -> Result<()> {
    validate_pattern(pattern)?;

    info!("Export pattern: '{}'", pattern);
    info!("Raw directory: {:?}", roots.raw);
    info!("Output directory: {:?}", roots.fixed);

    if dry_run {
        warn!("Dry run mode - no changes will be made");
    }

    let files = resolve_files(roots, files)?;
    if files.is_empty() {
        println!("No files to export.");
        return Ok(());
    }

    if interactive {
        let plans = vrname_core::plan_renames(&files, pattern);
        if !preview::show_plan_and_confirm(&plans)? {
            println!("Export cancelled.");
            return Ok(());
        }
    }

    run_export(roots, &files, pattern, dry_run)
}

fn handle_run_command(roots: &Roots, conventions: &Path, dry_run: bool) -> Result<()> {
    use inquire::{Confirm, MultiSelect, Select};

    let table = load_conventions(conventions);
    if table.is_empty() {
        anyhow::bail!("No naming conventions found in {:?}", conventions);
    }

    let players: Vec<String> = table.keys().cloned().collect();
    let player = Select::new("Which player is this for?", players).prompt()?;

    let patterns = table.get(&player).cloned().unwrap_or_default();
    if patterns.is_empty() {
        anyhow::bail!("No patterns recorded for player '{}'", player);
    }
    let pattern = Select::new("Which pattern should be inserted?", patterns).prompt()?;

    let files = vrname_core::list_videos(&roots.raw)?;
    if files.is_empty() {
        anyhow::bail!("No video files found under {:?}", roots.raw);
    }
    let selected = MultiSelect::new("Which files should be renamed?", files).prompt()?;
    if selected.is_empty() {
        println!("Nothing selected.");
        return Ok(());
    }

    let plans = vrname_core::plan_renames(&selected, &pattern);
    preview::render_plan(&plans);

    if dry_run {
        warn!("Dry run mode - no changes will be made");
    }

    let proceed = Confirm::new("Copy these files?").with_default(true).prompt()?;
    if !proceed {
        println!("Export cancelled.");
        return Ok(());
    }

    run_export(roots, &selected, &pattern, dry_run)
}

fn handle_tracker_command(file: &Path, command: TrackerCommands) -> Result<()> {
    match command {
        TrackerCommands::Add {
            description,
            status,
            notes,
            folder,
        } => {
            let number = tracker::add_test(file, &description, status, &notes, &folder)?;
            println!("Added Test #{number}: {description}");
        }
        TrackerCommands::Update {
            number,
            status,
            notes,
            folder,
        } => {
            if tracker::update_test(file, number, status, notes.as_deref(), folder.as_deref())? {
                println!("Updated Test #{number} to {status}");
            } else {
                anyhow::bail!("Test #{} not found", number);
            }
        }
        TrackerCommands::List => {
            let state = tracker::load(file)?;
            print_tests(&state);
        }
        TrackerCommands::Next => {
            let state = tracker::load(file)?;
            println!("Next test number: {}", tracker::next_number(&state));
        }
    }

    Ok(())
}

fn print_tests(state: &tracker::TestTracker) {
    println!("\n=== Test Tracker (Last Updated: {}) ===", state.last_updated);
    println!("Next Test Number: {}", tracker::next_number(state));
    println!();

    if state.tests.is_empty() {
        println!("No tests recorded yet.");
        return;
    }

    for test in &state.tests {
        println!(
            "Test #{} {} {}",
            test.test_number,
            test.status.marker(),
            test.status.to_string().to_uppercase()
        );
        println!("  Description: {}", test.description);
        println!("  Date: {}", test.date);
        if !test.folder.is_empty() {
            println!("  Folder: {}", test.folder);
        }
        if !test.notes.is_empty() {
            println!("  Notes: {}", test.notes);
        }
        println!();
    }
}

// Explicit ids win; otherwise every video under the raw root is in scope.
fn resolve_files(roots: &Roots, files: Vec<String>) -> Result<Vec<String>> {
    if !files.is_empty() {
        return Ok(files);
    }
    Ok(vrname_core::list_videos(&roots.raw)?)
}

fn validate_pattern(pattern: &str) -> Result<()> {
    if pattern.is_empty() {
        anyhow::bail!("Pattern must not be empty");
    }
    if !pattern.starts_with(vrname_core::PATTERN_SEPARATOR) {
        warn!(
            "Pattern '{}' does not start with '{}'; the result may not match any player convention",
            pattern,
            vrname_core::PATTERN_SEPARATOR
        );
    }
    Ok(())
}

fn run_export(roots: &Roots, files: &[String], pattern: &str, dry_run: bool) -> Result<()> {
    vrname_core::ensure_dirs(roots)?;

    let outcomes = vrname_core::export(roots, files, pattern, dry_run);

    let mut copied = 0;
    let mut missing = 0;
    let mut failed = 0;

    for outcome in &outcomes {
        match &outcome.status {
            ExportStatus::Copied { to } => {
                copied += 1;
                println!("  {} -> {}", outcome.file, to);
            }
            ExportStatus::Missing => {
                missing += 1;
                println!("  {} (missing)", outcome.file);
            }
            ExportStatus::Failed { reason } => {
                failed += 1;
                println!("  {} (failed: {})", outcome.file, reason);
            }
        }
    }

    println!("Export complete!");
    println!("  Files copied: {copied}");
    println!("  Files missing: {missing}");
    println!("  Files failed: {failed}");

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .with(filter)
        .init();

    Ok(())
}
