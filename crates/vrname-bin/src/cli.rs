use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tracker::TestStatus;

#[derive(Parser)]
#[command(name = "vrname")]
#[command(version)]
#[command(about = "Rename VR videos to match player naming conventions")]
#[command(
    long_about = "A CLI tool that reads a naming convention file, previews filename-suffix patterns for a chosen VR player, and copies videos into an output directory under their new names."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, default_value = "raw", help = "Directory holding the source videos")]
    pub raw_dir: PathBuf,

    #[arg(
        long,
        global = true,
        default_value = "fixed_metadata",
        help = "Directory receiving the renamed copies"
    )]
    pub out_dir: PathBuf,

    #[arg(
        long,
        global = true,
        default_value = "naming_convention.txt",
        help = "Naming convention source file"
    )]
    pub conventions: PathBuf,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "List the players found in the convention file")]
    Players,

    #[command(about = "List the filename patterns recorded for a player")]
    Patterns {
        #[arg(help = "Canonical player name, as printed by 'players'")]
        player: String,
    },

    #[command(about = "List the video files under the raw directory")]
    Files,

    #[command(about = "Preview new names without copying anything")]
    Preview {
        #[arg(short, long, help = "Pattern token to insert (e.g. '_LR')")]
        pattern: String,

        #[arg(help = "Video ids relative to the raw directory (defaults to all)")]
        files: Vec<String>,
    },

    #[command(about = "Copy videos into the output directory under their new names")]
    Export {
        #[arg(short, long, help = "Pattern token to insert (e.g. '_LR')")]
        pattern: String,

        #[arg(help = "Video ids relative to the raw directory (defaults to all)")]
        files: Vec<String>,

        #[arg(long, help = "Report what would be copied without copying")]
        dry_run: bool,

        #[arg(short, long, help = "Confirm the rename plan before copying")]
        interactive: bool,
    },

    #[command(about = "Pick a player, pattern and files interactively, then export")]
    Run {
        #[arg(long, help = "Report what would be copied without copying")]
        dry_run: bool,
    },

    #[command(about = "Track manual test runs")]
    Tracker {
        #[arg(long, default_value = "test_tracker.json", help = "Tracker state file")]
        file: PathBuf,

        #[command(subcommand)]
        command: TrackerCommands,
    },
}

#[derive(Subcommand)]
pub enum TrackerCommands {
    #[command(about = "Record a new test")]
    Add {
        #[arg(help = "What this test exercises")]
        description: String,

        #[arg(short, long, value_enum, default_value_t = TestStatus::Pending)]
        status: TestStatus,

        #[arg(short, long, default_value = "")]
        notes: String,

        #[arg(short, long, default_value = "", help = "Folder holding the test files")]
        folder: String,
    },

    #[command(about = "Update the status of an existing test")]
    Update {
        #[arg(help = "Test number to update")]
        number: u32,

        #[arg(value_enum)]
        status: TestStatus,

        #[arg(short, long)]
        notes: Option<String>,

        #[arg(short, long, help = "Folder holding the test files")]
        folder: Option<String>,
    },

    #[command(about = "Show all recorded tests")]
    List,

    #[command(about = "Show the next test number without recording a test")]
    Next,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
