use std::process;

use anyhow::Result;
use clap::{ArgMatches, Command};

fn main() -> Result<()> {
    let args = clap::command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("install").about("Install vrname binary locally"))
        .subcommand(
            Command::new("run")
                .about("Build and run vrname with arguments")
                .trailing_var_arg(true)
                .allow_hyphen_values(true)
                .arg(clap::Arg::new("args")
                    .help("Arguments to pass to vrname")
                    .action(clap::ArgAction::Append)
                    .num_args(0..))
        )
        .subcommand(
            Command::new("test")
                .about("Test Operations")
                .subcommand(Command::new("all").about("Run all tests for the entire project"))
                .subcommand(Command::new("core").about("Run tests for vrname-core"))
                .subcommand(Command::new("bin").about("Run tests for vrname-bin"))
                .subcommand(Command::new("integration").about("Run integration tests"))
        )
        .get_matches();

    match args.subcommand() {
        Some(("install", args)) => handle_install_command(args),
        Some(("run", args)) => handle_run_command(args),
        Some(("test", args)) => handle_test_commands(args),
        Some((command, _)) => anyhow::bail!("Unexpected command: {command}"),
        None => anyhow::bail!("Expected subcommand"),
    }
}

fn handle_install_command(_args: &ArgMatches) -> Result<()> {
    println!("Installing vrname...");
    let status = process::Command::new("cargo")
        .args(["install", "--path", "crates/vrname-bin"])
        .status()?;

    if status.success() {
        println!("✓ vrname installed successfully");
    } else {
        anyhow::bail!("Failed to install vrname");
    }

    Ok(())
}

fn handle_run_command(args: &ArgMatches) -> Result<()> {
    println!("Building and running vrname...");

    // Get any additional arguments passed to run command
    let run_args: Vec<String> = args.get_many::<String>("args")
        .map_or(Vec::new(), |vals| vals.cloned().collect());

    let mut command = process::Command::new("cargo");
    command.args(["run", "--bin", "vrname", "--"]);

    if !run_args.is_empty() {
        command.args(&run_args);
    }

    let status = command.status()?;

    if !status.success() {
        anyhow::bail!("Failed to run vrname");
    }

    Ok(())
}

fn handle_test_commands(args: &ArgMatches) -> Result<()> {
    match args.subcommand() {
        Some(("all", _args)) => test_all(),
        Some(("core", _args)) => test_core(),
        Some(("bin", _args)) => test_bin(),
        Some(("integration", _args)) => test_integration(),
        _ => {
            println!("Available test commands:");
            println!("  all          - Run all tests for the entire project");
            println!("  core         - Run tests for vrname-core");
            println!("  bin          - Run tests for vrname-bin");
            println!("  integration  - Run integration tests");
            Ok(())
        }
    }
}

fn test_all() -> Result<()> {
    println!("🧪 Running all tests for the vrname project...\n");

    let suites: &[(&str, fn() -> Result<()>)] = &[
        ("vrname-core tests", test_core_internal),
        ("vrname-bin tests", test_bin_internal),
        ("workspace tests", test_workspace_internal),
        ("documentation tests", test_docs_internal),
        ("integration tests", test_integration_internal),
    ];

    let mut all_passed = true;
    for (name, suite) in suites {
        println!("Running {name}...");
        match suite() {
            Ok(()) => println!("✅ Passed: {name}"),
            Err(err) => {
                all_passed = false;
                println!("❌ Failed: {name}: {err:?}");
            }
        }
        println!();
    }

    if all_passed {
        println!("🎉 All tests passed successfully!");
    } else {
        println!("💥 Some tests failed. Please check the output above.");
        anyhow::bail!("Test suite failed");
    }

    Ok(())
}

fn test_core() -> Result<()> {
    println!("🧪 Running vrname-core tests...");
    test_core_internal()
}

fn test_bin() -> Result<()> {
    println!("🧪 Running vrname-bin tests...");
    test_bin_internal()
}

fn test_integration() -> Result<()> {
    println!("🧪 Running integration tests...");
    test_integration_internal()
}

// Internal test functions that return Results
fn test_core_internal() -> Result<()> {
    let status = process::Command::new("cargo")
        .args(["test", "--package", "vrname-core"])
        .status()?;

    if !status.success() {
        anyhow::bail!("Core tests failed");
    }
    Ok(())
}

fn test_bin_internal() -> Result<()> {
    let status = process::Command::new("cargo")
        .args(["test", "--package", "vrname-bin"])
        .status()?;

    if !status.success() {
        anyhow::bail!("Binary tests failed");
    }
    Ok(())
}

fn test_workspace_internal() -> Result<()> {
    let status = process::Command::new("cargo")
        .args(["test", "--workspace"])
        .status()?;

    if !status.success() {
        anyhow::bail!("Workspace tests failed");
    }
    Ok(())
}

fn test_docs_internal() -> Result<()> {
    // Only run doc tests for crates that have library targets
    let status = process::Command::new("cargo")
        .args(["test", "--doc", "--package", "vrname-core"])
        .status()?;

    if !status.success() {
        anyhow::bail!("Documentation tests failed");
    }
    Ok(())
}

fn test_integration_internal() -> Result<()> {
    // Build the binary first
    let build_status = process::Command::new("cargo")
        .args(["build", "--bin", "vrname"])
        .status()?;

    if !build_status.success() {
        anyhow::bail!("Failed to build vrname binary");
    }

    // Test basic CLI functionality
    let help_status = process::Command::new("cargo")
        .args(["run", "--bin", "vrname", "--", "--help"])
        .status()?;

    if !help_status.success() {
        anyhow::bail!("CLI help command failed");
    }

    // Test subcommand help
    let export_help_status = process::Command::new("cargo")
        .args(["run", "--bin", "vrname", "--", "export", "--help"])
        .status()?;

    if !export_help_status.success() {
        anyhow::bail!("CLI export help command failed");
    }

    Ok(())
}
