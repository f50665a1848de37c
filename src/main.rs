// src/main.rs

use anyhow::Result;
use branchdiff::api::ApiClient;
use branchdiff::compare::{diff_branches, group_by_arch};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "branchdiff")]
#[command(author, version, about = "Compare binary package sets between two ALT Linux branches", long_about = None)]
struct Cli {
    /// First branch name
    #[arg(default_value = "sisyphus")]
    first: String,

    /// Second branch name
    #[arg(default_value = "p11")]
    second: String,

    /// Output file for the JSON report
    #[arg(short, long, default_value = "result.json")]
    output: PathBuf,

    /// Skip the save confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

/// Answers counting as confirmation: "y" or "Y"
fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Ask the user to confirm the output path before any network work
fn confirm_save(path: &Path) -> io::Result<bool> {
    println!("Are you sure to save the result json file to: {} ?", path.display());
    print!("press Y/n to continue... ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let output_path = std::env::current_dir()?.join(&cli.output);

    if !cli.yes && !confirm_save(&output_path)? {
        eprintln!("You need to confirm the output path by answering <y>");
        std::process::exit(1);
    }

    info!("Comparing branches '{}' and '{}'", cli.first, cli.second);

    // The two fetches run sequentially; the first failure aborts the run
    let client = ApiClient::new()?;
    let first_export = client.fetch_branch(&cli.first)?;
    let second_export = client.fetch_branch(&cli.second)?;

    let grouped_first = group_by_arch(first_export.packages);
    let grouped_second = group_by_arch(second_export.packages);

    let report = diff_branches(&grouped_first, &grouped_second, &cli.first, &cli.second)?;
    info!(
        "Report: {} only in '{}', {} only in '{}', {} newer in '{}'",
        report.only_in_first.len(),
        cli.first,
        report.only_in_second.len(),
        cli.second,
        report.newer_in_first.len(),
        cli.first
    );

    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(&output_path, json)?;

    println!("json file is saved: {}", output_path.display());
    println!(
        "Comparing branch_1: <{}> and branch_2: <{}> is finished",
        cli.first, cli.second
    );

    Ok(())
}
