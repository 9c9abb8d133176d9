//! CLI argument parsing for Rastro

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rastro")]
#[command(version)]
#[command(about = "Bug-introducing-commit dataset builder", long_about = None)]
pub struct Cli {
    /// Enable verbose debug logging to stderr
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate the labeled dataset (tabular CSV plus flat JSON)
    Generate(GenerateArgs),
    /// Print descriptive statistics over a generated dataset
    Report(ReportArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Bug corpus cache (newline-delimited JSON)
    #[arg(long = "bugs", value_name = "FILE")]
    pub bugs: PathBuf,

    /// Commit history cache (newline-delimited JSON)
    #[arg(long = "commits", value_name = "FILE")]
    pub commits: PathBuf,

    /// Mercurial-to-Git hash map (JSON object file)
    #[arg(long = "vcs-map", value_name = "FILE")]
    pub vcs_map: PathBuf,

    /// Repository clone handed to the hash translator
    #[arg(
        long = "repo-path",
        value_name = "DIR",
        default_value = "mozilla-central"
    )]
    pub repo_path: PathBuf,

    /// Tabular output path
    #[arg(long = "csv", value_name = "FILE", default_value = "dataset.csv")]
    pub csv: PathBuf,

    /// Flat JSON output path
    #[arg(long = "json", value_name = "FILE", default_value = "dataset.json")]
    pub json: PathBuf,

    /// Repository label stamped into every flat record
    #[arg(
        long = "repo-name",
        value_name = "NAME",
        default_value = "mozilla-central"
    )]
    pub repo_name: String,

    /// Only select fixes whose resolution is FIXED
    #[arg(long = "require-fixed")]
    pub require_fixed: bool,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Dataset CSV to analyze
    #[arg(long = "csv", value_name = "FILE", default_value = "dataset.csv")]
    pub csv: PathBuf,
}
