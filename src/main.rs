use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use rastro::cli::{Cli, Command, GenerateArgs, ReportArgs};
use rastro::commit_index::CommitIndex;
use rastro::composer::{self, ComposerConfig};
use rastro::corpus::{BugSource, CommitSource, FileBugSource, FileCommitSource};
use rastro::csv_output::DatasetCsv;
use rastro::json_output;
use rastro::selector::{self, SelectorConfig};
use rastro::stats::ReportSummary;
use rastro::vcs_map::{FileVcsMap, TranslationMap};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for progress and debug output
fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Run the four-stage dataset pipeline and write both output files
fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut bugs = FileBugSource::new(&args.bugs);
    let mut commits = FileCommitSource::new(&args.commits);

    tracing::info!("refreshing bugs database");
    bugs.refresh()?;
    tracing::info!("refreshing commits database");
    commits.refresh()?;

    tracing::info!("gathering bug fixes");
    let selection = selector::select_fixes(
        bugs.bugs()?,
        SelectorConfig {
            require_fixed: args.require_fixed,
        },
    )?;

    tracing::info!("initializing commit index");
    let index = CommitIndex::build(commits.commits()?, &selection.bug_ids)?;

    tracing::info!("mapping Mercurial commit hashes to Git commit hashes");
    let mapper = FileVcsMap::from_file(&args.vcs_map)?;
    let translations = TranslationMap::build(&index, &mapper, &args.repo_path)?;

    tracing::info!("composing dataset");
    let dataset = composer::compose(
        &selection.fixes,
        &index,
        &translations,
        &ComposerConfig {
            repo_name: args.repo_name,
        },
    );

    let mut csv = DatasetCsv::new();
    for row in dataset.rows {
        csv.add_row(row);
    }
    fs::write(&args.csv, csv.to_csv())
        .with_context(|| format!("failed to write {}", args.csv.display()))?;

    let json = json_output::to_json(&dataset.flat)?;
    fs::write(&args.json, json)
        .with_context(|| format!("failed to write {}", args.json.display()))?;

    tracing::info!(
        csv = %args.csv.display(),
        json = %args.json.display(),
        "dataset written"
    );
    Ok(())
}

/// Recompute counts and deciles from a generated dataset CSV
fn run_report(args: ReportArgs) -> Result<()> {
    let text = fs::read_to_string(&args.csv)
        .with_context(|| format!("failed to read {}", args.csv.display()))?;
    let summary = ReportSummary::from_csv(&text)?;
    print!("{}", summary.render());
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    match args.command {
        Command::Generate(generate) => run_generate(generate),
        Command::Report(report) => run_report(report),
    }
}
