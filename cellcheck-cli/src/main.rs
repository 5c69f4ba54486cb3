use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::path::{Path, PathBuf};

// Import from cellcheck-core
use cellcheck_core::{
    resolve_input, ConfigOrigin, DocumentProcessor, ScanConfig, ScanSummary, SourceError,
    UnimplementedFetcher,
};

// Import CLI utilities
use cellcheck_cli::{show_document, write_report, SystemViewer};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(name = "cellcheck")]
#[command(about = "Check Word document tables for formatting convention problems")]
struct Args {
    /// Path to the Word document (.docx) to check
    file_path: Option<String>,

    /// Do not flag cells that contain line breaks
    #[arg(long)]
    skip_line_breaks: bool,

    /// Do not flag centered cells lacking an alignment comment
    #[arg(long)]
    skip_formatting: bool,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Also write the findings as JSON to this path
    #[arg(long)]
    report: Option<String>,

    /// Report findings without writing them into the document
    #[arg(long)]
    dry_run: bool,

    /// Do not open the document after findings are recorded
    #[arg(long)]
    no_open: bool,

    /// Debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("❌ {error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.quiet, args.verbose)?;

    let Some(file_path) = args.file_path.as_deref() else {
        Args::command().print_help()?;
        println!();
        return Ok(());
    };

    let path = match resolve_input(file_path, &UnimplementedFetcher) {
        Ok(path) => path,
        Err(SourceError::NotFound(path)) => {
            println!("⚠️  File not found: {}", path.display());
            println!("   Please check the file path.");
            return Ok(());
        }
        Err(error) => return Err(error.into()),
    };

    let (config, origin) = ScanConfig::load_with_fallback(args.config.as_deref().map(Path::new));
    let config = config.with_overrides(args.skip_line_breaks, args.skip_formatting);
    if let Some(notice) = config_notice(args.config.as_deref(), &origin) {
        println!("{notice}");
    }

    let processor = if args.dry_run {
        DocumentProcessor::new_dry_run(config)
    } else {
        DocumentProcessor::new_cli(config)
    };

    println!("📄 Checking: {}", path.display());
    let summary = processor
        .process(&path)
        .with_context(|| format!("failed to check {}", path.display()))?;

    print_summary(&summary, args.dry_run);

    if let Some(report_path) = &args.report {
        write_report(&summary, Path::new(report_path))?;
    }

    if summary.saved && !args.no_open {
        show_document(&SystemViewer, &summary.path);
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CELLCHECK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

/// Console line about the config in use, if one was asked for
fn config_notice(requested: Option<&str>, origin: &ConfigOrigin) -> Option<String> {
    match (requested, origin) {
        (_, ConfigOrigin::File(path)) => Some(format!("📋 Loaded config from: {}", path.display())),
        (Some(requested), ConfigOrigin::Defaults) => Some(format!(
            "⚠️  Could not load config {requested}, using default conventions"
        )),
        (None, ConfigOrigin::Defaults) => None,
    }
}

fn print_summary(summary: &ScanSummary, dry_run: bool) {
    let report = &summary.report;
    println!("📊 Tables scanned: {}", report.tables_scanned);

    if !report.existing.is_empty() {
        println!(
            "ℹ️  {} finding(s) from an earlier check are still present",
            report.existing.len()
        );
    }

    if !report.modified() {
        println!("{GREEN}No findings found!{RESET}");
        return;
    }

    for record in &report.added {
        println!("   - {}: {}", record.location, record.label);
    }

    if dry_run {
        println!(
            "{RED}{} finding(s) detected; the file was not changed (dry run).{RESET}",
            report.added.len()
        );
    } else {
        println!("{RED}Findings recorded in the file.{RESET}");
        println!("💾 Saved: {}", display_path(&summary.path).display());
    }
}

fn display_path(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
