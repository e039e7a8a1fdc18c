use clap::Parser;
use colored::Colorize;
use lineseek::{scan, ScanConfig, ScanError, ScanOutput};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod filenames;

use filenames::is_valid_filename;

type Result<T> = std::result::Result<T, ScanError>;

const DEFAULT_RESULT_FILE: &str = "lineseek.txt";
const DEFAULT_LOG_FILE: &str = "lineseek.log";

/// Search every file under a directory for a literal string
#[derive(Parser)]
#[command(name = "lineseek", author, version, about, long_about = None)]
struct Cli {
    /// Literal string to search for (no pattern syntax, case-sensitive)
    pattern: String,

    /// Root directory to search in
    #[arg(short = 'd', long = "dir", default_value = ".")]
    dir: PathBuf,

    /// Number of worker tasks to distribute the scan across
    #[arg(short = 't', long = "workers", default_value_t = 4)]
    workers: usize,

    /// Filename to write matches to
    #[arg(short = 'r', long = "result-file")]
    result_file: Option<String>,

    /// Filename to write unreadable-file errors to
    #[arg(short = 'l', long = "log-file")]
    log_file: Option<String>,

    /// Show only statistics, not individual matches
    #[arg(short, long)]
    stats: bool,

    /// Print matches without writing result or log files
    #[arg(long)]
    no_output: bool,

    /// Configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.pattern.is_empty() {
        return Err(ScanError::config_error("search string must not be empty"));
    }

    let cli_config = ScanConfig {
        pattern: cli.pattern,
        root_path: cli.dir,
        workers: cli.workers,
        result_file: cli.result_file.map(PathBuf::from),
        log_file: cli.log_file.map(PathBuf::from),
        stats_only: cli.stats,
        log_level: cli.log_level,
    };

    let mut config = match cli.config {
        Some(path) => ScanConfig::load_from(Some(&path))
            .map_err(|e| ScanError::config_error(e.to_string()))?
            .merge_with_cli(cli_config),
        None => cli_config,
    };

    // Defaults and validation come after the merge so filenames sourced from
    // a config file are checked the same way as CLI flags.
    config.result_file = Some(resolve_filename(
        config.result_file.take(),
        DEFAULT_RESULT_FILE,
        "result",
    )?);
    config.log_file = Some(resolve_filename(
        config.log_file.take(),
        DEFAULT_LOG_FILE,
        "log",
    )?);

    init_tracing(&config.log_level);

    let result = scan(&config)?;

    if !cli.no_output {
        if let Some(path) = &config.result_file {
            write_result_file(path, &result)?;
        }
        if let Some(path) = &config.log_file {
            write_log_file(path, &result)?;
        }
    }

    print_scan_results(&result, config.stats_only);
    Ok(())
}

/// Applies the default filename and rejects names that would escape the
/// working directory or confuse the filesystem.
fn resolve_filename(name: Option<PathBuf>, default: &str, role: &str) -> Result<PathBuf> {
    let name = name.unwrap_or_else(|| PathBuf::from(default));
    if !is_valid_filename(&name.to_string_lossy()) {
        return Err(ScanError::config_error(format!(
            "invalid {} filename: {}",
            role,
            name.display()
        )));
    }
    Ok(name)
}

fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes one `path:line: text` entry per match.
fn write_result_file(path: &Path, result: &ScanOutput) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for m in result.matches() {
        writeln!(writer, "{}:{}: {}", m.path.display(), m.line_number, m.line)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one entry per file that could not be opened or read.
fn write_log_file(path: &Path, result: &ScanOutput) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for err in &result.errors {
        writeln!(writer, "{}: {}", err.path.display(), err.error)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_scan_results(result: &ScanOutput, stats_only: bool) {
    if !stats_only {
        let mut current_file = None;
        for m in result.matches() {
            if current_file != Some(&m.path) {
                println!("\n{}", m.path.display().to_string().blue());
                current_file = Some(&m.path);
            }
            println!("{}: {}", m.line_number.to_string().green(), m.line);
        }
    }

    println!(
        "\nFound {} matches in {} of {} files",
        result.total_matches(),
        result.files_with_matches(),
        result.total_files_scanned
    );

    if !result.errors.is_empty() {
        eprintln!(
            "{}",
            format!("{} files could not be read", result.errors.len()).yellow()
        );
    }
}
