use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for one scan.
///
/// # Configuration locations
///
/// Values can be loaded from YAML files in order of precedence:
/// 1. Custom config file specified via `--config`
/// 2. Local `.lineseek.yaml` in the current directory
/// 3. Global `$CONFIG_DIR/lineseek/config.yaml`
///
/// CLI arguments take precedence over every file; the merge rules live in
/// [`ScanConfig::merge_with_cli`].
///
/// # Example
///
/// ```yaml
/// pattern: "TODO"
/// root_path: "src"
/// workers: 8
/// result_file: "matches.txt"
/// log_file: "scan.log"
/// stats_only: false
/// log_level: "info"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// The literal string to search for (no pattern syntax)
    #[serde(default)]
    pub pattern: String,

    /// Root directory to start the scan from
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Number of worker tasks; each scans one contiguous partition of the
    /// file list. Zero is rejected at scan time.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Where to persist matches; None leaves persistence to the caller
    #[serde(default)]
    pub result_file: Option<PathBuf>,

    /// Where to persist per-file errors; None leaves persistence to the caller
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Whether to only show summary statistics instead of individual matches
    #[serde(default)]
    pub stats_only: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            root_path: default_root_path(),
            workers: default_workers(),
            result_file: None,
            log_file: None,
            stats_only: false,
            log_level: default_log_level(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("lineseek/config.yaml")),
            // Local config
            Some(PathBuf::from(".lineseek.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values; CLI wins
    pub fn merge_with_cli(mut self, cli_config: ScanConfig) -> Self {
        if !cli_config.pattern.is_empty() {
            self.pattern = cli_config.pattern;
        }
        if cli_config.root_path != default_root_path() {
            self.root_path = cli_config.root_path;
        }
        // Always use the CLI worker count
        self.workers = cli_config.workers;
        if cli_config.result_file.is_some() {
            self.result_file = cli_config.result_file;
        }
        if cli_config.log_file.is_some() {
            self.log_file = cli_config.log_file;
        }
        if cli_config.stats_only {
            self.stats_only = true;
        }
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
