// Run configuration
// Loaded from $BINGO_CONFIG, ./params.json, or ~/.config/bingo/config.json

use serde::Deserialize;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use bingo_engine::BlankCells;

pub const CONFIG_ENV: &str = "BINGO_CONFIG";
pub const LOCAL_CONFIG_FILE: &str = "params.json";

const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com";
const DEFAULT_CELLS: &str = "A1:AA1000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug)]
pub enum ConfigError {
    /// No file at the resolved path.
    NotFound(PathBuf),
    /// File exists but could not be read.
    Read { path: PathBuf, message: String },
    /// JSON syntax or schema error.
    Parse(String),
    /// Parsed, but a value is unusable.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "config file not found: {}", path.display()),
            Self::Read { path, message } => write!(f, "cannot read {}: {message}", path.display()),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
            Self::Invalid(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Spreadsheet holding the mask, the item repository, and the grids.
    pub spreadsheet_id: String,

    /// OAuth client secrets JSON.
    pub credentials_path: PathBuf,

    /// Stored OAuth token JSON (refreshed in place).
    pub token_path: PathBuf,

    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Cell window for every read and write.
    #[serde(default = "default_cells")]
    pub cells: String,

    #[serde(default)]
    pub blank_cells: BlankCells,

    /// Fixed RNG seed. Unset means a fresh entropy seed per run.
    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_cells() -> String {
    DEFAULT_CELLS.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Pick the config file: `$BINGO_CONFIG`, else `./params.json` if it
    /// exists, else the per-user config directory.
    pub fn resolve_path() -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::resolve_path_from(std::env::var_os(CONFIG_ENV), &cwd)
    }

    pub fn resolve_path_from(env: Option<OsString>, cwd: &Path) -> PathBuf {
        if let Some(path) = env.filter(|p| !p.is_empty()) {
            return PathBuf::from(path);
        }
        let local = cwd.join(LOCAL_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        Self::user_config_path()
    }

    pub fn user_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bingo")
            .join("config.json")
    }

    /// Load and validate. Relative paths inside the file resolve against the
    /// file's own directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_json(&contents, path.parent())
    }

    pub fn from_json(contents: &str, base_dir: Option<&Path>) -> Result<Self, ConfigError> {
        // Strip comments (lines starting with //)
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        let mut config: Config =
            serde_json::from_str(&cleaned).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if let Some(base) = base_dir {
            config.credentials_path = rebase(base, &config.credentials_path);
            config.token_path = rebase(base, &config.token_path);
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.spreadsheet_id.trim().is_empty() {
            return Err(ConfigError::Invalid("spreadsheet_id is empty".into()));
        }
        if self.cells.trim().is_empty() {
            return Err(ConfigError::Invalid("cells is empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
