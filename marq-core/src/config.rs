use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parsing(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parsing(e) => write!(f, "JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        ConfigError::Parsing(value)
    }
}

/// Run options after merging defaults, the config file, and CLI flags.
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct Options {
    /// Input directory, or a single Markdown file in single mode
    pub input: PathBuf,
    /// Output directory for generated HTML
    pub output: PathBuf,
    /// User template path; the built-in template is used when absent
    pub template: Option<PathBuf>,
    /// Candidate stylesheets for directory-exact association
    pub css: Vec<PathBuf>,
    pub watch: bool,
    pub single: bool,
    pub live: bool,
    pub port: u16,
}

/// Optional overlay read from the JSON config file. Any subset of the
/// option keys may be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub css: Option<Vec<PathBuf>>,
    pub watch: Option<bool>,
    pub single: Option<bool>,
    pub live: Option<bool>,
    pub port: Option<u16>,
}

impl FileConfig {
    /// Reads the config file if present. A missing file is not an error;
    /// malformed JSON is.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let data = std::fs::read_to_string(path)?;
        let config: FileConfig = serde_json::from_str(&data)?;

        Ok(Some(config))
    }
}
