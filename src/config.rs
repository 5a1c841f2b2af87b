use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use taskplanner::store::{DEFAULT_STORAGE_KEY, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub storage: StorageConfig,
    pub display: DisplayConfig,

    /// File the config was read from; `None` means built-in defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,

    /// Problems hit while searching for a config file. Loading happens
    /// before logging is up, so the caller reports these afterwards.
    #[serde(skip)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("taskplanner"),
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_sort: SortKey,
    pub animation_ms: u64,
    pub confirm_destructive: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: SortKey::Manual,
            animation_ms: 300,
            confirm_destructive: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            storage: StorageConfig::default(),
            display: DisplayConfig::default(),
            source: None,
            warnings: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let project_name = env!("CARGO_PKG_NAME");
        let mut candidates = Vec::new();

        // Primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(project_name).join(format!("{}.yml", project_name)));
        }

        // Fallback location: ./<project>.yml
        candidates.push(PathBuf::from(format!("{}.yml", project_name)));

        Ok(Self::load_from_candidates(&candidates))
    }

    /// First candidate that exists and parses wins; broken ones are noted
    /// in `warnings` and skipped.
    fn load_from_candidates(candidates: &[PathBuf]) -> Self {
        let mut warnings = Vec::new();
        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(mut config) => {
                    config.warnings = warnings;
                    return config;
                }
                Err(e) => warnings.push(format!("Failed to load config from {}: {:#}", path.display(), e)),
            }
        }

        Self {
            warnings,
            ..Self::default()
        }
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let mut config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.source = Some(path.as_ref().to_path_buf());
        Ok(config)
    }
}
