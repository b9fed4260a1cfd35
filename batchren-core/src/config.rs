use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding the project-level config, relative to the working directory
pub const CONFIG_DIR: &str = ".batchren";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Scan subdirectories by default
    #[serde(default)]
    pub recursive: bool,

    #[serde(default = "default_true")]
    pub include_folders: bool,

    #[serde(default = "default_true")]
    pub show_hidden: bool,

    /// Default preview format: "table", "summary", "json" or "none"
    #[serde(default = "default_preview")]
    pub preview_format: String,

    /// strftime format used by date stamp quick flags
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Counter width used by `generate` when none is given
    #[serde(default = "default_index_padding")]
    pub index_padding: usize,

    /// Whether to use color output by default (None = auto-detect)
    #[serde(default)]
    pub use_color: Option<bool>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            recursive: false,
            include_folders: true,
            show_hidden: true,
            preview_format: default_preview(),
            date_format: default_date_format(),
            index_padding: default_index_padding(),
            use_color: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_preview() -> String {
    "table".to_string()
}

fn default_date_format() -> String {
    "%Y%m%d".to_string()
}

fn default_index_padding() -> usize {
    3
}

impl Config {
    /// Path of the project config under `dir`
    pub fn project_path(dir: &Path) -> PathBuf {
        dir.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load the first config file that exists, or the defaults
    pub fn load_first<I>(candidates: I) -> Result<Self>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        for path in candidates {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::load_from_path(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.defaults.recursive);
        assert!(config.defaults.include_folders);
        assert!(config.defaults.show_hidden);
        assert_eq!(config.defaults.preview_format, "table");
        assert_eq!(config.defaults.date_format, "%Y%m%d");
        assert_eq!(config.defaults.index_padding, 3);
        assert_eq!(config.defaults.use_color, None);
    }

    #[test]
    fn test_config_file_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Config::project_path(temp_dir.path());

        let mut config = Config::default();
        config.defaults.recursive = true;
        config.defaults.show_hidden = false;
        config.defaults.preview_format = "summary".to_string();
        config.defaults.index_padding = 4;
        config.defaults.use_color = Some(false);

        fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        fs::write(&config_path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from_path(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config() {
        let toml_content = r#"
[defaults]
preview_format = "json"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.defaults.preview_format, "json");
        assert!(config.defaults.include_folders);
        assert_eq!(config.defaults.index_padding, 3);
    }

    #[test]
    fn test_load_first_picks_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        let present = temp_dir.path().join("present.toml");
        std::fs::write(&present, "[defaults]\nrecursive = true\n").unwrap();

        let config = Config::load_first([missing.clone(), present]).unwrap();
        assert!(config.defaults.recursive);

        let config = Config::load_first([missing]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[defaults\n").unwrap();

        let err = Config::load_from_path(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("config.toml"));
    }
}
