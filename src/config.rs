use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::{ColorMode, PeriodOrder, Split, TotalColumn};

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) compact: bool,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) order: Option<PeriodOrder>,
    #[serde(default)]
    pub(crate) total_column: Option<TotalColumn>,
    #[serde(default)]
    pub(crate) top: Option<usize>,
    #[serde(default)]
    pub(crate) color: Option<ColorMode>,
    #[serde(default)]
    pub(crate) locale: Option<String>,
    #[serde(default)]
    pub(crate) table_prefix: Option<String>,
    #[serde(default)]
    pub(crate) financial_years: Option<Vec<String>>,
    #[serde(default)]
    pub(crate) product_column: Option<String>,
    #[serde(default)]
    pub(crate) customer_column: Option<String>,
    #[serde(default)]
    pub(crate) split: Option<Split>,
}

/// Outcome of the config search, reported once logging is up
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) warnings: Vec<String>,
}

impl Config {
    /// First parseable config file wins; unparseable ones are reported and skipped
    pub(crate) fn load() -> LoadedConfig {
        Self::load_from(&Self::get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> LoadedConfig {
        let mut warnings = Vec::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    warnings.push(format!("Failed to read {}: {}", path.display(), e));
                    continue;
                }
            };
            match toml::from_str::<Config>(&content) {
                Ok(config) => {
                    return LoadedConfig {
                        config,
                        path: Some(path.clone()),
                        warnings,
                    };
                }
                Err(e) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), e));
                }
            }
        }

        LoadedConfig {
            warnings,
            ..LoadedConfig::default()
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/pipesales/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("pipesales").join("config.toml"));
        }

        // 2. Platform config dir (e.g. ~/Library/Application Support/pipesales/config.toml)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("pipesales").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.pipesales.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".pipesales.toml"));
        }

        paths
    }
}

impl LoadedConfig {
    pub(crate) fn source(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
