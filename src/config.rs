use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;
use crate::game::{DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_SIZE, MIN_SIZE};

/// Board dimensions for new games.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            height: DEFAULT_HEIGHT,
            width: DEFAULT_WIDTH,
        }
    }
}

/// Terminal front end settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Column the selector starts on; the middle column when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<usize>,
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board.height) {
            return Err(ConfigError::Validation(format!(
                "board.height must be in [{MIN_SIZE}, {MAX_SIZE}]"
            )));
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board.width) {
            return Err(ConfigError::Validation(format!(
                "board.width must be in [{MIN_SIZE}, {MAX_SIZE}]"
            )));
        }
        if let Some(col) = self.ui.start_column {
            if col >= self.board.width {
                return Err(ConfigError::Validation(
                    "ui.start_column must be < board.width".into(),
                ));
            }
        }
        Ok(())
    }

    /// Column the UI selector starts on.
    pub fn start_column(&self) -> usize {
        self.ui.start_column.unwrap_or(self.board.width / 2)
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
