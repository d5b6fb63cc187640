use std::path::PathBuf;

/// Errors raised when a move is rejected. None of them change engine state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is out of range (board has {width} columns)")]
    InvalidColumn { column: usize, width: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("game is over; reset to play again")]
    GameOver,
}

/// Errors that can occur when building a board or loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("board sides must be between {min} and {max}, got {height}x{width}")]
    InvalidDimensions {
        height: usize,
        width: usize,
        min: usize,
        max: usize,
    },

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
