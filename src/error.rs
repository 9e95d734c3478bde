//! Error types for the tic-tac-toe engine

use std::path::PathBuf;

use thiserror::Error;

use crate::tictactoe::Player;

/// Main error type for the engine
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position ({row}, {col}) is out of bounds (row and column must be 0-2)")]
    InvalidPosition { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("no legal moves available")]
    NoLegalMove,

    #[error("game already over")]
    GameOver,

    #[error("it is {expected:?}'s turn, not {attempted:?}'s")]
    WrongTurn { expected: Player, attempted: Player },

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("unknown label '{label}' on line {line} (expected 'positive' or 'negative')")]
    UnknownLabel { line: u64, label: String },

    #[error("dataset '{}' is unreadable: {source}", path.display())]
    DatasetUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid difficulty tier '{input}'. Expected one of: {expected}")]
    ParseTier { input: String, expected: String },

    #[error("invalid player '{input}' (expected 'x' or 'o')")]
    ParsePlayer { input: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
