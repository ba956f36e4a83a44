use std::path::PathBuf;

use thiserror::Error;

use crate::card::{Card, CardKind, Color};

/// Errors that can occur when manipulating the game state.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("invalid card: {0}")]
    Card(#[from] CardError),
    #[error("game is already over")]
    GameOver,
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
    #[error("snapshot version {found} is not supported (expected {expected})")]
    SnapshotVersion { found: u32, expected: u32 },
}

/// Details of invalid player moves.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidAction {
    #[error("hand index {0} is out of range")]
    HandIndex(usize),
    #[error("card {card} cannot be played on {table}")]
    Incompatible { card: Card, table: Card },
    #[error("only the human seat can leave the table")]
    MachineQuit,
}

/// Rejected card construction or mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("number card digit {0} is outside 0-9")]
    DigitOutOfRange(u8),
    #[error("special cards cannot use the number kind")]
    NumberKindForSpecial,
    #[error("number cards cannot be {0:?}")]
    NumberColor(Color),
    #[error("only wild cards can change color")]
    NotWild,
    #[error("{0:?} is not a color a wild card can take")]
    InvalidWildColor(Color),
    #[error("{kind:?} cards cannot be {color:?}")]
    SpecialColor { kind: CardKind, color: Color },
}

/// Failures while writing or reading a saved game.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save name must not be empty")]
    EmptyName,
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode game: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode game: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("file is not a saved game")]
    BadMagic,
    #[error("saved game is not usable: {0}")]
    Snapshot(#[from] GameError),
}
