//! Saved games.
//!
//! A save file is the 4-byte magic `UNOS` followed by a bincode-encoded
//! [`GameSnapshot`]. The snapshot carries its own version so older files are
//! rejected instead of being misread.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::action::Seat;
use crate::card::Card;
use crate::deck::Deck;
use crate::error::SaveError;
use crate::game::Game;
use crate::hand::Hand;
use crate::state::GameStatus;

pub const SNAPSHOT_VERSION: u32 = 1;
pub const SAVE_EXTENSION: &str = "unosave";
const MAGIC: &[u8; 4] = b"UNOS";

/// Everything needed to resume a game, as plain data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub seed: u64,
    pub turn: u64,
    pub status: GameStatus,
    pub current: Seat,
    pub skip_next: bool,
    pub table_card: Card,
    pub deck: Deck,
    pub human_hand: Hand,
    pub machine_hand: Hand,
}

pub fn encode_snapshot(snapshot: &GameSnapshot) -> Result<Vec<u8>, SaveError> {
    let mut bytes = MAGIC.to_vec();
    bytes.extend(bincode::serde::encode_to_vec(
        snapshot,
        bincode::config::standard(),
    )?);
    Ok(bytes)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<GameSnapshot, SaveError> {
    let body = bytes.strip_prefix(MAGIC).ok_or(SaveError::BadMagic)?;
    let (snapshot, _) = bincode::serde::decode_from_slice(body, bincode::config::standard())?;
    Ok(snapshot)
}

/// Directory holding save files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveStore {
    base_dir: PathBuf,
}

impl Default for SaveStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl SaveStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path for a save name, adding the save extension when it is missing.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, SaveError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SaveError::EmptyName);
        }
        let suffix = format!(".{SAVE_EXTENSION}");
        let file_name = if name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{name}{suffix}")
        };
        Ok(self.base_dir.join(file_name))
    }

    pub fn save(&self, name: &str, game: &Game) -> Result<PathBuf, SaveError> {
        let path = self.path_for(name)?;
        let bytes = encode_snapshot(&game.snapshot())?;
        fs::create_dir_all(&self.base_dir).map_err(|source| SaveError::Io {
            path: self.base_dir.clone(),
            source,
        })?;
        fs::write(&path, bytes).map_err(|source| SaveError::Io {
            path: path.clone(),
            source,
        })?;
        info!("saved game to {}", path.display());
        Ok(path)
    }

    /// Loads a saved game. A missing file is `Ok(None)`.
    pub fn load(&self, name: &str) -> Result<Option<Game>, SaveError> {
        let path = self.path_for(name)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("no saved game at {}", path.display());
                return Ok(None);
            }
            Err(source) => return Err(SaveError::Io { path, source }),
        };
        let game = decode_snapshot(&bytes)
            .and_then(|snapshot| Game::from_snapshot(snapshot).map_err(SaveError::from))
            .inspect_err(|err| warn!("failed to load {}: {err}", path.display()))?;
        info!("loaded game from {}", path.display());
        Ok(Some(game))
    }

    /// Names of the save files in the base directory, sorted.
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SaveError::Io {
                    path: self.base_dir.clone(),
                    source,
                });
            }
        };
        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(SAVE_EXTENSION))
            .filter_map(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .map(str::to_string)
            })
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBuilder;

    #[test]
    fn extension_is_appended_once() {
        let store = SaveStore::new("saves");
        assert_eq!(
            store.path_for("match").unwrap(),
            Path::new("saves").join("match.unosave")
        );
        assert_eq!(
            store.path_for("match.unosave").unwrap(),
            Path::new("saves").join("match.unosave")
        );
        assert!(matches!(store.path_for("  "), Err(SaveError::EmptyName)));
    }

    #[test]
    fn snapshot_bytes_round_trip() {
        let game = GameBuilder::new().with_seed(99).build().unwrap();
        let snapshot = game.snapshot();
        let bytes = encode_snapshot(&snapshot).unwrap();
        assert!(bytes.starts_with(MAGIC));
        assert_eq!(decode_snapshot(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn foreign_bytes_are_rejected() {
        assert!(matches!(
            decode_snapshot(b"PK\x03\x04 not a save"),
            Err(SaveError::BadMagic)
        ));
        assert!(matches!(
            decode_snapshot(b"UNOS\xff"),
            Err(SaveError::Decode(_))
        ));
    }
}
