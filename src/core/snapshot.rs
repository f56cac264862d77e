//! Serializable game snapshots.
//!
//! `GameSnapshot` is the record handed to whatever persists or broadcasts a
//! game. The engine defines its shape; JSON and bincode encodings are both
//! offered. Decoding always re-checks structural invariants so a corrupt
//! record is rejected instead of being played on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::StateError;
use super::state::GameState;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("json snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("binary snapshot: {0}")]
    Binary(#[from] bincode::Error),
    #[error("snapshot version {found} is not supported (expected {SNAPSHOT_VERSION})")]
    UnsupportedVersion { found: u32 },
    #[error("snapshot state is corrupt: {0}")]
    Corrupt(#[from] StateError),
}

/// A versioned game state record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub state: GameState,
}

impl GameSnapshot {
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            state,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: GameSnapshot = serde_json::from_str(json)?;
        snapshot.check()?;
        Ok(snapshot)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        snapshot.check()?;
        Ok(snapshot)
    }

    /// Unwrap the state.
    #[must_use]
    pub fn into_state(self) -> GameState {
        self.state
    }

    fn check(&self) -> Result<(), SnapshotError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion { found: self.version });
        }
        self.state.validate()?;
        Ok(())
    }
}

impl From<GameState> for GameSnapshot {
    fn from(state: GameState) -> Self {
        Self::new(state)
    }
}
