//! Bankroll and statistics snapshots.
//!
//! The table can hand its persistent state to any [`SnapshotStore`]. With the
//! `json` feature snapshots are encoded as a flat JSON object and loaded
//! leniently: a missing document is treated as a first run, and every field
//! that is not a finite, non-negative number falls back to its default.

#[cfg(feature = "json")]
use alloc::string::String;

use crate::error::PersistError;

/// Persistent part of a table session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    /// Chip balance.
    pub bankroll: usize,
    /// Rounds settled.
    pub hands_played: usize,
    /// Rounds won.
    pub wins: usize,
    /// Rounds lost.
    pub losses: usize,
    /// Rounds pushed.
    pub pushes: usize,
    /// Rounds won with a natural. Saves from before this counter load as 0.
    #[cfg_attr(feature = "serde", serde(default))]
    pub blackjacks: usize,
}

/// Storage for snapshots.
pub trait SnapshotStore {
    /// Stores a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written.
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError>;

    /// Loads the last stored snapshot, or `None` if there is none.
    ///
    /// `default_bankroll` replaces a bankroll that fails validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn load(&self, default_bankroll: usize) -> Result<Option<Snapshot>, PersistError>;
}

#[cfg(feature = "json")]
fn validated_field(object: &serde_json::Map<String, serde_json::Value>, key: &str) -> Option<usize> {
    let value = object.get(key)?;
    let number = value.as_f64().filter(|n| n.is_finite() && *n >= 0.0);
    if number.is_none() {
        tracing::warn!(field = key, %value, "ignoring invalid snapshot field");
    }
    // Float to int casts saturate and truncate toward zero.
    number.map(|n| n as usize)
}

#[cfg(feature = "json")]
impl Snapshot {
    /// Encodes the snapshot as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Encode`] if serialization fails.
    pub fn to_json(&self) -> Result<String, PersistError> {
        serde_json::to_string(self).map_err(|_| PersistError::Encode)
    }

    /// Decodes a snapshot, defaulting every invalid field.
    ///
    /// Returns `None` when the document is not a JSON object at all.
    #[must_use]
    pub fn from_json_lenient(json: &str, default_bankroll: usize) -> Option<Self> {
        let value: serde_json::Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%err, "discarding unreadable snapshot");
                return None;
            }
        };
        let Some(object) = value.as_object() else {
            tracing::warn!("discarding snapshot that is not an object");
            return None;
        };

        Some(Self {
            bankroll: validated_field(object, "bankroll").unwrap_or(default_bankroll),
            hands_played: validated_field(object, "handsPlayed").unwrap_or(0),
            wins: validated_field(object, "wins").unwrap_or(0),
            losses: validated_field(object, "losses").unwrap_or(0),
            pushes: validated_field(object, "pushes").unwrap_or(0),
            blackjacks: validated_field(object, "blackjacks").unwrap_or(0),
        })
    }
}

/// A snapshot store backed by a JSON file.
#[cfg(all(feature = "std", feature = "json"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(all(feature = "std", feature = "json"))]
impl JsonFileStore {
    /// Creates a store that reads and writes `path`.
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(all(feature = "std", feature = "json"))]
impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let json = snapshot.to_json()?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }

    fn load(&self, default_bankroll: usize) -> Result<Option<Snapshot>, PersistError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Snapshot::from_json_lenient(&json, default_bankroll)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}
