//! Local high-score table, persisted as JSON in the home directory.
//!
//! The file holds an ordered array of single-entry objects, e.g.
//! `[{"ada": 12.5}, {"bob": 3}]`. The whole file is rewritten on every
//! update; last writer wins.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// One player's best score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEntry {
    pub name: String,
    pub score: f64,
}

impl Serialize for ScoreEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.score)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoreEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntryVisitor;

        impl<'de> Visitor<'de> for EntryVisitor {
            type Value = ScoreEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a single {name: score} object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ScoreEntry, A::Error> {
                let (name, score): (String, f64) = map
                    .next_entry()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                Ok(ScoreEntry { name, score })
            }
        }

        deserializer.deserialize_map(EntryVisitor)
    }
}

/// All stored entries, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreBoard {
    pub entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    /// Record a finished game. The name is trimmed; an empty name aborts.
    /// An existing entry is only overwritten by a strictly greater score.
    /// Returns whether anything changed.
    pub fn record(&mut self, name: &str, score: f64) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => {
                if score > entry.score {
                    entry.score = score;
                    true
                } else {
                    false
                }
            }
            None => {
                self.entries.push(ScoreEntry {
                    name: name.to_string(),
                    score,
                });
                true
            }
        }
    }

    /// Load from disk. A missing or unreadable file is an empty board.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Rewrite the whole file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }
}

/// `~/.flappy-term/scores.json`.
pub fn default_path() -> io::Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "could not determine home directory")
    })?;
    Ok(home.join(".flappy-term").join("scores.json"))
}
