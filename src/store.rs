use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use log::info;
use serde::{Deserialize, Serialize};

use crate::round::Mode;

const LEADERBOARD_DIR: &str = "leaderboards";
const PORTAL_FILE: &str = "portal_leaderboards.json";
const WALL_FILE: &str = "wall_leaderboards.json";
const SETTINGS_FILE: &str = "settings.json";
const MAX_ENTRIES: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed data in {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    pub date: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub music_volume: u8,
    pub sfx_volume: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            music_volume: 100,
            sfx_volume: 100,
        }
    }
}

// One leaderboard file per mode plus a settings file, all JSON. Any I/O or
// parse failure is surfaced to the caller; leaderboard integrity can't be
// assumed after a partial write, so the process treats these as fatal.
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Store { root: root.into() }
    }

    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Store::new(root);
        store.ensure_paths()?;
        Ok(store)
    }

    fn leaderboard_path(&self, mode: Mode) -> PathBuf {
        let file = match mode {
            Mode::Portal => PORTAL_FILE,
            Mode::Wall => WALL_FILE,
        };
        self.root.join(LEADERBOARD_DIR).join(file)
    }

    fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    // Create missing files with defaults; leave existing ones untouched.
    pub fn ensure_paths(&self) -> Result<(), StoreError> {
        let dir = self.root.join(LEADERBOARD_DIR);
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        for mode in [Mode::Portal, Mode::Wall] {
            let path = self.leaderboard_path(mode);
            if !path.exists() {
                write_json(&path, &Vec::<LeaderboardEntry>::new())?;
            }
        }
        if !self.settings_path().exists() {
            write_json(&self.settings_path(), &Settings::default())?;
        }
        Ok(())
    }

    pub fn leaderboard(&self, mode: Mode) -> Result<Vec<LeaderboardEntry>, StoreError> {
        read_json(&self.leaderboard_path(mode))
    }

    // Insert, keep the ten best. The sort is stable so equal scores stay in
    // insertion order.
    pub fn add_entry(&self, mode: Mode, name: &str, score: u32) -> Result<(), StoreError> {
        let mut entries = self.leaderboard(mode)?;
        entries.push(LeaderboardEntry {
            name: name.to_string(),
            score,
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        });
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_ENTRIES);
        write_json(&self.leaderboard_path(mode), &entries)?;
        info!("recorded {} points for {} on the {} board", score, name, mode.label());
        Ok(())
    }

    pub fn settings(&self) -> Result<Settings, StoreError> {
        read_json(&self.settings_path())
    }

    pub fn save_settings(&self, settings: Settings) -> Result<(), StoreError> {
        write_json(&self.settings_path(), &settings)
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, StoreError> {
    let data = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let data = serde_json::to_string_pretty(value).map_err(|source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, data).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    fn temp_store() -> (Store, PathBuf) {
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let root = std::env::temp_dir().join(format!(
            "slinker-store-{}-{}",
            std::process::id(),
            id
        ));
        fs::create_dir_all(&root).unwrap();
        (Store::open(&root).unwrap(), root)
    }

    #[test]
    fn ensure_paths_seeds_defaults() {
        let (store, root) = temp_store();
        assert_eq!(store.leaderboard(Mode::Portal).unwrap(), vec![]);
        assert_eq!(store.leaderboard(Mode::Wall).unwrap(), vec![]);
        assert_eq!(store.settings().unwrap(), Settings::default());
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn eleven_entries_keep_only_the_top_ten() {
        let (store, root) = temp_store();
        for score in 0..11u32 {
            store
                .add_entry(Mode::Wall, &format!("player{}", score), score)
                .unwrap();
        }
        let entries = store.leaderboard(Mode::Wall).unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0].score, 10);
        assert_eq!(entries[9].score, 1);
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn ties_keep_insertion_order() {
        let (store, root) = temp_store();
        store.add_entry(Mode::Portal, "first", 7).unwrap();
        store.add_entry(Mode::Portal, "second", 7).unwrap();
        store.add_entry(Mode::Portal, "third", 9).unwrap();
        let entries = store.leaderboard(Mode::Portal).unwrap();
        assert_eq!(entries[0].name, "third");
        assert_eq!(entries[1].name, "first");
        assert_eq!(entries[2].name, "second");
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn boards_are_keyed_by_mode() {
        let (store, root) = temp_store();
        store.add_entry(Mode::Portal, "loop", 3).unwrap();
        assert_eq!(store.leaderboard(Mode::Portal).unwrap().len(), 1);
        assert!(store.leaderboard(Mode::Wall).unwrap().is_empty());
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn settings_round_trip() {
        let (store, root) = temp_store();
        let settings = Settings {
            music_volume: 35,
            sfx_volume: 80,
        };
        store.save_settings(settings).unwrap();
        assert_eq!(store.settings().unwrap(), settings);
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn unreadable_store_reports_an_error() {
        let store = Store::new("/nonexistent-slinker-root");
        assert!(store.leaderboard(Mode::Wall).is_err());
    }

    #[test]
    fn reopening_keeps_existing_entries() {
        let (store, root) = temp_store();
        store.add_entry(Mode::Wall, "kept", 4).unwrap();
        let reopened = Store::open(&root).unwrap();
        assert_eq!(reopened.leaderboard(Mode::Wall).unwrap()[0].name, "kept");
        fs::remove_dir_all(root).unwrap();
    }
}
