use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tile48::engine::Stats;
use tile48::Result;

/// The persisted key-value record: aggregate stats and the theme preference.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
struct Record {
    stats: Stats,
    dark_mode: bool,
}

/// Store keeps the record in a JSON file. A missing file reads as defaults.
pub(crate) struct Store {
    path: PathBuf,
    record: Record,
}

impl Store {
    pub(crate) fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let record = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no store at {}, starting fresh", path.display());
                Record::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, record })
    }

    pub(crate) fn save(&self) -> Result<()> {
        fs::write(&self.path, serde_json::to_string_pretty(&self.record)?)?;
        log::debug!("saved store to {}", self.path.display());
        Ok(())
    }

    pub(crate) fn stats(&self) -> Stats {
        self.record.stats
    }

    pub(crate) fn set_stats(&mut self, stats: Stats) {
        self.record.stats = stats;
    }

    pub(crate) fn dark_mode(&self) -> bool {
        self.record.dark_mode
    }

    pub(crate) fn toggle_dark_mode(&mut self) -> bool {
        self.record.dark_mode = !self.record.dark_mode;
        self.record.dark_mode
    }
}

#[cfg(test)]
pub(crate) fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tile48-{}-{}.json", std::process::id(), name))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let store = Store::open(temp_path("missing")).unwrap();
        assert_eq!(store.stats(), Stats::default());
        assert!(!store.dark_mode());
    }

    #[test]
    fn save_then_open() {
        let path = temp_path("save-then-open");
        let mut store = Store::open(&path).unwrap();
        store.set_stats(Stats {
            games_played: 4,
            best_score: 2500,
            best_tile: 256,
        });
        assert!(store.toggle_dark_mode());
        store.save().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["stats"]["gamesPlayed"], 4);
        assert_eq!(value["darkMode"], true);

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.stats(), store.stats());
        assert!(reopened.dark_mode());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_path("malformed");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Store::open(&path),
            Err(tile48::Error::JsonError(_))
        ));
        fs::remove_file(&path).unwrap();
    }
}
