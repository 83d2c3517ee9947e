//! JSON data folder
//!
//! One file per store inside a single folder:
//!
//! ```text
//! data/
//!   participants.json      [{"name": ...}]
//!   awards.json            [{"name": ..., "quota": ...}]
//!   winners.json           [{"award": ..., "participant": ...}]
//!   winners_old.json       last archived winner list
//!   winners_reserve.json   [{"award": ..., "participant": ...}]
//! ```
//!
//! Participant and award files are seeded with a small sample roster on first
//! use so a fresh folder is immediately drawable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use ld_core::{
    Award, AwardStore, Participant, ParticipantStore, ReservedWinner, ReservedWinnerStore,
    StoreError, WinnerRecord, WinnerStore,
};

// ============ Constants ============

pub const PARTICIPANTS_FILE: &str = "participants.json";
pub const AWARDS_FILE: &str = "awards.json";
pub const WINNERS_FILE: &str = "winners.json";
pub const WINNERS_ARCHIVE_FILE: &str = "winners_old.json";
pub const RESERVED_FILE: &str = "winners_reserve.json";

/// Roster written to an empty folder
pub fn sample_participants() -> Vec<Participant> {
    (1..=3)
        .map(|i| Participant::new(format!("Participant {}", i)))
        .collect()
}

/// Awards written to an empty folder
pub fn sample_awards() -> Vec<Award> {
    vec![
        Award::new("First Prize", 1),
        Award::new("Second Prize", 2),
        Award::new("Third Prize", 3),
    ]
}

// ============ Data Folder ============

/// Folder holding every store file
#[derive(Debug, Clone)]
pub struct JsonDataFolder {
    root: PathBuf,
}

impl JsonDataFolder {
    /// Open (and create if needed) a data folder
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn participants(&self) -> JsonParticipantStore {
        JsonParticipantStore {
            path: self.root.join(PARTICIPANTS_FILE),
        }
    }

    pub fn awards(&self) -> JsonAwardStore {
        JsonAwardStore {
            path: self.root.join(AWARDS_FILE),
        }
    }

    pub fn winners(&self) -> JsonWinnerStore {
        JsonWinnerStore {
            path: self.root.join(WINNERS_FILE),
            archive_path: self.root.join(WINNERS_ARCHIVE_FILE),
        }
    }

    pub fn reserved(&self) -> JsonReservedStore {
        JsonReservedStore {
            path: self.root.join(RESERVED_FILE),
        }
    }
}

// ============ Stores ============

#[derive(Debug, Clone)]
pub struct JsonParticipantStore {
    path: PathBuf,
}

impl ParticipantStore for JsonParticipantStore {
    fn load(&self) -> Result<Vec<Participant>, StoreError> {
        load_or_seed(&self.path, sample_participants)
    }
}

#[derive(Debug, Clone)]
pub struct JsonAwardStore {
    path: PathBuf,
}

impl AwardStore for JsonAwardStore {
    fn load(&self) -> Result<Vec<Award>, StoreError> {
        load_or_seed(&self.path, sample_awards)
    }
}

#[derive(Debug, Clone)]
pub struct JsonWinnerStore {
    path: PathBuf,
    archive_path: PathBuf,
}

impl WinnerStore for JsonWinnerStore {
    fn load(&self) -> Result<Vec<WinnerRecord>, StoreError> {
        Ok(read_json(&self.path)?.unwrap_or_default())
    }

    fn save(&self, winners: &[WinnerRecord]) -> Result<(), StoreError> {
        write_json(&self.path, winners)
    }

    /// Rename `winners.json` to `winners_old.json`, replacing the old archive
    fn archive(&self) -> Result<(), StoreError> {
        if self.archive_path.exists() {
            fs::remove_file(&self.archive_path)?;
        }
        if self.path.exists() {
            fs::rename(&self.path, &self.archive_path)?;
            log::info!("Archived winners to {}", self.archive_path.display());
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JsonReservedStore {
    path: PathBuf,
}

impl ReservedWinnerStore for JsonReservedStore {
    fn load(&self) -> Result<Vec<ReservedWinner>, StoreError> {
        load_or_seed(&self.path, Vec::new)
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

// ============ Helpers ============

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let json = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&json)?))
}

/// Write through a temp file so a crash never leaves a half-written list
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn load_or_seed<T, F>(path: &Path, seed: F) -> Result<T, StoreError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if let Some(value) = read_json(path)? {
        return Ok(value);
    }
    let value = seed();
    write_json(path, &value)?;
    log::info!("Created {}", path.display());
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder() -> (tempfile::TempDir, JsonDataFolder) {
        let dir = tempfile::tempdir().unwrap();
        let folder = JsonDataFolder::open(dir.path().join("data")).unwrap();
        (dir, folder)
    }

    #[test]
    fn test_seeds_empty_folder() {
        let (_dir, folder) = folder();

        let participants = folder.participants().load().unwrap();
        let awards = folder.awards().load().unwrap();

        assert_eq!(participants, sample_participants());
        assert_eq!(awards, sample_awards());
        assert!(folder.root().join(PARTICIPANTS_FILE).exists());
        assert!(folder.root().join(AWARDS_FILE).exists());
    }

    #[test]
    fn test_reads_existing_files() {
        let (_dir, folder) = folder();
        fs::write(
            folder.root().join(AWARDS_FILE),
            r#"[{"name": "Grand Prize", "quota": 5}]"#,
        )
        .unwrap();

        assert_eq!(folder.awards().load().unwrap(), vec![Award::new("Grand Prize", 5)]);
    }

    #[test]
    fn test_winner_save_load_archive() {
        let (_dir, folder) = folder();
        let store = folder.winners();
        assert!(store.load().unwrap().is_empty());

        let winners = vec![
            WinnerRecord::new("First Prize", "Alice"),
            WinnerRecord::new("Second Prize", "Bob"),
        ];
        store.save(&winners).unwrap();
        assert_eq!(store.load().unwrap(), winners);

        store.archive().unwrap();
        assert!(store.load().unwrap().is_empty());
        let archived: Vec<WinnerRecord> =
            serde_json::from_str(&fs::read_to_string(folder.root().join(WINNERS_ARCHIVE_FILE)).unwrap())
                .unwrap();
        assert_eq!(archived, winners);

        // archiving again with nothing saved drops the previous archive
        store.archive().unwrap();
        assert!(!folder.root().join(WINNERS_ARCHIVE_FILE).exists());
    }

    #[test]
    fn test_reserved_clear_removes_file() {
        let (_dir, folder) = folder();
        let store = folder.reserved();
        assert!(store.load().unwrap().is_empty());
        assert!(folder.root().join(RESERVED_FILE).exists());

        store.clear().unwrap();
        assert!(!folder.root().join(RESERVED_FILE).exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let (_dir, folder) = folder();
        fs::write(folder.root().join(WINNERS_FILE), "not json").unwrap();
        assert!(matches!(folder.winners().load(), Err(StoreError::Json(_))));
    }
}
