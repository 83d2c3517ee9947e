//! In-memory stores
//!
//! Clones share state, so a test can keep a handle to a store it handed to
//! the engine and inspect what was written.

use std::sync::Arc;

use parking_lot::Mutex;

use ld_core::{
    Award, AwardStore, Participant, ParticipantStore, ReservedWinner, ReservedWinnerStore,
    StoreError, WinnerRecord, WinnerStore,
};

#[derive(Debug, Clone, Default)]
pub struct MemoryParticipantStore {
    participants: Vec<Participant>,
}

impl MemoryParticipantStore {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }
}

impl ParticipantStore for MemoryParticipantStore {
    fn load(&self) -> Result<Vec<Participant>, StoreError> {
        Ok(self.participants.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryAwardStore {
    awards: Vec<Award>,
}

impl MemoryAwardStore {
    pub fn new(awards: Vec<Award>) -> Self {
        Self { awards }
    }
}

impl AwardStore for MemoryAwardStore {
    fn load(&self) -> Result<Vec<Award>, StoreError> {
        Ok(self.awards.clone())
    }
}

#[derive(Debug, Default)]
struct WinnerState {
    winners: Vec<WinnerRecord>,
    archived: Vec<WinnerRecord>,
    save_count: usize,
    failing: bool,
}

/// Winner store that can be told to fail
#[derive(Debug, Clone, Default)]
pub struct MemoryWinnerStore {
    state: Arc<Mutex<WinnerState>>,
}

impl MemoryWinnerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_winners(winners: Vec<WinnerRecord>) -> Self {
        let store = Self::default();
        store.state.lock().winners = winners;
        store
    }

    /// Make every subsequent save and archive fail
    pub fn set_failing(&self, failing: bool) {
        self.state.lock().failing = failing;
    }

    /// Currently persisted list
    pub fn saved(&self) -> Vec<WinnerRecord> {
        self.state.lock().winners.clone()
    }

    /// List moved aside by the last archive
    pub fn archived(&self) -> Vec<WinnerRecord> {
        self.state.lock().archived.clone()
    }

    /// Successful saves so far
    pub fn save_count(&self) -> usize {
        self.state.lock().save_count
    }
}

impl WinnerStore for MemoryWinnerStore {
    fn load(&self) -> Result<Vec<WinnerRecord>, StoreError> {
        Ok(self.saved())
    }

    fn save(&self, winners: &[WinnerRecord]) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if state.failing {
            return Err(StoreError::Unavailable("winner store is failing".into()));
        }
        state.winners = winners.to_vec();
        state.save_count += 1;
        Ok(())
    }

    fn archive(&self) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        if state.failing {
            return Err(StoreError::Unavailable("winner store is failing".into()));
        }
        let winners = std::mem::take(&mut state.winners);
        state.archived = winners;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryReservedStore {
    reserved: Arc<Mutex<Vec<ReservedWinner>>>,
}

impl MemoryReservedStore {
    pub fn new(reserved: Vec<ReservedWinner>) -> Self {
        Self {
            reserved: Arc::new(Mutex::new(reserved)),
        }
    }
}

impl ReservedWinnerStore for MemoryReservedStore {
    fn load(&self) -> Result<Vec<ReservedWinner>, StoreError> {
        Ok(self.reserved.lock().clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.reserved.lock().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_winner_state() {
        let store = MemoryWinnerStore::new();
        let handle = store.clone();

        store.save(&[WinnerRecord::new("First Prize", "Alice")]).unwrap();
        assert_eq!(handle.saved().len(), 1);
        assert_eq!(handle.save_count(), 1);

        handle.archive().unwrap();
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.archived().len(), 1);
    }

    #[test]
    fn test_failing_store() {
        let store = MemoryWinnerStore::new();
        store.set_failing(true);
        assert!(matches!(store.save(&[]), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.archive(), Err(StoreError::Unavailable(_))));
        assert_eq!(store.save_count(), 0);
    }
}
