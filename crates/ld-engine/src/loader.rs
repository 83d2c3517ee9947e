//! Roster loading from the storage collaborators

use ld_core::{
    AwardStore, DrawResult, ParticipantStore, ReservedWinnerStore, Roster, WinnerStore,
};

use crate::ledger::WinnerLedger;

/// The collaborators a draw runs against
pub struct Stores {
    pub participants: Box<dyn ParticipantStore>,
    pub awards: Box<dyn AwardStore>,
    pub winners: Box<dyn WinnerStore>,
    /// Absent when the deployment has no reserved-winner store at all
    pub reserved: Option<Box<dyn ReservedWinnerStore>>,
}

/// Load every store into a fresh roster
///
/// Without the reserved-winner capability the reserved store is cleared and
/// the roster carries no reservations, whatever was stored.
pub fn load_roster(stores: &Stores, reserved_permitted: bool) -> DrawResult<Roster> {
    let participants = stores.participants.load()?;
    let awards = stores.awards.load()?;
    let winners = stores.winners.load()?;

    let reserved = match (&stores.reserved, reserved_permitted) {
        (Some(store), true) => store.load()?,
        (Some(store), false) => {
            store.clear()?;
            log::info!("Reserved winners disabled, cleared reserved store");
            Vec::new()
        }
        (None, _) => Vec::new(),
    };

    log::info!(
        "Loaded roster: {} participants, {} awards, {} winners, {} reserved",
        participants.len(),
        awards.len(),
        winners.len(),
        reserved.len()
    );

    Ok(Roster::new(participants, awards)
        .with_winners(winners)
        .with_reserved(reserved))
}

impl WinnerLedger {
    /// Load the roster and keep the winner store for later writes
    pub fn open(stores: Stores, reserved_permitted: bool) -> DrawResult<Self> {
        let roster = load_roster(&stores, reserved_permitted)?;
        Ok(Self::new(roster, stores.winners))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ld_core::{Award, Participant, ReservedWinner, WinnerRecord};
    use ld_store::{MemoryAwardStore, MemoryParticipantStore, MemoryReservedStore, MemoryWinnerStore};

    fn stores(reserved: &MemoryReservedStore) -> Stores {
        Stores {
            participants: Box::new(MemoryParticipantStore::new(vec![
                Participant::new("Alice"),
                Participant::new("Bob"),
            ])),
            awards: Box::new(MemoryAwardStore::new(vec![Award::new("First Prize", 1)])),
            winners: Box::new(MemoryWinnerStore::with_winners(vec![WinnerRecord::new(
                "First Prize",
                "Alice",
            )])),
            reserved: Some(Box::new(reserved.clone())),
        }
    }

    #[test]
    fn test_load_with_reserved_capability() {
        let reserved = MemoryReservedStore::new(vec![ReservedWinner::new("First Prize", "Bob")]);
        let roster = load_roster(&stores(&reserved), true).unwrap();

        assert_eq!(roster.participants().len(), 2);
        assert_eq!(roster.winners().len(), 1);
        assert_eq!(roster.reserved().len(), 1);
    }

    #[test]
    fn test_load_without_capability_clears_reserved() {
        let reserved = MemoryReservedStore::new(vec![ReservedWinner::new("First Prize", "Bob")]);
        let roster = load_roster(&stores(&reserved), false).unwrap();

        assert!(roster.reserved().is_empty());
        assert!(reserved.load().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_after_reset_reloads_stores() {
        let participants = MemoryParticipantStore::new(vec![Participant::new("Alice")]);
        let winners = MemoryWinnerStore::new();
        let reserved = MemoryReservedStore::new(vec![ReservedWinner::new("First Prize", "Alice")]);
        let make = || Stores {
            participants: Box::new(participants.clone()),
            awards: Box::new(MemoryAwardStore::new(vec![Award::new("First Prize", 1)])),
            winners: Box::new(winners.clone()),
            reserved: Some(Box::new(reserved.clone())),
        };

        let ledger = WinnerLedger::open(make(), true).unwrap();
        ledger.commit("First Prize", &[Participant::new("Alice")]).unwrap();
        assert!(ledger.roster().reserved_for("First Prize").is_empty());

        ledger.reset().unwrap();
        assert_eq!(ledger.roster().reserved_for("First Prize").len(), 1);

        let reopened = WinnerLedger::open(make(), true).unwrap();
        assert!(reopened.winners().is_empty());
        assert_eq!(reopened.remaining_quota("First Prize").unwrap(), 1);
        assert_eq!(reopened.roster().reserved_for("First Prize").len(), 1);
    }

    #[test]
    fn test_open_ledger() {
        let reserved = MemoryReservedStore::default();
        let ledger = WinnerLedger::open(stores(&reserved), false).unwrap();
        assert_eq!(ledger.remaining_quota("First Prize").unwrap(), 0);
    }
}
