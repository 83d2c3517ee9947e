//! Winner Ledger: the single writer of the winner list
//!
//! Commit, revoke and reset each read the current list, build the new one,
//! persist it and only then swap it into the roster. All three run inside
//! one write-lock scope, so two mutations can never interleave their
//! read-then-write, and a failed save leaves the in-memory list untouched.

use parking_lot::{RwLock, RwLockReadGuard};

use ld_core::{
    DrawError, DrawResult, Participant, Roster, RosterSummary, WinnerRecord, WinnerStore,
};

/// Owns the roster and the persisted winner list
pub struct WinnerLedger {
    roster: RwLock<Roster>,
    store: Box<dyn WinnerStore>,
}

impl WinnerLedger {
    pub fn new(roster: Roster, store: Box<dyn WinnerStore>) -> Self {
        Self {
            roster: RwLock::new(roster),
            store,
        }
    }

    /// Read access to the roster
    ///
    /// Hold the guard briefly; mutations wait for it.
    pub fn roster(&self) -> RwLockReadGuard<'_, Roster> {
        self.roster.read()
    }

    /// Committed winners in commit order
    pub fn winners(&self) -> Vec<WinnerRecord> {
        self.roster.read().winners().to_vec()
    }

    pub fn remaining_quota(&self, award: &str) -> DrawResult<u32> {
        self.roster.read().remaining_quota(award)
    }

    pub fn summary(&self) -> RosterSummary {
        self.roster.read().summary()
    }

    /// Record every participant in `batch` as a winner of `award`
    ///
    /// Quota is checked again under the write lock, so a batch validated
    /// earlier cannot overshoot if the list changed in the meantime.
    pub fn commit(&self, award: &str, batch: &[Participant]) -> DrawResult<Vec<WinnerRecord>> {
        let mut roster = self.roster.write();

        let remaining = roster.remaining_quota(award)?;
        let requested = batch.len() as u32;
        if requested > remaining {
            return Err(DrawError::QuotaExceeded {
                award: award.to_string(),
                requested,
                remaining,
            });
        }
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let added: Vec<WinnerRecord> = batch
            .iter()
            .map(|p| WinnerRecord::new(award, p.name.as_str()))
            .collect();
        let mut winners = roster.winners().to_vec();
        winners.extend(added.iter().cloned());

        self.persist(&winners)?;
        roster.replace_winners(winners);

        log::info!(
            "Committed {} winner(s) for {}: {}",
            added.len(),
            award,
            added
                .iter()
                .map(|w| w.participant.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(added)
    }

    /// Remove one winner record
    ///
    /// If the same participant won `award` more than once, the most recent
    /// record goes, which makes revoke the exact inverse of the commit that
    /// added it.
    pub fn revoke(&self, award: &str, participant: &str) -> DrawResult<WinnerRecord> {
        let mut roster = self.roster.write();

        let position = roster
            .winners()
            .iter()
            .rposition(|w| w.award == award && w.participant == participant)
            .ok_or_else(|| DrawError::RecordNotFound {
                award: award.to_string(),
                participant: participant.to_string(),
            })?;

        let mut winners = roster.winners().to_vec();
        let removed = winners.remove(position);

        self.persist(&winners)?;
        roster.replace_winners(winners);

        log::info!("Revoked {}", removed);
        Ok(removed)
    }

    /// Archive the winner list and start over
    ///
    /// Participants, awards and reservations are left as loaded, not read
    /// back from their stores. Reserved winners become pending again. Use
    /// [`WinnerLedger::open`] to pick up store changes.
    pub fn reset(&self) -> DrawResult<()> {
        let mut roster = self.roster.write();

        self.store.archive().map_err(|e| {
            log::warn!("Failed to archive winner list: {}", e);
            DrawError::Store(e)
        })?;
        let cleared = roster.winners().len();
        roster.replace_winners(Vec::new());

        log::info!("Reset draw, archived {} winner record(s)", cleared);
        Ok(())
    }

    fn persist(&self, winners: &[WinnerRecord]) -> DrawResult<()> {
        self.store.save(winners).map_err(|e| {
            log::warn!("Failed to save winner list: {}", e);
            DrawError::Store(e)
        })
    }
}
