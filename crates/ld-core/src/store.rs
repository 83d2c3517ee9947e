//! Storage collaborator contracts
//!
//! The engine only ever sees ordered lists of records. File formats and
//! locations are the implementor's business.

use crate::error::StoreError;
use crate::model::{Award, Participant, ReservedWinner, WinnerRecord};

/// Read-only source of participants
pub trait ParticipantStore: Send + Sync {
    fn load(&self) -> Result<Vec<Participant>, StoreError>;
}

/// Read-only source of awards
pub trait AwardStore: Send + Sync {
    fn load(&self) -> Result<Vec<Award>, StoreError>;
}

/// Persisted winner list, the only shared mutable resource
pub trait WinnerStore: Send + Sync {
    fn load(&self) -> Result<Vec<WinnerRecord>, StoreError>;

    /// Replace the persisted list with `winners`
    fn save(&self, winners: &[WinnerRecord]) -> Result<(), StoreError>;

    /// Move the current persisted list aside, leaving the store empty
    fn archive(&self) -> Result<(), StoreError>;
}

/// Reserved winners, only consulted when the capability is granted
pub trait ReservedWinnerStore: Send + Sync {
    fn load(&self) -> Result<Vec<ReservedWinner>, StoreError>;

    /// Drop every stored reservation
    fn clear(&self) -> Result<(), StoreError>;
}
