//! Roster records
//!
//! Names are natural keys. The engine assumes they are unique within their
//! store but never enforces it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Somebody taking part in the draw
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
}

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A prize and the number of times it may be won
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub name: String,
    /// Maximum number of winners this award may ever have
    pub quota: u32,
}

impl Award {
    pub fn new(name: impl Into<String>, quota: u32) -> Self {
        Self {
            name: name.into(),
            quota,
        }
    }
}

/// One confirmed win
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub award: String,
    pub participant: String,
}

impl WinnerRecord {
    pub fn new(award: impl Into<String>, participant: impl Into<String>) -> Self {
        Self {
            award: award.into(),
            participant: participant.into(),
        }
    }
}

impl fmt::Display for WinnerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.award, self.participant)
    }
}

/// Pre-declared outcome honoured ahead of random sampling
///
/// Pending until its participant shows up as a winner of any award.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservedWinner {
    pub award: String,
    pub participant: String,
}

impl ReservedWinner {
    pub fn new(award: impl Into<String>, participant: impl Into<String>) -> Self {
        Self {
            award: award.into(),
            participant: participant.into(),
        }
    }
}
