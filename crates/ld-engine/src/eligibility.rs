//! Eligibility Resolver: computes the pool a draw samples from

use std::collections::HashSet;

use ld_core::{DrawError, DrawResult, Participant, Roster};

/// Who takes part in a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PoolMode {
    /// Everybody, including past winners
    AllParticipants,
    /// Only participants without any win
    #[default]
    NotYetWonOnly,
}

/// Filters the roster down to the eligible pool
#[derive(Debug, Clone, Copy, Default)]
pub struct EligibilityResolver {
    mode: PoolMode,
    reserved_enabled: bool,
}

impl EligibilityResolver {
    pub fn new(mode: PoolMode, reserved_enabled: bool) -> Self {
        Self {
            mode,
            reserved_enabled,
        }
    }

    pub fn mode(&self) -> PoolMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: PoolMode) {
        self.mode = mode;
    }

    pub fn reserved_enabled(&self) -> bool {
        self.reserved_enabled
    }

    /// Eligible participants for a draw on `award`, in roster order
    ///
    /// With reserved winners enabled, anybody reserved for a different award
    /// is left out so they cannot be drawn before their own award comes up.
    /// Duplicate names appear once.
    pub fn pool(&self, roster: &Roster, award: &str) -> DrawResult<Vec<Participant>> {
        let winners = match self.mode {
            PoolMode::AllParticipants => HashSet::new(),
            PoolMode::NotYetWonOnly => roster.winner_names(),
        };
        let mut seen = HashSet::new();

        let pool: Vec<Participant> = roster
            .participants()
            .iter()
            .filter(|p| !winners.contains(p.name.as_str()))
            .filter(|p| !self.reserved_enabled || !roster.is_reserved_elsewhere(award, &p.name))
            .filter(|p| seen.insert(p.name.as_str()))
            .cloned()
            .collect();

        if pool.is_empty() {
            return Err(DrawError::EmptyPool);
        }
        Ok(pool)
    }
}
