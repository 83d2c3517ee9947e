//! Roster Model
//!
//! Read-only queries over the loaded participants, awards, committed winners
//! and reserved winners. Quota usage is always derived from the winner list,
//! so there is no counter that can drift after a commit, revoke or reset.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::error::{DrawError, DrawResult};
use crate::model::{Award, Participant, ReservedWinner, WinnerRecord};

/// In-memory roster
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    participants: Vec<Participant>,
    awards: Vec<Award>,
    winners: Vec<WinnerRecord>,
    reserved: Vec<ReservedWinner>,
}

impl Roster {
    pub fn new(participants: Vec<Participant>, awards: Vec<Award>) -> Self {
        Self {
            participants,
            awards,
            winners: Vec::new(),
            reserved: Vec::new(),
        }
    }

    pub fn with_winners(mut self, winners: Vec<WinnerRecord>) -> Self {
        self.winners = winners;
        self
    }

    pub fn with_reserved(mut self, reserved: Vec<ReservedWinner>) -> Self {
        self.reserved = reserved;
        self
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn awards(&self) -> &[Award] {
        &self.awards
    }

    /// Committed winners in commit order
    pub fn winners(&self) -> &[WinnerRecord] {
        &self.winners
    }

    pub fn reserved(&self) -> &[ReservedWinner] {
        &self.reserved
    }

    /// Look up an award by name
    pub fn award(&self, name: &str) -> DrawResult<&Award> {
        self.awards
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| DrawError::UnknownAward(name.to_string()))
    }

    /// Number of committed winners for `award`
    pub fn used_quota(&self, award: &str) -> u32 {
        self.winners_for(award).count() as u32
    }

    /// `quota - used`, never below zero
    pub fn remaining_quota(&self, award: &str) -> DrawResult<u32> {
        let award = self.award(award)?;
        Ok(award.quota.saturating_sub(self.used_quota(&award.name)))
    }

    /// True if the participant won anything
    pub fn has_won(&self, participant: &str) -> bool {
        self.winners.iter().any(|w| w.participant == participant)
    }

    /// Names of everybody holding at least one win
    pub fn winner_names(&self) -> HashSet<&str> {
        self.winners.iter().map(|w| w.participant.as_str()).collect()
    }

    pub fn winners_for<'a>(&'a self, award: &'a str) -> impl Iterator<Item = &'a WinnerRecord> + 'a {
        self.winners.iter().filter(move |w| w.award == award)
    }

    /// Reserved entries for `award` whose participant has not won anything yet
    ///
    /// Duplicate reservations of the same participant collapse into one.
    pub fn reserved_for(&self, award: &str) -> Vec<&ReservedWinner> {
        let mut seen = HashSet::new();
        self.reserved
            .iter()
            .filter(|r| r.award == award)
            .filter(|r| !self.has_won(&r.participant))
            .filter(|r| seen.insert(r.participant.as_str()))
            .collect()
    }

    /// True if `participant` is reserved for an award other than `award`
    pub fn is_reserved_elsewhere(&self, award: &str, participant: &str) -> bool {
        self.reserved
            .iter()
            .any(|r| r.participant == participant && r.award != award)
    }

    /// Swap in a new winner list. Only the ledger should call this.
    pub fn replace_winners(&mut self, winners: Vec<WinnerRecord>) {
        self.winners = winners;
    }

    pub fn clear_reserved(&mut self) {
        self.reserved.clear();
    }

    /// Snapshot of totals and per-award quota usage
    ///
    /// Recomputed on every call.
    pub fn summary(&self) -> RosterSummary {
        let award_names: HashSet<&str> = self.awards.iter().map(|a| a.name.as_str()).collect();
        let participant_names: HashSet<&str> =
            self.participants.iter().map(|p| p.name.as_str()).collect();
        let winner_names = self.winner_names();
        let not_yet_won_count = participant_names
            .iter()
            .filter(|name| !winner_names.contains(*name))
            .count();

        let per_award = self
            .awards
            .iter()
            .map(|a| AwardStatus {
                award: a.name.clone(),
                quota: a.quota,
                remaining: a.quota.saturating_sub(self.used_quota(&a.name)),
            })
            .collect();

        RosterSummary {
            total_awards: award_names.len(),
            total_participants: participant_names.len(),
            total_winners: winner_names.len(),
            not_yet_won_count,
            per_award,
        }
    }
}

/// Quota usage of one award
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AwardStatus {
    pub award: String,
    pub quota: u32,
    pub remaining: u32,
}

/// Derived roster snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub total_awards: usize,
    pub total_participants: usize,
    /// Distinct participants holding at least one win
    pub total_winners: usize,
    pub not_yet_won_count: usize,
    pub per_award: Vec<AwardStatus>,
}

impl fmt::Display for RosterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Awards {}, participants {}, winners {}, not yet won {}",
            self.total_awards, self.total_participants, self.total_winners, self.not_yet_won_count
        )?;
        for status in &self.per_award {
            write!(f, "\n{} {}/{}", status.award, status.quota, status.remaining)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::new(
            vec![
                Participant::new("Alice"),
                Participant::new("Bob"),
                Participant::new("Carol"),
            ],
            vec![Award::new("First Prize", 1), Award::new("Second Prize", 2)],
        )
    }

    #[test]
    fn test_remaining_quota() {
        let roster = roster().with_winners(vec![WinnerRecord::new("Second Prize", "Alice")]);
        assert_eq!(roster.remaining_quota("First Prize").unwrap(), 1);
        assert_eq!(roster.remaining_quota("Second Prize").unwrap(), 1);
    }

    #[test]
    fn test_remaining_quota_unknown_award() {
        let err = roster().remaining_quota("Grand Prize").unwrap_err();
        assert!(matches!(err, DrawError::UnknownAward(name) if name == "Grand Prize"));
    }

    #[test]
    fn test_remaining_quota_never_negative() {
        let roster = roster().with_winners(vec![
            WinnerRecord::new("First Prize", "Alice"),
            WinnerRecord::new("First Prize", "Bob"),
        ]);
        assert_eq!(roster.remaining_quota("First Prize").unwrap(), 0);
    }

    #[test]
    fn test_has_won() {
        let roster = roster().with_winners(vec![WinnerRecord::new("First Prize", "Bob")]);
        assert!(roster.has_won("Bob"));
        assert!(!roster.has_won("Alice"));
    }

    #[test]
    fn test_reserved_for_skips_consumed_and_duplicates() {
        let roster = roster()
            .with_reserved(vec![
                ReservedWinner::new("Second Prize", "Bob"),
                ReservedWinner::new("Second Prize", "Bob"),
                ReservedWinner::new("Second Prize", "Carol"),
                ReservedWinner::new("First Prize", "Alice"),
            ])
            .with_winners(vec![WinnerRecord::new("Second Prize", "Carol")]);

        let pending: Vec<&str> = roster
            .reserved_for("Second Prize")
            .iter()
            .map(|r| r.participant.as_str())
            .collect();
        assert_eq!(pending, vec!["Bob"]);
        assert!(roster.is_reserved_elsewhere("Second Prize", "Alice"));
        assert!(!roster.is_reserved_elsewhere("Second Prize", "Bob"));
    }

    #[test]
    fn test_reserved_for_skips_winner_of_other_award() {
        let roster = roster()
            .with_reserved(vec![
                ReservedWinner::new("First Prize", "Bob"),
                ReservedWinner::new("First Prize", "Carol"),
            ])
            .with_winners(vec![WinnerRecord::new("Second Prize", "Bob")]);

        let pending: Vec<&str> = roster
            .reserved_for("First Prize")
            .iter()
            .map(|r| r.participant.as_str())
            .collect();
        assert_eq!(pending, vec!["Carol"]);
    }

    #[test]
    fn test_summary_tracks_winner_list() {
        let mut roster = roster();
        roster.replace_winners(vec![
            WinnerRecord::new("First Prize", "Alice"),
            WinnerRecord::new("Second Prize", "Alice"),
        ]);

        let summary = roster.summary();
        assert_eq!(summary.total_awards, 2);
        assert_eq!(summary.total_participants, 3);
        assert_eq!(summary.total_winners, 1);
        assert_eq!(summary.not_yet_won_count, 2);
        assert_eq!(summary.per_award[0].remaining, 0);
        assert_eq!(summary.per_award[1].remaining, 1);

        roster.replace_winners(Vec::new());
        let summary = roster.summary();
        assert_eq!(summary.total_winners, 0);
        assert_eq!(summary.per_award[0].remaining, 1);
    }

    #[test]
    fn test_summary_display() {
        let text = roster().summary().to_string();
        assert_eq!(
            text,
            "Awards 2, participants 3, winners 0, not yet won 3\nFirst Prize 1/1\nSecond Prize 2/2"
        );
    }
}
