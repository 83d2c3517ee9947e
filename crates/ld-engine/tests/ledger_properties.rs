//! Randomized Ledger Properties
//!
//! Long seeded sequences of draws, revokes and resets, checking after every
//! step that no award ever holds more winners than its quota.

use std::sync::Arc;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use ld_core::{Award, DrawError, Participant, Roster};
use ld_engine::{DrawAllocator, DrawRequest, DrawSession, PoolMode, WinnerLedger};
use ld_store::MemoryWinnerStore;

const STEPS: usize = 400;

fn roster() -> Roster {
    Roster::new(
        (0..12).map(|i| Participant::new(format!("P{:02}", i))).collect(),
        vec![
            Award::new("Gold", 1),
            Award::new("Silver", 3),
            Award::new("Bronze", 5),
            Award::new("Empty", 0),
        ],
    )
}

fn assert_quota_respected(ledger: &WinnerLedger) {
    let roster = ledger.roster();
    for award in roster.awards() {
        let used = roster.winners_for(&award.name).count() as u32;
        assert!(used <= award.quota, "{} holds {} of {}", award.name, used, award.quota);
    }
}

fn run_sequence(seed: u64, mode: PoolMode) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let store = MemoryWinnerStore::new();
    let ledger = Arc::new(WinnerLedger::new(roster(), Box::new(store.clone())));
    let mut session =
        DrawSession::new(ledger.clone(), mode, false).with_allocator(DrawAllocator::with_seed(seed));
    let awards: Vec<String> = roster().awards().iter().map(|a| a.name.clone()).collect();

    for _ in 0..STEPS {
        match rng.random_range(0..10) {
            0..=5 => {
                let award = &awards[rng.random_range(0..awards.len())];
                let count = rng.random_range(1..=3);
                let request = DrawRequest::new(Some(award.as_str()), count).unwrap();
                if session.start(request).is_ok() {
                    for _ in 0..rng.random_range(0..4) {
                        let _ = session.tick();
                    }
                    match session.stop() {
                        Ok(records) => assert_eq!(records.len() as i64, count),
                        Err(err) => assert!(matches!(err, DrawError::NothingRecorded(_))),
                    }
                }
            }
            6..=8 => {
                let winners = ledger.winners();
                if let Some(record) = winners.get(rng.random_range(0..winners.len().max(1))) {
                    ledger.revoke(&record.award, &record.participant).unwrap();
                    assert_eq!(ledger.winners().len(), winners.len() - 1);
                }
            }
            _ => {
                ledger.reset().unwrap();
                let roster = ledger.roster();
                for award in roster.awards() {
                    assert_eq!(roster.remaining_quota(&award.name).unwrap(), award.quota);
                }
            }
        }

        assert_quota_respected(&ledger);
        assert_eq!(store.saved(), ledger.winners());
    }
}

#[test]
fn test_quota_never_exceeded_not_yet_won() {
    for seed in 0..10 {
        run_sequence(seed, PoolMode::NotYetWonOnly);
    }
}

#[test]
fn test_quota_never_exceeded_all_participants() {
    for seed in 100..110 {
        run_sequence(seed, PoolMode::AllParticipants);
    }
}

#[test]
fn test_revoke_restores_previous_state() {
    let ledger = WinnerLedger::new(roster(), Box::new(MemoryWinnerStore::new()));
    ledger.commit("Bronze", &[Participant::new("P01"), Participant::new("P02")]).unwrap();
    let before = ledger.winners();

    ledger.commit("Bronze", &[Participant::new("P01")]).unwrap();
    ledger.revoke("Bronze", "P01").unwrap();

    assert_eq!(ledger.winners(), before);
}

#[test]
fn test_commits_from_threads_are_serialized() {
    let ledger = Arc::new(WinnerLedger::new(roster(), Box::new(MemoryWinnerStore::new())));

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let ledger = ledger.clone();
            std::thread::spawn(move || {
                ledger
                    .commit("Bronze", &[Participant::new(format!("P{:02}", i))])
                    .is_ok()
            })
        })
        .collect();

    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 5);
    assert_eq!(ledger.winners().len(), 5);
    assert_eq!(ledger.remaining_quota("Bronze").unwrap(), 0);
}
