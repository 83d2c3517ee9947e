//! Draw Allocator: picks a batch of winners
//!
//! Sampling is uniform and without replacement. Reserved winners for the
//! award take precedence over the random pool. The allocator never touches
//! the roster; it only reads it to check quota.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;

use ld_core::{DrawError, DrawResult, Participant, ReservedWinner, Roster};

/// Seedable batch sampler
pub struct DrawAllocator {
    rng: ChaCha8Rng,
}

impl DrawAllocator {
    /// Allocator seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_os_rng(),
        }
    }

    /// Allocator with reproducible output
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Reseed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Draw exactly `count` distinct winners for `award`
    ///
    /// `reserved_for_award` holds the pending reservations for this award
    /// (empty when the reserved-winner capability is off). When there are at
    /// least `count` of them the whole batch comes from the reservations;
    /// otherwise every reservation is taken and the rest is sampled from
    /// `pool` minus the reserved names.
    ///
    /// On error nothing is returned; a batch is never partial.
    pub fn draw(
        &mut self,
        roster: &Roster,
        award: &str,
        count: u32,
        pool: &[Participant],
        reserved_for_award: &[&ReservedWinner],
    ) -> DrawResult<Vec<Participant>> {
        if count == 0 {
            return Err(DrawError::InvalidDrawCount(count.to_string()));
        }

        let remaining = roster.remaining_quota(award)?;
        if count > remaining {
            return Err(DrawError::InsufficientQuota {
                award: award.to_string(),
                requested: count,
                remaining,
            });
        }

        let wanted = count as usize;
        let reserved: Vec<Participant> = reserved_for_award
            .iter()
            .map(|r| Participant::new(r.participant.as_str()))
            .collect();

        if reserved.is_empty() {
            return self.sample(pool, wanted);
        }

        if reserved.len() >= wanted {
            return self.sample(&reserved, wanted);
        }

        let reserved_names: HashSet<&str> = reserved.iter().map(|p| p.name.as_str()).collect();
        let rest: Vec<Participant> = pool
            .iter()
            .filter(|p| !reserved_names.contains(p.name.as_str()))
            .cloned()
            .collect();

        let topped_up = self.sample(&rest, wanted - reserved.len())?;
        let mut batch = reserved;
        batch.extend(topped_up);
        Ok(batch)
    }

    fn sample(&mut self, items: &[Participant], amount: usize) -> DrawResult<Vec<Participant>> {
        if items.len() < amount {
            return Err(DrawError::InsufficientPool {
                requested: amount,
                available: items.len(),
            });
        }

        Ok(index::sample(&mut self.rng, items.len(), amount)
            .iter()
            .map(|i| items[i].clone())
            .collect())
    }
}

impl Default for DrawAllocator {
    fn default() -> Self {
        Self::new()
    }
}
