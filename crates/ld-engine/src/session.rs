//! Draw Session State Machine
//!
//! ```text
//!          start (validated)
//!   Idle ───────────────────▶ Rolling ◀─┐
//!    ▲                          │   └───┘ tick: resample display batch
//!    └──────────────────────────┘
//!      stop: commit last sampled batch
//! ```
//!
//! Ticks never write anything. Stopping is the only way out of `Rolling` and
//! it always finalizes the draw; the ledger decides whether the batch sticks.

use std::sync::Arc;

use ld_core::{DrawError, DrawResult, Participant, WinnerRecord};

use crate::allocator::DrawAllocator;
use crate::eligibility::{EligibilityResolver, PoolMode};
use crate::ledger::WinnerLedger;
use crate::ticker::Ticker;

// ═══════════════════════════════════════════════════════════════════════════════
// REQUEST
// ═══════════════════════════════════════════════════════════════════════════════

/// Validated input for starting a draw
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRequest {
    award: String,
    count: u32,
}

impl DrawRequest {
    /// Build a request from an optional award and a signed count
    pub fn new(award: Option<&str>, count: i64) -> DrawResult<Self> {
        let award = award
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .ok_or(DrawError::NoAwardSelected)?;
        let count = u32::try_from(count)
            .ok()
            .filter(|c| *c > 0)
            .ok_or_else(|| DrawError::InvalidDrawCount(count.to_string()))?;

        Ok(Self {
            award: award.to_string(),
            count,
        })
    }

    /// Build a request from raw text, as typed by a user
    pub fn parse(award: Option<&str>, count: &str) -> DrawResult<Self> {
        let parsed = count
            .trim()
            .parse::<i64>()
            .map_err(|_| DrawError::InvalidDrawCount(count.to_string()))?;
        Self::new(award, parsed)
    }

    pub fn award(&self) -> &str {
        &self.award
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Rolling,
}

/// Per-draw state, alive only while rolling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawContext {
    pub selected_award: String,
    pub requested_count: u32,
    /// Batch shown by the latest tick; committed on stop
    pub last_sampled_batch: Vec<Participant>,
    /// Ticks since start
    pub ticks: u64,
}

/// Outcome of [`DrawSession::toggle`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Idle → Rolling, with the first display batch
    Started(Vec<Participant>),
    /// Rolling → Idle, with the records that were committed
    Committed(Vec<WinnerRecord>),
}

// ═══════════════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════════════

/// Reusable draw session
///
/// Several sessions may share one ledger; the ledger serializes their
/// commits and rejects any that no longer fit the quota.
pub struct DrawSession {
    ledger: Arc<WinnerLedger>,
    resolver: EligibilityResolver,
    allocator: DrawAllocator,
    context: Option<DrawContext>,
}

impl DrawSession {
    pub fn new(ledger: Arc<WinnerLedger>, mode: PoolMode, reserved_enabled: bool) -> Self {
        Self {
            ledger,
            resolver: EligibilityResolver::new(mode, reserved_enabled),
            allocator: DrawAllocator::new(),
            context: None,
        }
    }

    /// Replace the allocator, e.g. with a seeded one
    pub fn with_allocator(mut self, allocator: DrawAllocator) -> Self {
        self.allocator = allocator;
        self
    }

    pub fn ledger(&self) -> &Arc<WinnerLedger> {
        &self.ledger
    }

    /// Change who is eligible; takes effect on the next sample
    pub fn set_mode(&mut self, mode: PoolMode) {
        self.resolver.set_mode(mode);
    }

    pub fn state(&self) -> SessionState {
        if self.context.is_some() {
            SessionState::Rolling
        } else {
            SessionState::Idle
        }
    }

    pub fn context(&self) -> Option<&DrawContext> {
        self.context.as_ref()
    }

    /// Idle → Rolling
    ///
    /// Rejects the request, staying idle, when the award is unknown or lacks
    /// quota for the requested count, or when no batch can be drawn.
    pub fn start(&mut self, request: DrawRequest) -> DrawResult<&[Participant]> {
        if self.context.is_some() {
            return Err(DrawError::AlreadyRolling);
        }

        let remaining = self.ledger.remaining_quota(&request.award)?;
        if request.count > remaining {
            return Err(DrawError::InsufficientQuota {
                award: request.award,
                requested: request.count,
                remaining,
            });
        }

        let batch = sample_batch(
            &self.ledger,
            &self.resolver,
            &mut self.allocator,
            &request.award,
            request.count,
        )?;

        log::info!("Draw started: {} x{}", request.award, request.count);
        let context = self.context.insert(DrawContext {
            selected_award: request.award,
            requested_count: request.count,
            last_sampled_batch: batch,
            ticks: 0,
        });
        Ok(context.last_sampled_batch.as_slice())
    }

    /// Rolling → Rolling: resample the display batch
    ///
    /// On error the previous batch is kept and the session keeps rolling.
    pub fn tick(&mut self) -> DrawResult<&[Participant]> {
        let context = self.context.as_mut().ok_or(DrawError::NotRolling)?;

        let batch = sample_batch(
            &self.ledger,
            &self.resolver,
            &mut self.allocator,
            &context.selected_award,
            context.requested_count,
        )?;
        context.last_sampled_batch = batch;
        context.ticks += 1;

        log::debug!("Tick {} for {}", context.ticks, context.selected_award);
        Ok(context.last_sampled_batch.as_slice())
    }

    /// Rolling → Idle: commit the last sampled batch
    ///
    /// The session is idle afterwards whatever the outcome. A rejected commit
    /// comes back as [`DrawError::NothingRecorded`].
    pub fn stop(&mut self) -> DrawResult<Vec<WinnerRecord>> {
        let context = self.context.take().ok_or(DrawError::NotRolling)?;

        self.ledger
            .commit(&context.selected_award, &context.last_sampled_batch)
            .map_err(|e| {
                log::warn!("Draw for {} not recorded: {}", context.selected_award, e);
                DrawError::NothingRecorded(Box::new(e))
            })
    }

    /// Single start/stop trigger
    ///
    /// `request` is only consulted when idle.
    pub fn toggle(&mut self, request: DrawRequest) -> DrawResult<Transition> {
        match self.state() {
            SessionState::Idle => self
                .start(request)
                .map(|batch| Transition::Started(batch.to_vec())),
            SessionState::Rolling => self.stop().map(Transition::Committed),
        }
    }

    /// Tick until `should_stop` says so, then commit
    ///
    /// `on_tick` sees every freshly sampled batch. A tick that fails ends the
    /// roll early and the last good batch is committed.
    pub fn run_until<T, D, S>(
        &mut self,
        ticker: &mut T,
        mut on_tick: D,
        mut should_stop: S,
    ) -> DrawResult<Vec<WinnerRecord>>
    where
        T: Ticker + ?Sized,
        D: FnMut(&DrawContext),
        S: FnMut(&DrawContext) -> bool,
    {
        loop {
            let context = self.context.as_ref().ok_or(DrawError::NotRolling)?;
            if should_stop(context) {
                break;
            }

            ticker.wait();
            if let Err(e) = self.tick() {
                log::warn!("Rolling stopped early: {}", e);
                break;
            }
            if let Some(context) = self.context.as_ref() {
                on_tick(context);
            }
        }

        self.stop()
    }
}

fn sample_batch(
    ledger: &WinnerLedger,
    resolver: &EligibilityResolver,
    allocator: &mut DrawAllocator,
    award: &str,
    count: u32,
) -> DrawResult<Vec<Participant>> {
    let roster = ledger.roster();
    let pool = resolver.pool(&roster, award)?;
    let reserved = if resolver.reserved_enabled() {
        roster.reserved_for(award)
    } else {
        Vec::new()
    };
    allocator.draw(&roster, award, count, &pool, &reserved)
}
