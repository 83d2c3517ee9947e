//! # ld-engine: Draw/allocation engine for Lucky Draw
//!
//! Matches a fixed roster of participants against award quotas, one award at
//! a time, and keeps the committed winner list consistent with every quota.
//!
//! ## Architecture
//!
//! ```text
//! DrawSession (Idle ⇄ Rolling, driven by a Ticker)
//!     │
//!     ├── EligibilityResolver (who may be drawn)
//!     ├── DrawAllocator (seeded sampling, reserved winners first)
//!     └── WinnerLedger (commit / revoke / reset, single writer)
//!           │
//!           v
//!     Roster + WinnerStore
//! ```
//!
//! Rolling ticks only ever resample a display batch. The ledger is the one
//! place where winners become durable.

pub mod allocator;
pub mod eligibility;
pub mod ledger;
pub mod loader;
pub mod session;
pub mod ticker;

pub use allocator::*;
pub use eligibility::*;
pub use ledger::*;
pub use loader::*;
pub use session::*;
pub use ticker::*;
