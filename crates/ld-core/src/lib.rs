//! ld-core: Shared types for Lucky Draw
//!
//! Holds the in-memory roster (participants, awards, committed winners and
//! reserved winners), the error kinds every draw operation reports, and the
//! contracts the engine expects from its storage collaborators.
//!
//! Nothing in this crate performs I/O.

mod error;
mod model;
mod roster;
mod store;

pub use error::*;
pub use model::*;
pub use roster::*;
pub use store::*;
