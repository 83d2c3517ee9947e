//! ld-store: Storage collaborators for Lucky Draw
//!
//! - JSON files in a data folder (participants, awards, winners, reserved winners)
//! - In-memory stores for headless runs and tests
//! - The `config.json` settings file

mod error;
mod json;
mod memory;
mod settings;

pub use error::*;
pub use json::*;
pub use memory::*;
pub use settings::*;
