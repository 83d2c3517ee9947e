//! Error types for Lucky Draw

use thiserror::Error;

/// Failure reported by a storage collaborator
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Draw engine error
///
/// Every kind except [`DrawError::Store`] is recoverable: the operation that
/// produced it left the roster untouched.
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Unknown award: {0}")]
    UnknownAward(String),

    #[error("No award selected")]
    NoAwardSelected,

    #[error("Invalid draw count: {0:?} (expected a positive integer)")]
    InvalidDrawCount(String),

    #[error("No eligible participants left")]
    EmptyPool,

    #[error("Not enough eligible participants: requested {requested}, available {available}")]
    InsufficientPool { requested: usize, available: usize },

    #[error("Award {award} has {remaining} slot(s) left, cannot draw {requested}")]
    InsufficientQuota {
        award: String,
        requested: u32,
        remaining: u32,
    },

    #[error("Committing {requested} winner(s) would exceed the quota of {award} ({remaining} left)")]
    QuotaExceeded {
        award: String,
        requested: u32,
        remaining: u32,
    },

    #[error("No winner record for {participant} in {award}")]
    RecordNotFound { award: String, participant: String },

    #[error("A draw is already rolling")]
    AlreadyRolling,

    #[error("No draw is rolling")]
    NotRolling,

    #[error("No winners were recorded: {0}")]
    NothingRecorded(Box<DrawError>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DrawError {
    /// Whether the caller may simply report the error and carry on.
    ///
    /// Storage failures are not recoverable because durability of the winner
    /// list can no longer be guaranteed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Store(_) => false,
            Self::NothingRecorded(inner) => inner.is_recoverable(),
            _ => true,
        }
    }
}

/// Result type alias
pub type DrawResult<T> = Result<T, DrawError>;
