use thiserror::Error;

use crate::card::{Color, Rank};

/// Errors raised while constructing or parsing cards.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("both color ({color:?}) and rank ({rank:?}) must be wild or skip if one of them is")]
    Mismatch { color: Color, rank: Rank },
    #[error("card {token:?} does not match [RBGY](1-12), W or S")]
    Parse { token: String },
    #[error("unrecognized color in card {token:?}")]
    UnknownColor { token: String },
    #[error("unrecognized rank in card {token:?}")]
    UnknownRank { token: String },
}

/// Errors raised while compiling a phase descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhaseError {
    #[error("unrecognized phase {0:?}")]
    Unrecognized(String),
    #[error("component {component:?} has size {size}, expected 1 to {max}")]
    InvalidSize {
        component: String,
        size: usize,
        max: usize,
    },
}

/// Errors raised while encoding or restoring automaton snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to encode automaton: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode automaton: {0}")]
    Decode(#[from] bincode::error::DecodeError),
    #[error("corrupt automaton snapshot: {0}")]
    Corrupt(&'static str),
}
