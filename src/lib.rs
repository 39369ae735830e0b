//! Phase-10 style phase validation: compiles phase descriptors into card automata and checks hands against them.

pub mod automaton;
pub mod cache;
pub mod card;
pub mod error;
pub mod phase;

pub use crate::automaton::{Automaton, Cursor, Guard, State, StateId, Transition};
pub use crate::cache::PhaseCache;
pub use crate::card::{
    Card, Color, DECK_SIZE, Rank, full_deck, parse_card, parse_sequence, shuffled_deck,
};
pub use crate::error::{CardError, PhaseError, SnapshotError};
pub use crate::phase::{Component, Phase, Shape};
