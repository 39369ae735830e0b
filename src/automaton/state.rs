use serde::{Deserialize, Serialize};

use crate::card::{Card, Color, Rank};

/// Handle of a state inside an automaton's arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct StateId(pub(crate) u32);

impl StateId {
    #[inline]
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Condition a transition fires on.
///
/// Variants are declared in resolution order: epsilon transitions are followed
/// before any input is consulted, then an exact card beats a rank, a rank beats
/// a color, and the default catches everything else.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Guard {
    Epsilon,
    Card(Card),
    Rank(Rank),
    Color(Color),
    Default,
}

impl Guard {
    /// Whether this guard lets `card` through. Epsilon never consumes input.
    #[inline]
    pub fn admits(&self, card: Card) -> bool {
        match *self {
            Guard::Epsilon => false,
            Guard::Card(c) => c == card,
            Guard::Rank(r) => r == card.rank(),
            Guard::Color(c) => c == card.color(),
            Guard::Default => true,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub guard: Guard,
    pub target: StateId,
}

/// A node of the automaton graph.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub(crate) is_final: bool,
    pub(crate) transitions: Vec<Transition>,
}

impl State {
    #[inline]
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Adds a transition, replacing the target of an existing one with the same guard.
    pub fn insert(&mut self, guard: Guard, target: StateId) {
        match self.transitions.iter_mut().find(|t| t.guard == guard) {
            Some(existing) => existing.target = target,
            None => self.transitions.push(Transition { guard, target }),
        }
    }

    #[inline]
    pub fn epsilon(&self) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.guard == Guard::Epsilon)
            .map(|t| t.target)
    }

    /// Picks the transition for `card` by guard precedence, ignoring epsilon.
    pub fn resolve(&self, card: Card) -> Option<StateId> {
        self.transitions
            .iter()
            .filter(|t| t.guard.admits(card))
            .min_by_key(|t| t.guard)
            .map(|t| t.target)
    }
}
