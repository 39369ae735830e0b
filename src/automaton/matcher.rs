use crate::card::Card;

use super::{Automaton, StateId};

/// A position in an automaton; each traversal owns its own cursor.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    automaton: &'a Automaton,
    state: StateId,
}

impl<'a> Cursor<'a> {
    pub fn new(automaton: &'a Automaton) -> Self {
        Self {
            automaton,
            state: automaton.start(),
        }
    }

    /// A cursor parked on `state`, or `None` if `automaton` has no such state.
    pub fn at(automaton: &'a Automaton, state: StateId) -> Option<Self> {
        automaton.state(state)?;
        Some(Self { automaton, state })
    }

    #[inline]
    pub fn state(&self) -> StateId {
        self.state
    }

    #[inline]
    pub fn is_final(&self) -> bool {
        self.automaton.node(self.state).is_final()
    }

    /// Consumes `card`, following epsilon transitions first.
    ///
    /// Returns `false` and leaves the cursor in place when no transition admits the card.
    pub fn advance(&mut self, card: Card) -> bool {
        match self.automaton.next_state(self.state, card) {
            Some(next) => {
                self.state = next;
                true
            }
            None => false,
        }
    }
}

impl Automaton {
    /// Follows epsilon transitions from `id` until a state without one.
    ///
    /// Compiled and decoded automata never contain an epsilon cycle.
    pub(crate) fn epsilon_closure(&self, mut id: StateId) -> StateId {
        let mut hops = 0usize;
        while let Some(next) = self.node(id).epsilon() {
            hops += 1;
            debug_assert!(hops <= self.len(), "epsilon cycle through state {id:?}");
            id = next;
        }
        id
    }

    /// Resolves the transition for `card` from `id`, or `None` if the card is not accepted
    /// or `id` is not a state of this automaton.
    pub fn next_state(&self, id: StateId, card: Card) -> Option<StateId> {
        self.state(id)?;
        let here = self.epsilon_closure(id);
        self.node(here).resolve(card)
    }

    /// Accepts as soon as a final state is reached, without requiring the rest of `cards`.
    pub fn accepts_prefix(&self, cards: &[Card]) -> bool {
        let mut cursor = Cursor::new(self);
        if cursor.is_final() {
            return true;
        }
        for card in cards {
            if !cursor.advance(*card) {
                return false;
            }
            if cursor.is_final() {
                return true;
            }
        }
        cursor.is_final()
    }

    /// Accepts only if every card is consumed and the traversal ends in a final state.
    pub fn accepts_fully(&self, cards: &[Card]) -> bool {
        let mut cursor = Cursor::new(self);
        cards.iter().all(|card| cursor.advance(*card)) && cursor.is_final()
    }

    /// Whether every card can be consumed, regardless of where the traversal ends.
    ///
    /// Failure is monotonic: once a sequence cannot be consumed, no extension of it can.
    pub fn is_consumable(&self, cards: &[Card]) -> bool {
        let mut cursor = Cursor::new(self);
        cards.iter().all(|card| cursor.advance(*card))
    }
}
