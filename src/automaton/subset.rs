//! Accepting-subset search over an unordered hand.
//!
//! Subsets are explored breadth-first as strictly increasing index sequences,
//! so cards are always fed to the automaton in hand order. Each candidate keeps
//! the state its cards lead to; extending it is a single transition, and an
//! extension with no transition is dropped together with everything that would
//! have grown from it.

use std::collections::{HashSet, VecDeque};

use crate::card::Card;

use super::{Automaton, StateId};

/// Hand positions representable in a subset mask; covers every card of one deck.
pub const MAX_HAND: usize = u128::BITS as usize;

#[derive(Clone, Copy, Debug)]
struct Candidate {
    mask: u128,
    /// First hand index that may still be appended.
    next: usize,
    state: StateId,
}

impl Automaton {
    /// Whether some order-preserving subset of `hand` is fully accepted.
    pub fn accepts_subset(&self, hand: &[Card]) -> bool {
        self.accepting_subset(hand).is_some()
    }

    /// Indices (ascending) of the first fully accepted subset found, smallest first.
    ///
    /// Only the first [`MAX_HAND`] cards of longer hands are considered.
    pub fn accepting_subset(&self, hand: &[Card]) -> Option<Vec<usize>> {
        let hand = if hand.len() > MAX_HAND {
            log::warn!(
                "hand of {} cards exceeds {MAX_HAND}, searching the first {MAX_HAND} only",
                hand.len()
            );
            &hand[..MAX_HAND]
        } else {
            hand
        };
        if hand.len() < self.phase().min_cards() {
            return None;
        }

        let mut queue = VecDeque::from([Candidate {
            mask: 0,
            next: 0,
            state: self.start(),
        }]);
        // Two candidates ending on the same state at the same index have the same future.
        let mut seen: HashSet<(StateId, usize)> = HashSet::new();
        let mut explored = 0usize;

        while let Some(candidate) = queue.pop_front() {
            explored += 1;
            for idx in candidate.next..hand.len() {
                let Some(state) = self.next_state(candidate.state, hand[idx]) else {
                    continue;
                };
                let mask = candidate.mask | (1u128 << idx);
                if self.node(state).is_final() {
                    log::trace!(
                        "phase {} accepted after exploring {explored} subsets",
                        self.phase()
                    );
                    return Some(mask_indices(mask));
                }
                if seen.insert((state, idx)) {
                    queue.push_back(Candidate {
                        mask,
                        next: idx + 1,
                        state,
                    });
                }
            }
        }
        log::trace!(
            "phase {} rejected after exploring {explored} subsets",
            self.phase()
        );
        None
    }
}

fn mask_indices(mask: u128) -> Vec<usize> {
    (0..MAX_HAND).filter(|idx| mask & (1u128 << idx) != 0).collect()
}

#[cfg(test)]
mod tests {
    use crate::card::parse_sequence;
    use crate::error::PhaseError;

    use super::*;

    fn hand(text: &str) -> Vec<Card> {
        parse_sequence(text).expect("valid hand")
    }

    #[test]
    fn finds_set_among_noise() -> Result<(), PhaseError> {
        let automaton = Automaton::new("S3")?;
        let cards = hand("R1 B2 R5 B5 Y5 G9");
        assert_eq!(automaton.accepting_subset(&cards), Some(vec![2, 3, 4]));
        assert!(!automaton.accepts_subset(&hand("R1 B2 G9")));
        Ok(())
    }

    #[test]
    fn smallest_subset_wins() -> Result<(), PhaseError> {
        let automaton = Automaton::new("S2")?;
        let subset = automaton.accepting_subset(&hand("R7 W G3 B7 Y7"));
        assert_eq!(subset, Some(vec![0, 1]));
        Ok(())
    }

    #[test]
    fn empty_hand_has_no_subset() -> Result<(), PhaseError> {
        assert_eq!(Automaton::new("S")?.accepting_subset(&[]), None);
        Ok(())
    }

    #[test]
    fn order_is_preserved() -> Result<(), PhaseError> {
        let automaton = Automaton::new("R3")?;
        assert!(automaton.accepts_subset(&hand("G9 R4 Y1 B5 G6")));
        assert!(!automaton.accepts_subset(&hand("G6 R5 B4")));
        Ok(())
    }

    #[test]
    fn mask_indices_are_ascending() {
        assert_eq!(mask_indices(0b1010_0001), vec![0, 5, 7]);
        assert_eq!(mask_indices(1u128 << 127), vec![127]);
    }
}
