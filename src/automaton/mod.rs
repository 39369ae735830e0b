//! Card automata compiled from phase descriptors.
//!
//! States live in a flat arena and refer to each other by [`StateId`], so the
//! self-loops and shared completions the primitives rely on are plain indices.
//! A compiled [`Automaton`] is immutable; matching only ever reads it.

mod builder;
pub mod dot;
pub mod matcher;
pub mod state;
pub mod subset;

use serde::{Deserialize, Serialize};

use crate::error::{PhaseError, SnapshotError};
use crate::phase::Phase;

use self::builder::Builder;
pub use self::matcher::Cursor;
pub use self::state::{Guard, State, StateId, Transition};

/// A compiled phase: state arena, start state and final states.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Automaton {
    phase: Phase,
    states: Vec<State>,
    start: StateId,
    finals: Vec<StateId>,
}

impl Automaton {
    /// Parses and compiles a phase string such as `C3+R4`.
    pub fn new(phase: &str) -> Result<Self, PhaseError> {
        Ok(Self::compile(&phase.parse()?))
    }

    /// Compiles an already parsed phase.
    pub fn compile(phase: &Phase) -> Self {
        let mut builder = Builder::new();
        let fragment = builder.phase(phase);
        let states = builder.into_states();
        log::debug!(
            "compiled phase {} into {} states ({} final)",
            phase,
            states.len(),
            fragment.finals.len()
        );
        Self {
            phase: phase.clone(),
            states,
            start: fragment.start,
            finals: fragment.finals,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[inline]
    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn finals(&self) -> &[StateId] {
        &self.finals
    }

    /// The state behind `id`, or `None` for a handle this automaton did not hand out.
    #[inline]
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// Arena lookup for handles that came from this automaton.
    #[inline]
    pub(crate) fn node(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }

    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, state)| (StateId::new(idx as u32), state))
    }

    /// Number of states in the arena.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Encodes the compiled automaton so it can be cached outside the process.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serde::encode_to_vec(
            self,
            bincode::config::standard(),
        )?)
    }

    /// Restores an automaton written by [`Automaton::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let (automaton, _): (Automaton, usize) =
            bincode::serde::decode_from_slice(bytes, bincode::config::standard())?;
        automaton.validate()?;
        Ok(automaton)
    }

    fn validate(&self) -> Result<(), SnapshotError> {
        let in_range = |id: &StateId| id.index() < self.states.len();
        if !in_range(&self.start) {
            return Err(SnapshotError::Corrupt("start state out of range"));
        }
        if !self.finals.iter().all(in_range) {
            return Err(SnapshotError::Corrupt("final state out of range"));
        }
        let targets_ok = self
            .states
            .iter()
            .flat_map(|state| state.transitions())
            .all(|t| in_range(&t.target));
        if !targets_ok {
            return Err(SnapshotError::Corrupt("transition target out of range"));
        }
        // an epsilon chain longer than the arena revisits a state
        for (id, _) in self.states() {
            let mut here = id;
            let mut hops = 0usize;
            while let Some(next) = self.node(here).epsilon() {
                hops += 1;
                if hops > self.states.len() {
                    return Err(SnapshotError::Corrupt("epsilon cycle"));
                }
                here = next;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_phase_produces_no_automaton() {
        assert_eq!(
            Automaton::new("S3+Q4"),
            Err(PhaseError::Unrecognized("S3+Q4".to_string()))
        );
    }

    #[test]
    fn compilation_is_deterministic() -> Result<(), PhaseError> {
        assert_eq!(Automaton::new("S3+R7+C4")?, Automaton::new("S3+R7+C4")?);
        Ok(())
    }

    #[test]
    fn finals_are_flagged_in_the_arena() -> Result<(), PhaseError> {
        let automaton = Automaton::new("R4")?;
        for id in automaton.finals() {
            assert!(automaton.node(*id).is_final());
        }
        assert!(!automaton.node(automaton.start()).is_final());
        assert_eq!(automaton.states().count(), automaton.len());
        Ok(())
    }

    #[test]
    fn foreign_handles_are_not_resolved() -> Result<(), PhaseError> {
        let small = Automaton::new("S1")?;
        let large = Automaton::new("S3+S3+R7+C4")?;
        let foreign = large.finals()[0];
        assert!(foreign.index() >= small.len());
        assert!(small.state(foreign).is_none());
        assert!(small.state(small.start()).is_some());
        Ok(())
    }

    #[test]
    fn snapshot_round_trip() -> Result<(), Box<dyn std::error::Error>> {
        let automaton = Automaton::new("C3+R4")?;
        let bytes = automaton.to_bytes()?;
        assert_eq!(Automaton::from_bytes(&bytes)?, automaton);
        assert!(Automaton::from_bytes(&bytes[..bytes.len() / 2]).is_err());
        Ok(())
    }

    #[test]
    fn corrupt_snapshot_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let mut automaton = Automaton::new("S2")?;
        automaton.start = StateId::new(u32::MAX);
        let bytes = automaton.to_bytes()?;
        assert!(matches!(
            Automaton::from_bytes(&bytes),
            Err(SnapshotError::Corrupt(_))
        ));
        Ok(())
    }

    #[test]
    fn epsilon_cycle_snapshot_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let mut automaton = Automaton::new("S1+S1")?;
        let start = automaton.start;
        automaton.states[start.index()].insert(Guard::Epsilon, start);
        let bytes = automaton.to_bytes()?;
        assert!(matches!(
            Automaton::from_bytes(&bytes),
            Err(SnapshotError::Corrupt("epsilon cycle"))
        ));

        // a longer loop through the splice point is caught as well
        let mut automaton = Automaton::new("S1+S1")?;
        let spliced = automaton
            .states()
            .find(|(_, state)| state.epsilon().is_some())
            .map(|(id, _)| id)
            .ok_or("compound phase has a splice")?;
        automaton.states[start.index()].insert(Guard::Epsilon, spliced);
        let target = automaton.node(spliced).epsilon().ok_or("splice target")?;
        automaton.states[target.index()].insert(Guard::Epsilon, start);
        let bytes = automaton.to_bytes()?;
        assert!(matches!(
            Automaton::from_bytes(&bytes),
            Err(SnapshotError::Corrupt("epsilon cycle"))
        ));
        Ok(())
    }
}
