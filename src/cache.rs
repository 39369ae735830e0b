use std::collections::HashMap;
use std::sync::Arc;

use crate::automaton::Automaton;
use crate::error::PhaseError;

/// Compiled automata keyed by phase string.
///
/// Compilation dominates a single match, so callers validating many hands
/// against the same phases should keep one of these around. The returned
/// automata are shared read-only and may be handed to other threads.
#[derive(Debug, Default)]
pub struct PhaseCache {
    compiled: HashMap<String, Arc<Automaton>>,
}

impl PhaseCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the automaton for `phase`, compiling it on first use.
    ///
    /// Invalid phases are not cached; every lookup reports the error again.
    pub fn get_or_compile(&mut self, phase: &str) -> Result<Arc<Automaton>, PhaseError> {
        if let Some(automaton) = self.compiled.get(phase) {
            return Ok(Arc::clone(automaton));
        }
        log::debug!("phase cache miss for {phase}");
        let automaton = Arc::new(Automaton::new(phase)?);
        self.compiled.insert(phase.to_string(), Arc::clone(&automaton));
        Ok(automaton)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    pub fn clear(&mut self) {
        self.compiled.clear();
    }
}
