//! Compiles phase descriptors into state graphs.
//!
//! Every primitive yields a [`Fragment`]: a start state plus the states that
//! complete the group. Fragments are wired into a shared arena so compound
//! phases can splice one fragment's completions onto the next one's start.

use crate::card::{Color, Rank};
use crate::phase::{Component, Phase, Shape};

use super::state::{Guard, State, StateId};

const WILD: Guard = Guard::Rank(Rank::Wild);

/// Start state and completing states of one compiled primitive.
#[derive(Clone, Debug)]
pub(crate) struct Fragment {
    pub start: StateId,
    pub finals: Vec<StateId>,
}

/// Arena under construction.
#[derive(Debug, Default)]
pub(crate) struct Builder {
    states: Vec<State>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_states(self) -> Vec<State> {
        self.states
    }

    fn alloc(&mut self) -> StateId {
        let id = StateId::new(self.states.len() as u32);
        self.states.push(State::default());
        id
    }

    fn alloc_chain(&mut self, len: usize) -> Vec<StateId> {
        (0..len).map(|_| self.alloc()).collect()
    }

    fn put(&mut self, from: StateId, guard: Guard, to: StateId) {
        self.states[from.index()].insert(guard, to);
    }

    pub fn mark_final(&mut self, id: StateId) {
        self.states[id.index()].is_final = true;
    }

    /// Compiles a whole phase, returning its start state and final states.
    pub fn phase(&mut self, phase: &Phase) -> Fragment {
        let fragment = match phase {
            Phase::Unsized(Shape::Set) => self.any_group(Rank::NUMBERED.map(Guard::Rank)),
            Phase::Unsized(Shape::Color) => self.any_group(Color::REAL.map(Guard::Color)),
            Phase::Unsized(Shape::Run) => self.any_run(),
            Phase::Sized(components) => self.sequence(components),
        };
        for id in &fragment.finals {
            self.mark_final(*id);
        }
        fragment
    }

    /// Chains sized components so each must complete before the next begins.
    fn sequence(&mut self, components: &[Component]) -> Fragment {
        let mut fragments = components.iter().map(|c| self.component(*c)).collect::<Vec<_>>();
        for pair in fragments.windows(2) {
            for end in &pair[0].finals {
                self.put(*end, Guard::Epsilon, pair[1].start);
            }
        }
        let last = fragments.pop().unwrap_or_else(|| self.empty());
        let start = fragments.first().map(|f| f.start).unwrap_or(last.start);
        Fragment {
            start,
            finals: last.finals,
        }
    }

    fn empty(&mut self) -> Fragment {
        let start = self.alloc();
        Fragment {
            start,
            finals: Vec::new(),
        }
    }

    fn component(&mut self, component: Component) -> Fragment {
        match component.shape() {
            Shape::Set => self.group(Rank::NUMBERED.map(Guard::Rank), component.size()),
            Shape::Color => self.group(Color::REAL.map(Guard::Color), component.size()),
            Shape::Run => self.run(component.size()),
        }
    }

    /// `size` cards that all pass one of `keys`, wilds standing in anywhere.
    ///
    /// Each key gets its own chain; a shared all-wild chain commits into a key's
    /// chain at the matching position once a real card shows up. Chain tails
    /// self-loop, so extra matching cards keep the group complete.
    fn group<const N: usize>(&mut self, keys: [Guard; N], size: usize) -> Fragment {
        let start = self.alloc();
        let wilds = self.alloc_chain(size);
        let tail = size - 1;

        self.put(start, WILD, wilds[0]);
        for pos in 1..size {
            self.put(wilds[pos - 1], WILD, wilds[pos]);
        }
        self.put(wilds[tail], WILD, wilds[tail]);

        let mut finals = Vec::with_capacity(N + 1);
        for key in keys {
            let chain = self.alloc_chain(size);
            self.put(start, key, chain[0]);
            for pos in 1..size {
                self.put(chain[pos - 1], key, chain[pos]);
                self.put(chain[pos - 1], WILD, chain[pos]);
                self.put(wilds[pos - 1], key, chain[pos]);
            }
            self.put(chain[tail], key, chain[tail]);
            self.put(chain[tail], WILD, chain[tail]);
            self.put(wilds[tail], key, chain[tail]);
            finals.push(chain[tail]);
        }
        finals.push(wilds[tail]);
        Fragment { start, finals }
    }

    /// `size` consecutive ranks in any colors, wilds filling gaps.
    ///
    /// One chain per window of ranks; the all-wild chain commits into the window
    /// whose rank at the next position matches the real card.
    fn run(&mut self, size: usize) -> Fragment {
        let ranks = Rank::NUMBERED;
        let start = self.alloc();
        let windows = (0..=ranks.len() - size)
            .map(|_| self.alloc_chain(size))
            .collect::<Vec<_>>();

        for (first, chain) in windows.iter().enumerate() {
            self.put(start, Guard::Rank(ranks[first]), chain[0]);
            for pos in 1..size {
                self.put(chain[pos - 1], Guard::Rank(ranks[first + pos]), chain[pos]);
                self.put(chain[pos - 1], WILD, chain[pos]);
            }
        }

        let wilds = self.alloc_chain(size);
        self.put(start, WILD, wilds[0]);
        for pos in 1..size {
            self.put(wilds[pos - 1], WILD, wilds[pos]);
            for (first, chain) in windows.iter().enumerate() {
                self.put(wilds[pos - 1], Guard::Rank(ranks[first + pos]), chain[pos]);
            }
        }

        let mut finals = windows.iter().map(|chain| chain[size - 1]).collect::<Vec<_>>();
        finals.push(wilds[size - 1]);
        Fragment { start, finals }
    }

    /// One or more cards passing the same key; every state completes the group.
    fn any_group<const N: usize>(&mut self, keys: [Guard; N]) -> Fragment {
        let start = self.alloc();
        let wild = self.alloc();
        self.put(start, WILD, wild);
        self.put(wild, WILD, wild);

        let mut finals = Vec::with_capacity(N + 1);
        for key in keys {
            let state = self.alloc();
            self.put(start, key, state);
            self.put(wild, key, state);
            self.put(state, key, state);
            self.put(state, WILD, state);
            finals.push(state);
        }
        finals.push(wild);
        Fragment { start, finals }
    }

    /// A run of any length from one card up to every rank.
    fn any_run(&mut self) -> Fragment {
        let ranks = Rank::NUMBERED;
        let start = self.alloc();
        let by_rank = self.alloc_chain(ranks.len());
        for (idx, rank) in ranks.iter().enumerate() {
            self.put(start, Guard::Rank(*rank), by_rank[idx]);
            if idx > 0 {
                self.put(by_rank[idx - 1], Guard::Rank(*rank), by_rank[idx]);
                self.put(by_rank[idx - 1], WILD, by_rank[idx]);
            }
        }

        // wilds[k] has seen k + 1 wilds, so the next real card sits at rank k + 2 or above.
        let wilds = self.alloc_chain(ranks.len());
        self.put(start, WILD, wilds[0]);
        for k in 0..ranks.len() {
            if k + 1 < ranks.len() {
                self.put(wilds[k], WILD, wilds[k + 1]);
            }
            for idx in k + 1..ranks.len() {
                self.put(wilds[k], Guard::Rank(ranks[idx]), by_rank[idx]);
            }
        }

        let mut finals = by_rank;
        finals.extend(wilds);
        Fragment { start, finals }
    }
}
