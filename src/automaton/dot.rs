use std::collections::{HashSet, VecDeque};
use std::fmt::Write;

use super::{Automaton, Guard};

impl Automaton {
    /// Renders the states reachable from the start as a Graphviz `digraph`.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph phase {{");
        let _ = writeln!(out, "  label=\"{}\";", self.phase());

        let mut queue = VecDeque::from([self.start()]);
        let mut visited = HashSet::from([self.start()]);
        while let Some(id) = queue.pop_front() {
            let state = self.node(id);
            let style = if id == self.start() {
                "[label=\"\", shape=box, color=blue]"
            } else if state.is_final() {
                "[label=\"\", shape=diamond, color=green]"
            } else {
                "[label=\"\"]"
            };
            let _ = writeln!(out, "  N{} {style};", id.index());

            for transition in state.transitions() {
                let from = id.index();
                let to = transition.target.index();
                match transition.guard {
                    Guard::Epsilon => {
                        let _ = writeln!(out, "  N{from} -> N{to} [style=dashed];");
                    }
                    Guard::Default => {
                        let _ = writeln!(out, "  N{from} -> N{to} [label=\"*\"];");
                    }
                    Guard::Card(card) => {
                        let _ = writeln!(out, "  N{from} -> N{to} [label=\"{card}\"];");
                    }
                    Guard::Rank(rank) => {
                        let label = rank.value().map_or_else(|| "W".to_string(), |v| v.to_string());
                        let _ = writeln!(out, "  N{from} -> N{to} [label=\"{label}\"];");
                    }
                    Guard::Color(color) => {
                        let _ = writeln!(out, "  N{from} -> N{to} [label=\"{}\"];", color.letter());
                    }
                }
                if visited.insert(transition.target) {
                    queue.push_back(transition.target);
                }
            }
        }
        let _ = writeln!(out, "}}");
        out
    }
}
