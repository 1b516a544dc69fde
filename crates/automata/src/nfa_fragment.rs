use crate::CodeSet;
use crate::Edge;
use crate::StateGraph;
use crate::StateIndex;
use crate::StateRenamer;
use crate::epsilon_closure;
use crate::reachable_from;

/// A piece of an NFA with a single entry and a single exit state. The exit
/// state is not final, whoever embeds the fragment decides what happens
/// after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NfaFragment {
    pub start: StateIndex,
    pub end: StateIndex,
}

impl NfaFragment {
    /// Returns true iff the fragment accepts the empty string, i.e. its end is
    /// in the epsilon closure of its start.
    pub fn accepts_zero_characters(&self, graph: &StateGraph) -> bool {
        epsilon_closure(graph, [self.start]).contains(&self.end)
    }
}

/// The states reachable from a fragment, extracted so that they can be
/// inserted into any graph, including the one they came from.
struct Subgraph {
    states: Vec<StateIndex>,
    contents: Vec<(bool, Vec<Edge>)>,
    num_of_source_states: usize,
    fragment: NfaFragment,
}

impl Subgraph {
    fn extract(source: &StateGraph, fragment: NfaFragment) -> Self {
        let states = reachable_from(source, fragment.start);
        assert!(
            states.contains(&fragment.end),
            "End state {} is not reachable from start state {}",
            fragment.end,
            fragment.start
        );

        let contents = states
            .iter()
            .map(|&state_index| (source.is_final(state_index), source.outgoing_edges(state_index).to_vec()))
            .collect();

        Self {
            states,
            contents,
            num_of_source_states: source.num_of_states(),
            fragment,
        }
    }
}

/// Combinators that build NFA fragments inside the arena. These are the
/// primitives a regular expression is translated into.
impl StateGraph {
    /// A fragment accepting any single code of the set.
    pub fn symbol_set(&mut self, set: CodeSet) -> NfaFragment {
        let start = self.add_state(false);
        let end = self.add_state(false);
        self.add_edge(start, set, end);
        NfaFragment { start, end }
    }

    /// A fragment accepting exactly the given text, one code per character.
    pub fn literal(&mut self, text: &str) -> NfaFragment {
        let start = self.add_state(false);
        let mut end = start;
        for c in text.chars() {
            let next = self.add_state(false);
            self.add_edge(end, CodeSet::with_value(c as i32), next);
            end = next;
        }

        NfaFragment { start, end }
    }

    /// A fragment accepting the first followed by the second.
    pub fn concat(&mut self, first: NfaFragment, second: NfaFragment) -> NfaFragment {
        self.add_epsilon(first.end, second.start);
        NfaFragment {
            start: first.start,
            end: second.end,
        }
    }

    /// A fragment accepting any one of the given fragments.
    pub fn alternate(&mut self, fragments: &[NfaFragment]) -> NfaFragment {
        let start = self.add_state(false);
        let end = self.add_state(false);
        for fragment in fragments {
            self.add_epsilon(start, fragment.start);
            self.add_epsilon(fragment.end, end);
        }

        NfaFragment { start, end }
    }

    /// A fragment accepting zero or more repetitions.
    pub fn star(&mut self, fragment: NfaFragment) -> NfaFragment {
        let result = self.optional(fragment);
        self.add_epsilon(fragment.end, fragment.start);
        result
    }

    /// A fragment accepting one or more repetitions.
    pub fn plus(&mut self, fragment: NfaFragment) -> NfaFragment {
        let start = self.add_state(false);
        let end = self.add_state(false);
        self.add_epsilon(start, fragment.start);
        self.add_epsilon(fragment.end, fragment.start);
        self.add_epsilon(fragment.end, end);

        NfaFragment { start, end }
    }

    /// A fragment accepting the given fragment or the empty string.
    pub fn optional(&mut self, fragment: NfaFragment) -> NfaFragment {
        let start = self.add_state(false);
        let end = self.add_state(false);
        self.add_epsilon(start, fragment.start);
        self.add_epsilon(start, end);
        self.add_epsilon(fragment.end, end);

        NfaFragment { start, end }
    }

    /// Copies every state reachable from the fragment's start in the source
    /// graph into this graph, and returns the copied fragment. The end state
    /// must be reachable from the start state.
    pub fn duplicate_fragment(&mut self, source: &StateGraph, fragment: NfaFragment) -> NfaFragment {
        self.insert_subgraph(Subgraph::extract(source, fragment))
    }

    /// Copies a fragment of this graph, so that it can be embedded a second time.
    pub fn copy_fragment(&mut self, fragment: NfaFragment) -> NfaFragment {
        let subgraph = Subgraph::extract(self, fragment);
        self.insert_subgraph(subgraph)
    }

    fn insert_subgraph(&mut self, subgraph: Subgraph) -> NfaFragment {
        let mut renamer = StateRenamer::new(subgraph.num_of_source_states);
        for (&state_index, (is_final, _)) in subgraph.states.iter().zip(&subgraph.contents) {
            renamer.insert(state_index, self.add_state(*is_final));
        }

        for (&state_index, (_, edges)) in subgraph.states.iter().zip(subgraph.contents) {
            let from = renamer.get(state_index);
            for edge in edges {
                self.add_edge(from, edge.label, renamer.get(edge.to));
            }
        }

        NfaFragment {
            start: renamer.get(subgraph.fragment.start),
            end: renamer.get(subgraph.fragment.end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_case::test_case;
    use test_log::test;

    use crate::Automaton;
    use crate::test_utility::accepts;
    use crate::test_utility::codes;

    /// Builds `(ab|c)*d?` and marks its end final.
    fn example(graph: &mut StateGraph) -> NfaFragment {
        let ab = graph.literal("ab");
        let c = graph.literal("c");
        let choice = graph.alternate(&[ab, c]);
        let repeated = graph.star(choice);
        let d = graph.literal("d");
        let optional_d = graph.optional(d);
        graph.concat(repeated, optional_d)
    }

    #[test_case("", true ; "empty")]
    #[test_case("abcab", true ; "repetitions")]
    #[test_case("cd", true ; "optional suffix")]
    #[test_case("a", false ; "incomplete literal")]
    #[test_case("dd", false ; "suffix twice")]
    fn test_fragment_combinators(text: &str, expected: bool) {
        let mut graph = StateGraph::new();
        let fragment = example(&mut graph);
        graph.set_final(fragment.end, true);

        assert_eq!(accepts(&Automaton::new(graph, fragment.start), &codes(text)), expected);
    }

    #[test]
    fn test_accepts_zero_characters() {
        let mut graph = StateGraph::new();
        let digit = graph.symbol_set(CodeSet::with_range('0' as i32, '9' as i32 + 1));
        let digits = graph.plus(digit);
        assert!(!digits.accepts_zero_characters(&graph));

        let digit = graph.symbol_set(CodeSet::with_range('0' as i32, '9' as i32 + 1));
        let optional_digits = graph.star(digit);
        assert!(optional_digits.accepts_zero_characters(&graph));
    }

    #[test]
    fn test_duplicate_fragment() {
        let mut source = StateGraph::new();
        let fragment = example(&mut source);

        let mut target = StateGraph::new();
        let unrelated = target.add_state(false);
        let copy = target.duplicate_fragment(&source, fragment);
        let again = target.copy_fragment(copy);

        assert_ne!(copy.start, unrelated);
        assert_eq!(target.num_of_states(), 1 + 2 * source.num_of_states());

        for copied in [copy, again] {
            let mut graph = target.clone();
            graph.set_final(copied.end, true);
            let automaton = Automaton::new(graph, copied.start);
            assert!(accepts(&automaton, &codes("cabd")));
            assert!(!accepts(&automaton, &codes("ba")));
        }
    }
}
