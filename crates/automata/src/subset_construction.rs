use std::collections::BTreeMap;
use std::time::Instant;

use log::debug;
use rustc_hash::FxHashSet;
use tokn_collections::IndexedSet;
use tokn_collections::VecSet;
use tokn_utilities::debug_trace;

use crate::Automaton;
use crate::CodeSet;
use crate::StateGraph;
use crate::StateIndex;
use crate::reachable_states;

/// Returns the set of states reachable from the given states by following
/// zero or more epsilon edges.
pub fn epsilon_closure(graph: &StateGraph, states: impl IntoIterator<Item = StateIndex>) -> VecSet<StateIndex> {
    let mut visited = FxHashSet::default();
    let mut stack = Vec::new();
    for state_index in states {
        if visited.insert(state_index) {
            stack.push(state_index);
        }
    }

    while let Some(state_index) = stack.pop() {
        for edge in graph.outgoing_edges(state_index).iter().filter(|edge| edge.is_epsilon()) {
            if visited.insert(edge.to) {
                stack.push(edge.to);
            }
        }
    }

    visited.into_iter().collect()
}

/// Constructs a deterministic automaton that accepts the same language, every
/// state of the result corresponds to the epsilon closure of a set of states
/// of the input.
///
/// The labels of the input must be partitioned, i.e. any two labels are equal
/// or disjoint, see [`crate::partition_edges`]. States of the result are
/// numbered in the order in which they are discovered, processing the states
/// in index order and their moves in label order, so the result only depends
/// on the input.
pub fn subset_construction(nfa: &Automaton) -> Automaton {
    let start = Instant::now();

    let mut subsets: IndexedSet<VecSet<StateIndex>> = IndexedSet::new();
    let mut graph = StateGraph::new();

    let initial = epsilon_closure(nfa.graph(), [nfa.initial_state_index()]);
    graph.add_state(contains_final(nfa, &initial));
    subsets.insert(initial);

    let mut current = 0;
    while current < subsets.len() {
        let from = StateIndex::new(current);

        // Group the targets by label, the labels are equal or disjoint.
        let mut moves: BTreeMap<&CodeSet, Vec<StateIndex>> = BTreeMap::new();
        for &state_index in &subsets[current] {
            for edge in nfa.outgoing_edges(state_index).iter().filter(|edge| !edge.is_epsilon()) {
                moves.entry(&edge.label).or_default().push(edge.to);
            }
        }

        for (label, targets) in moves {
            let closure = epsilon_closure(nfa.graph(), targets);
            let is_final = contains_final(nfa, &closure);

            let (index, inserted) = subsets.insert(closure);
            if inserted {
                let state_index = graph.add_state(is_final);
                debug_assert_eq!(*state_index, index, "Subsets and states must be numbered identically");
                debug_trace!("New state {state_index} for subset {:?}", subsets[index]);
            }

            graph.add_edge(from, label.clone(), StateIndex::new(index));
        }

        current += 1;
    }

    debug!(
        "Subset construction: {} states to {} states",
        nfa.num_of_states(),
        graph.num_of_states()
    );
    debug!("Time subset_construction: {:.3}s", start.elapsed().as_secs_f64());
    Automaton::new(graph, StateIndex::new(0))
}

/// Returns true iff no reachable state has an epsilon edge, and the labels of
/// the outgoing edges of every reachable state are pairwise disjoint.
pub fn is_deterministic(automaton: &Automaton) -> bool {
    reachable_states(automaton).into_iter().all(|state_index| {
        let edges = automaton.outgoing_edges(state_index);
        if edges.iter().any(|edge| edge.is_epsilon()) {
            return false;
        }

        let mut ranges: Vec<(i32, i32)> = edges.iter().flat_map(|edge| edge.label.ranges()).collect();
        ranges.sort_unstable();
        ranges.windows(2).all(|pair| pair[0].1 <= pair[1].0)
    })
}

fn contains_final(nfa: &Automaton, states: &VecSet<StateIndex>) -> bool {
    states.iter().any(|&state_index| nfa.is_final(state_index))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use tokn_utilities::random_test;

    use crate::partition_edges;
    use crate::random_nfa;
    use crate::test_utility::accepts;
    use crate::test_utility::all_words;
    use crate::test_utility::codes;

    #[test]
    fn test_epsilon_closure() {
        let mut graph = StateGraph::new();
        let s0 = graph.add_state(false);
        let s1 = graph.add_state(false);
        let s2 = graph.add_state(false);
        let s3 = graph.add_state(false);
        graph.add_epsilon(s0, s1);
        graph.add_epsilon(s1, s2);
        graph.add_epsilon(s2, s0);
        graph.add_edge(s1, CodeSet::with_value(5), s3);

        let closure = epsilon_closure(&graph, [s0]);
        assert_eq!(closure.iter().copied().collect::<Vec<_>>(), vec![s0, s1, s2]);
        assert_eq!(epsilon_closure(&graph, [s3]).len(), 1);
    }

    #[test]
    fn test_subset_construction_literal_choice() {
        // Accepts "ab" and "ac", which share a prefix.
        let mut graph = StateGraph::new();
        let ab = graph.literal("ab");
        let ac = graph.literal("ac");
        let choice = graph.alternate(&[ab, ac]);
        graph.set_final(choice.end, true);

        let dfa = subset_construction(&partition_edges(&Automaton::new(graph, choice.start)));
        assert!(is_deterministic(&dfa));
        assert_eq!(dfa.num_of_states(), 4);
        assert!(accepts(&dfa, &codes("ab")));
        assert!(accepts(&dfa, &codes("ac")));
        assert!(!accepts(&dfa, &codes("a")));
    }

    #[test]
    fn test_is_deterministic_detects_overlap() {
        let mut graph = StateGraph::new();
        let s0 = graph.add_state(false);
        let s1 = graph.add_state(true);
        graph.add_edge(s0, CodeSet::with_range(0, 10), s1);
        graph.add_edge(s0, CodeSet::with_range(9, 12), s0);
        assert!(!is_deterministic(&Automaton::new(graph.clone(), s0)));

        let mut graph = StateGraph::new();
        let s0 = graph.add_state(false);
        let s1 = graph.add_state(true);
        graph.add_epsilon(s0, s1);
        assert!(!is_deterministic(&Automaton::new(graph, s0)));
    }

    #[test]
    fn test_random_subset_construction() {
        random_test(100, |rng| {
            let nfa = random_nfa(rng, 10, 3, 3);
            let dfa = subset_construction(&partition_edges(&nfa));

            assert!(is_deterministic(&dfa), "Result is not deterministic: {dfa:?}");
            for word in all_words(3, 5) {
                assert_eq!(accepts(&nfa, &word), accepts(&dfa, &word), "Mismatch on {word:?}");
            }
        });
    }
}
