use rand::Rng;

use crate::Automaton;
use crate::CodeSet;
use crate::StateGraph;
use crate::StateIndex;

/// Generates a random automaton over the codes `[0, num_of_codes)` with the
/// given number of states and at most `outdegree` outgoing edges per state.
/// Roughly one in five edges is an epsilon edge, and the initial state is the
/// first state.
pub fn random_nfa(rng: &mut impl Rng, num_of_states: usize, num_of_codes: i32, outdegree: usize) -> Automaton {
    assert!(num_of_states > 0, "An automaton needs at least one state");
    assert!(num_of_codes > 0, "The alphabet can not be empty");

    let mut graph = StateGraph::with_capacity(num_of_states);
    for _ in 0..num_of_states {
        graph.add_state(rng.random_bool(0.3));
    }

    for from in graph.iter_states() {
        for _ in 0..rng.random_range(0..=outdegree) {
            let to = StateIndex::new(rng.random_range(0..num_of_states));

            if rng.random_bool(0.2) {
                graph.add_epsilon(from, to);
            } else {
                let lower = rng.random_range(0..num_of_codes);
                let upper = rng.random_range(lower + 1..=num_of_codes);
                graph.add_edge(from, CodeSet::with_range(lower, upper), to);
            }
        }
    }

    Automaton::new(graph, StateIndex::new(0))
}
