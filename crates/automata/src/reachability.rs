use bitvec::bitvec;
use bitvec::order::Lsb0;

use crate::Automaton;
use crate::StateGraph;
use crate::StateIndex;

/// Returns the states reachable from the initial state, in depth first
/// discovery order starting with the initial state itself.
pub fn reachable_states(automaton: &Automaton) -> Vec<StateIndex> {
    reachable_from(automaton.graph(), automaton.initial_state_index())
}

/// Returns the states of the graph that are reachable from the given state,
/// in depth first discovery order starting with the given state.
pub fn reachable_from(graph: &StateGraph, start: StateIndex) -> Vec<StateIndex> {
    let mut visited = bitvec![usize, Lsb0; 0; graph.num_of_states()];
    let mut result = Vec::new();

    let mut stack = vec![start];
    visited.set(*start, true);

    while let Some(state_index) = stack.pop() {
        result.push(state_index);

        for edge in graph.outgoing_edges(state_index) {
            if !visited[*edge.to] {
                visited.set(*edge.to, true);
                stack.push(edge.to);
            }
        }
    }

    result
}
