use crate::Automaton;
use crate::StateGraph;
use crate::StateRenamer;
use crate::reachable_states;

/// Constructs the reverse of an automaton, which accepts exactly the reversed
/// words of the given automaton.
///
/// Every reachable state gets a counterpart with its edges flipped. The old
/// initial state becomes the unique final state, and a new initial state has
/// an epsilon edge to every old final state.
pub fn reverse(automaton: &Automaton) -> Automaton {
    let reachable = reachable_states(automaton);

    let mut graph = StateGraph::with_capacity(reachable.len() + 1);
    let mut renamer = StateRenamer::new(automaton.num_of_states());
    for &state_index in &reachable {
        let is_final = state_index == automaton.initial_state_index();
        renamer.insert(state_index, graph.add_state(is_final));
    }

    for &state_index in &reachable {
        for edge in automaton.outgoing_edges(state_index) {
            graph.add_edge(renamer.get(edge.to), edge.label.clone(), renamer.get(state_index));
        }
    }

    let initial_state = graph.add_state(false);
    for &state_index in reachable.iter().filter(|&&state_index| automaton.is_final(state_index)) {
        graph.add_epsilon(initial_state, renamer.get(state_index));
    }

    Automaton::new(graph, initial_state)
}
