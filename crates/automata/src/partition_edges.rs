use log::debug;

use crate::Automaton;
use crate::RangePartition;
use crate::StateGraph;
use crate::StateRenamer;
use crate::reachable_states;

/// Replaces the labels of the reachable edges by the pieces of a partition of
/// all labels. Afterwards any two labels are either equal or disjoint, and the
/// epsilon edges carry exactly the epsilon label.
///
/// Unreachable states are dropped, the reachable states keep their relative
/// order and finality.
pub fn partition_edges(automaton: &Automaton) -> Automaton {
    let reachable = reachable_states(automaton);

    let mut partition = RangePartition::new();
    for &state_index in &reachable {
        for edge in automaton.outgoing_edges(state_index) {
            partition.add_set(edge.label.clone());
        }
    }
    partition.prepare();

    let mut sorted = reachable;
    sorted.sort_unstable();

    let mut graph = StateGraph::with_capacity(sorted.len());
    let mut renamer = StateRenamer::new(automaton.num_of_states());
    for &state_index in &sorted {
        renamer.insert(state_index, graph.add_state(automaton.is_final(state_index)));
    }

    for &state_index in &sorted {
        let from = renamer.get(state_index);
        for edge in automaton.outgoing_edges(state_index) {
            let to = renamer.get(edge.to);
            for piece in partition.apply(&edge.label) {
                graph.add_edge(from, piece, to);
            }
        }
    }

    debug!(
        "Partitioned {} edges into {} edges using {} leaves",
        automaton.num_of_edges(),
        graph.num_of_edges(),
        partition.num_of_leaves()
    );

    Automaton::new(graph, renamer.get(automaton.initial_state_index()))
}
