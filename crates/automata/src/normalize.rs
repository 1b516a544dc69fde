use std::collections::BTreeMap;
use std::collections::VecDeque;

use crate::Automaton;
use crate::CodeSet;
use crate::Edge;
use crate::StateGraph;
use crate::StateIndex;
use crate::StateRenamer;

/// Returns an automaton with the same language in a canonical form.
///
/// Edges with the same source and destination are merged into a single edge
/// whose label is the union of their labels, and empty labels are dropped.
/// States are then renumbered in breadth first order from the initial state,
/// exploring the outgoing edges of a state in the order of their labels, and
/// the edges of every state are sorted by their destination. Unreachable
/// states are removed.
///
/// Two isomorphic deterministic automata have identical normal forms, and
/// normalizing a normal form does not change it.
pub fn normalize(automaton: &Automaton) -> Automaton {
    let mut renamer = StateRenamer::new(automaton.num_of_states());
    let mut order: Vec<(StateIndex, Vec<Edge>)> = Vec::new();

    let mut queue = VecDeque::from([automaton.initial_state_index()]);
    renamer.insert(automaton.initial_state_index(), StateIndex::new(0));

    while let Some(state_index) = queue.pop_front() {
        let edges = merged_edges(automaton, state_index);
        for edge in &edges {
            if renamer.try_get(edge.to).is_none() {
                renamer.insert(edge.to, StateIndex::new(order.len() + 1 + queue.len()));
                queue.push_back(edge.to);
            }
        }

        order.push((state_index, edges));
    }

    let mut graph = StateGraph::with_capacity(order.len());
    for (state_index, _) in &order {
        graph.add_state(automaton.is_final(*state_index));
    }

    for (state_index, edges) in order {
        let from = renamer.get(state_index);

        let mut renamed: Vec<Edge> = edges
            .into_iter()
            .map(|edge| Edge::new(edge.label, renamer.get(edge.to)))
            .collect();
        renamed.sort_unstable_by(|a, b| a.to.cmp(&b.to).then_with(|| a.label.cmp(&b.label)));

        for edge in renamed {
            graph.add_edge(from, edge.label, edge.to);
        }
    }

    Automaton::new(graph, StateIndex::new(0))
}

/// Returns the outgoing edges of a state with the labels of edges towards the
/// same destination merged, ordered by label.
fn merged_edges(automaton: &Automaton, state_index: StateIndex) -> Vec<Edge> {
    let mut labels: BTreeMap<StateIndex, CodeSet> = BTreeMap::new();
    for edge in automaton.outgoing_edges(state_index) {
        labels.entry(edge.to).or_default().add_set(&edge.label);
    }

    let mut edges: Vec<Edge> = labels
        .into_iter()
        .filter(|(_, label)| !label.is_empty())
        .map(|(to, label)| Edge::new(label, to))
        .collect();
    edges.sort_unstable();
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_normalize_merges_and_renumbers() {
        let mut graph = StateGraph::new();
        let unreachable = graph.add_state(false);
        let s1 = graph.add_state(true);
        let s2 = graph.add_state(false);
        graph.add_edge(s2, CodeSet::with_range(20, 30), s1);
        graph.add_edge(s2, CodeSet::with_range(0, 10), s1);
        graph.add_edge(s2, CodeSet::new(), unreachable);
        graph.add_edge(s1, CodeSet::with_value(5), s2);

        let result = normalize(&Automaton::new(graph, s2));

        let mut expected = StateGraph::new();
        let t0 = expected.add_state(false);
        let t1 = expected.add_state(true);
        expected.add_edge(t0, CodeSet::from_elements(vec![0, 10, 20, 30]), t1);
        expected.add_edge(t1, CodeSet::with_value(5), t0);

        assert_eq!(result, Automaton::new(expected, t0));
        assert_eq!(normalize(&result), result);
    }

    #[test]
    fn test_normalize_isomorphic() {
        let build = |order: [usize; 3]| {
            let mut graph = StateGraph::new();
            let states: Vec<StateIndex> = (0..3).map(|i| graph.add_state(i == 2)).collect();
            let [a, b, c] = order.map(|i| states[i]);
            graph.add_edge(a, CodeSet::with_value('x' as i32), b);
            graph.add_edge(a, CodeSet::with_value('y' as i32), c);
            graph.add_edge(b, CodeSet::with_value('z' as i32), c);
            normalize(&Automaton::new(graph, a))
        };

        assert_eq!(build([0, 1, 2]), build([1, 0, 2]));
    }
}
