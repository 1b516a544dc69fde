use log::debug;
use tokn_automata::Automaton;
use tokn_automata::CODEMIN;
use tokn_automata::CodeSet;
use tokn_automata::EPSILON;
use tokn_automata::StateGraph;

use crate::MAX_TOKENS;
use crate::TokenDefinitions;
use crate::TokenIndex;

/// Returns the edge label that marks the acceptance of the given token. These
/// labels lie below epsilon, outside of the character codes.
pub fn token_id_to_edge_label(id: TokenIndex) -> i32 {
    assert!(*id < MAX_TOKENS, "Token id {id} can not be encoded as an edge label");
    EPSILON - 1 - *id as i32
}

/// Returns the token marked by the given edge label, or `None` when the label
/// is a character code or epsilon.
pub fn edge_label_to_token_id(label: i32) -> Option<TokenIndex> {
    if (CODEMIN..EPSILON).contains(&label) {
        Some(TokenIndex::new((EPSILON - 1 - label) as usize))
    } else {
        None
    }
}

/// Combines the fragments of all tokens into a single automaton.
///
/// Every token fragment is copied behind an epsilon edge from a new initial
/// state, and the end of every copy gets an edge labelled with the encoded
/// token id towards its own final state. A word followed by the label of a
/// token is accepted iff the word matches that token.
pub fn combine_token_nfas(definitions: &TokenDefinitions) -> Automaton {
    let mut graph = StateGraph::new();
    let initial_state = graph.add_state(false);

    for entry in definitions.entries() {
        let Some(id) = entry.id else {
            continue;
        };

        let fragment = graph.duplicate_fragment(definitions.graph(), entry.fragment);
        let accept = graph.add_state(true);
        graph.add_epsilon(initial_state, fragment.start);
        graph.add_edge(fragment.end, CodeSet::with_value(token_id_to_edge_label(id)), accept);
    }

    debug!(
        "Combined {} tokens into an automaton with {} states",
        definitions.num_of_tokens(),
        graph.num_of_states()
    );
    Automaton::new(graph, initial_state)
}
