use std::fmt;

use tokn_automata::Automaton;
use tokn_automata::CODEMIN;
use tokn_automata::EPSILON;
use tokn_automata::StateIndex;

use crate::TokenIndex;
use crate::edge_label_to_token_id;

/// The minimal automaton for a set of tokens.
///
/// After reading a word from the initial state, the tokens matching the word
/// are those whose encoded label leaves the current state, see
/// [`crate::combine_token_nfas`].
#[derive(Clone, PartialEq, Eq)]
pub struct CompiledDfa {
    dfa: Automaton,
    token_names: Vec<String>,
}

impl CompiledDfa {
    pub fn new(dfa: Automaton, token_names: Vec<String>) -> Self {
        Self { dfa, token_names }
    }

    /// Returns the underlying automaton, including the token label edges.
    pub fn automaton(&self) -> &Automaton {
        &self.dfa
    }

    /// Returns the names of the tokens, indexed by token id.
    pub fn token_names(&self) -> &[String] {
        &self.token_names
    }

    /// Returns the name of the given token.
    pub fn token_name(&self, id: TokenIndex) -> &str {
        &self.token_names[*id]
    }

    /// Returns the state reached by reading the text from the initial state,
    /// or `None` when no token starts with the text.
    pub fn walk(&self, text: &str) -> Option<StateIndex> {
        text.chars()
            .try_fold(self.dfa.initial_state_index(), |state_index, c| {
                self.dfa.successor(state_index, c as i32)
            })
    }

    /// Returns the tokens that match a word leading to the given state, in
    /// ascending order.
    pub fn accepted_tokens(&self, state_index: StateIndex) -> Vec<TokenIndex> {
        let mut result: Vec<TokenIndex> = self
            .dfa
            .outgoing_edges(state_index)
            .iter()
            .filter(|edge| self.dfa.is_final(edge.to))
            .flat_map(|edge| edge.label.ranges())
            .flat_map(|(lower, upper)| lower.max(CODEMIN)..upper.min(EPSILON))
            .filter_map(edge_label_to_token_id)
            .collect();

        result.sort_unstable();
        result.dedup();
        result
    }

    /// Returns the token that is recognized in the given state: the one with
    /// the smallest label on the edges towards the final state. Labels
    /// decrease with the token id, so among the accepted tokens the last
    /// defined one takes precedence.
    pub fn recognized_token(&self, state_index: StateIndex) -> Option<TokenIndex> {
        self.dfa
            .outgoing_edges(state_index)
            .iter()
            .filter(|edge| self.dfa.is_final(edge.to))
            .filter_map(|edge| (&edge.label).min())
            .min()
            .and_then(edge_label_to_token_id)
    }

    /// Returns the token recognized after reading the whole text.
    pub fn recognize(&self, text: &str) -> Option<TokenIndex> {
        self.walk(text)
            .and_then(|state_index| self.recognized_token(state_index))
    }
}

impl fmt::Debug for CompiledDfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, name) in self.token_names.iter().enumerate() {
            writeln!(f, "Token {id}: {name}")?;
        }

        write!(f, "{:?}", self.dfa)
    }
}
