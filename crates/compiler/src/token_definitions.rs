use std::sync::LazyLock;

use log::debug;
use regex::Regex;
use rustc_hash::FxHashMap;
use tokn_automata::NfaFragment;
use tokn_automata::StateGraph;
use tokn_utilities::TagIndex;

use crate::DefinitionError;

/// A unique type for the tokens.
pub struct TokenTag;

/// The id of a token, tokens are numbered in the order of their definition.
pub type TokenIndex = TagIndex<usize, TokenTag>;

/// The number of token ids that can be encoded as edge labels.
pub const MAX_TOKENS: usize = 9999;

static TOKEN_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[_A-Za-z][_A-Za-z0-9]*$").expect("Regex compilation should not fail"));

/// A named pattern. Names starting with an underscore are anonymous, they do
/// not become tokens but can be referenced by later definitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenEntry {
    pub name: String,
    pub fragment: NfaFragment,
    pub id: Option<TokenIndex>,
}

impl TokenEntry {
    /// Returns true iff the entry only serves as a named sub-pattern.
    pub fn is_anonymous(&self) -> bool {
        self.id.is_none()
    }
}

/// The validated definitions of a token script, together with the arena in
/// which their fragments are built.
#[derive(Clone, Default)]
pub struct TokenDefinitions {
    graph: StateGraph,
    entries: Vec<TokenEntry>,
    names: FxHashMap<String, usize>,
    num_of_tokens: usize,
}

impl TokenDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the arena in which the fragments are built.
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Returns the arena in which new fragments should be built before they
    /// are defined.
    pub fn graph_mut(&mut self) -> &mut StateGraph {
        &mut self.graph
    }

    /// Adds a definition with the given name, built in [`Self::graph_mut`].
    /// The line number and text identify the definition in error messages.
    ///
    /// Returns the token id, or `None` for an anonymous definition.
    pub fn define(
        &mut self,
        name: &str,
        fragment: NfaFragment,
        line: usize,
        text: &str,
    ) -> Result<Option<TokenIndex>, DefinitionError> {
        if !TOKEN_NAME.is_match(name) {
            return Err(DefinitionError::InvalidTokenName {
                name: name.to_string(),
                line,
                text: text.to_string(),
            });
        }

        if self.names.contains_key(name) {
            return Err(DefinitionError::DuplicateTokenName {
                name: name.to_string(),
                line,
                text: text.to_string(),
            });
        }

        let id = if name.starts_with('_') {
            None
        } else {
            // Tokenizing would loop forever on a token that consumes nothing.
            if fragment.accepts_zero_characters(&self.graph) {
                return Err(DefinitionError::AcceptsEmptyString {
                    name: name.to_string(),
                    line,
                    text: text.to_string(),
                });
            }

            if self.num_of_tokens >= MAX_TOKENS {
                return Err(DefinitionError::TooManyTokens {
                    line,
                    text: text.to_string(),
                });
            }

            self.num_of_tokens += 1;
            Some(TokenIndex::new(self.num_of_tokens - 1))
        };

        debug!("Line {line}: defined '{name}' with id {id:?}");
        self.names.insert(name.to_string(), self.entries.len());
        self.entries.push(TokenEntry {
            name: name.to_string(),
            fragment,
            id,
        });

        Ok(id)
    }

    /// Returns a fresh copy of the fragment of an earlier definition, so that
    /// it can be embedded in a new pattern.
    pub fn reference(&mut self, name: &str, line: usize, text: &str) -> Result<NfaFragment, DefinitionError> {
        let Some(&index) = self.names.get(name) else {
            return Err(DefinitionError::UnresolvedReference {
                name: name.to_string(),
                line,
                text: text.to_string(),
            });
        };

        let fragment = self.entries[index].fragment;
        Ok(self.graph.copy_fragment(fragment))
    }

    /// Returns all definitions in the order in which they were defined.
    pub fn entries(&self) -> &[TokenEntry] {
        &self.entries
    }

    /// Returns the definitions that are tokens, ordered by id.
    pub fn tokens(&self) -> impl Iterator<Item = &TokenEntry> + '_ {
        self.entries.iter().filter(|entry| !entry.is_anonymous())
    }

    /// Returns the number of tokens, excluding anonymous definitions.
    pub fn num_of_tokens(&self) -> usize {
        self.num_of_tokens
    }
}
