use std::fmt;

use tokn_utilities::TagIndex;

use crate::CodeSet;
use crate::EPSILON;

/// A unique type for the states.
pub struct StateTag;

/// The index of a state within a [`StateGraph`].
pub type StateIndex = TagIndex<usize, StateTag>;

/// An outgoing edge of a state. The source state is implicit, it is the state
/// that owns the edge.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub label: CodeSet,
    pub to: StateIndex,
}

impl Edge {
    /// Constructs a new edge.
    pub fn new(label: CodeSet, to: StateIndex) -> Self {
        Self { label, to }
    }

    /// Returns true iff this is an epsilon edge.
    pub fn is_epsilon(&self) -> bool {
        self.label.contains(EPSILON)
    }
}

/// A single state, with its accepting flag and outgoing edges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct State {
    is_final: bool,
    edges: Vec<Edge>,
}

/// An arena of states that are identified by dense indices.
///
/// Every construction step (partitioning, reversal, determinization,
/// normalization) produces a fresh graph instead of rewriting an existing
/// one, so a graph that has been handed out is never observed in a partially
/// transformed state. Looking up an index that does not belong to the graph is
/// a programming error and panics.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct StateGraph {
    states: Vec<State>,
}

impl StateGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph with room for the given number of states.
    pub fn with_capacity(num_of_states: usize) -> Self {
        Self {
            states: Vec::with_capacity(num_of_states),
        }
    }

    /// Adds a new state and returns its index.
    pub fn add_state(&mut self, is_final: bool) -> StateIndex {
        let index = StateIndex::new(self.states.len());
        self.states.push(State {
            is_final,
            edges: Vec::new(),
        });
        index
    }

    /// Adds an edge with the given label.
    pub fn add_edge(&mut self, from: StateIndex, label: CodeSet, to: StateIndex) {
        debug_assert!(*to < self.states.len(), "Edge target {to} does not exist");
        self.states[*from].edges.push(Edge::new(label, to));
    }

    /// Adds an epsilon edge.
    pub fn add_epsilon(&mut self, from: StateIndex, to: StateIndex) {
        self.add_edge(from, CodeSet::with_value(EPSILON), to);
    }

    /// Changes whether the given state is accepting.
    pub fn set_final(&mut self, state_index: StateIndex, is_final: bool) {
        self.states[*state_index].is_final = is_final;
    }

    /// Returns true iff the given state is accepting.
    pub fn is_final(&self, state_index: StateIndex) -> bool {
        self.states[*state_index].is_final
    }

    /// Returns the outgoing edges of the given state.
    pub fn outgoing_edges(&self, state_index: StateIndex) -> &[Edge] {
        &self.states[*state_index].edges
    }

    /// Returns every edge of the graph together with its source state.
    pub fn iter_edges(&self) -> impl Iterator<Item = (StateIndex, &Edge)> + '_ {
        self.iter_states()
            .flat_map(move |state_index| self.outgoing_edges(state_index).iter().map(move |edge| (state_index, edge)))
    }

    /// Iterate over all state indices in the graph.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        (0..self.num_of_states()).map(StateIndex::new)
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of edges.
    pub fn num_of_edges(&self) -> usize {
        self.states.iter().map(|state| state.edges.len()).sum()
    }
}

/// A state graph together with its start state.
#[derive(Clone, PartialEq, Eq)]
pub struct Automaton {
    graph: StateGraph,
    initial_state: StateIndex,
}

impl Automaton {
    /// Creates an automaton that starts in the given state of the graph.
    pub fn new(graph: StateGraph, initial_state: StateIndex) -> Self {
        assert!(
            *initial_state < graph.num_of_states(),
            "Initial state {initial_state} does not exist"
        );
        Self { graph, initial_state }
    }

    /// Returns the index of the initial state.
    pub fn initial_state_index(&self) -> StateIndex {
        self.initial_state
    }

    /// Returns the underlying state graph.
    pub fn graph(&self) -> &StateGraph {
        &self.graph
    }

    /// Returns true iff the given state is accepting.
    pub fn is_final(&self, state_index: StateIndex) -> bool {
        self.graph.is_final(state_index)
    }

    /// Returns the outgoing edges of the given state.
    pub fn outgoing_edges(&self, state_index: StateIndex) -> &[Edge] {
        self.graph.outgoing_edges(state_index)
    }

    /// Iterate over all state indices.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> + use<> {
        self.graph.iter_states()
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.graph.num_of_states()
    }

    /// Returns the number of edges.
    pub fn num_of_edges(&self) -> usize {
        self.graph.num_of_edges()
    }

    /// Returns the target of the first non epsilon edge of the given state
    /// whose label contains the code. For a deterministic automaton this is
    /// the unique successor.
    pub fn successor(&self, state_index: StateIndex, code: i32) -> Option<StateIndex> {
        self.outgoing_edges(state_index)
            .iter()
            .find(|edge| !edge.is_epsilon() && edge.label.contains(code))
            .map(|edge| edge.to)
    }
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.num_of_states())?;
        write!(f, "Number of edges: {}", self.num_of_edges())
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        writeln!(f, "Initial state: {}", self.initial_state)?;

        for state_index in self.iter_states() {
            let marker = if self.is_final(state_index) { "*" } else { "" };
            writeln!(f, "{state_index}{marker}")?;

            for edge in self.outgoing_edges(state_index) {
                writeln!(f, "    {state_index} --[{}]-> {}", edge.label, edge.to)?;
            }
        }

        Ok(())
    }
}
