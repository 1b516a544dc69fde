use crate::StateIndex;

/// Maps the states of one graph to the states of another. Every state can be
/// renamed at most once, and asking for a state that was never renamed is a
/// programming error.
pub struct StateRenamer {
    mapping: Vec<Option<StateIndex>>,
}

impl StateRenamer {
    /// Creates a renamer for a graph with the given number of states.
    pub fn new(num_of_states: usize) -> Self {
        Self {
            mapping: vec![None; num_of_states],
        }
    }

    /// Records that `old` is renamed to `new`.
    pub fn insert(&mut self, old: StateIndex, new: StateIndex) {
        let previous = self.mapping[*old].replace(new);
        assert!(
            previous.is_none(),
            "State {old} was already renamed to {previous:?}, can not rename it to {new}"
        );
    }

    /// Returns the new name of the given state, if it has one.
    pub fn try_get(&self, old: StateIndex) -> Option<StateIndex> {
        self.mapping[*old]
    }

    /// Returns the new name of the given state.
    pub fn get(&self, old: StateIndex) -> StateIndex {
        self.mapping[*old].unwrap_or_else(|| panic!("State {old} has not been renamed"))
    }
}
