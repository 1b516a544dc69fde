use std::time::Instant;

use log::debug;
use log::info;
use log::trace;

use crate::Automaton;
use crate::is_deterministic;
use crate::normalize;
use crate::partition_edges;
use crate::reverse;
use crate::subset_construction;

/// Returns the minimal deterministic automaton accepting the same language,
/// in normal form.
///
/// Uses Brzozowski's algorithm: determinizing the reverse of the reverse of a
/// determinized automaton yields a minimal automaton. Since the language of
/// every code inside a single partition piece is identical, the pieces behave
/// as the symbols of the alphabet.
pub fn minimize(automaton: &Automaton) -> Automaton {
    let start = Instant::now();

    let mut result = partition_edges(automaton);
    for _ in 0..2 {
        let reversed = reverse(&result);
        trace!("Reversed automaton: {reversed:?}");

        result = subset_construction(&reversed);
        trace!("Determinized automaton: {result:?}");
    }

    let result = normalize(&result);
    debug!("Time minimize: {:.3}s", start.elapsed().as_secs_f64());
    result
}

/// A hook that may inspect or modify the minimized automaton during the
/// construction, for example to remove parts that should never be accepted.
pub trait DfaFilter {
    /// Returns the modified automaton, or `None` when nothing was changed.
    fn apply(&mut self, dfa: &Automaton) -> Option<Automaton>;
}

/// The filter that keeps the automaton as it is.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeepAll;

impl DfaFilter for KeepAll {
    fn apply(&mut self, _dfa: &Automaton) -> Option<Automaton> {
        None
    }
}

/// Converts nondeterministic automata into minimal deterministic ones.
pub struct NfaToDfa {
    filter: Box<dyn DfaFilter>,
}

impl NfaToDfa {
    /// Creates a converter that does not filter.
    pub fn new() -> Self {
        Self::with_filter(Box::new(KeepAll))
    }

    /// Creates a converter that applies the given filter to the minimized
    /// automaton. When the filter changes the automaton it is minimized
    /// again.
    pub fn with_filter(filter: Box<dyn DfaFilter>) -> Self {
        Self { filter }
    }

    /// Returns the minimal deterministic automaton for the given automaton,
    /// which is left untouched.
    pub fn convert(&mut self, nfa: &Automaton) -> Automaton {
        info!(
            "Converting an automaton with {} states and {} edges",
            nfa.num_of_states(),
            nfa.num_of_edges()
        );
        let start = Instant::now();

        let mut dfa = minimize(nfa);
        if let Some(filtered) = self.filter.apply(&dfa) {
            debug!("The filter modified the automaton, minimizing again");
            dfa = minimize(&filtered);
        }

        debug_assert!(is_deterministic(&dfa), "Result must be deterministic: {dfa:?}");
        info!(
            "Minimal deterministic automaton has {} states and {} edges",
            dfa.num_of_states(),
            dfa.num_of_edges()
        );
        debug!("Time nfa_to_dfa: {:.3}s", start.elapsed().as_secs_f64());

        dfa
    }
}

impl Default for NfaToDfa {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the minimal deterministic automaton for the given automaton.
pub fn nfa_to_dfa(nfa: &Automaton) -> Automaton {
    NfaToDfa::new().convert(nfa)
}
