//! Interval code sets, range partitions, and the construction of minimal
//! deterministic automata from nondeterministic ones.
//!
//! Automata are stored as arenas of states with dense indices, see
//! [`StateGraph`]. Every transformation produces a fresh automaton and leaves
//! its input untouched.

#![forbid(unsafe_code)]

mod code_set;
mod minimize;
mod nfa_fragment;
mod normalize;
mod partition_edges;
mod random_nfa;
mod range_partition;
mod reachability;
mod reverse;
mod state_graph;
mod state_renamer;
mod subset_construction;

pub use code_set::*;
pub use minimize::*;
pub use nfa_fragment::*;
pub use normalize::*;
pub use partition_edges::*;
pub use random_nfa::*;
pub use range_partition::*;
pub use reachability::*;
pub use reverse::*;
pub use state_graph::*;
pub use state_renamer::*;
pub use subset_construction::*;

#[cfg(test)]
pub mod test_utility;
