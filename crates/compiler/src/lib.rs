//! Turns a list of named token definitions into a single minimal
//! deterministic automaton, from which the recognized token of every state
//! can be recovered.

#![forbid(unsafe_code)]

mod combine;
mod compiled_dfa;
mod dfa_compiler;
mod error;
mod token_definitions;

pub use combine::*;
pub use compiled_dfa::*;
pub use dfa_compiler::*;
pub use error::*;
pub use token_definitions::*;
