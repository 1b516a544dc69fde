//! Various collections implemented for the tokn automaton compiler.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod indexed_set;
mod vecset;

pub use indexed_set::*;
pub use vecset::*;
