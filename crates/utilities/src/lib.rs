//! Utility types and functions for the tokn automaton compiler.
//!
//! Forbid unsafe code in this crate.
#![forbid(unsafe_code)]

mod debug_trace;
mod error;
mod tagged_index;
mod test_logger;

pub use error::*;
pub use random_test::*;
pub use tagged_index::*;
pub use test_logger::*;
