//!
//! A crate containing the epsilon nondeterministic finite automaton model that
//! is the input of the subset construction.
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod automaton;
mod builder;
mod random_automaton;

pub use automaton::*;
pub use builder::*;
pub use random_automaton::*;
