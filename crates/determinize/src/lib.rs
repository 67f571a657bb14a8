//!
//! A crate implementing the subset construction, which converts an epsilon
//! nondeterministic finite automaton into an equivalent deterministic finite
//! automaton.
//!
//! The [ClosureEngine] computes epsilon closures and the move function, the
//! [determinize] function discovers all reachable sets of states and stores
//! them in a [Dfa].
//!
//! This crate does not use unsafe code.

#![forbid(unsafe_code)]

mod closure;
mod dfa;
mod state_set;
mod subset_construction;
mod trace;

pub use closure::*;
pub use dfa::*;
pub use state_set::*;
pub use subset_construction::*;
pub use trace::*;
