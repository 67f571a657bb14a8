//!
//! A crate containing IO related functionality. This includes the reading of
//! automata in the line based transition list format, and the writing of the
//! resulting DFA and epsilon closures in the same notation.
//!

mod line_iterator;

pub mod io_enfa;
