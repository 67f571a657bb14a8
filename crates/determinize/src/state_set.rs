use std::fmt;

use enfa_automaton::Automaton;
use enfa_automaton::StateIndex;

/// A set of automaton states, which forms a single state of the DFA.
///
/// The members are kept sorted and free of duplicates, so two sets are equal
/// and hash the same iff they contain the same states, regardless of the order
/// in which they were inserted. We use sorted vectors to avoid the overhead of
/// hash sets that might have unused values.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateSet(Vec<StateIndex>);

impl StateSet {
    /// Creates the empty set.
    pub fn new() -> StateSet {
        StateSet(Vec::new())
    }

    /// Creates a set from the given states, duplicates are removed.
    pub fn from_vec(mut states: Vec<StateIndex>) -> StateSet {
        states.sort_unstable();
        states.dedup();
        StateSet(states)
    }

    /// Returns true iff the given state is a member of this set.
    pub fn contains(&self, state_index: StateIndex) -> bool {
        self.0.binary_search(&state_index).is_ok()
    }

    /// Returns true iff every member of self is a member of other.
    pub fn is_subset_of(&self, other: &StateSet) -> bool {
        self.len() <= other.len() && self.iter().all(|state_index| other.contains(state_index))
    }

    /// Iterates over the members in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[StateIndex] {
        &self.0
    }

    /// Returns true iff at least one member is a final state of the automaton.
    pub fn contains_final(&self, automaton: &Automaton) -> bool {
        self.iter().any(|state_index| automaton.is_final(state_index))
    }

    /// Returns a value that displays this set using the state names of the
    /// automaton, for example `{A B}`.
    pub fn display<'a>(&'a self, automaton: &'a Automaton) -> StateSetDisplay<'a> {
        StateSetDisplay { set: self, automaton }
    }
}

impl FromIterator<StateIndex> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateIndex>>(iter: T) -> Self {
        StateSet::from_vec(iter.into_iter().collect())
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

/// Displays a [StateSet] with the names of its members.
pub struct StateSetDisplay<'a> {
    set: &'a StateSet,
    automaton: &'a Automaton,
}

impl fmt::Display for StateSetDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;

        let mut first = true;
        for state_index in self.set.iter() {
            if !first {
                write!(f, " ")?;
            }

            write!(f, "{}", self.automaton.state_name(state_index))?;
            first = false;
        }

        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_set_equality() {
        let left = StateSet::from_vec(vec![3, 1, 2, 1]);
        let right: StateSet = [2, 3, 1].into_iter().collect();

        assert_eq!(left, right, "Insertion order and duplicates should not matter");
        assert_eq!(left.as_slice(), &[1, 2, 3]);
        assert_ne!(left, StateSet::from_vec(vec![1, 2]));

        assert!(StateSet::from_vec(vec![1, 3]).is_subset_of(&left));
        assert!(!StateSet::from_vec(vec![0, 1]).is_subset_of(&left));
        assert!(StateSet::new().is_subset_of(&left));
    }
}
