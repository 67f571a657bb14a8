use std::fmt;

use rustc_hash::FxHashMap;

use enfa_automaton::Automaton;
use enfa_automaton::LabelIndex;

use crate::StateSet;

/// The index of a state in the DFA.
pub type DfaIndex = usize;

/// A state of the DFA, formed by a set of automaton states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DfaState {
    members: StateSet,
    initial: bool,
    accepting: bool,

    /// At most one transition for every label, in the order of the alphabet.
    transitions: Vec<(LabelIndex, DfaIndex)>,

    ordinal: Option<usize>,
}

impl DfaState {
    /// Returns the automaton states that form this DFA state.
    pub fn members(&self) -> &StateSet {
        &self.members
    }

    /// Returns true iff this state is the closure of an initial automaton state.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Returns true iff at least one member is a final automaton state.
    pub fn is_final(&self) -> bool {
        self.accepting
    }

    /// Returns the outgoing transitions.
    pub fn transitions(&self) -> &[(LabelIndex, DfaIndex)] {
        &self.transitions
    }

    /// Returns the number assigned by [Dfa::enumerate], if any.
    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }
}

/// A deterministic finite automaton resulting from the subset construction.
///
/// The states are stored in the order in which they were discovered. Note that
/// an automaton with several initial states yields a DFA with several initial
/// states, see [Dfa::initial_states].
#[derive(Default)]
pub struct Dfa {
    states: Vec<DfaState>,
    initial_states: Vec<DfaIndex>,

    /// Maps every set of automaton states to its DFA state.
    index: FxHashMap<StateSet, DfaIndex>,

    num_of_transitions: usize,
}

impl Dfa {
    /// Creates a DFA without any states.
    pub fn new() -> Dfa {
        Dfa::default()
    }

    /// Returns the index of the state that consists of exactly the given
    /// automaton states.
    pub fn find(&self, members: &StateSet) -> Option<DfaIndex> {
        self.index.get(members).copied()
    }

    /// Inserts a state for the given members unless an equal state exists.
    /// Returns the index of the state and whether it was inserted.
    pub(crate) fn insert(&mut self, automaton: &Automaton, members: StateSet, initial: bool) -> (DfaIndex, bool) {
        if let Some(index) = self.find(&members) {
            return (index, false);
        }

        let index = self.states.len();
        if initial {
            self.initial_states.push(index);
        }

        self.index.insert(members.clone(), index);
        self.states.push(DfaState {
            accepting: members.contains_final(automaton),
            members,
            initial,
            transitions: Vec::new(),
            ordinal: None,
        });

        (index, true)
    }

    /// Adds a transition, there can be at most one transition per label.
    pub(crate) fn add_transition(&mut self, from: DfaIndex, label: LabelIndex, to: DfaIndex) {
        let transitions = &mut self.states[from].transitions;
        debug_assert!(
            transitions.iter().all(|(other, _)| *other != label),
            "The state {from} already has a transition on {label}"
        );

        transitions.push((label, to));
        self.num_of_transitions += 1;
    }

    /// Assigns every state its index in discovery order as ordinal.
    pub fn enumerate(&mut self) {
        for (index, state) in self.states.iter_mut().enumerate() {
            state.ordinal = Some(index);
        }
    }

    /// Returns true iff [Dfa::enumerate] has been applied.
    pub fn is_enumerated(&self) -> bool {
        self.states.first().is_some_and(|state| state.ordinal.is_some())
    }

    /// Returns the target of the transition from the given state with the given label.
    pub fn successor(&self, state_index: DfaIndex, label: LabelIndex) -> Option<DfaIndex> {
        self.states[state_index]
            .transitions
            .iter()
            .find(|(other, _)| *other == label)
            .map(|(_, to)| *to)
    }

    /// Returns true iff the word, given as a sequence of symbol names of the
    /// automaton, leads from one of the initial states to a final state.
    pub fn accepts<'a>(&self, automaton: &Automaton, word: impl IntoIterator<Item = &'a str> + Clone) -> bool {
        self.initial_states.iter().any(|initial| {
            let mut current = *initial;
            for symbol in word.clone() {
                let next = automaton
                    .find_label(symbol)
                    .filter(|label| !automaton.is_epsilon(*label))
                    .and_then(|label| self.successor(current, label));

                match next {
                    Some(next) => current = next,
                    None => return false,
                }
            }

            self.states[current].accepting
        })
    }

    /// Returns the indices of the initial states.
    pub fn initial_states(&self) -> &[DfaIndex] {
        &self.initial_states
    }

    /// Returns the states in discovery order.
    pub fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Returns access to the given state.
    pub fn state(&self, index: DfaIndex) -> &DfaState {
        &self.states[index]
    }

    /// Iterate over all state indices of the DFA.
    pub fn iter_states(&self) -> impl Iterator<Item = DfaIndex> {
        0..self.states.len()
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> usize {
        self.states.len()
    }

    /// Returns the number of transitions.
    pub fn num_of_transitions(&self) -> usize {
        self.num_of_transitions
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of states: {}", self.states.len())?;
        writeln!(f, "Number of initial states: {}", self.initial_states.len())?;
        write!(f, "Number of transitions: {}", self.num_of_transitions)
    }
}

impl fmt::Debug for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;
        writeln!(f, "Initial states: {:?}", self.initial_states)?;

        for (index, state) in self.states.iter().enumerate() {
            writeln!(f, "{index} = {:?}", state.members)?;
            for (label, to) in &state.transitions {
                writeln!(f, "{index} --[{label}]-> {to}")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use enfa_automaton::AutomatonBuilder;

    use super::*;

    #[test]
    fn test_insert_deduplicates() {
        let mut builder = AutomatonBuilder::new();
        let a = builder.add_state("A");
        let b = builder.add_state("B");
        builder.set_final(b);
        let automaton = builder.finish();

        let mut dfa = Dfa::new();
        let (first, inserted) = dfa.insert(&automaton, StateSet::from_vec(vec![a, b]), true);
        assert!(inserted);

        let (second, inserted) = dfa.insert(&automaton, StateSet::from_vec(vec![b, a]), false);
        assert!(!inserted, "An equal set should not be inserted twice");
        assert_eq!(first, second);

        assert_eq!(dfa.num_of_states(), 1);
        assert!(dfa.state(first).is_final());
        assert!(dfa.state(first).is_initial());
        assert_eq!(dfa.find(&StateSet::from_vec(vec![a])), None);
    }

    #[test]
    fn test_enumerate() {
        let mut builder = AutomatonBuilder::new();
        let a = builder.add_state("A");
        let b = builder.add_state("B");
        let automaton = builder.finish();

        let mut dfa = Dfa::new();
        dfa.insert(&automaton, StateSet::from_vec(vec![b]), true);
        dfa.insert(&automaton, StateSet::from_vec(vec![a]), false);
        assert!(!dfa.is_enumerated());

        dfa.enumerate();
        assert!(dfa.is_enumerated());
        assert_eq!(dfa.state(0).ordinal(), Some(0));
        assert_eq!(dfa.state(1).ordinal(), Some(1));
    }
}
