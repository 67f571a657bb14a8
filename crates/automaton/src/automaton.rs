use std::fmt;

/// The index type for a label.
pub type LabelIndex = usize;

/// The index for a state.
pub type StateIndex = usize;

/// The label index reserved for epsilon transitions.
pub const EPSILON: LabelIndex = 0;

/// The name under which the epsilon label is stored.
pub const EPSILON_NAME: &str = "?";

/// Represents an epsilon nondeterministic finite automaton consisting of named
/// states with directed labelled edges.
///
/// States and labels are referred to by their index. Label [EPSILON] is the
/// epsilon label, every other label is part of the alphabet.
#[derive(PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
    transitions: Vec<(LabelIndex, StateIndex)>,

    labels: Vec<String>,
}

impl Automaton {
    /// Creates an automaton from the given states, labels and per state
    /// outgoing transitions. Use [crate::AutomatonBuilder] to construct one
    /// incrementally.
    ///
    /// The first label must be the epsilon label.
    pub(crate) fn new(
        names: Vec<String>,
        flags: Vec<(bool, bool)>,
        outgoing: Vec<Vec<(LabelIndex, StateIndex)>>,
        labels: Vec<String>,
    ) -> Automaton {
        debug_assert_eq!(names.len(), flags.len(), "Every state should have flags");
        debug_assert_eq!(names.len(), outgoing.len(), "Every state should have outgoing transitions");
        debug_assert!(
            labels.first().is_some_and(|label| label == EPSILON_NAME),
            "The first label should be the epsilon label"
        );

        let num_of_transitions = outgoing.iter().map(Vec::len).sum();

        // Place the transitions of every state consecutively.
        let mut states = Vec::with_capacity(names.len());
        let mut transitions = Vec::with_capacity(num_of_transitions);
        for ((name, (initial, accepting)), outgoing) in names.into_iter().zip(flags).zip(outgoing) {
            let outgoing_start = transitions.len();
            transitions.extend(outgoing);

            states.push(State {
                name,
                initial,
                accepting,
                outgoing_start,
                outgoing_end: transitions.len(),
            });
        }

        Automaton {
            states,
            transitions,
            labels,
        }
    }

    /// Returns the set of outgoing transitions for the given state, in the
    /// order in which they were added.
    pub fn outgoing_transitions(&self, state_index: StateIndex) -> impl Iterator<Item = (LabelIndex, StateIndex)> + '_ {
        let state = &self.states[state_index];
        self.transitions[state.outgoing_start..state.outgoing_end].iter().copied()
    }

    /// Iterate over all state_index in the automaton.
    pub fn iter_states(&self) -> impl Iterator<Item = StateIndex> {
        0..self.states.len()
    }

    /// Returns the indices of all states flagged initial, in increasing order.
    pub fn initial_states(&self) -> impl Iterator<Item = StateIndex> + '_ {
        self.iter_states().filter(|state_index| self.states[*state_index].initial)
    }

    /// Returns true iff the given state is an initial state.
    pub fn is_initial(&self, state_index: StateIndex) -> bool {
        self.states[state_index].initial
    }

    /// Returns true iff the given state is a final state.
    pub fn is_final(&self, state_index: StateIndex) -> bool {
        self.states[state_index].accepting
    }

    /// Returns the name of the given state.
    pub fn state_name(&self, state_index: StateIndex) -> &str {
        &self.states[state_index].name
    }

    /// Returns the name of the given label.
    pub fn label_name(&self, label_index: LabelIndex) -> &str {
        &self.labels[label_index]
    }

    /// Returns the index of the label with the given name.
    pub fn find_label(&self, name: &str) -> Option<LabelIndex> {
        self.labels.iter().position(|label| label == name)
    }

    /// Returns the alphabet, i.e., all non-epsilon labels in the order in which
    /// they were first seen.
    pub fn alphabet(&self) -> impl Iterator<Item = LabelIndex> {
        1..self.labels.len()
    }

    /// Returns true iff the given label index is the epsilon label.
    pub fn is_epsilon(&self, label_index: LabelIndex) -> bool {
        label_index == EPSILON
    }

    /// Returns the number of states.
    pub fn num_of_states(&self) -> StateIndex {
        self.states.len()
    }

    /// Returns the number of labels, including the epsilon label.
    pub fn num_of_labels(&self) -> LabelIndex {
        self.labels.len()
    }

    /// Returns the number of transitions.
    pub fn num_of_transitions(&self) -> usize {
        self.transitions.len()
    }
}

/// A single state in the automaton, its outgoing transitions are stored in the
/// range `outgoing_start..outgoing_end` of the shared transition vector.
#[derive(Clone, Default, PartialEq, Eq)]
struct State {
    name: String,
    initial: bool,
    accepting: bool,

    outgoing_start: usize,
    outgoing_end: usize,
}

impl fmt::Display for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print some information about the automaton.
        writeln!(f, "Number of states: {}", self.states.len())?;
        writeln!(f, "Number of symbols: {}", self.labels.len() - 1)?;
        write!(f, "Number of transitions: {}", self.transitions.len())
    }
}

impl fmt::Debug for Automaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self)?;

        for state_index in self.iter_states() {
            let name = self.state_name(state_index);
            if self.is_initial(state_index) {
                writeln!(f, "{name} is initial")?;
            }
            if self.is_final(state_index) {
                writeln!(f, "{name} is final")?;
            }

            for (label, to) in self.outgoing_transitions(state_index) {
                let label_name = &self.labels[label];
                let to_name = self.state_name(to);

                writeln!(f, "{name} --[{label_name}]-> {to_name}")?;
            }
        }

        Ok(())
    }
}
