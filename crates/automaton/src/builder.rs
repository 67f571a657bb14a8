use log::trace;
use rustc_hash::FxHashMap;

use crate::Automaton;
use crate::LabelIndex;
use crate::StateIndex;
use crate::EPSILON;
use crate::EPSILON_NAME;

/// Incrementally constructs an [Automaton].
///
/// States are identified by their name when they are added, and by the
/// returned [StateIndex] afterwards. Symbols are interned in first-seen order,
/// which determines the order of the alphabet.
pub struct AutomatonBuilder {
    names: Vec<String>,
    flags: Vec<(bool, bool)>,
    outgoing: Vec<Vec<(LabelIndex, StateIndex)>>,

    labels: Vec<String>,
    labels_index: FxHashMap<String, LabelIndex>,
    states_index: FxHashMap<String, StateIndex>,
}

impl AutomatonBuilder {
    pub fn new() -> AutomatonBuilder {
        AutomatonBuilder {
            names: Vec::new(),
            flags: Vec::new(),
            outgoing: Vec::new(),
            labels: vec![EPSILON_NAME.to_string()],
            labels_index: FxHashMap::default(),
            states_index: FxHashMap::default(),
        }
    }

    /// Returns the index of the state with the given name, adding a new state
    /// when it does not exist yet.
    pub fn add_state(&mut self, name: &str) -> StateIndex {
        if let Some(index) = self.states_index.get(name) {
            return *index;
        }

        let index = self.names.len();
        self.names.push(name.to_string());
        self.flags.push((false, false));
        self.outgoing.push(Vec::new());
        self.states_index.insert(name.to_string(), index);

        trace!("Added state {name} with index {index}");
        index
    }

    /// Marks the given state as initial.
    pub fn set_initial(&mut self, state_index: StateIndex) {
        self.flags[state_index].0 = true;
    }

    /// Marks the given state as final.
    pub fn set_final(&mut self, state_index: StateIndex) {
        self.flags[state_index].1 = true;
    }

    /// Returns the label index of the given symbol, where `None` and the
    /// symbol [EPSILON_NAME] are epsilon.
    pub fn add_label(&mut self, symbol: Option<&str>) -> LabelIndex {
        let Some(symbol) = symbol.filter(|symbol| *symbol != EPSILON_NAME) else {
            return EPSILON;
        };

        if let Some(index) = self.labels_index.get(symbol) {
            return *index;
        }

        let index = self.labels.len();
        self.labels.push(symbol.to_string());
        self.labels_index.insert(symbol.to_string(), index);
        index
    }

    /// Adds a transition from `from` to `to`, where a `symbol` of `None` or
    /// [EPSILON_NAME] is an epsilon transition. A transition that already exists is ignored.
    pub fn add_transition(&mut self, from: StateIndex, symbol: Option<&str>, to: StateIndex) {
        let label = self.add_label(symbol);
        assert!(to < self.names.len(), "The target state {to} does not exist");

        let outgoing = &mut self.outgoing[from];
        if outgoing.contains(&(label, to)) {
            trace!("Ignored duplicate transition {from} --[{label}]-> {to}");
            return;
        }

        outgoing.push((label, to));
    }

    /// Returns the number of states added so far.
    pub fn num_of_states(&self) -> usize {
        self.names.len()
    }

    /// Finishes the construction.
    pub fn finish(self) -> Automaton {
        Automaton::new(self.names, self.flags, self.outgoing, self.labels)
    }
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
