use log::info;

use enfa_automaton::Automaton;
use enfa_automaton::LabelIndex;

use crate::DfaIndex;
use crate::StateSet;

/// Receives the intermediate steps of the subset construction.
///
/// All methods have an empty default implementation, so a sink only has to
/// implement the events that it is interested in.
pub trait TraceSink {
    /// The epsilon closure of an initial state has been computed.
    fn closure_computed(&mut self, _automaton: &Automaton, _seed: &StateSet, _closure: &StateSet) {}

    /// The move of a DFA state on the given label has been computed.
    fn move_computed(&mut self, _automaton: &Automaton, _source: &StateSet, _label: LabelIndex, _result: &StateSet) {}

    /// A new DFA state has been inserted at the given index.
    fn state_discovered(&mut self, _automaton: &Automaton, _index: DfaIndex, _state: &StateSet) {}
}

/// A trace sink that ignores all events.
pub struct NoTrace;

impl TraceSink for NoTrace {}

/// A trace sink that reports every event on the info level of the log facade.
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn closure_computed(&mut self, automaton: &Automaton, seed: &StateSet, closure: &StateSet) {
        info!(
            "Epsilon closure of {} is {}",
            seed.display(automaton),
            closure.display(automaton)
        );
    }

    fn move_computed(&mut self, automaton: &Automaton, source: &StateSet, label: LabelIndex, result: &StateSet) {
        info!(
            "Next states of {} on {} are {}",
            source.display(automaton),
            automaton.label_name(label),
            result.display(automaton)
        );
    }

    fn state_discovered(&mut self, automaton: &Automaton, index: DfaIndex, state: &StateSet) {
        info!("Discovered state {index}: {}", state.display(automaton));
    }
}

/// Records every event, used to check the order of the events in tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingTrace {
    pub events: Vec<String>,
}

#[cfg(test)]
impl TraceSink for RecordingTrace {
    fn closure_computed(&mut self, automaton: &Automaton, seed: &StateSet, closure: &StateSet) {
        self.events
            .push(format!("closure {} {}", seed.display(automaton), closure.display(automaton)));
    }

    fn move_computed(&mut self, automaton: &Automaton, source: &StateSet, label: LabelIndex, result: &StateSet) {
        self.events.push(format!(
            "move {} {} {}",
            source.display(automaton),
            automaton.label_name(label),
            result.display(automaton)
        ));
    }

    fn state_discovered(&mut self, automaton: &Automaton, index: DfaIndex, state: &StateSet) {
        self.events.push(format!("state {index} {}", state.display(automaton)));
    }
}
