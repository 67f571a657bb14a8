use log::debug;
use thiserror::Error;

use enfa_automaton::Automaton;
use enfa_automaton::LabelIndex;

use crate::ClosureEngine;
use crate::Dfa;
use crate::DfaIndex;
use crate::LogTrace;
use crate::NoTrace;
use crate::StateSet;
use crate::TraceSink;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DeterminizeError {
    #[error("The automaton has no initial state")]
    NoInitialState,

    #[error("The DFA has more than {0} states")]
    StateSpaceExceeded(usize),
}

/// Options for the subset construction.
#[derive(Clone, Debug, Default)]
pub struct DeterminizeOptions {
    /// Report every step of the construction on the log.
    pub verbose: bool,

    /// Number the states of the resulting DFA in discovery order.
    pub enumerate: bool,

    /// Fail when the DFA would get more than this number of states.
    pub max_states: Option<usize>,
}

/// Converts the given automaton into an equivalent DFA using the subset
/// construction.
///
/// Every initial state contributes its epsilon closure as an initial DFA
/// state; closures that are equal result in a single initial state, but the
/// initial states are never merged into one.
pub fn determinize(automaton: &Automaton, options: &DeterminizeOptions) -> Result<Dfa, DeterminizeError> {
    if options.verbose {
        determinize_with_trace(automaton, options, &mut LogTrace)
    } else {
        determinize_with_trace(automaton, options, &mut NoTrace)
    }
}

/// Same as [determinize], but reports the steps of the construction to the
/// given trace sink regardless of [DeterminizeOptions::verbose].
pub fn determinize_with_trace<T: TraceSink>(
    automaton: &Automaton,
    options: &DeterminizeOptions,
    trace: &mut T,
) -> Result<Dfa, DeterminizeError> {
    let start = std::time::Instant::now();

    let mut engine = ClosureEngine::new(automaton);
    let mut dfa = Dfa::new();

    let initial_states: Vec<_> = automaton.initial_states().collect();
    if initial_states.is_empty() {
        return Err(DeterminizeError::NoInitialState);
    }

    for state_index in initial_states {
        let closure = engine.closure([state_index]);
        trace.closure_computed(automaton, &StateSet::from_vec(vec![state_index]), &closure);

        let (index, inserted) = dfa.insert(automaton, closure, true);
        if inserted {
            trace.state_discovered(automaton, index, dfa.state(index).members());
            check_state_limit(&dfa, options)?;
        }
    }

    let alphabet: Vec<LabelIndex> = automaton.alphabet().collect();

    // The depth first search stack, every frame is a state together with the
    // position in the alphabet of the next label to expand.
    let mut stack: Vec<(DfaIndex, usize)> = Vec::new();

    // Expand every initial state in turn, a newly discovered state is
    // expanded completely before its parent continues with the next label.
    for initial in dfa.initial_states().to_vec() {
        stack.push((initial, 0));

        while let Some((from, position)) = stack.pop() {
            let Some(&label) = alphabet.get(position) else {
                continue;
            };
            stack.push((from, position + 1));

            let result = engine.move_on(dfa.state(from).members(), label);
            trace.move_computed(automaton, dfa.state(from).members(), label, &result);

            if result.is_empty() {
                continue;
            }

            let (to, inserted) = dfa.insert(automaton, result, false);
            dfa.add_transition(from, label, to);

            if inserted {
                trace.state_discovered(automaton, to, dfa.state(to).members());
                check_state_limit(&dfa, options)?;
                stack.push((to, 0));
            }
        }
    }

    if options.enumerate {
        dfa.enumerate();
    }

    debug!(
        "Discovered {} states and {} transitions",
        dfa.num_of_states(),
        dfa.num_of_transitions()
    );
    debug!("Time determinize: {:.3}s", start.elapsed().as_secs_f64());
    Ok(dfa)
}

/// Returns an error when the DFA exceeds the configured number of states.
fn check_state_limit(dfa: &Dfa, options: &DeterminizeOptions) -> Result<(), DeterminizeError> {
    match options.max_states {
        Some(limit) if dfa.num_of_states() > limit => Err(DeterminizeError::StateSpaceExceeded(limit)),
        _ => Ok(()),
    }
}
