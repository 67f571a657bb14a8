use std::io::Read;
use std::io::Write;

use log::debug;
use log::trace;
use regex::Regex;
use streaming_iterator::StreamingIterator;
use thiserror::Error;

use enfa_automaton::Automaton;
use enfa_automaton::AutomatonBuilder;
use enfa_determinize::Dfa;
use enfa_determinize::DfaIndex;
use enfa_determinize::StateSet;

use crate::line_iterator::LineIterator;

#[derive(Error, Debug)]
pub enum IOError {
    #[error("Invalid transition on line {line_number}: {line}")]
    MalformedTransition { line_number: usize, line: String },

    #[error("Failed to read the automaton")]
    Io(#[from] std::io::Error),
}

/// Loads an epsilon nondeterministic finite automaton from the given reader.
///
/// The format has one entry per line, which is one of:
///     `(START) |- <state>` marks the state as initial,
///     `<state> -| (FINAL)` marks the state as final,
///     `<state> <symbol> <state>` a transition, where the symbol `?` is epsilon.
///
/// States are numbered in the order in which their names first occur, symbols
/// form the alphabet in the order in which they first occur. Empty lines are
/// ignored.
pub fn read_enfa(reader: impl Read) -> Result<Automaton, IOError> {
    let mut lines = LineIterator::new(reader);

    // Regex for (START) |- <state>
    let initial_regex = Regex::new(r#"^\(START\)\s+\|-\s+(\S+)$"#).expect("Regex compilation should not fail");

    // Regex for <state> -| (FINAL)
    let final_regex = Regex::new(r#"^(\S+)\s+-\|\s+\(FINAL\)$"#).expect("Regex compilation should not fail");

    // Regex for <state> <symbol> <state>
    let transition_regex = Regex::new(r#"^(\S+)\s+(\S+)\s+(\S+)$"#).expect("Regex compilation should not fail");

    let mut builder = AutomatonBuilder::new();
    let mut line_number = 0;

    while let Some(line) = lines.next() {
        line_number += 1;
        trace!("{}", line);

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(captures) = initial_regex.captures(line) {
            let (_, [name]) = captures.extract();
            let state = builder.add_state(name);
            builder.set_initial(state);
        } else if let Some(captures) = final_regex.captures(line) {
            let (_, [name]) = captures.extract();
            let state = builder.add_state(name);
            builder.set_final(state);
        } else if let Some(captures) = transition_regex.captures(line) {
            let (_, [from_txt, symbol_txt, to_txt]) = captures.extract();

            let from = builder.add_state(from_txt);
            let to = builder.add_state(to_txt);

            trace!("Read transition {} --[{}]-> {}", from_txt, symbol_txt, to_txt);
            builder.add_transition(from, Some(symbol_txt), to);
        } else {
            return Err(IOError::MalformedTransition {
                line_number,
                line: line.to_string(),
            });
        }
    }

    if let Some(error) = lines.take_error() {
        return Err(error.into());
    }

    let automaton = builder.finish();
    debug!("Read automaton with {} states", automaton.num_of_states());
    Ok(automaton)
}

/// Writes the DFA in the format read by [read_enfa].
///
/// States are written as the set of names of their members, for example
/// `{A B}`, unless the DFA has been enumerated, in which case their number is
/// written instead.
pub fn write_dfa(writer: &mut impl Write, automaton: &Automaton, dfa: &Dfa) -> std::io::Result<()> {
    let name = |index: DfaIndex| -> String {
        let state = dfa.state(index);
        match state.ordinal() {
            Some(ordinal) => ordinal.to_string(),
            None => state.members().display(automaton).to_string(),
        }
    };

    for index in dfa.iter_states() {
        let state = dfa.state(index);
        let from = name(index);

        if state.is_initial() {
            writeln!(writer, "(START) |- {from}")?;
        }

        if state.is_final() {
            writeln!(writer, "{from} -| (FINAL)")?;
        }

        for (label, to) in state.transitions() {
            writeln!(writer, "{from} {} {}", automaton.label_name(*label), name(*to))?;
        }
    }

    Ok(())
}

/// Writes the epsilon closure of every state, where `closures` is indexed by state.
pub fn write_closures(writer: &mut impl Write, automaton: &Automaton, closures: &[StateSet]) -> std::io::Result<()> {
    for (state_index, closure) in closures.iter().enumerate() {
        writeln!(
            writer,
            "Epsilon closure of {}: {}",
            automaton.state_name(state_index),
            closure.display(automaton)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use enfa_determinize::determinize;
    use enfa_determinize::epsilon_closures;
    use enfa_determinize::DeterminizeOptions;
    use test_log::test;

    use super::*;

    const SINGLE: &str = "(START) |- A\nA a B\nB -| (FINAL)\n";

    #[test]
    fn test_reading_enfa() {
        let input = "(START) |- A\r\n\nA ? B\n  B   x  C \nC -| (FINAL)\nA -| (FINAL)\n";
        let automaton = read_enfa(input.as_bytes()).unwrap();

        assert_eq!(automaton.num_of_states(), 3);
        assert_eq!(automaton.num_of_transitions(), 2);
        assert_eq!(automaton.state_name(1), "B");
        assert!(automaton.is_initial(0));
        assert!(automaton.is_final(0) && automaton.is_final(2));
        assert_eq!(automaton.outgoing_transitions(0).collect::<Vec<_>>(), vec![(0, 1)]);
        assert_eq!(automaton.alphabet().count(), 1);
    }

    #[test]
    fn test_malformed_line() {
        let input = "(START) |- A\nA a\n";

        match read_enfa(input.as_bytes()) {
            Err(IOError::MalformedTransition { line_number, line }) => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "A a");
            }
            result => panic!("Expected a malformed transition, got {result:?}"),
        }
    }

    #[test]
    fn test_write_dfa() {
        let automaton = read_enfa(SINGLE.as_bytes()).unwrap();
        let mut dfa = determinize(&automaton, &DeterminizeOptions::default()).unwrap();

        let mut output = Vec::new();
        write_dfa(&mut output, &automaton, &dfa).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "(START) |- {A}\n{A} a {B}\n{B} -| (FINAL)\n"
        );

        dfa.enumerate();
        let mut output = Vec::new();
        write_dfa(&mut output, &automaton, &dfa).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "(START) |- 0\n0 a 1\n1 -| (FINAL)\n");
    }

    #[test]
    fn test_write_closures() {
        let automaton = read_enfa("(START) |- A\nA ? B\nB ? A\nB a C\n".as_bytes()).unwrap();

        let mut output = Vec::new();
        write_closures(&mut output, &automaton, &epsilon_closures(&automaton)).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Epsilon closure of A: {A B}\nEpsilon closure of B: {A B}\nEpsilon closure of C: {C}\n"
        );
    }
}
