use rand::Rng;

use crate::Automaton;
use crate::AutomatonBuilder;

/// Generates an automaton with the desired number of states and symbols, where
/// every state has at most `outdegree` outgoing transitions. Roughly one in
/// `num_of_labels + 1` transitions is an epsilon transition.
///
/// State `s0` is the only initial state, every state is final with probability
/// one quarter.
pub fn random_automaton(num_of_states: usize, num_of_labels: u32, outdegree: usize) -> Automaton {
    assert!(num_of_states > 0, "The automaton needs at least an initial state");
    assert!(num_of_labels <= 26, "Symbols are lower case letters");

    let mut builder = AutomatonBuilder::new();
    for index in 0..num_of_states {
        builder.add_state(&format!("s{index}"));
    }
    builder.set_initial(0);

    // Introduce lower case letters for the labels.
    let labels: Vec<String> = (0..num_of_labels)
        .filter_map(|i| char::from_digit(i + 10, 36))
        .map(|c| c.to_string())
        .collect();

    let mut rng = rand::rng();

    for from in 0..num_of_states {
        if rng.random_bool(0.25) {
            builder.set_final(from);
        }

        // Introduce outgoing transitions for this state based on the desired out degree.
        for _ in 0..rng.random_range(0..=outdegree) {
            // Pick a random label, where the last index denotes epsilon, and a random target.
            let label = rng.random_range(0..=labels.len());
            let to = rng.random_range(0..num_of_states);

            builder.add_transition(from, labels.get(label).map(String::as_str), to);
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_random_automaton() {
        let automaton = random_automaton(10, 3, 3);

        assert_eq!(automaton.num_of_states(), 10);
        assert!(automaton.num_of_labels() <= 4);
        assert!(automaton.num_of_transitions() <= 30);
        assert_eq!(automaton.initial_states().count(), 1);
    }
}
