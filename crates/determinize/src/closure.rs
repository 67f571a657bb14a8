use log::trace;

use enfa_automaton::Automaton;
use enfa_automaton::LabelIndex;
use enfa_automaton::StateIndex;

use crate::StateSet;

/// Computes epsilon closures and the move function on an automaton.
///
/// The engine keeps its work stack and visited markers between calls, so a
/// call only touches the states that it actually explores. Both traversals use
/// an explicit stack, such that long epsilon chains and epsilon cycles neither
/// overflow the call stack nor loop forever.
pub struct ClosureEngine<'a> {
    automaton: &'a Automaton,

    /// The depth first search stack.
    stack: Vec<StateIndex>,

    /// Keeps track of the states visited by the current traversal.
    visited: Vec<bool>,

    /// The states marked in visited, in the order in which they were visited.
    touched: Vec<StateIndex>,
}

impl<'a> ClosureEngine<'a> {
    pub fn new(automaton: &'a Automaton) -> ClosureEngine<'a> {
        ClosureEngine {
            automaton,
            stack: Vec::new(),
            visited: vec![false; automaton.num_of_states()],
            touched: Vec::new(),
        }
    }

    /// Returns the set of states reachable from the seed states using zero or
    /// more epsilon transitions.
    pub fn closure(&mut self, seed: impl IntoIterator<Item = StateIndex>) -> StateSet {
        for state_index in seed {
            self.visit(state_index);
        }

        let automaton = self.automaton;
        while let Some(state_index) = self.stack.pop() {
            for (label_index, to_index) in automaton.outgoing_transitions(state_index) {
                if automaton.is_epsilon(label_index) {
                    self.visit(to_index);
                }
            }
        }

        self.take_visited()
    }

    /// Returns the epsilon closure of the states reachable from the seed states
    /// with exactly one transition labelled with the given symbol.
    ///
    /// The seed is first closed under epsilon transitions, so for a seed that
    /// is already epsilon closed this is the classical move function followed
    /// by a closure. Returns the empty set when no state carries the symbol.
    pub fn move_on(&mut self, seed: &StateSet, label: LabelIndex) -> StateSet {
        debug_assert!(!self.automaton.is_epsilon(label), "Moving on epsilon is not defined");

        for state_index in seed.iter() {
            self.visit(state_index);
        }

        // Explore the seed along epsilon transitions and collect the targets of the symbol.
        let automaton = self.automaton;
        let mut targets = Vec::new();
        while let Some(state_index) = self.stack.pop() {
            for (label_index, to_index) in automaton.outgoing_transitions(state_index) {
                if label_index == label {
                    targets.push(to_index);
                } else if automaton.is_epsilon(label_index) {
                    self.visit(to_index);
                }
            }
        }
        self.clear_visited();

        trace!("Targets of {:?} on {}: {:?}", seed, automaton.label_name(label), targets);
        self.closure(targets)
    }

    /// Marks the state as visited and schedules it for exploration, unless it
    /// was visited before.
    fn visit(&mut self, state_index: StateIndex) {
        if !self.visited[state_index] {
            self.visited[state_index] = true;
            self.touched.push(state_index);
            self.stack.push(state_index);
        }
    }

    /// Returns the visited states and clears the markers for the next traversal.
    fn take_visited(&mut self) -> StateSet {
        let members = std::mem::take(&mut self.touched);
        for state_index in &members {
            self.visited[*state_index] = false;
        }

        StateSet::from_vec(members)
    }

    /// Clears the markers of the visited states for the next traversal.
    fn clear_visited(&mut self) {
        for state_index in self.touched.drain(..) {
            self.visited[state_index] = false;
        }
    }
}

/// Returns the epsilon closure of the given seed states.
pub fn epsilon_closure(automaton: &Automaton, seed: impl IntoIterator<Item = StateIndex>) -> StateSet {
    ClosureEngine::new(automaton).closure(seed)
}

/// Returns the epsilon closed set of states reachable from the seed with one
/// transition labelled with the given symbol, see [ClosureEngine::move_on].
pub fn move_on(automaton: &Automaton, seed: &StateSet, label: LabelIndex) -> StateSet {
    ClosureEngine::new(automaton).move_on(seed, label)
}

/// Returns the epsilon closure of every individual state, indexed by state.
pub fn epsilon_closures(automaton: &Automaton) -> Vec<StateSet> {
    let mut engine = ClosureEngine::new(automaton);
    automaton
        .iter_states()
        .map(|state_index| engine.closure([state_index]))
        .collect()
}

#[cfg(test)]
mod tests {
    use enfa_automaton::random_automaton;
    use enfa_automaton::AutomatonBuilder;
    use rand::Rng;
    use test_log::test;

    use super::*;

    /// A -?-> B -?-> C -?-> A, C -a-> D, D -?-> D
    fn epsilon_cycle() -> Automaton {
        let mut builder = AutomatonBuilder::new();
        let a = builder.add_state("A");
        let b = builder.add_state("B");
        let c = builder.add_state("C");
        let d = builder.add_state("D");

        builder.set_initial(a);
        builder.add_transition(a, None, b);
        builder.add_transition(b, None, c);
        builder.add_transition(c, None, a);
        builder.add_transition(c, Some("a"), d);
        builder.add_transition(d, None, d);
        builder.finish()
    }

    /// Returns a random subset of the states of the automaton.
    fn random_seed(automaton: &Automaton) -> Vec<StateIndex> {
        let mut rng = rand::rng();
        automaton.iter_states().filter(|_| rng.random_bool(0.3)).collect()
    }

    #[test]
    fn test_self_loop_closure() {
        let mut builder = AutomatonBuilder::new();
        let a = builder.add_state("A");
        builder.add_transition(a, None, a);
        let automaton = builder.finish();

        assert_eq!(epsilon_closure(&automaton, [a]), StateSet::from_vec(vec![a]));
    }

    #[test]
    fn test_epsilon_cycle() {
        let automaton = epsilon_cycle();
        let mut engine = ClosureEngine::new(&automaton);

        assert_eq!(engine.closure([0]), StateSet::from_vec(vec![0, 1, 2]));
        assert_eq!(engine.closure([2]), StateSet::from_vec(vec![0, 1, 2]));
        assert_eq!(engine.closure([3]), StateSet::from_vec(vec![3]));
        assert_eq!(engine.closure([]), StateSet::new());
    }

    #[test]
    fn test_move_on() {
        let automaton = epsilon_cycle();
        let label = automaton.find_label("a").unwrap();
        let mut engine = ClosureEngine::new(&automaton);

        // The symbol is reached through the epsilon cycle from A.
        assert_eq!(engine.move_on(&StateSet::from_vec(vec![0]), label), StateSet::from_vec(vec![3]));

        // There is no transition labelled with the symbol from D.
        assert!(engine.move_on(&StateSet::from_vec(vec![3]), label).is_empty());
    }

    #[test]
    fn test_move_closes_targets() {
        let mut builder = AutomatonBuilder::new();
        let a = builder.add_state("A");
        let b = builder.add_state("B");
        let c = builder.add_state("C");
        builder.add_transition(a, Some("a"), b);
        builder.add_transition(b, None, c);
        let automaton = builder.finish();

        let label = automaton.find_label("a").unwrap();
        assert_eq!(
            move_on(&automaton, &StateSet::from_vec(vec![a]), label),
            StateSet::from_vec(vec![b, c])
        );
    }

    #[test]
    fn test_move_leaves_no_markers() {
        let automaton = epsilon_cycle();
        let label = automaton.find_label("a").unwrap();
        let mut engine = ClosureEngine::new(&automaton);

        engine.move_on(&StateSet::from_vec(vec![0]), label);
        assert!(engine.touched.is_empty());
        assert!(engine.visited.iter().all(|visited| !visited));

        // The states explored by the move can be visited again.
        assert_eq!(engine.closure([1]), StateSet::from_vec(vec![0, 1, 2]));
    }

    #[test]
    fn test_epsilon_closures() {
        let automaton = epsilon_cycle();
        let closures = epsilon_closures(&automaton);

        assert_eq!(closures.len(), 4);
        assert_eq!(closures[1], StateSet::from_vec(vec![0, 1, 2]));
        assert_eq!(closures[3], StateSet::from_vec(vec![3]));
    }

    #[test]
    fn test_random_closure_properties() {
        for _ in 0..20 {
            let automaton = random_automaton(10, 3, 3);
            let mut engine = ClosureEngine::new(&automaton);
            let seed = random_seed(&automaton);

            let closure = engine.closure(seed.iter().copied());
            assert!(
                StateSet::from_vec(seed.clone()).is_subset_of(&closure),
                "The closure should contain the seed"
            );
            assert_eq!(
                engine.closure(closure.iter()),
                closure,
                "The closure should be idempotent"
            );

            // Every epsilon successor of a member is a member.
            for state_index in closure.iter() {
                for (label_index, to_index) in automaton.outgoing_transitions(state_index) {
                    if automaton.is_epsilon(label_index) {
                        assert!(closure.contains(to_index), "The closure is not closed under epsilon");
                    }
                }
            }
        }
    }

    #[test]
    fn test_random_move_properties() {
        for _ in 0..20 {
            let automaton = random_automaton(10, 3, 3);
            let mut engine = ClosureEngine::new(&automaton);
            let seed = engine.closure(random_seed(&automaton));

            for label in automaton.alphabet() {
                let result = engine.move_on(&seed, label);
                assert_eq!(result, engine.move_on(&seed, label), "Move should be deterministic");
                assert_eq!(engine.closure(result.iter()), result, "Move should be epsilon closed");
                assert_eq!(result, move_on(&automaton, &seed, label), "A fresh engine should agree");
            }
        }
    }
}
