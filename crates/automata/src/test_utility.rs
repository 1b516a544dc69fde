use crate::Automaton;
use crate::epsilon_closure;

/// Returns true iff the automaton accepts the given word, by simulating all
/// runs at the same time.
pub fn accepts(automaton: &Automaton, word: &[i32]) -> bool {
    let mut current = epsilon_closure(automaton.graph(), [automaton.initial_state_index()]);

    for &code in word {
        let targets: Vec<_> = current
            .iter()
            .flat_map(|&state_index| automaton.outgoing_edges(state_index))
            .filter(|edge| !edge.is_epsilon() && edge.label.contains(code))
            .map(|edge| edge.to)
            .collect();
        current = epsilon_closure(automaton.graph(), targets);
    }

    current.iter().any(|&state_index| automaton.is_final(state_index))
}

/// Returns the codes of the characters of the text.
pub fn codes(text: &str) -> Vec<i32> {
    text.chars().map(|c| c as i32).collect()
}

/// Returns every word over `[0, num_of_codes)` of at most the given length,
/// ordered by length.
pub fn all_words(num_of_codes: i32, max_length: usize) -> Vec<Vec<i32>> {
    let mut words = vec![Vec::new()];
    let mut longest: Vec<Vec<i32>> = vec![Vec::new()];

    for _ in 0..max_length {
        longest = longest
            .iter()
            .flat_map(|word| {
                (0..num_of_codes).map(move |code| {
                    let mut extended = word.clone();
                    extended.push(code);
                    extended
                })
            })
            .collect();
        words.extend(longest.iter().cloned());
    }

    words
}
