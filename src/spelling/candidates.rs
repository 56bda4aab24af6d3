//! Candidate generation at edit distance one and two.

use ahash::AHashSet;

/// Letters used for substitutions and insertions.
pub const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r',
    's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

/// Generates every string within one or two edits of a word.
///
/// An edit is a deletion, a transposition of adjacent characters, a
/// substitution or an insertion. Substitutions and insertions only use the
/// 26 lowercase ASCII letters, so a token's digits or symbols are never
/// introduced, only kept, moved or removed. Words are split on `char`
/// boundaries, never inside a multi-byte character.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateGenerator;

impl CandidateGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        CandidateGenerator
    }

    /// All strings one edit away from `word`.
    pub fn edits1(&self, word: &str) -> AHashSet<String> {
        let chars: Vec<char> = word.chars().collect();
        let mut edits = AHashSet::with_capacity(edits1_upper_bound(chars.len()));
        visit_edits1(&chars, |edit| {
            edits.insert(edit);
        });
        edits
    }

    /// All strings two edits away from `word`: `edits1` of every member of
    /// `edits1(word)`, collected into one set.
    pub fn edits2(&self, word: &str) -> AHashSet<String> {
        self.edits2_filtered(word, |_| true)
    }

    /// The members of `edits2(word)` accepted by `keep`.
    ///
    /// Produces the same set as filtering `edits2(word)` afterwards, without
    /// ever holding the unfiltered second level in memory.
    pub fn edits2_filtered<F>(&self, word: &str, mut keep: F) -> AHashSet<String>
    where
        F: FnMut(&str) -> bool,
    {
        let mut result = AHashSet::new();
        let mut chars = Vec::new();

        for first in self.edits1(word) {
            chars.clear();
            chars.extend(first.chars());
            visit_edits1(&chars, |second| {
                if !result.contains(&second) && keep(&second) {
                    result.insert(second);
                }
            });
        }

        result
    }
}

/// Upper bound on the size of `edits1` for a word of `n` characters.
pub fn edits1_upper_bound(n: usize) -> usize {
    // n deletions, n-1 transpositions, 26n substitutions, 26(n+1) insertions
    54 * n + 25
}

/// Call `emit` with every single edit of `chars`. Duplicates are possible;
/// callers collect into a set.
fn visit_edits1<F>(chars: &[char], mut emit: F)
where
    F: FnMut(String),
{
    for split in 0..=chars.len() {
        let (left, right) = chars.split_at(split);

        // Deletion
        if let Some((_, rest)) = right.split_first() {
            emit(assemble(left, &[], rest));
        }

        // Transposition
        if right.len() >= 2 {
            emit(assemble(left, &[right[1], right[0]], &right[2..]));
        }

        // Substitution
        if let Some((_, rest)) = right.split_first() {
            for letter in ALPHABET {
                emit(assemble(left, &[letter], rest));
            }
        }

        // Insertion
        for letter in ALPHABET {
            emit(assemble(left, &[letter], right));
        }
    }
}

fn assemble(left: &[char], middle: &[char], right: &[char]) -> String {
    let mut word = String::with_capacity(left.len() + middle.len() + right.len());
    word.extend(left);
    word.extend(middle);
    word.extend(right);
    word
}
