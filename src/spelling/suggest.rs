//! Ranking of vocabulary candidates.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::spelling::model::FrequencyModel;

/// A ranked correction candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// The suggested word, as stored in the vocabulary.
    pub word: String,
    /// Occurrence count of the word in the model.
    pub count: u64,
    /// Probability of the word in the model.
    pub probability: f64,
    /// Number of edits separating the input from this word (0, 1 or 2).
    pub distance: usize,
}

impl Suggestion {
    /// Create a suggestion for `word` looked up in `model`.
    pub fn from_model(model: &FrequencyModel, word: String, distance: usize) -> Self {
        Suggestion {
            count: model.count(&word),
            probability: model.probability(&word),
            word,
            distance,
        }
    }
}

impl Eq for Suggestion {}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        // More frequent first, then alphabetical. Probabilities share one
        // denominator, so counts order them exactly.
        other
            .count
            .cmp(&self.count)
            .then_with(|| self.word.cmp(&other.word))
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Rank `candidates` best first.
pub fn rank<I>(model: &FrequencyModel, candidates: I, distance: usize) -> Vec<Suggestion>
where
    I: IntoIterator<Item = String>,
{
    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .map(|word| Suggestion::from_model(model, word, distance))
        .collect();
    suggestions.sort();
    suggestions
}

/// The most probable of `candidates`; ties go to the alphabetically smallest.
pub fn best<'a, I>(model: &FrequencyModel, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
{
    candidates
        .into_iter()
        .map(|word| (word.as_str(), model.count(word)))
        .max_by(|(word_a, count_a), (word_b, count_b)| {
            count_a.cmp(count_b).then_with(|| word_b.cmp(word_a))
        })
        .map(|(word, _)| word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_ordering() {
        let model =
            FrequencyModel::from_counts([("hello", 100), ("world", 50), ("test", 200)]).unwrap();

        let ranked = rank(
            &model,
            ["world".to_string(), "hello".to_string(), "test".to_string()],
            1,
        );

        let words: Vec<&str> = ranked.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["test", "hello", "world"]);
        assert_eq!(ranked[0].count, 200);
        assert_eq!(ranked[0].distance, 1);
        assert!((ranked[0].probability - 200.0 / 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_ties_are_alphabetical() {
        let model = FrequencyModel::from_counts([("cart", 5), ("care", 5), ("card", 5)]).unwrap();

        let ranked = rank(
            &model,
            ["cart".to_string(), "card".to_string(), "care".to_string()],
            1,
        );
        let words: Vec<&str> = ranked.iter().map(|s| s.word.as_str()).collect();
        assert_eq!(words, vec!["card", "care", "cart"]);
    }

    #[test]
    fn test_best() {
        let model = FrequencyModel::from_counts([("the", 100), ("there", 5)]).unwrap();
        let candidates = vec!["there".to_string(), "the".to_string()];

        assert_eq!(best(&model, &candidates), Some("the"));
        assert_eq!(best(&model, &Vec::<String>::new()), None);
    }

    #[test]
    fn test_best_tie_break_is_deterministic() {
        let model = FrequencyModel::from_counts([("bat", 3), ("cat", 3), ("hat", 3)]).unwrap();

        for order in [["hat", "cat", "bat"], ["bat", "hat", "cat"], ["cat", "bat", "hat"]] {
            let candidates: Vec<String> = order.iter().map(|w| w.to_string()).collect();
            assert_eq!(best(&model, &candidates), Some("bat"));
        }
    }
}
