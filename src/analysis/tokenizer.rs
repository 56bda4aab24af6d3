//! Regex-based word tokenizer and token punctuation helpers.

use std::sync::Arc;

use regex::Regex;

use crate::error::{Result, TypofixError};

/// Pattern matching maximal runs of word characters.
pub const WORD_PATTERN: &str = r"\w+";

/// A tokenizer that extracts lowercase words from corpus text.
///
/// Word characters follow the Unicode-aware `\w` class of the `regex` crate,
/// so digits and underscores are part of a word while whitespace and
/// punctuation separate words.
#[derive(Clone, Debug)]
pub struct WordTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl WordTokenizer {
    /// Create a new tokenizer with the default `\w+` pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(WORD_PATTERN)
    }

    /// Create a new tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| TypofixError::corpus(format!("Invalid regex pattern: {e}")))?;

        Ok(WordTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Iterate over the lowercased words of `text`.
    pub fn words<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.pattern
            .find_iter(text)
            .map(|mat| mat.as_str().to_lowercase())
    }
}

/// Split a single trailing ASCII punctuation character off `token`.
///
/// Only one character is detached: `"why?!"` yields `("why?", Some('!'))`.
/// Leading punctuation is left in place.
pub fn split_trailing_punctuation(token: &str) -> (&str, Option<char>) {
    match token.chars().next_back() {
        Some(last) if last.is_ascii_punctuation() => {
            (&token[..token.len() - last.len_utf8()], Some(last))
        }
        _ => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_tokenizer() {
        let tokenizer = WordTokenizer::new().unwrap();
        let words: Vec<String> = tokenizer.words("Hello, world! HELLO again.").collect();

        assert_eq!(words, vec!["hello", "world", "hello", "again"]);
    }

    #[test]
    fn test_word_tokenizer_keeps_digits_and_underscores() {
        let tokenizer = WordTokenizer::new().unwrap();
        let words: Vec<String> = tokenizer.words("route_66 is 2 lanes").collect();

        assert_eq!(words, vec!["route_66", "is", "2", "lanes"]);
    }

    #[test]
    fn test_word_tokenizer_unicode() {
        let tokenizer = WordTokenizer::new().unwrap();
        let words: Vec<String> = tokenizer.words("Café CRÈME").collect();

        assert_eq!(words, vec!["café", "crème"]);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(WordTokenizer::with_pattern("(").is_err());
        assert_eq!(WordTokenizer::new().unwrap().pattern(), WORD_PATTERN);
    }

    #[test]
    fn test_split_trailing_punctuation() {
        assert_eq!(split_trailing_punctuation("helo!"), ("helo", Some('!')));
        assert_eq!(split_trailing_punctuation("hello"), ("hello", None));
        assert_eq!(split_trailing_punctuation("why?!"), ("why?", Some('!')));
        assert_eq!(split_trailing_punctuation("\"quote"), ("\"quote", None));
        assert_eq!(split_trailing_punctuation("."), ("", Some('.')));
        assert_eq!(split_trailing_punctuation(""), ("", None));
        assert_eq!(split_trailing_punctuation("naïve"), ("naïve", None));
    }
}
