//! Text analysis helpers shared by model building and correction.

pub mod tokenizer;

pub use tokenizer::{WordTokenizer, split_trailing_punctuation};
