//! Frequency-based spelling correction.
//!
//! A [`FrequencyModel`] counts the words of a corpus, a [`CandidateGenerator`]
//! enumerates strings within one or two edits of a token, and a [`Corrector`]
//! picks the most probable known word from the closest tier that has one.

pub mod cache;
pub mod candidates;
pub mod corrector;
pub mod model;
pub mod suggest;

// Re-export commonly used types
pub use cache::CorrectionCache;
pub use candidates::CandidateGenerator;
pub use corrector::*;
pub use model::FrequencyModel;
pub use suggest::Suggestion;
