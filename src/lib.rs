//! # Typofix
//!
//! A frequency-driven spelling corrector.
//!
//! ## Features
//!
//! - Word frequency model built from any UTF-8 corpus
//! - Candidate generation at edit distance one and two
//! - Tiered correction with deterministic tie-breaking
//! - Per-corrector correction cache
//! - Frequency file and binary snapshot persistence
//!
//! ## Example
//!
//! ```
//! use typofix::spelling::Corrector;
//!
//! let mut corrector = Corrector::from_corpus(b"hello world hello there").unwrap();
//! assert_eq!(corrector.correct("helo!"), "hello!");
//! ```

pub mod analysis;
pub mod cli;
pub mod error;
pub mod spelling;

pub mod prelude {
    pub use crate::error::{Result, TypofixError};
    pub use crate::spelling::{
        CandidateGenerator, Correction, Corrector, CorrectorConfig, CorrectorStats,
        FrequencyModel, SharedCorrector, Suggestion, Tier,
    };
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
