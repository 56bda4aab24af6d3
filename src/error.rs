//! Error types for the Typofix library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`TypofixError`] enum. Correction itself never fails: a token without a
//! plausible correction comes back unchanged. Errors only arise while loading
//! corpora, model files and configuration.
//!
//! # Examples
//!
//! ```
//! use typofix::error::{Result, TypofixError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(TypofixError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Typofix operations.
#[derive(Error, Debug)]
pub enum TypofixError {
    /// I/O errors (reading a corpus, writing a model file, ...)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The corpus or a model file could not be interpreted
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Invalid corrector configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary snapshot encoding/decoding errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for operations that may fail with TypofixError.
pub type Result<T> = std::result::Result<T, TypofixError>;

impl TypofixError {
    /// Create a new corpus error.
    pub fn corpus<S: Into<String>>(msg: S) -> Self {
        TypofixError::Corpus(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TypofixError::Config(msg.into())
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        TypofixError::Serialization(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TypofixError::InvalidArgument(msg.into())
    }
}
