//! Word-frequency model built from a text corpus.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use ahash::AHashMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::WordTokenizer;
use crate::error::{Result, TypofixError};

/// Version tag written into binary snapshots.
const SNAPSHOT_VERSION: u32 = 1;

/// Word counts and probabilities derived from a corpus.
///
/// Words are stored lowercased. The model is immutable once built: every
/// constructor returns a finished model and no method mutates it, which is
/// what lets a [`Corrector`](crate::spelling::Corrector) cache its answers
/// forever.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    /// Occurrence count per lowercase word. Every stored count is non-zero.
    counts: AHashMap<String, u64>,
    /// Sum of all counts.
    total: u64,
}

/// On-disk representation of a model.
#[derive(Serialize, Deserialize)]
struct ModelSnapshot {
    version: u32,
    total: u64,
    counts: Vec<(String, u64)>,
}

impl FrequencyModel {
    /// Build a model from raw corpus bytes.
    ///
    /// The corpus must be valid UTF-8; anything else is rejected so that no
    /// partial model is ever produced.
    pub fn build(corpus: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(corpus)
            .map_err(|e| TypofixError::corpus(format!("Corpus is not valid UTF-8: {e}")))?;
        Self::from_text(text)
    }

    /// Build a model from corpus text.
    pub fn from_text(text: &str) -> Result<Self> {
        let tokenizer = WordTokenizer::new()?;
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        let mut total = 0u64;

        for word in tokenizer.words(text) {
            *counts.entry(word).or_insert(0) += 1;
            total += 1;
        }

        debug!(
            "Built frequency model: {} distinct words, {} tokens",
            counts.len(),
            total
        );

        Ok(FrequencyModel { counts, total })
    }

    /// Read the whole corpus from `reader` in one blocking read, then build.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut corpus = Vec::new();
        reader.read_to_end(&mut corpus)?;
        Self::build(&corpus)
    }

    /// Read a corpus file and build a model from it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading corpus from {}", path.display());
        let corpus = fs::read(path)?;
        Self::build(&corpus)
    }

    /// Build a model from `(word, count)` pairs.
    ///
    /// Words are lowercased and duplicate entries summed. Empty words and zero
    /// counts are skipped so the vocabulary only holds words that occur.
    /// Counts whose sum does not fit in a `u64` are rejected.
    pub fn from_counts<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, u64)>,
        S: AsRef<str>,
    {
        let mut counts: AHashMap<String, u64> = AHashMap::new();
        let mut total = 0u64;

        for (word, count) in entries {
            let word = word.as_ref();
            if word.is_empty() || count == 0 {
                continue;
            }
            total = total.checked_add(count).ok_or_else(|| {
                TypofixError::corpus(format!("Total word count overflows at {word:?}"))
            })?;
            // Each count is bounded by the total, so this cannot overflow.
            *counts.entry(word.to_lowercase()).or_insert(0) += count;
        }

        Ok(FrequencyModel { counts, total })
    }

    /// Check if a word is part of the vocabulary (case-insensitive).
    pub fn contains(&self, word: &str) -> bool {
        self.lookup(word).is_some()
    }

    /// Occurrence count of a word, 0 if unknown.
    pub fn count(&self, word: &str) -> u64 {
        self.lookup(word).unwrap_or(0)
    }

    fn lookup(&self, word: &str) -> Option<u64> {
        if let Some(count) = self.counts.get(word) {
            return Some(*count);
        }
        // Stored words are lowercase; only input that folds differently needs
        // a second lookup.
        if word.chars().flat_map(char::to_lowercase).ne(word.chars()) {
            return self.counts.get(&word.to_lowercase()).copied();
        }
        None
    }

    /// Probability of a word: `count / total`.
    ///
    /// Unknown words have probability 0, and so does every word of an empty
    /// model.
    pub fn probability(&self, word: &str) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(word) as f64 / self.total as f64
    }

    /// Total number of tokens the model was built from.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct words.
    pub fn vocabulary_size(&self) -> usize {
        self.counts.len()
    }

    /// Whether the model holds no words at all.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(word, count)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    /// The `limit` most frequent words, by count descending then word ascending.
    pub fn most_frequent(&self, limit: usize) -> Vec<(String, u64)> {
        let mut word_freq: Vec<(&String, &u64)> = self.counts.iter().collect();
        word_freq.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        word_freq
            .into_iter()
            .take(limit)
            .map(|(word, count)| (word.clone(), *count))
            .collect()
    }

    /// Save the model as a frequency file with one `word count` pair per line.
    pub fn save_frequency_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);

        for (word, count) in self.most_frequent(self.counts.len()) {
            writeln!(writer, "{word} {count}")?;
        }
        writer.flush()?;

        info!(
            "Wrote {} words to frequency file {}",
            self.counts.len(),
            path.display()
        );
        Ok(())
    }

    /// Load a model from a frequency file written by [`save_frequency_file`].
    ///
    /// Blank lines and lines starting with `#` are ignored. Any other line
    /// must hold a word followed by a count.
    ///
    /// [`save_frequency_file`]: FrequencyModel::save_frequency_file
    pub fn load_frequency_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let mut entries = Vec::new();
        let mut total = 0u64;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut parts = trimmed.split_whitespace();
            let (Some(word), Some(count), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(TypofixError::corpus(format!(
                    "{}:{}: expected `word count`, got {trimmed:?}",
                    path.display(),
                    line_no + 1
                )));
            };
            let count = count.parse::<u64>().map_err(|e| {
                TypofixError::corpus(format!(
                    "{}:{}: invalid count {count:?}: {e}",
                    path.display(),
                    line_no + 1
                ))
            })?;
            total = total.checked_add(count).ok_or_else(|| {
                TypofixError::corpus(format!(
                    "{}:{}: total word count overflows",
                    path.display(),
                    line_no + 1
                ))
            })?;
            entries.push((word.to_string(), count));
        }

        let model = Self::from_counts(entries)?;
        info!(
            "Loaded {} words from frequency file {}",
            model.vocabulary_size(),
            path.display()
        );
        Ok(model)
    }

    /// Save the model as a binary snapshot.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let snapshot = ModelSnapshot {
            version: SNAPSHOT_VERSION,
            total: self.total,
            counts: self.most_frequent(self.counts.len()),
        };

        let bytes = bincode::serde::encode_to_vec(&snapshot, bincode::config::standard())
            .map_err(|e| TypofixError::serialization(format!("Failed to encode model: {e}")))?;
        fs::write(path, bytes)?;

        info!("Wrote model snapshot to {}", path.display());
        Ok(())
    }

    /// Load a model from a binary snapshot written by [`save_snapshot`].
    ///
    /// A snapshot whose recorded total disagrees with its counts is rejected.
    ///
    /// [`save_snapshot`]: FrequencyModel::save_snapshot
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let (snapshot, _): (ModelSnapshot, usize) =
            bincode::serde::decode_from_slice(&bytes, bincode::config::standard())
                .map_err(|e| TypofixError::serialization(format!("Failed to decode model: {e}")))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(TypofixError::serialization(format!(
                "Unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                snapshot.version
            )));
        }

        let recorded_total = snapshot.total;
        let model = Self::from_counts(snapshot.counts)?;
        if model.total != recorded_total {
            return Err(TypofixError::corpus(format!(
                "Snapshot total {recorded_total} does not match the sum of its counts {}",
                model.total
            )));
        }

        info!(
            "Loaded model snapshot from {} ({} words)",
            path.display(),
            model.vocabulary_size()
        );
        Ok(model)
    }
}
