//! Tiered spelling corrector with a per-instance correction cache.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use log::trace;
use parking_lot::Mutex;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::split_trailing_punctuation;
use crate::error::{Result, TypofixError};
use crate::spelling::cache::CorrectionCache;
use crate::spelling::candidates::CandidateGenerator;
use crate::spelling::model::FrequencyModel;
use crate::spelling::suggest::{self, Suggestion};

/// Largest supported search distance.
pub const MAX_SEARCH_DISTANCE: usize = 2;

/// Configuration for the spelling corrector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Maximum edit distance searched: 2 searches every tier, 1 skips the
    /// edit-two tier, 0 only accepts exact vocabulary words.
    pub max_distance: usize,
    /// Whether results are memoized.
    pub cache_enabled: bool,
    /// Stop caching new results once this many are stored.
    pub cache_capacity: Option<usize>,
    /// Whether a single trailing punctuation character is detached before
    /// correction and reattached afterwards.
    pub preserve_punctuation: bool,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_distance: MAX_SEARCH_DISTANCE,
            cache_enabled: true,
            cache_capacity: None,
            preserve_punctuation: true,
        }
    }
}

impl CorrectorConfig {
    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let config: CorrectorConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_distance > MAX_SEARCH_DISTANCE {
            return Err(TypofixError::config(format!(
                "max_distance must be at most {MAX_SEARCH_DISTANCE}, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

/// The stage of the search that produced a correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The token is a vocabulary word and was returned untouched.
    Exact,
    /// The answer came from the correction cache.
    Cached,
    /// The token itself is known once case-folded.
    Known,
    /// The best vocabulary word one edit away.
    EditOne,
    /// The best vocabulary word two edits away.
    EditTwo,
    /// Nothing matched; the token was returned untouched.
    Fallback,
}

impl Tier {
    /// Edit distance implied by the tier, when it has one.
    pub fn distance(self) -> Option<usize> {
        match self {
            Tier::Exact | Tier::Known => Some(0),
            Tier::EditOne => Some(1),
            Tier::EditTwo => Some(2),
            Tier::Cached | Tier::Fallback => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Exact => "exact",
            Tier::Cached => "cached",
            Tier::Known => "known",
            Tier::EditOne => "edit-1",
            Tier::EditTwo => "edit-2",
            Tier::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Result of correcting one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// The token as given.
    pub original: String,
    /// The corrected token, trailing punctuation included.
    pub corrected: String,
    /// Where the correction came from.
    pub tier: Tier,
}

impl Correction {
    /// Whether the correction differs from the input.
    pub fn is_changed(&self) -> bool {
        self.original != self.corrected
    }
}

/// Counters describing the work a corrector has done.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectorStats {
    /// Tokens corrected.
    pub lookups: u64,
    /// Tokens that were already vocabulary words.
    pub exact_hits: u64,
    /// Tokens answered from the cache.
    pub cache_hits: u64,
    /// Tokens that ran the tiered candidate search.
    pub candidate_searches: u64,
    /// Searches settled by the case-folded token itself.
    pub tier_known: u64,
    /// Searches settled at edit distance one.
    pub tier_edit_one: u64,
    /// Searches settled at edit distance two.
    pub tier_edit_two: u64,
    /// Searches that found nothing.
    pub fallbacks: u64,
    /// Entries currently cached.
    pub cache_entries: usize,
}

/// Outcome of a candidate search for one case-folded token.
#[derive(Debug, Clone)]
struct Resolution {
    word: Option<String>,
    tier: Tier,
}

/// Frequency-driven spelling corrector.
///
/// Searches outward from a token: the token itself, then every vocabulary
/// word one edit away, then two edits away, keeping the most probable word of
/// the first tier that matches anything. Results are cached for the lifetime
/// of the corrector, which is sound because the model never changes.
pub struct Corrector {
    model: Arc<FrequencyModel>,
    generator: CandidateGenerator,
    cache: CorrectionCache,
    config: CorrectorConfig,
    stats: CorrectorStats,
}

impl Corrector {
    /// Create a corrector with the default configuration.
    pub fn new(model: Arc<FrequencyModel>) -> Self {
        let config = CorrectorConfig::default();
        Corrector {
            model,
            generator: CandidateGenerator::new(),
            cache: CorrectionCache::with_capacity_limit(config.cache_capacity),
            config,
            stats: CorrectorStats::default(),
        }
    }

    /// Create a corrector with a custom configuration.
    pub fn with_config(model: Arc<FrequencyModel>, config: CorrectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Corrector {
            model,
            generator: CandidateGenerator::new(),
            cache: CorrectionCache::with_capacity_limit(config.cache_capacity),
            config,
            stats: CorrectorStats::default(),
        })
    }

    /// Build a model from raw corpus bytes and wrap it in a corrector.
    pub fn from_corpus(corpus: &[u8]) -> Result<Self> {
        Ok(Self::new(Arc::new(FrequencyModel::build(corpus)?)))
    }

    /// The model corrections are drawn from.
    pub fn model(&self) -> &Arc<FrequencyModel> {
        &self.model
    }

    /// The active configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Correct a single token.
    ///
    /// Vocabulary words come back unchanged, misspellings come back as the
    /// most probable nearby vocabulary word, and tokens with nothing nearby
    /// come back unchanged. A single trailing punctuation character is kept.
    pub fn correct(&mut self, token: &str) -> String {
        self.correct_detailed(token).corrected
    }

    /// Correct a single token and report which tier answered.
    pub fn correct_detailed(&mut self, token: &str) -> Correction {
        self.correct_inner(token, None)
    }

    /// Correct every whitespace-separated token of `text`, keeping the
    /// whitespace between tokens as it was.
    pub fn correct_text(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());
        let mut word_start = None;

        for (idx, ch) in text.char_indices() {
            if ch.is_whitespace() {
                if let Some(start) = word_start.take() {
                    output.push_str(&self.correct(&text[start..idx]));
                }
                output.push(ch);
            } else if word_start.is_none() {
                word_start = Some(idx);
            }
        }
        if let Some(start) = word_start {
            output.push_str(&self.correct(&text[start..]));
        }

        output
    }

    /// Correct many tokens at once.
    ///
    /// The distinct tokens that need a candidate search are resolved in
    /// parallel; results and statistics match calling [`correct`] on each
    /// token in order.
    ///
    /// [`correct`]: Corrector::correct
    pub fn correct_batch<S: AsRef<str>>(&mut self, tokens: &[S]) -> Vec<String> {
        let mut pending = Vec::new();
        let mut seen = AHashSet::new();

        for token in tokens {
            let (stripped, _) = self.strip(token.as_ref());
            if stripped.is_empty() {
                continue;
            }
            let key = stripped.to_lowercase();
            if self.model.contains(&key) || (self.config.cache_enabled && self.cache.contains(&key))
            {
                continue;
            }
            if seen.insert(key.clone()) {
                pending.push(key);
            }
        }

        let this = &*self;
        let resolved: Vec<(String, Resolution)> = pending
            .into_par_iter()
            .map(|key| {
                let resolution = this.resolve(&key);
                (key, resolution)
            })
            .collect();
        let resolved: AHashMap<String, Resolution> = resolved.into_iter().collect();

        tokens
            .iter()
            .map(|token| self.correct_inner(token.as_ref(), Some(&resolved)).corrected)
            .collect()
    }

    /// Ranked candidates for `token` from the first tier that matches.
    ///
    /// Unlike [`correct`], this neither reads nor fills the cache. A
    /// vocabulary word yields itself as the only suggestion.
    ///
    /// [`correct`]: Corrector::correct
    pub fn suggestions(&self, token: &str, limit: usize) -> Vec<Suggestion> {
        let (stripped, _) = self.strip(token);
        if stripped.is_empty() {
            return Vec::new();
        }
        let key = stripped.to_lowercase();
        if self.model.contains(&key) {
            return vec![Suggestion::from_model(&self.model, key, 0)];
        }

        let mut ranked = match self.search_tiers(&key) {
            Some((tier, candidates)) => {
                suggest::rank(&self.model, candidates, tier.distance().unwrap_or(0))
            }
            None => Vec::new(),
        };
        ranked.truncate(limit);
        ranked
    }

    /// Check if a token is a vocabulary word, ignoring case and a trailing
    /// punctuation character.
    pub fn is_correct(&self, token: &str) -> bool {
        let (stripped, _) = self.strip(token);
        !stripped.is_empty() && self.model.contains(stripped)
    }

    /// Snapshot of the corrector's counters.
    pub fn stats(&self) -> CorrectorStats {
        CorrectorStats {
            cache_entries: self.cache.len(),
            ..self.stats.clone()
        }
    }

    /// Forget every cached correction.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    fn strip<'t>(&self, token: &'t str) -> (&'t str, Option<char>) {
        if self.config.preserve_punctuation {
            split_trailing_punctuation(token)
        } else {
            (token, None)
        }
    }

    fn correct_inner(
        &mut self,
        token: &str,
        precomputed: Option<&AHashMap<String, Resolution>>,
    ) -> Correction {
        self.stats.lookups += 1;

        let (stripped, punctuation) = self.strip(token);
        if stripped.is_empty() {
            return unchanged(token, Tier::Fallback);
        }

        let key = stripped.to_lowercase();
        if self.model.contains(&key) {
            self.stats.exact_hits += 1;
            trace!("{token:?}: vocabulary word");
            return unchanged(token, Tier::Exact);
        }

        if self.config.cache_enabled
            && let Some(cached) = self.cache.get(&key)
        {
            self.stats.cache_hits += 1;
            trace!("{token:?}: cache hit");
            let corrected = match cached {
                Some(word) => reattach(word, punctuation),
                None => token.to_string(),
            };
            return Correction {
                original: token.to_string(),
                corrected,
                tier: Tier::Cached,
            };
        }

        let resolution = match precomputed.and_then(|resolved| resolved.get(&key)) {
            Some(resolution) => resolution.clone(),
            None => self.resolve(&key),
        };
        self.record_search(resolution.tier);
        trace!("{token:?}: resolved by {} tier", resolution.tier);

        if self.config.cache_enabled {
            self.cache.insert(key, resolution.word.clone());
        }

        match resolution.word {
            Some(word) => Correction {
                original: token.to_string(),
                corrected: reattach(&word, punctuation),
                tier: resolution.tier,
            },
            None => unchanged(token, Tier::Fallback),
        }
    }

    fn record_search(&mut self, tier: Tier) {
        self.stats.candidate_searches += 1;
        match tier {
            Tier::Known => self.stats.tier_known += 1,
            Tier::EditOne => self.stats.tier_edit_one += 1,
            Tier::EditTwo => self.stats.tier_edit_two += 1,
            Tier::Fallback => self.stats.fallbacks += 1,
            Tier::Exact | Tier::Cached => {}
        }
    }

    /// Run the tiered search for a case-folded, stripped token.
    fn resolve(&self, key: &str) -> Resolution {
        match self.search_tiers(key) {
            Some((tier, candidates)) => Resolution {
                word: suggest::best(&self.model, &candidates).map(str::to_string),
                tier,
            },
            None => Resolution {
                word: None,
                tier: Tier::Fallback,
            },
        }
    }

    /// Vocabulary words of the first non-empty tier.
    fn search_tiers(&self, key: &str) -> Option<(Tier, Vec<String>)> {
        let model = &self.model;

        if model.contains(key) {
            return Some((Tier::Known, vec![key.to_string()]));
        }

        if self.config.max_distance >= 1 {
            let known: Vec<String> = self
                .generator
                .edits1(key)
                .into_iter()
                .filter(|candidate| model.contains(candidate))
                .collect();
            if !known.is_empty() {
                return Some((Tier::EditOne, known));
            }
        }

        if self.config.max_distance >= 2 {
            let known = self
                .generator
                .edits2_filtered(key, |candidate| model.contains(candidate));
            if !known.is_empty() {
                return Some((Tier::EditTwo, known.into_iter().collect()));
            }
        }

        None
    }
}

/// A [`Corrector`] that can be shared between threads.
///
/// Every call holds the lock for the whole correction, so the cache check and
/// the cache insert of one token never interleave with another call.
pub struct SharedCorrector {
    inner: Mutex<Corrector>,
}

impl SharedCorrector {
    /// Wrap a corrector.
    pub fn new(corrector: Corrector) -> Self {
        SharedCorrector {
            inner: Mutex::new(corrector),
        }
    }

    /// Correct a single token.
    pub fn correct(&self, token: &str) -> String {
        self.inner.lock().correct(token)
    }

    /// Correct a single token and report which tier answered.
    pub fn correct_detailed(&self, token: &str) -> Correction {
        self.inner.lock().correct_detailed(token)
    }

    /// Snapshot of the corrector's counters.
    pub fn stats(&self) -> CorrectorStats {
        self.inner.lock().stats()
    }

    /// Unwrap the corrector.
    pub fn into_inner(self) -> Corrector {
        self.inner.into_inner()
    }
}

/// Uppercase the first character of `word`, for callers that restore
/// sentence-initial capitals.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn reattach(word: &str, punctuation: Option<char>) -> String {
    let mut corrected = String::with_capacity(word.len() + 1);
    corrected.push_str(word);
    if let Some(mark) = punctuation {
        corrected.push(mark);
    }
    corrected
}

fn unchanged(token: &str, tier: Tier) -> Correction {
    Correction {
        original: token.to_string(),
        corrected: token.to_string(),
        tier,
    }
}
