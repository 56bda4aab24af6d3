use std::fs;
use std::sync::Arc;

use tempfile::TempDir;
use typofix::error::{Result, TypofixError};
use typofix::spelling::{
    Corrector, CorrectorConfig, FrequencyModel, SharedCorrector, Tier, capitalize_first,
};

const CORPUS: &str = "\
The quick brown fox jumps over the lazy dog. The dog sleeps.
Spelling correction is the art of finding the word the writer meant.
A good speller knows the words of the language, and the words know the speller.
Hello world, hello there, hello again!
";

#[test]
fn corrector_from_corpus_file_fixes_common_typos() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("corpus.txt");
    fs::write(&path, CORPUS)?;

    let model = Arc::new(FrequencyModel::from_file(&path)?);
    let mut corrector = Corrector::new(Arc::clone(&model));

    assert_eq!(corrector.correct("teh"), "the");
    assert_eq!(corrector.correct("helo!"), "hello!");
    assert_eq!(corrector.correct("wrold"), "world");
    assert_eq!(corrector.correct("speling"), "spelling");
    assert_eq!(corrector.correct("correctoin,"), "correction,");
    assert_eq!(corrector.correct("xqzvwkj"), "xqzvwkj");
    Ok(())
}

#[test]
fn every_vocabulary_word_maps_to_itself() -> Result<()> {
    let model = Arc::new(FrequencyModel::build(CORPUS.as_bytes())?);
    let mut corrector = Corrector::new(Arc::clone(&model));

    for (word, _) in model.iter() {
        let correction = corrector.correct_detailed(word);
        assert_eq!(correction.corrected, word);
        assert_eq!(correction.tier, Tier::Exact);
    }
    assert_eq!(corrector.stats().candidate_searches, 0);
    Ok(())
}

#[test]
fn model_total_matches_sum_of_counts() -> Result<()> {
    let model = FrequencyModel::build(CORPUS.as_bytes())?;

    let sum: u64 = model.iter().map(|(_, count)| count).sum();
    assert_eq!(model.total(), sum);
    assert!(model.iter().all(|(word, count)| count > 0 && word == word.to_lowercase()));

    let probability_sum: f64 = model.iter().map(|(word, _)| model.probability(word)).sum();
    assert!((probability_sum - 1.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn repeated_correction_is_served_from_cache() -> Result<()> {
    let mut corrector = Corrector::from_corpus(CORPUS.as_bytes())?;

    let first = corrector.correct_detailed("speler");
    let second = corrector.correct_detailed("speler");

    assert_eq!(first.corrected, second.corrected);
    assert_ne!(first.tier, Tier::Cached);
    assert_eq!(second.tier, Tier::Cached);

    let stats = corrector.stats();
    assert_eq!(stats.candidate_searches, 1);
    assert_eq!(stats.cache_hits, 1);
    Ok(())
}

#[test]
fn snapshot_and_frequency_file_give_identical_corrections() -> Result<()> {
    let dir = TempDir::new()?;
    let snapshot_path = dir.path().join("model.bin");
    let frequency_path = dir.path().join("counts.txt");

    let model = FrequencyModel::build(CORPUS.as_bytes())?;
    model.save_snapshot(&snapshot_path)?;
    model.save_frequency_file(&frequency_path)?;

    let tokens = ["teh", "helo", "wrds", "langauge.", "qqqqqq", "The"];
    let mut reference = Corrector::new(Arc::new(model));
    let mut from_snapshot = Corrector::new(Arc::new(FrequencyModel::load_snapshot(&snapshot_path)?));
    let mut from_frequency =
        Corrector::new(Arc::new(FrequencyModel::load_frequency_file(&frequency_path)?));

    for token in tokens {
        let expected = reference.correct(token);
        assert_eq!(from_snapshot.correct(token), expected);
        assert_eq!(from_frequency.correct(token), expected);
    }
    Ok(())
}

#[test]
fn malformed_frequency_file_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("counts.txt");
    fs::write(&path, "the 10\nhello many\n")?;

    let result = FrequencyModel::load_frequency_file(&path);
    assert!(matches!(result, Err(TypofixError::Corpus(_))));
    Ok(())
}

#[test]
fn corrupted_snapshot_is_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("model.bin");
    fs::write(&path, [0xffu8, 0x00, 0x13, 0x37])?;

    assert!(FrequencyModel::load_snapshot(&path).is_err());
    Ok(())
}

#[test]
fn empty_corpus_yields_identity_corrections() -> Result<()> {
    let mut corrector = Corrector::from_corpus(b"")?;

    assert!(corrector.model().is_empty());
    for token in ["teh", "Hello!", "zzz", "."] {
        assert_eq!(corrector.correct(token), token);
    }
    Ok(())
}

#[test]
fn invalid_utf8_corpus_is_an_error() {
    let result = Corrector::from_corpus(&[0x68, 0x65, 0xff, 0x6c]);
    assert!(matches!(result, Err(TypofixError::Corpus(_))));
}

#[test]
fn text_correction_keeps_layout() -> Result<()> {
    let mut corrector = Corrector::from_corpus(CORPUS.as_bytes())?;

    let corrected = corrector.correct_text("teh  quikc\tbrwn fox!\n");
    assert_eq!(corrected, "the  quick\tbrown fox!\n");
    Ok(())
}

#[test]
fn batch_correction_matches_sequential() -> Result<()> {
    let model = Arc::new(FrequencyModel::build(CORPUS.as_bytes())?);
    let tokens: Vec<String> = "teh quikc brwn fxo jumsp ovr teh lazzy dgo helo wrold xqzvwkj!"
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let mut sequential = Corrector::new(Arc::clone(&model));
    let expected: Vec<String> = tokens.iter().map(|t| sequential.correct(t)).collect();

    let mut batched = Corrector::new(model);
    assert_eq!(batched.correct_batch(&tokens), expected);
    assert_eq!(batched.stats(), sequential.stats());
    Ok(())
}

#[test]
fn shared_corrector_serves_many_threads() -> Result<()> {
    let shared = Arc::new(SharedCorrector::new(Corrector::from_corpus(
        CORPUS.as_bytes(),
    )?));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let shared = Arc::clone(&shared);
            scope.spawn(move || {
                assert_eq!(shared.correct("teh"), "the");
                assert_eq!(shared.correct("helo"), "hello");
            });
        }
    });

    let stats = shared.stats();
    assert_eq!(stats.lookups, 16);
    assert_eq!(stats.candidate_searches, 2);
    Ok(())
}

#[test]
fn restricted_distance_skips_far_candidates() -> Result<()> {
    let model = Arc::new(FrequencyModel::build(CORPUS.as_bytes())?);
    let config = CorrectorConfig {
        max_distance: 1,
        ..Default::default()
    };
    let mut corrector = Corrector::with_config(model, config)?;

    assert_eq!(corrector.correct("teh"), "the");
    // Two swapped pairs are two edits away from "language".
    assert_eq!(corrector.correct("lnagauge"), "lnagauge");
    Ok(())
}

#[test]
fn suggestions_are_ranked_and_capitalization_can_be_restored() -> Result<()> {
    let corrector = Corrector::from_corpus(CORPUS.as_bytes())?;

    let suggestions = corrector.suggestions("wrds", 3);
    assert!(!suggestions.is_empty());
    assert_eq!(suggestions[0].word, "words");
    assert!(suggestions.windows(2).all(|w| w[0].count >= w[1].count));

    assert_eq!(capitalize_first(&suggestions[0].word), "Words");
    Ok(())
}
