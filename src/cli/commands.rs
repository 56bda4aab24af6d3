//! Command implementations for the typofix CLI.

use std::fs;
use std::io::{self, Read};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{Result, TypofixError};
use crate::spelling::*;

/// Execute a CLI command.
pub fn execute_command(args: TypofixArgs) -> Result<()> {
    let model = Arc::new(load_model(&args.source)?);

    match &args.command {
        Command::Correct(correct_args) => correct_words(correct_args, model, &args),
        Command::Text(text_args) => correct_text(text_args, model, &args),
        Command::Suggest(suggest_args) => show_suggestions(suggest_args, model, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &model, &args),
        Command::Build(build_args) => build_model_file(build_args, &model, &args),
        Command::Edits(edits_args) => show_edits(edits_args, &model, &args),
    }
}

/// Load the frequency model from whichever source was given.
pub fn load_model(source: &ModelSource) -> Result<FrequencyModel> {
    let start = Instant::now();

    let model = if let Some(path) = &source.corpus {
        debug!("Counting words in corpus {}", path.display());
        FrequencyModel::from_file(path)?
    } else if let Some(path) = &source.frequency_file {
        FrequencyModel::load_frequency_file(path)?
    } else if let Some(path) = &source.snapshot {
        FrequencyModel::load_snapshot(path)?
    } else {
        return Err(TypofixError::invalid_argument(
            "One of --corpus, --frequency-file or --snapshot is required",
        ));
    };

    info!(
        "Loaded {} words ({} distinct) in {}ms",
        model.total(),
        model.vocabulary_size(),
        start.elapsed().as_millis()
    );
    Ok(model)
}

/// Build a corrector honoring `--config`.
fn create_corrector(model: Arc<FrequencyModel>, cli_args: &TypofixArgs) -> Result<Corrector> {
    match &cli_args.config {
        Some(path) => {
            debug!("Loading corrector config from {}", path.display());
            let config = CorrectorConfig::from_json_file(path)?;
            Corrector::with_config(model, config)
        }
        None => Ok(Corrector::new(model)),
    }
}

/// Correct each word given on the command line.
fn correct_words(
    args: &CorrectArgs,
    model: Arc<FrequencyModel>,
    cli_args: &TypofixArgs,
) -> Result<()> {
    let mut corrector = create_corrector(model, cli_args)?;

    let corrections: Vec<Correction> = args
        .words
        .iter()
        .map(|word| corrector.correct_detailed(word))
        .collect();

    output_result(
        "Corrections",
        &CorrectionReport {
            corrections,
            stats: corrector.stats(),
        },
        cli_args,
    )
}

/// Correct a text read from a file or stdin.
fn correct_text(args: &TextArgs, model: Arc<FrequencyModel>, cli_args: &TypofixArgs) -> Result<()> {
    let input = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut corrector = create_corrector(model, cli_args)?;
    let text = corrector.correct_text(&input);

    let tokens = input.split_whitespace().count();
    let changed_tokens = input
        .split_whitespace()
        .zip(text.split_whitespace())
        .filter(|(before, after)| before != after)
        .count();

    output_result(
        "Corrected text",
        &TextCorrectionResult {
            text,
            tokens,
            changed_tokens,
        },
        cli_args,
    )
}

/// Show ranked suggestions for one word.
fn show_suggestions(
    args: &SuggestArgs,
    model: Arc<FrequencyModel>,
    cli_args: &TypofixArgs,
) -> Result<()> {
    let corrector = create_corrector(model, cli_args)?;
    let suggestions = corrector.suggestions(&args.word, args.limit);

    output_result(
        &format!("Suggestions for '{}'", args.word),
        &SuggestionResults {
            word: args.word.clone(),
            suggestions,
        },
        cli_args,
    )
}

/// Show vocabulary statistics.
fn show_stats(args: &StatsArgs, model: &FrequencyModel, cli_args: &TypofixArgs) -> Result<()> {
    output_result(
        "Model statistics",
        &ModelStats {
            vocabulary_size: model.vocabulary_size(),
            total_words: model.total(),
            top_words: model.most_frequent(args.top),
        },
        cli_args,
    )
}

/// Write the loaded model as a frequency file or snapshot.
fn build_model_file(args: &BuildArgs, model: &FrequencyModel, cli_args: &TypofixArgs) -> Result<()> {
    if let Some(parent) = args.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    match args.kind {
        ModelFileKind::Frequency => model.save_frequency_file(&args.output)?,
        ModelFileKind::Snapshot => model.save_snapshot(&args.output)?,
    }
    let size_bytes = fs::metadata(&args.output)?.len();

    if cli_args.verbosity() > 1 {
        println!("Wrote {} to {}", format_bytes(size_bytes), args.output.display());
    }

    output_result(
        "Model file written",
        &BuildResult {
            path: args.output.to_string_lossy().to_string(),
            kind: args.kind,
            vocabulary_size: model.vocabulary_size(),
            total_words: model.total(),
            size_bytes,
        },
        cli_args,
    )
}

/// Count the candidates for a word and the vocabulary words among them.
fn show_edits(args: &EditsArgs, model: &FrequencyModel, cli_args: &TypofixArgs) -> Result<()> {
    let generator = CandidateGenerator::new();
    let key = args.word.to_lowercase();

    let candidates = match args.distance {
        1 => generator.edits1(&key),
        2 => generator.edits2(&key),
        other => {
            return Err(TypofixError::invalid_argument(format!(
                "Edit distance must be 1 or 2, got {other}"
            )));
        }
    };

    let mut known: Vec<String> = if args.list {
        candidates
            .iter()
            .filter(|candidate| model.contains(candidate))
            .cloned()
            .collect()
    } else {
        Vec::new()
    };
    known.sort();

    output_result(
        &format!("Edits of '{}' at distance {}", args.word, args.distance),
        &EditsResult {
            word: args.word.clone(),
            distance: args.distance,
            candidates: candidates.len(),
            known,
        },
        cli_args,
    )
}
