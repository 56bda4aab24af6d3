//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{ModelFileKind, OutputFormat, TypofixArgs};
use crate::error::Result;
use crate::spelling::{Correction, CorrectorStats, Suggestion};

/// Result structure for word corrections.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionReport {
    pub corrections: Vec<Correction>,
    pub stats: CorrectorStats,
}

/// Result structure for text correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TextCorrectionResult {
    pub text: String,
    pub tokens: usize,
    pub changed_tokens: usize,
}

/// Result structure for suggestions.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResults {
    pub word: String,
    pub suggestions: Vec<Suggestion>,
}

/// Model statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelStats {
    pub vocabulary_size: usize,
    pub total_words: u64,
    pub top_words: Vec<(String, u64)>,
}

/// Result structure for model file creation.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub path: String,
    pub kind: ModelFileKind,
    pub vocabulary_size: usize,
    pub total_words: u64,
    pub size_bytes: u64,
}

/// Result structure for candidate generation.
#[derive(Debug, Serialize, Deserialize)]
pub struct EditsResult {
    pub word: String,
    pub distance: u8,
    pub candidates: usize,
    pub known: Vec<String>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &TypofixArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &TypofixArgs) -> Result<()> {
    if args.verbosity() > 1 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    match result {
        _ if std::any::type_name::<T>().contains("CorrectionReport") => {
            output_corrections_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("TextCorrectionResult") => {
            output_text_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("SuggestionResults") => {
            output_suggestions_human(&value, args)
        }
        _ if std::any::type_name::<T>().contains("ModelStats") => {
            output_model_stats_human(&value, args)
        }
        _ => {
            // Generic output for other types
            output_generic_human(&value, args)
        }
    }
}

/// Output corrections in human format, one `original -> corrected` line each.
fn output_corrections_human(value: &serde_json::Value, args: &TypofixArgs) -> Result<()> {
    if let Some(corrections) = value.get("corrections").and_then(|c| c.as_array()) {
        for correction in corrections {
            let original = correction.get("original").and_then(|o| o.as_str()).unwrap_or("");
            let corrected = correction
                .get("corrected")
                .and_then(|c| c.as_str())
                .unwrap_or("");
            let tier = correction.get("tier").and_then(|t| t.as_str()).unwrap_or("");

            if args.verbosity() > 1 {
                println!("{original} -> {corrected} ({tier})");
            } else {
                println!("{original} -> {corrected}");
            }
        }
    }

    if args.verbosity() > 2
        && let Some(stats) = value.get("stats")
    {
        println!();
        output_generic_human(stats, args)?;
    }
    Ok(())
}

/// Output a corrected text exactly as produced.
fn output_text_human(value: &serde_json::Value, args: &TypofixArgs) -> Result<()> {
    if let Some(text) = value.get("text").and_then(|t| t.as_str()) {
        print!("{text}");
    }

    if args.verbosity() > 1 {
        let tokens = value.get("tokens").and_then(|t| t.as_u64()).unwrap_or(0);
        let changed = value
            .get("changed_tokens")
            .and_then(|c| c.as_u64())
            .unwrap_or(0);
        eprintln!("Corrected {changed} of {tokens} tokens");
    }
    Ok(())
}

/// Output suggestions in human format.
fn output_suggestions_human(value: &serde_json::Value, _args: &TypofixArgs) -> Result<()> {
    let word = value.get("word").and_then(|w| w.as_str()).unwrap_or("");
    let suggestions = value
        .get("suggestions")
        .and_then(|s| s.as_array())
        .cloned()
        .unwrap_or_default();

    if suggestions.is_empty() {
        println!("No suggestions for '{word}'");
        return Ok(());
    }

    println!("Suggestions for '{word}':");
    for (i, suggestion) in suggestions.iter().enumerate() {
        let text = suggestion.get("word").and_then(|w| w.as_str()).unwrap_or("");
        let count = suggestion.get("count").and_then(|c| c.as_u64()).unwrap_or(0);
        let probability = suggestion
            .get("probability")
            .and_then(|p| p.as_f64())
            .unwrap_or(0.0);
        let distance = suggestion
            .get("distance")
            .and_then(|d| d.as_u64())
            .unwrap_or(0);
        println!(
            "  {}. {text} (count: {count}, probability: {probability:.6}, distance: {distance})",
            i + 1
        );
    }
    Ok(())
}

/// Output model statistics in human format.
fn output_model_stats_human(value: &serde_json::Value, _args: &TypofixArgs) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Model Statistics:");
        println!("════════════════");

        if let Some(vocabulary) = obj.get("vocabulary_size").and_then(|v| v.as_u64()) {
            println!("Vocabulary size: {vocabulary}");
        }

        if let Some(total) = obj.get("total_words").and_then(|t| t.as_u64()) {
            println!("Total words: {total}");
        }

        if let Some(top) = obj.get("top_words").and_then(|t| t.as_array())
            && !top.is_empty()
        {
            println!();
            println!("Most frequent words:");
            println!("───────────────────");
            for entry in top {
                if let Some(arr) = entry.as_array()
                    && arr.len() >= 2
                {
                    let word = arr[0].as_str().unwrap_or("unknown");
                    let count = arr[1].as_u64().unwrap_or(0);
                    println!("  {word} ({count})");
                }
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value, _args: &TypofixArgs) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &TypofixArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

/// Format bytes into human-readable format.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
