use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};
use walkdir::WalkDir;

use crate::config::ThreadmarkConfig;
use crate::conversation::ConversationRecord;
use crate::document::{assemble_document, build_header, ExportContext};
use crate::error::{ExportError, Result};
use crate::vocab::ExportVocabulary;

#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub show_progress: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("threadmark_out"),
            dry_run: false,
            show_progress: true,
        }
    }
}

/// What an export run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub written: usize,
    pub skipped: usize,
}

/// Export every conversation reachable from `input` as a markdown file.
///
/// `input` may be a single export file or a directory, which is walked for
/// `.json` files. Conversations that assemble to nothing are skipped with a
/// warning and counted, never treated as failures.
#[instrument(skip_all)]
pub fn export_path(
    input: &Path,
    opts: &ExportOptions,
    config: &ThreadmarkConfig,
    ctx: &dyn ExportContext,
) -> Result<ExportSummary> {
    let files = collect_input_files(input)?;
    if !opts.dry_run {
        fs::create_dir_all(&opts.output_dir)?;
    }

    let progress_bar = maybe_spinner_pb(opts.show_progress && !opts.dry_run);
    let header = build_header(ctx);
    let mut summary = ExportSummary::default();
    let mut used_slugs: HashMap<String, usize> = HashMap::new();

    for file in &files {
        let records = load_records(file, &config.vocabulary)?;
        debug!(path = %file.display(), count = records.len(), "loaded export file");

        for record in &records {
            match assemble_document(&header, record, &config.vocabulary) {
                Some(document) => {
                    let slug = unique_slug(record.title.as_deref(), &mut used_slugs);
                    let out_path = opts.output_dir.join(format!("{slug}.md"));
                    debug!(path = %out_path.display(), "writing export");
                    if !opts.dry_run {
                        fs::write(&out_path, document)?;
                    }
                    summary.written += 1;

                    if let Some(pb) = progress_bar.as_ref() {
                        pb.inc(1);
                        pb.set_message(slug);
                    }
                }
                None => {
                    warn!(
                        title = record.title.as_deref().unwrap_or("untitled"),
                        "conversation produced no output, skipping"
                    );
                    summary.skipped += 1;
                }
            }
        }
    }

    let finish = format!(
        "Exported {} conversation(s), skipped {}",
        summary.written, summary.skipped
    );
    if let Some(pb) = progress_bar {
        pb.finish_with_message(finish.clone());
    }
    info!("{finish}");

    Ok(summary)
}

/// Resolve the input path to the list of export files to read.
pub fn collect_input_files(input: &Path) -> Result<Vec<PathBuf>> {
    if !input.exists() {
        return Err(ExportError::path_not_found(input));
    }

    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext == "json")
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    // Deterministic order regardless of directory iteration
    files.sort();
    Ok(files)
}

/// Read one export file: either a single conversation object or the stock
/// account export, an array of conversations.
pub fn load_records(path: &Path, vocab: &ExportVocabulary) -> Result<Vec<ConversationRecord>> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| ExportError::json(path.display().to_string(), e))?;

    match value {
        Value::Array(items) => Ok(items
            .iter()
            .map(|item| ConversationRecord::from_export(item, vocab))
            .collect()),
        Value::Object(_) => Ok(vec![ConversationRecord::from_export(&value, vocab)]),
        _ => Err(ExportError::invalid_format(
            path,
            "expected a conversation object or an array of conversations",
        )),
    }
}

fn unique_slug(title: Option<&str>, used: &mut HashMap<String, usize>) -> String {
    let base = {
        let slug = slugify(&strip_leading_date(title.unwrap_or("conversation")));
        if slug.is_empty() {
            "conversation".to_string()
        } else {
            slug
        }
    };

    let count = used.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{base}-{count}")
    }
}

/// Remove a leading "YYYY-MM-DD" prefix and its trailing separator run
/// (whitespace, hyphens, colons) from a title.
fn strip_leading_date(s: &str) -> String {
    let bytes = s.as_bytes();
    let has_date = bytes.len() >= 10
        && bytes[..10].iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if has_date {
        let rest = &s[10..];
        let stripped =
            rest.trim_start_matches(|c: char| c.is_whitespace() || c == '-' || c == ':');
        // The date must be followed by a separator, otherwise it is part of
        // the title
        if stripped.len() < rest.len() {
            return stripped.trim().to_string();
        }
    }

    s.trim().to_string()
}

/// Convert string to filesystem-safe slug
fn slugify(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            'A'..='Z' => c.to_ascii_lowercase(),
            _ => '-',
        })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(100) // Limit length
        .collect()
}

fn new_spinner_pb() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} exported {pos}: {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn maybe_spinner_pb(show_progress: bool) -> Option<ProgressBar> {
    if !show_progress {
        return None;
    }
    let pb = new_spinner_pb();
    if pb.is_hidden() {
        None
    } else {
        Some(pb)
    }
}
