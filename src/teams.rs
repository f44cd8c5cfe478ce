//! Batch recalculation of `primary_color` across a `teams.json` record list.
//!
//! Records are kept as raw JSON objects so fields this module does not know about survive a rewrite untouched.
//! Extraction runs in parallel; results are applied in record order, so the written file is deterministic.

use crate::{extract, is_valid_hex, open, ExtractionConfig, ExtractionError, ExtractionResult};
use rayon::prelude::*;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const LOGO_URL_FIELD: &str = "logo_url";
pub const PRIMARY_COLOR_FIELD: &str = "primary_color";
pub const TEAM_NAME_FIELD: &str = "team_name";
pub const LEAGUE_CODE_FIELD: &str = "league_code";

/// Failures that stop a whole batch run. Per-logo failures never do; they are counted in [`RecalcSummary`].
#[derive(Error, Debug)]
pub enum TeamsError {
    #[error("cannot access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} must contain a JSON array of team records", .path.display())]
    NotAnArray { path: PathBuf },
}

/// Where logo paths from `logo_url` are looked up, in order.
#[derive(Debug, Clone)]
pub struct LogoRoots {
    candidates: Vec<PathBuf>,
}

impl LogoRoots {
    pub fn new(logo_root: impl Into<PathBuf>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![logo_root.into(), repo_root.into()],
        }
    }

    /// The first candidate root under which `logo_url` names an existing file.
    pub fn resolve(&self, logo_url: &str) -> Option<PathBuf> {
        self.candidates
            .iter()
            .map(|root| root.join(logo_url))
            .find(|path| path.is_file())
    }

    pub fn candidates(&self, logo_url: &str) -> Vec<PathBuf> {
        self.candidates.iter().map(|root| root.join(logo_url)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RecalcOptions {
    /// Leave records alone whose `primary_color` is already a valid hex color.
    pub only_missing: bool,
}

/// Per-run accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecalcSummary {
    pub updated: usize,
    pub unchanged: usize,
    pub already_valid: usize,
    pub skipped_no_logo: usize,
    pub skipped_error: usize,
}

impl RecalcSummary {
    pub fn processed(&self) -> usize {
        self.updated + self.unchanged + self.already_valid + self.skipped_no_logo + self.skipped_error
    }
}

pub fn load(path: &Path) -> Result<Vec<Value>, TeamsError> {
    let text = std::fs::read_to_string(path).map_err(|source| TeamsError::Io {
        path: path.to_owned(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| TeamsError::Json {
        path: path.to_owned(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        _ => Err(TeamsError::NotAnArray { path: path.to_owned() }),
    }
}

/// Write records back pretty-printed with two-space indentation and a trailing newline.
pub fn save(path: &Path, records: &[Value]) -> Result<(), TeamsError> {
    let mut text = serde_json::to_string_pretty(records).map_err(|source| TeamsError::Json {
        path: path.to_owned(),
        source,
    })?;
    text.push('\n');

    std::fs::write(path, text).map_err(|source| TeamsError::Io {
        path: path.to_owned(),
        source,
    })
}

enum Job {
    Extract { index: usize, logo: PathBuf },
    AlreadyValid,
    NoLogo,
}

/// Recompute `primary_color` for every record in place.
///
/// A record whose logo is missing or cannot be processed keeps its current color. An invalid `config` fails each
/// extraction on its own, and those records are counted in [`RecalcSummary::skipped_error`].
pub fn recalculate(
    records: &mut [Value],
    roots: &LogoRoots,
    config: &ExtractionConfig,
    options: RecalcOptions,
) -> RecalcSummary {
    let mut summary = RecalcSummary::default();
    let mut work = Vec::new();

    for (index, record) in records.iter().enumerate() {
        match plan(index, record, roots, options) {
            Job::Extract { index, logo } => work.push((index, logo)),
            Job::AlreadyValid => summary.already_valid += 1,
            Job::NoLogo => summary.skipped_no_logo += 1,
        }
    }

    let results: Vec<(usize, &Path, Result<ExtractionResult, ExtractionError>)> = work
        .par_iter()
        .map(|(index, logo)| (*index, logo.as_path(), open(logo).and_then(|image| extract(&image, config))))
        .collect();

    for (index, logo, result) in results {
        let record = &mut records[index];

        match result {
            Ok(result) => {
                if apply(record, result.hex()) {
                    summary.updated += 1;
                } else {
                    summary.unchanged += 1;
                }
            }
            Err(e) => {
                tracing::warn!("skipping {} ({}): {}", describe(record), logo.display(), e);
                summary.skipped_error += 1;
            }
        }
    }

    summary
}

fn plan(index: usize, record: &Value, roots: &LogoRoots, options: RecalcOptions) -> Job {
    if options.only_missing && record.get(PRIMARY_COLOR_FIELD).and_then(Value::as_str).is_some_and(is_valid_hex) {
        return Job::AlreadyValid;
    }

    let logo_url = match record.get(LOGO_URL_FIELD).and_then(Value::as_str) {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Job::NoLogo,
    };

    match roots.resolve(logo_url) {
        Some(logo) => Job::Extract { index, logo },
        None => {
            let tried = roots
                .candidates(logo_url)
                .iter()
                .map(|path| path.display().to_string())
                .collect::<Vec<_>>()
                .join(" or ");
            tracing::warn!("logo file not found for {} at {}", describe(record), tried);
            Job::NoLogo
        }
    }
}

/// Returns whether the stored color changed.
fn apply(record: &mut Value, hex: &str) -> bool {
    let old = record.get(PRIMARY_COLOR_FIELD).and_then(Value::as_str).map(str::to_owned);
    if old.as_deref() == Some(hex) {
        return false;
    }

    tracing::info!(
        "{}: {} -> {}",
        describe(record),
        old.as_deref().unwrap_or("none"),
        hex
    );

    if let Value::Object(fields) = record {
        fields.insert(PRIMARY_COLOR_FIELD.to_owned(), Value::String(hex.to_owned()));
        true
    } else {
        false
    }
}

fn describe(record: &Value) -> String {
    let field = |name: &str| record.get(name).and_then(Value::as_str).unwrap_or("?");
    format!("{} - {}", field(LEAGUE_CODE_FIELD), field(TEAM_NAME_FIELD))
}
