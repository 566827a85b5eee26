//! GeoJSON text sequences: one GeoJSON text per line, optionally prefixed
//! with the RFC 8142 record separator.

use super::config::ValidatorConfig;
use super::geojson::Feature;
use super::issue::ValidationResult;
use super::validator::Validator;
use rayon::prelude::*;
use serde_json::Value;
use std::io::{BufRead, Write};
use thiserror::Error;
use tracing::{debug, warn};

const RECORD_SEPARATOR: char = '\u{1e}';

#[derive(Debug, Error)]
pub enum SeqError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: not a JSON text: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("unable to serialize record: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug)]
pub struct SeqRecord {
    /// 1-based line number in the input.
    pub line: usize,
    pub outcome: Result<ValidationResult, SeqError>,
}

impl SeqRecord {
    pub fn is_valid(&self) -> bool {
        match &self.outcome {
            Ok(result) => result.is_valid(),
            Err(_) => false,
        }
    }
}

fn record_text(line: &str) -> Option<&str> {
    let text = line.trim().trim_start_matches(RECORD_SEPARATOR).trim();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn validate_records(records: Vec<(usize, String)>, config: &ValidatorConfig) -> Vec<SeqRecord> {
    let validator = Validator::new(config.clone());
    let records: Vec<SeqRecord> = records
        .into_par_iter()
        .map(|(line, text)| {
            let outcome = serde_json::from_str::<Value>(&text)
                .map(|document| validator.validate(&document, None))
                .map_err(|source| {
                    warn!(line, error = %source, "skipping record that is not JSON");
                    SeqError::Parse { line, source }
                });
            SeqRecord { line, outcome }
        })
        .collect();
    debug!(
        records = records.len(),
        invalid = records.iter().filter(|r| !r.is_valid()).count(),
        "validated GeoJSON text sequence"
    );
    records
}

/// Validate every non-blank line of `text`. Records come back in input order.
///
/// ```
/// use geoschema::seq::validate_text;
/// use geoschema::ValidatorConfig;
///
/// let text = "{\"type\": \"Point\", \"coordinates\": [1, 2]}\n\n{\"type\": \"Point\"}\n";
/// let records = validate_text(text, &ValidatorConfig::default());
/// assert_eq!(records.len(), 2);
/// assert!(records[0].is_valid());
/// assert_eq!(records[1].line, 3);
/// assert!(!records[1].is_valid());
/// ```
pub fn validate_text(text: &str, config: &ValidatorConfig) -> Vec<SeqRecord> {
    let records = text
        .lines()
        .enumerate()
        .filter_map(|(index, line)| Some((index + 1, record_text(line)?.to_string())))
        .collect();
    validate_records(records, config)
}

/// Like [`validate_text`], reading lines from `reader`; fails only on I/O errors.
pub fn validate_reader(
    reader: impl BufRead,
    config: &ValidatorConfig,
) -> Result<Vec<SeqRecord>, SeqError> {
    let mut records = vec![];
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(text) = record_text(&line) {
            records.push((index + 1, text.to_string()));
        }
    }
    Ok(validate_records(records, config))
}

/// Write `features` as a GeoJSON text sequence, one feature per line.
pub fn write_seq(mut writer: impl Write, features: &[Feature]) -> Result<(), SeqError> {
    for feature in features {
        let json = serde_json::to_string(feature).map_err(SeqError::Serialize)?;
        writeln!(writer, "{}", json)?;
    }
    writer.flush()?;
    debug!(records = features.len(), "wrote GeoJSON text sequence");
    Ok(())
}
