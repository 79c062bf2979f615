// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Readers for the claims file (JSON Lines) and the prediction table
//! (CSV or JSON Lines).

use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::info;

use crate::{Claim, ClaimscoreError, PredictionRecord, Result};

/// On-disk layout of a prediction table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionFormat {
    Csv,
    JsonLines,
}

impl PredictionFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("jsonl") | Some("json") => Ok(Self::JsonLines),
            _ => Err(ClaimscoreError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| ClaimscoreError::io(path, e))
}

/// Parse JSON Lines from any reader, skipping blank lines
pub fn read_jsonl<T: DeserializeOwned>(reader: impl Read, path: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for (idx, line) in BufReader::new(reader).lines().enumerate() {
        let line = line.map_err(|e| ClaimscoreError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let item = serde_json::from_str(&line).map_err(|source| ClaimscoreError::Json {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        items.push(item);
    }
    Ok(items)
}

/// Parse a headed CSV prediction table; an empty `rank` cell reads as absent
/// and a whole-number float such as `4.0` reads as an integer rank
pub fn read_predictions_csv(reader: impl Read, path: &Path) -> Result<Vec<PredictionRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize()
        .map(|row| {
            row.map_err(|source| ClaimscoreError::Csv {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}

/// Load every claim from a JSON Lines file
pub fn load_claims(path: impl AsRef<Path>) -> Result<Vec<Claim>> {
    let path = path.as_ref();
    let claims: Vec<Claim> = read_jsonl(open(path)?, path)?;
    info!(path = %path.display(), claims = claims.len(), "loaded claims");
    Ok(claims)
}

/// Load the prediction table, choosing the parser by extension
pub fn load_predictions(path: impl AsRef<Path>) -> Result<Vec<PredictionRecord>> {
    let path = path.as_ref();
    let records = match PredictionFormat::from_path(path)? {
        PredictionFormat::Csv => read_predictions_csv(open(path)?, path)?,
        PredictionFormat::JsonLines => read_jsonl(open(path)?, path)?,
    };
    info!(path = %path.display(), rows = records.len(), "loaded predictions");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Label;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            PredictionFormat::from_path(Path::new("preds.CSV")).unwrap(),
            PredictionFormat::Csv
        );
        assert_eq!(
            PredictionFormat::from_path(Path::new("preds.jsonl")).unwrap(),
            PredictionFormat::JsonLines
        );
        assert!(PredictionFormat::from_path(Path::new("preds.parquet")).is_err());
    }

    #[test]
    fn test_csv_empty_rank_is_absent() {
        let data = "model,claim_id,doc_id,predicted_label,rank,p_support,p_contradict\n\
                    m,1,10,SUPPORT,1,0.9,0.1\n\
                    m,1,11,NEI,,0.2,0.3\n";
        let rows = read_predictions_csv(data.as_bytes(), Path::new("inline.csv")).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rank, Some(1));
        assert_eq!(rows[1].rank, None);
        assert_eq!(rows[1].predicted_label, Label::NotRelevant);
    }

    #[test]
    fn test_csv_float_rank_column() {
        let data = "model,claim_id,doc_id,predicted_label,rank,p_support,p_contradict\n\
                    m,1,10,SUPPORT,2.0,0.9,0.1\n\
                    m,1,11,NEI,,0.2,0.3\n";
        let rows = read_predictions_csv(data.as_bytes(), Path::new("inline.csv")).unwrap();
        assert_eq!(rows[0].rank, Some(2));
        assert_eq!(rows[1].rank, None);

        let fractional = "model,claim_id,doc_id,predicted_label,rank,p_support,p_contradict\n\
                          m,1,10,SUPPORT,2.5,0.9,0.1\n";
        assert!(read_predictions_csv(fractional.as_bytes(), Path::new("inline.csv")).is_err());
    }

    #[test]
    fn test_csv_bad_label_fails() {
        let data = "model,claim_id,doc_id,predicted_label,rank,p_support,p_contradict\n\
                    m,1,10,PERHAPS,1,0.9,0.1\n";
        assert!(read_predictions_csv(data.as_bytes(), Path::new("inline.csv")).is_err());
    }

    #[test]
    fn test_jsonl_reports_line_number() {
        let data = "{\"id\": 1, \"claim\": \"x\", \"evidence\": {}}\n\n{\"id\": \"oops\"}\n";
        let err = read_jsonl::<Claim>(data.as_bytes(), Path::new("claims.jsonl")).unwrap_err();
        match err {
            ClaimscoreError::Json { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }
}
