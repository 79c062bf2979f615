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

//! Error types for loading and normalizing evaluation inputs.
//!
//! Every variant here is an input error: the run is aborted and no partial
//! results are produced. Degenerate metric values (NaN precision and the like)
//! are not errors and never flow through this type.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout claimscore-core
pub type Result<T> = std::result::Result<T, ClaimscoreError>;

/// Errors raised while reading or normalizing gold and prediction records
#[derive(Debug, Error)]
pub enum ClaimscoreError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {path} at line {line}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Unknown label: {0:?}")]
    InvalidLabel(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Duplicate prediction for model {model}: claim {claim_id}, doc {doc_id}")]
    DuplicatePrediction {
        model: String,
        claim_id: u64,
        doc_id: u64,
    },

    #[error("Unsupported prediction format: {0}")]
    UnsupportedFormat(String),
}

impl ClaimscoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
