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

//! Label-aware precision, recall and F1
//!
//! A prediction is only correct when it names the right polarity: retrieving
//! a SUPPORT document and calling it CONTRADICT counts as predicted but not
//! correct.
//!
//! ## Degenerate counts
//!
//! No guard is applied to the divisions. With no predictions precision is
//! `0/0 = NaN`; with no relevant gold rows recall is NaN; when both are zero
//! or NaN, F1 is NaN. Callers decide how to display these.

use claimscore_core::MergedRecord;
use serde::{Deserialize, Serialize};

/// Raw counts behind precision and recall
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCounts {
    /// Gold rows labelled SUPPORT or CONTRADICT, retrieved or not
    pub n_relevant: usize,
    /// Rows the model labelled SUPPORT or CONTRADICT
    pub n_predicted: usize,
    /// Relevant rows whose predicted label matches gold
    pub n_correct: usize,
}

/// Precision, recall and F1 in [0, 1] units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct F1Scores {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl LabelCounts {
    /// Count over every merged row, including gold the model never retrieved
    pub fn from_rows(rows: &[MergedRecord]) -> Self {
        rows.iter().fold(Self::default(), |mut counts, row| {
            let decision = row.decision();
            if row.label.is_relevant() {
                counts.n_relevant += 1;
                if row.label == decision {
                    counts.n_correct += 1;
                }
            }
            if decision.is_relevant() {
                counts.n_predicted += 1;
            }
            counts
        })
    }

    pub fn scores(&self) -> F1Scores {
        let correct = self.n_correct as f64;
        let precision = correct / self.n_predicted as f64;
        let recall = correct / self.n_relevant as f64;
        let f1 = (2.0 * precision * recall) / (precision + recall);

        F1Scores {
            precision,
            recall,
            f1,
        }
    }
}

/// Precision, recall and F1 for one model's merged rows
pub fn f1_scores(rows: &[MergedRecord]) -> F1Scores {
    LabelCounts::from_rows(rows).scores()
}
