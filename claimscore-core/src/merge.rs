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

//! Merge engine: full outer join of gold rows and one model's predictions.
//!
//! Join semantics:
//! - gold only: the model never retrieved the document. Prediction fields stay
//!   `None`; the row still counts toward the recall denominator.
//! - prediction only: the document is not gold evidence, so the gold label is
//!   filled with NEI.
//! - both: gold label plus prediction fields.
//!
//! Output rows are ordered by ascending (claim_id, doc_id).

use std::collections::{BTreeMap, HashSet};
use tracing::{debug, warn};

use crate::{
    normalize::flatten_claims, Claim, ClaimscoreError, EvidenceKey, GoldRecord, Label,
    MergedRecord, Result, ScoredPrediction,
};

/// Read-only gold labels keyed by (claim_id, doc_id), shared across models
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GoldTable {
    labels: BTreeMap<EvidenceKey, Label>,
}

impl GoldTable {
    /// Build from flattened rows; a repeated key is malformed input
    pub fn from_records(records: impl IntoIterator<Item = GoldRecord>) -> Result<Self> {
        let mut labels = BTreeMap::new();
        for record in records {
            if labels.insert(record.key(), record.label).is_some() {
                return Err(ClaimscoreError::InvalidInput(format!(
                    "duplicate gold evidence for claim {}, doc {}",
                    record.claim_id, record.doc_id
                )));
            }
        }
        Ok(Self { labels })
    }

    pub fn from_claims(claims: &[Claim]) -> Result<Self> {
        Self::from_records(flatten_claims(claims)?)
    }

    pub fn get(&self, key: &EvidenceKey) -> Option<Label> {
        self.labels.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Gold rows with a SUPPORT or CONTRADICT label
    pub fn n_relevant(&self) -> usize {
        self.labels.values().filter(|l| l.is_relevant()).count()
    }

    pub fn records(&self) -> impl Iterator<Item = GoldRecord> + '_ {
        self.labels.iter().map(|(&(claim_id, doc_id), &label)| GoldRecord {
            claim_id,
            doc_id,
            label,
        })
    }
}

/// Group predictions by model name, in sorted model order
pub fn group_by_model(predictions: &[ScoredPrediction]) -> BTreeMap<&str, Vec<&ScoredPrediction>> {
    let mut groups: BTreeMap<&str, Vec<&ScoredPrediction>> = BTreeMap::new();
    for prediction in predictions {
        groups.entry(prediction.model()).or_default().push(prediction);
    }
    groups
}

/// Outer-join gold with a single model's prediction slice
///
/// The same (claim_id, doc_id) appearing twice in one model's slice is
/// rejected, since it would double count in every metric.
pub fn merge_model<'a>(
    gold: &GoldTable,
    model: &str,
    predictions: impl IntoIterator<Item = &'a ScoredPrediction>,
) -> Result<Vec<MergedRecord>> {
    let mut merged: BTreeMap<EvidenceKey, MergedRecord> = gold
        .records()
        .map(|g| (g.key(), MergedRecord::unretrieved(&g)))
        .collect();

    let mut seen = HashSet::new();
    let mut unmatched = 0usize;

    for prediction in predictions {
        let key = prediction.key();
        if !seen.insert(key) {
            return Err(ClaimscoreError::DuplicatePrediction {
                model: model.to_string(),
                claim_id: key.0,
                doc_id: key.1,
            });
        }

        let gold_label = gold.get(&key);
        if gold_label.is_none() {
            unmatched += 1;
        }
        merged.insert(key, MergedRecord::retrieved(prediction, gold_label));
    }

    if unmatched > 0 {
        warn!(
            model,
            unmatched, "predictions reference documents outside the gold evidence set"
        );
    }
    debug!(
        model,
        gold_rows = gold.len(),
        retrieved = seen.len(),
        merged_rows = merged.len(),
        "merged gold and predictions"
    );

    Ok(merged.into_values().collect())
}
