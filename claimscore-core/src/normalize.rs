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

//! Record normalization
//!
//! Flattens nested gold claims into [`GoldRecord`] rows and derives the best
//! non-NEI class for each raw prediction. Both transforms are pure maps over
//! their input; nothing is filtered except on malformed input, which fails
//! the whole batch.

use crate::{
    Claim, ClaimscoreError, GoldRecord, Label, PredictionRecord, Result, ScoredPrediction,
};

/// Flatten claims into one gold row per (claim, evidence document)
pub fn flatten_claims(claims: &[Claim]) -> Result<Vec<GoldRecord>> {
    let mut rows = Vec::with_capacity(claims.iter().map(|c| c.evidence.len()).sum());

    for claim in claims {
        for (doc_id, evidence) in &claim.evidence {
            if !evidence.label.is_relevant() {
                return Err(ClaimscoreError::InvalidInput(format!(
                    "claim {} has NEI gold evidence for doc {}",
                    claim.id, doc_id
                )));
            }
            rows.push(GoldRecord {
                claim_id: claim.id,
                doc_id: *doc_id,
                label: evidence.label,
            });
        }
    }

    Ok(rows)
}

/// Best non-NEI class and its probability. Ties go to SUPPORT.
pub fn best_class(p_support: f64, p_contradict: f64) -> (Label, f64) {
    if p_contradict > p_support {
        (Label::Contradict, p_contradict)
    } else {
        (Label::Support, p_support)
    }
}

/// Validate a raw prediction and attach its best class
pub fn score_prediction(record: PredictionRecord) -> Result<ScoredPrediction> {
    for (name, p) in [
        ("p_support", record.p_support),
        ("p_contradict", record.p_contradict),
    ] {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ClaimscoreError::InvalidInput(format!(
                "{} = {} out of range for model {}, claim {}, doc {}",
                name, p, record.model, record.claim_id, record.doc_id
            )));
        }
    }

    let (best_label, best_score) = best_class(record.p_support, record.p_contradict);
    Ok(ScoredPrediction {
        record,
        best_label,
        best_score,
    })
}

/// Score every raw prediction, failing on the first malformed row
pub fn score_predictions(records: Vec<PredictionRecord>) -> Result<Vec<ScoredPrediction>> {
    records.into_iter().map(score_prediction).collect()
}
