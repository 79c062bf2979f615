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

//! Flat record types consumed by the merge engine and metrics.

use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Label;

/// Join key shared by gold and prediction rows
pub type EvidenceKey = (u64, u64);

/// One flattened (claim, document, label) gold row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoldRecord {
    pub claim_id: u64,
    pub doc_id: u64,
    pub label: Label,
}

impl GoldRecord {
    pub fn key(&self) -> EvidenceKey {
        (self.claim_id, self.doc_id)
    }
}

/// One raw prediction row: a model's verdict on a retrieved document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub model: String,
    pub claim_id: u64,
    pub doc_id: u64,
    /// The three-way decision scored by F1
    pub predicted_label: Label,
    /// Retrieval rank; absent when the model produced no ranking.
    ///
    /// Whole-number floats such as `3.0` are accepted, since dataframe
    /// exports write a nullable integer column that way.
    #[serde(default, deserialize_with = "deserialize_rank")]
    pub rank: Option<u32>,
    pub p_support: f64,
    pub p_contradict: f64,
}

struct RankVisitor;

impl<'de> Visitor<'de> for RankVisitor {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative whole-number rank")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
        u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
        u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
        if v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v) {
            Ok(v as u32)
        } else {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
        match v.trim().parse::<f64>() {
            Ok(parsed) => self.visit_f64(parsed),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

struct Rank(u32);

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RankVisitor).map(Rank)
    }
}

fn deserialize_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Rank>::deserialize(deserializer)?.map(|rank| rank.0))
}

impl PredictionRecord {
    pub fn key(&self) -> EvidenceKey {
        (self.claim_id, self.doc_id)
    }
}

/// A prediction augmented with its best non-NEI class and that class's score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPrediction {
    #[serde(flatten)]
    pub record: PredictionRecord,
    pub best_label: Label,
    pub best_score: f64,
}

impl ScoredPrediction {
    pub fn model(&self) -> &str {
        &self.record.model
    }

    pub fn key(&self) -> EvidenceKey {
        self.record.key()
    }
}

/// Outer join of gold and one model's predictions on (claim_id, doc_id)
///
/// Prediction-side fields stay `None` for gold rows the model never retrieved;
/// those rows still count toward the recall denominator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub claim_id: u64,
    pub doc_id: u64,
    /// Gold label, NEI when the document is not gold evidence
    pub label: Label,
    pub predicted_label: Option<Label>,
    pub rank: Option<u32>,
    pub best_label: Option<Label>,
    pub best_score: Option<f64>,
}

impl MergedRecord {
    /// Row for a gold item the model never retrieved
    pub fn unretrieved(gold: &GoldRecord) -> Self {
        Self {
            claim_id: gold.claim_id,
            doc_id: gold.doc_id,
            label: gold.label,
            predicted_label: None,
            rank: None,
            best_label: None,
            best_score: None,
        }
    }

    /// Row for a prediction, with the gold label if one exists
    pub fn retrieved(prediction: &ScoredPrediction, gold_label: Option<Label>) -> Self {
        Self {
            claim_id: prediction.record.claim_id,
            doc_id: prediction.record.doc_id,
            label: gold_label.unwrap_or(Label::NotRelevant),
            predicted_label: Some(prediction.record.predicted_label),
            rank: prediction.record.rank,
            best_label: Some(prediction.best_label),
            best_score: Some(prediction.best_score),
        }
    }

    pub fn key(&self) -> EvidenceKey {
        (self.claim_id, self.doc_id)
    }

    /// Predicted label with absence read as NEI
    pub fn decision(&self) -> Label {
        self.predicted_label.unwrap_or(Label::NotRelevant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> serde_json::Result<PredictionRecord> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_rank_accepts_whole_number_floats() {
        let base = r#""model": "m", "claim_id": 1, "doc_id": 2, "predicted_label": "SUPPORT", "p_support": 0.6, "p_contradict": 0.1"#;

        assert_eq!(parse(&format!("{{{base}, \"rank\": 3}}")).unwrap().rank, Some(3));
        assert_eq!(parse(&format!("{{{base}, \"rank\": 3.0}}")).unwrap().rank, Some(3));
        assert_eq!(parse(&format!("{{{base}, \"rank\": null}}")).unwrap().rank, None);
        assert_eq!(parse(&format!("{{{base}}}")).unwrap().rank, None);
    }

    #[test]
    fn test_rank_rejects_fractional_and_negative() {
        let base = r#""model": "m", "claim_id": 1, "doc_id": 2, "predicted_label": "SUPPORT", "p_support": 0.6, "p_contradict": 0.1"#;

        assert!(parse(&format!("{{{base}, \"rank\": 1.5}}")).is_err());
        assert!(parse(&format!("{{{base}, \"rank\": -1}}")).is_err());
        assert!(parse(&format!("{{{base}, \"rank\": \"first\"}}")).is_err());
    }
}
