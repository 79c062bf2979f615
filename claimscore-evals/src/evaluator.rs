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

//! Evaluation orchestrator
//!
//! Runs the metrics for every model in the prediction set, in sorted model
//! order. Each model is merged with the shared gold table independently.

use claimscore_core::{
    group_by_model, merge_model, score_predictions, Claim, EvaluationConfig, GoldTable,
    MergedRecord, PredictionRecord, ScoredPrediction,
};
use std::path::Path;
use tracing::{debug, info};

use crate::evaluators::{LabelCounts, PrecisionRecallCurve};
use crate::report::{ModelMetrics, ResultsTable};
use crate::{EvalError, Result};

/// Scores every model in a prediction set against gold evidence
#[derive(Debug, Clone)]
pub struct ClaimEvaluator {
    gold: GoldTable,
    predictions: Vec<ScoredPrediction>,
    config: EvaluationConfig,
}

impl ClaimEvaluator {
    /// Normalize raw claims and predictions
    pub fn new(
        claims: &[Claim],
        predictions: Vec<PredictionRecord>,
        config: EvaluationConfig,
    ) -> Result<Self> {
        Ok(Self::from_parts(
            GoldTable::from_claims(claims)?,
            score_predictions(predictions)?,
            config,
        ))
    }

    pub fn from_parts(
        gold: GoldTable,
        predictions: Vec<ScoredPrediction>,
        config: EvaluationConfig,
    ) -> Self {
        Self {
            gold,
            predictions,
            config,
        }
    }

    /// Load a claims JSONL file and a prediction table
    pub fn from_files(
        claims_path: impl AsRef<Path>,
        predictions_path: impl AsRef<Path>,
        config: EvaluationConfig,
    ) -> Result<Self> {
        let claims = claimscore_core::load_claims(claims_path)?;
        let predictions = claimscore_core::load_predictions(predictions_path)?;
        Self::new(&claims, predictions, config)
    }

    pub fn gold(&self) -> &GoldTable {
        &self.gold
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Distinct model names, sorted
    pub fn models(&self) -> Vec<&str> {
        group_by_model(&self.predictions).into_keys().collect()
    }

    /// Merged rows for one model
    pub fn merged_rows(&self, model: &str) -> Result<Vec<MergedRecord>> {
        let slice: Vec<&ScoredPrediction> = self
            .predictions
            .iter()
            .filter(|p| p.model() == model)
            .collect();
        if slice.is_empty() {
            return Err(EvalError::UnknownModel(model.to_string()));
        }
        Ok(merge_model(&self.gold, model, slice)?)
    }

    /// Precision-Recall curve for one model
    pub fn curve(&self, model: &str) -> Result<PrecisionRecallCurve> {
        Ok(PrecisionRecallCurve::from_rows(&self.merged_rows(model)?))
    }

    /// Score every model; values are percentages unless the config says otherwise
    pub fn evaluate(&self) -> Result<ResultsTable> {
        let mut table = ResultsTable::new();

        for (model, slice) in group_by_model(&self.predictions) {
            let merged = merge_model(&self.gold, model, slice)?;
            let skip_ap = self.config.skips_average_precision(model);
            let metrics = evaluate_merged(&merged, skip_ap);

            debug!(
                model,
                rows = merged.len(),
                precision = metrics.precision,
                recall = metrics.recall,
                f1 = metrics.f1,
                avg_precision = metrics.avg_precision,
                skip_ap,
                "evaluated model"
            );
            table.insert(model, metrics);
        }

        info!(
            models = table.len(),
            gold_rows = self.gold.len(),
            predictions = self.predictions.len(),
            "evaluation complete"
        );

        Ok(if self.config.percent_scale {
            table.scaled(100.0)
        } else {
            table
        })
    }
}

/// Metrics for one model's merged rows, in [0, 1] units
///
/// With `skip_average_precision` the curve is not built and average precision
/// is reported as NaN.
pub fn evaluate_merged(rows: &[MergedRecord], skip_average_precision: bool) -> ModelMetrics {
    let counts = LabelCounts::from_rows(rows);
    let scores = counts.scores();

    let avg_precision = if skip_average_precision {
        f64::NAN
    } else {
        let curve = PrecisionRecallCurve::from_rows(rows);
        debug!(
            n_relevant = curve.n_relevant,
            points = curve.len(),
            "built precision-recall curve"
        );
        curve.average_precision()
    };

    ModelMetrics {
        precision: scores.precision,
        recall: scores.recall,
        f1: scores.f1,
        avg_precision,
    }
}
