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

//! # Claimscore Evaluation
//!
//! Scores ranked claim-verification predictions against gold evidence.
//!
//! ## Features
//!
//! - **Label-aware F1**: a prediction counts only when its SUPPORT/CONTRADICT
//!   polarity matches gold
//! - **Precision-Recall curve**: built in retrieval-rank order, truncated at
//!   the best attainable recall
//! - **Average precision**: step-function area under that curve
//! - **Per-model overrides**: models without a confidence ranking can skip
//!   average precision through configuration
//!
//! ## Example
//!
//! ```rust,ignore
//! use claimscore_core::EvaluationConfig;
//! use claimscore_evals::ClaimEvaluator;
//!
//! let evaluator = ClaimEvaluator::from_files(
//!     "data/claims.jsonl",
//!     "prediction/model_predictions.csv",
//!     EvaluationConfig::scifact_open(),
//! )?;
//! println!("{}", evaluator.evaluate()?);
//! ```

use thiserror::Error;

pub mod evaluator;
pub mod evaluators;
pub mod report;

pub use evaluator::{evaluate_merged, ClaimEvaluator};
pub use evaluators::{
    average_precision, f1_scores, precision_recall_curve, F1Scores, LabelCounts, PRPoint,
    PrecisionRecallCurve,
};
pub use report::{ModelMetrics, ResultsTable, METRIC_COLUMNS};

/// Errors that can occur during evaluation
#[derive(Debug, Error)]
pub enum EvalError {
    #[error(transparent)]
    Input(#[from] claimscore_core::ClaimscoreError),

    #[error("No predictions for model: {0}")]
    UnknownModel(String),
}

pub type Result<T> = std::result::Result<T, EvalError>;
