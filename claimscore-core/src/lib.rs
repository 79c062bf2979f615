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

//! Claimscore Core
//!
//! Data model for scoring claim-verification predictions against gold
//! evidence: claims and evidence, flattened gold rows, model predictions,
//! and the per-model merged table the metrics run on.

pub mod claim;
pub mod config;
pub mod error;
pub mod label;
pub mod loader;
pub mod merge;
pub mod normalize;
pub mod record;

pub use claim::{Claim, Evidence, Provenance};
pub use config::{EvaluationConfig, ModelOverride, SCIFACT_OPEN_UNRANKED_BASELINE};
pub use error::{ClaimscoreError, Result};
pub use label::Label;
pub use loader::{load_claims, load_predictions, PredictionFormat};
pub use merge::{group_by_model, merge_model, GoldTable};
pub use normalize::{best_class, flatten_claims, score_prediction, score_predictions};
pub use record::{EvidenceKey, GoldRecord, MergedRecord, PredictionRecord, ScoredPrediction};
