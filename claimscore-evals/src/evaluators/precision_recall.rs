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

//! Precision-Recall curve over ranked, three-way predictions
//!
//! Standard retrieval curves only ask whether a document is relevant. Here a
//! retrieved row is a true positive only when its best non-NEI class matches
//! the gold label, so a relevant document with the wrong polarity is a false
//! positive.
//!
//! ## Construction
//!
//! 1. `n_relevant` counts every relevant gold row, retrieved or not. Recall
//!    never reaches 1 when the model missed gold documents.
//! 2. Rows without a rank or score are dropped; the model never surfaced them.
//! 3. Remaining rows are ordered by ascending retrieval rank (stable), not by
//!    score.
//! 4. A threshold falls on the last row of each run of equal scores, and on
//!    the final row.
//! 5. The curve stops at the first threshold reaching the final true-positive
//!    count, is reversed so recall decreases, and ends with the anchor
//!    `(precision = 1, recall = 0)`.
//!
//! Cumulative counts are kept as integers, so long rankings accumulate
//! without rounding.

use claimscore_core::MergedRecord;
use serde::{Deserialize, Serialize};

/// Precision-Recall curve, ordered from highest recall down to the anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecisionRecallCurve {
    /// Precision per point; the last entry is the anchor's 1.0
    pub precision: Vec<f64>,
    /// Recall per point; the last entry is the anchor's 0.0
    pub recall: Vec<f64>,
    /// Score at each non-anchor point (one shorter than `precision`)
    pub thresholds: Vec<f64>,
    /// Recall denominator
    pub n_relevant: usize,
}

/// Single point on the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PRPoint {
    /// None for the anchor point
    pub threshold: Option<f64>,
    pub precision: f64,
    pub recall: f64,
}

/// A retrieved row reduced to what the curve needs
#[derive(Debug, Clone, Copy)]
struct RankedHit {
    rank: u32,
    score: f64,
    true_positive: bool,
}

impl RankedHit {
    fn from_row(row: &MergedRecord) -> Option<Self> {
        let (rank, score, best_label) = (row.rank?, row.best_score?, row.best_label?);
        Some(Self {
            rank,
            score,
            true_positive: row.label.is_relevant() && best_label == row.label,
        })
    }
}

impl PrecisionRecallCurve {
    /// Build the curve for one model's merged rows
    pub fn from_rows(rows: &[MergedRecord]) -> Self {
        let n_relevant = rows.iter().filter(|r| r.label.is_relevant()).count();

        let mut hits: Vec<RankedHit> = rows.iter().filter_map(RankedHit::from_row).collect();
        hits.sort_by_key(|h| h.rank);

        let Some(last) = hits.len().checked_sub(1) else {
            return Self::anchor_only(n_relevant);
        };

        // (cumulative TP, cumulative FP, score) at each threshold index
        let mut steps: Vec<(u64, u64, f64)> = Vec::new();
        let (mut tps, mut fps) = (0u64, 0u64);
        for (i, hit) in hits.iter().enumerate() {
            if hit.true_positive {
                tps += 1;
            } else {
                fps += 1;
            }
            if i == last || hits[i + 1].score != hit.score {
                steps.push((tps, fps, hit.score));
            }
        }

        // Stop once every attainable true positive has been found
        let final_tps = tps;
        let stop = steps
            .iter()
            .position(|&(tp, _, _)| tp >= final_tps)
            .unwrap_or(steps.len() - 1);

        let denominator = n_relevant as f64;
        let mut precision = Vec::with_capacity(stop + 2);
        let mut recall = Vec::with_capacity(stop + 2);
        let mut thresholds = Vec::with_capacity(stop + 1);

        for &(tp, fp, score) in steps[..=stop].iter().rev() {
            let predicted = tp + fp;
            precision.push(if predicted == 0 {
                0.0
            } else {
                tp as f64 / predicted as f64
            });
            recall.push(tp as f64 / denominator);
            thresholds.push(score);
        }

        precision.push(1.0);
        recall.push(0.0);

        Self {
            precision,
            recall,
            thresholds,
            n_relevant,
        }
    }

    fn anchor_only(n_relevant: usize) -> Self {
        Self {
            precision: vec![1.0],
            recall: vec![0.0],
            thresholds: Vec::new(),
            n_relevant,
        }
    }

    /// Step-function area under the curve
    ///
    /// Each drop in recall is weighted by the precision at its higher-recall
    /// end; no interpolation between points.
    pub fn average_precision(&self) -> f64 {
        self.recall
            .windows(2)
            .zip(&self.precision)
            .fold(0.0, |area, (r, p)| area + (r[0] - r[1]) * p)
    }

    /// Points in curve order, anchor last
    pub fn points(&self) -> impl Iterator<Item = PRPoint> + '_ {
        self.precision
            .iter()
            .zip(&self.recall)
            .enumerate()
            .map(|(i, (&precision, &recall))| PRPoint {
                threshold: self.thresholds.get(i).copied(),
                precision,
                recall,
            })
    }

    /// Number of points including the anchor
    pub fn len(&self) -> usize {
        self.precision.len()
    }

    /// A curve always holds at least the anchor
    pub fn is_empty(&self) -> bool {
        self.precision.is_empty()
    }
}

/// Build the curve for one model's merged rows
pub fn precision_recall_curve(rows: &[MergedRecord]) -> PrecisionRecallCurve {
    PrecisionRecallCurve::from_rows(rows)
}

/// Average precision for one model's merged rows
pub fn average_precision(rows: &[MergedRecord]) -> f64 {
    PrecisionRecallCurve::from_rows(rows).average_precision()
}
