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

//! Results table: one row of metrics per model, sorted by model name.
//!
//! NaN values are kept as-is. The text table prints them as `NaN`; JSON
//! output writes them as `null`, and `null` reads back as NaN.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column names, in display order
pub const METRIC_COLUMNS: [&str; 4] = ["P", "R", "F1", "avg_precision"];

/// Scores for a single model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    #[serde(rename = "P", deserialize_with = "nan_from_null")]
    pub precision: f64,
    #[serde(rename = "R", deserialize_with = "nan_from_null")]
    pub recall: f64,
    #[serde(rename = "F1", deserialize_with = "nan_from_null")]
    pub f1: f64,
    #[serde(deserialize_with = "nan_from_null")]
    pub avg_precision: f64,
}

fn nan_from_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl ModelMetrics {
    /// Values in `METRIC_COLUMNS` order
    pub fn values(&self) -> [f64; 4] {
        [self.precision, self.recall, self.f1, self.avg_precision]
    }

    /// Metric name to value, for display
    pub fn as_map(&self) -> BTreeMap<&'static str, f64> {
        METRIC_COLUMNS.into_iter().zip(self.values()).collect()
    }

    /// Multiply every value by `factor` (100 for percentages)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            precision: self.precision * factor,
            recall: self.recall * factor,
            f1: self.f1 * factor,
            avg_precision: self.avg_precision * factor,
        }
    }
}

/// Metrics for every evaluated model, keyed and sorted by model name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsTable {
    rows: BTreeMap<String, ModelMetrics>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, model: impl Into<String>, metrics: ModelMetrics) {
        self.rows.insert(model.into(), metrics);
    }

    pub fn get(&self, model: &str) -> Option<&ModelMetrics> {
        self.rows.get(model)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModelMetrics)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|(k, v)| (k.clone(), v.scaled(factor)))
                .collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else {
        format!("{v:.1}")
    }
}

impl fmt::Display for ResultsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model_width = self
            .rows
            .keys()
            .map(|k| k.len())
            .chain(std::iter::once("model".len()))
            .max()
            .unwrap_or(0);

        write!(f, "{:<model_width$}", "model")?;
        for column in METRIC_COLUMNS {
            write!(f, "  {:>13}", column)?;
        }
        writeln!(f)?;

        for (model, metrics) in &self.rows {
            write!(f, "{:<model_width$}", model)?;
            for value in metrics.values() {
                write!(f, "  {:>13}", format_value(value))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
