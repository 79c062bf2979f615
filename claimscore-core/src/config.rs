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

//! Configuration for an evaluation run
//!
//! Per-model overrides are injected here instead of being matched by name
//! inside the evaluator. A TOML file looks like:
//!
//! ```toml
//! percent_scale = true
//!
//! [model_overrides.arsjoint]
//! skip_average_precision = true
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::{ClaimscoreError, Result};

/// Baseline in the SciFact-Open release that produces no usable confidence ranking
pub const SCIFACT_OPEN_UNRANKED_BASELINE: &str = "arsjoint";

/// Static per-model adjustments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOverride {
    /// Report average precision as NaN instead of computing it
    #[serde(default)]
    pub skip_average_precision: bool,
}

/// Settings for an evaluation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Overrides keyed by model name
    #[serde(default)]
    pub model_overrides: BTreeMap<String, ModelOverride>,

    /// Scale reported metrics to percentages (0-100)
    #[serde(default = "default_percent_scale")]
    pub percent_scale: bool,
}

fn default_percent_scale() -> bool {
    true
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            model_overrides: BTreeMap::new(),
            percent_scale: true,
        }
    }
}

impl EvaluationConfig {
    /// Settings reproducing the published SciFact-Open table
    pub fn scifact_open() -> Self {
        Self::default().skip_average_precision_for(SCIFACT_OPEN_UNRANKED_BASELINE)
    }

    /// Parse from TOML text
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ClaimscoreError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Exempt a model from average-precision scoring
    pub fn skip_average_precision_for(mut self, model: impl Into<String>) -> Self {
        self.model_overrides
            .entry(model.into())
            .or_default()
            .skip_average_precision = true;
        self
    }

    pub fn with_percent_scale(mut self, enabled: bool) -> Self {
        self.percent_scale = enabled;
        self
    }

    pub fn skips_average_precision(&self, model: &str) -> bool {
        self.model_overrides
            .get(model)
            .is_some_and(|o| o.skip_average_precision)
    }
}
