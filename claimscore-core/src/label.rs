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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ClaimscoreError;

/// Veracity label a document bears toward a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Label {
    /// Document supports the claim
    Support,
    /// Document contradicts the claim
    Contradict,
    /// No evidence relationship (NEI)
    NotRelevant,
}

impl Label {
    /// Wire spelling used in claim and prediction files
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Support => "SUPPORT",
            Label::Contradict => "CONTRADICT",
            Label::NotRelevant => "NEI",
        }
    }

    /// True for SUPPORT and CONTRADICT
    pub fn is_relevant(&self) -> bool {
        !matches!(self, Label::NotRelevant)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = ClaimscoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUPPORT" | "SUPPORTS" => Ok(Label::Support),
            "CONTRADICT" | "CONTRADICTS" | "REFUTE" | "REFUTES" => Ok(Label::Contradict),
            "NEI" | "NOT_RELEVANT" | "NOT RELEVANT" => Ok(Label::NotRelevant),
            _ => Err(ClaimscoreError::InvalidLabel(s.to_string())),
        }
    }
}

impl TryFrom<String> for Label {
    type Error = ClaimscoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.as_str().to_string()
    }
}
