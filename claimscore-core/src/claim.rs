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

//! Gold claims with nested evidence, as stored in the claims file.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::Label;

/// How a gold evidence item was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Cited by the claim's source document
    Citation,
    /// Found by pooling model retrievals and annotating them
    Pooling,
}

/// A claim to be verified against the corpus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Integer claim ID
    pub id: u64,

    /// Claim text
    #[serde(rename = "claim")]
    pub text: String,

    /// Evidence keyed by document ID
    #[serde(default)]
    pub evidence: BTreeMap<u64, Evidence>,
}

/// Evidence a single document provides for a claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    /// Veracity label; gold evidence is never NEI
    pub label: Label,

    pub provenance: Provenance,

    /// Sentence indices highlighted as rationale
    #[serde(default)]
    pub sentences: Vec<u32>,

    /// Ranks assigned by pooled models, when discovered via pooling
    #[serde(default)]
    pub model_ranks: Option<HashMap<String, u32>>,
}

impl Claim {
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            evidence: BTreeMap::new(),
        }
    }

    /// Attach evidence for a document
    pub fn with_evidence(mut self, doc_id: u64, evidence: Evidence) -> Self {
        self.evidence.insert(doc_id, evidence);
        self
    }
}

impl Evidence {
    pub fn new(label: Label, provenance: Provenance) -> Self {
        Self {
            label,
            provenance,
            sentences: Vec::new(),
            model_ranks: None,
        }
    }

    pub fn with_sentences(mut self, sentences: Vec<u32>) -> Self {
        self.sentences = sentences;
        self
    }
}
