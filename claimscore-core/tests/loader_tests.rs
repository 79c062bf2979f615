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

//! Integration test for loading claims and predictions from disk

use claimscore_core::{
    load_claims, load_predictions, merge_model, score_predictions, ClaimscoreError,
    EvaluationConfig, GoldTable, Label,
};
use std::fs;
use tempfile::TempDir;

const CLAIMS: &str = r#"{"id": 1, "claim": "A", "evidence": {"10": {"provenance": "citation", "label": "SUPPORT", "sentences": [1], "model_ranks": null}}}
{"id": 2, "claim": "B", "evidence": {"20": {"provenance": "pooling", "label": "CONTRADICT", "sentences": [], "model_ranks": {"m": 4}}, "21": {"provenance": "citation", "label": "SUPPORT", "sentences": [0]}}}
{"id": 3, "claim": "C", "evidence": {}}
"#;

#[test]
fn test_load_claims_and_flatten() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("claims.jsonl");
    fs::write(&path, CLAIMS).unwrap();

    let claims = load_claims(&path).unwrap();
    assert_eq!(claims.len(), 3);

    let gold = GoldTable::from_claims(&claims).unwrap();
    assert_eq!(gold.len(), 3);
    assert_eq!(gold.n_relevant(), 3);
    assert_eq!(gold.get(&(2, 20)), Some(Label::Contradict));
}

#[test]
fn test_csv_and_jsonl_predictions_agree() {
    let dir = TempDir::new().unwrap();

    let csv_path = dir.path().join("preds.csv");
    fs::write(
        &csv_path,
        "model,claim_id,doc_id,predicted_label,rank,p_support,p_contradict\n\
         m,1,10,SUPPORT,1,0.9,0.05\n\
         m,2,20,NEI,,0.1,0.2\n",
    )
    .unwrap();

    let jsonl_path = dir.path().join("preds.jsonl");
    fs::write(
        &jsonl_path,
        "{\"model\":\"m\",\"claim_id\":1,\"doc_id\":10,\"predicted_label\":\"SUPPORT\",\"rank\":1,\"p_support\":0.9,\"p_contradict\":0.05}\n\
         {\"model\":\"m\",\"claim_id\":2,\"doc_id\":20,\"predicted_label\":\"NEI\",\"rank\":null,\"p_support\":0.1,\"p_contradict\":0.2}\n",
    )
    .unwrap();

    let from_csv = load_predictions(&csv_path).unwrap();
    let from_jsonl = load_predictions(&jsonl_path).unwrap();
    assert_eq!(from_csv, from_jsonl);
    assert_eq!(from_csv[1].rank, None);
}

#[test]
fn test_end_to_end_merge_from_files() {
    let dir = TempDir::new().unwrap();
    let claims_path = dir.path().join("claims.jsonl");
    let preds_path = dir.path().join("preds.csv");
    fs::write(&claims_path, CLAIMS).unwrap();
    fs::write(
        &preds_path,
        "model,claim_id,doc_id,predicted_label,rank,p_support,p_contradict\n\
         m,1,10,SUPPORT,1,0.9,0.05\n\
         m,3,30,CONTRADICT,1,0.1,0.8\n",
    )
    .unwrap();

    let gold = GoldTable::from_claims(&load_claims(&claims_path).unwrap()).unwrap();
    let preds = score_predictions(load_predictions(&preds_path).unwrap()).unwrap();
    let merged = merge_model(&gold, "m", &preds).unwrap();

    // 3 gold rows plus one prediction outside the gold set
    assert_eq!(merged.len(), 4);
    assert_eq!(merged.iter().filter(|r| r.label.is_relevant()).count(), 3);
    assert_eq!(merged.iter().filter(|r| r.rank.is_some()).count(), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = load_claims(dir.path().join("absent.jsonl")).unwrap_err();
    assert!(matches!(err, ClaimscoreError::Io { .. }));
}

#[test]
fn test_config_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("eval.toml");
    fs::write(
        &path,
        "percent_scale = false\n\n[model_overrides.keyword_baseline]\nskip_average_precision = true\n",
    )
    .unwrap();

    let config = EvaluationConfig::from_file(&path).unwrap();
    assert!(!config.percent_scale);
    assert!(config.skips_average_precision("keyword_baseline"));
}
