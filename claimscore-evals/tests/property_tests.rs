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

//! Property tests for the metrics engine

use claimscore_core::{
    merge_model, score_prediction, GoldRecord, GoldTable, Label, MergedRecord, PredictionRecord,
};
use claimscore_evals::{evaluate_merged, precision_recall_curve, LabelCounts};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn label_strategy() -> impl Strategy<Value = Label> {
    prop_oneof![
        Just(Label::Support),
        Just(Label::Contradict),
        Just(Label::NotRelevant),
    ]
}

fn gold_strategy() -> impl Strategy<Value = GoldTable> {
    prop::collection::btree_map(0u64..20, prop::bool::ANY, 0..12).prop_map(|docs| {
        GoldTable::from_records(docs.into_iter().map(|(doc_id, support)| GoldRecord {
            claim_id: 1,
            doc_id,
            label: if support {
                Label::Support
            } else {
                Label::Contradict
            },
        }))
        .unwrap()
    })
}

type RawPrediction = (Label, Option<u32>, f64, f64);

fn predictions_strategy() -> impl Strategy<Value = BTreeMap<u64, RawPrediction>> {
    prop::collection::btree_map(
        0u64..30,
        (
            label_strategy(),
            prop::option::weighted(0.9, 1u32..15),
            // Coarse scores so ties occur
            (0u32..=10).prop_map(|s| s as f64 / 10.0),
            (0u32..=10).prop_map(|s| s as f64 / 10.0),
        ),
        0..20,
    )
}

fn merged(gold: &GoldTable, raw: &BTreeMap<u64, RawPrediction>) -> Vec<MergedRecord> {
    let scored: Vec<_> = raw
        .iter()
        .map(|(&doc_id, &(label, rank, p_support, p_contradict))| {
            score_prediction(PredictionRecord {
                model: "m".to_string(),
                claim_id: 1,
                doc_id,
                predicted_label: label,
                rank,
                p_support,
                p_contradict,
            })
            .unwrap()
        })
        .collect();
    merge_model(gold, "m", &scored).unwrap()
}

proptest! {
    #[test]
    fn prop_curve_values_are_bounded(gold in gold_strategy(), raw in predictions_strategy()) {
        prop_assume!(gold.n_relevant() > 0);
        let rows = merged(&gold, &raw);
        let curve = precision_recall_curve(&rows);

        for point in curve.points() {
            prop_assert!((0.0..=1.0).contains(&point.precision));
            prop_assert!((0.0..=1.0).contains(&point.recall));
        }

        let ap = curve.average_precision();
        prop_assert!((0.0..=1.0 + 1e-12).contains(&ap));
    }

    #[test]
    fn prop_recall_never_increases_along_curve(gold in gold_strategy(), raw in predictions_strategy()) {
        prop_assume!(gold.n_relevant() > 0);
        let curve = precision_recall_curve(&merged(&gold, &raw));

        for pair in curve.recall.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
        prop_assert_eq!(curve.thresholds.len() + 1, curve.precision.len());
        prop_assert_eq!(*curve.precision.last().unwrap(), 1.0);
        prop_assert_eq!(*curve.recall.last().unwrap(), 0.0);
    }

    #[test]
    fn prop_recall_denominator_ignores_retrieval(gold in gold_strategy(), raw in predictions_strategy()) {
        let rows = merged(&gold, &raw);

        prop_assert_eq!(precision_recall_curve(&rows).n_relevant, gold.n_relevant());
        prop_assert_eq!(LabelCounts::from_rows(&rows).n_relevant, gold.n_relevant());
    }

    #[test]
    fn prop_f1_scores_bounded_when_defined(gold in gold_strategy(), raw in predictions_strategy()) {
        let metrics = evaluate_merged(&merged(&gold, &raw), false);

        for value in [metrics.precision, metrics.recall, metrics.f1] {
            prop_assert!(value.is_nan() || (0.0..=1.0 + 1e-12).contains(&value));
        }
    }

    #[test]
    fn prop_metrics_are_idempotent(gold in gold_strategy(), raw in predictions_strategy()) {
        // With no relevant gold, recall is NaN and curves never compare equal
        prop_assume!(gold.n_relevant() > 0);
        let rows = merged(&gold, &raw);

        let first_curve = precision_recall_curve(&rows);
        let second_curve = precision_recall_curve(&rows);
        prop_assert_eq!(first_curve, second_curve);

        let a = evaluate_merged(&rows, false);
        let b = evaluate_merged(&rows, false);
        for (x, y) in a.values().iter().zip(b.values().iter()) {
            prop_assert!(x == y || (x.is_nan() && y.is_nan()));
        }
    }

    #[test]
    fn prop_exempt_model_always_nan(gold in gold_strategy(), raw in predictions_strategy()) {
        let metrics = evaluate_merged(&merged(&gold, &raw), true);
        prop_assert!(metrics.avg_precision.is_nan());
    }
}
