//! End-to-end tests for the k-fold evaluation pipeline.

mod common;

use std::sync::Arc;

use common::fixtures::{PairSetBuilder, two_fold_separable};
use verifold::constants::NORM_EPSILON;
use verifold::{
    AccuracyReport, EvalError, EvalSettings, Evaluator, FoldPartition, Normalizer, ScoreComputer,
    ThresholdError,
};

#[test]
fn test_two_fold_scenario() {
    let evaluator = Evaluator::new(EvalSettings::new(2, 10_000)).expect("evaluator");
    let result = evaluator
        .evaluate(&two_fold_separable())
        .expect("evaluation");

    assert_eq!(result.per_fold(), vec![1.0, 1.0]);
    assert_eq!(result.mean(), 1.0);
}

#[test]
fn test_well_separated_identities_reach_full_accuracy() {
    let pairs = PairSetBuilder::new().build();
    let evaluator = Evaluator::new(EvalSettings::default()).expect("evaluator");

    let result = evaluator.evaluate(&pairs).expect("evaluation");

    assert_eq!(result.fold_count(), 10);
    assert!(result.per_fold().iter().all(|&acc| acc == 1.0));
    assert_eq!(result.mean(), 1.0);
}

#[test]
fn test_accuracies_are_bounded_on_noisy_data() {
    for seed in [1, 2, 3] {
        let pairs = PairSetBuilder::new()
            .dim(8)
            .noise(2.0)
            .seed(seed)
            .build();
        let evaluator = Evaluator::new(EvalSettings::new(10, 1_000)).expect("evaluator");

        let result = evaluator.evaluate(&pairs).expect("evaluation");

        for acc in result.per_fold() {
            assert!((0.0..=1.0).contains(&acc), "seed {seed}: {acc}");
        }
        assert!((0.0..=1.0).contains(&result.mean()));
        for outcome in result.folds() {
            assert!((-1.0..=1.0).contains(&outcome.threshold));
            assert!((0.0..=1.0).contains(&outcome.train_accuracy));
        }
    }
}

#[test]
fn test_partition_invariant_for_every_fold_count() {
    for k in 2..=10 {
        let pairs = PairSetBuilder::new().folds(k).pairs_per_fold(6).build();
        let partition = FoldPartition::new(&pairs, k).expect("partition");

        let mut seen = vec![0u32; pairs.len()];
        for fold in 0..k {
            let test = partition.test_mask(fold);
            assert!(test.any(), "fold {fold} of {k} is empty");
            for i in test.iter_ones() {
                seen[i] += 1;
            }
        }
        assert!(seen.iter().all(|&c| c == 1), "k = {k}");
    }
}

#[test]
fn test_scores_bounded_after_normalization() {
    let pairs = PairSetBuilder::new().dim(16).noise(0.8).build();
    let partition = FoldPartition::new(&pairs, 10).expect("partition");

    for fold in 0..10 {
        let normalized =
            Normalizer::normalize(&pairs, &partition.train_mask(fold)).expect("normalize");
        for score in ScoreComputer::score(&normalized) {
            assert!(score >= -1.0 - NORM_EPSILON && score <= 1.0 + NORM_EPSILON);
        }
    }
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let pairs = PairSetBuilder::new().dim(12).noise(1.5).build();
    let evaluator = Evaluator::new(EvalSettings::new(10, 2_000)).expect("evaluator");

    let first = evaluator.evaluate(&pairs).expect("evaluation");
    let second = evaluator.evaluate(&pairs).expect("evaluation");

    assert_eq!(first, second);
    assert_eq!(first.mean().to_bits(), second.mean().to_bits());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_parallel_and_sequential_agree() {
    let pairs = PairSetBuilder::new().dim(12).noise(1.5).seed(99).build();
    let evaluator = Evaluator::new(EvalSettings::new(10, 2_000)).expect("evaluator");

    let sequential = evaluator.evaluate(&pairs).expect("sequential");
    let parallel = evaluator
        .evaluate_parallel(Arc::new(pairs))
        .await
        .expect("parallel");

    assert_eq!(sequential, parallel);
    assert_eq!(
        AccuracyReport::new(&sequential).to_string(),
        AccuracyReport::new(&parallel).to_string()
    );
}

#[tokio::test]
async fn test_parallel_single_class_fold_fails_whole_run() {
    // Three folds; fold 2 holds every impostor, so training for fold 2 sees only genuine pairs.
    let mut pairs = PairSetBuilder::new().folds(3).pairs_per_fold(4).build_pairs();
    for pair in pairs.iter_mut() {
        pair.fold = if pair.label.is_genuine() {
            pair.fold % 2
        } else {
            2
        };
    }
    let pairs = verifold::FeaturePairSet::from_pairs(pairs).expect("pair set");
    let evaluator = Evaluator::new(EvalSettings::new(3, 100)).expect("evaluator");

    let err = evaluator
        .evaluate_parallel(Arc::new(pairs))
        .await
        .expect_err("must fail");

    assert!(matches!(
        err,
        EvalError::Configuration {
            fold: 2,
            source: ThresholdError::SingleClass { .. }
        }
    ));
}

#[test]
fn test_report_lists_every_fold() {
    let pairs = PairSetBuilder::new().build();
    let evaluator = Evaluator::new(EvalSettings::default()).expect("evaluator");
    let result = evaluator.evaluate(&pairs).expect("evaluation");

    let text = AccuracyReport::new(&result).to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 12);
    assert_eq!(lines[0], "1    100.00");
    assert_eq!(lines[9], "10    100.00");
    assert_eq!(lines[10], "--------");
    assert_eq!(lines[11], "AVE    100.0000");
}
