//! Mastery grid: shape, per-cell consistency, lookups.

use mastery_analysis::{MasteryClassifier, MasteryGrid};
use mastery_core::types::{EngineSettings, MasteryTier, Thresholds};

#[test]
fn test_single_attempt_grid_has_three_cells() {
    let classifier = MasteryClassifier::with_defaults();
    let grid = MasteryGrid::compute(1, &classifier).unwrap();

    let coords: Vec<_> = grid.cells().map(|c| (c.attempts, c.successes)).collect();
    assert_eq!(coords, vec![(0, 0), (1, 0), (1, 1)]);

    assert_eq!(grid.label(0, 0), Some(MasteryTier::Attempted));
    assert_eq!(grid.label(1, 0), Some(MasteryTier::Attempted));
    assert_eq!(grid.label(1, 1), Some(MasteryTier::Familiar));
}

#[test]
fn test_grid_cells_match_single_record_classifier() {
    let classifier = MasteryClassifier::with_defaults();
    let grid = MasteryGrid::compute(12, &classifier).unwrap();
    for cell in grid.cells() {
        let single = classifier.evaluate(cell.attempts, cell.successes).unwrap();
        assert_eq!(cell.label, single.label);
        assert_eq!(cell.ci_low, single.ci_low);
    }
}

#[test]
fn test_grid_size_and_out_of_triangle_lookups() {
    let grid = MasteryGrid::compute(20, &MasteryClassifier::with_defaults()).unwrap();
    assert_eq!(grid.len(), 21 * 22 / 2);
    assert_eq!(grid.max_attempts(), 20);
    assert!(grid.get(3, 4).is_none());
    assert!(grid.get(21, 0).is_none());
    assert!(grid.get(20, 20).is_some());

    let counts = grid.tier_counts();
    assert_eq!(counts.values().sum::<usize>(), grid.len());
    assert!(counts[&MasteryTier::Proficient] > 0);
}

#[test]
fn test_empty_grid_is_prior_only() {
    let grid = MasteryGrid::compute(0, &MasteryClassifier::with_defaults()).unwrap();
    assert_eq!(grid.len(), 1);
    assert!(!grid.is_empty());
    assert_eq!(grid.label(0, 0), Some(MasteryTier::Attempted));
}

#[test]
fn test_labels_monotone_along_each_row() {
    let grid = MasteryGrid::compute(30, &MasteryClassifier::with_defaults()).unwrap();
    for n in 0..=30 {
        for k in 1..=n {
            assert!(grid.label(n, k) >= grid.label(n, k - 1), "row {n} drops at k={k}");
        }
    }
    let frontier = grid.tier_frontier(MasteryTier::Proficient);
    assert_eq!(frontier.len(), 31);
    // Nothing reaches Proficient without evidence.
    assert_eq!(frontier[0], None);
    assert!(frontier[30].is_some());
}

#[test]
fn test_grid_respects_thresholds() {
    let settings = EngineSettings {
        thresholds: Thresholds::new(0.0, 0.0, 0.8).unwrap(),
        ..EngineSettings::default()
    };
    let grid = MasteryGrid::compute(5, &MasteryClassifier::new(settings)).unwrap();
    assert!(grid.cells().all(|c| c.label == MasteryTier::Proficient));
}

#[test]
fn test_pooled_grid_matches_global_pool() {
    let global = MasteryGrid::compute(15, &MasteryClassifier::with_defaults()).unwrap();
    let pooled = MasteryGrid::compute(
        15,
        &MasteryClassifier::with_defaults().with_threads(3).unwrap(),
    )
    .unwrap();
    assert_eq!(global, pooled);
}
