// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infodyn::InfoDynError;
use infodyn::estimators::InformationEstimator;
use infodyn::estimators::approaches::KsgEstimator;
use infodyn::estimators::approaches::knn::ensemble::EnsembleSource;
use infodyn::snapshot::{read_snapshot, snapshot_path, write_snapshot};
use ndarray::array;

use crate::test_helpers::feed_rows;

fn nodes(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn realtime_rows_follow_tracked_order() {
    let mut est = KsgEstimator::new(3);
    feed_rows(
        &mut est,
        &["B'", "A"],
        &[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
    );
    let source = est.source();
    assert_eq!(source.n_samples(), 3);
    assert_eq!(source.ensemble(), &array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]);
    assert_eq!(source.columns(&["A"]).unwrap(), array![[2.0], [4.0], [6.0]]);
}

#[test]
fn snapshot_loads_exactly_ensemble_size_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = snapshot_path(dir.path(), 7);
    assert!(path.ends_with("at_time007.txt"));
    let rows: Vec<Vec<f64>> = (0..5)
        .map(|i| vec![i as f64, i as f64 + 0.5, -(i as f64), 0.25])
        .collect();
    write_snapshot(&path, rows.iter().map(|r| r.as_slice())).unwrap();

    let mut source = EnsembleSource::new(4);
    source.load_snapshot(&nodes(&["A", "B"]), &path).unwrap();
    assert_eq!(source.variable_names(), ["A", "A'", "B", "B'"]);
    assert_eq!(source.n_samples(), 4);
    assert_eq!(source.columns(&["A'"]).unwrap()[[3, 0]], 3.5);

    let mut too_big = EnsembleSource::new(6);
    assert!(matches!(
        too_big.load_snapshot(&nodes(&["A", "B"]), &path),
        Err(InfoDynError::Configuration(_))
    ));
}

#[test]
fn snapshot_values_are_rounded_to_four_decimals() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("at_time001.txt");
    write_snapshot(&path, [[0.123456, -2.0].as_slice()]).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "0.1235|-2.0000\n");
    let back = read_snapshot(&path, 2, None).unwrap();
    assert_eq!(back, array![[0.1235, -2.0]]);
}

#[test]
fn snapshot_column_count_must_match_nodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = snapshot_path(dir.path(), 1);
    write_snapshot(&path, [[0.0, 1.0, 2.0].as_slice()]).unwrap();
    let mut source = EnsembleSource::new(1);
    assert!(matches!(
        source.load_snapshot(&nodes(&["A", "B"]), &path),
        Err(InfoDynError::DimensionMismatch { expected: 4, found: 3, .. })
    ));
}

#[test]
fn load_matrix_checks_labels() {
    let mut source = EnsembleSource::new(2);
    let err = source
        .load_matrix(nodes(&["X"]), array![[0.0, 1.0], [1.0, 0.0]])
        .unwrap_err();
    assert!(matches!(err, InfoDynError::DimensionMismatch { .. }));
}

#[test]
fn unknown_column_is_reported() {
    let mut est = KsgEstimator::new(20).with_k(2).unwrap();
    let rows: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64]).collect();
    feed_rows(&mut est, &["X"], &rows);
    assert!(matches!(
        est.entropy(&["Y"]),
        Err(InfoDynError::UnknownVariable(name)) if name == "Y"
    ));
}
