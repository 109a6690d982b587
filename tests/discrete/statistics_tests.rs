// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::HashMap;

use approx::assert_abs_diff_eq;
use infodyn::InfoDynError;
use infodyn::estimators::approaches::discrete::statistics::{Histogram, normalize};
use infodyn::estimators::approaches::{OccurrenceStatistics, PdfSource};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn xy_statistics() -> OccurrenceStatistics {
    let mut counts: Histogram = HashMap::new();
    counts.insert(vec![0, 0], 3);
    counts.insert(vec![0, 1], 1);
    counts.insert(vec![1, 0], 0);
    counts.insert(vec![1, 1], 4);
    OccurrenceStatistics::from_counts(names(&["X", "Y"]), counts).unwrap()
}

#[test]
fn full_pdf_sums_to_one() {
    let stats = xy_statistics();
    let pdf = stats.generate_desired_pdf(&["X", "Y"]).unwrap();
    assert_abs_diff_eq!(pdf.values().sum::<f64>(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(pdf[&vec![1, 1]], 0.5, epsilon = 1e-12);
    // Zero cells stay present.
    assert_eq!(pdf[&vec![1, 0]], 0.0);
}

#[test]
fn marginal_follows_requested_order() {
    let stats = xy_statistics();
    let y = stats.desired_pdf(&["Y"]).unwrap();
    assert_abs_diff_eq!(y[&vec![0]], 3.0 / 8.0, epsilon = 1e-12);
    assert_abs_diff_eq!(y[&vec![1]], 5.0 / 8.0, epsilon = 1e-12);

    let yx = stats.meshed_for(&["Y", "X"]).unwrap();
    assert_eq!(yx[&vec![1, 0]], 1);
    assert_eq!(yx[&vec![0, 1]], 0);
}

#[test]
fn empty_selection_is_the_full_histogram() {
    let stats = xy_statistics();
    assert_eq!(&stats.meshed_for(&[]).unwrap(), stats.counts());
    assert_eq!(stats.total(), 8);
}

#[test]
fn record_checks_arity() {
    let mut stats = OccurrenceStatistics::new(names(&["X", "Y"]));
    stats.record(vec![1, 0]).unwrap();
    stats.record(vec![1, 0]).unwrap();
    assert_eq!(stats.counts()[&vec![1, 0]], 2);
    assert!(matches!(
        stats.record(vec![1]),
        Err(InfoDynError::DimensionMismatch { expected: 2, found: 1, .. })
    ));
}

#[test]
fn from_counts_rejects_wrong_arity() {
    let mut counts: Histogram = HashMap::new();
    counts.insert(vec![0, 1, 1], 2);
    let err = OccurrenceStatistics::from_counts(names(&["X", "Y"]), counts).unwrap_err();
    assert!(matches!(err, InfoDynError::DimensionMismatch { .. }));
}

#[test]
fn unknown_variable_is_reported() {
    let stats = xy_statistics();
    let err = stats.generate_desired_pdf(&["Z"]).unwrap_err();
    assert!(matches!(err, InfoDynError::UnknownVariable(name) if name == "Z"));
}

#[test]
fn zero_total_is_degenerate() {
    let mut stats = OccurrenceStatistics::new(names(&["X"]));
    stats.ensure_case(vec![0]);
    stats.ensure_case(vec![1]);
    assert!(matches!(
        stats.generate_desired_pdf(&["X"]),
        Err(InfoDynError::DegenerateDistribution(_))
    ));
    assert!(matches!(
        normalize(HashMap::new()),
        Err(InfoDynError::DegenerateDistribution(_))
    ));
}
