// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use approx::assert_abs_diff_eq;
use infodyn::InfoDynError;
use infodyn::estimators::approaches::DiscreteEstimator;
use infodyn::network::{DecompositionTerm, Link, LinkQuantity, Node, NodeQuantity};
use rstest::rstest;

use crate::test_helpers::{LN_2, all_bit_rows, feed_rows};

/// Exact ensemble of the copy dynamics: A, A', B uniform and independent, B' = A.
fn copy_ensemble() -> DiscreteEstimator {
    let mut est = DiscreteEstimator::new(2).unwrap();
    let rows: Vec<Vec<f64>> = all_bit_rows(3, 2)
        .into_iter()
        .map(|r| vec![r[0], r[1], r[2], r[0]])
        .collect();
    feed_rows(&mut est, &["A", "A'", "B", "B'"], &rows);
    est
}

#[rstest]
#[case(LinkQuantity::MutualInformation, 0.0)]
#[case(LinkQuantity::Te1, 0.0)]
#[case(LinkQuantity::ReverseTe1, LN_2)]
#[case(LinkQuantity::Te2, LN_2)]
#[case(LinkQuantity::ReverseTe2, 0.0)]
#[case(LinkQuantity::Alpha2, 0.0)]
#[case(LinkQuantity::Integrand(DecompositionTerm::Alpha3_1), LN_2)]
#[case(LinkQuantity::Integrand(DecompositionTerm::Alpha3_2), 0.0)]
#[case(LinkQuantity::Integrand(DecompositionTerm::Alpha4_1), 0.0)]
#[case(LinkQuantity::Integrand(DecompositionTerm::Alpha5), 0.0)]
#[case(LinkQuantity::Integrand(DecompositionTerm::Alpha6_1), 0.0)]
#[case(LinkQuantity::Integrand(DecompositionTerm::Alpha6_2), LN_2)]
fn copy_link_quantities(#[case] quantity: LinkQuantity, #[case] expected: f64) {
    let mut est = copy_ensemble();
    let mut link = Link::new("A", "B");
    link.calculate(&mut est).unwrap();
    assert_abs_diff_eq!(link.value(quantity, 0).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn copy_node_quantities() {
    let mut est = copy_ensemble();
    let mut node = Node::new("B");
    node.calculate(&mut est).unwrap();
    // Without neighbors α₁ is H(B') - H(B).
    assert_abs_diff_eq!(node.value(NodeQuantity::H0, 0).unwrap(), LN_2, epsilon = 1e-12);
    assert_abs_diff_eq!(node.value(NodeQuantity::Alpha1, 0).unwrap(), 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(
        node.value(NodeQuantity::AlphaPartial1, 0).unwrap(),
        LN_2,
        epsilon = 1e-12
    );
}

#[test]
fn differences_trail_by_one_step() {
    let mut link = Link::new("A", "B");
    let n = 5;
    for step in 0..n {
        let mut values = vec![0.0; 6];
        values.extend((0..7).map(|i| (step * step + i) as f64));
        link.set_from_values(&values).unwrap();
    }
    for term in DecompositionTerm::ALL {
        assert_eq!(link.series(LinkQuantity::Integrand(term)).len(), n);
        assert_eq!(link.series(LinkQuantity::Difference(term)).len(), n - 1);
    }
    // integrand(t + 1) - integrand(t) = 2t + 1
    assert_eq!(
        link.series(LinkQuantity::Difference(DecompositionTerm::Alpha4_2)),
        [1.0, 3.0, 5.0, 7.0]
    );
    assert!(link.record(n - 2).is_some());
    assert!(link.record(n - 1).is_none());
}

#[test]
fn bulk_restore_checks_length() {
    let mut link = Link::new("A", "B");
    assert!(matches!(
        link.set_from_values(&[0.0; 20]),
        Err(InfoDynError::Configuration(_))
    ));
    assert!(link.is_empty());

    let mut node = Node::new("A");
    assert!(matches!(
        node.set_from_values(&[0.0; 3]),
        Err(InfoDynError::Configuration(_))
    ));
}

#[test]
fn labels_follow_persisted_order() {
    let labels: Vec<&str> = LinkQuantity::all().iter().map(|q| q.label()).collect();
    assert_eq!(
        labels,
        [
            "MI", "TE1", "rTE1", "TE2", "rTE2", "2", "3_1_I", "3_2_I", "4_1_I", "4_2_I", "5_I",
            "6_1_I", "6_2_I", "3_1", "3_2", "4_1", "4_2", "5", "6_1", "6_2"
        ]
    );
    let node_labels = NodeQuantity::ALL.map(|q| q.label());
    assert_eq!(node_labels, ["H0", "H0'", "1", "partial1"]);
}
