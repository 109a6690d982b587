// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs;

use approx::assert_abs_diff_eq;
use infodyn::InfoDynError;
use infodyn::estimators::AnalysisMode;
use infodyn::estimators::approaches::DiscreteEstimator;
use infodyn::estimators::composite::CompositeVariable;
use infodyn::simulation::{Simulation, SimulationConfig};
use infodyn::state::StateSpace;

use crate::test_helpers::{CopyModel, LN_2, all_bit_rows};

/// X, Y, Ext, X' uniform and independent; Y' = X xor Ext.
fn fed_transfer_entropy() -> CompositeVariable {
    let est = DiscreteEstimator::with_dimension(2, 5).unwrap();
    let mut t2 = CompositeVariable::multiple_transfer_entropy("X", "Y", "Ext", est);
    t2.init_source().unwrap();
    for row in all_bit_rows(4, 1) {
        let mut state = StateSpace::new();
        state.set("X", row[0]);
        state.set("Y", row[1]);
        state.set("Ext", row[2]);
        let mut buffer = StateSpace::new();
        buffer.set("X", row[3]);
        buffer.set("Y", ((row[0] as u8) ^ (row[2] as u8)) as f64);
        t2.update_source(&state, &buffer).unwrap();
    }
    t2
}

#[test]
fn multiple_transfer_entropy_variants() {
    let mut t2 = fed_transfer_entropy();
    assert_eq!(t2.name(), "Multiple_Transfer_Entropy_X_Y_Ext");
    assert_eq!(t2.tracked(), ["X", "Y", "Ext", "X'", "Y'"]);
    assert_eq!(t2.labels(), ["T^2_v1", "T^2_v2", "T^2_v3"]);

    let values = t2.estimate().unwrap().to_vec();
    // Ext and X only jointly determine Y'.
    assert_abs_diff_eq!(values[0], -LN_2, epsilon = 1e-12);
    assert_abs_diff_eq!(values[1], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(values[2], 0.0, epsilon = 1e-12);
    assert_eq!(t2.values().len(), 1);
}

#[test]
fn joint_entropy_names_and_values() {
    let est = DiscreteEstimator::with_dimension(2, 3).unwrap();
    let mut h = CompositeVariable::joint_entropy(&["X", "Y", "Ext"], est).unwrap();
    assert_eq!(h.name(), "H_XYExt");
    h.init_source().unwrap();
    for row in all_bit_rows(3, 2) {
        let mut state = StateSpace::new();
        state.set("X", row[0]);
        state.set("Y", row[1]);
        state.set("Ext", row[2]);
        h.update_source(&state, &StateSpace::new()).unwrap();
    }
    assert_abs_diff_eq!(h.estimate().unwrap()[0], 3.0 * LN_2, epsilon = 1e-12);
    assert_eq!(h.latest().map(<[f64]>::len), Some(1));

    assert!(matches!(
        CompositeVariable::joint_entropy(&[], DiscreteEstimator::new(2).unwrap()),
        Err(InfoDynError::DimensionMismatch { .. })
    ));
}

#[test]
fn composites_ride_along_in_realtime_runs() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = CopyModel::new(DiscreteEstimator::new(2).unwrap());
    model.composites = vec![
        CompositeVariable::joint_entropy(&["A", "B"], DiscreteEstimator::new(2).unwrap())
            .unwrap(),
    ];
    let config = SimulationConfig {
        time_limit: 3,
        ensemble_size: 2000,
        save_directory: dir.path().join("results"),
        ensemble_directory: dir.path().join("ensembles"),
        seed: Some(5),
        ..Default::default()
    };
    let mut sim = Simulation::new(model, config).unwrap();
    sim.initialize().unwrap();
    sim.generate_data().unwrap();

    let composite = &sim.composites()[0];
    assert_eq!(composite.values().len(), 3);
    for record in composite.values() {
        assert_abs_diff_eq!(record[0], 2.0 * LN_2, epsilon = 0.01);
    }
    let text = fs::read_to_string(dir.path().join("results/H_AB.txt")).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "H|");
    assert!(lines[3].starts_with("002:+1.38"));
}

#[test]
fn post_analysis_runs_write_no_composite_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut model = CopyModel::new(
        DiscreteEstimator::new(2)
            .unwrap()
            .with_analysis(AnalysisMode::PostAnalysis),
    );
    model.composites = vec![
        CompositeVariable::joint_entropy(&["A", "B"], DiscreteEstimator::new(2).unwrap())
            .unwrap(),
    ];
    let config = SimulationConfig {
        time_limit: 3,
        ensemble_size: 20,
        save_directory: dir.path().join("results"),
        ensemble_directory: dir.path().join("ensembles"),
        seed: Some(5),
        ..Default::default()
    };
    let mut sim = Simulation::new(model, config).unwrap();
    sim.initialize().unwrap();
    sim.generate_data().unwrap();
    sim.post_analysis().unwrap();

    let results = dir.path().join("results");
    assert!(results.join("Node_A.txt").exists());
    assert!(!results.join("H_AB.txt").exists());
    assert!(sim.composites()[0].values().is_empty());
}
