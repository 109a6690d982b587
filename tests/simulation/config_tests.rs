// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::PathBuf;

use infodyn::InfoDynError;
use infodyn::simulation::SimulationConfig;
use rstest::rstest;

#[test]
fn json_file_with_partial_fields_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.json");
    std::fs::write(
        &path,
        r#"{
            "time_limit": 6,
            "cut_down": 2,
            "ensemble_size": 50,
            "selected_links": [["A", "B"]],
            "seed": 11
        }"#,
    )
    .unwrap();
    let config = SimulationConfig::from_json_file(&path).unwrap();
    assert_eq!(config.time_limit, 6);
    assert_eq!(config.cut_window(), 2..6);
    assert_eq!(config.save_interval, 1);
    assert_eq!(config.selected_links, vec![("A".to_string(), "B".to_string())]);
    assert_eq!(config.save_directory, PathBuf::from("results"));
    assert_eq!(config.seed, Some(11));
}

#[test]
fn malformed_json_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ time_limit: ").unwrap();
    assert!(matches!(
        SimulationConfig::from_json_file(&path),
        Err(InfoDynError::Json(_))
    ));
    assert!(matches!(
        SimulationConfig::from_json_file(dir.path().join("missing.json")),
        Err(InfoDynError::Io(_))
    ));
}

#[rstest]
#[case(SimulationConfig { time_limit: 0, ..Default::default() })]
#[case(SimulationConfig { ensemble_size: 0, ..Default::default() })]
#[case(SimulationConfig { save_interval: 0, ..Default::default() })]
#[case(SimulationConfig { time_limit: 5, cut_up: Some(6), ..Default::default() })]
#[case(SimulationConfig { cut_down: 4, cut_up: Some(4), ..Default::default() })]
fn invalid_configurations_are_rejected(#[case] config: SimulationConfig) {
    assert!(matches!(
        config.validate(),
        Err(InfoDynError::Configuration(_))
    ));
}

#[rstest]
#[case(10, 1, vec![1, 2, 3, 4, 5, 6, 7, 8, 9])]
#[case(10, 3, vec![3, 6, 9])]
#[case(3, 5, vec![])]
fn snapshot_times_are_multiples_of_the_interval(
    #[case] time_limit: usize,
    #[case] save_interval: usize,
    #[case] expected: Vec<usize>,
) {
    let config = SimulationConfig {
        time_limit,
        save_interval,
        ..Default::default()
    };
    assert_eq!(config.snapshot_times(), expected);
}
