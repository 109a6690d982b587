// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infodyn::estimators::Estimator;
use infodyn::estimators::approaches::DiscreteEstimator;
use infodyn::network::Network;
use infodyn::simulation::{Model, Phase, Simulation, SimulationConfig};
use infodyn::{InfoDynError, Result};

use crate::test_helpers::{CopyModel, StdRng};

struct Blank;

impl Model for Blank {}

/// Topology and estimator only; no dynamics.
struct Static;

impl Model for Static {
    fn set_topology(&self, network: &mut Network) -> Result<()> {
        network.set_nodes(&["A"])
    }

    fn set_estimator(&self) -> Result<Estimator> {
        Ok(DiscreteEstimator::new(2)?.into())
    }

    fn init_state_space(&self, _state: &mut infodyn::StateSpace, _rng: &mut StdRng) -> Result<()> {
        Ok(())
    }
}

/// Three nodes in a chain.
struct Chain;

impl Model for Chain {
    fn set_topology(&self, network: &mut Network) -> Result<()> {
        network.set_nodes(&["A", "B", "C"])?;
        network.add_link("A", "B")?;
        network.add_link("B", "C")
    }

    fn init_state_space(&self, _state: &mut infodyn::StateSpace, _rng: &mut StdRng) -> Result<()> {
        Ok(())
    }

    fn set_estimator(&self) -> Result<Estimator> {
        Ok(DiscreteEstimator::new(2)?.into())
    }

    fn dynamics_of_states(
        &self,
        state: &infodyn::StateSpace,
        buffer: &mut infodyn::StateSpace,
        _rng: &mut StdRng,
    ) -> Result<()> {
        buffer.advance_from(state);
        Ok(())
    }
}

fn config(dir: &std::path::Path) -> SimulationConfig {
    SimulationConfig {
        time_limit: 2,
        ensemble_size: 5,
        save_directory: dir.join("results"),
        ensemble_directory: dir.join("ensembles"),
        seed: Some(1),
        ..Default::default()
    }
}

#[test]
fn default_hooks_are_unimplemented() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = Simulation::new(Blank, config(dir.path())).unwrap();
    assert!(matches!(
        sim.initialize(),
        Err(InfoDynError::UnimplementedHook("set_topology"))
    ));
}

#[test]
fn missing_dynamics_abort_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let mut sim = Simulation::new(Static, config(dir.path())).unwrap();
    assert!(matches!(
        sim.initialize(),
        Err(InfoDynError::UnimplementedHook("dynamics_of_states"))
    ));
    assert!(!dir.path().join("results/Node_A.txt").exists());
}

#[test]
fn operations_out_of_phase_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let model = CopyModel::new(DiscreteEstimator::new(2).unwrap());
    let mut sim = Simulation::new(model, config(dir.path())).unwrap();
    assert_eq!(sim.phase(), Phase::Idle);
    assert!(matches!(
        sim.generate_data(),
        Err(InfoDynError::Configuration(_))
    ));
    sim.initialize().unwrap();
    assert!(matches!(
        sim.initialize(),
        Err(InfoDynError::Configuration(_))
    ));
    sim.generate_data().unwrap();
    assert!(matches!(
        sim.generate_data(),
        Err(InfoDynError::Configuration(_))
    ));
}

#[test]
fn partial_link_selection_cannot_balance_e() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.selected_links = vec![("A".to_string(), "B".to_string())];
    let mut sim = Simulation::new(Chain, cfg).unwrap();
    sim.initialize().unwrap();
    assert!(matches!(
        sim.generate_data(),
        Err(InfoDynError::IncompleteEstimation(_))
    ));
    // Series computed before the failure are kept.
    assert_eq!(sim.network().link("A", "B").unwrap().len(), 2);
    assert!(sim.network().link("B", "C").unwrap().is_empty());
}

#[test]
fn unknown_selections_are_configuration_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.selected_links = vec![("B".to_string(), "A".to_string())];
    let mut sim = Simulation::new(Chain, cfg).unwrap();
    assert!(matches!(
        sim.initialize(),
        Err(InfoDynError::Configuration(_))
    ));

    let mut cfg = config(dir.path());
    cfg.selected_nodes = vec!["D".to_string()];
    let mut sim = Simulation::new(Chain, cfg).unwrap();
    assert!(matches!(
        sim.initialize(),
        Err(InfoDynError::Configuration(_))
    ));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.ensemble_size = 0;
    assert!(matches!(
        Simulation::new(Chain, cfg),
        Err(InfoDynError::Configuration(_))
    ));
}
