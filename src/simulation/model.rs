// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::BTreeMap;

use rand::rngs::StdRng;

use crate::error::{InfoDynError, Result};
use crate::estimators::Estimator;
use crate::estimators::composite::CompositeVariable;
use crate::network::Network;
use crate::state::StateSpace;

/// Free-form run metadata, persisted as `simulation_properties.json`.
pub type Properties = BTreeMap<String, serde_json::Value>;

/// Hooks a concrete stochastic network model supplies to the driver.
///
/// Every required hook defaults to [`InfoDynError::UnimplementedHook`], which the driver
/// surfaces from [`Simulation::initialize`](super::Simulation::initialize).
pub trait Model {
    fn name(&self) -> &str {
        "Model"
    }

    /// Create nodes and links.
    fn set_topology(&self, _network: &mut Network) -> Result<()> {
        Err(InfoDynError::UnimplementedHook("set_topology"))
    }

    /// Assign a fresh random initial value to every node.
    fn init_state_space(&self, _state: &mut StateSpace, _rng: &mut StdRng) -> Result<()> {
        Err(InfoDynError::UnimplementedHook("init_state_space"))
    }

    /// The estimator bound to this run, carrying its analysis mode.
    fn set_estimator(&self) -> Result<Estimator> {
        Err(InfoDynError::UnimplementedHook("set_estimator"))
    }

    /// Write the next-step value of every node into `buffer`.
    fn dynamics_of_states(
        &self,
        _state: &StateSpace,
        _buffer: &mut StateSpace,
        _rng: &mut StdRng,
    ) -> Result<()> {
        Err(InfoDynError::UnimplementedHook("dynamics_of_states"))
    }

    /// Model-specific metadata; optional.
    fn register_properties(&self, _properties: &mut Properties) {}

    /// Extra quantities evaluated alongside the network in realtime runs; optional.
    fn composite_variables(&self) -> Result<Vec<CompositeVariable>> {
        Ok(Vec::new())
    }
}
