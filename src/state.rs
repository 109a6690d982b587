// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Variable naming and the state space shared between the driver and the model.
//!
//! A variable name labels one coordinate of a joint sample. The primed form `"X'"`
//! denotes the next-step value of `"X"`, which is read from the update buffer
//! instead of the current state.

use std::collections::HashMap;

use crate::error::{InfoDynError, Result};

/// Suffix marking the next-step value of a variable.
pub const PRIME: char = '\'';

/// Name of the next-step counterpart of `name`.
pub fn primed(name: &str) -> String {
    format!("{name}{PRIME}")
}

/// Split a variable name into its base name and whether it is primed.
pub fn split_primed(name: &str) -> (&str, bool) {
    match name.strip_suffix(PRIME) {
        Some(base) => (base, true),
        None => (name, false),
    }
}

/// Current (`X`) and next-step (`X'`) labels for every variable, interleaved.
///
/// `["A", "B"]` becomes `["A", "A'", "B", "B'"]`, the column layout of ensemble snapshots.
pub fn interleaved_with_primes<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .flat_map(|n| [n.as_ref().to_string(), primed(n.as_ref())])
        .collect()
}

/// Values of all network variables at one time step.
///
/// The same type serves as the current state and as the update buffer the dynamics
/// write the next step into.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSpace {
    values: HashMap<String, f64>,
}

impl StateSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// State space with every name set to zero.
    pub fn zeros<S: AsRef<str>>(names: &[S]) -> Self {
        let values = names.iter().map(|n| (n.as_ref().to_string(), 0.0)).collect();
        Self { values }
    }

    pub fn get(&self, name: &str) -> Result<f64> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| InfoDynError::UnknownVariable(name.to_string()))
    }

    pub fn set(&mut self, name: &str, value: f64) {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
        } else {
            self.values.insert(name.to_string(), value);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy every value of `buffer` into this state (the "update states" step).
    pub fn advance_from(&mut self, buffer: &StateSpace) {
        for (name, value) in &buffer.values {
            self.set(name, *value);
        }
    }
}

/// Read a possibly primed variable: primed names come from `buffer`, others from `state`.
pub fn read_variable(name: &str, state: &StateSpace, buffer: &StateSpace) -> Result<f64> {
    let (base, is_next) = split_primed(name);
    if is_next {
        buffer.get(base)
    } else {
        state.get(base)
    }
}
