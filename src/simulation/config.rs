// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{InfoDynError, Result};

/// Run parameters of a [`Simulation`](super::Simulation).
///
/// Missing fields in a JSON file fall back to [`Default`]. An empty node or link
/// selection means "all of them".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of dynamics steps of the full horizon.
    pub time_limit: usize,
    /// First estimated time step (realtime).
    pub cut_down: usize,
    /// End of the estimated window, exclusive; `None` means `time_limit`.
    pub cut_up: Option<usize>,
    /// Snapshot spacing in post-analysis mode.
    pub save_interval: usize,
    /// Independent replicates per ensemble.
    pub ensemble_size: usize,
    pub save_directory: PathBuf,
    pub ensemble_directory: PathBuf,
    pub selected_nodes: Vec<String>,
    pub selected_links: Vec<(String, String)>,
    /// Seed of the trajectory generator; OS entropy when unset.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_limit: 10,
            cut_down: 0,
            cut_up: None,
            save_interval: 1,
            ensemble_size: 1000,
            save_directory: PathBuf::from("results"),
            ensemble_directory: PathBuf::from("ensembles"),
            selected_nodes: Vec::new(),
            selected_links: Vec::new(),
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load and validate a JSON configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(InfoDynError::Configuration(msg));
        if self.time_limit == 0 {
            return fail("time_limit must be at least 1".to_string());
        }
        if self.ensemble_size == 0 {
            return fail("ensemble_size must be at least 1".to_string());
        }
        if self.save_interval == 0 {
            return fail("save_interval must be at least 1".to_string());
        }
        let window = self.cut_window();
        if window.end > self.time_limit {
            return fail(format!(
                "cut_up {} exceeds time_limit {}",
                window.end, self.time_limit
            ));
        }
        if window.is_empty() {
            return fail(format!(
                "empty estimation window {}..{}",
                window.start, window.end
            ));
        }
        Ok(())
    }

    /// Time steps estimated in realtime mode.
    pub fn cut_window(&self) -> Range<usize> {
        self.cut_down..self.cut_up.unwrap_or(self.time_limit)
    }

    /// Time steps at which post-analysis snapshots are taken.
    pub fn snapshot_times(&self) -> Vec<usize> {
        (self.save_interval..self.time_limit)
            .step_by(self.save_interval.max(1))
            .collect()
    }
}
