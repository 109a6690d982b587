// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::Path;

use super::statistics::{Case, OccurrenceStatistics, Pdf, PdfSource};
use crate::error::{InfoDynError, Result};
use crate::snapshot::read_snapshot;
use crate::state::{StateSpace, interleaved_with_primes, read_variable};

/// Online joint histogram over Q-ary symbols of the tracked variables.
///
/// The full Q^dimension grid is allocated when tracking starts so that unseen
/// combinations are present with count zero.
#[derive(Debug, Clone)]
pub struct BinningSource {
    q: usize,
    pinned_dimension: Option<usize>,
    statistics: OccurrenceStatistics,
}

impl BinningSource {
    pub fn new(q: usize) -> Self {
        Self {
            q,
            pinned_dimension: None,
            statistics: OccurrenceStatistics::default(),
        }
    }

    /// Source that only accepts exactly `dimension` tracked variables.
    pub fn with_dimension(q: usize, dimension: usize) -> Self {
        Self {
            pinned_dimension: Some(dimension),
            ..Self::new(q)
        }
    }

    pub fn q(&self) -> usize {
        self.q
    }

    pub fn statistics(&self) -> &OccurrenceStatistics {
        &self.statistics
    }

    pub fn variable_names(&self) -> &[String] {
        self.statistics.variable_names()
    }

    /// Start a new histogram over `tracked`, every Q^d cell present with count zero.
    pub fn init_tracking(&mut self, tracked: &[String]) -> Result<()> {
        if let Some(d) = self.pinned_dimension {
            if d != tracked.len() {
                return Err(InfoDynError::dimension("binning source", d, tracked.len()));
            }
        }
        let mut statistics = OccurrenceStatistics::new(tracked.to_vec());
        for case in full_grid(self.q, tracked.len()) {
            statistics.ensure_case(case);
        }
        self.statistics = statistics;
        Ok(())
    }

    pub fn update(&mut self, state: &StateSpace, buffer: &StateSpace) -> Result<()> {
        let case = self
            .statistics
            .variable_names()
            .iter()
            .map(|name| to_symbol(read_variable(name, state, buffer)?, self.q))
            .collect::<Result<Case>>()?;
        self.statistics.record(case)
    }

    /// Histogram every row of a snapshot holding `X|X'` pairs for each node.
    pub fn load_snapshot(&mut self, nodes: &[String], snapshot: &Path) -> Result<()> {
        let names = interleaved_with_primes(nodes);
        let rows = read_snapshot(snapshot, names.len(), None)?;
        self.init_tracking(&names)?;
        for row in rows.rows() {
            let case = row
                .iter()
                .map(|&v| to_symbol(v, self.q))
                .collect::<Result<Case>>()?;
            self.statistics.record(case)?;
        }
        Ok(())
    }
}

impl PdfSource for BinningSource {
    fn desired_pdf(&self, variables: &[&str]) -> Result<Pdf> {
        self.statistics.generate_desired_pdf(variables)
    }
}

/// Every case of a `dimension`-tuple over `0..q`, in lexicographic order.
fn full_grid(q: usize, dimension: usize) -> Vec<Case> {
    let mut cases: Vec<Case> = vec![Vec::with_capacity(dimension)];
    for _ in 0..dimension {
        cases = cases
            .into_iter()
            .flat_map(|prefix| {
                (0..q).map(move |s| {
                    let mut case = prefix.clone();
                    case.push(s);
                    case
                })
            })
            .collect();
    }
    cases
}

/// Map a state value onto a symbol index in `0..q`.
fn to_symbol(value: f64, q: usize) -> Result<usize> {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 || rounded >= q as f64 {
        return Err(InfoDynError::Configuration(format!(
            "value {value} is not a symbol in 0..{q}"
        )));
    }
    Ok(rounded as usize)
}
