// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Occurrence histograms over tuples of discrete symbols and the PDFs derived from them.

use std::collections::HashMap;

use crate::error::{InfoDynError, Result};

/// Tuple of symbol indices, one per selected variable.
pub type Case = Vec<usize>;

/// Raw occurrence counts per joint case.
pub type Histogram = HashMap<Case, u64>;

/// Probability per (marginal) case; sums to one.
pub type Pdf = HashMap<Case, f64>;

/// Anything that can produce a normalized PDF over an ordered subset of its variables.
pub trait PdfSource {
    fn desired_pdf(&self, variables: &[&str]) -> Result<Pdf>;
}

/// Joint occurrence histogram with one labelled coordinate per variable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OccurrenceStatistics {
    variable_names: Vec<String>,
    counts: Histogram,
}

impl OccurrenceStatistics {
    /// Empty histogram over `variable_names`.
    pub fn new(variable_names: Vec<String>) -> Self {
        Self {
            variable_names,
            counts: HashMap::new(),
        }
    }

    /// Restore a raw histogram; every case must have one coordinate per variable.
    pub fn from_counts(variable_names: Vec<String>, counts: Histogram) -> Result<Self> {
        let d = variable_names.len();
        if let Some(case) = counts.keys().find(|case| case.len() != d) {
            return Err(InfoDynError::dimension("occurrence statistics", d, case.len()));
        }
        Ok(Self {
            variable_names,
            counts,
        })
    }

    pub fn variable_names(&self) -> &[String] {
        &self.variable_names
    }

    pub fn dimension(&self) -> usize {
        self.variable_names.len()
    }

    pub fn counts(&self) -> &Histogram {
        &self.counts
    }

    /// Set a cell to zero without touching existing counts.
    pub fn ensure_case(&mut self, case: Case) {
        self.counts.entry(case).or_insert(0);
    }

    /// Increment the count of `case` by one.
    pub fn record(&mut self, case: Case) -> Result<()> {
        if case.len() != self.dimension() {
            return Err(InfoDynError::dimension(
                "occurrence statistics",
                self.dimension(),
                case.len(),
            ));
        }
        *self.counts.entry(case).or_insert(0) += 1;
        Ok(())
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.variable_names
            .iter()
            .position(|v| v == name)
            .ok_or_else(|| InfoDynError::UnknownVariable(name.to_string()))
    }

    /// Marginal histogram over exactly `variables`, in the given order.
    ///
    /// Counts of all cases that agree on the selected coordinates are summed. An empty
    /// selection returns the full histogram unchanged.
    pub fn meshed_for(&self, variables: &[&str]) -> Result<Histogram> {
        if variables.is_empty() {
            return Ok(self.counts.clone());
        }
        let mesh_index = variables
            .iter()
            .map(|v| self.index_of(v))
            .collect::<Result<Vec<usize>>>()?;

        let mut meshed: Histogram = HashMap::new();
        for (case, &count) in &self.counts {
            let mesh_case: Case = mesh_index.iter().map(|&i| case[i]).collect();
            *meshed.entry(mesh_case).or_insert(0) += count;
        }
        Ok(meshed)
    }

    /// Normalized marginal distribution over `variables`.
    pub fn generate_desired_pdf(&self, variables: &[&str]) -> Result<Pdf> {
        normalize(self.meshed_for(variables)?)
    }
}

impl PdfSource for OccurrenceStatistics {
    fn desired_pdf(&self, variables: &[&str]) -> Result<Pdf> {
        self.generate_desired_pdf(variables)
    }
}

/// Turn counts into probabilities. Zero-count cells stay in the PDF with probability 0.
pub fn normalize(histogram: Histogram) -> Result<Pdf> {
    let total: u64 = histogram.values().sum();
    if total == 0 {
        return Err(InfoDynError::DegenerateDistribution(
            "zero total occurrence in statistics".to_string(),
        ));
    }
    let total_f = total as f64;
    Ok(histogram
        .into_iter()
        .map(|(case, count)| (case, count as f64 / total_f))
        .collect())
}
