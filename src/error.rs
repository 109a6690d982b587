// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use thiserror::Error;

/// Errors raised by estimators, the network model and the simulation driver.
///
/// Every variant is fatal to the current run: they signal configuration or usage
/// errors, never transient conditions. Numerical edge cases such as zero-probability
/// cells or slightly negative kNN estimates are regular outputs, not errors.
#[derive(Debug, Error)]
pub enum InfoDynError {
    /// A histogram with zero total occurrences was asked for a probability distribution.
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// Declared variable count and joint dimension (or ensemble columns) disagree.
    #[error("dimension mismatch in {context}: expected {expected}, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// A required model hook was left at its default implementation.
    #[error("model hook `{0}` is not implemented")]
    UnimplementedHook(&'static str),

    /// A derived quantity was requested before its prerequisites were estimated.
    #[error("incomplete estimation: {0}")]
    IncompleteEstimation(String),

    /// Malformed configuration, bulk-restore data or out-of-phase driver call.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A variable name that is not part of the source or state space.
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InfoDynError>;

impl InfoDynError {
    pub(crate) fn dimension(context: impl Into<String>, expected: usize, found: usize) -> Self {
        InfoDynError::DimensionMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}
