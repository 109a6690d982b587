// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # infodyn
//!
//! Information dynamics of stochastic networks: entropy, mutual information, transfer
//! entropy and the α decomposition of each node's information balance, estimated over
//! ensembles of independently simulated replicates.
//!
//! ## Quick Start
//!
//! ```rust
//! use infodyn::estimators::approaches::DiscreteEstimator;
//! use infodyn::estimators::InformationEstimator;
//! use infodyn::state::StateSpace;
//!
//! let mut est = DiscreteEstimator::new(2).unwrap();
//! est.init_source_realtime(&["A".to_string(), "A'".to_string()]).unwrap();
//! for bit in [0.0, 1.0, 0.0, 1.0] {
//!     let mut state = StateSpace::zeros(&["A"]);
//!     state.set("A", bit);
//!     let mut next = StateSpace::zeros(&["A"]);
//!     next.set("A", 1.0 - bit);
//!     est.update_source_realtime(&state, &next).unwrap();
//! }
//! // A' is a deterministic function of A: one bit shared.
//! let mi = est.mutual_information(&["A", "A'"], &[]).unwrap();
//! assert!((mi - std::f64::consts::LN_2).abs() < 1e-12);
//! ```
//!
//! ## Estimation Approaches
//!
//! | Quantity | Discrete (binning) | Continuous (kNN) |
//! |----------|--------------------|------------------|
//! | Entropy | plug-in | Kozachenko–Leonenko |
//! | Conditional entropy | H(A∪B) - H(B) | H(A) - I(A;B) |
//! | (Conditional) mutual information | entropy identities | KSG |
//! | Multiple mutual information | recursive | recursive |
//!
//! All values are in nats.
//!
//! ## Architecture
//!
//! 1. **Estimators** ([`estimators`]): the [`InformationEstimator`] capability trait,
//!    its discrete and kNN implementations, and composite quantities built on top.
//! 2. **Network** ([`network`]): nodes and links that turn estimator primitives into
//!    named per-step series, plus the E-value balance.
//! 3. **Simulation** ([`simulation`]): the ensemble driver, model hooks, configuration
//!    and result files.
//!
//! [`InformationEstimator`]: estimators::InformationEstimator

pub mod error;
pub mod estimators;
pub mod network;
pub mod simulation;
pub mod snapshot;
pub mod state;

pub use error::{InfoDynError, Result};
pub use estimators::{AnalysisMode, Estimator, InformationEstimator};
pub use network::Network;
pub use simulation::{Model, Simulation, SimulationConfig};
pub use state::StateSpace;
