// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Module containing tests for the ensemble driver and its result files.
mod composite_tests;
mod config_tests;
mod driver_error_tests;
