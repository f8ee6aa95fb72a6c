/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Offline tooling around `rtpart`.
//!
//! ```text
//! gen         Kato taskset generator
//! config      YAML simulation parameters
//! montecarlo  schedulable-fraction estimation and utilisation sweeps
//! ```

pub mod config;
pub mod gen;
pub mod montecarlo;
