/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! rtpart – feasibility analysis for fixed-priority tasks on identical
//! multiprocessors.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task          – periodic task model and taskset validation
//! ├── config/       – YAML taskset files
//! ├── rta/          – interference and single-pass response time
//! └── scheduler/    – P-DM, FBB-FDD, DMPM, RMDP
//!     ├── acceptance   – pluggable per-processor acceptance tests
//!     ├── feasibility  – Liu & Layland bound
//!     ├── partition    – processor layout and first fit
//!     ├── split        – semi-partitioned capacity splitting
//!     └── error        – verdict reasons and precondition errors
//! ```

pub mod config;
pub mod rta;
pub mod scheduler;
pub mod task;
