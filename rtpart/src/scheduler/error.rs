/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured outcome and error types for a scheduling run.
//!
//! Two types model the two failure layers:
//!
//! * [`Rejection`]: why a well-formed taskset was found **unschedulable**.
//!   This is an expected, common result (a Monte-Carlo sweep tallies it), so
//!   it travels inside [`Verdict::Unschedulable`](super::Verdict) rather than
//!   as an `Err`.
//! * [`SchedulerError`]: the input violated a precondition and no
//!   assignment was attempted.
//!
//! **Do not** collapse these into `anyhow::Error` on library paths; callers
//! match on the variants.

use thiserror::Error;

// ── Infeasibility ─────────────────────────────────────────────────────────────

/// Reason a taskset was declared unschedulable.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// The task failed the acceptance test on every processor and, for the
    /// semi-partitioned algorithms, could not be split to completion either.
    PlacementRejected {
        priority: usize,
        execution_time: f64,
        period: f64,
    },

    /// The algorithm's acceptance test has no decision procedure, so nothing
    /// could be placed.  This is a known gap, not a property of the taskset.
    UnimplementedTest { test: &'static str, priority: usize },
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::PlacementRejected {
                priority,
                execution_time,
                period,
            } => write!(
                f,
                "task {} (C={}, T={}, U={:.3}) cannot be placed whole or split",
                priority,
                execution_time,
                period,
                execution_time / period,
            ),

            Rejection::UnimplementedTest { test, priority } => write!(
                f,
                "acceptance test '{}' is not implemented; task {} could not be placed",
                test, priority
            ),
        }
    }
}

// ── Precondition errors ───────────────────────────────────────────────────────

/// Input rejected before any assignment began.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The processor count was zero.
    #[error("processor count must be at least 1")]
    NoProcessors,

    /// A task has a non-positive or non-finite execution time or period.
    #[error("task at index {index} is malformed: execution_time={execution_time}, period={period} (both must be finite and > 0)")]
    InvalidTask {
        index: usize,
        execution_time: f64,
        period: f64,
    },

    /// Two tasks share a priority index.  The index is the task identity in
    /// the split table, so it must be unique.
    #[error("priority index {priority} is used by more than one task")]
    DuplicatePriority { priority: usize },

    /// The algorithm name is not recognised.
    #[error("unknown scheduling algorithm: '{0}' (valid: p_dm, fbb_fdd, dmpm, rmdp)")]
    UnknownAlgorithm(String),
}
