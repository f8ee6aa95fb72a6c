/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Single-pass response-time analysis.
//!
//! The bound computed here is **one level** of the classic response-time
//! recurrence: the task's own execution time plus the interference from every
//! equal-or-higher priority task already on the processor, evaluated over one
//! full deadline window.  It does not iterate to a fixed point.
//!
//! | Quantity | Formula |
//! |---|---|
//! | `R(T_i, k)` | `c_i + Σ interference(T_i, T_j)` for `T_j` on `k` with `prio_j <= prio_i` |
//! | acceptance | `R(T_i, k) < p_i` (strict) |
//!
//! When `T_i` is itself on processor `k` it matches `prio_j <= prio_i` and its
//! own interference is included.  The semi-partitioned splitter relies on this
//! exact value for its residual capacity.

pub mod interference;

use tracing::trace;

use crate::scheduler::acceptance::{AcceptanceTest, Admission};
use crate::task::Task;

pub use interference::interference;

/// One-step response-time bound of `task` against the tasks in `assigned`.
pub fn response_time(task: &Task, assigned: &[Task]) -> f64 {
    assigned
        .iter()
        .filter(|other| other.interferes_with(task))
        .fold(task.execution_time, |acc, other| {
            acc + interference(task, other)
        })
}

// ── ResponseTimeTest ──────────────────────────────────────────────────────────

/// Acceptance test used by P-DM and DMPM: admit when the single-pass
/// response time is strictly below the period.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseTimeTest;

impl AcceptanceTest for ResponseTimeTest {
    fn name(&self) -> &'static str {
        "response_time"
    }

    fn admit(&self, task: &Task, assigned: &[Task]) -> Admission {
        let r = response_time(task, assigned);
        trace!(
            priority = task.priority,
            response_time = r,
            period = task.period,
            "response-time test"
        );
        if r < task.period {
            Admission::Accepted
        } else {
            Admission::Rejected
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
