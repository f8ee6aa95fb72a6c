/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Liu & Layland utilisation-bound feasibility.
//!
//! # Theory
//! **Liu & Layland (1973)**: Under Rate Monotonic scheduling (shorter period →
//! higher priority), a task set of `n` independent periodic tasks is
//! **guaranteed** schedulable on one CPU if:
//!
//! $$U = \sum_{i=1}^{n} \frac{C_i}{T_i} \leq n \left(2^{1/n} - 1\right)$$
//!
//! The bound tightens as `n` grows, converging to `ln(2) ≈ 0.693`.
//!
//! | n | Bound |
//! |---|---|
//! | 1 | 1.000 |
//! | 2 | 0.828 |
//! | 3 | 0.780 |
//! | 5 | 0.743 |
//! | ∞ | ln(2) ≈ 0.693 |
//!
//! RMDP uses the bound twice: as the whole-task acceptance test
//! ([`LiuLaylandTest`]) and, through [`bound_residual`], as the spare
//! capacity a processor offers to a split task.

use tracing::trace;

use super::acceptance::{AcceptanceTest, Admission};
use crate::task::{total_utilization, Task};

// ── Public API ────────────────────────────────────────────────────────────────

/// Compute the Liu & Layland utilisation upper bound for `n` tasks.
///
/// `U_bound(n) = n × (2^(1/n) − 1)`
///
/// Returns `1.0` for `n = 1` and `0.0` for `n = 0`.
pub fn liu_layland_bound(n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let nf = n as f64;
    nf * (2.0_f64.powf(1.0 / nf) - 1.0)
}

/// `U_k − bound(n_k + 1)` for a processor currently holding `assigned`.
///
/// This is the quantity RMDP converts into split capacity.  It is positive
/// only when the processor is already loaded past the bound for one more task.
pub fn bound_residual(assigned: &[Task]) -> f64 {
    total_utilization(assigned) - liu_layland_bound(assigned.len() + 1)
}

// ── LiuLaylandTest ────────────────────────────────────────────────────────────

/// Acceptance test used by RMDP: admit when the processor's utilisation with
/// the new task stays within the bound for `|assigned| + 1` tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiuLaylandTest;

impl AcceptanceTest for LiuLaylandTest {
    fn name(&self) -> &'static str {
        "liu_layland"
    }

    fn admit(&self, task: &Task, assigned: &[Task]) -> Admission {
        let u = total_utilization(assigned) + task.utilization();
        let bound = liu_layland_bound(assigned.len() + 1);

        trace!(
            priority = task.priority,
            utilization = u,
            bound = bound,
            "Liu & Layland test"
        );

        if u <= bound {
            Admission::Accepted
        } else {
            Admission::Rejected
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
