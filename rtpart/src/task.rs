/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Periodic task model shared by every analysis and algorithm.
//!
//! ```text
//! generator / YAML  ──►  Vec<Task>  ──(PartitionScheduler)──►  ScheduleOutcome
//!                         ↑ ordered, immutable                  ↑ verdict + layout
//! ```
//!
//! # Ownership model
//! A taskset is **moved** into one scheduling run.  Processors keep their own
//! copies of the tasks assigned to them (`Task` is `Copy`), so the layout
//! returned from a run never borrows from the input.
//!
//! # Priority and identity
//! `priority` is a rank: a lower value means a higher priority.  It is also the
//! identity used to index per-task split bookkeeping, which is why
//! [`validate_taskset`] rejects duplicates.

use std::collections::BTreeSet;

use crate::scheduler::SchedulerError;

// ── Task ──────────────────────────────────────────────────────────────────────

/// One periodic task with an implicit deadline (`deadline == period`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Task {
    /// Worst-case execution time.
    pub execution_time: f64,

    /// Period, which is also the relative deadline.
    pub period: f64,

    /// Priority rank and task identity.  Smaller is higher priority.
    pub priority: usize,
}

impl Task {
    /// Construct a task from its `(execution_time, period, priority)` triplet.
    pub fn new(execution_time: f64, period: f64, priority: usize) -> Self {
        Self {
            execution_time,
            period,
            priority,
        }
    }

    /// Relative deadline.  Always equal to the period.
    pub fn deadline(&self) -> f64 {
        self.period
    }

    /// Processor utilisation fraction: `execution_time / period`.
    pub fn utilization(&self) -> f64 {
        self.execution_time / self.period
    }

    /// Returns `true` if `self` interferes with `other` under the single-pass
    /// response-time analysis.  Equal priority counts as interfering.
    pub fn interferes_with(&self, other: &Task) -> bool {
        self.priority <= other.priority
    }

    fn is_well_formed(&self) -> bool {
        self.execution_time.is_finite()
            && self.period.is_finite()
            && self.execution_time > 0.0
            && self.period > 0.0
    }
}

impl From<(f64, f64, usize)> for Task {
    fn from((execution_time, period, priority): (f64, f64, usize)) -> Self {
        Task::new(execution_time, period, priority)
    }
}

// ── Taskset helpers ───────────────────────────────────────────────────────────

/// Sum of `execution_time / period` over `tasks`.
pub fn total_utilization(tasks: &[Task]) -> f64 {
    tasks.iter().map(Task::utilization).sum()
}

/// Precondition check run before any assignment begins.
///
/// # Errors
/// * [`SchedulerError::InvalidTask`] for a non-positive or non-finite
///   execution time or period.
/// * [`SchedulerError::DuplicatePriority`] when two tasks share a priority
///   index (it is their identity in the split table).
pub fn validate_taskset(tasks: &[Task]) -> Result<(), SchedulerError> {
    let mut seen = BTreeSet::new();

    for (index, task) in tasks.iter().enumerate() {
        if !task.is_well_formed() {
            return Err(SchedulerError::InvalidTask {
                index,
                execution_time: task.execution_time,
                period: task.period,
            });
        }
        if !seen.insert(task.priority) {
            return Err(SchedulerError::DuplicatePriority {
                priority: task.priority,
            });
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
