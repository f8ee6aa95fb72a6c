/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Whole-task placement: the per-processor layout and the first-fit scan.

use tracing::debug;

use super::acceptance::{AcceptanceTest, Admission};
use crate::task::{total_utilization, Task};

// ── ProcessorLayout ───────────────────────────────────────────────────────────

/// Whole tasks assigned to each processor, in assignment order.
///
/// Lists only grow: a placed task is never moved, reordered or removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessorLayout {
    processors: Vec<Vec<Task>>,
}

impl ProcessorLayout {
    /// `num_processors` empty processors.
    pub fn new(num_processors: usize) -> Self {
        Self {
            processors: vec![Vec::new(); num_processors],
        }
    }

    pub fn num_processors(&self) -> usize {
        self.processors.len()
    }

    /// Tasks on processor `k`.  Empty for an out-of-range index.
    pub fn tasks(&self, k: usize) -> &[Task] {
        self.processors.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All per-processor task lists, indexed by processor.
    pub fn processors(&self) -> &[Vec<Task>] {
        &self.processors
    }

    /// Utilisation of processor `k` from its whole tasks only.
    pub fn utilization(&self, k: usize) -> f64 {
        total_utilization(self.tasks(k))
    }

    /// Utilisation of every processor, indexed by processor.
    pub fn utilizations(&self) -> Vec<f64> {
        self.processors
            .iter()
            .map(|p| total_utilization(p))
            .collect()
    }

    /// Number of whole tasks across all processors.
    pub fn task_count(&self) -> usize {
        self.processors.iter().map(Vec::len).sum()
    }

    /// Processor holding the task with identity `priority`, if placed whole.
    pub fn processor_of(&self, priority: usize) -> Option<usize> {
        self.processors
            .iter()
            .position(|p| p.iter().any(|t| t.priority == priority))
    }

    fn push(&mut self, k: usize, task: Task) {
        self.processors[k].push(task);
    }
}

// ── First fit ─────────────────────────────────────────────────────────────────

/// Result of one first-fit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Appended to the processor with this index.
    Placed(usize),
    /// Every processor ran the test and rejected the task.
    Rejected,
    /// No processor accepted and at least one had no decision procedure.
    Undecided,
}

/// Append `task` to the first processor, in index order, whose acceptance
/// test admits it.
///
/// The layout is untouched unless [`Placement::Placed`] is returned.
pub fn first_fit(
    task: &Task,
    layout: &mut ProcessorLayout,
    test: &dyn AcceptanceTest,
) -> Placement {
    let mut undecided = false;

    for k in 0..layout.num_processors() {
        match test.admit(task, layout.tasks(k)) {
            Admission::Accepted => {
                layout.push(k, *task);
                debug!(
                    priority = task.priority,
                    processor = k,
                    test = test.name(),
                    utilization_after = layout.utilization(k),
                    "placed whole"
                );
                return Placement::Placed(k);
            }
            Admission::Rejected => {}
            Admission::Undecided => undecided = true,
        }
    }

    debug!(
        priority = task.priority,
        test = test.name(),
        undecided = undecided,
        "no processor admits task"
    );

    if undecided {
        Placement::Undecided
    } else {
        Placement::Rejected
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
