/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Semi-partitioned capacity splitting.
//!
//! When no processor admits a task whole, DMPM and RMDP try to spread its
//! execution time over the *spare capacity* of several processors, visited in
//! index order.  The two variants differ only in how a processor's spare
//! capacity `c_sk` for a splitting task with period `p_s` is computed:
//!
//! | Variant | `c_sk` on processor `k` |
//! |---|---|
//! | DMPM | `max_T (T.period − used(T)) / ceil(T.period / p_s)` over tasks on `k`, positive values only |
//! | RMDP | `(U_k − bound(n_k + 1)) · p_s` when positive |
//!
//! where `used(T)` is `T`'s recorded fraction on `k` if `T` is itself split,
//! otherwise its single-pass response time on `k`.
//!
//! # Spare-capacity flag
//! A processor whose flag is cleared is skipped for the rest of the run.  Both
//! variants clear it after a visit that does not complete the task.  On the
//! completing visit, DMPM clears it only when the requirement reaches exactly
//! zero and leaves it set on overshoot; RMDP always leaves it set.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::feasibility::bound_residual;
use super::partition::ProcessorLayout;
use crate::rta::response_time;
use crate::task::Task;

// ── SplitState ────────────────────────────────────────────────────────────────

/// Per-run bookkeeping for split tasks.
///
/// Owned by one scheduling run and never shared.  Fractions are keyed by
/// processor index, then by task identity (priority index); a missing entry
/// means zero.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitState {
    fractions: Vec<BTreeMap<usize, f64>>,
    spare: Vec<bool>,
    split: BTreeSet<usize>,
}

impl SplitState {
    /// Every processor starts with spare capacity and no task is split.
    pub fn new(num_processors: usize) -> Self {
        Self {
            fractions: vec![BTreeMap::new(); num_processors],
            spare: vec![true; num_processors],
            split: BTreeSet::new(),
        }
    }

    /// Execution capacity allocated to task `id` on processor `k`.
    pub fn fraction(&self, k: usize, id: usize) -> f64 {
        self.fractions
            .get(k)
            .and_then(|m| m.get(&id))
            .copied()
            .unwrap_or(0.0)
    }

    /// All split fractions hosted by processor `k`, keyed by task identity.
    pub fn fractions_on(&self, k: usize) -> Option<&BTreeMap<usize, f64>> {
        self.fractions.get(k)
    }

    /// `(processor, fraction)` pairs for task `id`, in processor order.
    pub fn fractions_of(&self, id: usize) -> Vec<(usize, f64)> {
        self.fractions
            .iter()
            .enumerate()
            .filter_map(|(k, m)| m.get(&id).map(|&c| (k, c)))
            .collect()
    }

    /// Sum of task `id`'s fractions across all processors.
    pub fn total_fraction(&self, id: usize) -> f64 {
        self.fractions_of(id).iter().map(|&(_, c)| c).sum()
    }

    pub fn has_spare_capacity(&self, k: usize) -> bool {
        self.spare.get(k).copied().unwrap_or(false)
    }

    pub fn is_split(&self, id: usize) -> bool {
        self.split.contains(&id)
    }

    /// Identities of every task marked split, ascending.
    pub fn split_tasks(&self) -> impl Iterator<Item = usize> + '_ {
        self.split.iter().copied()
    }

    fn mark_split(&mut self, id: usize) {
        self.split.insert(id);
    }

    fn record(&mut self, k: usize, id: usize, c: f64) {
        self.fractions[k].insert(id, c);
    }

    fn clear_spare(&mut self, k: usize) {
        self.spare[k] = false;
    }
}

// ── Splitter ──────────────────────────────────────────────────────────────────

/// Which spare-capacity formula a semi-partitioned algorithm uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splitter {
    /// Response-time residual (DMPM).
    ResponseTimeResidual,
    /// Liu & Layland residual (RMDP).
    BoundResidual,
}

impl Splitter {
    /// Try to split `task` across the processors that still have spare
    /// capacity.  Returns `true` when the whole execution time was allocated.
    ///
    /// The task is marked split before the first processor is visited, and
    /// stays marked even when splitting fails.
    pub fn split(self, task: &Task, layout: &ProcessorLayout, state: &mut SplitState) -> bool {
        state.mark_split(task.priority);

        match self {
            Splitter::ResponseTimeResidual => split_response_time(task, layout, state),
            Splitter::BoundResidual => split_bound(task, layout, state),
        }
    }
}

/// DMPM spare capacity of processor `k` for a splitting task of period `p_s`.
///
/// Zero when the processor hosts no task or no task leaves positive slack.
pub fn response_time_spare(
    k: usize,
    p_s: f64,
    layout: &ProcessorLayout,
    state: &SplitState,
) -> f64 {
    let tasks = layout.tasks(k);

    tasks
        .iter()
        .map(|t| {
            let used = if state.is_split(t.priority) {
                state.fraction(k, t.priority)
            } else {
                response_time(t, tasks)
            };
            (t.period - used) / (t.period / p_s).ceil()
        })
        .fold(0.0, |best, x| if x > best { x } else { best })
}

fn split_response_time(task: &Task, layout: &ProcessorLayout, state: &mut SplitState) -> bool {
    let id = task.priority;
    let p_s = task.period;
    let mut c_req = task.execution_time;

    for k in 0..layout.num_processors() {
        if !state.has_spare_capacity(k) {
            continue;
        }

        let mut c_sk = response_time_spare(k, p_s, layout, state);

        if c_sk != 0.0 {
            c_req -= c_sk;

            if c_req == 0.0 {
                state.record(k, id, c_sk);
                state.clear_spare(k);
                debug!(
                    priority = id,
                    processor = k,
                    fraction = c_sk,
                    "split complete (exact)"
                );
                return true;
            } else if c_req < 0.0 {
                // Overshoot: clip to what is still needed.  The spare flag is
                // intentionally left set on this path.
                c_sk += c_req;
                state.record(k, id, c_sk);
                debug!(
                    priority = id,
                    processor = k,
                    fraction = c_sk,
                    "split complete (clipped)"
                );
                return true;
            }

            state.record(k, id, c_sk);
            debug!(
                priority = id,
                processor = k,
                fraction = c_sk,
                remaining = c_req,
                "partial split"
            );
        }

        state.clear_spare(k);
    }

    debug!(
        priority = id,
        remaining = c_req,
        "split failed: spare capacity exhausted"
    );
    false
}

fn split_bound(task: &Task, layout: &ProcessorLayout, state: &mut SplitState) -> bool {
    let id = task.priority;
    let p_s = task.period;
    let mut c_req = task.execution_time;

    for k in 0..layout.num_processors() {
        if !state.has_spare_capacity(k) {
            continue;
        }

        let u_sk = bound_residual(layout.tasks(k));

        if u_sk > 0.0 {
            let c_sk = u_sk * p_s;
            c_req -= c_sk;

            if c_req <= 0.0 {
                let clipped = c_sk + c_req;
                state.record(k, id, clipped);
                debug!(
                    priority = id,
                    processor = k,
                    fraction = clipped,
                    "split complete"
                );
                return true;
            }

            state.record(k, id, c_sk);
            debug!(
                priority = id,
                processor = k,
                fraction = c_sk,
                remaining = c_req,
                "partial split"
            );
        }

        state.clear_spare(k);
    }

    debug!(
        priority = id,
        remaining = c_req,
        "split failed: spare capacity exhausted"
    );
    false
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rta::ResponseTimeTest;
    use crate::scheduler::feasibility::LiuLaylandTest;
    use crate::scheduler::partition::{first_fit, Placement};

    const EPS: f64 = 1e-9;

    /// Two processors laid out by first-fit with the response-time test:
    ///   P0: (4,10,0) (5,10,1)
    ///   P1: (4,10,2) (5,10,3)
    /// Each processor offers 2.0 units of DMPM spare capacity to a period-10 task.
    fn dmpm_layout() -> ProcessorLayout {
        let mut layout = ProcessorLayout::new(2);
        for t in [
            Task::new(4.0, 10.0, 0),
            Task::new(5.0, 10.0, 1),
            Task::new(4.0, 10.0, 2),
            Task::new(5.0, 10.0, 3),
        ] {
            assert!(matches!(
                first_fit(&t, &mut layout, &ResponseTimeTest),
                Placement::Placed(_)
            ));
        }
        layout
    }

    /// Two processors each holding one 0.9-utilisation task.
    fn rmdp_layout() -> ProcessorLayout {
        let mut layout = ProcessorLayout::new(2);
        for t in [Task::new(9.0, 10.0, 0), Task::new(9.0, 10.0, 1)] {
            assert!(matches!(
                first_fit(&t, &mut layout, &LiuLaylandTest),
                Placement::Placed(_)
            ));
        }
        layout
    }

    fn assert_no_negative_fractions(state: &SplitState, num_processors: usize) {
        for k in 0..num_processors {
            if let Some(m) = state.fractions_on(k) {
                for (&id, &c) in m {
                    assert!(c >= 0.0, "negative fraction {c} for task {id} on P{k}");
                }
            }
        }
    }

    // ── SplitState ────────────────────────────────────────────────────────────

    #[test]
    fn fresh_state_has_spare_everywhere_and_no_splits() {
        let state = SplitState::new(3);
        assert!((0..3).all(|k| state.has_spare_capacity(k)));
        assert!(!state.has_spare_capacity(3));
        assert_eq!(state.split_tasks().count(), 0);
        assert_eq!(state.fraction(0, 42), 0.0);
    }

    // ── DMPM spare capacity ───────────────────────────────────────────────────

    #[test]
    fn layout_fixture_matches_expected_placement() {
        let layout = dmpm_layout();
        assert_eq!(layout.tasks(0).len(), 2);
        assert_eq!(layout.tasks(1).len(), 2);
        assert_eq!(layout.processor_of(2), Some(1));
    }

    #[test]
    fn response_time_spare_takes_best_positive_slack() {
        let layout = dmpm_layout();
        let state = SplitState::new(2);
        // (4,10,0): R = 4 + 4 = 8 → 2;  (5,10,1): R = 14 → negative
        assert!((response_time_spare(0, 10.0, &layout, &state) - 2.0).abs() < EPS);
    }

    #[test]
    fn response_time_spare_divides_by_jobs_per_period() {
        let layout = dmpm_layout();
        let state = SplitState::new(2);
        // p_s = 5 → ceil(10 / 5) = 2 jobs of the splitting task per period
        assert!((response_time_spare(0, 5.0, &layout, &state) - 1.0).abs() < EPS);
    }

    #[test]
    fn response_time_spare_of_empty_processor_is_zero() {
        let layout = ProcessorLayout::new(1);
        let state = SplitState::new(1);
        assert_eq!(response_time_spare(0, 10.0, &layout, &state), 0.0);
    }

    #[test]
    fn split_task_on_processor_uses_its_recorded_fraction() {
        let mut layout = ProcessorLayout::new(1);
        first_fit(&Task::new(2.0, 10.0, 0), &mut layout, &ResponseTimeTest);

        let mut state = SplitState::new(1);
        state.mark_split(0);
        state.record(0, 0, 3.0);

        // (10 − 3) / ceil(10 / 10)
        assert!((response_time_spare(0, 10.0, &layout, &state) - 7.0).abs() < EPS);
    }

    // ── DMPM splitting ────────────────────────────────────────────────────────

    #[test]
    fn dmpm_overshoot_clips_last_fraction_and_keeps_spare_flag() {
        let layout = dmpm_layout();
        let mut state = SplitState::new(2);
        let task = Task::new(3.0, 10.0, 4);

        assert!(Splitter::ResponseTimeResidual.split(&task, &layout, &mut state));
        assert_eq!(state.fractions_of(4), vec![(0, 2.0), (1, 1.0)]);
        assert!((state.total_fraction(4) - 3.0).abs() < EPS);
        assert!(!state.has_spare_capacity(0));
        assert!(
            state.has_spare_capacity(1),
            "overshoot path leaves the flag set"
        );
        assert!(state.is_split(4));
        assert_no_negative_fractions(&state, 2);
    }

    #[test]
    fn dmpm_exact_completion_clears_spare_flag() {
        let layout = dmpm_layout();
        let mut state = SplitState::new(2);
        let task = Task::new(4.0, 10.0, 4);

        assert!(Splitter::ResponseTimeResidual.split(&task, &layout, &mut state));
        assert_eq!(state.fractions_of(4), vec![(0, 2.0), (1, 2.0)]);
        assert!(!state.has_spare_capacity(0));
        assert!(!state.has_spare_capacity(1));
    }

    #[test]
    fn dmpm_shorter_period_task_splits_with_smaller_slices() {
        let layout = dmpm_layout();
        let mut state = SplitState::new(2);
        let task = Task::new(1.5, 5.0, 4);

        assert!(Splitter::ResponseTimeResidual.split(&task, &layout, &mut state));
        let fractions = state.fractions_of(4);
        assert_eq!(fractions.len(), 2);
        assert!((fractions[0].1 - 1.0).abs() < EPS);
        assert!((fractions[1].1 - 0.5).abs() < EPS);
        assert!((state.total_fraction(4) - 1.5).abs() < EPS);
    }

    #[test]
    fn dmpm_fails_when_spare_capacity_is_exhausted() {
        let layout = dmpm_layout();
        let mut state = SplitState::new(2);
        let task = Task::new(5.0, 10.0, 4); // needs 5, only 2 + 2 available

        assert!(!Splitter::ResponseTimeResidual.split(&task, &layout, &mut state));
        assert!(state.is_split(4), "task stays marked after a failed split");
        assert!(!state.has_spare_capacity(0));
        assert!(!state.has_spare_capacity(1));
    }

    #[test]
    fn dmpm_skips_processors_without_spare_capacity() {
        let layout = dmpm_layout();
        let mut state = SplitState::new(2);
        state.clear_spare(0);
        let task = Task::new(1.0, 10.0, 4);

        assert!(Splitter::ResponseTimeResidual.split(&task, &layout, &mut state));
        assert_eq!(state.fractions_of(4), vec![(1, 1.0)]);
    }

    #[test]
    fn dmpm_cleared_flag_is_never_revisited() {
        let layout = dmpm_layout();
        let mut state = SplitState::new(2);

        // Exact split clears both processors...
        assert!(Splitter::ResponseTimeResidual.split(
            &Task::new(4.0, 10.0, 4),
            &layout,
            &mut state
        ));
        // ...so even a tiny follow-up task finds nothing.
        assert!(!Splitter::ResponseTimeResidual.split(
            &Task::new(0.1, 10.0, 5),
            &layout,
            &mut state
        ));
        assert!(state.fractions_of(5).is_empty());
    }

    // ── RMDP splitting ────────────────────────────────────────────────────────

    #[test]
    fn rmdp_split_sums_to_execution_time() {
        let layout = rmdp_layout();
        let mut state = SplitState::new(2);
        let task = Task::new(1.0, 10.0, 2);

        assert!(Splitter::BoundResidual.split(&task, &layout, &mut state));

        let residual = 0.9 - 2.0 * (2.0_f64.sqrt() - 1.0);
        let fractions = state.fractions_of(2);
        assert_eq!(fractions.len(), 2);
        assert!((fractions[0].1 - residual * 10.0).abs() < EPS);
        assert!((state.total_fraction(2) - 1.0).abs() < EPS);
        assert!(!state.has_spare_capacity(0));
        assert!(state.has_spare_capacity(1));
        assert_no_negative_fractions(&state, 2);
    }

    #[test]
    fn rmdp_ignores_processors_below_the_bound() {
        let mut layout = ProcessorLayout::new(1);
        first_fit(&Task::new(5.0, 10.0, 0), &mut layout, &LiuLaylandTest);
        let mut state = SplitState::new(1);

        assert!(!Splitter::BoundResidual.split(&Task::new(1.0, 10.0, 1), &layout, &mut state));
        assert!(state.fractions_of(1).is_empty());
        assert!(!state.has_spare_capacity(0));
    }

    #[test]
    fn rmdp_second_split_reuses_remaining_processor_then_fails() {
        let layout = rmdp_layout();
        let mut state = SplitState::new(2);

        assert!(Splitter::BoundResidual.split(&Task::new(1.0, 10.0, 2), &layout, &mut state));
        assert!(!Splitter::BoundResidual.split(&Task::new(1.0, 10.0, 3), &layout, &mut state));
        // P0 was already cleared, so only P1 contributed to the second attempt.
        assert_eq!(state.fractions_of(3).len(), 1);
        assert_eq!(state.fractions_of(3)[0].0, 1);
        assert!(!state.has_spare_capacity(1));
    }
}
