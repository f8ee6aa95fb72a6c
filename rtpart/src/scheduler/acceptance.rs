/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Pluggable per-processor acceptance tests.
//!
//! The first-fit partitioner only ever asks one question: *may this task join
//! the tasks already on this processor?*  Each algorithm answers it with a
//! different [`AcceptanceTest`]:
//!
//! | Algorithm | Test |
//! |---|---|
//! | P-DM, DMPM | [`ResponseTimeTest`](crate::rta::ResponseTimeTest) |
//! | RMDP | [`LiuLaylandTest`](super::feasibility::LiuLaylandTest) |
//! | FBB-FDD | [`UnimplementedTest`] (fails closed) |

use crate::task::Task;

/// Outcome of one acceptance test evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The task may be appended to the processor.
    Accepted,
    /// The test ran and the task does not fit.
    Rejected,
    /// The test has no decision procedure.  Treated as a rejection, but kept
    /// distinct so the verdict can say *why* nothing was placed.
    Undecided,
}

/// Decides whether `task` can join `assigned` on one processor.
///
/// Implementations must be pure: the same inputs always give the same
/// answer, and nothing is mutated.
pub trait AcceptanceTest: Send + Sync {
    /// Short identifier used in logs and rejection reasons.
    fn name(&self) -> &'static str;

    fn admit(&self, task: &Task, assigned: &[Task]) -> Admission;
}

/// Placeholder for the polynomial-time acceptance test of FBB-FDD.
///
/// No decision procedure exists yet, so every call returns
/// [`Admission::Undecided`] and FBB-FDD can never place a task.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnimplementedTest;

impl AcceptanceTest for UnimplementedTest {
    fn name(&self) -> &'static str {
        "fbb_fdd_polynomial"
    }

    fn admit(&self, _task: &Task, _assigned: &[Task]) -> Admission {
        Admission::Undecided
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unimplemented_test_never_decides() {
        let task = Task::new(0.001, 1_000.0, 0);
        assert_eq!(UnimplementedTest.admit(&task, &[]), Admission::Undecided);
    }
}
