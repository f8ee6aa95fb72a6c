//! Multiprocessor fixed-priority scheduling algorithms.
//!
//! [`PartitionScheduler`] decides whether an ordered taskset fits on `m`
//! identical processors using one of four heuristics, and returns a
//! [`ScheduleOutcome`]: the [`Verdict`], the per-processor whole-task
//! [`ProcessorLayout`], and for the semi-partitioned algorithms the
//! [`SplitState`] of every split task.
//!
//! | Algorithm | Order | Whole-task test | Fallback |
//! |---|---|---|---|
//! | P-DM | input | response time | none |
//! | FBB-FDD | period ascending | *not implemented* (fails closed) | none |
//! | DMPM | input | response time | split on response-time residual |
//! | RMDP | input | Liu & Layland | split on Liu & Layland residual |
//!
//! # Design decisions
//!
//! | Topic | Choice |
//! |---|---|
//! | State | Stateless `schedule()`; layout and split table are local to one call |
//! | Infeasibility | `Ok(ScheduleOutcome)` with `Verdict::Unschedulable`, never `Err` |
//! | Bad input | `Err(SchedulerError)` before any assignment |
//! | Thread safety | `Send + Sync`; independent runs can execute concurrently |
//!
//! # Example
//! ```rust
//! use rtpart::scheduler::{Algorithm, PartitionScheduler};
//! use rtpart::task::Task;
//!
//! let scheduler = PartitionScheduler::new(Algorithm::PDm, 2);
//! let outcome = scheduler
//!     .schedule(vec![Task::new(6.0, 10.0, 0), Task::new(6.0, 10.0, 1)])
//!     .unwrap();
//! assert!(outcome.is_schedulable());
//! assert_eq!(outcome.layout.tasks(1).len(), 1);
//! ```

pub mod acceptance;
pub mod error;
pub mod feasibility;
pub mod partition;
pub mod split;

pub use error::{Rejection, SchedulerError};
pub use partition::ProcessorLayout;
pub use split::SplitState;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::rta::ResponseTimeTest;
use crate::task::{validate_taskset, Task};

use acceptance::{AcceptanceTest, UnimplementedTest};
use feasibility::LiuLaylandTest;
use partition::{first_fit, Placement};
use split::Splitter;

// ── Algorithm ─────────────────────────────────────────────────────────────────

/// The four supported heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Partitioned deadline-monotonic, first fit, response-time test.
    PDm,
    /// Fisher–Baruah–Baker first-fit decreasing (deadline-sorted).
    FbbFdd,
    /// Deadline-monotonic with priority migration (Kato et al.).
    Dmpm,
    /// Rate-monotonic deferrable portion (Kato et al.).
    Rmdp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::PDm,
        Algorithm::FbbFdd,
        Algorithm::Dmpm,
        Algorithm::Rmdp,
    ];

    /// Whole-task acceptance test used during first fit.
    pub fn acceptance_test(self) -> &'static dyn AcceptanceTest {
        match self {
            Algorithm::PDm | Algorithm::Dmpm => &ResponseTimeTest,
            Algorithm::FbbFdd => &UnimplementedTest,
            Algorithm::Rmdp => &LiuLaylandTest,
        }
    }

    /// Capacity splitter tried when first fit fails, if any.
    pub fn splitter(self) -> Option<Splitter> {
        match self {
            Algorithm::Dmpm => Some(Splitter::ResponseTimeResidual),
            Algorithm::Rmdp => Some(Splitter::BoundResidual),
            Algorithm::PDm | Algorithm::FbbFdd => None,
        }
    }

    /// Whether the taskset is sorted by period (deadline) before assignment.
    pub fn sorts_by_deadline(self) -> bool {
        matches!(self, Algorithm::FbbFdd)
    }

    /// `true` for DMPM and RMDP.
    pub fn is_semi_partitioned(self) -> bool {
        self.splitter().is_some()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::PDm => write!(f, "P-DM"),
            Algorithm::FbbFdd => write!(f, "FBB-FDD"),
            Algorithm::Dmpm => write!(f, "DMPM"),
            Algorithm::Rmdp => write!(f, "RMDP"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    /// Case-insensitive; `-` and `_` are interchangeable (`p-dm`, `P_DM`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "p_dm" | "pdm" => Ok(Algorithm::PDm),
            "fbb_fdd" | "fbbfdd" => Ok(Algorithm::FbbFdd),
            "dmpm" => Ok(Algorithm::Dmpm),
            "rmdp" => Ok(Algorithm::Rmdp),
            _ => Err(SchedulerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Whole-taskset feasibility verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Every task was placed whole or split to completion.
    Schedulable,
    /// Assignment stopped at the first task that could not be placed.
    Unschedulable(Rejection),
}

/// Final, read-only result of one scheduling run.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome {
    pub algorithm: Algorithm,
    pub verdict: Verdict,
    /// Whole tasks per processor, as far as assignment got.
    pub layout: ProcessorLayout,
    /// Split bookkeeping; `None` for the partitioned algorithms.
    pub split: Option<SplitState>,
}

impl ScheduleOutcome {
    pub fn is_schedulable(&self) -> bool {
        matches!(self.verdict, Verdict::Schedulable)
    }

    /// Per-processor utilisation from whole tasks only.
    pub fn utilizations(&self) -> Vec<f64> {
        self.layout.utilizations()
    }

    /// The rejection reason, if unschedulable.
    pub fn rejection(&self) -> Option<&Rejection> {
        match &self.verdict {
            Verdict::Schedulable => None,
            Verdict::Unschedulable(r) => Some(r),
        }
    }
}

// ── PartitionScheduler ────────────────────────────────────────────────────────

/// Runs one algorithm on a fixed number of identical processors.
///
/// Holds only configuration.  All per-run state is allocated inside
/// [`schedule`](Self::schedule) and returned in the outcome.
#[derive(Debug, Clone, Copy)]
pub struct PartitionScheduler {
    algorithm: Algorithm,
    num_processors: usize,
}

impl PartitionScheduler {
    pub fn new(algorithm: Algorithm, num_processors: usize) -> Self {
        Self {
            algorithm,
            num_processors,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn num_processors(&self) -> usize {
        self.num_processors
    }

    /// Assign `tasks` in order (or deadline order for FBB-FDD) and return the
    /// verdict together with the resulting layout.
    ///
    /// An empty taskset is trivially schedulable.
    ///
    /// # Errors
    /// Returns a [`SchedulerError`] if the processor count is zero or a task
    /// is malformed.  Infeasibility is **not** an error.
    pub fn schedule(&self, mut tasks: Vec<Task>) -> Result<ScheduleOutcome, SchedulerError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        if self.num_processors == 0 {
            return Err(SchedulerError::NoProcessors);
        }
        validate_taskset(&tasks)?;

        if self.algorithm.sorts_by_deadline() {
            tasks.sort_by(|a, b| a.deadline().total_cmp(&b.deadline()));
        }

        // ── Per-call state ────────────────────────────────────────────────────
        let test = self.algorithm.acceptance_test();
        let splitter = self.algorithm.splitter();
        let mut layout = ProcessorLayout::new(self.num_processors);
        let mut split = splitter.map(|_| SplitState::new(self.num_processors));

        debug!(
            algorithm = %self.algorithm,
            processors = self.num_processors,
            task_count = tasks.len(),
            "scheduling run started"
        );

        let verdict = self.assign(&tasks, test, splitter, &mut layout, split.as_mut());

        debug!(
            algorithm = %self.algorithm,
            schedulable = matches!(verdict, Verdict::Schedulable),
            placed_whole = layout.task_count(),
            split_tasks = split.as_ref().map_or(0, |s| s.split_tasks().count()),
            "scheduling run finished"
        );

        Ok(ScheduleOutcome {
            algorithm: self.algorithm,
            verdict,
            layout,
            split,
        })
    }

    fn assign(
        &self,
        tasks: &[Task],
        test: &dyn AcceptanceTest,
        splitter: Option<Splitter>,
        layout: &mut ProcessorLayout,
        mut split: Option<&mut SplitState>,
    ) -> Verdict {
        for task in tasks {
            match first_fit(task, layout, test) {
                Placement::Placed(_) => {}

                Placement::Undecided => {
                    warn!(
                        algorithm = %self.algorithm,
                        test = test.name(),
                        priority = task.priority,
                        "acceptance test is not implemented; taskset reported unschedulable"
                    );
                    return Verdict::Unschedulable(Rejection::UnimplementedTest {
                        test: test.name(),
                        priority: task.priority,
                    });
                }

                Placement::Rejected => {
                    let placed = match (splitter, split.as_deref_mut()) {
                        (Some(splitter), Some(state)) => splitter.split(task, layout, state),
                        _ => false,
                    };

                    if !placed {
                        return Verdict::Unschedulable(Rejection::PlacementRejected {
                            priority: task.priority,
                            execution_time: task.execution_time,
                            period: task.period,
                        });
                    }
                }
            }
        }

        Verdict::Schedulable
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
