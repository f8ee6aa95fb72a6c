//! Taskset file loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! processors: 2
//! algorithm: dmpm
//! tasks:
//!   - { execution_time: 6, period: 10, priority: 0 }
//!   - { execution_time: 6, period: 10 }      # priority defaults to position
//!   - [3, 10, 2]                             # (execution_time, period, priority)
//! ```
//!
//! `processors` and `algorithm` are optional so the same file can be run
//! against several configurations from the command line.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::scheduler::Algorithm;
use crate::task::{total_utilization, Task};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
#[derive(Debug, Deserialize)]
struct TasksetFile {
    processors: Option<usize>,
    algorithm: Option<String>,
    #[serde(default)]
    tasks: Vec<TaskEntry>,
}

/// One task as it may appear in the file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TaskEntry {
    Triplet(f64, f64, usize),
    Pair(f64, f64),
    Fields {
        execution_time: f64,
        period: f64,
        priority: Option<usize>,
    },
}

impl TaskEntry {
    fn into_task(self, position: usize) -> Task {
        match self {
            TaskEntry::Triplet(c, p, prio) => Task::new(c, p, prio),
            TaskEntry::Pair(c, p) => Task::new(c, p, position),
            TaskEntry::Fields {
                execution_time,
                period,
                priority,
            } => Task::new(execution_time, period, priority.unwrap_or(position)),
        }
    }
}

// ── Public data structures ────────────────────────────────────────────────────

/// A taskset plus the optional run parameters stored next to it.
#[derive(Debug, Clone, Default)]
pub struct TasksetConfig {
    pub processors: Option<usize>,
    pub algorithm: Option<Algorithm>,
    /// Tasks in file order.
    pub tasks: Vec<Task>,
}

impl TasksetConfig {
    /// Parse the taskset file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or the algorithm name is not recognised.  Task values are
    /// validated later by the scheduler.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading taskset from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open taskset file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid taskset file: {}", path.display()))
    }

    /// Parse a taskset from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: TasksetFile =
            serde_yaml::from_str(content).context("Failed to parse taskset YAML")?;

        let algorithm = file
            .algorithm
            .as_deref()
            .map(str::parse::<Algorithm>)
            .transpose()?;

        let tasks: Vec<Task> = file
            .tasks
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_task(i))
            .collect();

        for t in &tasks {
            debug!(
                "  Task {}: C={} T={} U={:.3}",
                t.priority,
                t.execution_time,
                t.period,
                t.utilization()
            );
        }

        info!(
            task_count = tasks.len(),
            total_utilization = total_utilization(&tasks),
            processors = ?file.processors,
            algorithm = ?algorithm,
            "taskset loaded"
        );

        Ok(Self {
            processors: file.processors,
            algorithm,
            tasks,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
