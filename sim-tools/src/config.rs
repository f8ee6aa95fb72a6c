//! Simulation configuration.
//!
//! Every key is optional; missing keys take the defaults below.
//! ```yaml
//! tasksets: 1000          # tasksets per (algorithm, utilisation) point
//! processors: 4
//! util_min: 0.1           # per-task utilisation range
//! util_max: 0.5
//! period_min: 100
//! period_max: 1000
//! system_utils: [0.5, 0.6, 0.7, 0.8, 0.9, 1.0]
//! algorithms: [p_dm, dmpm, rmdp]
//! order: util             # optional; per-algorithm default otherwise
//! seed: 0
//! threads: 8              # optional; available parallelism otherwise
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use rtpart::scheduler::{Algorithm, SchedulerError};

use crate::gen::TaskOrder;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub tasksets: usize,
    pub processors: usize,
    pub util_min: f64,
    pub util_max: f64,
    pub period_min: f64,
    pub period_max: f64,
    /// Normalised system utilisations to sweep; the generator target is
    /// `system_util * processors`.
    pub system_utils: Vec<f64>,
    pub algorithms: Vec<String>,
    pub order: Option<TaskOrder>,
    pub seed: u64,
    pub threads: Option<usize>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tasksets: 1000,
            processors: 4,
            util_min: 0.1,
            util_max: 0.5,
            period_min: 100.0,
            period_max: 1000.0,
            system_utils: (10..=20).map(|i| i as f64 / 20.0).collect(),
            algorithms: vec!["p_dm".into(), "dmpm".into(), "rmdp".into()],
            order: None,
            seed: 0,
            threads: None,
        }
    }
}

impl SimulationConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading simulation config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open simulation config: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse simulation config: {}", path.display()))
    }

    /// Parsed algorithm list, in configured order.
    pub fn algorithms(&self) -> Result<Vec<Algorithm>, SchedulerError> {
        self.algorithms.iter().map(|name| name.parse()).collect()
    }

    /// Task ordering used when generating tasksets for `algorithm`.
    ///
    /// P-DM and DMPM consume tasks by descending utilisation; RMDP and
    /// FBB-FDD by ascending period.
    pub fn order_for(&self, algorithm: Algorithm) -> TaskOrder {
        self.order.unwrap_or(match algorithm {
            Algorithm::PDm | Algorithm::Dmpm => TaskOrder::Util,
            Algorithm::Rmdp | Algorithm::FbbFdd => TaskOrder::Dm,
        })
    }

    pub fn worker_threads(&self) -> usize {
        self.threads
            .or_else(|| std::thread::available_parallelism().ok().map(usize::from))
            .unwrap_or(1)
            .max(1)
    }
}
