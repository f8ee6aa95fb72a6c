/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Monte-Carlo schedulability estimation.
//!
//! For each normalised system utilisation the driver generates
//! `config.tasksets` random tasksets, runs one algorithm on each and reports
//! the fraction judged schedulable.  Trials are spread over scoped worker
//! threads.  Trial `i` always draws from an RNG seeded with
//! [`trial_seed`]`(seed, i)`, so results are independent of the thread count
//! and every algorithm sees the same tasksets for a given ordering.

use std::fmt;
use std::thread;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{debug, info};

use rtpart::scheduler::{Algorithm, PartitionScheduler, SchedulerError};

use crate::config::SimulationConfig;
use crate::gen::{self, GenError, KatoParams};

#[derive(Debug, Error)]
pub enum SimError {
    #[error("taskset generation failed: {0}")]
    Gen(#[from] GenError),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("number of tasksets per point must be at least 1")]
    NoTasksets,
}

/// Seed for trial `trial` of a run seeded with `seed`.
pub fn trial_seed(seed: u64, trial: usize) -> u64 {
    seed ^ (trial as u64).wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Fraction of generated tasksets that `algorithm` schedules at normalised
/// utilisation `system_util`.
///
/// # Errors
/// [`SimError::NoTasksets`] if no trials are configured, otherwise whatever
/// the generator or scheduler reports for the configured parameters.
pub fn schedulable_fraction(
    config: &SimulationConfig,
    algorithm: Algorithm,
    system_util: f64,
) -> Result<f64, SimError> {
    if config.tasksets == 0 {
        return Err(SimError::NoTasksets);
    }

    let params = KatoParams {
        util_min: config.util_min,
        util_max: config.util_max,
        target_util: system_util * config.processors as f64,
        period_min: config.period_min,
        period_max: config.period_max,
        order: config.order_for(algorithm),
    };
    params.validate()?;

    let scheduler = PartitionScheduler::new(algorithm, config.processors);
    let workers = config.worker_threads().min(config.tasksets);

    let counts: Vec<Result<usize, SimError>> = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|w| {
                let scheduler = &scheduler;
                let params = &params;
                s.spawn(move || -> Result<usize, SimError> {
                    let mut schedulable = 0;
                    for trial in (w..config.tasksets).step_by(workers) {
                        let mut rng = StdRng::seed_from_u64(trial_seed(config.seed, trial));
                        let tasks = gen::generate(&mut rng, params)?;
                        if scheduler.schedule(tasks)?.is_schedulable() {
                            schedulable += 1;
                        }
                    }
                    Ok(schedulable)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut schedulable = 0;
    for count in counts {
        schedulable += count?;
    }

    let fraction = schedulable as f64 / config.tasksets as f64;
    debug!(
        algorithm = %algorithm,
        system_util,
        schedulable,
        total = config.tasksets,
        "point done"
    );
    Ok(fraction)
}

// ── Sweep ─────────────────────────────────────────────────────────────────────

/// Schedulable fractions for every configured algorithm and utilisation.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepTable {
    pub algorithms: Vec<Algorithm>,
    /// `(system_util, fraction per algorithm in column order)`.
    pub rows: Vec<(f64, Vec<f64>)>,
}

/// Run [`schedulable_fraction`] over the whole configured grid.
pub fn sweep(config: &SimulationConfig) -> Result<SweepTable, SimError> {
    let algorithms = config.algorithms()?;
    info!(
        algorithms = ?algorithms,
        points = config.system_utils.len(),
        tasksets = config.tasksets,
        processors = config.processors,
        threads = config.worker_threads(),
        "starting sweep"
    );

    let mut rows = Vec::with_capacity(config.system_utils.len());
    for &util in &config.system_utils {
        let fractions = algorithms
            .iter()
            .map(|&alg| schedulable_fraction(config, alg, util))
            .collect::<Result<Vec<_>, _>>()?;
        info!("  system_util={util}: {fractions:?}");
        rows.push((util, fractions));
    }

    Ok(SweepTable { algorithms, rows })
}

impl fmt::Display for SweepTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "system_util")?;
        for alg in &self.algorithms {
            write!(f, "\t{alg}")?;
        }

        for (util, fractions) in &self.rows {
            writeln!(f)?;
            write!(f, "{util}")?;
            for fraction in fractions {
                write!(f, "\t{fraction}")?;
            }
        }

        Ok(())
    }
}
