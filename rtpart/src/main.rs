/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::{error, info, warn};

use rtpart::config::TasksetConfig;
use rtpart::scheduler::{Algorithm, PartitionScheduler, ScheduleOutcome, Verdict};

/// Exit status when the taskset is found unschedulable.
const EXIT_UNSCHEDULABLE: i32 = 2;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Decide whether a taskset fits on identical processors.
///
/// Example:
///   rtpart -c taskset.yaml -a dmpm -m 4
#[derive(Debug, Parser)]
#[command(
    name = "rtpart",
    about = "Partitioned / semi-partitioned fixed-priority feasibility test",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML taskset file.
    #[arg(short = 'c', long = "taskset")]
    taskset: PathBuf,

    /// Algorithm (p_dm, fbb_fdd, dmpm, rmdp).  Overrides the file.
    #[arg(short = 'a', long = "algorithm")]
    algorithm: Option<String>,

    /// Number of processors.  Overrides the file.
    #[arg(short = 'm', long = "processors")]
    processors: Option<usize>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => {
            report(&outcome);
            if !outcome.is_schedulable() {
                process::exit(EXIT_UNSCHEDULABLE);
            }
        }
        Err(e) => {
            error!("{:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ScheduleOutcome> {
    let cfg = TasksetConfig::load_from_file(&cli.taskset)?;

    let algorithm = match &cli.algorithm {
        Some(name) => name.parse::<Algorithm>()?,
        None => cfg.algorithm.unwrap_or_else(|| {
            warn!("No algorithm given, defaulting to DMPM");
            Algorithm::Dmpm
        }),
    };

    let processors = cli
        .processors
        .or(cfg.processors)
        .ok_or_else(|| {
            anyhow::anyhow!("processor count missing: pass -m or set `processors` in the file")
        })?;

    let scheduler = PartitionScheduler::new(algorithm, processors);

    info!(
        algorithm = %scheduler.algorithm(),
        processors = scheduler.num_processors(),
        semi_partitioned = scheduler.algorithm().is_semi_partitioned(),
        task_count = cfg.tasks.len(),
        "Configuration"
    );

    let outcome = scheduler.schedule(cfg.tasks)?;
    Ok(outcome)
}

fn report(outcome: &ScheduleOutcome) {
    for (k, tasks) in outcome.layout.processors().iter().enumerate() {
        let ids: Vec<usize> = tasks.iter().map(|t| t.priority).collect();
        info!(
            "  [P{k}]  tasks={ids:?}  utilization={util:.3}",
            util = outcome.layout.utilization(k),
        );
    }

    if let Some(split) = &outcome.split {
        for id in split.split_tasks() {
            info!(
                "  split task {id}: fractions={fractions:?} total={total:.3}",
                fractions = split.fractions_of(id),
                total = split.total_fraction(id),
            );
        }
    }

    match &outcome.verdict {
        Verdict::Schedulable => println!("schedulable"),
        Verdict::Unschedulable(reason) => {
            warn!(algorithm = %outcome.algorithm, "taskset rejected");
            println!("unschedulable: {reason}");
        }
    }
}
