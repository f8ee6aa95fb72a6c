/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sim_tools::config::SimulationConfig;
use sim_tools::gen::TaskOrder;
use sim_tools::montecarlo;

#[derive(Parser, Debug)]
#[command(
    name = "schedsim",
    about = "Schedulable-fraction sweep over random tasksets",
    version
)]
struct Cli {
    /// Simulation config file (YAML); built-in defaults when omitted
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Number of processors
    #[arg(short = 'm', long)]
    processors: Option<usize>,

    /// Tasksets per utilisation point
    #[arg(short = 'n', long)]
    tasksets: Option<usize>,

    /// Algorithms to compare (repeatable: -a p_dm -a dmpm)
    #[arg(short = 'a', long = "algorithm")]
    algorithms: Vec<String>,

    /// Task ordering for every algorithm (dm | util)
    #[arg(short = 'o', long)]
    order: Option<TaskOrder>,

    /// Base RNG seed
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Worker threads
    #[arg(short = 't', long)]
    threads: Option<usize>,
}

impl Cli {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(m) = self.processors {
            config.processors = m;
        }
        if let Some(n) = self.tasksets {
            config.tasksets = n;
        }
        if !self.algorithms.is_empty() {
            config.algorithms = self.algorithms.clone();
        }
        if self.order.is_some() {
            config.order = self.order;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SimulationConfig::load_from_file(path)?,
        None => SimulationConfig::default(),
    };
    cli.apply(&mut config);

    let table = montecarlo::sweep(&config)?;
    info!("sweep finished");

    println!("{table}");
    Ok(())
}
