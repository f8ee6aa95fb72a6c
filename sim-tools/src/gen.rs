/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Taskset generation following Kato et al.
//!
//! A taskset is grown one task at a time while its total utilisation stays
//! within the target.  Each task's utilisation is drawn uniformly from
//! `[util_min, util_max]`; only the last one is adjusted so that the total
//! equals the target exactly (so it may fall below `util_min`).  Periods are
//! drawn uniformly from `[period_min, period_max]`.
//!
//! The generated tasks are then ordered by the requested [`TaskOrder`] and
//! receive `priority = rank`, which is what the scheduling algorithms expect.

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use rtpart::task::Task;

/// Ordering (and hence priority assignment) of a generated taskset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOrder {
    /// Ascending period: deadline-monotonic priorities.
    Dm,
    /// Descending utilisation.
    Util,
}

impl std::str::FromStr for TaskOrder {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dm" => Ok(TaskOrder::Dm),
            "util" => Ok(TaskOrder::Util),
            _ => Err(GenError::UnknownOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GenError {
    #[error("task utilisation range [{min}, {max}] must satisfy 0 < min <= max <= 1")]
    InvalidUtilRange { min: f64, max: f64 },

    #[error("period range [{min}, {max}] must satisfy 0 < min <= max")]
    InvalidPeriodRange { min: f64, max: f64 },

    #[error("target utilisation must be finite and positive, got {0}")]
    NonPositiveTarget(f64),

    #[error("unknown task order '{0}' (valid: dm, util)")]
    UnknownOrder(String),
}

/// Parameters for one generated taskset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KatoParams {
    pub util_min: f64,
    pub util_max: f64,
    /// Total utilisation of the taskset (not normalised by processor count).
    pub target_util: f64,
    pub period_min: f64,
    pub period_max: f64,
    pub order: TaskOrder,
}

impl KatoParams {
    pub fn validate(&self) -> Result<(), GenError> {
        let util_ok = self.util_min.is_finite()
            && self.util_max.is_finite()
            && self.util_min > 0.0
            && self.util_min <= self.util_max
            && self.util_max <= 1.0;
        if !util_ok {
            return Err(GenError::InvalidUtilRange {
                min: self.util_min,
                max: self.util_max,
            });
        }

        // rand's uniform sampler panics on an infinite span
        let period_ok = self.period_min.is_finite()
            && self.period_max.is_finite()
            && self.period_min > 0.0
            && self.period_min <= self.period_max;
        if !period_ok {
            return Err(GenError::InvalidPeriodRange {
                min: self.period_min,
                max: self.period_max,
            });
        }

        if !(self.target_util.is_finite() && self.target_util > 0.0) {
            return Err(GenError::NonPositiveTarget(self.target_util));
        }
        Ok(())
    }
}

/// Draw task utilisations until their sum reaches `target` exactly.
pub fn kato_utilizations<R: Rng + ?Sized>(
    rng: &mut R,
    min: f64,
    max: f64,
    target: f64,
) -> Vec<f64> {
    let mut utils = Vec::new();
    let mut total = 0.0;

    while total < target {
        let u = rng.gen_range(min..=max);
        if total + u >= target {
            utils.push(target - total);
            break;
        }
        utils.push(u);
        total += u;
    }

    utils
}

/// Generate one ordered taskset.
///
/// # Errors
/// Returns a [`GenError`] if the parameters are inconsistent.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, params: &KatoParams) -> Result<Vec<Task>, GenError> {
    params.validate()?;

    let mut pairs: Vec<(f64, f64)> =
        kato_utilizations(rng, params.util_min, params.util_max, params.target_util)
            .into_iter()
            .map(|u| (u, rng.gen_range(params.period_min..=params.period_max)))
            .collect();

    match params.order {
        TaskOrder::Dm => pairs.sort_by(|a, b| a.1.total_cmp(&b.1)),
        TaskOrder::Util => pairs.sort_by(|a, b| b.0.total_cmp(&a.0)),
    }

    Ok(pairs
        .into_iter()
        .enumerate()
        .map(|(rank, (u, period))| Task::new(u * period, period, rank))
        .collect())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
