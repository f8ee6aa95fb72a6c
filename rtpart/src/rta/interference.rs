/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Worst-case interference between two implicit-deadline tasks.
//!
//! A free function rather than a method so it can be used and tested
//! independently of any processor state.

use crate::task::Task;

/// Worst-case execution that `higher` can force `lower` to wait for inside one
/// deadline window of `lower`.
///
/// With `d = lower.deadline()` and `F = floor(d / higher.period)`:
///
/// * `d >= F·p_j + c_j` → `(F + 1)·c_j` (the trailing job of `higher` fits
///   entirely inside the window);
/// * otherwise → `d − F·(p_j − c_j)` (only part of the trailing job fits).
///
/// The caller guarantees that `higher` has equal or higher priority; nothing
/// is checked here.
pub fn interference(lower: &Task, higher: &Task) -> f64 {
    let d = lower.deadline();
    let (c_j, p_j) = (higher.execution_time, higher.period);

    let full_periods = (d / p_j).floor();

    if d >= full_periods * p_j + c_j {
        (full_periods + 1.0) * c_j
    } else {
        d - full_periods * (p_j - c_j)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_job_fits_entirely() {
        // d = 10, p_j = 4 → F = 2; 10 >= 8 + 1 → 3 jobs of 1
        let lower = Task::new(2.0, 10.0, 1);
        let higher = Task::new(1.0, 4.0, 0);
        assert_eq!(interference(&lower, &higher), 3.0);
    }

    #[test]
    fn trailing_job_is_cut_by_the_deadline() {
        // d = 10, p_j = 4, c_j = 3 → F = 2; 10 < 8 + 3 → 10 − 2·1 = 8
        let lower = Task::new(1.0, 10.0, 1);
        let higher = Task::new(3.0, 4.0, 0);
        assert_eq!(interference(&lower, &higher), 8.0);
    }

    #[test]
    fn equal_periods_interfere_by_one_job() {
        // d = p_j = 10 → F = 1; 10 < 10 + 6 → 10 − (10 − 6) = 6
        let lower = Task::new(6.0, 10.0, 1);
        let higher = Task::new(6.0, 10.0, 0);
        assert_eq!(interference(&lower, &higher), 6.0);
    }

    #[test]
    fn longer_higher_priority_period_counts_one_job() {
        // d = 10, p_j = 25 → F = 0; 10 >= 0 + 4 → 4
        let lower = Task::new(1.0, 10.0, 1);
        let higher = Task::new(4.0, 25.0, 0);
        assert_eq!(interference(&lower, &higher), 4.0);
    }

    #[test]
    fn interference_never_exceeds_the_window() {
        let periods = [3.0, 7.5, 10.0, 13.0, 40.0, 100.0];
        let fractions = [0.05, 0.3, 0.5, 0.9, 1.0];

        for &p_i in &periods {
            for &p_j in &periods {
                for &f in &fractions {
                    let lower = Task::new(0.5, p_i, 1);
                    let higher = Task::new(f * p_j.min(p_i), p_j, 0);
                    let i = interference(&lower, &higher);
                    assert!(
                        i <= p_i + 1e-9,
                        "interference {i} exceeds window {p_i} (p_j={p_j}, c_j={})",
                        higher.execution_time
                    );
                    assert!(i >= 0.0);
                }
            }
        }
    }
}
